//! Interactive editor for a site hierarchy.
//!
//! An [`domain::Area`] holds sectors, which hold buildings, which hold floors,
//! which hold rooms. The domain layer owns the type and capacity rules, the
//! application layer drives the interactive session, the cli layer wires it
//! to the terminal.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
