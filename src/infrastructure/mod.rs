//! Infrastructure layer: console implementation and DI container
//!
//! This layer implements the console boundary trait and wires up the session.

pub mod di;
pub mod error;
pub mod traits;

pub use error::InfraError;
