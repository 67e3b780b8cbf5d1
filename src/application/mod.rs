//! Application layer: interactive editing and reporting
//!
//! This layer orchestrates domain logic and depends on the console boundary trait.

pub mod error;
pub mod error_ext;
pub mod menu;
pub mod prompt;
pub mod services;

pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
pub use menu::{offered_commands, MenuCommand, TopCommand};
pub use prompt::{NumberRule, Prompter};
