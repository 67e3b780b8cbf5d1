//! Application services

pub mod report;
pub mod session;

pub use session::{EditorSession, NodeDefaults};
