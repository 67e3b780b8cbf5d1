//! Domain layer: site hierarchy, type rules and id allocation
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod availability;
pub mod entities;
pub mod error;
pub mod ids;
pub mod kinds;

pub use availability::{
    available_types, building_types, floor_types, room_types, ChildRule, MAX_FLOORS_IN_HOUSE,
    MAX_ROOMS_PER_FLOOR,
};
pub use entities::*;
pub use error::{DomainError, DomainResult};
pub use ids::{allocate_id, NodeId};
pub use kinds::{BuildingKind, FloorKind, NodeKind, RoomKind};
