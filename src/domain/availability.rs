//! Type availability and per-parent child rules
//!
//! Which types a new child may take depends on the parent's type and on the
//! types its siblings already use:
//! - buildings in a sector: every type not yet used, plus `undefined`
//! - floors in a house: every floor type not yet used, plus `undefined`
//! - rooms in a house: every room type, repeats allowed
//! - floors and rooms in any other building: exactly `first` / `main`

use itertools::Itertools;

use crate::domain::kinds::{BuildingKind, FloorKind, NodeKind, RoomKind};

/// Number of floors a house can hold.
pub const MAX_FLOORS_IN_HOUSE: usize = 3;

/// Number of rooms a floor of a house can hold.
pub const MAX_ROOMS_PER_FLOOR: usize = 4;

/// Removes every type present in `existing` from `base` and appends
/// `undefined`, which stays available regardless of siblings.
pub fn available_types<K: NodeKind>(existing: &[K], base: &[K]) -> Vec<K> {
    let mut result = base.to_vec();
    for used in existing {
        result.retain(|k| k != used);
    }
    result.push(K::UNDEFINED);
    result
}

/// Building types still free in a sector.
pub fn building_types(siblings: &[BuildingKind]) -> Vec<BuildingKind> {
    available_types(siblings, BuildingKind::DEFINED)
}

/// Floor types still free in a building.
pub fn floor_types(building: BuildingKind, siblings: &[FloorKind]) -> Vec<FloorKind> {
    if building.is_house() {
        available_types(siblings, FloorKind::DEFINED)
    } else {
        vec![FloorKind::First]
    }
}

/// Room types selectable on a floor. Siblings never restrict rooms.
pub fn room_types(building: BuildingKind) -> Vec<RoomKind> {
    if building.is_house() {
        RoomKind::DEFINED.to_vec()
    } else {
        vec![RoomKind::Main]
    }
}

/// Maximum number of floors for a building of the given type.
pub fn floor_capacity(building: BuildingKind) -> usize {
    if building.is_house() {
        MAX_FLOORS_IN_HOUSE
    } else {
        1
    }
}

/// Maximum number of rooms per floor for a building of the given type.
pub fn room_capacity(building: BuildingKind) -> usize {
    if building.is_house() {
        MAX_ROOMS_PER_FLOOR
    } else {
        1
    }
}

/// Allowed types for a child, derived from its parent context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChildRule<K> {
    /// The parent pins the child to exactly one type; no choice is offered.
    Fixed(K),
    /// The user may pick any of these.
    Choice(Vec<K>),
}

impl<K: NodeKind> ChildRule<K> {
    /// Builds a rule from an option list, collapsing single real options.
    fn from_options(options: Vec<K>) -> Self {
        match options.as_slice() {
            [only] if !only.is_undefined() => ChildRule::Fixed(*only),
            _ => ChildRule::Choice(options),
        }
    }

    pub fn fixed(&self) -> Option<K> {
        match self {
            ChildRule::Fixed(k) => Some(*k),
            ChildRule::Choice(_) => None,
        }
    }

    pub fn options(&self) -> Vec<K> {
        match self {
            ChildRule::Fixed(k) => vec![*k],
            ChildRule::Choice(options) => options.clone(),
        }
    }

    /// `undefined` is accepted by every choice rule since it is the default.
    pub fn allows(&self, kind: K) -> bool {
        match self {
            ChildRule::Fixed(k) => *k == kind,
            ChildRule::Choice(options) => kind.is_undefined() || options.contains(&kind),
        }
    }

    /// Comma separated option names, for messages.
    pub fn describe(&self) -> String {
        self.options().iter().map(|k| k.name()).join(", ")
    }
}

pub fn building_rule(siblings: &[BuildingKind]) -> ChildRule<BuildingKind> {
    ChildRule::Choice(building_types(siblings))
}

pub fn floor_rule(building: BuildingKind, siblings: &[FloorKind]) -> ChildRule<FloorKind> {
    if building.is_house() {
        ChildRule::Choice(floor_types(building, siblings))
    } else {
        ChildRule::from_options(floor_types(building, siblings))
    }
}

pub fn room_rule(building: BuildingKind) -> ChildRule<RoomKind> {
    ChildRule::from_options(room_types(building))
}
