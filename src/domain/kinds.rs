//! Node type enumerations
//!
//! Each level of the hierarchy carries its own closed set of types. Every set
//! ends with an `Undefined` value that new nodes start with.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Common behaviour of the per-level type enumerations.
pub trait NodeKind: Copy + Eq + fmt::Debug + fmt::Display + 'static {
    /// Placeholder value assigned to freshly created nodes.
    const UNDEFINED: Self;

    /// Every real (non-undefined) value, in menu order.
    const DEFINED: &'static [Self];

    /// Menu word for this value.
    fn name(&self) -> &'static str;

    /// Parse a menu word back into a value.
    fn parse(name: &str) -> Option<Self> {
        if name == Self::UNDEFINED.name() {
            return Some(Self::UNDEFINED);
        }
        Self::DEFINED.iter().copied().find(|k| k.name() == name)
    }

    fn is_undefined(&self) -> bool {
        *self == Self::UNDEFINED
    }
}

/// Error for menu words that name no known type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown type: {0}")]
pub struct UnknownKind(pub String);

macro_rules! kind_traits {
    ($kind:ty) => {
        impl fmt::Display for $kind {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }

        impl FromStr for $kind {
            type Err = UnknownKind;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <$kind as NodeKind>::parse(s).ok_or_else(|| UnknownKind(s.to_string()))
            }
        }

        impl Default for $kind {
            fn default() -> Self {
                <$kind as NodeKind>::UNDEFINED
            }
        }
    };
}

/// Type of a building within a sector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuildingKind {
    House,
    Garage,
    Shed,
    BathHouse,
    Undefined,
}

impl NodeKind for BuildingKind {
    const UNDEFINED: Self = BuildingKind::Undefined;
    const DEFINED: &'static [Self] = &[
        BuildingKind::House,
        BuildingKind::Garage,
        BuildingKind::Shed,
        BuildingKind::BathHouse,
    ];

    fn name(&self) -> &'static str {
        match self {
            BuildingKind::House => "house",
            BuildingKind::Garage => "garage",
            BuildingKind::Shed => "shed",
            BuildingKind::BathHouse => "bathHouse",
            BuildingKind::Undefined => "undefined",
        }
    }
}

impl BuildingKind {
    pub fn is_house(&self) -> bool {
        matches!(self, BuildingKind::House)
    }

    /// Only houses and bath houses may have a stove.
    pub fn supports_stove(&self) -> bool {
        matches!(self, BuildingKind::House | BuildingKind::BathHouse)
    }
}

kind_traits!(BuildingKind);

/// Position of a floor within a building.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FloorKind {
    First,
    Second,
    Third,
    Undefined,
}

impl NodeKind for FloorKind {
    const UNDEFINED: Self = FloorKind::Undefined;
    const DEFINED: &'static [Self] = &[FloorKind::First, FloorKind::Second, FloorKind::Third];

    fn name(&self) -> &'static str {
        match self {
            FloorKind::First => "first",
            FloorKind::Second => "second",
            FloorKind::Third => "third",
            FloorKind::Undefined => "undefined",
        }
    }
}

kind_traits!(FloorKind);

/// Purpose of a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoomKind {
    Bedroom,
    Kitchen,
    Bathroom,
    Restroom,
    Playroom,
    Living,
    Main,
    Undefined,
}

impl NodeKind for RoomKind {
    const UNDEFINED: Self = RoomKind::Undefined;
    const DEFINED: &'static [Self] = &[
        RoomKind::Bedroom,
        RoomKind::Kitchen,
        RoomKind::Bathroom,
        RoomKind::Restroom,
        RoomKind::Playroom,
        RoomKind::Living,
        RoomKind::Main,
    ];

    fn name(&self) -> &'static str {
        match self {
            RoomKind::Bedroom => "bedroom",
            RoomKind::Kitchen => "kitchen",
            RoomKind::Bathroom => "bathroom",
            RoomKind::Restroom => "restroom",
            RoomKind::Playroom => "playroom",
            RoomKind::Living => "living",
            RoomKind::Main => "main",
            RoomKind::Undefined => "undefined",
        }
    }
}

kind_traits!(RoomKind);
