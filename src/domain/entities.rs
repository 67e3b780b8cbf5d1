//! Domain entities: the site hierarchy
//!
//! Area -> Sector -> Building -> Floor -> Room. Every node owns its children.
//! Fields are private so that ranges and per-parent type rules can only be
//! changed through the validating mutators below.

use std::ops::RangeInclusive;

use crate::domain::availability::{
    building_rule, floor_capacity, floor_rule, room_capacity, room_rule, ChildRule,
};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::ids::NodeId;
use crate::domain::kinds::{BuildingKind, FloorKind, NodeKind, RoomKind};

/// Allowed room width and length in millimetres.
pub const ROOM_SIDE_MM: RangeInclusive<u32> = 1000..=5000;

/// Allowed floor height in millimetres.
pub const FLOOR_HEIGHT_MM: RangeInclusive<u32> = 2000..=4000;

pub const DEFAULT_ROOM_WIDTH_MM: u32 = 2000;
pub const DEFAULT_ROOM_LENGTH_MM: u32 = 1000;
pub const DEFAULT_FLOOR_HEIGHT_MM: u32 = 2000;

const MM2_PER_M2: f64 = 1_000_000.0;

/// Anything that lives in a sibling collection.
pub trait Identified {
    fn id(&self) -> NodeId;
}

/// Human readable level name, used in messages and logs.
pub trait Level {
    const LEVEL: &'static str;
}

pub fn check_range(field: &'static str, value: u32, range: &RangeInclusive<u32>) -> DomainResult<u32> {
    if range.contains(&value) {
        Ok(value)
    } else {
        Err(DomainError::OutOfRange {
            field,
            value,
            min: *range.start(),
            max: *range.end(),
        })
    }
}

/// Mutable access to a child by 0-based index.
pub fn child_mut<T: Level>(items: &mut [T], index: usize) -> DomainResult<&mut T> {
    if items.is_empty() {
        return Err(DomainError::EmptyCollection { level: T::LEVEL });
    }
    let max = items.len() - 1;
    items
        .get_mut(index)
        .ok_or(DomainError::IndexOutOfBounds { index, max })
}

fn ensure_unique_id<T: Identified + Level>(items: &[T], id: NodeId) -> DomainResult<()> {
    if items.iter().any(|item| item.id() == id) {
        Err(DomainError::DuplicateId { level: T::LEVEL, id })
    } else {
        Ok(())
    }
}

fn ensure_capacity<T: Level>(items: &[T], capacity: usize) -> DomainResult<()> {
    if items.len() >= capacity {
        Err(DomainError::CapacityReached {
            level: T::LEVEL,
            capacity,
        })
    } else {
        Ok(())
    }
}

fn ensure_allowed<K: NodeKind>(level: &'static str, rule: &ChildRule<K>, kind: K) -> DomainResult<()> {
    if rule.allows(kind) {
        Ok(())
    } else if K::DEFINED.contains(&kind) && matches!(rule, ChildRule::Choice(_)) {
        Err(DomainError::KindTaken {
            level,
            kind: kind.to_string(),
        })
    } else {
        Err(DomainError::KindNotAllowed {
            level,
            kind: kind.to_string(),
            allowed: rule.describe(),
        })
    }
}

/// Kinds of all siblings except the one at `except`.
fn sibling_kinds<T, K>(items: &[T], except: Option<usize>, kind: impl Fn(&T) -> K) -> Vec<K> {
    items
        .iter()
        .enumerate()
        .filter(|(i, _)| Some(*i) != except)
        .map(|(_, item)| kind(item))
        .collect()
}

/// Leaf space with a type and dimensions.
#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    id: NodeId,
    kind: RoomKind,
    width_mm: u32,
    length_mm: u32,
}

impl Room {
    pub fn new(id: NodeId) -> Self {
        Self {
            id,
            kind: RoomKind::Undefined,
            width_mm: DEFAULT_ROOM_WIDTH_MM,
            length_mm: DEFAULT_ROOM_LENGTH_MM,
        }
    }

    /// New room with explicit starting dimensions (validated).
    pub fn with_dimensions(id: NodeId, width_mm: u32, length_mm: u32) -> DomainResult<Self> {
        let mut room = Self::new(id);
        room.set_width(width_mm)?;
        room.set_length(length_mm)?;
        Ok(room)
    }

    pub fn kind(&self) -> RoomKind {
        self.kind
    }

    pub fn width_mm(&self) -> u32 {
        self.width_mm
    }

    pub fn length_mm(&self) -> u32 {
        self.length_mm
    }

    pub fn set_kind(&mut self, kind: RoomKind, rule: &ChildRule<RoomKind>) -> DomainResult<()> {
        ensure_allowed(Self::LEVEL, rule, kind)?;
        self.kind = kind;
        Ok(())
    }

    pub fn set_width(&mut self, mm: u32) -> DomainResult<()> {
        self.width_mm = check_range("room width", mm, &ROOM_SIDE_MM)?;
        Ok(())
    }

    pub fn set_length(&mut self, mm: u32) -> DomainResult<()> {
        self.length_mm = check_range("room length", mm, &ROOM_SIDE_MM)?;
        Ok(())
    }

    /// Floor area in square metres.
    pub fn footprint_m2(&self) -> f64 {
        f64::from(self.length_mm) * f64::from(self.width_mm) / MM2_PER_M2
    }
}

impl Identified for Room {
    fn id(&self) -> NodeId {
        self.id
    }
}

impl Level for Room {
    const LEVEL: &'static str = "room";
}

/// One level of a building.
#[derive(Debug, Clone, PartialEq)]
pub struct Floor {
    id: NodeId,
    kind: FloorKind,
    height_mm: u32,
    rooms: Vec<Room>,
}

impl Floor {
    pub fn new(id: NodeId) -> Self {
        Self {
            id,
            kind: FloorKind::Undefined,
            height_mm: DEFAULT_FLOOR_HEIGHT_MM,
            rooms: Vec::new(),
        }
    }

    pub fn with_height(id: NodeId, height_mm: u32) -> DomainResult<Self> {
        let mut floor = Self::new(id);
        floor.set_height(height_mm)?;
        Ok(floor)
    }

    pub fn kind(&self) -> FloorKind {
        self.kind
    }

    pub fn height_mm(&self) -> u32 {
        self.height_mm
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn room_mut(&mut self, index: usize) -> DomainResult<&mut Room> {
        child_mut(&mut self.rooms, index)
    }

    pub fn room_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.rooms.iter().map(Room::id)
    }

    pub fn set_kind(&mut self, kind: FloorKind, rule: &ChildRule<FloorKind>) -> DomainResult<()> {
        ensure_allowed(Self::LEVEL, rule, kind)?;
        self.kind = kind;
        Ok(())
    }

    pub fn set_height(&mut self, mm: u32) -> DomainResult<()> {
        self.height_mm = check_range("floor height", mm, &FLOOR_HEIGHT_MM)?;
        Ok(())
    }

    /// Appends a room, enforcing the capacity and type rule of `building`.
    /// A room under a fixed rule takes the fixed type.
    pub fn add_room(&mut self, mut room: Room, building: BuildingKind) -> DomainResult<usize> {
        ensure_capacity(&self.rooms, room_capacity(building))?;
        ensure_unique_id(&self.rooms, room.id)?;
        let rule = room_rule(building);
        match rule.fixed() {
            Some(fixed) => room.kind = fixed,
            None => ensure_allowed(Room::LEVEL, &rule, room.kind)?,
        }
        self.rooms.push(room);
        Ok(self.rooms.len() - 1)
    }

    /// Sum of room footprints in square metres.
    pub fn area_m2(&self) -> f64 {
        self.rooms.iter().map(Room::footprint_m2).sum()
    }
}

impl Identified for Floor {
    fn id(&self) -> NodeId {
        self.id
    }
}

impl Level for Floor {
    const LEVEL: &'static str = "floor";
}

/// Structure within a sector.
#[derive(Debug, Clone, PartialEq)]
pub struct Building {
    id: NodeId,
    kind: BuildingKind,
    has_stove: bool,
    floors: Vec<Floor>,
}

impl Building {
    pub fn new(id: NodeId) -> Self {
        Self {
            id,
            kind: BuildingKind::Undefined,
            has_stove: false,
            floors: Vec::new(),
        }
    }

    pub fn kind(&self) -> BuildingKind {
        self.kind
    }

    /// Only meaningful for kinds that support a stove; always false otherwise.
    pub fn has_stove(&self) -> bool {
        self.has_stove
    }

    pub fn floors(&self) -> &[Floor] {
        &self.floors
    }

    pub fn floor_mut(&mut self, index: usize) -> DomainResult<&mut Floor> {
        child_mut(&mut self.floors, index)
    }

    pub fn floor_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.floors.iter().map(Floor::id)
    }

    pub fn floor_capacity(&self) -> usize {
        floor_capacity(self.kind)
    }

    pub fn room_capacity(&self) -> usize {
        room_capacity(self.kind)
    }

    /// Floor type rule for a new floor (`None`) or for the floor at `index`.
    pub fn floor_rule_for(&self, index: Option<usize>) -> ChildRule<FloorKind> {
        floor_rule(self.kind, &sibling_kinds(&self.floors, index, Floor::kind))
    }

    pub fn room_rule(&self) -> ChildRule<RoomKind> {
        room_rule(self.kind)
    }

    /// Changes the building type and re-conforms floors and rooms to it.
    ///
    /// A non-house building holds at most one floor typed `first` with at
    /// most one room typed `main`; the change is refused if the existing
    /// children cannot be brought into that shape.
    pub fn set_kind(&mut self, kind: BuildingKind, rule: &ChildRule<BuildingKind>) -> DomainResult<()> {
        ensure_allowed(Self::LEVEL, rule, kind)?;

        if !kind.is_house() {
            if self.floors.len() > floor_capacity(kind) {
                return Err(DomainError::KindConflict {
                    kind: kind.to_string(),
                    reason: format!("it can hold only one floor, {} exist", self.floors.len()),
                });
            }
            if let Some(floor) = self.floors.iter().find(|f| f.rooms.len() > room_capacity(kind)) {
                return Err(DomainError::KindConflict {
                    kind: kind.to_string(),
                    reason: format!(
                        "floor {} holds {} rooms, only one is allowed",
                        floor.id,
                        floor.rooms.len()
                    ),
                });
            }
        }

        self.kind = kind;
        if !kind.supports_stove() {
            self.has_stove = false;
        }

        let floor_fixed = floor_rule(kind, &[]).fixed();
        let room_fixed = room_rule(kind).fixed();
        for floor in &mut self.floors {
            if let Some(fixed) = floor_fixed {
                floor.kind = fixed;
            }
            if let Some(fixed) = room_fixed {
                for room in &mut floor.rooms {
                    room.kind = fixed;
                }
            }
        }
        Ok(())
    }

    /// Flips the stove flag, returning the new value.
    pub fn toggle_stove(&mut self) -> DomainResult<bool> {
        if !self.kind.supports_stove() {
            return Err(DomainError::StoveNotSupported(self.kind.to_string()));
        }
        self.has_stove = !self.has_stove;
        Ok(self.has_stove)
    }

    /// Appends a floor, enforcing capacity and sibling type uniqueness.
    /// A floor under a fixed rule takes the fixed type.
    pub fn add_floor(&mut self, mut floor: Floor) -> DomainResult<usize> {
        ensure_capacity(&self.floors, self.floor_capacity())?;
        ensure_unique_id(&self.floors, floor.id)?;
        ensure_capacity(&floor.rooms, self.room_capacity())?;

        let rule = self.floor_rule_for(None);
        match rule.fixed() {
            Some(fixed) => floor.kind = fixed,
            None => ensure_allowed(Floor::LEVEL, &rule, floor.kind)?,
        }
        if let Some(fixed) = self.room_rule().fixed() {
            for room in &mut floor.rooms {
                room.kind = fixed;
            }
        }
        self.floors.push(floor);
        Ok(self.floors.len() - 1)
    }

    /// Sum of floor areas in square metres.
    pub fn area_m2(&self) -> f64 {
        self.floors.iter().map(Floor::area_m2).sum()
    }
}

impl Identified for Building {
    fn id(&self) -> NodeId {
        self.id
    }
}

impl Level for Building {
    const LEVEL: &'static str = "building";
}

/// Untyped container of buildings.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Sector {
    id: NodeId,
    buildings: Vec<Building>,
}

impl Sector {
    pub fn new(id: NodeId) -> Self {
        Self {
            id,
            buildings: Vec::new(),
        }
    }

    pub fn buildings(&self) -> &[Building] {
        &self.buildings
    }

    pub fn building_mut(&mut self, index: usize) -> DomainResult<&mut Building> {
        child_mut(&mut self.buildings, index)
    }

    pub fn building_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.buildings.iter().map(Building::id)
    }

    /// Building type rule for a new building (`None`) or the one at `index`.
    pub fn building_rule_for(&self, index: Option<usize>) -> ChildRule<BuildingKind> {
        building_rule(&sibling_kinds(&self.buildings, index, Building::kind))
    }

    pub fn add_building(&mut self, building: Building) -> DomainResult<usize> {
        ensure_unique_id(&self.buildings, building.id)?;
        ensure_allowed(Building::LEVEL, &self.building_rule_for(None), building.kind)?;
        self.buildings.push(building);
        Ok(self.buildings.len() - 1)
    }
}

impl Identified for Sector {
    fn id(&self) -> NodeId {
        self.id
    }
}

impl Level for Sector {
    const LEVEL: &'static str = "sector";
}

/// Node counts across the whole area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AreaTotals {
    pub sectors: usize,
    pub buildings: usize,
    pub floors: usize,
    pub rooms: usize,
}

/// Root of the hierarchy.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Area {
    id: NodeId,
    sectors: Vec<Sector>,
}

impl Area {
    pub fn new(id: NodeId) -> Self {
        Self {
            id,
            sectors: Vec::new(),
        }
    }

    pub fn sectors(&self) -> &[Sector] {
        &self.sectors
    }

    pub fn sector_mut(&mut self, index: usize) -> DomainResult<&mut Sector> {
        child_mut(&mut self.sectors, index)
    }

    pub fn sector_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.sectors.iter().map(Sector::id)
    }

    pub fn add_sector(&mut self, sector: Sector) -> DomainResult<usize> {
        ensure_unique_id(&self.sectors, sector.id)?;
        self.sectors.push(sector);
        Ok(self.sectors.len() - 1)
    }

    pub fn totals(&self) -> AreaTotals {
        let buildings: Vec<&Building> = self.sectors.iter().flat_map(|s| &s.buildings).collect();
        let floors: Vec<&Floor> = buildings.iter().flat_map(|b| &b.floors).collect();
        AreaTotals {
            sectors: self.sectors.len(),
            buildings: buildings.len(),
            floors: floors.len(),
            rooms: floors.iter().map(|f| f.rooms.len()).sum(),
        }
    }
}

impl Identified for Area {
    fn id(&self) -> NodeId {
        self.id
    }
}

impl Level for Area {
    const LEVEL: &'static str = "area";
}
