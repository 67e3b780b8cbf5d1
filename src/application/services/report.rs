//! Read-only reports over the site hierarchy
//!
//! Two shapes: the nested listings shown by the `about` commands of the
//! editor loops, and a compact tree of the whole area.

use termtree::Tree;

use crate::domain::{Area, Building, Floor, Identified, Room, Sector};

fn field(depth: usize, label: &str, value: impl std::fmt::Display) -> String {
    format!("{} {:<18}: {}", "*".repeat(depth), label, value)
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

/// Square metres with two decimals.
pub fn format_m2(value: f64) -> String {
    format!("{:.2} m²", value)
}

pub fn describe_rooms(rooms: &[Room]) -> Vec<String> {
    if rooms.is_empty() {
        return vec!["Info: the floor has no rooms yet".to_string()];
    }

    let mut lines = vec!["Info: existing rooms:".to_string()];
    for room in rooms {
        lines.push(field(4, "room id", room.id()));
        lines.push(field(4, "type", room.kind()));
        lines.push(field(4, "width", room.width_mm()));
        lines.push(field(4, "length", room.length_mm()));
        lines.push(field(4, "footprint", format_m2(room.footprint_m2())));
    }
    lines
}

pub fn describe_floors(floors: &[Floor]) -> Vec<String> {
    if floors.is_empty() {
        return vec!["Info: the building has no floors yet".to_string()];
    }

    let mut lines = vec!["Info: existing floors:".to_string()];
    for floor in floors {
        lines.push(field(3, "floor id", floor.id()));
        lines.push(field(3, "type", floor.kind()));
        lines.push(field(3, "height", floor.height_mm()));
        lines.push(field(3, "room count", floor.rooms().len()));
        lines.push(field(3, "area", format_m2(floor.area_m2())));
        lines.extend(describe_rooms(floor.rooms()));
    }
    lines
}

pub fn describe_buildings(buildings: &[Building]) -> Vec<String> {
    if buildings.is_empty() {
        return vec!["Info: the sector has no buildings yet".to_string()];
    }

    let mut lines = vec!["Info: existing buildings:".to_string()];
    for building in buildings {
        lines.push(field(2, "building id", building.id()));
        lines.push(field(2, "type", building.kind()));
        if building.kind().supports_stove() {
            lines.push(field(2, "stove", yes_no(building.has_stove())));
        }
        lines.push(field(2, "floor count", building.floors().len()));
        lines.push(field(2, "area", format_m2(building.area_m2())));
        lines.extend(describe_floors(building.floors()));
    }
    lines
}

pub fn describe_sectors(sectors: &[Sector]) -> Vec<String> {
    if sectors.is_empty() {
        return vec!["Info: the area has no sectors yet".to_string()];
    }

    let mut lines = vec!["Info: existing sectors:".to_string()];
    for sector in sectors {
        lines.push(field(1, "sector id", sector.id()));
        lines.push(field(1, "building count", sector.buildings().len()));
        lines.extend(describe_buildings(sector.buildings()));
    }
    lines
}

pub fn room_label(room: &Room) -> String {
    format!(
        "room {}: {}, {}x{} mm, {}",
        room.id(),
        room.kind(),
        room.width_mm(),
        room.length_mm(),
        format_m2(room.footprint_m2())
    )
}

pub fn floor_label(floor: &Floor) -> String {
    format!(
        "floor {}: {}, height {} mm, {}",
        floor.id(),
        floor.kind(),
        floor.height_mm(),
        format_m2(floor.area_m2())
    )
}

pub fn building_label(building: &Building) -> String {
    let stove = if building.kind().supports_stove() {
        format!(", stove: {}", yes_no(building.has_stove()))
    } else {
        String::new()
    };
    format!(
        "building {}: {}{}, {}",
        building.id(),
        building.kind(),
        stove,
        format_m2(building.area_m2())
    )
}

/// Whole area as a tree, one node per entity.
pub fn render_area(area: &Area) -> Tree<String> {
    let sectors = area.sectors().iter().map(|sector| {
        let buildings = sector.buildings().iter().map(|building| {
            let floors = building.floors().iter().map(|floor| {
                let rooms = floor.rooms().iter().map(|room| Tree::new(room_label(room)));
                Tree::new(floor_label(floor)).with_leaves(rooms)
            });
            Tree::new(building_label(building)).with_leaves(floors)
        });
        Tree::new(format!("sector {}", sector.id())).with_leaves(buildings)
    });
    Tree::new(format!("area {}", area.id())).with_leaves(sectors)
}

/// One line with node counts.
pub fn summary(area: &Area) -> String {
    let totals = area.totals();
    format!(
        "sectors: {}, buildings: {}, floors: {}, rooms: {}",
        totals.sectors, totals.buildings, totals.floors, totals.rooms
    )
}
