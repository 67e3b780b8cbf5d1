//! Interactive editing session
//!
//! Walks the site hierarchy through nested menu loops. Every level with
//! children uses the same add/edit/about/exit loop ([`EditorSession::manage_children`]),
//! parameterised by a [`ChildCollection`] implementation per parent type.
//! Field editors offer each value behind a yes/no gate; types pinned by the
//! parent are assigned automatically instead of asked for.

use tracing::{debug, info, instrument, warn};

use crate::application::menu::{offered_commands, MenuCommand, TopCommand};
use crate::application::prompt::Prompter;
use crate::application::services::report;
use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{
    allocate_id, check_range, Area, Building, BuildingKind, ChildRule, DomainResult, Floor,
    FloorKind, Identified, NodeId, NodeKind, Room, RoomKind, Sector, FLOOR_HEIGHT_MM,
    ROOM_SIDE_MM,
};
use crate::infrastructure::traits::Console;

/// Starting values for newly created nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeDefaults {
    pub room_width_mm: u32,
    pub room_length_mm: u32,
    pub floor_height_mm: u32,
}

impl Default for NodeDefaults {
    fn default() -> Self {
        Self {
            room_width_mm: crate::domain::DEFAULT_ROOM_WIDTH_MM,
            room_length_mm: crate::domain::DEFAULT_ROOM_LENGTH_MM,
            floor_height_mm: crate::domain::DEFAULT_FLOOR_HEIGHT_MM,
        }
    }
}

impl NodeDefaults {
    /// Checks every default against its domain range.
    pub fn validate(&self) -> DomainResult<()> {
        check_range("room width", self.room_width_mm, &ROOM_SIDE_MM)?;
        check_range("room length", self.room_length_mm, &ROOM_SIDE_MM)?;
        check_range("floor height", self.floor_height_mm, &FLOOR_HEIGHT_MM)?;
        Ok(())
    }
}

/// A parent node whose children are managed by the add/edit/about/exit loop.
pub trait ChildCollection<C: Console> {
    /// Child level name, e.g. "room".
    const CHILD: &'static str;
    /// Breadcrumb of the loop header.
    const PATH: &'static str;

    fn len(&self) -> usize;

    /// Maximum number of children; `None` if unbounded.
    fn capacity(&self) -> Option<usize>;

    /// Create a child with a fresh id, let the user fill it in, append it.
    fn add(&mut self, session: &mut EditorSession<C>) -> ApplicationResult<()>;

    /// Edit the child at `index`.
    fn edit(&mut self, session: &mut EditorSession<C>, index: usize) -> ApplicationResult<()>;

    /// Read-only listing of the children.
    fn describe(&self) -> Vec<String>;
}

/// Editor over a single [`Area`].
pub struct EditorSession<C> {
    prompter: Prompter<C>,
    defaults: NodeDefaults,
}

impl<C: Console> EditorSession<C> {
    /// Fails if a default lies outside its domain range.
    pub fn new(prompter: Prompter<C>, defaults: NodeDefaults) -> DomainResult<Self> {
        defaults.validate()?;
        Ok(Self { prompter, defaults })
    }

    /// Create the area, let the user fill it in, then run the top menu
    /// until `exit`. Returns the final tree.
    #[instrument(level = "debug", skip(self))]
    pub fn run(&mut self, area_id: NodeId) -> ApplicationResult<Area> {
        self.prompter.separator()?;
        self.prompter.say("START -> One AREA created")?;
        let mut area = Area::new(area_id);
        info!("area {} created", area_id);
        self.edit_area(&mut area)?;

        loop {
            self.prompter.separator()?;
            self.prompter.say("COMMON MENU -> operations with area:")?;
            self.prompter.say("Enter a command to continue or to finish the program")?;
            let names = TopCommand::ALL.map(|c| c.name());
            let command = TopCommand::ALL[self.prompter.choose(&names)?];
            debug!("top command: {}", command);

            match command {
                TopCommand::Edit => self.edit_area(&mut area)?,
                TopCommand::About => self.show_area(&area)?,
                TopCommand::Exit => {
                    self.prompter.say("The program has finished. See you next time")?;
                    break;
                }
            }
        }
        Ok(area)
    }

    /// Print the area tree followed by the node counts.
    pub fn show_area(&mut self, area: &Area) -> ApplicationResult<()> {
        self.prompter.say_all(report::describe_sectors(area.sectors()))?;
        self.prompter.say(report::render_area(area).to_string().trim_end())?;
        self.prompter.say(report::summary(area))
    }

    pub fn edit_area(&mut self, area: &mut Area) -> ApplicationResult<()> {
        self.prompter.say_all(report::describe_sectors(area.sectors()))?;
        let question = if area.sectors().is_empty() {
            "Add a sector?"
        } else {
            "Change the sector list of the area?"
        };
        if self.prompter.confirm(question)? {
            self.manage_children(area)?;
        }
        Ok(())
    }

    pub fn edit_sector(&mut self, sector: &mut Sector) -> ApplicationResult<()> {
        self.prompter.say_all(report::describe_buildings(sector.buildings()))?;
        if self.prompter.confirm("Change the building list of the sector?")? {
            self.manage_children(sector)?;
        }
        Ok(())
    }

    pub fn edit_building(
        &mut self,
        building: &mut Building,
        rule: &ChildRule<BuildingKind>,
    ) -> ApplicationResult<()> {
        self.prompter.separator()?;
        self.prompter.say("AREA -> SECTOR -> BUILDING -> edit building.type:")?;
        if let Some(kind) = self.ask_kind("building", building.kind(), rule)? {
            let result = building.set_kind(kind, rule);
            if self.recover(result)?.is_some() {
                debug!("building {} type set to {}", building.id(), kind);
            }
        }

        self.prompter.say_all(report::describe_floors(building.floors()))?;
        if self.prompter.confirm("Change the floors of the building?")? {
            self.manage_children(building)?;
        }

        if building.kind().supports_stove() {
            self.prompter.separator()?;
            self.prompter.say("AREA -> SECTOR -> BUILDING -> edit building.hasStove:")?;
            let question = if building.has_stove() {
                "The building has a stove. Change?"
            } else {
                "The building has no stove. Change?"
            };
            if self.prompter.confirm(question)? {
                let result = building.toggle_stove();
                if let Some(has_stove) = self.recover(result)? {
                    debug!("building {} stove: {}", building.id(), has_stove);
                    self.prompter.say(if has_stove {
                        "Stove added"
                    } else {
                        "Stove removed"
                    })?;
                }
            }
        }
        Ok(())
    }

    pub fn edit_floor(
        &mut self,
        floor: &mut Floor,
        rule: &ChildRule<FloorKind>,
        building: BuildingKind,
    ) -> ApplicationResult<()> {
        self.prompter.separator()?;
        self.prompter.say("AREA -> SECTOR -> BUILDING -> FLOOR -> edit floor.type:")?;
        if let Some(kind) = self.ask_kind("floor", floor.kind(), rule)? {
            let result = floor.set_kind(kind, rule);
            if self.recover(result)?.is_some() {
                debug!("floor {} type set to {}", floor.id(), kind);
            }
        }

        self.prompter.separator()?;
        self.prompter.say("AREA -> SECTOR -> BUILDING -> FLOOR -> edit floor.height:")?;
        let question = format!("Current floor height: {}. Change?", floor.height_mm());
        if self.prompter.confirm(question)? {
            let height = self.prompter.millimetres(&FLOOR_HEIGHT_MM)?;
            let result = floor.set_height(height);
            self.recover(result)?;
        }

        self.prompter.say_all(report::describe_rooms(floor.rooms()))?;
        if self.prompter.confirm("Change the rooms on the floor?")? {
            self.manage_children(&mut FloorRooms { floor, building })?;
        }
        Ok(())
    }

    pub fn edit_room(&mut self, room: &mut Room, rule: &ChildRule<RoomKind>) -> ApplicationResult<()> {
        self.prompter.separator()?;
        self.prompter.say("AREA -> SECTOR -> BUILDING -> FLOOR -> ROOM -> edit room.type:")?;
        if let Some(kind) = self.ask_kind("room", room.kind(), rule)? {
            let result = room.set_kind(kind, rule);
            if self.recover(result)?.is_some() {
                debug!("room {} type set to {}", room.id(), kind);
            }
        }

        self.prompter.separator()?;
        self.prompter.say("AREA -> SECTOR -> BUILDING -> FLOOR -> ROOM -> edit room.width:")?;
        let question = format!("Current room width: {}. Change?", room.width_mm());
        if self.prompter.confirm(question)? {
            let width = self.prompter.millimetres(&ROOM_SIDE_MM)?;
            let result = room.set_width(width);
            self.recover(result)?;
        }

        self.prompter.separator()?;
        self.prompter.say("AREA -> SECTOR -> BUILDING -> FLOOR -> ROOM -> edit room.length:")?;
        let question = format!("Current room length: {}. Change?", room.length_mm());
        if self.prompter.confirm(question)? {
            let length = self.prompter.millimetres(&ROOM_SIDE_MM)?;
            let result = room.set_length(length);
            self.recover(result)?;
        }

        self.prompter.say("Room editing finished")
    }

    /// Decide the new type of a node, if any.
    ///
    /// Under a fixed rule the fixed type is returned without asking, and only
    /// when the current value differs. Otherwise the user may pick from the
    /// rule's options behind a yes/no gate.
    fn ask_kind<K: NodeKind>(
        &mut self,
        level: &str,
        current: K,
        rule: &ChildRule<K>,
    ) -> ApplicationResult<Option<K>> {
        if let Some(fixed) = rule.fixed() {
            if current == fixed {
                return Ok(None);
            }
            self.prompter
                .say(format!("The {} type is set to {} automatically", level, fixed))?;
            return Ok(Some(fixed));
        }

        let question = format!("Current {} type: {}. Change?", level, current);
        if !self.prompter.confirm(question)? {
            return Ok(None);
        }
        self.prompter.say(format!("Available {} types:", level))?;
        Ok(Some(self.prompter.choose_kind(&rule.options())?))
    }

    /// Report a rule violation to the user instead of failing.
    fn recover<T>(&mut self, result: DomainResult<T>) -> ApplicationResult<Option<T>> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                warn!("rejected: {}", e);
                self.prompter.say(format!("Not changed: {}", e))?;
                Ok(None)
            }
        }
    }

    /// The add/edit/about/exit loop shared by every level.
    ///
    /// `add` is offered only below capacity, re-evaluated on each pass. An
    /// empty collection goes straight to `add`, unless the previous add was
    /// rejected. With a single child `edit` picks it without asking for an index.
    pub fn manage_children<P: ChildCollection<C>>(&mut self, parent: &mut P) -> ApplicationResult<()> {
        let mut add_rejected = false;
        loop {
            self.prompter.separator()?;
            self.prompter
                .say(format!("{} -> operations with {}s:", P::PATH, P::CHILD))?;

            let commands = offered_commands(parent.len(), parent.capacity());
            let command = if parent.len() == 0
                && !add_rejected
                && commands.contains(&MenuCommand::Add)
            {
                MenuCommand::Add
            } else {
                let names: Vec<&str> = commands.iter().map(|c| c.name()).collect();
                commands[self.prompter.choose(&names)?]
            };
            debug!("{} command: {}", P::CHILD, command);

            match command {
                MenuCommand::Add => {
                    add_rejected = false;
                    match parent.add(self) {
                        Err(ApplicationError::Domain(e)) => {
                            add_rejected = true;
                            self.recover::<()>(Err(e))?;
                        }
                        other => other?,
                    }
                }
                MenuCommand::Edit => {
                    let len = parent.len();
                    if len == 0 {
                        self.prompter.say("Nothing to edit yet: the list is empty")?;
                        continue;
                    }
                    let index = if len > 1 {
                        self.prompter.index(len, P::CHILD)?
                    } else {
                        0
                    };
                    match parent.edit(self, index) {
                        Err(ApplicationError::Domain(e)) => {
                            self.recover::<()>(Err(e))?;
                        }
                        other => other?,
                    }
                }
                MenuCommand::About => {
                    let lines = parent.describe();
                    self.prompter.say_all(lines)?;
                }
                MenuCommand::Exit => {
                    self.prompter.say(format!("Leaving {} editing", P::CHILD))?;
                    return Ok(());
                }
            }
        }
    }

    fn announce<P: ChildCollection<C>>(&mut self, id: NodeId) -> ApplicationResult<()> {
        info!("{} {} created", P::CHILD, id);
        self.prompter.separator()?;
        self.prompter
            .say(format!("{} -> One {} created", P::PATH, P::CHILD.to_uppercase()))
    }
}

impl<C: Console> ChildCollection<C> for Area {
    const CHILD: &'static str = "sector";
    const PATH: &'static str = "AREA";

    fn len(&self) -> usize {
        self.sectors().len()
    }

    fn capacity(&self) -> Option<usize> {
        None
    }

    fn add(&mut self, session: &mut EditorSession<C>) -> ApplicationResult<()> {
        let id = allocate_id(self.sector_ids());
        session.announce::<Self>(id)?;
        let mut sector = Sector::new(id);
        session.edit_sector(&mut sector)?;
        self.add_sector(sector)?;
        Ok(())
    }

    fn edit(&mut self, session: &mut EditorSession<C>, index: usize) -> ApplicationResult<()> {
        session.edit_sector(self.sector_mut(index)?)
    }

    fn describe(&self) -> Vec<String> {
        report::describe_sectors(self.sectors())
    }
}

impl<C: Console> ChildCollection<C> for Sector {
    const CHILD: &'static str = "building";
    const PATH: &'static str = "AREA -> SECTOR";

    fn len(&self) -> usize {
        self.buildings().len()
    }

    fn capacity(&self) -> Option<usize> {
        None
    }

    fn add(&mut self, session: &mut EditorSession<C>) -> ApplicationResult<()> {
        let id = allocate_id(self.building_ids());
        session.announce::<Self>(id)?;
        let rule = self.building_rule_for(None);
        let mut building = Building::new(id);
        session.edit_building(&mut building, &rule)?;
        self.add_building(building)?;
        Ok(())
    }

    fn edit(&mut self, session: &mut EditorSession<C>, index: usize) -> ApplicationResult<()> {
        let rule = self.building_rule_for(Some(index));
        session.edit_building(self.building_mut(index)?, &rule)
    }

    fn describe(&self) -> Vec<String> {
        report::describe_buildings(self.buildings())
    }
}

impl<C: Console> ChildCollection<C> for Building {
    const CHILD: &'static str = "floor";
    const PATH: &'static str = "AREA -> SECTOR -> BUILDING";

    fn len(&self) -> usize {
        self.floors().len()
    }

    fn capacity(&self) -> Option<usize> {
        Some(self.floor_capacity())
    }

    fn add(&mut self, session: &mut EditorSession<C>) -> ApplicationResult<()> {
        let id = allocate_id(self.floor_ids());
        session.announce::<Self>(id)?;
        let rule = self.floor_rule_for(None);
        let mut floor = Floor::with_height(id, session.defaults.floor_height_mm)?;
        session.edit_floor(&mut floor, &rule, self.kind())?;
        self.add_floor(floor)?;
        Ok(())
    }

    fn edit(&mut self, session: &mut EditorSession<C>, index: usize) -> ApplicationResult<()> {
        let rule = self.floor_rule_for(Some(index));
        let kind = self.kind();
        session.edit_floor(self.floor_mut(index)?, &rule, kind)
    }

    fn describe(&self) -> Vec<String> {
        report::describe_floors(self.floors())
    }
}

/// Rooms of a floor together with the type of the building holding it.
pub struct FloorRooms<'a> {
    pub floor: &'a mut Floor,
    pub building: BuildingKind,
}

impl<C: Console> ChildCollection<C> for FloorRooms<'_> {
    const CHILD: &'static str = "room";
    const PATH: &'static str = "AREA -> SECTOR -> BUILDING -> FLOOR";

    fn len(&self) -> usize {
        self.floor.rooms().len()
    }

    fn capacity(&self) -> Option<usize> {
        Some(crate::domain::availability::room_capacity(self.building))
    }

    fn add(&mut self, session: &mut EditorSession<C>) -> ApplicationResult<()> {
        let id = allocate_id(self.floor.room_ids());
        session.announce::<Self>(id)?;
        let rule = crate::domain::availability::room_rule(self.building);
        let mut room = Room::with_dimensions(
            id,
            session.defaults.room_width_mm,
            session.defaults.room_length_mm,
        )?;
        session.edit_room(&mut room, &rule)?;
        self.floor.add_room(room, self.building)?;
        Ok(())
    }

    fn edit(&mut self, session: &mut EditorSession<C>, index: usize) -> ApplicationResult<()> {
        let rule = crate::domain::availability::room_rule(self.building);
        session.edit_room(self.floor.room_mut(index)?, &rule)
    }

    fn describe(&self) -> Vec<String> {
        report::describe_rooms(self.floor.rooms())
    }
}
