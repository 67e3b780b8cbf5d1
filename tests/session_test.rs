//! Tests for the interactive editor session, driven by scripted console input

use std::collections::VecDeque;
use std::io;

use sitetree::application::services::session::ChildCollection;
use sitetree::application::services::{EditorSession, NodeDefaults};
use sitetree::application::{ApplicationError, ApplicationResult, Prompter};
use sitetree::config::Settings;
use sitetree::domain::{Area, BuildingKind, DomainError, FloorKind, Identified, RoomKind};
use sitetree::infrastructure::di::ServiceContainer;
use sitetree::infrastructure::traits::Console;
use sitetree::util::testing;

/// Console replaying predetermined input lines and recording all output.
struct ScriptedConsole {
    input: VecDeque<String>,
    output: Vec<String>,
}

impl ScriptedConsole {
    fn new(lines: &[&str]) -> Self {
        Self {
            input: lines.iter().map(|l| format!("{l}\n")).collect(),
            output: Vec::new(),
        }
    }
}

impl Console for ScriptedConsole {
    fn read_line(&mut self, _prompt: &str) -> io::Result<Option<String>> {
        Ok(self.input.pop_front())
    }

    fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.output.push(line.to_string());
        Ok(())
    }
}

/// Run a full session over `lines`; returns the result, the transcript and
/// the number of unread input lines.
fn run_script(lines: &[&str]) -> (ApplicationResult<Area>, Vec<String>, usize) {
    testing::init_test_setup();
    let mut console = ScriptedConsole::new(lines);
    let result = {
        let container = ServiceContainer::new(Settings::default());
        container
            .session_with(&mut console)
            .and_then(|mut session| session.run(0))
    };
    let left = console.input.len();
    (result, console.output, left)
}

fn has_line(output: &[String], expected: &str) -> bool {
    output.iter().any(|line| line == expected)
}

fn count_lines(output: &[String], expected: &str) -> usize {
    output.iter().filter(|line| *line == expected).count()
}

#[test]
fn given_garage_when_adding_floor_and_room_then_types_assigned_without_prompt() {
    let script = [
        "yes",    // add a sector
        "yes",    // change building list
        "yes",    // change building type
        "garage", // building type
        "yes",    // change floors
        "no",     // floor height
        "yes",    // change rooms
        "no",     // room width
        "no",     // room length
        "add",    // not offered: rejected
        "exit",   // rooms
        "exit",   // floors
        "exit",   // buildings
        "exit",   // sectors
        "exit",   // top menu
    ];

    let (result, output, left) = run_script(&script);

    let area = result.expect("session finished");
    assert_eq!(left, 0);
    let building = &area.sectors()[0].buildings()[0];
    assert_eq!(building.id(), 0);
    assert_eq!(building.kind(), BuildingKind::Garage);
    assert_eq!(building.floors().len(), 1);
    assert_eq!(building.floors()[0].kind(), FloorKind::First);
    assert_eq!(building.floors()[0].rooms().len(), 1);
    assert_eq!(building.floors()[0].rooms()[0].kind(), RoomKind::Main);

    assert!(has_line(&output, "The floor type is set to first automatically"));
    assert!(has_line(&output, "The room type is set to main automatically"));
    assert!(!output.iter().any(|l| l.starts_with("Current floor type")));
    assert!(!output.iter().any(|l| l.starts_with("Current room type")));
    // rooms (twice), floors and the top menu; add is never offered once the single slot is used
    assert_eq!(count_lines(&output, "Choose one of: edit|about|exit"), 4);
    assert!(has_line(&output, "Invalid choice. Try again!"));
    // no stove question for a garage
    assert!(!output.iter().any(|l| l.contains("stove")));
}

#[test]
fn given_house_when_adding_floors_then_types_withheld_and_fourth_add_not_offered() {
    let script = [
        "yes", "yes", "yes", "house", // sector, buildings, building type
        "yes", // change floors: first floor added automatically
        "yes", "first", "no", "no", // floor 0: type, height, rooms
        "add", "yes", "second", "no", "no", // floor 1
        "add", "yes", "third", "no", "no", // floor 2
        "add",  // not offered anymore
        "exit", // floors
        "yes",  // stove
        "exit", "exit", "exit",
    ];

    let (result, output, left) = run_script(&script);

    let area = result.expect("session finished");
    assert_eq!(left, 0);
    let building = &area.sectors()[0].buildings()[0];
    let kinds: Vec<FloorKind> = building.floors().iter().map(|f| f.kind()).collect();
    assert_eq!(kinds, vec![FloorKind::First, FloorKind::Second, FloorKind::Third]);
    let ids: Vec<u32> = building.floors().iter().map(|f| f.id()).collect();
    assert_eq!(ids, vec![0, 1, 2]);
    assert!(building.has_stove());

    assert!(has_line(&output, "Choose one of: first|second|third|undefined"));
    assert!(has_line(&output, "Choose one of: second|third|undefined"));
    assert!(has_line(&output, "Choose one of: third|undefined"));
    assert!(has_line(&output, "Choose one of: add|edit|about|exit"));
    assert!(has_line(&output, "Stove added"));
}

#[test]
fn given_house_floor_when_editing_room_by_index_then_invalid_input_is_reprompted() {
    let script = [
        "yes", "yes", "yes", "house", "yes", // up to the first floor
        "no",   // floor type
        "yes",  // floor height
        "1500", // below range
        "2500",
        "yes", // change rooms: room 0 added automatically
        "yes", "kitchen", "no", "no", // room 0
        "add", "yes", "kitchen", "no", "no", // room 1, same type allowed
        "edit", "5", "1", // index 5 rejected
        "no",  // room 1 type
        "yes", "abc", "9000", "3000", // room 1 width
        "no", // room 1 length
        "exit", "exit", // rooms, floors
        "no", // stove
        "exit", "exit", "exit",
    ];

    let (result, output, left) = run_script(&script);

    let area = result.expect("session finished");
    assert_eq!(left, 0);
    let floor = &area.sectors()[0].buildings()[0].floors()[0];
    assert_eq!(floor.kind(), FloorKind::Undefined);
    assert_eq!(floor.height_mm(), 2500);
    assert_eq!(floor.rooms().len(), 2);
    assert!(floor.rooms().iter().all(|r| r.kind() == RoomKind::Kitchen));
    let room = &floor.rooms()[1];
    assert_eq!(room.width_mm(), 3000);
    assert_eq!(room.length_mm(), 1000);
    assert_eq!(room.footprint_m2(), 3.0);

    assert!(has_line(&output, "  and within (2000 - 4000)"));
    assert!(has_line(&output, "  and within (1000 - 5000)"));
    assert!(has_line(&output, "  and within (0 - 1)"));
    assert!(has_line(&output, "Invalid number. Try again!"));
    assert!(has_line(&output, "Enter the room index from 0 to 1"));
    // room types of a house floor are never narrowed by siblings
    assert_eq!(
        count_lines(
            &output,
            "Choose one of: bedroom|kitchen|bathroom|restroom|playroom|living|main"
        ),
        2
    );
}

#[test]
fn given_sector_with_garage_when_adding_second_building_then_garage_withheld() {
    let script = [
        "yes", "yes", "yes", "garage", "no", // building 0, no floors
        "add", "yes", "house", "no", "no", // building 1: type, floors, stove
        "exit", "exit", "exit",
    ];

    let (result, output, left) = run_script(&script);

    let area = result.expect("session finished");
    assert_eq!(left, 0);
    let kinds: Vec<BuildingKind> = area.sectors()[0]
        .buildings()
        .iter()
        .map(|b| b.kind())
        .collect();
    assert_eq!(kinds, vec![BuildingKind::Garage, BuildingKind::House]);
    assert!(has_line(
        &output,
        "Choose one of: house|garage|shed|bathHouse|undefined"
    ));
    assert!(has_line(&output, "Choose one of: house|shed|bathHouse|undefined"));
}

#[test]
fn given_two_sectors_when_editing_then_index_selects_sector() {
    let script = [
        "yes", "no", // sector 0 without buildings
        "add", "no", // sector 1 without buildings
        "edit", "1", "yes", "yes", "shed", "no", // sector 1 gets a shed
        "exit", // buildings of sector 1
        "exit", // sectors
        "exit",
    ];

    let (result, output, left) = run_script(&script);

    let area = result.expect("session finished");
    assert_eq!(left, 0);
    assert_eq!(area.sectors().len(), 2);
    assert!(area.sectors()[0].buildings().is_empty());
    assert_eq!(area.sectors()[1].id(), 1);
    assert_eq!(area.sectors()[1].buildings()[0].kind(), BuildingKind::Shed);
    assert!(has_line(&output, "Enter the sector index from 0 to 1"));
}

#[test]
fn given_empty_area_when_asking_about_then_reports_nothing_yet() {
    let script = ["no", "about", "exit"];

    let (result, output, left) = run_script(&script);

    assert!(result.is_ok());
    assert_eq!(left, 0);
    assert!(has_line(&output, "Info: the area has no sectors yet"));
    assert!(has_line(&output, "area 0"));
    assert!(has_line(&output, "sectors: 0, buildings: 0, floors: 0, rooms: 0"));
    assert!(has_line(&output, "The program has finished. See you next time"));
}

#[test]
fn given_blank_and_unknown_input_when_choosing_then_reprompts() {
    let script = ["   ", "maybe", "no", "exit"];

    let (result, output, _) = run_script(&script);

    assert!(result.is_ok());
    assert!(has_line(&output, "Input cannot be empty. Try again!"));
    assert!(has_line(&output, "Invalid choice. Try again!"));
}

#[test]
fn given_top_menu_edit_when_area_has_sectors_then_asks_to_change_list() {
    let script = ["yes", "no", "exit", "edit", "no", "exit"];

    let (result, output, left) = run_script(&script);

    assert!(result.is_ok());
    assert_eq!(left, 0);
    assert!(has_line(&output, "Add a sector?"));
    assert!(has_line(&output, "Change the sector list of the area?"));
}

#[test]
fn given_input_ends_early_when_running_then_input_closed() {
    let (result, _, _) = run_script(&["yes"]);

    assert!(matches!(result, Err(ApplicationError::InputClosed)));
}

/// Parent whose every add is refused by a domain rule.
struct RefusingParent {
    attempts: usize,
}

impl<C: Console> ChildCollection<C> for RefusingParent {
    const CHILD: &'static str = "item";
    const PATH: &'static str = "TEST";

    fn len(&self) -> usize {
        0
    }

    fn capacity(&self) -> Option<usize> {
        None
    }

    fn add(&mut self, _session: &mut EditorSession<C>) -> ApplicationResult<()> {
        self.attempts += 1;
        Err(DomainError::CapacityReached {
            level: "item",
            capacity: 0,
        }
        .into())
    }

    fn edit(&mut self, _session: &mut EditorSession<C>, _index: usize) -> ApplicationResult<()> {
        Ok(())
    }

    fn describe(&self) -> Vec<String> {
        Vec::new()
    }
}

fn refusing_run(lines: &[&str]) -> (ApplicationResult<()>, usize, Vec<String>, usize) {
    testing::init_test_setup();
    let mut console = ScriptedConsole::new(lines);
    let mut parent = RefusingParent { attempts: 0 };
    let result = EditorSession::new(Prompter::new(&mut console, "---"), NodeDefaults::default())
        .map_err(ApplicationError::from)
        .and_then(|mut session| session.manage_children(&mut parent));
    let left = console.input.len();
    (result, parent.attempts, console.output, left)
}

fn rejections(output: &[String]) -> usize {
    output
        .iter()
        .filter(|line| line.starts_with("Not changed: "))
        .count()
}

#[test]
fn given_empty_list_when_auto_add_rejected_then_falls_back_to_command_menu() {
    let (result, attempts, output, left) = refusing_run(&["exit"]);

    assert!(result.is_ok());
    assert_eq!(attempts, 1);
    assert_eq!(left, 0);
    assert_eq!(rejections(&output), 1);
    assert!(has_line(&output, "Choose one of: add|edit|about|exit"));
    assert!(has_line(&output, "Leaving item editing"));
}

#[test]
fn given_rejected_add_when_user_retries_add_then_asks_again_after_each_rejection() {
    let (result, attempts, output, left) = refusing_run(&["add", "add", "exit"]);

    assert!(result.is_ok());
    assert_eq!(attempts, 3);
    assert_eq!(left, 0);
    assert_eq!(rejections(&output), 3);
    assert_eq!(count_lines(&output, "Choose one of: add|edit|about|exit"), 3);
}

#[test]
fn given_floor_height_out_of_range_when_creating_session_then_rejected() {
    let mut console = ScriptedConsole::new(&[]);
    let defaults = NodeDefaults {
        floor_height_mm: 100,
        ..NodeDefaults::default()
    };

    let result = EditorSession::new(Prompter::new(&mut console, "---"), defaults);

    assert!(matches!(
        result,
        Err(DomainError::OutOfRange {
            field: "floor height",
            value: 100,
            ..
        })
    ));
}

#[test]
fn given_settings_with_invalid_room_width_when_container_builds_session_then_domain_error() {
    let mut settings = Settings::default();
    settings.defaults.room_width_mm = 9000;
    let container = ServiceContainer::new(settings);
    let mut console = ScriptedConsole::new(&["yes"]);

    let rejected = matches!(
        container.session_with(&mut console),
        Err(ApplicationError::Domain(DomainError::OutOfRange { .. }))
    );

    assert!(rejected);
    assert_eq!(console.input.len(), 1);
}
