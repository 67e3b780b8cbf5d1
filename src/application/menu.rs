//! Menu commands of the editor loops

use std::fmt;

/// Commands of a child-collection loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    Add,
    Edit,
    About,
    Exit,
}

impl MenuCommand {
    pub fn name(&self) -> &'static str {
        match self {
            MenuCommand::Add => "add",
            MenuCommand::Edit => "edit",
            MenuCommand::About => "about",
            MenuCommand::Exit => "exit",
        }
    }
}

impl fmt::Display for MenuCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Commands offered for a collection holding `len` children.
///
/// `add` is offered only while `len < capacity`; `None` means unbounded.
pub fn offered_commands(len: usize, capacity: Option<usize>) -> Vec<MenuCommand> {
    let mut commands = Vec::with_capacity(4);
    if capacity.map_or(true, |cap| len < cap) {
        commands.push(MenuCommand::Add);
    }
    commands.extend([MenuCommand::Edit, MenuCommand::About, MenuCommand::Exit]);
    commands
}

/// Commands of the top-level area menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopCommand {
    Edit,
    About,
    Exit,
}

impl TopCommand {
    pub const ALL: [TopCommand; 3] = [TopCommand::Edit, TopCommand::About, TopCommand::Exit];

    pub fn name(&self) -> &'static str {
        match self {
            TopCommand::Edit => "edit",
            TopCommand::About => "about",
            TopCommand::Exit => "exit",
        }
    }
}

impl fmt::Display for TopCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
