//! Service container for dependency injection
//!
//! Wires the editor session with settings and a console.

use std::sync::Arc;

use crate::application::services::EditorSession;
use crate::application::{ApplicationResult, Prompter};
use crate::config::Settings;
use crate::infrastructure::traits::{Console, StdConsole};

/// Container holding settings and building application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,
}

impl ServiceContainer {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings: Arc::new(settings),
        }
    }

    /// Editor session on an arbitrary console (scripted input in tests).
    pub fn session_with<C: Console>(&self, console: C) -> ApplicationResult<EditorSession<C>> {
        let prompter = Prompter::new(console, self.settings.ui.separator.clone());
        Ok(EditorSession::new(prompter, self.settings.node_defaults())?)
    }

    /// Editor session on stdin/stdout.
    pub fn session(
        &self,
    ) -> ApplicationResult<EditorSession<StdConsole<std::io::StdinLock<'static>, std::io::Stdout>>> {
        self.session_with(StdConsole::stdio())
    }
}
