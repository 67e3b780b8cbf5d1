//! Command dispatch

use std::io;
use std::path::Path;

use clap::CommandFactory;
use tracing::{debug, info, instrument};

use crate::application::services::report;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{config_template, global_config_path, Settings};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        None | Some(Commands::Edit) => cmd_edit(cli.config.as_deref()),
        Some(Commands::Config { command }) => cmd_config(cli.config.as_deref(), command),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
    }
}

fn load_settings(config: Option<&Path>) -> CliResult<Settings> {
    let settings = Settings::load(config)?;
    if !settings.ui.color {
        colored::control::set_override(false);
    }
    Ok(settings)
}

#[instrument]
fn cmd_edit(config: Option<&Path>) -> CliResult<()> {
    let settings = load_settings(config)?;
    debug!("settings: {:?}", settings);
    let area_id = settings.area_id;

    let container = ServiceContainer::new(settings);
    let mut session = container.session()?;
    let area = session.run(area_id)?;

    info!("session finished: {}", report::summary(&area));
    Ok(())
}

#[instrument]
fn cmd_config(config: Option<&Path>, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = load_settings(config)?;
            output::header("Merged configuration");
            output::info(&settings.to_toml()?);
            Ok(())
        }
        ConfigCommands::Path => {
            match global_config_path() {
                Some(path) => {
                    let state = if path.exists() { "exists" } else { "not found" };
                    output::action("global", &format!("{} ({})", path.display(), state));
                }
                None => output::warning("no home directory: global config disabled"),
            }
            if let Some(path) = config {
                let state = if path.exists() { "exists" } else { "not found" };
                output::action("explicit", &format!("{} ({})", path.display(), state));
            }
            Ok(())
        }
        ConfigCommands::Init { path, force } => {
            let target = match path.clone().or_else(global_config_path) {
                Some(target) => target,
                None => {
                    return Err(CliError::Usage(
                        "cannot determine global config path, pass a target file".into(),
                    ))
                }
            };
            if target.exists() && !force {
                return Err(CliError::Usage(format!(
                    "config already exists: {} (use --force to overwrite)",
                    target.display()
                )));
            }
            if let Some(parent) = target.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent).map_err(|e| {
                        InfraError::io(format!("create {}", parent.display()), e)
                    })?;
                }
            }
            std::fs::write(&target, config_template())
                .map_err(|e| InfraError::io(format!("write {}", target.display()), e))?;
            output::success(&format!("config written: {}", target.display()));
            Ok(())
        }
    }
}
