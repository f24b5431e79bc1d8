//! Command dispatch: one query in, one JSON document out.

use std::io::Write;

use clap::CommandFactory;
use tracing::{debug, instrument};

use crate::application::{strategy_for, to_json, ApplicationError, Mode, Renderer};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, Settings};
use crate::domain::{anemia_chart, Flowchart, THRESHOLDS};

/// Run the parsed command line against stdout.
pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    execute_command_to(cli, &mut out)
}

/// Run the parsed command line, writing command output to `out`.
pub fn execute_command_to(cli: &Cli, out: &mut impl Write) -> CliResult<()> {
    let settings = effective_settings(cli)?;
    debug!("settings: {:?}", settings);

    match &cli.command {
        None => _query(&settings, settings.mode, "", out),
        Some(Commands::Flow { query }) => _query(&settings, Mode::Flow, &query.text(), out),
        Some(Commands::Labs { query }) => _query(&settings, Mode::Labs, &query.text(), out),
        Some(Commands::Screen { query }) => _query(&settings, Mode::Screen, &query.text(), out),
        Some(Commands::Run { mode, query }) => {
            _query(&settings, mode.unwrap_or(settings.mode), &query.text(), out)
        }
        Some(Commands::Validate) => _validate(out),
        Some(Commands::Tree) => _tree(out),
        Some(Commands::Config { command }) => _config(&settings, command, out),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(*shell, &mut cmd, name, out);
            Ok(())
        }
    }
}

/// Config layers plus command-line flags.
fn effective_settings(cli: &Cli) -> CliResult<Settings> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(icon) = &cli.icon {
        settings.icon = icon.clone();
    }
    if cli.pretty {
        settings.pretty = true;
    }
    Ok(settings)
}

fn write_line(out: &mut impl Write, line: &str) -> CliResult<()> {
    writeln!(out, "{}", line).map_err(|e| CliError::io("write output", e))
}

#[instrument(skip(settings, out))]
fn _query(settings: &Settings, mode: Mode, query: &str, out: &mut impl Write) -> CliResult<()> {
    let renderer = Renderer::new(settings.icon.as_str(), settings.keyword.as_str());
    let strategy = strategy_for(mode, anemia_chart(), THRESHOLDS, renderer);
    let document = strategy.compute_next_step(query);
    debug!("rendered {} items", document.items.len());
    write_line(out, &to_json(&document, settings.pretty)?)
}

#[instrument(skip(out))]
fn _validate(out: &mut impl Write) -> CliResult<()> {
    validate_chart(anemia_chart(), out)
}

/// Write one line per defect; any defect makes the command fail.
fn validate_chart(chart: &Flowchart, out: &mut impl Write) -> CliResult<()> {
    let defects = chart.validate();
    if defects.is_empty() {
        return write_line(out, &format!("flowchart OK: {} entries", chart.len()));
    }
    write_line(out, &format!("{} defect(s) found", defects.len()))?;
    for defect in &defects {
        write_line(out, &format!("  - {}", defect))?;
    }
    Err(ApplicationError::InvalidChart { defects }.into())
}

#[instrument(skip(out))]
fn _tree(out: &mut impl Write) -> CliResult<()> {
    let rendered = anemia_chart().to_tree().to_string();
    write!(out, "{}", rendered).map_err(|e| CliError::io("write tree", e))
}

fn _config(settings: &Settings, command: &ConfigCommands, out: &mut impl Write) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let toml = settings.to_toml()?;
            write!(out, "{}", toml).map_err(|e| CliError::io("write config", e))
        }
        ConfigCommands::Path => match global_config_path() {
            Some(path) => write_line(out, &path.display().to_string()),
            None => {
                output::warning("no config directory available on this platform");
                Ok(())
            }
        },
        ConfigCommands::Template => {
            write!(out, "{}", Settings::template()).map_err(|e| CliError::io("write template", e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Choice, Entry, Node};

    #[test]
    fn given_defective_chart_when_validate_then_reports_each_defect_and_fails() {
        let chart = Flowchart::new(
            "A",
            [(
                "A",
                Entry::Node(Node::question(&["q"], vec![Choice::new("go", "MISSING")])),
            )],
        );
        let mut out = Vec::new();

        let err = validate_chart(&chart, &mut out).unwrap_err();

        let report = String::from_utf8(out).unwrap();
        assert!(report.starts_with("1 defect(s) found\n"), "{}", report);
        assert!(report.contains("  - "));
        assert!(report.contains("MISSING"));
        assert_eq!(err.exit_code(), crate::exitcode::DATAERR);
    }
}
