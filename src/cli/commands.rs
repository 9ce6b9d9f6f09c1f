use std::io::{self, Write};

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands, ConfigCommands, StyleArg};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, Settings};
use crate::domain::{sample_chart, OrgChart, RenderOptions, DEFAULT_CEO};
use crate::exitcode;

/// Loads settings and runs the parsed command against stdout.
///
/// Returns the process exit code on success.
pub fn execute_command(cli: &Cli) -> CliResult<i32> {
    let settings = Settings::load(cli.config.as_deref())?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(cli, &settings, &mut out)
}

/// Runs the parsed command with already loaded settings, writing results to `out`.
#[instrument(level = "debug", skip(settings, out))]
pub fn run<W: Write>(cli: &Cli, settings: &Settings, out: &mut W) -> CliResult<i32> {
    match &cli.command {
        None => _print(&build_chart(cli, settings)?, &settings.render, None, out),
        Some(Commands::Print { style }) => {
            _print(&build_chart(cli, settings)?, &settings.render, *style, out)
        }
        Some(Commands::Contains { name }) => _contains(&build_chart(cli, settings)?, name, out),
        Some(Commands::Size) => {
            let chart = build_chart(cli, settings)?;
            emit(out, chart.size())
        }
        Some(Commands::Height) => {
            let chart = build_chart(cli, settings)?;
            emit(out, chart.height())
        }
        Some(Commands::Level { name }) => {
            let chart = build_chart(cli, settings)?;
            emit(out, chart.level_of(name)?)
        }
        Some(Commands::Leaves) => _leaves(&build_chart(cli, settings)?, out),
        Some(Commands::Config { command }) => _config(command, settings, out),
        Some(Commands::Completion { shell }) => _completion(*shell, out),
    }
}

/// The sample chart, rooted at `--ceo`, the configured CEO, or the default.
fn build_chart(cli: &Cli, settings: &Settings) -> CliResult<OrgChart> {
    let ceo = cli
        .ceo
        .as_deref()
        .or(settings.ceo.as_deref())
        .unwrap_or(DEFAULT_CEO);
    debug!("building sample chart with ceo: {:?}", ceo);
    Ok(sample_chart(ceo)?)
}

fn emit<W: Write>(out: &mut W, value: impl std::fmt::Display) -> CliResult<i32> {
    writeln!(out, "{}", value).map_err(|e| CliError::io("write output", e))?;
    Ok(exitcode::OK)
}

#[instrument(level = "debug", skip(chart, render, out))]
fn _print<W: Write>(
    chart: &OrgChart,
    render: &RenderOptions,
    style: Option<StyleArg>,
    out: &mut W,
) -> CliResult<i32> {
    let mut opts = render.clone();
    if let Some(style) = style {
        opts.style = style.into();
    }
    out.write_all(chart.render(&opts).as_bytes())
        .map_err(|e| CliError::io("write chart", e))?;
    Ok(exitcode::OK)
}

#[instrument(level = "debug", skip(chart, out))]
fn _contains<W: Write>(chart: &OrgChart, name: &str, out: &mut W) -> CliResult<i32> {
    let found = chart.contains(name);
    emit(out, found)?;
    Ok(if found { exitcode::OK } else { exitcode::ABSENT })
}

fn _leaves<W: Write>(chart: &OrgChart, out: &mut W) -> CliResult<i32> {
    for leaf in chart.leaves() {
        writeln!(out, "{}", leaf).map_err(|e| CliError::io("write output", e))?;
    }
    Ok(exitcode::OK)
}

fn _config<W: Write>(command: &ConfigCommands, settings: &Settings, out: &mut W) -> CliResult<i32> {
    match command {
        ConfigCommands::Show => {
            output::header("Effective settings");
            let text = settings.to_toml()?;
            out.write_all(text.as_bytes())
                .map_err(|e| CliError::io("write settings", e))?;
        }
        ConfigCommands::Template => {
            out.write_all(Settings::template().as_bytes())
                .map_err(|e| CliError::io("write template", e))?;
        }
        ConfigCommands::Path => match global_config_path() {
            Some(path) => {
                writeln!(out, "{}", path.display()).map_err(|e| CliError::io("write path", e))?;
            }
            None => {
                return Err(CliError::Usage(
                    "cannot determine config directory (no home directory)".into(),
                ));
            }
        },
    }
    Ok(exitcode::OK)
}

fn _completion<W: Write>(shell: Shell, out: &mut W) -> CliResult<i32> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, out);
    Ok(exitcode::OK)
}
