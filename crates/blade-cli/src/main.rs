//! Blade damage tracker CLI.

use std::io::{self, IsTerminal};

use blade_cli::cli::{Cli, LogFormatArg, LogLevelArg};
use blade_cli::commands::run;
use blade_cli::logging::{LogConfig, LogFormat, init_logging};
use blade_core::TrackerError;
use clap::{ColorChoice, Parser};
use tracing::level_filters::LevelFilter;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match run(&cli) {
        Ok(()) => 0,
        Err(error) => {
            report_error(&error);
            1
        }
    };
    std::process::exit(exit_code);
}

/// Tracker errors print their short message; anything else prints its chain.
fn report_error(error: &anyhow::Error) {
    match error.downcast_ref::<TrackerError>() {
        Some(TrackerError::Persistence(persistence)) => {
            eprintln!("error: {}", persistence.user_message());
            if let Some(suggestion) = persistence.suggestion() {
                eprintln!("hint: {suggestion}");
            }
        }
        Some(tracker_error) => eprintln!("error: {}", tracker_error.user_message()),
        None => eprintln!("error: {error:#}"),
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let level_filter = match cli.log_level {
        Some(LogLevelArg::Error) => LevelFilter::ERROR,
        Some(LogLevelArg::Warn) => LevelFilter::WARN,
        Some(LogLevelArg::Info) => LevelFilter::INFO,
        Some(LogLevelArg::Debug) => LevelFilter::DEBUG,
        Some(LogLevelArg::Trace) => LevelFilter::TRACE,
        None => cli.verbosity.tracing_level_filter(),
    };
    let format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    let ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    LogConfig::default()
        .with_level_filter(level_filter)
        .with_env_filter(!(cli.verbosity.is_present() || cli.log_level.is_some()))
        .with_format(format)
        .with_ansi(ansi)
        .with_log_file(cli.log_file.clone())
}
