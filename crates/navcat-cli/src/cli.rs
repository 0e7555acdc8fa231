//! CLI argument definitions for the navcat inspector.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "navcat",
    version,
    about = "Inspect the navigation category registry",
    long_about = "Inspect the ordered navigation category manifest.\n\n\
                  Lists categories, builds localized menu groups, and answers\n\
                  serialization and position queries the way the app does."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// TOML config with platform, policy, and string overrides.
    #[arg(long = "config", value_name = "PATH", env = "NAVCAT_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Override whether the platform supports the graphing category.
    #[arg(long = "graphing-available", value_name = "BOOL", global = true)]
    pub graphing_available: Option<bool>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the manifest in menu order.
    List,

    /// Build the localized menu groups.
    Menu(MenuArgs),

    /// Print the serialization id stored for a mode.
    Serialize(ModeArgs),

    /// Restore a mode from a stored settings value (parsed as JSON).
    Deserialize(DeserializeArgs),

    /// Print every registry answer about a mode as JSON.
    Lookup(ModeArgs),

    /// List accelerator keys in manifest order.
    Keys,
}

#[derive(Parser)]
pub struct MenuArgs {
    /// Emit JSON instead of tables.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct ModeArgs {
    /// Mode identifier ("Weight") or friendly name ("Weight and Mass").
    #[arg(value_name = "MODE")]
    pub mode: String,
}

#[derive(Parser)]
pub struct DeserializeArgs {
    /// Stored value, e.g. `16`.
    #[arg(value_name = "VALUE", allow_hyphen_values = true)]
    pub value: String,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
