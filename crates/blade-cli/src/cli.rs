//! CLI argument definitions for the blade tracker.

use std::path::PathBuf;

use blade_model::{DamageStatus, Weather};
use blade_persistence::DEFAULT_SLOT;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "blade-tracker",
    version,
    about = "Wind turbine blade damage tracker",
    long_about = "Track damages on wind turbine blades, their repair logs and the \
                  materials used.\n\n\
                  State is kept in a single JSON file and saved after every change."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Directory holding the state file.
    #[arg(long = "data-dir", value_name = "DIR", default_value = ".", global = true)]
    pub data_dir: PathBuf,

    /// Storage slot; state is read from and written to <DATA_DIR>/<SLOT>.json.
    #[arg(long = "slot", value_name = "NAME", default_value = DEFAULT_SLOT, global = true)]
    pub slot: String,

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
}

#[derive(Subcommand)]
pub enum Command {
    /// Show the selected turbine and blade with its damages.
    Show,

    /// List turbines with their pending damage counts.
    Turbines(SearchArgs),

    /// List the blades of the selected turbine.
    Blades(SearchArgs),

    /// Select a turbine (clears the blade selection).
    SelectTurbine {
        #[arg(value_name = "TURBINE_ID")]
        turbine_id: i64,
    },

    /// Select a blade of the selected turbine.
    SelectBlade {
        #[arg(value_name = "BLADE_ID")]
        blade_id: String,
    },

    /// Select a turbine and blade at once.
    Jump {
        #[arg(value_name = "TURBINE_ID")]
        turbine_id: i64,
        #[arg(value_name = "BLADE_ID")]
        blade_id: String,
    },

    /// Record a damage, creating the turbine or blade when needed.
    ///
    /// When the turbine does not exist yet it is created together with the
    /// blade, and the damage is not recorded; run the command again to add it.
    AddDamage(AddDamageArgs),

    /// Record a damage on the selected blade with a generated id.
    QuickAdd(QuickAddArgs),

    /// Advance a damage on the selected blade to its next status.
    ToggleStatus {
        #[arg(value_name = "DAMAGE_ID")]
        damage_id: i64,
    },

    /// Change fields of an existing damage.
    EditDamage(EditDamageArgs),

    /// Record material used on a damage.
    AddMaterial(MaterialArgs),

    /// Remove a recorded material usage (exact name, quantity and unit).
    RemoveMaterial(MaterialArgs),

    /// Add a repair log entry to a damage.
    AddLog(AddLogArgs),

    /// Change an existing repair log entry.
    EditLog(EditLogArgs),

    /// Remove a repair log entry.
    RemoveLog {
        #[arg(value_name = "DAMAGE_ID")]
        damage_id: i64,
        #[arg(value_name = "LOG_ID")]
        log_id: i64,
    },

    /// Summarize materials used across all damages.
    Materials(MaterialsArgs),

    /// Export the materials of a blade as CSV.
    ExportCsv(ExportArgs),
}

#[derive(Args)]
pub struct SearchArgs {
    /// Only list entries containing this text (case-insensitive).
    #[arg(long = "search", value_name = "TEXT")]
    pub search: Option<String>,
}

#[derive(Args)]
pub struct AddDamageArgs {
    /// Turbine number.
    #[arg(long = "turbine", value_name = "ID")]
    pub turbine_id: i64,

    /// Turbine serial number.
    #[arg(long = "turbine-serial", value_name = "SERIAL")]
    pub turbine_serial_no: String,

    /// Blade serial number.
    #[arg(long = "blade-serial", value_name = "SERIAL")]
    pub blade_serial_no: String,

    /// Damage number; must not be used by any other damage.
    #[arg(long = "id", value_name = "ID")]
    pub damage_id: i64,

    #[arg(long = "category", value_name = "CATEGORY")]
    pub category: String,

    #[arg(long = "description", value_name = "TEXT", default_value = "")]
    pub description: String,

    /// Distance from the blade root in meters.
    #[arg(long = "radius", value_name = "METERS")]
    pub radius: f64,

    /// Blade side, e.g. leading_edge.
    #[arg(long = "side", value_name = "SIDE")]
    pub side: String,
}

#[derive(Args)]
pub struct QuickAddArgs {
    /// Damage category (default: Cat 3).
    #[arg(long = "category", value_name = "CATEGORY", default_value = "")]
    pub category: String,

    #[arg(long = "description", value_name = "TEXT", default_value = "")]
    pub description: String,

    #[arg(long = "radius", value_name = "METERS", default_value_t = 0.0)]
    pub radius: f64,

    #[arg(long = "side", value_name = "SIDE", default_value = "leading_edge")]
    pub side: String,
}

#[derive(Args)]
pub struct EditDamageArgs {
    #[arg(value_name = "DAMAGE_ID")]
    pub damage_id: i64,

    /// New damage number.
    #[arg(long = "id", value_name = "ID")]
    pub new_id: Option<i64>,

    #[arg(long = "category", value_name = "CATEGORY")]
    pub category: Option<String>,

    /// pending, in_progress or closed.
    #[arg(long = "status", value_name = "STATUS")]
    pub status: Option<DamageStatus>,

    #[arg(long = "description", value_name = "TEXT")]
    pub description: Option<String>,

    #[arg(long = "radius", value_name = "METERS")]
    pub radius: Option<f64>,

    #[arg(long = "side", value_name = "SIDE")]
    pub side: Option<String>,
}

#[derive(Args)]
pub struct MaterialArgs {
    #[arg(value_name = "DAMAGE_ID")]
    pub damage_id: i64,

    #[arg(value_name = "NAME")]
    pub name: String,

    #[arg(value_name = "QTY")]
    pub qty: f64,

    #[arg(value_name = "UNIT")]
    pub unit: String,
}

#[derive(Args)]
pub struct LogFields {
    /// Work date, YYYY-MM-DD.
    #[arg(long = "date", value_name = "DATE")]
    pub date: Option<NaiveDate>,

    #[arg(long = "hours", value_name = "HOURS")]
    pub hours: f64,

    /// Sunny, Cloudy, Rainy or Windy.
    #[arg(long = "weather", value_name = "WEATHER", default_value = "Sunny")]
    pub weather: Weather,

    #[arg(long = "description", value_name = "TEXT")]
    pub description: String,
}

#[derive(Args)]
pub struct AddLogArgs {
    #[arg(value_name = "DAMAGE_ID")]
    pub damage_id: i64,

    #[command(flatten)]
    pub fields: LogFields,
}

#[derive(Args)]
pub struct EditLogArgs {
    #[arg(value_name = "DAMAGE_ID")]
    pub damage_id: i64,

    #[arg(value_name = "LOG_ID")]
    pub log_id: i64,

    #[command(flatten)]
    pub fields: LogFields,
}

#[derive(Args)]
pub struct MaterialsArgs {
    /// Only include damages with this status.
    #[arg(long = "status", value_name = "STATUS")]
    pub status: Option<DamageStatus>,

    /// Also list every usage under each material.
    #[arg(long = "entries")]
    pub entries: bool,
}

#[derive(Args)]
pub struct ExportArgs {
    /// Blade to export (default: the selected blade).
    #[arg(long = "blade", value_name = "BLADE_ID")]
    pub blade_id: Option<String>,

    /// Output file.
    #[arg(long = "output", value_name = "PATH", default_value = blade_core::DEFAULT_EXPORT_FILE_NAME)]
    pub output: PathBuf,
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
