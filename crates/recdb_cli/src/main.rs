//! RecDB CLI
//!
//! Command-line tools for a RecDB academic records store.
//!
//! # Commands
//!
//! - `init` - Overwrite the store with sample data
//! - `add`, `update`, `delete` - Edit students, courses and enrollments
//! - `view`, `summary` - Read records and slot counts
//! - `check`, `trim` - Detect and repair torn writes
//! - `migrate` - Upgrade a legacy students file
//! - `report` - Render the enrollment report

mod commands;
mod report;

use clap::{Parser, Subcommand};
use commands::{Entity, NewRecord, RecordUpdate};
use recdb_core::StoreConfig;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// RecDB command-line record tools.
#[derive(Parser)]
#[command(name = "recdb")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory holding the record files
    #[arg(global = true, short, long, default_value = ".")]
    data_dir: PathBuf,

    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Overwrite all record files with sample data
    Init,

    /// Append a record
    Add {
        #[command(subcommand)]
        record: NewRecord,
    },

    /// Overwrite the first live record with the given key
    Update {
        #[command(subcommand)]
        update: RecordUpdate,
    },

    /// Soft-delete the first live record with the given key
    Delete {
        /// Record type
        entity: Entity,

        /// Primary key
        key: u32,
    },

    /// List records
    View {
        /// Record type
        entity: Entity,

        /// Show only the record with this primary key
        #[arg(short, long, conflicts_with = "filter")]
        id: Option<u32>,

        /// Case-insensitive substring to match
        #[arg(long)]
        filter: Option<String>,

        /// Field the filter applies to (defaults to the first field)
        #[arg(long, requires = "filter")]
        field: Option<String>,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Show slot counts for every record file
    Summary {
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Check that every file ends on a record boundary
    Check {
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Cut torn trailing records, keeping a `.bak` copy
    Trim,

    /// Migrate a legacy (id, name, year) students file
    Migrate {
        /// Legacy file (defaults to students_v1.dat in the data directory)
        #[arg(long)]
        from: Option<PathBuf>,

        /// Major given to every migrated student
        #[arg(long)]
        default_major: Option<String>,
    },

    /// Render the enrollment report
    Report {
        /// Output path (defaults to report.txt in the data directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show version information
    Version,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = StoreConfig::new(&cli.data_dir);

    match cli.command {
        Commands::Init => commands::init::run(config)?,
        Commands::Add { record } => commands::add::run(config, record)?,
        Commands::Update { update } => commands::update::run(config, update)?,
        Commands::Delete { entity, key } => commands::delete::run(config, entity, key)?,
        Commands::View {
            entity,
            id,
            filter,
            field,
            format,
        } => {
            let query = match (id, filter) {
                (Some(id), _) => commands::view::Query::Key(id),
                (None, Some(needle)) => commands::view::Query::Filter { field, needle },
                (None, None) => commands::view::Query::All,
            };
            commands::view::run(config, entity, &query, &format)?;
        }
        Commands::Summary { format } => commands::summary::run(config, &format)?,
        Commands::Check { format } => commands::check::run(config, &format)?,
        Commands::Trim => commands::trim::run(config)?,
        Commands::Migrate {
            from,
            default_major,
        } => {
            let config = match default_major {
                Some(major) => config.default_major(major),
                None => config,
            };
            commands::migrate::run(config, from.as_deref())?;
        }
        Commands::Report { output } => commands::report::run(config, output.as_deref())?,
        Commands::Version => {
            println!("RecDB CLI v{}", env!("CARGO_PKG_VERSION"));
            println!("RecDB Core v{}", recdb_core::VERSION);
        }
    }

    Ok(())
}
