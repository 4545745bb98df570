//! access-ddl CLI
//!
//! Command-line tool that exports DDL for a JSON table mapping and previews
//! how a dialect spells types, functions and pagination.

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

use access_dialect::AccessDialect;
use access_dialect_core::ddl::SchemaExporter;
use access_dialect_core::dialect::{Dialect, GenericDialect, SqlServerDialect};
use access_dialect_core::limit::{use_limit, RowSelection};
use access_dialect_core::mapping::Mapping;
use access_dialect_core::settings::{Hbm2Ddl, Settings};
use access_dialect_core::types::{ColumnSize, SqlType};

/// SQL generation for Microsoft Access databases.
#[derive(Parser)]
#[command(name = "access-ddl")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Settings file (JSON).
    #[arg(short, long, env = "ACCESS_DDL_SETTINGS")]
    settings: Option<PathBuf>,

    /// Dialect to generate for, overriding the settings file.
    #[arg(short, long)]
    dialect: Option<String>,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the DDL for a mapping file.
    Export {
        /// Mapping file (JSON).
        #[arg(short, long)]
        mapping: PathBuf,

        /// What to generate, overriding the settings file.
        #[arg(short, long, value_enum)]
        action: Option<ExportAction>,

        /// Quote every identifier.
        #[arg(long)]
        quote_all: bool,
    },

    /// Render a function call.
    Function {
        /// Function name, e.g. `current_date` or `hour`.
        name: String,

        /// Already-rendered argument expressions.
        args: Vec<String>,
    },

    /// List the column type names of the dialect.
    Types {
        /// Column length.
        #[arg(long, default_value_t = ColumnSize::DEFAULT_LENGTH)]
        length: u32,

        /// Numeric precision.
        #[arg(long, default_value_t = ColumnSize::DEFAULT_PRECISION)]
        precision: u32,

        /// Numeric scale.
        #[arg(long, default_value_t = ColumnSize::DEFAULT_SCALE)]
        scale: u32,
    },

    /// Apply the dialect's limit clause to a query.
    Paginate {
        /// The SELECT statement.
        sql: String,

        /// Zero-based first row.
        #[arg(long)]
        first: Option<u64>,

        /// Maximum number of rows.
        #[arg(long)]
        max: Option<u64>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ExportAction {
    Create,
    CreateDrop,
    Drop,
}

impl From<ExportAction> for Hbm2Ddl {
    fn from(action: ExportAction) -> Self {
        match action {
            ExportAction::Create => Self::Create,
            ExportAction::CreateDrop => Self::CreateDrop,
            ExportAction::Drop => Self::Drop,
        }
    }
}

fn resolve_dialect(name: &str) -> anyhow::Result<Box<dyn Dialect>> {
    match name.to_ascii_lowercase().as_str() {
        "ucanaccess" | "access" => Ok(Box::new(AccessDialect::new())),
        "sqlserver" => Ok(Box::new(SqlServerDialect::new())),
        "generic" => Ok(Box::new(GenericDialect::new())),
        other => bail!("Unknown dialect '{other}' (expected ucanaccess, sqlserver or generic)"),
    }
}

fn load_settings(path: Option<&PathBuf>) -> anyhow::Result<Settings> {
    let settings = match path {
        Some(path) => Settings::from_file(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => Settings::default(),
    };
    Ok(settings.with_env_overrides())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut settings = load_settings(cli.settings.as_ref())?;
    if let Some(dialect) = cli.dialect {
        settings.dialect = dialect;
    }
    let dialect = resolve_dialect(&settings.dialect)?;
    debug!(
        dialect = dialect.name(),
        connection_url = settings.connection_url.as_deref().unwrap_or("<none>"),
        "Resolved settings"
    );

    match cli.command {
        Commands::Export {
            mapping,
            action,
            quote_all,
        } => {
            let mapping = Mapping::from_file(&mapping)
                .with_context(|| format!("Failed to load mapping from {}", mapping.display()))?;
            if let Some(action) = action {
                settings.hbm2ddl_auto = action.into();
            }
            if settings.hbm2ddl_auto == Hbm2Ddl::None {
                settings.hbm2ddl_auto = Hbm2Ddl::Create;
            }
            settings.globally_quoted_identifiers |= quote_all;

            let statements = SchemaExporter::new(dialect.as_ref(), &settings).export(&mapping)?;
            info!(
                "Generated {} statement(s) for {} table(s)",
                statements.len(),
                mapping.tables.len()
            );
            for statement in &statements {
                println!("{statement};");
            }
        }

        Commands::Function { name, args } => {
            println!("{}", dialect.render_function(&name, &args)?);
        }

        Commands::Types {
            length,
            precision,
            scale,
        } => {
            let size = ColumnSize {
                length,
                precision,
                scale,
            };
            for code in SqlType::ALL {
                let label = code.to_string();
                match dialect.type_name(code, size) {
                    Ok(name) => println!("{label:<14} {name}"),
                    Err(e) => println!("{label:<14} ({e})"),
                }
            }
        }

        Commands::Paginate { sql, first, max } => {
            let mut selection = RowSelection::new();
            selection.first_row = first;
            selection.max_rows = max;

            let handler = dialect.limit_handler();
            if use_limit(handler, &selection) {
                println!("{}", handler.process_sql(&sql, &selection));
            } else {
                println!("{sql}");
                if let Some(cap) = selection.last() {
                    info!("Dialect has no limit clause; the driver caps the result at {cap} row(s)");
                }
            }
        }
    }

    Ok(())
}
