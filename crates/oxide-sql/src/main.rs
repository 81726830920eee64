//! oxide-sql CLI
//!
//! Parses, formats and checks SQL scripts in any bundled dialect.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

use oxide_sql::{Config, Dialect, Feature, ParsedStatement, ParserFeatures};

/// Parse, format and check SQL in several dialects.
#[derive(Parser)]
#[command(name = "oxide-sql")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// SQL dialect: generic, mysql, bigquery, oracle or oscar.
    #[arg(short, long, env = "OXIDE_SQL_DIALECT")]
    dialect: Option<String>,

    /// Enable a parser feature (keep_comments, pipes_as_concat,
    /// keep_name_quotes). May be repeated.
    #[arg(short = 'f', long = "feature", value_name = "FEATURE")]
    features: Vec<Feature>,

    /// JSON settings file with `dialect` and `features`.
    #[arg(short, long, env = "OXIDE_SQL_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the syntax tree of every statement.
    Parse {
        /// Input file (stdin if not specified).
        file: Option<PathBuf>,

        /// Report every failing statement instead of stopping at the first.
        #[arg(short, long)]
        keep_going: bool,
    },

    /// Print every statement in canonical form.
    Format {
        /// Input file (stdin if not specified).
        file: Option<PathBuf>,

        /// Report every failing statement instead of stopping at the first.
        #[arg(short, long)]
        keep_going: bool,
    },

    /// Print the token stream.
    Tokens {
        /// Input file (stdin if not specified).
        file: Option<PathBuf>,
    },

    /// Only report errors.
    Check {
        /// Input file (stdin if not specified).
        file: Option<PathBuf>,

        /// Report every failing statement instead of stopping at the first.
        #[arg(short, long)]
        keep_going: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so they never mix with SQL output.
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => Config::default(),
    }
    .merge(cli.dialect, &cli.features);
    let dialect = oxide_sql::dialect(config.dialect_name())?;
    let features = config.features;
    debug!(dialect = dialect.name(), ?features, "settings resolved");

    match cli.command {
        Commands::Parse { file, keep_going } => {
            let sql = read_input(file.as_deref())?;
            let parsed = parse(&sql, dialect, features, keep_going)?;
            for statement in &parsed.statements {
                println!("{:#?}", statement.statement);
            }
            parsed.finish()
        }

        Commands::Format { file, keep_going } => {
            let sql = read_input(file.as_deref())?;
            let parsed = parse(&sql, dialect, features, keep_going)?;
            if !parsed.statements.is_empty() {
                println!("{}", oxide_sql::render(&parsed.statements, dialect));
            }
            parsed.finish()
        }

        Commands::Tokens { file } => {
            let sql = read_input(file.as_deref())?;
            for token in oxide_sql::tokenize(&sql, dialect, features)? {
                let text = sql.get(token.span.start..token.span.end).unwrap_or_default();
                println!(
                    "{}:{}\t{:?}\t{text}",
                    token.position.line, token.position.column, token.kind
                );
            }
            Ok(())
        }

        Commands::Check { file, keep_going } => {
            let sql = read_input(file.as_deref())?;
            let parsed = parse(&sql, dialect, features, keep_going)?;
            parsed.finish()?;
            println!("ok: {} statement(s)", parsed.statements.len());
            Ok(())
        }
    }
}

fn load_config(path: &Path) -> anyhow::Result<Config> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    Config::from_json(&text).with_context(|| format!("invalid config file {}", path.display()))
}

fn read_input(file: Option<&Path>) -> anyhow::Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut sql = String::new();
            std::io::stdin()
                .read_to_string(&mut sql)
                .context("failed to read stdin")?;
            Ok(sql)
        }
    }
}

struct Parsed {
    statements: Vec<ParsedStatement>,
    errors: usize,
}

impl Parsed {
    /// Fails the command if any statement was skipped.
    fn finish(&self) -> anyhow::Result<()> {
        if self.errors > 0 {
            bail!("{} statement(s) failed to parse", self.errors);
        }
        Ok(())
    }
}

/// Parses the whole input. Without `keep_going` the first error aborts;
/// with it every error is printed and parsing resumes after the next `;`.
fn parse(
    sql: &str,
    dialect: &dyn Dialect,
    features: ParserFeatures,
    keep_going: bool,
) -> anyhow::Result<Parsed> {
    if !keep_going {
        let statements =
            oxide_sql::parse(sql, dialect, features).context("failed to parse input")?;
        return Ok(Parsed {
            statements,
            errors: 0,
        });
    }
    let (statements, errors) = oxide_sql::parse_recovering(sql, dialect, features);
    for err in &errors {
        eprintln!("error: {err}");
    }
    Ok(Parsed {
        statements,
        errors: errors.len(),
    })
}
