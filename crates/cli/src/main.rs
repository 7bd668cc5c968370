// rueda CLI - bulk catalog import from spreadsheets

mod exit_codes;
mod import;
mod show;
mod util;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};

use exit_codes::{import_exit_code, EXIT_ERROR, EXIT_STORE, EXIT_SUCCESS, EXIT_USAGE};

#[derive(Parser)]
#[command(name = "rueda")]
#[command(about = "Bulk-import products and their attributes from a spreadsheet")]
#[command(version)]
struct Cli {
    /// Raise log verbosity (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(long, short = 'v', action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import a workbook into the catalog (safe to re-run)
    #[command(after_help = "\
Examples:
  rueda import tyres.xlsx
  rueda import tyres.xlsx --catalog shop.db
  rueda import upload.b64 --base64 --profile profiles/tyres.toml
  rueda -v import tyres.xlsx")]
    Import {
        /// Spreadsheet to import (.xls, .xlsx, .xlsb, .ods)
        file: Option<PathBuf>,

        /// Catalog database (default: <data dir>/rueda/catalog.db)
        #[arg(long, env = "RUEDA_CATALOG")]
        catalog: Option<PathBuf>,

        /// Import profile TOML (default: <config dir>/rueda/profile.toml or built-in)
        #[arg(long, env = "RUEDA_PROFILE")]
        profile: Option<PathBuf>,

        /// FILE holds base64 text rather than raw workbook bytes
        #[arg(long)]
        base64: bool,
    },

    /// Show catalog contents
    #[command(after_help = "\
Examples:
  rueda show
  rueda show --product '205/55R16 91V'
  rueda show --json > catalog.json")]
    Show {
        /// Catalog database (default: <data dir>/rueda/catalog.db)
        #[arg(long, env = "RUEDA_CATALOG")]
        catalog: Option<PathBuf>,

        /// Only this product (exact name)
        #[arg(long)]
        product: Option<String>,

        /// Emit JSON instead of the text listing
        #[arg(long)]
        json: bool,
    },

    /// Write a blank import workbook with the profile's header row
    #[command(after_help = "\
Examples:
  rueda template
  rueda template -o upload.xlsx --profile profiles/tyres.toml")]
    Template {
        /// Output path
        #[arg(long, short = 'o', default_value = "import_template.xlsx")]
        output: PathBuf,

        /// Import profile TOML
        #[arg(long, env = "RUEDA_PROFILE")]
        profile: Option<PathBuf>,
    },

    /// Print the effective import profile as TOML
    #[command(after_help = "\
Examples:
  rueda profile
  rueda profile > ~/.config/rueda/profile.toml
  rueda profile --profile profiles/tyres.toml")]
    Profile {
        /// Import profile TOML to validate and print
        #[arg(long, env = "RUEDA_PROFILE")]
        profile: Option<PathBuf>,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Import { file, catalog, profile, base64 } => {
            import::cmd_import(file, catalog, profile, base64)
        }
        Commands::Show { catalog, product, json } => show::cmd_show(catalog, product, json),
        Commands::Template { output, profile } => cmd_template(output, profile),
        Commands::Profile { profile } => cmd_profile(profile),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn new(code: u8, msg: impl Into<String>) -> Self {
        Self { code, message: msg.into(), hint: None }
    }

    pub fn args(msg: impl Into<String>) -> Self {
        Self::new(EXIT_USAGE, msg)
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self::new(EXIT_ERROR, msg)
    }

    pub fn store(msg: impl Into<String>) -> Self {
        Self::new(EXIT_STORE, msg)
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

// ============================================================================
// template
// ============================================================================

fn cmd_template(output: PathBuf, profile: Option<PathBuf>) -> Result<(), CliError> {
    let profile = util::load_profile(profile.as_deref())?;
    let headers = profile.template_headers();
    let bytes = rueda_io::template::write_template(&headers)
        .map_err(|e| CliError::io(e.to_string()))?;
    std::fs::write(&output, bytes)
        .map_err(|e| CliError::args(format!("cannot write {}: {}", output.display(), e)))?;
    println!("wrote {} ({} column(s))", output.display(), headers.len());
    Ok(())
}

// ============================================================================
// profile
// ============================================================================

fn cmd_profile(profile: Option<PathBuf>) -> Result<(), CliError> {
    let profile = util::load_profile(profile.as_deref())?;
    profile
        .validate()
        .map_err(|e| CliError::new(import_exit_code(&e), e.to_string()))?;
    let text = profile
        .to_toml()
        .map_err(|e| CliError::new(import_exit_code(&e), e.to_string()))?;
    print!("{}", text);
    Ok(())
}
