use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use wiifit_core::Report;

mod render;

const LOG_ENV: &str = "WIIFIT_LOG";
const INPUT_HINT: &str = "pass the path to a Wii Fit save file (e.g. FitPlus0.dat)";

#[derive(Parser, Debug)]
#[command(name = "wiifit")]
#[command(version)]
#[command(
    about = "Extract Mii profiles and body test history from Wii Fit save files.",
    long_about = None,
    after_help = "Examples:\n  wiifit save extract FitPlus0.dat -o report.json\n  wiifit save extract FitPlus0.dat --stdout --pretty\n  wiifit save show FitPlus0.dat"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Operations on Wii Fit save files.
    Save {
        #[command(subcommand)]
        command: SaveCommands,
    },
}

#[derive(Subcommand, Debug)]
enum SaveCommands {
    /// Extract profiles into a versioned JSON report.
    #[command(alias = "export")]
    #[command(
        after_help = "Examples:\n  wiifit save extract FitPlus0.dat -o report.json\n  wiifit save export FitPlus0.dat --stdout"
    )]
    Extract(ExtractArgs),
    /// Print profiles and body test records as text.
    #[command(alias = "print")]
    Show {
        /// Path to a Wii Fit save file
        input: PathBuf,
    },
}

#[derive(Args, Debug)]
struct ExtractArgs {
    /// Path to a Wii Fit save file
    input: PathBuf,

    /// Output report path (JSON)
    #[arg(short = 'o', long, required_unless_present = "stdout")]
    report: Option<PathBuf>,

    /// Write JSON report to stdout
    #[arg(long, conflicts_with = "report")]
    stdout: bool,

    /// Pretty-print JSON output
    #[arg(long, conflicts_with = "compact")]
    pretty: bool,

    /// Compact JSON output (default)
    #[arg(long)]
    compact: bool,

    /// Suppress non-error output
    #[arg(long)]
    quiet: bool,

    /// Exit with a non-zero code if any slot failed to decode
    #[arg(long)]
    strict: bool,

    /// List slots that failed to decode
    #[arg(long)]
    list_discarded: bool,
}

/// Error with a suggestion printed after it.
#[derive(Debug)]
struct Hinted {
    message: String,
    hint: &'static str,
}

impl Hinted {
    fn new(message: impl Into<String>, hint: &'static str) -> anyhow::Error {
        anyhow::Error::new(Self {
            message: message.into(),
            hint,
        })
    }
}

impl fmt::Display for Hinted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for Hinted {}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    let result = match cli.command {
        Commands::Save { command } => match command {
            SaveCommands::Extract(args) => save_extract(args),
            SaveCommands::Show { input } => save_show(&input),
        },
    };

    let Err(err) = result else {
        return ExitCode::SUCCESS;
    };
    eprintln!("error: {err:#}");
    if let Some(hinted) = err.chain().find_map(|cause| cause.downcast_ref::<Hinted>()) {
        eprintln!("hint: {}", hinted.hint);
    }
    ExitCode::from(2)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn save_extract(args: ExtractArgs) -> Result<()> {
    check_save_file(&args.input)?;
    if let Some(report_path) = &args.report {
        check_not_overwriting_input(&args.input, report_path)?;
    }

    let report =
        wiifit_core::analyze_save_file(&args.input).context("save file extraction failed")?;
    let serialized = if args.pretty {
        serde_json::to_string_pretty(&report)
    } else {
        serde_json::to_string(&report)
    };
    let json = serialized.context("JSON serialization failed")?;

    match &args.report {
        Some(path) => {
            write_report(path, &json)?;
            if !args.quiet {
                eprintln!(
                    "OK: {} profile(s) -> {}",
                    report.summary.profiles_total,
                    path.display()
                );
            }
        }
        None => print!("{json}"),
    }

    if args.list_discarded && !args.quiet {
        print_discarded(&report);
    }
    if args.strict && report.summary.slots_discarded > 0 {
        return Err(Hinted::new(
            format!(
                "{} slot(s) failed to decode",
                report.summary.slots_discarded
            ),
            "use --list-discarded to see which slots and why",
        ));
    }
    Ok(())
}

fn save_show(input: &Path) -> Result<()> {
    check_save_file(input)?;
    let profiles =
        wiifit_core::extract_profiles_file(input).context("save file extraction failed")?;
    if profiles.is_empty() {
        eprintln!("No profiles found in {}", input.display());
        return Ok(());
    }

    let mut blocks = Vec::with_capacity(profiles.len());
    for profile in &profiles {
        blocks.push(
            render::render_profile(profile).context("failed to format body test records")?,
        );
    }
    println!("{}", blocks.join("\n\n"));
    Ok(())
}

fn check_save_file(input: &Path) -> Result<()> {
    match fs::metadata(input) {
        Ok(meta) if meta.is_file() => Ok(()),
        Ok(_) => Err(Hinted::new(
            format!("input is not a file: {}", input.display()),
            INPUT_HINT,
        )),
        Err(_) => Err(Hinted::new(
            format!("input file not found: {}", input.display()),
            INPUT_HINT,
        )),
    }
}

// A report path that does not exist yet cannot be the input.
fn check_not_overwriting_input(input: &Path, report: &Path) -> Result<()> {
    if !report.exists() {
        return Ok(());
    }
    let input_abs = fs::canonicalize(input)
        .with_context(|| format!("failed to resolve input path: {}", input.display()))?;
    let report_abs = fs::canonicalize(report)
        .with_context(|| format!("failed to resolve report path: {}", report.display()))?;
    if input_abs == report_abs {
        return Err(Hinted::new(
            format!("report path must differ from input: {}", report.display()),
            "choose a different output path",
        ));
    }
    Ok(())
}

fn write_report(path: &Path, json: &str) -> Result<()> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create output directory: {}", dir.display()))?;
    }
    if path.is_dir() {
        bail!("report path is a directory: {}", path.display());
    }
    debug!(path = %path.display(), bytes = json.len(), "writing report");
    fs::write(path, json).with_context(|| format!("failed to write report: {}", path.display()))
}

fn print_discarded(report: &Report) {
    if report.discarded.is_empty() {
        eprintln!("Discarded slots: none");
        return;
    }
    eprintln!("Discarded slots:");
    for slot in &report.discarded {
        eprintln!("  slot {} @ {}: {}", slot.slot, slot.offset, slot.reason);
    }
}
