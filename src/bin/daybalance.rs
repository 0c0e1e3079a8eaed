//! Daybalance CLI
//!
//! Commands:
//! - score: compute a balance score from flags or payload files
//! - serve: run the ingestion service over the file-backed store
//! - sync: fetch both upstream endpoints and score the result

use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use daybalance::pipeline::{compute_score, score_payloads};
use daybalance::types::{FieldValue, RawFields, ScoreBreakdown, Variant};
use daybalance::{ScoreError, ENGINE_VERSION};

/// Daybalance - daily balance score from recovery and phone-usage metrics
#[derive(Parser)]
#[command(name = "daybalance")]
#[command(version = ENGINE_VERSION)]
#[command(about = "Compute a daily balance score from wearable recovery and screen-time metrics", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute a balance score
    Score {
        /// Recovery percentage (0-100)
        #[arg(long)]
        recovery: Option<String>,

        /// Sleep performance percentage (0-100)
        #[arg(long)]
        sleep: Option<String>,

        /// Day strain (0-21)
        #[arg(long)]
        strain: Option<String>,

        /// Social screen time in hours
        #[arg(long)]
        social: Option<String>,

        /// Other screen time in hours
        #[arg(long)]
        other: Option<String>,

        /// Wake time (HH:MM), schedule-aware variant only
        #[arg(long)]
        wake: Option<String>,

        /// Bed time (HH:MM), schedule-aware variant only
        #[arg(long)]
        bed: Option<String>,

        /// Read the WHOOP payload from a JSON file instead of flags
        #[arg(long, value_name = "FILE")]
        whoop: Option<PathBuf>,

        /// Read the screen-time payload from a JSON file instead of flags
        #[arg(long, value_name = "FILE")]
        screentime: Option<PathBuf>,

        /// Formula variant
        #[arg(long, default_value = "schedule")]
        variant: VariantArg,

        /// Output format (defaults to text on a terminal, json otherwise)
        #[arg(long)]
        format: Option<Format>,
    },

    /// Run the ingestion service
    #[cfg(feature = "server")]
    Serve {
        /// Bind address
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// Bind port
        #[arg(long, default_value = "8787")]
        port: u16,

        /// Path of the JSON record file
        #[arg(long, default_value = "data/latest.json")]
        data_file: PathBuf,

        /// Bearer token required on POST routes
        #[arg(long, conflicts_with = "generate_token")]
        token: Option<String>,

        /// Generate a random bearer token and print it on startup
        #[arg(long)]
        generate_token: bool,
    },

    /// Fetch both upstream endpoints and score the result
    #[cfg(feature = "sync")]
    Sync {
        /// WHOOP metrics endpoint URL
        #[arg(long)]
        whoop_url: String,

        /// Screen-time metrics endpoint URL
        #[arg(long)]
        screen_url: String,

        /// Bearer token forwarded to both endpoints
        #[arg(long)]
        token: Option<String>,

        /// Formula variant
        #[arg(long, default_value = "schedule")]
        variant: VariantArg,

        /// Output format (defaults to text on a terminal, json otherwise)
        #[arg(long)]
        format: Option<Format>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum VariantArg {
    /// Schedule-aware screen scoring (waking-hours share)
    Schedule,
    /// Fixed-weight screen scoring (no schedule needed)
    Fixed,
}

impl From<VariantArg> for Variant {
    fn from(arg: VariantArg) -> Self {
        match arg {
            VariantArg::Schedule => Variant::ScheduleAware,
            VariantArg::Fixed => Variant::FixedWeight,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    /// Human-readable breakdown
    Text,
    /// Compact JSON
    Json,
    /// Pretty-printed JSON
    JsonPretty,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::to_string(&CliError::from(e))
                    .unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), BalanceCliError> {
    match cli.command {
        Commands::Score {
            recovery,
            sleep,
            strain,
            social,
            other,
            wake,
            bed,
            whoop,
            screentime,
            variant,
            format,
        } => cmd_score(ScoreArgs {
            recovery,
            sleep,
            strain,
            social,
            other,
            wake,
            bed,
            whoop,
            screentime,
            variant: variant.into(),
            format,
        }),

        #[cfg(feature = "server")]
        Commands::Serve {
            host,
            port,
            data_file,
            token,
            generate_token,
        } => cmd_serve(&host, port, data_file, token, generate_token),

        #[cfg(feature = "sync")]
        Commands::Sync {
            whoop_url,
            screen_url,
            token,
            variant,
            format,
        } => cmd_sync(&whoop_url, &screen_url, token, variant.into(), format),
    }
}

struct ScoreArgs {
    recovery: Option<String>,
    sleep: Option<String>,
    strain: Option<String>,
    social: Option<String>,
    other: Option<String>,
    wake: Option<String>,
    bed: Option<String>,
    whoop: Option<PathBuf>,
    screentime: Option<PathBuf>,
    variant: Variant,
    format: Option<Format>,
}

fn cmd_score(args: ScoreArgs) -> Result<(), BalanceCliError> {
    let breakdown = match (&args.whoop, &args.screentime) {
        (Some(whoop_path), Some(screen_path)) => {
            let whoop_json = fs::read_to_string(whoop_path)?;
            let screen_json = fs::read_to_string(screen_path)?;
            score_payloads(&whoop_json, &screen_json, args.variant)?
        }
        (None, None) => {
            let fields = fields_from_flags(&args)?;
            compute_score(&fields, args.variant)?
        }
        _ => {
            return Err(BalanceCliError::MissingInput(
                "--whoop and --screentime must be given together".to_string(),
            ))
        }
    };

    print_breakdown(&breakdown, args.format)?;
    Ok(())
}

fn fields_from_flags(args: &ScoreArgs) -> Result<RawFields, BalanceCliError> {
    let require = |value: &Option<String>, flag: &str| {
        value.clone().ok_or_else(|| {
            BalanceCliError::MissingInput(format!(
                "--{} is required unless payload files are given",
                flag
            ))
        })
    };

    Ok(RawFields {
        recovery: FieldValue::Text(require(&args.recovery, "recovery")?),
        sleep_performance: FieldValue::Text(require(&args.sleep, "sleep")?),
        day_strain: FieldValue::Text(require(&args.strain, "strain")?),
        social_hours: FieldValue::Text(require(&args.social, "social")?),
        other_hours: FieldValue::Text(require(&args.other, "other")?),
        wake_time: args.wake.clone(),
        bed_time: args.bed.clone(),
    })
}

fn print_breakdown(
    breakdown: &ScoreBreakdown,
    format: Option<Format>,
) -> Result<(), BalanceCliError> {
    let format = format.unwrap_or_else(|| {
        if atty::is(atty::Stream::Stdout) {
            Format::Text
        } else {
            Format::Json
        }
    });

    match format {
        Format::Json => println!("{}", serde_json::to_string(breakdown)?),
        Format::JsonPretty => println!("{}", serde_json::to_string_pretty(breakdown)?),
        Format::Text => {
            println!("Balance score: {} / 100", breakdown.composite);
            println!("{}", breakdown.label.message());
            println!();
            println!("Recovery:      {:>3.0} / 100", breakdown.recovery_score.round());
            println!("Sleep:         {:>3.0} / 100", breakdown.sleep_score.round());
            println!("Strain:        {:>3.0} / 100", breakdown.strain_score.round());
            println!("Screen time:   {:>3.0} / 100", breakdown.screen.score.round());
            println!("Social signal: {:>3.0} / 100", breakdown.screen.social_signal.round());
            println!("Total screen:  {:.1}h", breakdown.total_screen_hours);

            if let Some(waking) = breakdown.waking_hours {
                println!("Waking hours:  {:.1}h", waking);
            }
            if let (Some(actual), Some(baseline)) =
                (breakdown.screen.actual_share, breakdown.screen.baseline_share)
            {
                println!(
                    "Phone share:   {:.1}% (baseline {:.1}%)",
                    actual * 100.0,
                    baseline * 100.0
                );
            }
        }
    }

    Ok(())
}

#[cfg(feature = "server")]
fn cmd_serve(
    host: &str,
    port: u16,
    data_file: PathBuf,
    token: Option<String>,
    generate_token: bool,
) -> Result<(), BalanceCliError> {
    use daybalance::server::{serve, AppState};
    use daybalance::store::FileStore;
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "daybalance=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let token = if generate_token {
        let generated = uuid::Uuid::new_v4().to_string();
        println!("Generated bearer token: {}", generated);
        Some(generated)
    } else {
        token
    };

    if token.is_none() {
        eprintln!("warning: POST routes are unauthenticated; pass --token or --generate-token");
    }

    let state = AppState::new(FileStore::new(data_file), token);
    let addr = format!("{}:{}", host, port);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(serve(&addr, state))?;
    Ok(())
}

#[cfg(feature = "sync")]
fn cmd_sync(
    whoop_url: &str,
    screen_url: &str,
    token: Option<String>,
    variant: Variant,
    format: Option<Format>,
) -> Result<(), BalanceCliError> {
    use daybalance::sync::SyncClient;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let client = SyncClient::new(token);
    let breakdown = runtime.block_on(client.sync_and_score(whoop_url, screen_url, variant))?;

    print_breakdown(&breakdown, format)?;
    Ok(())
}

// Error types

#[derive(Debug)]
enum BalanceCliError {
    Io(std::io::Error),
    Score(ScoreError),
    Json(serde_json::Error),
    MissingInput(String),
}

impl From<std::io::Error> for BalanceCliError {
    fn from(e: std::io::Error) -> Self {
        BalanceCliError::Io(e)
    }
}

impl From<ScoreError> for BalanceCliError {
    fn from(e: ScoreError) -> Self {
        BalanceCliError::Score(e)
    }
}

impl From<serde_json::Error> for BalanceCliError {
    fn from(e: serde_json::Error) -> Self {
        BalanceCliError::Json(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<BalanceCliError> for CliError {
    fn from(e: BalanceCliError) -> Self {
        match e {
            BalanceCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            BalanceCliError::Score(e) => {
                let code = if e.is_upstream() {
                    "UPSTREAM_ERROR"
                } else {
                    "INVALID_INPUT"
                };
                CliError {
                    code: code.to_string(),
                    message: e.to_string(),
                    hint: Some("Check metric values and the wake/bed schedule".to_string()),
                }
            }
            BalanceCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check JSON syntax".to_string()),
            },
            BalanceCliError::MissingInput(msg) => CliError {
                code: "MISSING_INPUT".to_string(),
                message: msg,
                hint: Some("Run 'daybalance score --help' for the flag list".to_string()),
            },
        }
    }
}
