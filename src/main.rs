//! franchise-ranker: weighted multi-metric ranking for franchise candidates
//!
//! Scores a catalog of titles against a tunable weighted formula and reports
//! the ranking as text, JSON, CSV or an interactive dashboard.

#![allow(clippy::too_many_lines, clippy::needless_pass_by_value)]

use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use franchise_ranker::{
    cli::{self, RankingInputs},
    config::{
        self,
        file::{user_config_dir, CONFIG_FILE_NAMES},
        AppConfig, ExplicitScoring, WeightPreset,
    },
    model::{MetricKey, RegionFilter},
    pipeline::{exit_codes, WeightOverride},
    reports::{ReportFormat, WeightsFormat},
};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Build long version string with metric and format info
const fn build_long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        "\n\nMetrics:",
        "\n  completionRate, rewatchRate, returnRate7d,",
        "\n  multiRegionStrength, audienceBreadth, bingeIntensity",
        "\n\nRegions:",
        "\n  Global, US, UK, BR, JP, DE, KR",
        "\n\nOutput Formats:",
        "\n  tui, table, summary, json, csv, markdown"
    )
}

#[derive(Parser)]
#[command(name = "franchise-ranker")]
#[command(version, long_version = build_long_version())]
#[command(about = "Weighted multi-metric ranking for franchise candidates", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Success
    1  Top score below --min-top-score / catalog issues found
    3  Error occurred

EXAMPLES:
    # Rank the built-in catalog with the default formula
    franchise-ranker rank

    # Lean on completion rate and rank within Japan
    franchise-ranker rank --weight completion-rate=0.5 --region JP

    # Deep dive into one title
    franchise-ranker inspect neon-harbor

    # Save a rebalanced weight vector for later runs
    franchise-ranker rebalance rewatch-rate 0.3 --format yaml -O weights.yaml
    franchise-ranker rank --weights weights.yaml -o json")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output (also respects `NO_COLOR` env)
    #[arg(long, global = true)]
    no_color: bool,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

// ============================================================================
// Shared argument groups
// ============================================================================

/// Where the titles come from and how they are weighted
#[derive(Args)]
struct RankingArgs {
    /// Catalog file (JSON or YAML); the built-in catalog when omitted
    #[arg(long, env = "FRANCHISE_RANKER_CATALOG")]
    catalog: Option<PathBuf>,

    /// Named weight preset
    #[arg(long, value_enum)]
    preset: Option<WeightPreset>,

    /// Weights file (JSON or YAML); overrides the preset
    #[arg(long = "weights", value_name = "FILE")]
    weights_file: Option<PathBuf>,

    /// Set one weight, rebalancing the rest (repeatable)
    #[arg(long = "weight", value_name = "METRIC=VALUE")]
    overrides: Vec<WeightOverride>,

    /// Filter context: Global or a region code (US, UK, BR, JP, DE, KR)
    #[arg(long)]
    region: Option<RegionFilter>,
}

/// Report destination and shape
#[derive(Args)]
struct OutputArgs {
    /// Output format
    #[arg(short, long, default_value = "auto")]
    output: ReportFormat,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// Only report the top N titles
    #[arg(long)]
    limit: Option<usize>,
}

// ============================================================================
// Subcommands
// ============================================================================

#[derive(Subcommand)]
enum Commands {
    /// Rank every title under the current weights
    Rank {
        #[command(flatten)]
        ranking: RankingArgs,

        #[command(flatten)]
        output: OutputArgs,

        /// Score at or above which a title counts as a strong contender
        #[arg(long)]
        strong_threshold: Option<f64>,

        /// Exit with code 1 when the top score is below this value
        #[arg(long)]
        min_top_score: Option<f64>,
    },

    /// Show one title's metrics, contributions and rank
    Inspect {
        /// Title id or name
        title: String,

        #[command(flatten)]
        ranking: RankingArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Set one metric's weight and print the rebalanced vector
    Rebalance {
        /// Metric to set
        metric: MetricKey,

        /// New weight, clamped to [0, 1]
        value: f64,

        /// Named weight preset to start from
        #[arg(long, value_enum)]
        preset: Option<WeightPreset>,

        /// Weights file to start from
        #[arg(long = "weights", value_name = "FILE")]
        weights_file: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "table")]
        format: WeightsFormat,

        /// Output file path (stdout if not specified)
        #[arg(short = 'O', long)]
        output_file: Option<PathBuf>,
    },

    /// Print the effective weight vector or list the presets
    Weights {
        /// Named weight preset
        #[arg(long, value_enum)]
        preset: Option<WeightPreset>,

        /// Weights file (JSON or YAML)
        #[arg(long = "weights", value_name = "FILE")]
        weights_file: Option<PathBuf>,

        /// Set one weight, rebalancing the rest (repeatable)
        #[arg(long = "weight", value_name = "METRIC=VALUE")]
        overrides: Vec<WeightOverride>,

        /// Output format
        #[arg(long, value_enum, default_value = "table")]
        format: WeightsFormat,

        /// List every named preset instead
        #[arg(long)]
        presets: bool,

        /// Output file path (stdout if not specified)
        #[arg(short = 'O', long)]
        output_file: Option<PathBuf>,
    },

    /// Show how each title's rank moves between Global and every region
    Compare {
        #[command(flatten)]
        ranking: RankingArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Open the interactive dashboard (summary report when not a terminal)
    Dashboard {
        #[command(flatten)]
        ranking: RankingArgs,

        /// Output format (auto opens the dashboard on a terminal)
        #[arg(short, long, default_value = "auto")]
        output: ReportFormat,

        /// Color theme: dark or light
        #[arg(long)]
        theme: Option<String>,

        /// Amount one key press moves a weight slider
        #[arg(long)]
        step: Option<f64>,
    },

    /// Check a catalog file for problems
    Validate {
        /// Catalog file; the built-in catalog when omitted
        catalog: Option<PathBuf>,

        /// Output format (table or json)
        #[arg(short, long, default_value = "table")]
        output: ReportFormat,

        /// Output file path (stdout if not specified)
        #[arg(short = 'O', long)]
        output_file: Option<PathBuf>,

        /// Treat warnings as failures
        #[arg(long)]
        strict: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Generate JSON Schema for the config file format
    ConfigSchema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show, discover, or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Sub-subcommands for the `config` command
#[derive(Subcommand)]
enum ConfigAction {
    /// Print current effective configuration (merged from defaults + file)
    Show,
    /// Print config file search paths and discovered config file
    Path,
    /// Generate an example .franchise-ranker.yaml in the current directory
    Init,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(exit_codes::ERROR);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Rank {
            ranking,
            output,
            strong_threshold,
            min_top_score,
        } => {
            let mut overrides = ranking_overrides(cli.no_color);
            apply_output(&mut overrides, &output);
            let explicit = ExplicitScoring {
                strong_threshold,
                ..explicit_scoring(&ranking)
            };
            let config = load_config(cli.config.as_ref(), &overrides, &explicit)?;

            let exit_code = cli::run_rank(&config, &inputs(ranking, cli.quiet), min_top_score)?;
            exit_if_nonzero(exit_code);
            Ok(())
        }

        Commands::Inspect {
            title,
            ranking,
            output,
        } => {
            let mut overrides = ranking_overrides(cli.no_color);
            apply_output(&mut overrides, &output);
            let config =
                load_config(cli.config.as_ref(), &overrides, &explicit_scoring(&ranking))?;
            cli::run_inspect(&config, &inputs(ranking, cli.quiet), &title)
        }

        Commands::Rebalance {
            metric,
            value,
            preset,
            weights_file,
            format,
            output_file,
        } => {
            let mut overrides = AppConfig::default();
            overrides.output.file = output_file;
            let explicit = ExplicitScoring {
                preset,
                ..ExplicitScoring::default()
            };
            let config = load_config(cli.config.as_ref(), &overrides, &explicit)?;
            cli::run_rebalance(&config, weights_file.as_deref(), metric, value, format)
        }

        Commands::Weights {
            preset,
            weights_file,
            overrides: weight_overrides,
            format,
            presets,
            output_file,
        } => {
            let mut overrides = AppConfig::default();
            overrides.output.file = output_file;
            let explicit = ExplicitScoring {
                preset,
                ..ExplicitScoring::default()
            };
            let config = load_config(cli.config.as_ref(), &overrides, &explicit)?;
            cli::run_weights(
                &config,
                weights_file.as_deref(),
                &weight_overrides,
                format,
                presets,
            )
        }

        Commands::Compare { ranking, output } => {
            let mut overrides = ranking_overrides(cli.no_color);
            apply_output(&mut overrides, &output);
            let config =
                load_config(cli.config.as_ref(), &overrides, &explicit_scoring(&ranking))?;
            cli::run_compare(&config, &inputs(ranking, cli.quiet))
        }

        Commands::Dashboard {
            ranking,
            output,
            theme,
            step,
        } => {
            let mut overrides = ranking_overrides(cli.no_color);
            overrides.output.format = output;
            if let Some(theme) = theme {
                overrides.tui.theme = theme;
            }
            if let Some(step) = step {
                overrides.tui.slider_step = step;
            }
            let config =
                load_config(cli.config.as_ref(), &overrides, &explicit_scoring(&ranking))?;
            cli::run_dashboard(&config, &inputs(ranking, cli.quiet))
        }

        Commands::Validate {
            catalog,
            output,
            output_file,
            strict,
        } => {
            let exit_code = cli::run_validate(catalog.as_deref(), output, output_file, strict)?;
            exit_if_nonzero(exit_code);
            Ok(())
        }

        Commands::Completions { shell } => {
            generate(
                shell,
                &mut Cli::command(),
                "franchise-ranker",
                &mut io::stdout(),
            );
            Ok(())
        }

        Commands::ConfigSchema { output } => {
            let schema = config::generate_json_schema()?;
            match output {
                Some(path) => {
                    std::fs::write(&path, &schema)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    eprintln!("Schema written to {}", path.display());
                }
                None => {
                    println!("{schema}");
                }
            }
            Ok(())
        }

        Commands::Config { action } => match action {
            ConfigAction::Show => {
                let (config, loaded_from) = config::load_or_default(cli.config.as_deref());
                if let Some(path) = &loaded_from {
                    eprintln!("# Loaded from: {}", path.display());
                } else {
                    eprintln!("# No config file found; showing defaults");
                }
                let yaml = serde_yaml::to_string(&config).context("failed to serialize config")?;
                print!("{yaml}");
                Ok(())
            }
            ConfigAction::Path => {
                let search_paths: [Option<String>; 3] = [
                    std::env::current_dir()
                        .ok()
                        .map(|p| p.display().to_string()),
                    user_config_dir().map(|p| p.display().to_string()),
                    dirs::home_dir().map(|p| p.display().to_string()),
                ];
                eprintln!("Config file search paths (in order):");
                for path in search_paths.into_iter().flatten() {
                    eprintln!("  {path}");
                }
                eprintln!("  (plus the git repository root, after the current directory)");
                eprintln!();
                eprintln!("Recognized file names:");
                for name in CONFIG_FILE_NAMES {
                    eprintln!("  {name}");
                }
                eprintln!();
                match config::discover_config_file(cli.config.as_deref()) {
                    Some(path) => eprintln!("Active config file: {}", path.display()),
                    None => eprintln!("No config file found."),
                }
                Ok(())
            }
            ConfigAction::Init => {
                let target = std::env::current_dir()
                    .context("cannot determine current directory")?
                    .join(".franchise-ranker.yaml");
                if target.exists() {
                    anyhow::bail!(
                        "{} already exists. Remove it first to re-initialize.",
                        target.display()
                    );
                }
                let content = config::generate_full_example_config();
                std::fs::write(&target, content)
                    .with_context(|| format!("failed to write {}", target.display()))?;
                eprintln!("Created {}", target.display());
                Ok(())
            }
        },
    }
}

/// Initialize logging; `RUST_LOG` wins over the verbosity flags.
fn init_logging(verbose: bool, quiet: bool) {
    let log_level = if verbose {
        "debug"
    } else if quiet {
        "warn"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();
}

/// Config overrides shared by the ranking commands.
fn ranking_overrides(no_color: bool) -> AppConfig {
    let mut overrides = AppConfig::default();
    overrides.output.no_color = no_color;
    overrides
}

/// Scoring values the shared ranking flags name explicitly.
fn explicit_scoring(args: &RankingArgs) -> ExplicitScoring {
    ExplicitScoring {
        preset: args.preset,
        region: args.region,
        strong_threshold: None,
    }
}

fn apply_output(overrides: &mut AppConfig, args: &OutputArgs) {
    overrides.output.format = args.output;
    overrides.output.file.clone_from(&args.output_file);
    overrides.output.limit = args.limit;
}

/// Layer the overrides on the discovered config file and validate the result.
///
/// Explicit scoring flags always win, even when they name a default value.
fn load_config(
    path: Option<&PathBuf>,
    overrides: &AppConfig,
    explicit: &ExplicitScoring,
) -> Result<AppConfig> {
    let (mut config, loaded_from) =
        AppConfig::from_file_with_overrides(path.map(PathBuf::as_path), overrides);
    config.apply_explicit(explicit);
    if let Some(path) = &loaded_from {
        tracing::debug!("Using config file {}", path.display());
    }

    Ok(config.validated()?)
}

fn inputs(args: RankingArgs, quiet: bool) -> RankingInputs {
    RankingInputs {
        catalog: args.catalog,
        weights_file: args.weights_file,
        overrides: args.overrides,
        quiet,
    }
}

fn exit_if_nonzero(exit_code: i32) {
    if exit_code != exit_codes::SUCCESS {
        std::process::exit(exit_code);
    }
}
