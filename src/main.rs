use clap::{Parser, Subcommand};
use sprite_cutter::config::{self, CutterConfig};
use sprite_cutter::extract::{self, ExtractConfig};
use sprite_cutter::imaging::{self, ImageBackend, RustBackend, Threshold};
use sprite_cutter::{inspect, output};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sprite-cutter")]
#[command(about = "Extract trimmed UI sprites from a transparent sprite sheet")]
#[command(long_about = "\
Extract trimmed UI sprites from a transparent sprite sheet

Every region in the region table is padded, cropped, trimmed to its visible
pixels and written as its own PNG:

  processed-assets/ui-elements/
  ├── metadata.json       # source, elements[], total
  ├── atlas.json          # Phaser JSON-hash frames on the source sheet
  ├── panel_victory.png
  └── ...

Regions come from sprite-cutter.toml in the working directory (or --config).
Without one, the stock UI layout is used.

Run 'sprite-cutter gen-config' to generate a documented sprite-cutter.toml.")]
#[command(version)]
struct Cli {
    /// Config file (default: ./sprite-cutter.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// More diagnostics on stderr (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

/// Flags shared by every command that looks at pixels.
#[derive(clap::Args, Clone)]
struct ThresholdArgs {
    /// Alpha cutoff (0-255); pixels above it are content [default: from config]
    #[arg(long)]
    threshold: Option<u8>,
}

#[derive(Subcommand)]
enum Command {
    /// Cut every region of the sheet into its own trimmed PNG
    Extract {
        /// Source sprite sheet
        #[arg(default_value = "processed-assets/ui-extracted/ui-master-highres.png")]
        input: PathBuf,

        /// Directory for sprites, metadata.json and atlas.json
        #[arg(default_value = "processed-assets/ui-elements")]
        output_dir: PathBuf,

        #[command(flatten)]
        threshold: ThresholdArgs,

        /// Margin in pixels added around each region before trimming [default: from config]
        #[arg(long)]
        padding: Option<u32>,

        /// Skip writing atlas.json
        #[arg(long)]
        no_atlas: bool,
    },
    /// Print the content bounds of a sheet
    Bounds {
        input: PathBuf,

        #[command(flatten)]
        threshold: ThresholdArgs,
    },
    /// Report size, color type and content bounds of a sheet or directory
    Inspect {
        path: PathBuf,

        #[command(flatten)]
        threshold: ThresholdArgs,
    },
    /// Print a stock sprite-cutter.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Extract {
            input,
            output_dir,
            threshold,
            padding,
            no_atlas,
        } => {
            let cutter_config = resolve_config(cli.config.as_deref())?;
            init_thread_pool(&cutter_config.processing);

            let mut extract_config = ExtractConfig::from_cutter_config(&cutter_config);
            if let Some(t) = threshold.threshold {
                extract_config.threshold = Threshold::new(t);
            }
            if let Some(p) = padding {
                extract_config.padding = p;
            }
            if no_atlas {
                extract_config.write_atlas = false;
            }

            let (tx, rx) = std::sync::mpsc::channel();
            let printer = std::thread::spawn(move || {
                for event in rx {
                    for line in output::format_process_event(&event) {
                        println!("{}", line);
                    }
                }
            });
            let result = extract::extract(&input, &output_dir, &extract_config, Some(tx))?;
            printer
                .join()
                .map_err(|_| "progress printer thread panicked")?;
            output::print_extract_summary(&result, &output_dir);
        }
        Command::Bounds { input, threshold } => {
            let threshold = resolve_threshold(cli.config.as_deref(), &threshold)?;
            let sheet = RustBackend::new().load(&input)?;
            output::print_bounds(imaging::compute_content_bounds(&sheet.pixels, threshold));
        }
        Command::Inspect { path, threshold } => {
            let threshold = resolve_threshold(cli.config.as_deref(), &threshold)?;
            let reports = inspect::inspect(&RustBackend::new(), &path, threshold)?;
            output::print_inspect(&reports, &path);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Explicit `--config` file, else `sprite-cutter.toml` in the working
/// directory, else stock defaults.
fn resolve_config(explicit: Option<&Path>) -> Result<CutterConfig, config::ConfigError> {
    match explicit {
        Some(path) => config::load_config_file(path),
        None => config::load_config(Path::new(".")),
    }
}

/// CLI flag wins over the config file.
fn resolve_threshold(
    explicit_config: Option<&Path>,
    args: &ThresholdArgs,
) -> Result<Threshold, config::ConfigError> {
    let value = match args.threshold {
        Some(t) => t,
        None => resolve_config(explicit_config)?.extract.threshold,
    };
    Ok(Threshold::new(value))
}

/// Diagnostics go to stderr so stdout stays clean for command output.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("sprite_cutter={level}")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Initialize the rayon thread pool based on processing config.
///
/// Capped at the number of available CPU cores.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
