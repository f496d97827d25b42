use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use log::{info, warn};

use paper_mix_rust_lib::capture_gate::{CaptureEvidence, CaptureGateKind};
use paper_mix_rust_lib::config::Config;
use paper_mix_rust_lib::image_io::{get_image_files_in_dir, load_image, InputImage};
use paper_mix_rust_lib::output::{append_batch_summary, format_report, write_images_csv, write_report_json};
use paper_mix_rust_lib::workflow::run_batch;

/// Command-line arguments
#[derive(Parser, Debug)]
#[clap(author, version, about = "PaperMix - cardboard/newsprint estimate for waste-paper loads")]
struct Args {
    /// Path to an input photo or a directory of photos
    #[clap(short, long)]
    input: Option<String>,

    /// Path to output directory
    #[clap(short, long)]
    output: Option<String>,

    /// Path to configuration file
    #[clap(short, long, default_value = "config.toml")]
    config: String,

    /// Write the effective configuration to --config and exit
    #[clap(long)]
    init_config: bool,

    /// Use the plate-station preset (threshold 49, five photos, camera capture)
    #[clap(long)]
    plate_station: bool,

    /// Cardboard threshold in percent (overwrites config)
    #[clap(short, long)]
    threshold: Option<f64>,

    /// Bale only when the average is strictly above the threshold
    #[clap(long)]
    exclusive: bool,

    /// Required number of photos per batch (overwrites config)
    #[clap(short, long)]
    batch_size: Option<usize>,

    /// Capture gate (overwrites config)
    #[clap(short, long)]
    gate: Option<GateArg>,

    /// Camera capture of the licence plate
    #[clap(long)]
    camera_capture: Option<PathBuf>,

    /// Plate text read from the camera capture
    #[clap(long)]
    plate_text: Option<String>,

    /// Also write report.json
    #[clap(long)]
    json: bool,

    /// Enable debug mode (save masks and print more info)
    #[clap(short, long)]
    debug: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum GateArg {
    None,
    Camera,
    Plate,
}

impl From<GateArg> for CaptureGateKind {
    fn from(arg: GateArg) -> Self {
        match arg {
            GateArg::None => CaptureGateKind::None,
            GateArg::Camera => CaptureGateKind::CameraRequired,
            GateArg::Plate => CaptureGateKind::PlateRecognitionRequired,
        }
    }
}

fn load_config(args: &Args) -> anyhow::Result<Config> {
    let mut config = if args.plate_station {
        Config::plate_station()
    } else if PathBuf::from(&args.config).is_file() {
        Config::from_file(&args.config)?
    } else {
        warn!("Could not load {}, using defaults", args.config);
        Config::default()
    };

    // Override config with command-line arguments
    if let Some(input) = args.input.clone() {
        config.input_path = input;
    }
    if let Some(output) = args.output.clone() {
        config.output_base_dir = output;
    }
    if let Some(threshold) = args.threshold {
        config.threshold = threshold;
    }
    if args.exclusive {
        config.threshold_inclusive = false;
    }
    if let Some(batch_size) = args.batch_size {
        config.batch_size = Some(batch_size);
    }
    if let Some(gate) = args.gate {
        config.capture_gate = gate.into();
    }

    Ok(config)
}

fn collect_inputs(config: &Config) -> anyhow::Result<Vec<InputImage>> {
    let input_path = PathBuf::from(&config.input_path);

    let paths = if input_path.is_file() {
        vec![input_path]
    } else if input_path.is_dir() {
        let files = get_image_files_in_dir(&input_path)?;
        info!("Found {} photos in {}", files.len(), input_path.display());
        files
    } else {
        bail!("Input path {} does not exist", input_path.display());
    };

    paths
        .iter()
        .map(|path| load_image(path).with_context(|| format!("Error loading {}", path.display())))
        .collect()
}

/// Main function
fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let default_level = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    let config = load_config(&args)?;

    if args.init_config {
        config.save_to_file(&args.config)?;
        println!("Configuration written to {}", args.config);
        return Ok(());
    }

    config.validate()?;

    let start_time = Instant::now();

    let inputs = collect_inputs(&config)?;
    let evidence = CaptureEvidence {
        camera_capture: args.camera_capture.clone(),
        plate_text: args.plate_text.clone(),
    };

    let report = run_batch(inputs, &config, &evidence, args.debug)?;

    for line in format_report(&report) {
        println!("{}", line);
    }

    let output_base = PathBuf::from(&config.output_base_dir);
    write_images_csv(&report, &output_base)?;
    append_batch_summary(&report, &config, &output_base, &config.input_path)?;
    if args.json {
        write_report_json(&report, &output_base)?;
    }

    let elapsed = start_time.elapsed();
    info!("Processing completed in {:.2} seconds", elapsed.as_secs_f64());

    Ok(())
}
