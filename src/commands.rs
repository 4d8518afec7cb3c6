//! Command handlers

use crate::capture::{CaptureState, PhotoWorkflow};
use crate::camera::DefaultCamera;
use crate::cli::{Cli, Commands, OutputFormat};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::formula;
use crate::output::output_report;
use crate::types::{CaptureOutcome, EstimateReport};
use crate::vision::{GeminiEstimator, WeightEstimator};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Execute CLI command
pub fn execute(cli: Cli) -> Result<()> {
    // Load config
    let mut config = Config::load()?;

    // Override from CLI args
    if cli.model.is_some() {
        config.model = cli.model.clone();
    }

    let output_format = cli.format.unwrap_or(config.output_format);

    match &cli.command {
        Commands::Analyze { image } => cmd_analyze(&cli, &config, image.clone(), output_format),

        Commands::Girth { value } => cmd_girth(value, output_format),

        Commands::Capture { output, no_analyze } => {
            cmd_capture(&cli, &config, output.clone(), *no_analyze, output_format)
        }

        Commands::Config {
            show,
            set_model,
            set_api_key,
            set_camera_device,
            set_output,
            reset,
        } => cmd_config(
            *show,
            set_model.clone(),
            set_api_key.clone(),
            set_camera_device.clone(),
            *set_output,
            *reset,
        ),
    }
}

fn cmd_analyze(
    cli: &Cli,
    config: &Config,
    image: PathBuf,
    output_format: OutputFormat,
) -> Result<()> {
    let payload = read_image(&image)?;

    if cli.verbose {
        eprintln!("Analyzing image: {}", image.display());
    }

    let estimator = GeminiEstimator::from_config(config)?;
    let estimate = with_spinner("Consultando IA...", || estimator.estimate(&payload))?;

    output_report(output_format, &EstimateReport::from_photo(estimate))
}

fn cmd_girth(value: &str, output_format: OutputFormat) -> Result<()> {
    let girth = formula::parse_girth(value)?;
    let weight = formula::weight_from_girth(girth)?;

    output_report(output_format, &EstimateReport::from_girth(girth, weight))
}

fn cmd_capture(
    cli: &Cli,
    config: &Config,
    output: Option<PathBuf>,
    no_analyze: bool,
    output_format: OutputFormat,
) -> Result<()> {
    let mut workflow = PhotoWorkflow::new(DefaultCamera::from_config(config));

    workflow.start_camera()?;
    if cli.verbose {
        eprintln!("Camera active, capturing frame...");
    }
    workflow.capture_frame()?;

    if let Some(ref path) = output {
        let frame = workflow.frame().ok_or(Error::NoFrameCaptured)?;
        std::fs::write(path, frame.as_slice())?;
        if cli.verbose {
            eprintln!("Frame saved to {}", path.display());
        }
    }

    if no_analyze {
        return Ok(());
    }

    let estimator = GeminiEstimator::from_config(config)?;
    let ticket = workflow.begin_analysis()?;
    let result = with_spinner("Consultando IA...", || estimator.estimate(&ticket.frame));
    workflow.finish_analysis(ticket.attempt, result);

    match workflow.state() {
        CaptureState::Done(CaptureOutcome::Success(estimate)) => {
            output_report(output_format, &EstimateReport::from_photo(estimate.clone()))
        }
        CaptureState::Done(CaptureOutcome::Error(msg)) => Err(Error::AnalysisFailed(msg.clone())),
        other => Err(Error::AnalysisFailed(format!(
            "unexpected workflow state: {:?}",
            other
        ))),
    }
}

fn cmd_config(
    show: bool,
    set_model: Option<String>,
    set_api_key: Option<String>,
    set_camera_device: Option<String>,
    set_output: Option<OutputFormat>,
    reset: bool,
) -> Result<()> {
    let mut config = if reset {
        Config::default()
    } else {
        Config::load()?
    };

    let mut changed = reset;

    if let Some(model) = set_model {
        config.model = Some(model);
        changed = true;
    }
    if let Some(api_key) = set_api_key {
        config.api_key = Some(api_key);
        changed = true;
    }
    if let Some(device) = set_camera_device {
        config.camera_device = Some(device);
        changed = true;
    }
    if let Some(format) = set_output {
        config.output_format = format;
        changed = true;
    }

    if changed {
        config.save()?;
        println!("Configuration saved.");
    }

    if show || !changed {
        print!("{}", config);
    }

    Ok(())
}

/// Read an image file and confirm it is in a recognizable format.
fn read_image(path: &Path) -> Result<Vec<u8>> {
    if !path.exists() {
        return Err(Error::FileNotFound(path.display().to_string()));
    }
    let payload = std::fs::read(path)?;
    image::guess_format(&payload)
        .map_err(|_| Error::InvalidImageFormat(path.display().to_string()))?;
    Ok(payload)
}

fn with_spinner<T>(message: &str, f: impl FnOnce() -> T) -> T {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = f();

    spinner.finish_and_clear();
    result
}
