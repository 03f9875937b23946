//! Run command - decode the input files, run the model, report results.

use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::info;

use nimbus_core::pipeline::{self, SURFACE_INPUT, UPPER_INPUT};
use nimbus_core::{DemoConfig, FsByteSource, OrtBackend, ProviderSetting};

/// Arguments for the run command.
#[derive(Args)]
pub struct RunArgs {
    /// ONNX model file (overrides config)
    #[arg(short, long)]
    model: Option<PathBuf>,

    /// Surface-variables NPY file (overrides config)
    #[arg(short, long)]
    surface: Option<PathBuf>,

    /// Upper-air-variables NPY file (overrides config)
    #[arg(short, long)]
    upper: Option<PathBuf>,

    /// Execution provider
    #[arg(long, value_enum)]
    provider: Option<Provider>,

    /// Intra-op thread count
    #[arg(long)]
    threads: Option<usize>,

    /// Emit the report as JSON instead of a text summary
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum Provider {
    Cpu,
    Xnnpack,
}

pub async fn run(args: RunArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let mut config = if let Some(path) = config_path {
        DemoConfig::from_file(std::path::Path::new(path))?
    } else {
        DemoConfig::default()
    };

    if let Some(model) = args.model {
        config.model_path = model;
    }
    if let Some(surface) = args.surface {
        config.surface_path = surface;
    }
    if let Some(upper) = args.upper {
        config.upper_path = upper;
    }
    if let Some(provider) = args.provider {
        config.session.execution_provider = match provider {
            Provider::Cpu => ProviderSetting::Cpu,
            Provider::Xnnpack => ProviderSetting::Xnnpack,
        };
    }
    if let Some(threads) = args.threads {
        config.session.intra_threads = threads;
    }

    if !config.model_path.exists() {
        anyhow::bail!("Model file not found: {}", config.model_path.display());
    }

    let load_start = Instant::now();
    let backend = OrtBackend::from_file(&config.model_path, &config.session.to_options())?;
    let load_ms = load_start.elapsed().as_millis();
    info!("Session created in {} ms", load_ms);

    let source = FsByteSource::new()
        .with_path(SURFACE_INPUT, &config.surface_path)
        .with_path(UPPER_INPUT, &config.upper_path);

    let run_start = Instant::now();
    let report = pipeline::run_forecast(&backend, &source)?;
    let run_ms = run_start.elapsed().as_millis();

    if args.json {
        #[derive(serde::Serialize)]
        struct TimedReport {
            session_ms: u128,
            run_ms: u128,
            #[serde(flatten)]
            report: nimbus_core::ForecastReport,
        }
        println!(
            "{}",
            serde_json::to_string_pretty(&TimedReport {
                session_ms: load_ms,
                run_ms,
                report,
            })?
        );
        return Ok(());
    }

    println!("{}", style("Inputs").bold());
    for input in &report.inputs {
        println!(
            "  {}  {} {:?}  ({} elements)",
            style(&input.name).cyan(),
            input.dtype,
            input.shape,
            input.element_count
        );
    }

    println!("{}", style("Outputs").bold());
    for output in &report.outputs {
        println!(
            "  {}  {} {:?}  ({} elements)",
            style(&output.name).cyan(),
            output.dtype,
            output.shape,
            output.element_count
        );
    }

    println!(
        "Session load: {} ms, decode + inference: {} ms",
        style(load_ms).green(),
        style(run_ms).green()
    );

    Ok(())
}
