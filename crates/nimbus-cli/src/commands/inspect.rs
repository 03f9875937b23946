//! Inspect command - print an NPY file's header facts.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;

use nimbus_core::npy;

/// Arguments for the inspect command.
#[derive(Args)]
pub struct InspectArgs {
    /// NPY file to inspect
    #[arg(required = true)]
    input: PathBuf,

    /// Emit JSON instead of a text summary
    #[arg(long)]
    json: bool,
}

pub async fn run(args: InspectArgs) -> anyhow::Result<()> {
    let bytes = fs::read(&args.input)
        .map_err(|e| anyhow::anyhow!("failed to read {}: {}", args.input.display(), e))?;

    let info = npy::inspect(&bytes)?;

    if args.json {
        #[derive(serde::Serialize)]
        struct InspectReport {
            version: String,
            shape: Vec<usize>,
            element_count: usize,
            payload_bytes: usize,
        }
        println!(
            "{}",
            serde_json::to_string_pretty(&InspectReport {
                version: format!("{}.{}", info.major, info.minor),
                shape: info.shape,
                element_count: info.element_count,
                payload_bytes: info.payload_bytes,
            })?
        );
        return Ok(());
    }

    println!("{}", style(args.input.display()).bold());
    println!("  version:  {}.{}", info.major, info.minor);
    println!("  shape:    {:?}", info.shape);
    println!("  elements: {}", info.element_count);
    println!("  payload:  {} bytes", info.payload_bytes);

    Ok(())
}
