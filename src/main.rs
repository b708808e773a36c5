use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use tracing::info;

use tracelen::{init_logging, measure_path_lengths, Layout, RunConfig, BUILD_DATE, VERSION};

fn usage() -> String {
    format!(
        "tracelen {VERSION} (built {BUILD_DATE})\n\
         Extracts path lengths between labeled ports in a 2D polygon layout.\n\n\
         Usage: tracelen <config.toml>"
    )
}

fn parse_args() -> Result<PathBuf> {
    let mut args = env::args().skip(1);
    match (args.next(), args.next()) {
        (Some(flag), _) if flag == "-h" || flag == "--help" => {
            println!("{}", usage());
            std::process::exit(0);
        }
        (Some(path), None) => Ok(PathBuf::from(path)),
        _ => bail!("{}", usage()),
    }
}

fn main() -> Result<()> {
    init_logging()?;
    let config_path = parse_args()?;
    let config = RunConfig::load(&config_path)?;

    if !config.layout_file.is_file() {
        bail!(
            "layout file not found: {}",
            config.layout_file.display()
        );
    }
    let raw = fs::read_to_string(&config.layout_file)
        .with_context(|| format!("failed to read {}", config.layout_file.display()))?;
    let layout: Layout = serde_json::from_str(&raw)
        .with_context(|| format!("invalid layout snapshot {}", config.layout_file.display()))?;
    info!(
        layout = %config.layout_file.display(),
        cells = layout.cells.len(),
        "loaded layout snapshot"
    );

    let report = measure_path_lengths(&layout, &config.measure_params())?;
    print!("{report}");

    if let Some(out) = &config.report_file {
        fs::write(out, report.to_csv_string())
            .with_context(|| format!("failed to write report to {}", out.display()))?;
        info!(report = %out.display(), "report written");
    }
    Ok(())
}
