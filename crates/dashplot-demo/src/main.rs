// File: crates/dashplot-demo/src/main.rs
// Summary: `dashplot` entry point; ingests a file or URL, mounts the chart, and writes it as PNG.

mod cli;

use std::io;
use std::rc::Rc;

use anyhow::{Context, Result};
use clap::Parser;
use dashplot_core::{ChartEnv, FrameQueue, Series, Stack, ThemeSwitch};
use dashplot_ingest::{ingest, ChartLoader, HttpFetcher, Mounted, Source};
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;

/// Frames pumped before giving up on a surface that never gets drawn.
const MAX_FRAMES: usize = 8;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).try_init();

    let source = Source::from_arg(&cli.input);
    let fetcher = HttpFetcher::new().context("creating HTTP client")?;

    if cli.dump_series {
        let ingested = ingest(&source, &cli.ingest_options(), &fetcher)
            .with_context(|| format!("failed to ingest '{}'", source.describe()))?;
        eprintln!("{:?}", ingested.report);
        return dump_series(&ingested.series());
    }

    let opts = cli.chart_options()?;
    let queue = Rc::new(FrameQueue::new());
    let theme = Rc::new(ThemeSwitch::new(cli.theme));
    let env = ChartEnv::new(theme, queue.clone());
    let stack = Stack::new();
    let loader = ChartLoader::new(&stack, &env, &fetcher);

    let mounted = if cli.is_ping_log() {
        loader.ping_log(&source, opts)
    } else {
        loader.chart_file(&source, cli.kind, &cli.ingest_options(), opts)
    };
    let handle = match mounted {
        Mounted::Chart(handle) => handle,
        Mounted::Note(note) => {
            eprintln!("{note}");
            anyhow::bail!("no chart rendered for '{}'", source.describe());
        }
    };

    let surface = handle.surface();
    surface.set_device_pixel_ratio(cli.dpr);
    surface.set_layout_width(cli.width);
    let frames = queue.run_until_idle(MAX_FRAMES);
    let stats = handle.stats();
    tracing::info!(frames, draws = stats.draws, failures = stats.failures, "frames pumped");
    if stats.draws == 0 {
        anyhow::bail!("chart was never drawn ({} failed draws)", stats.failures);
    }

    surface.write_png(&cli.out).with_context(|| format!("writing {}", cli.out.display()))?;
    println!("Wrote {} ({} points)", cli.out.display(), handle.series().len());
    Ok(())
}

fn dump_series(series: &Series) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(io::stdout());
    wtr.write_record(["label", "value"])?;
    for (label, value) in series.iter() {
        wtr.write_record([label, value.to_string().as_str()])?;
    }
    wtr.flush()?;
    Ok(())
}
