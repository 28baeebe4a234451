mod config;
mod item;
mod layout;
mod render;

use std::fs;
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use woodtag_core::LabelDocument;
use woodtag_print_client::{
    CombinedSubsystem, CupsSubsystem, DestinationSelector, NetworkSubsystem, PrintError,
    PrinterSink,
};

use crate::config::{AppConfig, PrinterSettings};
use crate::item::{ItemSource, WoodItem};
use crate::render::{Format, failure, render_item_error, status};

/// Environment variable holding the log filter (`tracing` directives).
const LOG_ENV: &str = "WOODTAG_LOG";

// ── CLI definition ──────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "woodtag",
    version,
    about = "Lay out residual-wood inventory tags and print them on label printers"
)]
struct Cli {
    /// Output mode: "pretty" for terminal output, "json" for one
    /// machine-readable JSON object. Defaults to "pretty" when stdout is a
    /// TTY, "json" otherwise.
    #[arg(long, global = true, value_parser = ["pretty", "json"])]
    output: Option<String>,

    /// Path to a JSON configuration file (label stock, printers, styles).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Lay out an item's tag and write the label markup.
    Compose {
        /// Item record (JSON); `-` reads standard input.
        item: String,
        /// Write the markup to this file instead of stdout.
        #[arg(long, short)]
        out: Option<PathBuf>,
    },

    /// Render an item's tag to a PNG image.
    Preview {
        /// Item record (JSON); `-` reads standard input.
        item: String,
        /// Where to write the image.
        #[arg(long, short, default_value = "label.png")]
        out: PathBuf,
    },

    /// Lay out an item's tag and send it to a printer.
    Print {
        /// Item record (JSON); `-` reads standard input.
        item: String,
        /// Destination name (see `destinations`). Overrides the config
        /// file; without either, the first listed destination is used.
        #[arg(long, short)]
        printer: Option<String>,
        /// Compose and bind a destination, but do not send anything.
        #[arg(long)]
        dry_run: bool,
    },

    /// List the printer destinations currently available.
    Destinations,
}

// ── Main ────────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();
    init_tracing();
    let format = Format::resolve_or_detect(cli.output.as_deref());

    if let Err(err) = run(cli, format) {
        failure(format, &err);
        process::exit(1);
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| "warn".into()))
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .init();
}

fn run(cli: Cli, format: Format) -> Result<()> {
    let config = AppConfig::load(cli.config.as_deref())?;
    debug!(?config, "configuration loaded");

    match cli.cmd {
        Cmd::Compose { item, out } => cmd_compose(&item, out.as_deref(), &config, format),
        Cmd::Preview { item, out } => cmd_preview(&item, &out, &config, format),
        Cmd::Print {
            item,
            printer,
            dry_run,
        } => cmd_print(&item, printer.as_deref(), dry_run, &config, format),
        Cmd::Destinations => cmd_destinations(&config, format),
    }
}

// ── Commands ────────────────────────────────────────────────────────────

fn cmd_compose(item: &str, out: Option<&Path>, config: &AppConfig, format: Format) -> Result<()> {
    let (item, label) = compose(item, config, format)?;
    let zpl = label.serialize();

    match out {
        Some(path) => {
            fs::write(path, &zpl).with_context(|| format!("failed to write {}", path.display()))?;
            status(
                format,
                &format!("wrote tag for item {} to {}", item.id(), path.display()),
                json!({
                    "id": item.id(),
                    "path": path.display().to_string(),
                    "bytes": zpl.len(),
                    "elements": label.elements().len(),
                }),
            );
        }
        // The markup itself is the output, whatever the format.
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(zpl.as_bytes())
                .and_then(|()| stdout.flush())
                .context("failed to write label to stdout")?;
        }
    }
    Ok(())
}

fn cmd_preview(item: &str, out: &Path, config: &AppConfig, format: Format) -> Result<()> {
    let (item, label) = compose(item, config, format)?;
    let image = label.preview().context("failed to render preview")?;
    image
        .save_png(out)
        .with_context(|| format!("failed to write {}", out.display()))?;

    status(
        format,
        &format!(
            "wrote {}x{} preview of item {} to {}",
            image.width(),
            image.height(),
            item.id(),
            out.display()
        ),
        json!({
            "id": item.id(),
            "path": out.display().to_string(),
            "width": image.width(),
            "height": image.height(),
        }),
    );
    Ok(())
}

fn cmd_print(
    item: &str,
    printer: Option<&str>,
    dry_run: bool,
    config: &AppConfig,
    format: Format,
) -> Result<()> {
    let (item, label) = compose(item, config, format)?;
    let zpl = label.serialize();

    let selector = DestinationSelector::from_name(printer.or(config.printer.name.as_deref()));
    let mut sink = PrinterSink::new(subsystem(&config.printer)?);
    let destination = sink
        .bind(&selector)
        .map_err(operator_hint)
        .with_context(|| format!("cannot choose a printer ({selector})"))?;

    if dry_run {
        status(
            format,
            &format!(
                "dry run: tag for item {} ({} bytes) would print on {destination}",
                item.id(),
                zpl.len()
            ),
            json!({
                "dry_run": true,
                "id": item.id(),
                "destination": destination,
                "bytes": zpl.len(),
            }),
        );
        return Ok(());
    }

    sink.send(zpl.as_bytes())
        .map_err(operator_hint)
        .with_context(|| format!("failed to print on {destination}"))?;

    status(
        format,
        &format!("printed tag for item {} on {destination}", item.id()),
        json!({
            "dry_run": false,
            "id": item.id(),
            "destination": destination,
            "bytes": zpl.len(),
        }),
    );
    Ok(())
}

fn cmd_destinations(config: &AppConfig, format: Format) -> Result<()> {
    let mut sink = PrinterSink::new(subsystem(&config.printer)?);
    let destinations = sink
        .list_destinations()
        .map_err(operator_hint)
        .context("cannot list printer destinations")?;

    match format {
        Format::Pretty => {
            if destinations.is_empty() {
                eprintln!("no printer destinations found");
            }
            for destination in &destinations {
                println!("{destination}");
            }
        }
        Format::Json => println!("{}", json!({ "success": true, "destinations": destinations })),
    }
    Ok(())
}

// ── Helpers ─────────────────────────────────────────────────────────────

/// Read and validate an item record, then lay out its tag.
fn compose(path: &str, config: &AppConfig, format: Format) -> Result<(WoodItem, LabelDocument)> {
    let source = ItemSource::read(path)?;
    let item = match WoodItem::parse(&source.text) {
        Ok(item) => item,
        Err(err) => {
            if format == Format::Pretty {
                render_item_error(&source, &err);
            }
            return Err(
                anyhow::Error::new(err).context(format!("invalid item record {}", source.name))
            );
        }
    };
    item.validate()
        .with_context(|| format!("invalid item record {}", source.name))?;

    let logo = config
        .layout
        .logo
        .as_deref()
        .map(layout::load_logo)
        .transpose()?;
    let label = layout::wood_tag(&item, config, logo.as_ref())
        .with_context(|| format!("cannot lay out tag for item {}", item.id()))?;
    Ok((item, label))
}

/// Every configured subsystem, CUPS queues first.
fn subsystem(settings: &PrinterSettings) -> Result<CombinedSubsystem> {
    let mut combined = CombinedSubsystem::new();
    if settings.cups {
        combined = combined.with(Box::new(CupsSubsystem::new()));
    }
    if !settings.network.is_empty() {
        let network = NetworkSubsystem::new(settings.network.clone(), settings.transport())
            .context("invalid network printer configuration")?;
        combined = combined.with(Box::new(network));
    }
    Ok(combined)
}

/// Spell out what to do about destination errors nobody can fix by
/// trying again.
fn operator_hint(err: PrintError) -> anyhow::Error {
    let hint = match &err {
        PrintError::NoDestination => {
            "add a printer queue or configure a network printer, then try again"
        }
        PrintError::UnknownDestination(_) => {
            "run `woodtag destinations` to see the available names"
        }
        _ => return anyhow::Error::new(err),
    };
    anyhow::anyhow!("{err}; {hint}")
}
