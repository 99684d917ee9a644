use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser, Subcommand};
use vidscribe::Config;
use vidscribe::draw::{DrawingElement, RasterSurface, render};
use vidscribe::live::ReplayRenderer;
use vidscribe::persist::{Payload, PayloadFile, read_payload_file};

#[derive(Parser, Debug)]
#[command(name = "vidscribe")]
#[command(version, about = "Video annotation drawing and replay engine")]
struct Cli {
    /// Use this config file instead of ~/.config/vidscribe/config.toml
    #[arg(long, short = 'c', value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a saved payload to PNG
    Render {
        /// Payload file written by the directory store
        payload: PathBuf,

        /// Output PNG path
        #[arg(long, short = 'o', value_name = "FILE")]
        output: PathBuf,

        /// Session-relative time for live payloads (defaults to the end)
        #[arg(long, short = 't', value_name = "SECONDS")]
        time: Option<f64>,

        /// Output width (defaults to the payload canvas width)
        #[arg(long, value_name = "PX")]
        width: Option<i32>,

        /// Output height (defaults to the payload canvas height)
        #[arg(long, value_name = "PX")]
        height: Option<i32>,
    },

    /// Print the searchable text of a payload
    Text { payload: PathBuf },

    /// Summarize a payload
    Info { payload: PathBuf },

    /// Show or initialize the config file
    Config {
        /// Write a default config file if none exists
        #[arg(long, action = ArgAction::SetTrue)]
        init: bool,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    match cli.command {
        Command::Render {
            payload,
            output,
            time,
            width,
            height,
        } => render_payload(&config, &payload, &output, time, width, height),
        Command::Text { payload } => {
            let file = open_payload(&payload)?;
            println!("{}", file.payload.text());
            Ok(())
        }
        Command::Info { payload } => {
            let file = open_payload(&payload)?;
            print_info(&file);
            Ok(())
        }
        Command::Config { init } => show_config(&config, init),
    }
}

fn open_payload(path: &Path) -> Result<PayloadFile> {
    read_payload_file(path).with_context(|| format!("Failed to load payload {}", path.display()))
}

fn render_payload(
    config: &Config,
    payload: &Path,
    output: &Path,
    time: Option<f64>,
    width: Option<i32>,
    height: Option<i32>,
) -> Result<()> {
    let file = open_payload(payload)?;
    let (canvas_w, canvas_h) = file.payload.canvas_size();
    let width = width.unwrap_or(canvas_w);
    let height = height.unwrap_or(canvas_h);
    if width <= 0 || height <= 0 {
        bail!("Output size {width}x{height} is empty; pass --width and --height");
    }

    let surface = RasterSurface::new(width, height);
    let font = config.font_descriptor();
    match file.payload {
        Payload::Static(annotation) => {
            if time.is_some() {
                log::warn!("--time ignored for static payloads");
            }
            let ctx = surface
                .context()
                .context("Failed to acquire drawing context")?;
            if canvas_w > 0 && canvas_h > 0 {
                ctx.scale(width as f64 / canvas_w as f64, height as f64 / canvas_h as f64);
            }
            render::render_elements(&ctx, &annotation.elements, &font);
        }
        Payload::Live(record) => {
            let at = time.unwrap_or(record.session.duration);
            log::info!("Replaying '{}' at {at:.3}s", record.name);
            ReplayRenderer::new(record.session, font).render_frame(&surface, at);
        }
    }

    let png = surface.to_png().context("Failed to encode PNG")?;
    std::fs::write(output, png)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    println!("Wrote {}", output.display());
    Ok(())
}

fn print_info(file: &PayloadFile) {
    let (kind, name) = match &file.payload {
        Payload::Static(_) => ("static", None),
        Payload::Live(record) => ("live", Some(record.name.as_str())),
    };
    let (w, h) = file.payload.canvas_size();
    let elements = file.payload.elements();

    println!("Kind: {kind}");
    if let Some(name) = name {
        println!("Name: {name}");
    }
    println!("Saved: {}", file.saved_at);
    println!("Canvas: {w}x{h}");
    if let Payload::Live(record) = &file.payload {
        println!("Duration: {:.3}s", record.session.duration);
    }
    println!("Elements: {}", elements.len());

    let mut kinds: BTreeMap<&str, usize> = BTreeMap::new();
    let mut colors: BTreeMap<&str, usize> = BTreeMap::new();
    for element in &elements {
        let (label, color) = match element {
            DrawingElement::Stroke(s) => ("stroke", &s.color),
            DrawingElement::Shape(s) => ("shape", &s.color),
            DrawingElement::Symbol(s) => ("symbol", &s.color),
            DrawingElement::Text(t) => ("text", &t.color),
        };
        *kinds.entry(label).or_default() += 1;
        *colors.entry(color.name()).or_default() += 1;
    }
    for (label, count) in kinds {
        println!("  {label}: {count}");
    }
    if !colors.is_empty() {
        let summary: Vec<String> = colors
            .into_iter()
            .map(|(name, count)| format!("{name} ({count})"))
            .collect();
        println!("Colors: {}", summary.join(", "));
    }
}

fn show_config(config: &Config, init: bool) -> Result<()> {
    let path = Config::get_config_path()?;
    if init {
        if path.exists() {
            println!("Config already exists at {}", path.display());
        } else {
            Config::default().save()?;
            println!("Wrote default config to {}", path.display());
        }
        return Ok(());
    }

    println!("Config file: {}", path.display());
    println!("Storage directory: {}", config.storage_dir()?.display());
    println!("History depth: {}", config.history.max_depth);
    Ok(())
}
