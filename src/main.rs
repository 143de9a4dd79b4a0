use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use log::{info, warn};
use std::cell::RefCell;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use vecdraw::Config;
use vecdraw::canvas::{CairoBackbuffer, CanvasRenderer};
use vecdraw::document::{Workspace, load_file};
use vecdraw::draw::{ColorSource, ShapeFactory};
use vecdraw::export::{ExportFormat, ensure_extension};
use vecdraw::model::DrawingModel;
use vecdraw::ui::{ObjectList, status_text};

#[derive(Parser, Debug)]
#[command(name = "vecdraw")]
#[command(version, about = "Vector drawing tool for .jvd files")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate .jvd files and report the first bad line of each
    Check {
        #[arg(required = true, value_name = "FILE")]
        files: Vec<PathBuf>,
    },

    /// List the objects of one or more drawings, numbered as the editor would
    List {
        #[arg(required = true, value_name = "FILE")]
        files: Vec<PathBuf>,
    },

    /// Merge several drawings into one .jvd file
    Merge {
        #[arg(required = true, value_name = "FILE")]
        files: Vec<PathBuf>,

        /// Output drawing (".jvd" is appended if missing)
        #[arg(long, short = 'o', value_name = "OUT")]
        output: PathBuf,

        /// Replace the output file if it exists
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Export drawings as an image cropped to their bounding box
    Export {
        #[arg(required = true, value_name = "FILE")]
        files: Vec<PathBuf>,

        /// Output image
        #[arg(long, short = 'o', value_name = "OUT")]
        output: PathBuf,

        /// Image format (png, gif, jpg); defaults to the output extension
        #[arg(long, value_name = "FORMAT", value_parser = parse_format)]
        format: Option<ExportFormat>,
    },

    /// Replay a drawing through the canvas and save the canvas as PNG
    Render {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output PNG
        #[arg(long, short = 'o', value_name = "OUT")]
        output: PathBuf,

        /// Canvas width (defaults to the configured width)
        #[arg(long)]
        width: Option<i32>,

        /// Canvas height (defaults to the configured height)
        #[arg(long)]
        height: Option<i32>,
    },

    /// Write the documented default config to ~/.config/vecdraw/config.toml
    InitConfig,
}

fn parse_format(value: &str) -> Result<ExportFormat, String> {
    ExportFormat::from_name(value).ok_or_else(|| format!("unknown format '{value}' (png, gif, jpg)"))
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let config = Config::load().unwrap_or_else(|e| {
        warn!("Failed to load config: {:#}; using defaults", e);
        Config::default()
    });

    match cli.command {
        Command::Check { files } => check(&files),
        Command::List { files } => list(&config, &files),
        Command::Merge {
            files,
            output,
            force,
        } => merge(&config, &files, &output, force),
        Command::Export {
            files,
            output,
            format,
        } => export(&config, &files, &output, format),
        Command::Render {
            file,
            output,
            width,
            height,
        } => render(&config, &file, &output, width, height),
        Command::InitConfig => {
            let path = Config::create_default_file()?;
            println!("Created {}", path.display());
            Ok(())
        }
    }
}

fn new_workspace(config: &Config) -> Workspace {
    let mut model = DrawingModel::new(config.foreground(), config.background());
    model.select_kind(config.default_shape());
    Workspace::new(model)
}

fn check(files: &[PathBuf]) -> Result<()> {
    let mut failed = 0;
    for path in files {
        match load_file(&mut ShapeFactory::new(), path) {
            Ok(shapes) => println!("{}: {} shapes", path.display(), shapes.len()),
            Err(e) => {
                eprintln!("{}", e);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        return Err(anyhow!("{} of {} files are invalid", failed, files.len()));
    }
    Ok(())
}

fn list(config: &Config, files: &[PathBuf]) -> Result<()> {
    let mut workspace = new_workspace(config);
    workspace.open_multiple(files)?;

    let model = workspace.model();
    let objects = ObjectList::from_model(model);
    for (label, shape) in objects.labels().iter().zip(model.shapes()) {
        println!("{}: {}", label, shape);
    }
    Ok(())
}

fn merge(config: &Config, files: &[PathBuf], output: &Path, force: bool) -> Result<()> {
    let mut workspace = new_workspace(config);
    workspace.open_multiple(files)?;
    let path = workspace.save_as(output, force)?;
    println!("Saved {} shapes to {}", workspace.model().len(), path.display());
    Ok(())
}

fn export(
    config: &Config,
    files: &[PathBuf],
    output: &Path,
    format: Option<ExportFormat>,
) -> Result<()> {
    let mut workspace = new_workspace(config);
    workspace.open_multiple(files)?;
    let path = workspace.export(output, format, config.export_format())?;
    println!("Exported to {}", path.display());
    Ok(())
}

fn render(
    config: &Config,
    file: &Path,
    output: &Path,
    width: Option<i32>,
    height: Option<i32>,
) -> Result<()> {
    let width = width.unwrap_or(config.canvas.width);
    let height = height.unwrap_or(config.canvas.height);

    let mut model = DrawingModel::new(config.foreground(), config.background());
    let backbuffer = CairoBackbuffer::new(width, height).context("Failed to create canvas")?;
    let canvas = Rc::new(RefCell::new(CanvasRenderer::new(backbuffer)));
    model.add_listener(canvas.clone());

    let shapes = load_file(model.factory_mut(), file)?;
    info!("Replaying {} shapes from {}", shapes.len(), file.display());
    for shape in shapes {
        model.add(shape);
    }
    println!(
        "{}",
        status_text(
            model.current_color(ColorSource::Foreground),
            model.current_color(ColorSource::Background)
        )
    );

    let path = ensure_extension(output, ExportFormat::Png);
    let mut out =
        File::create(&path).with_context(|| format!("Failed to create {}", path.display()))?;
    let canvas = canvas.borrow();
    let backbuffer = canvas.backbuffer();
    backbuffer
        .committed_surface()
        .write_to_png(&mut out)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!(
        "Rendered {}x{} canvas to {}",
        backbuffer.width(),
        backbuffer.height(),
        path.display()
    );
    Ok(())
}
