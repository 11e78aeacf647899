//! Scene viewer demo application
//!
//! Loads the Wavefront models named on the command line, reports what was
//! read, then draws the whiteboard showcase onto a raster map.
//!
//! Usage: `viewer_app [--config <FILE>] [MODEL]...`

use std::path::{Path, PathBuf};

use clap::Parser;
use thiserror::Error;
use viewer_core::foundation::logging;
use viewer_core::prelude::*;

#[derive(Error, Debug)]
enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Load(#[from] ObjError),
}

/// Load Wavefront models and draw the whiteboard showcase
#[derive(Parser, Debug)]
#[command(name = "viewer_app", version, about)]
struct Args {
    /// Configuration file (.toml or .ron)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Wavefront .obj files to load
    #[arg(value_name = "MODEL")]
    models: Vec<PathBuf>,
}

struct ViewerApp {
    config: ViewerConfig,
    registry: MaterialRegistry,
}

impl ViewerApp {
    fn new(config: ViewerConfig) -> Self {
        Self {
            config,
            registry: MaterialRegistry::new(),
        }
    }

    fn load_model(&mut self, path: &Path) -> Result<ModelBuffer, AppError> {
        let mut loader = ObjLoader::with_config(&mut self.registry, self.config.loader.clone());
        loader.load(path, FileKind::Geometry)?;

        for diagnostic in loader.take_diagnostics() {
            log::warn!("{}", diagnostic);
        }
        Ok(loader.into_model())
    }

    fn report(&self, path: &Path, model: &ModelBuffer) {
        log::info!(
            "{}: {} triangles, smooth shading {}",
            path.display(),
            model.triangle_count(),
            if model.is_smooth_shaded() { "on" } else { "off" }
        );

        if let Some(name) = model.material() {
            if !self.registry.contains(name) {
                log::warn!("{}: material '{}' is not defined, using defaults", path.display(), name);
            }
            let material = self.registry.get_or_default(name);
            log::info!(
                "  material '{}': diffuse ({}, {}, {}), shininess {}",
                name,
                material.diffuse.r,
                material.diffuse.g,
                material.diffuse.b,
                material.shininess
            );
        }

        let unresolved = model.corners().filter(Option::is_none).count();
        if unresolved > 0 {
            log::warn!("{}: {} face corner(s) reference missing vertices", path.display(), unresolved);
        }
    }

    fn draw_whiteboard(&self) {
        let mut grid = PixelGrid::from_config(&self.config.raster, LogSink::new());
        draw_showcase(&mut grid);
        log::info!(
            "Whiteboard {}x{} drew {} quads",
            grid.width(),
            grid.height(),
            grid.sink().quad_count()
        );
    }
}

fn run(args: &Args) -> Result<(), AppError> {
    let config = match &args.config {
        Some(path) => {
            log::info!("Loading configuration from {}", path.display());
            ViewerConfig::load_from_file(path)?
        }
        None => ViewerConfig::default(),
    };
    config.validate()?;

    let mut app = ViewerApp::new(config);
    for path in &args.models {
        let model = app.load_model(path)?;
        app.report(path, &model);
    }
    log::info!("{} material(s) registered", app.registry.len());

    app.draw_whiteboard();
    Ok(())
}

fn main() {
    let args = Args::parse();

    // Initialize logging; RUST_LOG still overrides the Info default
    logging::init_with_level(log::LevelFilter::Info);

    log::info!("Starting scene viewer");

    if let Err(err) = run(&args) {
        log::error!("{}", err);
        std::process::exit(1);
    }
}
