// main.rs - Desktop viewer and headless runner

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use conway_view::{
    CanvasGeometry, FrameOutcome, FrameQueue, FrameScheduler, LifeApp, LifeView, RepaintFrames,
    ViewConfig,
};
use eframe::egui;
use tracing::{debug, info};
use universe::Universe;

fn main() -> Result<()> {
    init_tracing();
    let config = ViewConfig::parse();

    let geometry = config.geometry().context("invalid grid configuration")?;
    let seed = config.initial_seed().context("invalid initial population")?;
    let universe = Universe::with_seed(config.width, config.height, seed)
        .context("failed to build the universe")?;
    info!(
        width = universe.width(),
        height = universe.height(),
        population = universe.population(),
        "universe ready"
    );

    match config.headless_frames {
        Some(frames) => run_headless(&config, geometry, universe, frames),
        None => run_window(config, geometry, universe),
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn make_view<S: FrameScheduler>(
    config: &ViewConfig,
    geometry: CanvasGeometry,
    universe: Universe,
    scheduler: S,
) -> LifeView<S> {
    LifeView::new(
        universe,
        scheduler,
        geometry,
        config.palette(),
        config.ticks_per_frame,
    )
    .with_stop_on_cycle(config.stop_on_cycle)
}

fn run_window(config: ViewConfig, geometry: CanvasGeometry, universe: Universe) -> Result<()> {
    let [canvas_width, canvas_height] = geometry.canvas_size();
    info!(canvas_width, canvas_height, "opening viewer window");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([900.0, 1000.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Conway's Game of Life",
        options,
        Box::new(move |cc| {
            let mut view = make_view(
                &config,
                geometry,
                universe,
                RepaintFrames::new(cc.egui_ctx.clone()),
            );
            if !config.start_paused {
                view.play();
            }
            Box::new(LifeApp::new(view))
        }),
    )
    .map_err(|err| anyhow!("viewer stopped with an error: {err}"))
}

/// Grids up to this many cells per side are printed at debug level after a headless run.
const HEADLESS_DUMP_MAX_SIDE: usize = 64;

fn run_headless(
    config: &ViewConfig,
    geometry: CanvasGeometry,
    universe: Universe,
    frames: u64,
) -> Result<()> {
    let mut view = make_view(config, geometry, universe, FrameQueue::new());
    view.play();

    let mut ticks = 0u64;
    let mut redraws = 0u64;
    let mut frames_run = 0u64;
    for _ in 0..frames {
        frames_run += 1;
        if let FrameOutcome::Stepped(n) = view.frame() {
            ticks += u64::from(n);
            redraws += 1;
        }
        if !view.is_running() {
            info!(frame = frames_run, "playback stopped early");
            break;
        }
    }

    info!(
        frames = frames_run,
        ticks,
        redraws,
        generation = view.generation(),
        population = view.live_cells(),
        "headless run finished"
    );
    let universe = view.universe();
    if universe.width() <= HEADLESS_DUMP_MAX_SIDE && universe.height() <= HEADLESS_DUMP_MAX_SIDE {
        debug!("final state:\n{universe}");
    }
    Ok(())
}
