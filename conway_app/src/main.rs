// main.rs - Conway's Game of Life window
//
// The tokio runtime hosts two periodic tasks: the simulation task steps the
// shared Simulation, the render task asks egui for a repaint. egui events
// (clicks, buttons) edit the same Simulation from the UI thread.

mod ui;

use anyhow::{Context as _, Result, anyhow};
use conway::config::CONFIG_FILE;
use conway::{LifeConfig, Simulation, schedule};
use eframe::egui;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(env_filter)
        .init();
}

fn main() -> Result<()> {
    init_tracing();

    let config = LifeConfig::load_or_default(CONFIG_FILE);
    tracing::info!(?config, "starting");

    let runtime = tokio::runtime::Runtime::new().context("failed to start tokio runtime")?;
    let sim = Simulation::from_config(&config);
    schedule::spawn_simulation_task(runtime.handle(), sim.clone(), config.sim_interval());

    let handle = runtime.handle().clone();
    let render_interval = config.render_interval();
    let app = ui::LifeApp::new(sim);
    let [width, height] = app.window_size();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([width, height]),
        ..Default::default()
    };

    eframe::run_native(
        "Conway's Game of Life",
        options,
        Box::new(move |cc| {
            let ctx = cc.egui_ctx.clone();
            schedule::spawn_render_task(&handle, render_interval, move || ctx.request_repaint());
            Box::new(app)
        }),
    )
    .map_err(|err| anyhow!("window closed with an error: {err}"))
}
