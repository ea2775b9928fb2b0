mod app;
mod charts;
mod color;
mod config;
mod data;
mod state;
mod ui;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use eframe::egui;

use app::MarqueeApp;
use config::Args;
use state::AppState;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    // A table that cannot be loaded or cleaned aborts startup.
    let prepared = data::prepare(&args.data)
        .with_context(|| format!("preparing {}", args.data.display()))?;
    let state = AppState::new(&args.data, prepared, args.filter, usize::from(args.top_n))?;

    if let Some(path) = &args.export {
        return state.dashboard.write_json(path);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Marquee – Movies and TV Shows",
        options,
        Box::new(|_cc| Ok(Box::new(MarqueeApp::new(state)))),
    )
    .map_err(|e| anyhow!("running the dashboard window: {e}"))
}
