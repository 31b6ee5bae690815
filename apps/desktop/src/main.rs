use std::{path::PathBuf, sync::Arc};

mod backend_bridge;
mod config;
mod controller;
mod picker;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{DocumentBackend, HttpDocumentBackend};
use crossbeam_channel::bounded;
use tracing_subscriber::EnvFilter;

use crate::{
    config::{load_settings, normalize_backend_url, DEFAULT_CONFIG_FILE},
    controller::Controller,
    ui::PdfQaApp,
};

#[derive(Parser, Debug)]
#[command(name = "pdf-qa", about = "Upload a PDF and ask questions about it")]
struct Args {
    /// Overrides the backend URL from the config file and environment.
    #[arg(long)]
    backend_url: Option<String>,
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings(&args.config);
    if let Some(url) = args.backend_url {
        settings.backend_url = url;
    }
    let backend_url = normalize_backend_url(&settings.backend_url)
        .context("invalid backend url configuration")?;
    tracing::info!(%backend_url, "starting pdf q&a client");

    let http = HttpDocumentBackend::new(&backend_url);
    let display_url = http.base_url().to_string();
    let backend: Arc<dyn DocumentBackend> = Arc::new(http);
    let (cmd_tx, cmd_rx) = bounded(settings.command_queue_capacity);
    let (ui_tx, ui_rx) = bounded(2048);
    let worker = backend_bridge::runtime::launch(backend, cmd_rx, ui_tx);

    let controller = Controller::new(settings.max_upload_bytes, cmd_tx);
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("PDF Q&A")
            .with_inner_size([900.0, 700.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "PDF Q&A",
        options,
        Box::new(move |_cc| Ok(Box::new(PdfQaApp::new(controller, ui_rx, display_url)))),
    )
    .map_err(|err| anyhow::anyhow!("failed to open the window: {err}"))?;

    // Closing the window dropped the controller and its command sender, so the worker drains out.
    if worker.join().is_err() {
        tracing::error!("backend worker panicked");
    }
    Ok(())
}
