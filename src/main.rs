// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! FOLIO - personal portfolio viewer
//!
//! A single-page portfolio with scroll-triggered sections, a navigation bar
//! that follows the section in view, and per-project detail pages.

mod app;
mod io;
mod models;
mod navigation;
mod tracking;
mod ui;
mod util;

use anyhow::Result;
use app::FolioApp;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let config = io::config::from_env()?;

    // Configure egui options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window.width, config.window.height])
            .with_min_inner_size([640.0, 480.0])
            .with_title("Hwijin Portfolio - Frontend Developer Portfolio"),
        ..Default::default()
    };

    let app = FolioApp::new(config)?;

    // Run the application
    eframe::run_native(
        "Folio",
        options,
        Box::new(move |cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::light());
            Ok(Box::new(app))
        }),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
