// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Per-project detail page.

use std::collections::HashMap;
use std::time::Duration;

use super::images::ImageCache;
use super::reveal::{self, Slide};
use super::{card_frame, tech_chips, ACCENT};
use crate::io::config::AppConfig;
use crate::models::catalog::ProjectCatalog;
use crate::models::project::{ProjectDetails, ProjectRecord, Screenshot};
use crate::navigation::LayoutSnapshot;
use crate::tracking::{ObservationConfig, VisibilityTracker};
use crate::util::geometry::{Bounds, Viewport};

const NOT_FOUND_MESSAGE: &str = "Project not found.";

/// Result of detail page interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailAction {
    None,
    Back,
}

/// State that lives while a project page is mounted.
pub struct DetailPage {
    project_id: String,
    /// One per screenshot row
    trackers: Vec<VisibilityTracker>,
    layout: LayoutSnapshot,
}

fn row_id(project_id: &str, index: usize) -> String {
    format!("{}/screenshot-{}", project_id, index)
}

impl DetailPage {
    pub fn enter(project_id: &str, catalog: &ProjectCatalog, config: &AppConfig, now: Duration) -> Self {
        let trackers = match catalog.lookup(project_id) {
            Ok(project) => (0..project.screenshots().len())
                .map(|i| {
                    VisibilityTracker::attach_with(
                        row_id(project_id, i),
                        config.reveal,
                        now,
                        config.grace(),
                        config.support(),
                    )
                })
                .collect(),
            Err(e) => {
                log::warn!("{}", e);
                Vec::new()
            }
        };

        Self {
            project_id: project_id.to_string(),
            trackers,
            layout: LayoutSnapshot::default(),
        }
    }

    pub fn reconfigure(&mut self, config: ObservationConfig) {
        for tracker in &mut self.trackers {
            tracker.reconfigure(config);
        }
    }

    pub fn leave(&mut self) {
        for tracker in &mut self.trackers {
            tracker.detach();
        }
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn update(&mut self, now: Duration) {
        let layout = &self.layout;
        for tracker in &mut self.trackers {
            tracker.tick(now);
            let bounds = layout.bounds.get(tracker.id().as_str()).copied();
            tracker.observe(&layout.viewport, bounds);
        }
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.trackers.iter().filter_map(|t| t.next_deadline()).min()
    }

    pub fn show(&mut self, ui: &mut egui::Ui, catalog: &ProjectCatalog, images: &mut ImageCache) -> DetailAction {
        let project = match catalog.lookup(&self.project_id) {
            Ok(project) => project,
            Err(_) => return not_found(ui),
        };

        let trackers = &self.trackers;
        let mut action = DetailAction::None;

        let output = egui::ScrollArea::vertical()
            .id_source(("project_scroll", self.project_id.as_str()))
            .auto_shrink([false, false])
            .show(ui, |ui| {
                let origin = ui.max_rect().top();
                let mut bounds = HashMap::new();

                ui.add_space(24.0);
                if ui.link(egui::RichText::new("⬅ Back to main").color(ACCENT)).clicked() {
                    action = DetailAction::Back;
                }
                ui.add_space(24.0);

                card_frame().show(ui, |ui| {
                    header(ui, project, images);

                    if let Some(details) = &project.details {
                        ui.add_space(24.0);
                        overview(ui, details);
                    }
                });

                ui.add_space(48.0);
                for (index, (shot, tracker)) in project.screenshots().iter().zip(trackers).enumerate() {
                    let slide = if index % 2 == 0 {
                        Slide::FromLeft(120.0)
                    } else {
                        Slide::FromRight(120.0)
                    };
                    let id = egui::Id::new(tracker.id().as_str());
                    let response = reveal::show(ui, id, tracker.visibility(), slide, |ui| {
                        screenshot_row(ui, shot, index, images);
                    })
                    .response;

                    bounds.insert(
                        tracker.id().as_str().to_string(),
                        Bounds::new(response.rect.top() - origin, response.rect.height()),
                    );
                    ui.add_space(160.0);
                }
                bounds
            });

        self.layout = LayoutSnapshot {
            viewport: Viewport::new(
                output.state.offset.y,
                output.inner_rect.width(),
                output.inner_rect.height(),
            ),
            bounds: output.inner,
        };

        action
    }
}

fn not_found(ui: &mut egui::Ui) -> DetailAction {
    let mut action = DetailAction::None;
    ui.vertical_centered(|ui| {
        ui.add_space(ui.available_height() / 2.0 - 40.0);
        ui.label(egui::RichText::new(NOT_FOUND_MESSAGE).size(20.0));
        ui.add_space(12.0);
        if ui.link(egui::RichText::new("⬅ Back to main").color(ACCENT)).clicked() {
            action = DetailAction::Back;
        }
    });
    action
}

fn header(ui: &mut egui::Ui, project: &ProjectRecord, images: &mut ImageCache) {
    let width = ui.available_width();
    images.show(ui, &project.image, &project.title, width, 256.0);
    ui.add_space(24.0);
    ui.label(egui::RichText::new(&project.title).size(30.0).strong());
    ui.label(egui::RichText::new(&project.date).color(ACCENT));
    ui.add_space(12.0);
    tech_chips(ui, &project.technologies);
}

fn overview(ui: &mut egui::Ui, details: &ProjectDetails) {
    ui.label(egui::RichText::new("Overview").size(20.0).strong());
    ui.add_space(8.0);
    ui.label(&details.overview);

    ui.add_space(24.0);
    ui.label(egui::RichText::new("Key features").size(20.0).strong());
    ui.add_space(8.0);
    for feature in &details.features {
        ui.label(format!("• {}", feature));
    }

    if !details.troubleshooting.is_empty() {
        ui.add_space(24.0);
        ui.label(egui::RichText::new("Troubleshooting").size(20.0).strong());
        for item in &details.troubleshooting {
            ui.add_space(8.0);
            ui.label(egui::RichText::new(&item.title).strong());
            ui.label(format!("Problem: {}", item.problem));
            ui.label(format!("Solution: {}", item.solution));
            ui.label(format!("Result: {}", item.result));
        }
    }

    ui.add_space(24.0);
    ui.horizontal(|ui| {
        if let Some(github) = &details.github {
            ui.hyperlink_to("GitHub", github);
        }
        if let Some(demo) = &details.demo {
            ui.hyperlink_to("Live demo", demo);
        }
    });
}

/// Image and caption side by side, alternating sides per row.
fn screenshot_row(ui: &mut egui::Ui, shot: &Screenshot, index: usize, images: &mut ImageCache) {
    ui.columns(2, |columns| {
        let (image_col, text_col) = if index % 2 == 0 { (0, 1) } else { (1, 0) };

        let width = columns[image_col].available_width();
        images.show(&mut columns[image_col], &shot.image, &shot.title, width, 300.0);

        let text = &mut columns[text_col];
        text.label(egui::RichText::new(&shot.title).size(20.0).strong());
        text.add_space(12.0);
        for line in shot.description.lines() {
            text.label(line.trim());
        }
    });
}
