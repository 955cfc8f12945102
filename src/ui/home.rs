// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! The scrolling home page.
//!
//! Renders the navigable sections (About, Skills, Archiving, Projects) in a
//! single vertical scroll area. Each section fades in through its own
//! visibility tracker, and every frame the page records where the sections
//! were laid out so the navigator can observe them on the next frame.

use std::collections::HashMap;
use std::time::Duration;

use super::images::ImageCache;
use super::reveal::{self, Slide};
use super::{card_frame, tech_chips, ACCENT};
use crate::io::config::AppConfig;
use crate::models::catalog::ProjectCatalog;
use crate::models::profile::{ArchiveEntry, Profile, SkillGroup};
use crate::navigation::navigator::Section;
use crate::navigation::LayoutSnapshot;
use crate::tracking::{ObservationConfig, VisibilityTracker};
use crate::util::geometry::{Bounds, Viewport};

/// Result of home page interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HomeAction {
    None,
    OpenProject(String),
}

/// Everything the home page draws from.
pub struct HomeContent<'a> {
    pub sections: &'a [Section],
    pub profile: &'a Profile,
    pub catalog: &'a ProjectCatalog,
    pub images: &'a mut ImageCache,
}

/// State that lives while the home page is mounted.
pub struct HomePage {
    /// Section reveal trackers, one per section in display order
    trackers: Vec<VisibilityTracker>,
    /// Geometry from the last rendered frame
    layout: LayoutSnapshot,
    max_offset: f32,
}

impl HomePage {
    pub fn mount(sections: &[Section], config: &AppConfig, now: Duration) -> Self {
        let trackers = sections
            .iter()
            .map(|s| {
                VisibilityTracker::attach_with(
                    s.id.as_str(),
                    config.sections,
                    now,
                    config.grace(),
                    config.support(),
                )
            })
            .collect();

        Self {
            trackers,
            layout: LayoutSnapshot::default(),
            max_offset: 0.0,
        }
    }

    pub fn reconfigure(&mut self, config: ObservationConfig) {
        for tracker in &mut self.trackers {
            tracker.reconfigure(config);
        }
    }

    pub fn unmount(&mut self) {
        for tracker in &mut self.trackers {
            tracker.detach();
        }
    }

    #[cfg(test)]
    pub fn set_layout(&mut self, layout: LayoutSnapshot) {
        self.layout = layout;
    }

    pub fn layout(&self) -> &LayoutSnapshot {
        &self.layout
    }

    /// Largest scroll offset reached by the last frame's layout.
    pub fn max_offset(&self) -> f32 {
        self.max_offset
    }

    /// Advance timers and observe the sections against last frame's layout.
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

    /// Draw the page, scrolling to `scroll_to` if given.
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        content: HomeContent<'_>,
        scroll_to: Option<f32>,
    ) -> HomeAction {
        let HomeContent {
            sections,
            profile,
            catalog,
            images,
        } = content;
        let trackers = &self.trackers;
        let mut action = HomeAction::None;

        let mut area = egui::ScrollArea::vertical()
            .id_source("home_scroll")
            .auto_shrink([false, false]);
        if let Some(offset) = scroll_to {
            area = area.vertical_scroll_offset(offset);
        }

        let output = area.show(ui, |ui| {
            let origin = ui.max_rect().top();
            let screen_height = ui.clip_rect().height();
            let mut bounds = HashMap::new();

            ui.add_space(24.0);
            for (section, tracker) in sections.iter().zip(trackers) {
                let id = egui::Id::new(("section", section.id.as_str()));
                let response = reveal::show(ui, id, tracker.visibility(), Slide::Up(40.0), |ui| {
                    ui.set_min_height(screen_height);
                    ui.label(egui::RichText::new(&section.label).size(30.0).strong());
                    ui.add_space(32.0);

                    match section.id.as_str() {
                        "about" => about(ui, profile, images),
                        "skills" => skills(ui, &profile.skill_groups),
                        "archiving" => archiving(ui, &profile.archives),
                        "projects" => {
                            if let Some(project_id) = projects(ui, catalog, images) {
                                action = HomeAction::OpenProject(project_id);
                            }
                        }
                        other => log::debug!("No content for section '{}'", other),
                    }
                })
                .response;

                bounds.insert(
                    section.id.clone(),
                    Bounds::new(response.rect.top() - origin, response.rect.height()),
                );
            }
            bounds
        });

        let viewport = Viewport::new(
            output.state.offset.y,
            output.inner_rect.width(),
            output.inner_rect.height(),
        );
        self.max_offset = (output.content_size.y - output.inner_rect.height()).max(0.0);
        self.layout = LayoutSnapshot {
            viewport,
            bounds: output.inner,
        };

        action
    }
}

fn about(ui: &mut egui::Ui, profile: &Profile, images: &mut ImageCache) {
    ui.horizontal(|ui| {
        images.show(ui, &profile.avatar, "Profile", 128.0, 128.0);
        ui.add_space(16.0);
        ui.vertical(|ui| {
            ui.add_space(32.0);
            ui.label(egui::RichText::new(&profile.name).size(30.0).strong());
            ui.label(egui::RichText::new(&profile.role).size(20.0));
        });
    });

    ui.add_space(16.0);
    ui.horizontal_wrapped(|ui| {
        ui.label("Hello, I'm");
        ui.label(egui::RichText::new(&profile.headline).size(20.0).strong().color(ACCENT));
        ui.label(format!("{}.", profile.name));
    });
    ui.label(&profile.intro);

    ui.add_space(120.0);
    ui.vertical_centered(|ui| {
        ui.label(egui::RichText::new("Scroll Down ⬇").color(ACCENT));
    });
}

fn skills(ui: &mut egui::Ui, groups: &[SkillGroup]) {
    if groups.is_empty() {
        return;
    }

    ui.columns(groups.len(), |columns| {
        for (ui, group) in columns.iter_mut().zip(groups) {
            card_frame().show(ui, |ui| {
                ui.label(egui::RichText::new(&group.title).size(20.0).strong());
                ui.add_space(16.0);

                for skill in &group.skills {
                    ui.horizontal(|ui| {
                        ui.label(&skill.name);
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            ui.label(format!("{}%", skill.level));
                        });
                    });

                    let (rect, _) = ui.allocate_exact_size(
                        egui::vec2(ui.available_width(), 8.0),
                        egui::Sense::hover(),
                    );
                    let filled = egui::Rect::from_min_size(
                        rect.min,
                        egui::vec2(rect.width() * skill.fraction(), rect.height()),
                    );
                    ui.painter().rect_filled(rect, 4.0, egui::Color32::from_gray(229));
                    ui.painter().rect_filled(filled, 4.0, ACCENT);
                    ui.add_space(12.0);
                }
            });
        }
    });
}

fn archiving(ui: &mut egui::Ui, entries: &[ArchiveEntry]) {
    if entries.is_empty() {
        return;
    }

    ui.columns(entries.len(), |columns| {
        for (ui, entry) in columns.iter_mut().zip(entries) {
            card_frame().show(ui, |ui| {
                ui.label(egui::RichText::new(&entry.title).size(20.0).strong());
                ui.add_space(12.0);
                ui.label(&entry.subtitle);
                ui.hyperlink_to(&entry.link_text, &entry.url);
                ui.add_space(12.0);
                for highlight in &entry.highlights {
                    ui.label(format!("• {}", highlight));
                }
            });
        }
    });
}

/// Project cards. Returns the id of a clicked card.
fn projects(ui: &mut egui::Ui, catalog: &ProjectCatalog, images: &mut ImageCache) -> Option<String> {
    let mut clicked = None;

    if catalog.is_empty() {
        ui.label("No projects yet.");
        return clicked;
    }

    for project in catalog.projects() {
        let card = card_frame().show(ui, |ui| {
            let width = ui.available_width();
            images.show(ui, &project.image, &project.title, width, 192.0);
            ui.add_space(12.0);
            ui.label(egui::RichText::new(&project.title).size(20.0).strong());
            ui.label(egui::RichText::new(&project.date).color(ACCENT));
            ui.label(&project.description);
            ui.add_space(8.0);
            tech_chips(ui, &project.technologies);
        });

        let response = ui
            .interact(
                card.response.rect,
                egui::Id::new(("project_card", project.id.as_str())),
                egui::Sense::click(),
            )
            .on_hover_cursor(egui::CursorIcon::PointingHand);
        if response.clicked() {
            log::info!("Opening project '{}'", project.id);
            clicked = Some(project.id.clone());
        }
        ui.add_space(32.0);
    }

    clicked
}
