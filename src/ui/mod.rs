// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! User interface components.

pub mod home;
pub mod images;
pub mod nav_bar;
pub mod project_detail;
pub mod reveal;

/// Link and highlight color.
pub const ACCENT: egui::Color32 = egui::Color32::from_rgb(37, 99, 235);

/// Light rounded panel used for cards.
pub fn card_frame() -> egui::Frame {
    egui::Frame::none()
        .fill(egui::Color32::from_gray(249))
        .rounding(8.0)
        .inner_margin(24.0)
}

/// Technology tags as pill-shaped chips.
pub fn tech_chips(ui: &mut egui::Ui, technologies: &[String]) {
    ui.horizontal_wrapped(|ui| {
        for tech in technologies {
            egui::Frame::none()
                .fill(egui::Color32::from_rgb(219, 234, 254))
                .rounding(12.0)
                .inner_margin(egui::Margin::symmetric(10.0, 4.0))
                .show(ui, |ui| {
                    ui.label(egui::RichText::new(tech).color(ACCENT).small());
                });
        }
    });
}
