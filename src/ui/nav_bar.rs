// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Fixed navigation bar.
//!
//! Shows the portfolio brand on the left and one entry per page section on
//! the right, highlighting the section the navigator reports as active.

use crate::navigation::SectionNavigator;

/// Height of the nav bar panel.
pub const NAV_BAR_HEIGHT: f32 = 64.0;

/// Result of nav bar interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavAction {
    None,
    /// Brand clicked
    Home,
    Section(String),
}

/// Display the nav bar with one entry per section.
pub fn show(ui: &mut egui::Ui, brand: &str, navigator: &SectionNavigator) -> NavAction {
    let mut action = NavAction::None;

    ui.horizontal_centered(|ui| {
        ui.spacing_mut().item_spacing.x = 24.0;

        let brand_label = egui::Label::new(egui::RichText::new(brand).size(20.0).strong())
            .sense(egui::Sense::click());
        if ui.add(brand_label).on_hover_cursor(egui::CursorIcon::PointingHand).clicked() {
            action = NavAction::Home;
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            // Right-to-left, so walk the sections backwards to keep display order
            for section in navigator.sections().iter().rev() {
                let active = navigator.is_active(&section.id);
                let text = if active {
                    egui::RichText::new(&section.label).color(egui::Color32::from_rgb(37, 99, 235))
                } else {
                    egui::RichText::new(&section.label).color(egui::Color32::from_gray(90))
                };

                if ui.selectable_label(active, text).clicked() {
                    action = NavAction::Section(section.id.clone());
                }
            }
        });
    });

    action
}
