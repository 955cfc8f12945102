// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Enter/exit animation driven by region visibility.
//!
//! A revealed region fades and slides in while it is intersecting and back
//! out when it leaves. Before the tracker's grace period ends, or when it
//! has no observer, the region is simply shown so nothing flashes on first
//! paint.

use crate::tracking::Visibility;

/// Length of the fade/slide transition.
pub const TRANSITION_SECS: f32 = 1.0;

/// Direction a hidden region is displaced in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Slide {
    /// Sits lower while hidden and rises into place
    Up(f32),
    FromLeft(f32),
    FromRight(f32),
}

/// Whether the region should be (or become) fully shown.
pub fn target_shown(visibility: Visibility) -> bool {
    !visibility.observing || !visibility.has_passed_initial_grace || visibility.is_intersecting
}

/// Margins that displace content by `hidden` (0.0 shown, 1.0 fully hidden)
/// while keeping the total size constant so neighbours don't move.
pub fn slide_margin(slide: Slide, hidden: f32) -> egui::Margin {
    let hidden = hidden.clamp(0.0, 1.0);
    let mut margin = egui::Margin::ZERO;
    match slide {
        Slide::Up(distance) => {
            margin.top = distance * hidden;
            margin.bottom = distance * (1.0 - hidden);
        }
        Slide::FromLeft(distance) => {
            margin.left = distance * (1.0 - hidden);
            margin.right = distance * hidden;
        }
        Slide::FromRight(distance) => {
            margin.left = distance * hidden;
            margin.right = distance * (1.0 - hidden);
        }
    }
    margin
}

/// Render `add_contents` with the reveal animation for `visibility`.
pub fn show<R>(
    ui: &mut egui::Ui,
    id: egui::Id,
    visibility: Visibility,
    slide: Slide,
    add_contents: impl FnOnce(&mut egui::Ui) -> R,
) -> egui::InnerResponse<R> {
    let shown = ui
        .ctx()
        .animate_bool_with_time(id, target_shown(visibility), TRANSITION_SECS);

    ui.scope(|ui| {
        ui.set_opacity(shown);
        egui::Frame::none()
            .inner_margin(slide_margin(slide, 1.0 - shown))
            .show(ui, add_contents)
            .inner
    })
}
