// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Viewport visibility tracking for rendered regions.

pub mod observer;
pub mod tracker;

pub use observer::{IntersectionEntry, ObservationConfig, RegionId};
pub use tracker::{Support, Visibility, VisibilityTracker};
