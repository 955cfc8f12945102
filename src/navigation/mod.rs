// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Section navigation and smooth scrolling.

pub mod navigator;
pub mod scroll;

pub use navigator::{LayoutSnapshot, SectionNavigator, SelectionPolicy};
pub use scroll::{ScrollCommand, SmoothScroll};
