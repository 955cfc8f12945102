// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Scroll-synchronized section navigation.
//!
//! The [`SectionNavigator`] owns which page section is "active". It keeps one
//! [`VisibilityTracker`] per section, watching a thin band at the vertical
//! center of the viewport, and updates the active section from the reports
//! those trackers produce. Clicking a nav item goes through
//! [`SectionNavigator::navigate_to`], which sets the active section right
//! away and starts a smooth scroll that centers the section.
//!
//! Every `navigate_to` bumps a generation counter. Report batches are stamped
//! with the generation they were observed under, and a batch older than the
//! current generation is dropped so a layout captured before the click
//! cannot undo it. While the scroll a click started is still running, the
//! navigator is settling and ignores reports altogether, so the sections
//! passed on the way do not flash in the nav bar; the owner of the scroll
//! calls [`SectionNavigator::settle`] once it comes to rest.

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::scroll::ScrollCommand;
use crate::tracking::tracker::DEFAULT_GRACE;
use crate::tracking::{IntersectionEntry, ObservationConfig, Support, VisibilityTracker};
use crate::util::geometry::{Bounds, Viewport};

/// Height reserved for the fixed nav bar when centering a section.
pub const DEFAULT_NAV_ALLOWANCE: f32 = 200.0;

/// A navigable page section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub label: String,
}

impl Section {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// The home page sections, in display order.
pub fn default_sections() -> Vec<Section> {
    vec![
        Section::new("about", "About Me"),
        Section::new("skills", "Skills"),
        Section::new("archiving", "Archiving"),
        Section::new("projects", "Projects"),
    ]
}

/// How the active section is picked from a batch of reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionPolicy {
    /// Every intersecting report overwrites the active section, so the last
    /// one in the batch wins.
    #[default]
    LastReport,
    /// The intersecting report with the greatest ratio wins; ties go to the
    /// later report.
    GreatestRatio,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error("navigator needs at least one section")]
    NoSections,
    #[error("section '{0}' is listed more than once")]
    DuplicateSection(String),
}

/// Where sections currently are, as laid out by the renderer.
pub trait SectionGeometry {
    fn viewport(&self) -> Viewport;
    /// `None` if the section has not been laid out.
    fn bounds(&self, section_id: &str) -> Option<Bounds>;
}

/// A captured layout pass.
#[derive(Debug, Clone, Default)]
pub struct LayoutSnapshot {
    pub viewport: Viewport,
    pub bounds: HashMap<String, Bounds>,
}

impl LayoutSnapshot {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            bounds: HashMap::new(),
        }
    }

    #[cfg(test)]
    pub fn with_section(mut self, id: impl Into<String>, bounds: Bounds) -> Self {
        self.bounds.insert(id.into(), bounds);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.bounds.is_empty()
    }
}

impl SectionGeometry for LayoutSnapshot {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn bounds(&self, section_id: &str) -> Option<Bounds> {
        self.bounds.get(section_id).copied()
    }
}

/// Reports observed together, stamped with the generation they belong to.
#[derive(Debug, Clone, PartialEq)]
pub struct IntersectionBatch {
    pub generation: u64,
    pub entries: Vec<IntersectionEntry>,
}

impl IntersectionBatch {
    pub fn new(generation: u64, entries: Vec<IntersectionEntry>) -> Self {
        Self {
            generation,
            entries,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct NavigatorOptions {
    pub config: ObservationConfig,
    pub policy: SelectionPolicy,
    pub nav_allowance: f32,
    pub grace: Duration,
    pub support: Support,
}

impl Default for NavigatorOptions {
    fn default() -> Self {
        Self {
            config: ObservationConfig::center_band(),
            policy: SelectionPolicy::default(),
            nav_allowance: DEFAULT_NAV_ALLOWANCE,
            grace: DEFAULT_GRACE,
            support: Support::Available,
        }
    }
}

/// Scroll offset that vertically centers a section below the nav bar.
pub fn scroll_target(
    section_top: f32,
    section_height: f32,
    viewport_height: f32,
    nav_allowance: f32,
) -> f32 {
    section_top - nav_allowance - (viewport_height - section_height) / 2.0
}

/// Owns the active section and scroll-to-section behavior.
#[derive(Debug)]
pub struct SectionNavigator {
    sections: Vec<Section>,
    /// One per section, same order
    trackers: Vec<VisibilityTracker>,
    active: String,
    generation: u64,
    /// A scroll issued by `navigate_to` has not come to rest yet
    settling: bool,
    policy: SelectionPolicy,
    nav_allowance: f32,
}

impl SectionNavigator {
    pub fn new(sections: Vec<Section>, now: Duration) -> Result<Self, NavigationError> {
        Self::with_options(sections, NavigatorOptions::default(), now)
    }

    pub fn with_options(
        sections: Vec<Section>,
        options: NavigatorOptions,
        now: Duration,
    ) -> Result<Self, NavigationError> {
        let first = sections.first().ok_or(NavigationError::NoSections)?;
        let active = first.id.clone();

        for (i, section) in sections.iter().enumerate() {
            if sections[..i].iter().any(|s| s.id == section.id) {
                return Err(NavigationError::DuplicateSection(section.id.clone()));
            }
        }

        let trackers = sections
            .iter()
            .map(|s| {
                VisibilityTracker::attach_with(
                    s.id.as_str(),
                    options.config,
                    now,
                    options.grace,
                    options.support,
                )
            })
            .collect();

        Ok(Self {
            sections,
            trackers,
            active,
            generation: 0,
            settling: false,
            policy: options.policy,
            nav_allowance: options.nav_allowance,
        })
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn active(&self) -> &str {
        &self.active
    }

    pub fn is_active(&self, section_id: &str) -> bool {
        self.active == section_id
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[cfg(test)]
    pub fn is_settling(&self) -> bool {
        self.settling
    }

    /// The scroll started by the last `navigate_to` has stopped, either at
    /// its target or because the user took over. Reports apply again.
    pub fn settle(&mut self) {
        if self.settling {
            self.settling = false;
            log::debug!("Navigation to '{}' settled", self.active);
        }
    }

    pub fn contains(&self, section_id: &str) -> bool {
        self.sections.iter().any(|s| s.id == section_id)
    }

    /// Run every section tracker against `geometry`, in display order.
    pub fn observe(&mut self, geometry: &dyn SectionGeometry) -> IntersectionBatch {
        let viewport = geometry.viewport();
        let entries = self
            .sections
            .iter()
            .zip(self.trackers.iter_mut())
            .filter_map(|(section, tracker)| {
                tracker.observe(&viewport, geometry.bounds(&section.id))
            })
            .collect();

        IntersectionBatch::new(self.generation, entries)
    }

    /// Apply a batch of reports. Returns the new active section if it
    /// changed.
    pub fn apply(&mut self, batch: IntersectionBatch) -> Option<&str> {
        if batch.generation < self.generation {
            log::debug!(
                "Dropping {} stale report(s) from generation {} (now {})",
                batch.entries.len(),
                batch.generation,
                self.generation
            );
            return None;
        }
        if self.settling {
            log::trace!("Holding '{}' while scrolling", self.active);
            return None;
        }

        let intersecting = batch
            .entries
            .iter()
            .filter(|e| e.is_intersecting && self.contains(e.target.as_str()));

        let winner = match self.policy {
            SelectionPolicy::LastReport => intersecting.last(),
            SelectionPolicy::GreatestRatio => {
                intersecting.fold(None::<&IntersectionEntry>, |best, entry| match best {
                    Some(b) if b.intersection_ratio > entry.intersection_ratio => Some(b),
                    _ => Some(entry),
                })
            }
        }?;

        if self.active == winner.target.as_str() {
            return None;
        }

        log::debug!("Active section: {} -> {}", self.active, winner.target);
        self.active = winner.target.as_str().to_string();
        Some(self.active.as_str())
    }

    /// Make `section_id` active immediately and smooth-scroll it into the
    /// middle of the viewport.
    ///
    /// Unknown ids are ignored. Returns the scroll offset issued, or `None`
    /// if nothing was scrolled (unknown id, or no layout for the section
    /// yet; the section still becomes active in the latter case).
    pub fn navigate_to(
        &mut self,
        section_id: &str,
        geometry: &dyn SectionGeometry,
        scroller: &mut dyn ScrollCommand,
    ) -> Option<f32> {
        if !self.contains(section_id) {
            log::debug!("Ignoring navigation to unknown section '{}'", section_id);
            return None;
        }

        self.generation += 1;
        self.active = section_id.to_string();

        let Some(bounds) = geometry.bounds(section_id) else {
            log::debug!("Section '{}' has no layout yet, not scrolling", section_id);
            return None;
        };

        let offset = scroll_target(
            bounds.top,
            bounds.height,
            geometry.viewport().height,
            self.nav_allowance,
        );
        log::info!("Navigating to '{}' (offset {:.1})", section_id, offset);
        scroller.smooth_scroll_to(offset);
        self.settling = true;
        Some(offset)
    }

    /// Switch every section tracker to `config`. Returns true if any of
    /// them changed.
    pub fn reconfigure(&mut self, config: ObservationConfig) -> bool {
        self.trackers
            .iter_mut()
            .fold(false, |changed, tracker| tracker.reconfigure(config) || changed)
    }

    /// Release every section tracker.
    pub fn detach(&mut self) {
        for tracker in &mut self.trackers {
            tracker.detach();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracking::RegionId;

    #[derive(Default)]
    struct RecordingScroll(Vec<f32>);

    impl ScrollCommand for RecordingScroll {
        fn smooth_scroll_to(&mut self, offset: f32) {
            self.0.push(offset);
        }
    }

    fn navigator() -> SectionNavigator {
        SectionNavigator::new(default_sections(), Duration::ZERO).unwrap()
    }

    fn report(id: &str, is_intersecting: bool) -> IntersectionEntry {
        IntersectionEntry {
            target: RegionId::new(id),
            is_intersecting,
            intersection_ratio: if is_intersecting { 1.0 } else { 0.0 },
        }
    }

    fn ratio_report(id: &str, intersection_ratio: f32) -> IntersectionEntry {
        IntersectionEntry {
            target: RegionId::new(id),
            is_intersecting: true,
            intersection_ratio,
        }
    }

    fn greatest_ratio_navigator() -> SectionNavigator {
        let options = NavigatorOptions {
            policy: SelectionPolicy::GreatestRatio,
            ..Default::default()
        };
        SectionNavigator::with_options(default_sections(), options, Duration::ZERO).unwrap()
    }

    /// Sections stacked 1000pt apart starting at 0.
    fn stacked_layout(scroll_top: f32) -> LayoutSnapshot {
        stacked_layout_with_height(scroll_top, 600.0)
    }

    fn stacked_layout_with_height(scroll_top: f32, viewport_height: f32) -> LayoutSnapshot {
        default_sections()
            .iter()
            .enumerate()
            .fold(
                LayoutSnapshot::new(Viewport::new(scroll_top, 1280.0, viewport_height)),
                |layout, (i, s)| layout.with_section(s.id.clone(), Bounds::new(i as f32 * 1000.0, 1000.0)),
            )
    }

    #[test]
    fn test_starts_on_first_section() {
        let nav = navigator();
        assert_eq!(nav.active(), "about");
        assert!(nav.is_active("about"));
        assert_eq!(nav.generation(), 0);
    }

    #[test]
    fn test_rejects_bad_section_lists() {
        assert_eq!(
            SectionNavigator::new(Vec::new(), Duration::ZERO).unwrap_err(),
            NavigationError::NoSections
        );

        let dup = vec![Section::new("a", "A"), Section::new("a", "Again")];
        assert_eq!(
            SectionNavigator::new(dup, Duration::ZERO).unwrap_err(),
            NavigationError::DuplicateSection("a".to_string())
        );
    }

    #[test]
    fn test_last_intersecting_report_wins_for_any_ordering() {
        let ids = ["about", "skills", "archiving", "projects"];
        // Small deterministic LCG so the sequences are reproducible
        let mut seed: u64 = 0x5eed;
        let mut next = move || {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            (seed >> 33) as usize
        };

        for _ in 0..200 {
            let mut nav = navigator();
            let mut expected = nav.active().to_string();

            for _ in 0..(next() % 12) {
                let id = ids[next() % ids.len()];
                let is_intersecting = next() % 2 == 0;
                if is_intersecting {
                    expected = id.to_string();
                }
                let batch = IntersectionBatch::new(nav.generation(), vec![report(id, is_intersecting)]);
                nav.apply(batch);
            }

            assert_eq!(nav.active(), expected);
        }
    }

    #[test]
    fn test_last_report_in_batch_wins() {
        // Batch order decides, not section order
        let mut nav = navigator();
        let batch = IntersectionBatch::new(
            0,
            vec![
                report("projects", true),
                report("skills", true),
                report("archiving", false),
            ],
        );
        assert_eq!(nav.apply(batch), Some("skills"));
    }

    #[test]
    fn test_greatest_ratio_policy() {
        let mut nav = greatest_ratio_navigator();
        let batch = IntersectionBatch::new(
            0,
            vec![ratio_report("skills", 0.9), ratio_report("projects", 0.6)],
        );
        assert_eq!(nav.apply(batch), Some("skills"));
    }

    #[test]
    fn test_greatest_ratio_ignores_batch_order() {
        let mut nav = greatest_ratio_navigator();
        let batch = IntersectionBatch::new(
            0,
            vec![
                ratio_report("projects", 0.6),
                ratio_report("archiving", 0.3),
                ratio_report("skills", 0.9),
            ],
        );
        assert_eq!(nav.apply(batch), Some("skills"));
    }

    #[test]
    fn test_greatest_ratio_tie_goes_to_later_report() {
        let mut nav = greatest_ratio_navigator();
        let batch = IntersectionBatch::new(
            0,
            vec![ratio_report("skills", 0.7), ratio_report("projects", 0.7)],
        );
        assert_eq!(nav.apply(batch), Some("projects"));

        let batch = IntersectionBatch::new(
            0,
            vec![ratio_report("archiving", 0.7), ratio_report("skills", 0.7)],
        );
        assert_eq!(nav.apply(batch), Some("skills"));
    }

    #[test]
    fn test_greatest_ratio_skips_non_intersecting() {
        let mut nav = greatest_ratio_navigator();
        let mut hidden = ratio_report("projects", 0.95);
        hidden.is_intersecting = false;

        let batch = IntersectionBatch::new(0, vec![hidden, ratio_report("skills", 0.4)]);
        assert_eq!(nav.apply(batch), Some("skills"));
    }

    #[test]
    fn test_reports_for_unknown_sections_are_ignored() {
        let mut nav = navigator();
        assert_eq!(nav.apply(IntersectionBatch::new(0, vec![report("footer", true)])), None);
        assert_eq!(nav.active(), "about");
    }

    #[test]
    fn test_scroll_target_centers_section_below_nav() {
        assert_eq!(scroll_target(1000.0, 800.0, 600.0, DEFAULT_NAV_ALLOWANCE), 900.0);
    }

    #[test]
    fn test_navigate_to_sets_active_before_any_report() {
        let mut nav = navigator();
        let mut scroll = RecordingScroll::default();
        let layout = LayoutSnapshot::new(Viewport::new(0.0, 1280.0, 600.0))
            .with_section("archiving", Bounds::new(1000.0, 800.0));

        let offset = nav.navigate_to("archiving", &layout, &mut scroll);

        assert_eq!(offset, Some(900.0));
        assert_eq!(scroll.0, vec![900.0]);
        assert_eq!(nav.active(), "archiving");
        assert_eq!(nav.generation(), 1);
        assert!(nav.is_settling());
    }

    #[test]
    fn test_sections_passed_while_scrolling_do_not_take_over() {
        let mut nav = navigator();
        let mut scroll = RecordingScroll::default();
        let batch = nav.observe(&stacked_layout(0.0));
        nav.apply(batch);

        nav.navigate_to("projects", &stacked_layout(0.0), &mut scroll);

        // Midline passes through skills and archiving on the way down
        for scroll_top in [1200.0, 2200.0] {
            let batch = nav.observe(&stacked_layout(scroll_top));
            assert!(!batch.entries.is_empty());
            assert_eq!(nav.apply(batch), None);
            assert_eq!(nav.active(), "projects");
        }

        nav.settle();
        assert!(!nav.is_settling());

        // Scrolling by hand afterwards is followed again
        let batch = nav.observe(&stacked_layout(0.0));
        assert_eq!(nav.apply(batch), Some("about"));
    }

    #[test]
    fn test_navigate_to_unknown_section_is_noop() {
        let mut nav = navigator();
        let mut scroll = RecordingScroll::default();

        assert_eq!(nav.navigate_to("contact", &stacked_layout(0.0), &mut scroll), None);
        assert_eq!(nav.active(), "about");
        assert_eq!(nav.generation(), 0);
        assert!(scroll.0.is_empty());
    }

    #[test]
    fn test_navigate_without_layout_still_activates() {
        let mut nav = navigator();
        let mut scroll = RecordingScroll::default();
        let empty = LayoutSnapshot::default();

        assert_eq!(nav.navigate_to("projects", &empty, &mut scroll), None);
        assert_eq!(nav.active(), "projects");
        assert!(scroll.0.is_empty());
    }

    #[test]
    fn test_stale_batch_is_dropped() {
        let mut nav = navigator();
        let mut scroll = RecordingScroll::default();

        // Observed with the midline inside "skills"
        let stale = nav.observe(&stacked_layout(1200.0));
        nav.navigate_to("projects", &stacked_layout(1200.0), &mut scroll);

        assert_eq!(nav.apply(stale), None);
        assert_eq!(nav.active(), "projects");
    }

    #[test]
    fn test_double_navigation_keeps_second_target() {
        let mut nav = navigator();
        let mut scroll = RecordingScroll::default();
        let layout = stacked_layout(0.0);

        nav.navigate_to("skills", &layout, &mut scroll);
        let in_flight = nav.observe(&stacked_layout(700.0));
        nav.navigate_to("projects", &layout, &mut scroll);

        nav.apply(in_flight);
        assert_eq!(nav.active(), "projects");
        assert_eq!(scroll.0.len(), 2);
    }

    #[test]
    fn test_center_band_follows_scrolling() {
        let mut nav = navigator();

        let batch = nav.observe(&stacked_layout(0.0));
        nav.apply(batch);
        assert_eq!(nav.active(), "about");

        // Midline at 1200 + 300 = 1500 falls inside "skills"
        let batch = nav.observe(&stacked_layout(1200.0));
        assert_eq!(nav.apply(batch), Some("skills"));

        // Midline at 3300 falls inside "projects"
        let batch = nav.observe(&stacked_layout(3000.0));
        assert_eq!(nav.apply(batch), Some("projects"));
    }

    #[test]
    fn test_center_band_follows_scrolling_at_fractional_height() {
        let height = 735.3333;
        let mut nav = navigator();

        let batch = nav.observe(&stacked_layout_with_height(0.0, height));
        nav.apply(batch);
        assert_eq!(nav.active(), "about");

        let batch = nav.observe(&stacked_layout_with_height(1200.0, height));
        assert_eq!(nav.apply(batch), Some("skills"));

        let batch = nav.observe(&stacked_layout_with_height(0.0, height));
        assert_eq!(nav.apply(batch), Some("about"));
    }

    #[test]
    fn test_reconfigure_narrows_detection() {
        let mut nav = navigator();
        let batch = nav.observe(&stacked_layout(0.0));
        nav.apply(batch);

        assert!(!nav.reconfigure(ObservationConfig::center_band()));
        assert!(nav.reconfigure(ObservationConfig::section()));
        assert!(!nav.reconfigure(ObservationConfig::section()));

        // Fresh observers report every laid-out section again
        let batch = nav.observe(&stacked_layout(0.0));
        assert_eq!(batch.entries.len(), 4);
    }

    #[test]
    fn test_detach_stops_reports() {
        let mut nav = navigator();
        nav.detach();
        let batch = nav.observe(&stacked_layout(1200.0));
        assert!(batch.entries.is_empty());
    }

    #[test]
    fn test_unsupported_observation_keeps_first_section() {
        let options = NavigatorOptions {
            support: Support::Unavailable,
            ..Default::default()
        };
        let mut nav = SectionNavigator::with_options(default_sections(), options, Duration::ZERO).unwrap();

        let batch = nav.observe(&stacked_layout(3000.0));
        assert_eq!(nav.apply(batch), None);
        assert_eq!(nav.active(), "about");
    }
}
