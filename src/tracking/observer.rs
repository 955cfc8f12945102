// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Viewport intersection observation.
//!
//! An [`IntersectionObserver`] watches a set of regions and, each time it is
//! evaluated against the current viewport, reports every region whose
//! intersecting state is new or has flipped since the last evaluation.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::util::geometry::{intersect, Bounds, Length, RootMargin, Viewport};

/// Identifies a tracked region (a page section, a screenshot row, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegionId(String);

impl RegionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RegionId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for RegionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// How much of a region must be inside which window to count as visible.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObservationConfig {
    /// Fraction of the region (0.0 to 1.0) that must be visible.
    pub threshold: f32,
    /// Offsets applied to the viewport before intersecting.
    pub root_margin: RootMargin,
}

impl ObservationConfig {
    pub fn new(threshold: f32, root_margin: RootMargin) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
            root_margin,
        }
    }

    /// Cards and screenshot rows.
    pub fn reveal() -> Self {
        Self::new(0.2, RootMargin::uniform(Length::Px(-50.0)))
    }

    /// Whole-section enter/exit animation.
    pub fn section() -> Self {
        Self::new(0.3, RootMargin::uniform(Length::Px(-100.0)))
    }

    /// Thin band at the vertical center of the viewport, for picking the
    /// active section.
    pub fn center_band() -> Self {
        Self::new(
            0.5,
            RootMargin {
                top: Length::Percent(-50.0),
                right: Length::Px(0.0),
                bottom: Length::Percent(-50.0),
                left: Length::Px(0.0),
            },
        )
    }

    /// Intersecting state and ratio for `target` seen through `viewport`.
    pub fn classify(&self, target: Bounds, viewport: &Viewport) -> (bool, f32) {
        match intersect(target, viewport.root_window(&self.root_margin)) {
            Some(ratio) => (ratio >= self.threshold, ratio),
            None => (false, 0.0),
        }
    }
}

impl Default for ObservationConfig {
    fn default() -> Self {
        Self::reveal()
    }
}

/// One report delivered by an observer.
#[derive(Debug, Clone, PartialEq)]
pub struct IntersectionEntry {
    pub target: RegionId,
    pub is_intersecting: bool,
    pub intersection_ratio: f32,
}

#[derive(Debug)]
struct ObservedTarget {
    id: RegionId,
    /// `None` until the first report has been delivered.
    last: Option<bool>,
}

/// Watches regions against the viewport using one [`ObservationConfig`].
#[derive(Debug)]
pub struct IntersectionObserver {
    config: ObservationConfig,
    targets: Vec<ObservedTarget>,
}

impl IntersectionObserver {
    pub fn new(config: ObservationConfig) -> Self {
        Self {
            config,
            targets: Vec::new(),
        }
    }

    /// Start watching `id`. The next evaluation always reports it.
    pub fn observe(&mut self, id: RegionId) {
        if !self.is_observing(&id) {
            self.targets.push(ObservedTarget { id, last: None });
        }
    }

    /// Stop watching `id`. Returns false if it was not observed.
    pub fn unobserve(&mut self, id: &RegionId) -> bool {
        let before = self.targets.len();
        self.targets.retain(|t| &t.id != id);
        self.targets.len() != before
    }

    pub fn disconnect(&mut self) {
        self.targets.clear();
    }

    pub fn is_observing(&self, id: &RegionId) -> bool {
        self.targets.iter().any(|t| &t.id == id)
    }

    /// Evaluate every observed region, in observation order, and return the
    /// batch of changed reports.
    ///
    /// Regions for which `bounds_of` has no geometry (not laid out yet) are
    /// skipped and keep their previous state.
    pub fn evaluate<F>(&mut self, viewport: &Viewport, bounds_of: F) -> Vec<IntersectionEntry>
    where
        F: Fn(&RegionId) -> Option<Bounds>,
    {
        let mut entries = Vec::new();

        for target in &mut self.targets {
            let Some(bounds) = bounds_of(&target.id) else {
                continue;
            };

            let (is_intersecting, ratio) = self.config.classify(bounds, viewport);
            if target.last != Some(is_intersecting) {
                target.last = Some(is_intersecting);
                entries.push(IntersectionEntry {
                    target: target.id.clone(),
                    is_intersecting,
                    intersection_ratio: ratio,
                });
            }
        }

        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Viewport {
        Viewport::new(0.0, 800.0, 600.0)
    }

    #[test]
    fn test_first_evaluation_reports_every_target() {
        let mut observer = IntersectionObserver::new(ObservationConfig::reveal());
        observer.observe("a".into());
        observer.observe("b".into());

        let entries = observer.evaluate(&viewport(), |id| match id.as_str() {
            "a" => Some(Bounds::new(100.0, 200.0)),
            _ => Some(Bounds::new(2000.0, 200.0)),
        });

        assert_eq!(entries.len(), 2);
        assert!(entries[0].is_intersecting);
        assert!(!entries[1].is_intersecting);
    }

    #[test]
    fn test_only_changes_are_reported() {
        let mut observer = IntersectionObserver::new(ObservationConfig::reveal());
        observer.observe("a".into());

        let bounds = Bounds::new(100.0, 200.0);
        assert_eq!(observer.evaluate(&viewport(), |_| Some(bounds)).len(), 1);
        assert!(observer.evaluate(&viewport(), |_| Some(bounds)).is_empty());

        let scrolled = Viewport::new(1500.0, 800.0, 600.0);
        let entries = observer.evaluate(&scrolled, |_| Some(bounds));
        assert_eq!(entries.len(), 1);
        assert!(!entries[0].is_intersecting);
    }

    #[test]
    fn test_threshold_must_be_met() {
        let config = ObservationConfig::new(0.5, RootMargin::ZERO);
        // 100 of 400 visible
        let (meets, ratio) = config.classify(Bounds::new(500.0, 400.0), &viewport());
        assert!(!meets);
        assert!((ratio - 0.25).abs() < 0.0001);
    }

    #[test]
    fn test_unlaid_targets_are_skipped() {
        let mut observer = IntersectionObserver::new(ObservationConfig::reveal());
        observer.observe("a".into());
        assert!(observer.evaluate(&viewport(), |_| None).is_empty());
    }

    #[test]
    fn test_unobserve_and_disconnect() {
        let mut observer = IntersectionObserver::new(ObservationConfig::reveal());
        observer.observe("a".into());
        observer.observe("a".into());
        observer.observe("b".into());

        assert!(observer.unobserve(&"a".into()));
        assert!(!observer.unobserve(&"a".into()));
        assert!(observer.is_observing(&"b".into()));

        observer.disconnect();
        assert!(observer
            .evaluate(&viewport(), |_| Some(Bounds::new(0.0, 100.0)))
            .is_empty());
    }

    #[test]
    fn test_threshold_is_clamped() {
        assert_eq!(ObservationConfig::new(1.7, RootMargin::ZERO).threshold, 1.0);
        assert_eq!(ObservationConfig::new(-0.3, RootMargin::ZERO).threshold, 0.0);
    }
}
