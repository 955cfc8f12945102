// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Per-region visibility tracking.
//!
//! A [`VisibilityTracker`] is attached when its region is first rendered and
//! detached when the region goes away. While attached it keeps the region's
//! last known intersecting state and a one-shot grace flag used to skip the
//! enter animation on first paint.

use std::time::Duration;

use super::observer::{IntersectionEntry, IntersectionObserver, ObservationConfig, RegionId};
use crate::util::geometry::{Bounds, Viewport};

/// Delay after attach before enter/exit animations are allowed.
pub const DEFAULT_GRACE: Duration = Duration::from_millis(200);

/// Whether intersection observation is available to a tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Support {
    Available,
    /// Degraded mode: the region never reports as intersecting.
    Unavailable,
}

/// What the renderer reads from a tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Visibility {
    pub is_intersecting: bool,
    pub has_passed_initial_grace: bool,
    /// False once detached or when running without an observer.
    pub observing: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerState {
    Pending,
    Fired,
    Cancelled,
}

/// A timer that fires at most once and can be cancelled before it does.
#[derive(Debug)]
struct OneShotTimer {
    deadline: Duration,
    state: TimerState,
}

impl OneShotTimer {
    fn arm(now: Duration, delay: Duration) -> Self {
        Self {
            deadline: now + delay,
            state: TimerState::Pending,
        }
    }

    /// True exactly once, on the first poll at or after the deadline.
    fn poll(&mut self, now: Duration) -> bool {
        if self.state == TimerState::Pending && now >= self.deadline {
            self.state = TimerState::Fired;
            return true;
        }
        false
    }

    fn cancel(&mut self) {
        if self.state == TimerState::Pending {
            self.state = TimerState::Cancelled;
        }
    }

    fn pending_deadline(&self) -> Option<Duration> {
        (self.state == TimerState::Pending).then_some(self.deadline)
    }
}

/// Tracks whether one rendered region is within (or near) the viewport.
#[derive(Debug)]
pub struct VisibilityTracker {
    id: RegionId,
    config: ObservationConfig,
    support: Support,
    /// `None` when detached or unsupported.
    observer: Option<IntersectionObserver>,
    attached: bool,
    is_intersecting: bool,
    has_passed_initial_grace: bool,
    grace: OneShotTimer,
}

impl VisibilityTracker {
    /// Attach a tracker with the default grace period.
    #[cfg(test)]
    pub fn attach(id: impl Into<RegionId>, config: ObservationConfig, now: Duration) -> Self {
        Self::attach_with(id, config, now, DEFAULT_GRACE, Support::Available)
    }

    /// Attach a tracker that has no intersection observation available.
    #[cfg(test)]
    pub fn unsupported(id: impl Into<RegionId>, config: ObservationConfig, now: Duration) -> Self {
        Self::attach_with(id, config, now, DEFAULT_GRACE, Support::Unavailable)
    }

    pub fn attach_with(
        id: impl Into<RegionId>,
        config: ObservationConfig,
        now: Duration,
        grace: Duration,
        support: Support,
    ) -> Self {
        let id = id.into();

        let observer = match support {
            Support::Available => {
                log::debug!("Observing region '{}' ({:?})", id, config);
                Some(Self::establish(&id, config))
            }
            Support::Unavailable => {
                log::warn!(
                    "Intersection observation unavailable, region '{}' is shown without animation",
                    id
                );
                None
            }
        };

        Self {
            id,
            config,
            support,
            observer,
            attached: true,
            is_intersecting: false,
            has_passed_initial_grace: false,
            grace: OneShotTimer::arm(now, grace),
        }
    }

    fn establish(id: &RegionId, config: ObservationConfig) -> IntersectionObserver {
        let mut observer = IntersectionObserver::new(config);
        observer.observe(id.clone());
        observer
    }

    pub fn id(&self) -> &RegionId {
        &self.id
    }

    #[cfg(test)]
    pub fn config(&self) -> &ObservationConfig {
        &self.config
    }

    #[cfg(test)]
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Evaluate the region against the viewport and apply the report, if
    /// any. `bounds` is `None` while the region has no layout yet.
    pub fn observe(
        &mut self,
        viewport: &Viewport,
        bounds: Option<Bounds>,
    ) -> Option<IntersectionEntry> {
        if !self.attached {
            return None;
        }

        let observer = self.observer.as_mut()?;
        let entry = observer.evaluate(viewport, |_| bounds).pop()?;
        self.apply(&entry);
        Some(entry)
    }

    /// Apply a report. Returns false if it was ignored.
    pub fn apply(&mut self, entry: &IntersectionEntry) -> bool {
        if !self.attached || self.observer.is_none() || entry.target != self.id {
            return false;
        }
        self.is_intersecting = entry.is_intersecting;
        true
    }

    /// Replace the observation config, re-establishing observation if it
    /// changed. The last intersecting state is kept until the new observer
    /// reports.
    pub fn reconfigure(&mut self, config: ObservationConfig) -> bool {
        if !self.attached || config == self.config {
            return false;
        }

        log::debug!(
            "Re-observing region '{}' ({:?} -> {:?})",
            self.id,
            self.config,
            config
        );
        self.config = config;
        if let Some(observer) = self.observer.as_mut() {
            observer.disconnect();
        }
        if self.support == Support::Available {
            self.observer = Some(Self::establish(&self.id, config));
        }
        true
    }

    /// Advance the grace timer. True only on the call that ends the grace
    /// period.
    pub fn tick(&mut self, now: Duration) -> bool {
        if self.grace.poll(now) {
            self.has_passed_initial_grace = true;
            log::debug!("Grace period over for region '{}'", self.id);
            return true;
        }
        false
    }

    /// Tick, then read.
    #[cfg(test)]
    pub fn poll(&mut self, now: Duration) -> Visibility {
        self.tick(now);
        self.visibility()
    }

    /// When the pending grace timer is due, if it has not fired yet.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.grace.pending_deadline()
    }

    pub fn visibility(&self) -> Visibility {
        Visibility {
            is_intersecting: self.is_intersecting,
            has_passed_initial_grace: self.has_passed_initial_grace,
            observing: self.attached && self.observer.is_some(),
        }
    }

    /// Release observation and cancel the grace timer. Returns false if the
    /// tracker was already detached.
    pub fn detach(&mut self) -> bool {
        if !self.attached {
            return false;
        }

        self.attached = false;
        if let Some(mut observer) = self.observer.take() {
            observer.unobserve(&self.id);
        }
        self.grace.cancel();
        log::debug!("Released region '{}'", self.id);
        true
    }
}

impl Drop for VisibilityTracker {
    fn drop(&mut self) {
        self.detach();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    fn viewport() -> Viewport {
        Viewport::new(0.0, 800.0, 600.0)
    }

    fn on_screen() -> Option<Bounds> {
        Some(Bounds::new(100.0, 300.0))
    }

    fn off_screen() -> Option<Bounds> {
        Some(Bounds::new(5000.0, 300.0))
    }

    #[test]
    fn test_grace_flag_flips_once_after_delay() {
        let mut tracker = VisibilityTracker::attach("row", ObservationConfig::reveal(), ms(1000));

        assert!(!tracker.poll(ms(1000)).has_passed_initial_grace);
        assert!(!tracker.poll(ms(1199)).has_passed_initial_grace);
        assert_eq!(tracker.next_deadline(), Some(ms(1200)));

        assert!(tracker.tick(ms(1200)));
        assert!(!tracker.tick(ms(1300)));
        assert!(tracker.visibility().has_passed_initial_grace);
        assert_eq!(tracker.next_deadline(), None);
    }

    #[test]
    fn test_grace_is_independent_of_intersection() {
        let mut tracker = VisibilityTracker::attach("row", ObservationConfig::reveal(), ms(0));
        tracker.observe(&viewport(), on_screen());
        tracker.observe(&viewport(), off_screen());

        for t in [200, 250, 10_000] {
            assert!(tracker.poll(ms(t)).has_passed_initial_grace);
        }
    }

    #[test]
    fn test_every_report_is_applied() {
        let mut tracker = VisibilityTracker::attach("row", ObservationConfig::reveal(), ms(0));
        assert!(!tracker.visibility().is_intersecting);

        assert!(tracker.observe(&viewport(), on_screen()).is_some());
        assert!(tracker.visibility().is_intersecting);

        // No change, no report
        assert!(tracker.observe(&viewport(), on_screen()).is_none());

        let entry = tracker.observe(&viewport(), off_screen()).unwrap();
        assert!(!entry.is_intersecting);
        assert!(!tracker.visibility().is_intersecting);
    }

    #[test]
    fn test_reports_for_other_regions_are_ignored() {
        let mut tracker = VisibilityTracker::attach("row", ObservationConfig::reveal(), ms(0));
        let foreign = IntersectionEntry {
            target: "other".into(),
            is_intersecting: true,
            intersection_ratio: 1.0,
        };
        assert!(!tracker.apply(&foreign));
        assert!(!tracker.visibility().is_intersecting);
    }

    #[test]
    fn test_detach_twice_is_a_noop() {
        let mut tracker = VisibilityTracker::attach("row", ObservationConfig::reveal(), ms(0));
        tracker.observe(&viewport(), on_screen());

        assert!(tracker.detach());
        assert!(!tracker.detach());

        assert!(tracker.observe(&viewport(), off_screen()).is_none());
        // Still the last value seen before detaching
        assert!(tracker.visibility().is_intersecting);
        assert!(!tracker.visibility().observing);
    }

    #[test]
    fn test_detach_cancels_grace_timer() {
        let mut tracker = VisibilityTracker::attach("row", ObservationConfig::reveal(), ms(0));
        tracker.detach();
        assert!(!tracker.tick(ms(500)));
        assert!(!tracker.visibility().has_passed_initial_grace);
        assert_eq!(tracker.next_deadline(), None);
    }

    #[test]
    fn test_reconfigure_keeps_state_and_reports_again() {
        let mut tracker = VisibilityTracker::attach("row", ObservationConfig::reveal(), ms(0));
        tracker.observe(&viewport(), on_screen());

        assert!(!tracker.reconfigure(ObservationConfig::reveal()));
        assert!(tracker.reconfigure(ObservationConfig::section()));
        assert_eq!(tracker.config(), &ObservationConfig::section());
        assert!(tracker.visibility().is_intersecting);

        // Fresh observer delivers an initial report even without a change
        let entry = tracker.observe(&viewport(), on_screen()).unwrap();
        assert!(entry.is_intersecting);
    }

    #[test]
    fn test_unsupported_never_intersects() {
        let mut tracker =
            VisibilityTracker::unsupported("row", ObservationConfig::reveal(), ms(0));

        assert!(tracker.observe(&viewport(), on_screen()).is_none());
        let entry = IntersectionEntry {
            target: "row".into(),
            is_intersecting: true,
            intersection_ratio: 1.0,
        };
        assert!(!tracker.apply(&entry));

        let visibility = tracker.poll(ms(200));
        assert!(!visibility.is_intersecting);
        assert!(!visibility.observing);
        assert!(visibility.has_passed_initial_grace);
    }
}
