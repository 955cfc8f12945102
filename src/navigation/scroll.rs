// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Smooth scrolling.
//!
//! The navigator issues fire-and-forget scroll commands through
//! [`ScrollCommand`]. [`SmoothScroll`] is the animator the app owns: it eases
//! the scroll offset toward the latest target with exponential decay, and a
//! new command simply replaces the target of the one in flight.

/// Capability to start a smooth scroll to a document offset.
pub trait ScrollCommand {
    fn smooth_scroll_to(&mut self, offset: f32);
}

/// Distance (in points) under which the animation snaps to its target.
const SNAP_DISTANCE: f32 = 0.5;

/// Exponential ease-out scroll animator.
#[derive(Debug, Clone)]
pub struct SmoothScroll {
    /// Current scroll offset
    offset: f32,
    /// Largest reachable offset, once the scroll area has reported it
    max_offset: Option<f32>,
    /// Offset being animated toward
    target: Option<f32>,
    /// Decay rate per second; higher settles faster
    speed: f32,
}

impl Default for SmoothScroll {
    fn default() -> Self {
        Self::new(10.0)
    }
}

impl SmoothScroll {
    pub fn new(speed: f32) -> Self {
        Self {
            offset: 0.0,
            max_offset: None,
            target: None,
            speed: speed.max(0.1),
        }
    }

    /// Record the scroll area's actual state after layout.
    pub fn sync(&mut self, offset: f32, max_offset: f32) {
        self.max_offset = Some(max_offset.max(0.0));
        if self.target.is_none() {
            self.offset = offset;
        }
        if let Some(target) = self.target {
            self.target = Some(self.clamp(target));
        }
    }

    #[cfg(test)]
    pub fn offset(&self) -> f32 {
        self.offset
    }

    #[cfg(test)]
    pub fn target(&self) -> Option<f32> {
        self.target
    }

    pub fn is_animating(&self) -> bool {
        self.target.is_some()
    }

    /// Drop the in-flight animation, e.g. when the user scrolls by hand.
    pub fn cancel(&mut self) {
        if self.target.take().is_some() {
            log::debug!("Smooth scroll cancelled at {:.1}", self.offset);
        }
    }

    /// Advance the animation by `dt` seconds. Returns the offset to apply,
    /// or `None` when idle.
    pub fn step(&mut self, dt: f32) -> Option<f32> {
        let target = self.target?;

        let factor = 1.0 - (-self.speed * dt.max(0.0)).exp();
        self.offset += (target - self.offset) * factor;

        if (target - self.offset).abs() < SNAP_DISTANCE {
            self.offset = target;
            self.target = None;
        }
        Some(self.offset)
    }

    fn clamp(&self, offset: f32) -> f32 {
        match self.max_offset {
            Some(max) => offset.clamp(0.0, max),
            None => offset.max(0.0),
        }
    }
}

impl ScrollCommand for SmoothScroll {
    fn smooth_scroll_to(&mut self, offset: f32) {
        let target = self.clamp(offset);
        if let Some(previous) = self.target {
            log::debug!("Smooth scroll to {:.1} supersedes {:.1}", target, previous);
        }
        self.target = Some(target);
    }
}
