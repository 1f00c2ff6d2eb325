//! Offset animation controller
//!
//! Owns at most one running `OffsetAnimation`. Every animation gets a fresh
//! `Generation`; completion is only honoured for the generation that is
//! currently running, so a late callback from a superseded animation is a no-op.

use std::fmt;
use std::time::{Duration, Instant};

use super::easing::{EasingType, EasingTypeExt};
use super::timing::{is_complete, lerp, progress};

/// Identity of one started animation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Start and end offset of one slot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OffsetTrack {
    pub tag: usize,
    pub from: f64,
    pub to: f64,
}

/// A running interpolation over a set of slot offsets
#[derive(Debug, Clone)]
pub struct OffsetAnimation {
    generation: Generation,
    tracks: Vec<OffsetTrack>,
    started_at: Instant,
    duration: Duration,
    easing: EasingType,
}

impl OffsetAnimation {
    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn tracks(&self) -> &[OffsetTrack] {
        &self.tracks
    }

    pub fn started_at(&self) -> Instant {
        self.started_at
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    #[inline]
    pub fn is_complete(&self, now: Instant) -> bool {
        is_complete(self.started_at, self.duration, now)
    }

    /// Eased progress in [0, 1]
    pub fn eased_progress(&self, now: Instant) -> f64 {
        self.easing.apply(progress(self.started_at, self.duration, now))
    }

    /// Offsets of every track at `now`
    ///
    /// Once the animation is complete the exact end offsets are returned,
    /// so settled slots land on whole multiples of the item height.
    pub fn sample(&self, now: Instant) -> Vec<(usize, f64)> {
        if self.is_complete(now) {
            return self.end_offsets();
        }
        let t = self.eased_progress(now);
        self.tracks
            .iter()
            .map(|track| (track.tag, lerp(track.from, track.to, t)))
            .collect()
    }

    pub fn end_offsets(&self) -> Vec<(usize, f64)> {
        self.tracks.iter().map(|track| (track.tag, track.to)).collect()
    }
}

/// Lifecycle of the animator
#[derive(Debug, Clone, Default)]
pub enum AnimatorState {
    #[default]
    Idle,
    Animating(OffsetAnimation),
}

#[derive(Debug, Clone, Default)]
pub struct Animator {
    state: AnimatorState,
    issued: u64,
}

impl Animator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &AnimatorState {
        &self.state
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        matches!(self.state, AnimatorState::Animating(_))
    }

    pub fn active(&self) -> Option<&OffsetAnimation> {
        match &self.state {
            AnimatorState::Animating(animation) => Some(animation),
            AnimatorState::Idle => None,
        }
    }

    /// Generation of the running animation, if any
    pub fn generation(&self) -> Option<Generation> {
        self.active().map(OffsetAnimation::generation)
    }

    /// Start a new animation, replacing whatever was running
    pub fn start(
        &mut self,
        tracks: Vec<OffsetTrack>,
        started_at: Instant,
        duration: Duration,
        easing: EasingType,
    ) -> Generation {
        self.issued += 1;
        let generation = Generation(self.issued);
        if let Some(previous) = self.generation() {
            tracing::trace!("Animation {} superseded by {}", previous, generation);
        }
        self.state = AnimatorState::Animating(OffsetAnimation {
            generation,
            tracks,
            started_at,
            duration,
            easing,
        });
        generation
    }

    /// Cancel the running animation and return its offsets frozen at `now`
    pub fn stop(&mut self, now: Instant) -> Option<Vec<(usize, f64)>> {
        match std::mem::take(&mut self.state) {
            AnimatorState::Idle => None,
            AnimatorState::Animating(animation) => {
                tracing::trace!("Animation {} stopped", animation.generation);
                Some(animation.sample(now))
            }
        }
    }

    /// Retire the animation with `generation` if it is the running one
    ///
    /// Returns `None` for stale or unknown generations and leaves the
    /// animator untouched.
    pub fn finish(&mut self, generation: Generation) -> Option<OffsetAnimation> {
        if self.generation() != Some(generation) {
            return None;
        }
        match std::mem::take(&mut self.state) {
            AnimatorState::Animating(animation) => Some(animation),
            AnimatorState::Idle => None,
        }
    }
}
