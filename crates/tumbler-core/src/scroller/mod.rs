//! Circular scroll engine
//!
//! A `CircularScroller` owns a ring of same-sized slots and shows one of them
//! at rest. Scrolling to another slot walks the ring in the shorter direction
//! and animates every slot on the way as one rigid strip: a slot one step
//! further along the walk always sits one item height further from rest.
//!
//! # Lifecycle of a request
//!
//! 1. `stop` freezes a running animation at its interpolated offsets, detaches
//!    slots that have scrolled a full item out of view and reconciles the
//!    current index to the slot closest to rest.
//! 2. The direction is chosen from the reconciled index (shortest walk, ties
//!    forward unless the target is behind). A displaced slot re-settling onto
//!    itself moves toward zero from whichever side it sits on.
//! 3. The walk origin is aligned with the chosen direction, the strip is laid
//!    out from the origin's frozen offset, and a single animation is started.
//! 4. `tick` drives the animation; on completion only the target stays
//!    attached, at offset zero.
//!
//! Non-animated requests take the same path with a zero duration and are
//! advanced immediately.

mod direction;
mod slot;
mod surface;

pub use direction::{backward_distance, forward_distance, ScrollDirection};
pub use slot::{Size, Slot, SlotItem};
pub use surface::{Layer, Surface};

use std::time::{Duration, Instant};

use serde::Serialize;

use crate::animation::{Animator, Generation, OffsetTrack};
use crate::config::{EasingType, ScrollConfig};
use crate::{Error, Result};

/// Relative tolerance for "at rest" and "fully out of view" comparisons
const OFFSET_EPSILON: f64 = 1e-9;

/// Result of advancing the scroller by one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing was running
    Idle,
    /// Offsets moved, the animation continues
    Animating,
    /// The animation finished and the slot at this index is at rest
    Settled(usize),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlotSnapshot {
    pub tag: usize,
    pub offset: f64,
}

/// Serializable view of a scroller's state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScrollSnapshot {
    pub current: usize,
    pub target: usize,
    pub direction: Option<ScrollDirection>,
    pub generation: Option<u64>,
    pub in_flight: Vec<usize>,
    pub layers: Vec<Layer>,
    /// Attached slots, bottom to top
    pub visible: Vec<SlotSnapshot>,
}

#[derive(Debug, Clone)]
pub struct CircularScroller<T> {
    slots: Vec<Slot<T>>,
    item_size: Size,
    current: usize,
    target: usize,
    /// Walk order of the running strip, followed by carried-over slots
    in_flight: Vec<usize>,
    direction: Option<ScrollDirection>,
    surface: Surface,
    animator: Animator,
    duration: Duration,
    easing: EasingType,
}

impl<T: SlotItem> CircularScroller<T> {
    /// Build a scroller showing the first item
    ///
    /// Every item must report `item_size`; the list must not be empty.
    pub fn new(items: Vec<T>, item_size: Size, config: &ScrollConfig) -> Result<Self> {
        if items.is_empty() {
            return Err(Error::EmptyItems);
        }
        if !item_size.is_valid() {
            return Err(Error::InvalidItemExtent {
                width: item_size.width,
                height: item_size.height,
            });
        }
        for (tag, item) in items.iter().enumerate() {
            let actual = item.size();
            if !actual.approx_eq(&item_size) {
                return Err(Error::MismatchedExtent {
                    tag,
                    expected_width: item_size.width,
                    expected_height: item_size.height,
                    actual_width: actual.width,
                    actual_height: actual.height,
                });
            }
        }

        let slots = items
            .into_iter()
            .enumerate()
            .map(|(tag, item)| Slot::new(tag, item))
            .collect();
        let mut surface = Surface::new();
        surface.attach(0);

        Ok(Self {
            slots,
            item_size,
            current: 0,
            target: 0,
            in_flight: Vec::new(),
            direction: None,
            surface,
            animator: Animator::new(),
            duration: config.duration(),
            easing: config.easing,
        })
    }
}

impl<T> CircularScroller<T> {
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Always false; a scroller holds at least one slot
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Index of the settled slot, best effort while animating
    #[inline]
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Index of the most recent request
    #[inline]
    pub fn target_index(&self) -> usize {
        self.target
    }

    pub fn item_size(&self) -> Size {
        self.item_size
    }

    pub fn slots(&self) -> &[Slot<T>] {
        &self.slots
    }

    pub fn slot(&self, tag: usize) -> Option<&Slot<T>> {
        self.slots.get(tag)
    }

    pub fn in_flight(&self) -> &[usize] {
        &self.in_flight
    }

    /// Direction of the running animation
    pub fn direction(&self) -> Option<ScrollDirection> {
        self.direction
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.animator.is_animating()
    }

    pub fn generation(&self) -> Option<Generation> {
        self.animator.generation()
    }

    pub fn is_attached(&self, tag: usize) -> bool {
        self.surface.contains(tag)
    }

    pub fn layers(&self) -> &[Layer] {
        self.surface.layers()
    }

    /// Attached slots from bottom to top
    pub fn visible(&self) -> impl Iterator<Item = &Slot<T>> + '_ {
        self.surface.slots().map(move |tag| &self.slots[tag])
    }

    pub fn has_overlay(&self) -> bool {
        self.surface.has_overlay()
    }

    pub fn set_overlay(&mut self, enabled: bool) {
        self.surface.set_overlay(enabled);
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Applies to the next request; a running animation keeps its timing
    pub fn set_duration(&mut self, duration: Duration) {
        self.duration = duration;
    }

    pub fn easing(&self) -> EasingType {
        self.easing
    }

    pub fn set_easing(&mut self, easing: EasingType) {
        self.easing = easing;
    }

    pub fn snapshot(&self) -> ScrollSnapshot {
        ScrollSnapshot {
            current: self.current,
            target: self.target,
            direction: self.direction,
            generation: self.generation().map(Generation::value),
            in_flight: self.in_flight.clone(),
            layers: self.surface.layers().to_vec(),
            visible: self
                .visible()
                .map(|slot| SlotSnapshot {
                    tag: slot.tag(),
                    offset: slot.offset(),
                })
                .collect(),
        }
    }

    /// Scroll to the slot at `index`
    ///
    /// Preempts any running animation. Out-of-range indices are rejected
    /// without touching the current state.
    pub fn scroll_to(&mut self, index: usize, animated: bool, now: Instant) -> Result<()> {
        let len = self.slots.len();
        if index >= len {
            return Err(Error::IndexOutOfRange { index, len });
        }

        self.stop(now);

        if self.is_settled_at(index) {
            tracing::trace!("Already settled at {}", index);
            return Ok(());
        }

        let direction = self.choose_direction(index);
        tracing::debug!(
            "Scroll {} -> {} {:?} (animated: {})",
            self.current,
            index,
            direction,
            animated
        );
        self.animate_to(index, direction, animated, now);
        Ok(())
    }

    /// Interrupt the running animation
    ///
    /// Offsets freeze at their value at `now`, slots that left the view are
    /// detached and the current index moves to the slot closest to rest.
    /// An animation whose time is already up completes normally instead.
    pub fn stop(&mut self, now: Instant) {
        if let Some(animation) = self.animator.active() {
            if animation.is_complete(now) {
                let generation = animation.generation();
                self.complete(generation);
                return;
            }
        }

        if let Some(frozen) = self.animator.stop(now) {
            for (tag, offset) in frozen {
                self.slots[tag].set_offset(offset);
            }
        }
        self.remove_dangling();
        self.reconcile_closest();

        if self.in_flight.is_empty() && !self.surface.contains(self.current) {
            let current = self.current;
            self.settle_at(current);
        }
    }

    /// Advance the running animation to `now`
    pub fn tick(&mut self, now: Instant) -> TickOutcome {
        let Some(animation) = self.animator.active() else {
            return TickOutcome::Idle;
        };
        let generation = animation.generation();
        let complete = animation.is_complete(now);
        for (tag, offset) in animation.sample(now) {
            self.slots[tag].set_offset(offset);
        }

        if complete && self.complete(generation) {
            TickOutcome::Settled(self.current)
        } else {
            tracing::trace!("Frame for {}", generation);
            TickOutcome::Animating
        }
    }

    /// Completion callback for the animation with `generation`
    ///
    /// Returns false, changing nothing, when that animation is no longer the
    /// running one.
    pub fn complete(&mut self, generation: Generation) -> bool {
        let Some(animation) = self.animator.finish(generation) else {
            tracing::trace!("Ignoring completion of stale animation {}", generation);
            return false;
        };
        for (tag, offset) in animation.end_offsets() {
            self.slots[tag].set_offset(offset);
        }

        let target = self.target;
        self.settle_at(target);
        tracing::debug!("Settled at {} after {}", target, generation);
        true
    }

    fn is_settled_at(&self, index: usize) -> bool {
        self.in_flight.is_empty()
            && !self.animator.is_animating()
            && self.current == index
            && self.surface.contains(index)
            && self.is_at_rest(index)
    }

    fn is_at_rest(&self, tag: usize) -> bool {
        self.slots[tag].offset().abs() <= OFFSET_EPSILON * self.item_size.height
    }

    fn settle_at(&mut self, index: usize) {
        self.current = index;
        self.target = index;
        self.direction = None;
        self.in_flight.clear();
        self.surface.retain_only(index);
        self.surface.attach(index);
        self.slots[index].set_offset(0.0);
    }

    /// Pick the new current slot from a frozen strip: the one closest to rest
    fn reconcile_closest(&mut self) {
        match self.in_flight.len() {
            0 => {}
            1 => self.current = self.in_flight[0],
            _ => {
                let slots = &self.slots;
                self.in_flight
                    .sort_by(|a, b| slots[*a].offset().abs().total_cmp(&slots[*b].offset().abs()));
                for tag in self.in_flight.split_off(2) {
                    self.surface.detach(tag);
                }
                self.current = self.in_flight[0];
            }
        }

        if let [only] = self.in_flight[..] {
            if self.is_at_rest(only) {
                self.settle_at(only);
            }
        }
    }

    fn choose_direction(&self, target: usize) -> ScrollDirection {
        if self.current == target {
            // Displaced onto itself: come back from the side it sits on
            return if self.slots[target].offset() > 0.0 {
                ScrollDirection::Backward
            } else {
                ScrollDirection::Forward
            };
        }
        ScrollDirection::shortest(self.current, target, self.slots.len())
    }

    /// With two slots in flight, start the walk from the one downstream of
    /// `direction` so a resumed scroll keeps moving the same way
    fn align_origin(&mut self, direction: ScrollDirection) {
        if self.in_flight.len() < 2 {
            return;
        }
        let sign = direction.sign();
        let (first, second) = (self.in_flight[0], self.in_flight[1]);
        let origin = if self.slots[first].offset() * sign > 0.0 {
            first
        } else if self.slots[second].offset() * sign > 0.0 {
            second
        } else {
            first
        };

        if origin == second {
            self.in_flight.swap(0, 1);
        }
        self.current = origin;
    }

    fn animate_to(&mut self, target: usize, direction: ScrollDirection, animated: bool, now: Instant) {
        self.align_origin(direction);

        let len = self.slots.len();
        let extent = self.item_size.height;
        let sign = direction.sign();
        let origin = self.current;
        let base = if self.surface.contains(origin) {
            self.slots[origin].offset()
        } else {
            0.0
        };

        let mut path = Vec::with_capacity(direction.distance(origin, target, len) + 1);
        let mut index = origin;
        loop {
            path.push(index);
            if index == target {
                break;
            }
            index = direction.step(index, len);
        }

        let count = path.len();
        let mut tracks = Vec::with_capacity(count + self.in_flight.len());
        for (distance, &tag) in path.iter().enumerate() {
            let from = base - sign * distance as f64 * extent;
            let to = sign * (count - distance - 1) as f64 * extent;
            self.surface.attach(tag);
            self.slots[tag].set_offset(from);
            tracks.push(OffsetTrack { tag, from, to });
        }

        // Slots left over from an interrupted strip ride along and leave the view
        let displacement = sign * (count - 1) as f64 * extent - base;
        let carried: Vec<usize> = self
            .in_flight
            .iter()
            .copied()
            .filter(|tag| !path.contains(tag))
            .collect();
        for &tag in &carried {
            let from = self.slots[tag].offset();
            tracks.push(OffsetTrack {
                tag,
                from,
                to: from + displacement,
            });
        }

        self.in_flight = path;
        self.in_flight.extend(carried);
        self.target = target;
        self.direction = Some(direction);

        let duration = if animated { self.duration } else { Duration::ZERO };
        let generation = self.animator.start(tracks, now, duration, self.easing);
        tracing::trace!(
            "Started {} over {} slots ({:?})",
            generation,
            self.in_flight.len(),
            duration
        );

        if !animated {
            self.tick(now);
        }
    }

    /// Detach in-flight slots that are a full item out of view
    fn remove_dangling(&mut self) {
        let limit = self.item_size.height * (1.0 - OFFSET_EPSILON);
        for &tag in &self.in_flight {
            if self.slots[tag].offset().abs() >= limit {
                self.surface.detach(tag);
            }
        }
        let surface = &self.surface;
        self.in_flight.retain(|tag| surface.contains(*tag));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const UNIT: Size = Size::new(1.0, 1.0);

    #[derive(Debug, Clone)]
    struct Cell(Size);

    impl SlotItem for Cell {
        fn size(&self) -> Size {
            self.0
        }
    }

    fn config() -> ScrollConfig {
        ScrollConfig {
            duration_ms: 1000,
            easing: EasingType::Linear,
            ..Default::default()
        }
    }

    fn scroller(len: usize) -> CircularScroller<Cell> {
        CircularScroller::new(vec![Cell(UNIT); len], UNIT, &config()).unwrap()
    }

    fn ms(start: Instant, millis: u64) -> Instant {
        start + Duration::from_millis(millis)
    }

    fn offset(scroller: &CircularScroller<Cell>, tag: usize) -> f64 {
        scroller.slot(tag).unwrap().offset()
    }

    fn attached(scroller: &CircularScroller<Cell>) -> Vec<usize> {
        scroller.visible().map(|slot| slot.tag()).collect()
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!((actual - expected).abs() < 1e-6, "expected {expected}, got {actual}");
    }

    #[test]
    fn test_rejects_empty_items() {
        let result = CircularScroller::<Cell>::new(Vec::new(), UNIT, &config());
        assert!(matches!(result, Err(Error::EmptyItems)));
    }

    #[test]
    fn test_rejects_mismatched_item() {
        let items = vec![Cell(UNIT), Cell(Size::new(1.0, 2.0)), Cell(UNIT)];
        let result = CircularScroller::new(items, UNIT, &config());
        assert!(matches!(result, Err(Error::MismatchedExtent { tag: 1, .. })));
    }

    #[test]
    fn test_rejects_zero_height() {
        let zero = Size::new(1.0, 0.0);
        let result = CircularScroller::new(vec![Cell(zero)], zero, &config());
        assert!(matches!(result, Err(Error::InvalidItemExtent { .. })));
    }

    #[test]
    fn test_initial_state() {
        let s = scroller(10);
        assert_eq!(s.current_index(), 0);
        assert_eq!(attached(&s), vec![0]);
        assert_eq!(offset(&s, 0), 0.0);
        assert!(!s.is_animating());
        assert!(s.in_flight().is_empty());
    }

    #[test]
    fn test_out_of_range_leaves_animation_running() {
        let t0 = Instant::now();
        let mut s = scroller(10);
        s.scroll_to(3, true, t0).unwrap();
        let generation = s.generation();

        let err = s.scroll_to(10, true, ms(t0, 100)).unwrap_err();
        assert!(matches!(err, Error::IndexOutOfRange { index: 10, len: 10 }));
        assert_eq!(s.generation(), generation);
        assert_eq!(s.in_flight(), &[0, 1, 2, 3]);
    }

    #[test]
    fn test_forward_strip_layout() {
        let t0 = Instant::now();
        let mut s = scroller(10);
        s.scroll_to(3, true, t0).unwrap();

        assert_eq!(s.direction(), Some(ScrollDirection::Forward));
        assert_eq!(s.in_flight(), &[0, 1, 2, 3]);
        assert_close(offset(&s, 1), -1.0);
        assert_close(offset(&s, 3), -3.0);

        s.tick(ms(t0, 500));
        assert_close(offset(&s, 0), 1.5);
        assert_close(offset(&s, 1), 0.5);
        assert_close(offset(&s, 2), -0.5);
        assert_close(offset(&s, 3), -1.5);
    }

    #[test]
    fn test_backward_is_shorter_for_seven() {
        let t0 = Instant::now();
        let mut s = scroller(10);
        s.scroll_to(7, true, t0).unwrap();

        assert_eq!(s.direction(), Some(ScrollDirection::Backward));
        assert_eq!(s.in_flight(), &[0, 9, 8, 7]);
        assert_close(offset(&s, 9), 1.0);
        assert_close(offset(&s, 7), 3.0);
    }

    #[test]
    fn test_completion_settles_target() {
        let t0 = Instant::now();
        let mut s = scroller(10);
        s.scroll_to(3, true, t0).unwrap();

        assert_eq!(s.tick(ms(t0, 999)), TickOutcome::Animating);
        assert_eq!(s.tick(ms(t0, 1000)), TickOutcome::Settled(3));
        assert_eq!(s.current_index(), 3);
        assert_eq!(attached(&s), vec![3]);
        assert_eq!(offset(&s, 3), 0.0);
        assert!(s.in_flight().is_empty());
        assert_eq!(s.tick(ms(t0, 1100)), TickOutcome::Idle);
    }

    #[test]
    fn test_non_animated_settles_immediately() {
        let t0 = Instant::now();
        let mut s = scroller(10);
        s.scroll_to(6, false, t0).unwrap();

        assert!(!s.is_animating());
        assert_eq!(s.current_index(), 6);
        assert_eq!(attached(&s), vec![6]);
        assert_eq!(offset(&s, 6), 0.0);
    }

    #[test]
    fn test_scroll_to_settled_index_is_noop() {
        let t0 = Instant::now();
        let mut s = scroller(10);
        s.scroll_to(4, false, t0).unwrap();
        let before = s.snapshot();

        s.scroll_to(4, true, ms(t0, 10)).unwrap();
        assert!(!s.is_animating());
        assert_eq!(s.snapshot(), before);
    }

    #[test]
    fn test_interrupt_reconciles_to_closest_slot() {
        let t0 = Instant::now();
        let mut s = scroller(10);
        s.scroll_to(5, true, t0).unwrap();

        // 36% through a five-step strip: slot 1 at +0.8, slot 2 at -0.2
        s.scroll_to(1, true, ms(t0, 360)).unwrap();

        assert_eq!(s.current_index(), 2);
        assert_eq!(s.direction(), Some(ScrollDirection::Backward));
        assert_eq!(s.in_flight(), &[2, 1]);
        assert_close(offset(&s, 2), -0.2);
        assert_close(offset(&s, 1), 0.8);
        assert_eq!(attached(&s).len(), 2);

        let t1 = ms(t0, 360);
        assert_eq!(s.tick(ms(t1, 1000)), TickOutcome::Settled(1));
        assert_eq!(attached(&s), vec![1]);
    }

    #[test]
    fn test_stale_completion_is_ignored() {
        let t0 = Instant::now();
        let mut s = scroller(10);
        s.scroll_to(5, true, t0).unwrap();
        let stale = s.generation().unwrap();

        s.scroll_to(2, true, ms(t0, 200)).unwrap();
        let before = s.snapshot();

        assert!(!s.complete(stale));
        assert_eq!(s.snapshot(), before);

        let current = s.generation().unwrap();
        assert!(s.complete(current));
        assert_eq!(s.current_index(), 2);
        assert_eq!(attached(&s), vec![2]);
    }

    #[test]
    fn test_overlay_stays_topmost() {
        let t0 = Instant::now();
        let mut s = scroller(10);
        s.set_overlay(true);
        s.scroll_to(3, true, t0).unwrap();

        assert_eq!(s.layers().last(), Some(&Layer::Overlay));
        assert_eq!(s.layers().len(), 5);

        s.tick(ms(t0, 1000));
        assert_eq!(s.layers(), &[Layer::Slot(3), Layer::Overlay]);
    }

    #[test]
    fn test_resettle_onto_displaced_current() {
        let t0 = Instant::now();
        let mut s = scroller(10);
        s.scroll_to(1, true, t0).unwrap();

        // Slot 0 is still closest to rest at +0.3
        s.scroll_to(0, true, ms(t0, 300)).unwrap();
        assert_eq!(s.direction(), Some(ScrollDirection::Backward));
        assert_eq!(s.in_flight(), &[1, 0]);
        assert_close(offset(&s, 0), 0.3);
        assert_close(offset(&s, 1), -0.7);

        s.tick(ms(t0, 1300));
        assert_eq!(s.current_index(), 0);
        assert_eq!(attached(&s), vec![0]);
        assert_eq!(offset(&s, 0), 0.0);
    }

    #[test]
    fn test_stop_detaches_dangling_slots() {
        let t0 = Instant::now();
        let mut s = scroller(10);
        s.scroll_to(3, true, t0).unwrap();

        s.stop(ms(t0, 400));
        assert!(!s.is_animating());
        assert_eq!(s.in_flight(), &[1, 2]);
        assert_eq!(s.current_index(), 1);
        assert!(!s.is_attached(0));
        assert!(!s.is_attached(3));
        assert_close(offset(&s, 1), 0.2);
    }

    #[test]
    fn test_stop_after_deadline_completes() {
        let t0 = Instant::now();
        let mut s = scroller(10);
        s.scroll_to(8, true, t0).unwrap();

        s.stop(ms(t0, 5000));
        assert_eq!(s.current_index(), 8);
        assert_eq!(attached(&s), vec![8]);
        assert!(s.in_flight().is_empty());
    }

    #[test]
    fn test_resume_same_direction_keeps_moving() {
        let t0 = Instant::now();
        let mut s = scroller(10);
        s.scroll_to(2, true, t0).unwrap();

        // Halfway from 0 to 2: slot 1 is at rest, slots 0 and 2 are a full item away
        s.scroll_to(4, true, ms(t0, 500)).unwrap();
        assert_eq!(s.in_flight(), &[1, 2, 3, 4]);
        assert_close(offset(&s, 2), -1.0);

        let before = offset(&s, 2);
        s.tick(ms(t0, 700));
        assert!(offset(&s, 2) > before);
    }

    #[test]
    fn test_single_slot_ring() {
        let t0 = Instant::now();
        let mut s = scroller(1);
        s.scroll_to(0, true, t0).unwrap();
        assert!(!s.is_animating());
        assert_eq!(attached(&s), vec![0]);
    }

    #[test]
    fn test_interrupt_then_jump() {
        let t0 = Instant::now();
        let mut s = scroller(10);
        s.scroll_to(9, true, t0).unwrap();
        s.scroll_to(4, true, ms(t0, 100)).unwrap();
        s.scroll_to(6, false, ms(t0, 250)).unwrap();

        assert!(!s.is_animating());
        assert_eq!(s.current_index(), 6);
        assert_eq!(attached(&s), vec![6]);
        assert_eq!(offset(&s, 6), 0.0);
    }
}
