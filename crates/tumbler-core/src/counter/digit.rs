use std::time::{Duration, Instant};

use crate::config::{EasingType, ScrollConfig, MAX_DIGIT_LABELS};
use crate::scroller::{CircularScroller, Size, SlotItem, TickOutcome};
use crate::{Error, Result};

/// Label carried by one slot of a digit strip
#[derive(Debug, Clone, PartialEq)]
pub struct DigitLabel {
    value: i64,
    text: String,
    size: Size,
}

impl DigitLabel {
    pub fn value(&self) -> i64 {
        self.value
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl SlotItem for DigitLabel {
    fn size(&self) -> Size {
        self.size
    }
}

/// One odometer wheel over the labels `min..=max`
#[derive(Debug, Clone)]
pub struct DigitCounter {
    scroller: CircularScroller<DigitLabel>,
    min: i64,
    max: i64,
    width: usize,
}

impl DigitCounter {
    pub fn new(min: i64, max: i64, cell_height: u16, scroll: &ScrollConfig) -> Result<Self> {
        let labels = i128::from(max) - i128::from(min) + 1;
        if min >= max || labels > i128::from(MAX_DIGIT_LABELS) {
            return Err(Error::InvalidDigitRange { min, max });
        }

        let width = (min..=max)
            .map(|value| value.to_string().chars().count())
            .max()
            .unwrap_or(1);
        let size = Size::new(width as f64, f64::from(cell_height));
        let labels = (min..=max)
            .map(|value| DigitLabel {
                value,
                text: value.to_string(),
                size,
            })
            .collect();

        let scroller = CircularScroller::new(labels, size, scroll)?;
        Ok(Self {
            scroller,
            min,
            max,
            width,
        })
    }

    /// Plain 0-9 wheel
    pub fn decimal(cell_height: u16, scroll: &ScrollConfig) -> Result<Self> {
        Self::new(0, 9, cell_height, scroll)
    }

    pub fn min(&self) -> i64 {
        self.min
    }

    pub fn max(&self) -> i64 {
        self.max
    }

    /// Width of the widest label, in columns
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn cell_height(&self) -> f64 {
        self.scroller.item_size().height
    }

    pub fn contains(&self, digit: i64) -> bool {
        (self.min..=self.max).contains(&digit)
    }

    /// Digit currently at (or closest to) rest
    pub fn digit(&self) -> i64 {
        self.min + self.scroller.current_index() as i64
    }

    pub fn target_digit(&self) -> i64 {
        self.min + self.scroller.target_index() as i64
    }

    pub fn scroll_to_digit(&mut self, digit: i64, animated: bool, now: Instant) -> Result<()> {
        if !self.contains(digit) {
            return Err(Error::DigitOutOfRange {
                digit,
                min: self.min,
                max: self.max,
            });
        }
        self.scroller
            .scroll_to((digit - self.min) as usize, animated, now)
    }

    pub fn tick(&mut self, now: Instant) -> TickOutcome {
        self.scroller.tick(now)
    }

    pub fn stop(&mut self, now: Instant) {
        self.scroller.stop(now);
    }

    pub fn is_animating(&self) -> bool {
        self.scroller.is_animating()
    }

    pub fn set_overlay(&mut self, enabled: bool) {
        self.scroller.set_overlay(enabled);
    }

    pub fn set_duration(&mut self, duration: Duration) {
        self.scroller.set_duration(duration);
    }

    pub fn set_easing(&mut self, easing: EasingType) {
        self.scroller.set_easing(easing);
    }

    pub fn scroller(&self) -> &CircularScroller<DigitLabel> {
        &self.scroller
    }
}
