use std::time::{Duration, Instant};

use super::digit::DigitCounter;
use crate::config::{CounterConfig, EasingType, ScrollConfig};
use crate::{Error, Result};

/// A row of digit wheels showing one decimal number
///
/// Digits are kept most significant first. Growing the number adds wheels
/// at the front, starting from the lowest label; shrinking drops them from
/// the front.
#[derive(Debug, Clone)]
pub struct NumberCounter {
    digits: Vec<DigitCounter>,
    value: Option<f64>,
    negative: bool,
    decimal_places: usize,
    prefix: Option<String>,
    suffix: Option<String>,
    separator: String,
    cell_height: u16,
    digit_min: i64,
    digit_max: i64,
    overlay: bool,
    animate_initial: bool,
    scroll: ScrollConfig,
}

impl NumberCounter {
    pub fn new(config: &CounterConfig, scroll: &ScrollConfig) -> Result<Self> {
        if config.digit_min >= config.digit_max {
            return Err(Error::InvalidDigitRange {
                min: config.digit_min,
                max: config.digit_max,
            });
        }

        Ok(Self {
            digits: Vec::new(),
            value: None,
            negative: false,
            decimal_places: config.decimal_places,
            prefix: config.prefix.clone(),
            suffix: config.suffix.clone(),
            separator: config.separator.clone(),
            cell_height: config.cell_height,
            digit_min: config.digit_min,
            digit_max: config.digit_max,
            overlay: config.overlay,
            animate_initial: config.animate_initial,
            scroll: scroll.clone(),
        })
    }

    /// Show `value`, scrolling every wheel to its new digit
    ///
    /// The first value is shown without animation unless the counter was
    /// configured to animate it in.
    pub fn set_value(&mut self, value: f64, animated: bool, now: Instant) -> Result<()> {
        if !value.is_finite() {
            return Err(Error::InvalidValue(value));
        }

        let digits = digits_of(value, self.decimal_places);
        if let Some(&digit) = digits
            .iter()
            .find(|digit| !(self.digit_min..=self.digit_max).contains(*digit))
        {
            return Err(Error::DigitOutOfRange {
                digit,
                min: self.digit_min,
                max: self.digit_max,
            });
        }

        let animated = animated && (self.value.is_some() || self.animate_initial);

        if self.digits.len() > digits.len() {
            let excess = self.digits.len() - digits.len();
            self.digits.drain(..excess);
        }
        while self.digits.len() < digits.len() {
            let counter = self.new_digit()?;
            self.digits.insert(0, counter);
        }

        for (counter, &digit) in self.digits.iter_mut().zip(&digits) {
            counter.scroll_to_digit(digit, animated, now)?;
        }

        tracing::debug!(
            "Counter value {:?} -> {} ({} digits)",
            self.value,
            value,
            digits.len()
        );
        self.negative = value < 0.0 && digits.iter().any(|digit| *digit != 0);
        self.value = Some(value);
        Ok(())
    }

    fn new_digit(&self) -> Result<DigitCounter> {
        let mut counter =
            DigitCounter::new(self.digit_min, self.digit_max, self.cell_height, &self.scroll)?;
        counter.set_overlay(self.overlay);
        Ok(counter)
    }

    pub fn value(&self) -> Option<f64> {
        self.value
    }

    pub fn digits(&self) -> &[DigitCounter] {
        &self.digits
    }

    /// Index of the first fractional digit
    pub fn separator_position(&self) -> Option<usize> {
        if self.decimal_places == 0 || self.digits.is_empty() {
            return None;
        }
        Some(self.digits.len().saturating_sub(self.decimal_places))
    }

    pub fn is_negative(&self) -> bool {
        self.negative
    }

    pub fn decimal_places(&self) -> usize {
        self.decimal_places
    }

    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    pub fn suffix(&self) -> Option<&str> {
        self.suffix.as_deref()
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    pub fn cell_height(&self) -> u16 {
        self.cell_height
    }

    /// Advance every wheel; returns whether any is still moving
    pub fn tick(&mut self, now: Instant) -> bool {
        for counter in &mut self.digits {
            counter.tick(now);
        }
        self.is_animating()
    }

    pub fn is_animating(&self) -> bool {
        self.digits.iter().any(DigitCounter::is_animating)
    }

    pub fn stop(&mut self, now: Instant) {
        for counter in &mut self.digits {
            counter.stop(now);
        }
    }

    pub fn set_overlay(&mut self, enabled: bool) {
        self.overlay = enabled;
        for counter in &mut self.digits {
            counter.set_overlay(enabled);
        }
    }

    pub fn set_duration(&mut self, duration: Duration) {
        self.scroll.duration_ms = duration.as_millis() as u64;
        for counter in &mut self.digits {
            counter.set_duration(duration);
        }
    }

    pub fn set_easing(&mut self, easing: EasingType) {
        self.scroll.easing = easing;
        for counter in &mut self.digits {
            counter.set_easing(easing);
        }
    }
}

/// Decimal digits of `|value|` rounded to `decimal_places`, most significant first
pub fn digits_of(value: f64, decimal_places: usize) -> Vec<i64> {
    format!("{:.*}", decimal_places, value.abs())
        .chars()
        .filter_map(|c| c.to_digit(10))
        .map(i64::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counter(config: CounterConfig) -> NumberCounter {
        let scroll = ScrollConfig {
            duration_ms: 100,
            ..Default::default()
        };
        NumberCounter::new(&config, &scroll).unwrap()
    }

    fn shown(counter: &NumberCounter) -> Vec<i64> {
        counter.digits().iter().map(DigitCounter::target_digit).collect()
    }

    #[test]
    fn test_digits_of() {
        assert_eq!(digits_of(123.0, 0), vec![1, 2, 3]);
        assert_eq!(digits_of(-4.5, 2), vec![4, 5, 0]);
        assert_eq!(digits_of(0.25, 1), vec![0, 2]);
        assert_eq!(digits_of(0.0, 0), vec![0]);
    }

    #[test]
    fn test_first_value_is_not_animated() {
        let now = Instant::now();
        let mut counter = counter(CounterConfig::default());
        counter.set_value(42.0, true, now).unwrap();

        assert!(!counter.is_animating());
        assert_eq!(shown(&counter), vec![4, 2]);
    }

    #[test]
    fn test_animate_initial_scrolls_from_zero() {
        let now = Instant::now();
        let mut counter = counter(CounterConfig {
            animate_initial: true,
            ..Default::default()
        });
        counter.set_value(37.0, true, now).unwrap();

        assert!(counter.is_animating());
        assert_eq!(counter.digits()[0].digit(), 0);
        assert!(!counter.tick(now + Duration::from_millis(100)));
        assert_eq!(shown(&counter), vec![3, 7]);
    }

    #[test]
    fn test_growth_inserts_most_significant() {
        let now = Instant::now();
        let mut counter = counter(CounterConfig::default());
        counter.set_value(5.0, false, now).unwrap();
        counter.set_value(123.0, true, now).unwrap();

        assert_eq!(counter.digits().len(), 3);
        assert_eq!(shown(&counter), vec![1, 2, 3]);
        // The new leading wheel starts from zero
        assert_eq!(counter.digits()[0].scroller().in_flight(), &[0, 1]);

        counter.tick(now + Duration::from_millis(100));
        assert!(!counter.is_animating());
    }

    #[test]
    fn test_shrink_drops_most_significant() {
        let now = Instant::now();
        let mut counter = counter(CounterConfig::default());
        counter.set_value(9876.0, false, now).unwrap();
        counter.set_value(12.0, false, now).unwrap();
        assert_eq!(shown(&counter), vec![1, 2]);
    }

    #[test]
    fn test_decimal_places_and_sign() {
        let now = Instant::now();
        let mut counter = counter(CounterConfig {
            decimal_places: 2,
            prefix: Some("$".into()),
            ..Default::default()
        });
        counter.set_value(-3.14159, false, now).unwrap();

        assert_eq!(shown(&counter), vec![3, 1, 4]);
        assert_eq!(counter.separator_position(), Some(1));
        assert!(counter.is_negative());
        assert_eq!(counter.prefix(), Some("$"));
    }

    #[test]
    fn test_rounded_negative_zero_has_no_sign() {
        let mut counter = counter(CounterConfig::default());
        counter.set_value(-0.2, false, Instant::now()).unwrap();
        assert!(!counter.is_negative());
        assert_eq!(counter.separator_position(), None);
    }

    #[test]
    fn test_rejects_non_finite() {
        let mut counter = counter(CounterConfig::default());
        assert!(matches!(
            counter.set_value(f64::NAN, false, Instant::now()),
            Err(Error::InvalidValue(_))
        ));
        assert!(counter.set_value(f64::INFINITY, false, Instant::now()).is_err());
        assert_eq!(counter.value(), None);
    }

    #[test]
    fn test_rejects_digit_outside_custom_range() {
        let mut counter = counter(CounterConfig {
            digit_min: 0,
            digit_max: 5,
            ..Default::default()
        });
        counter.set_value(12.0, false, Instant::now()).unwrap();
        let err = counter.set_value(17.0, false, Instant::now()).unwrap_err();
        assert!(matches!(err, Error::DigitOutOfRange { digit: 7, .. }));
        assert_eq!(shown(&counter), vec![1, 2]);
    }

    #[test]
    fn test_stop_freezes_all_wheels() {
        let now = Instant::now();
        let mut counter = counter(CounterConfig::default());
        counter.set_value(0.0, false, now).unwrap();
        counter.set_value(5.0, true, now).unwrap();
        counter.stop(now + Duration::from_millis(10));
        assert!(!counter.is_animating());
    }
}
