use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Local};
use tumbler_core::{AppConfig, NumberCounter};

use crate::theme::Theme;
use crate::ticker::RandomSteps;

/// Random values are drawn from this many ticker steps around zero
const RANDOM_SPAN_STEPS: f64 = 40.0;

/// Application mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Normal,
    /// Typing a value; holds the text entered so far
    Input(String),
    Help,
}

/// Direction of the last value change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
    Flat,
}

/// Application state
pub struct App {
    pub config: Arc<AppConfig>,
    pub theme: Theme,
    pub counter: NumberCounter,
    pub mode: Mode,
    /// Scroll to new values instead of jumping
    pub animated: bool,
    pub ticker_enabled: bool,
    pub status_message: Option<String>,
    pub last_change: Option<DateTime<Local>>,
    pub trend: Trend,
    pub should_quit: bool,
    random: RandomSteps,
}

impl App {
    pub fn new(config: Arc<AppConfig>, theme: Theme) -> tumbler_core::Result<Self> {
        let counter = NumberCounter::new(&config.counter, &config.scroll)?;
        let random = RandomSteps::new(
            config.ticker.max_step,
            config.ticker.seed.map(|seed| seed.wrapping_add(1)),
        );

        Ok(Self {
            config,
            theme,
            counter,
            mode: Mode::Normal,
            animated: true,
            ticker_enabled: false,
            status_message: None,
            last_change: None,
            trend: Trend::Flat,
            should_quit: false,
            random,
        })
    }

    /// Value currently shown, zero before the first one is set
    pub fn value(&self) -> f64 {
        self.counter.value().unwrap_or(0.0)
    }

    /// Show a new value; rejected values leave the counter as it was
    pub fn set_value(&mut self, value: f64, now: Instant) -> bool {
        let previous = self.counter.value();
        if let Err(e) = self.counter.set_value(value, self.animated, now) {
            tracing::warn!("Rejected value {}: {}", value, e);
            self.set_status(format!("Rejected {}: {}", value, e));
            return false;
        }

        self.trend = match previous {
            Some(previous) if value > previous => Trend::Up,
            Some(previous) if value < previous => Trend::Down,
            _ => Trend::Flat,
        };
        self.last_change = Some(Local::now());
        true
    }

    pub fn adjust(&mut self, delta: f64, now: Instant) -> bool {
        let value = self.value() + delta;
        self.set_value(value, now)
    }

    pub fn random_value(&mut self, now: Instant) -> bool {
        let span = self.random.max_step() * RANDOM_SPAN_STEPS;
        let value = self.random.next_value(span);
        self.set_value(value, now)
    }

    /// Advance every digit; returns whether anything is still moving
    pub fn tick(&mut self, now: Instant) -> bool {
        self.counter.tick(now)
    }

    pub fn is_animating(&self) -> bool {
        self.counter.is_animating()
    }

    pub fn stop(&mut self, now: Instant) {
        self.counter.stop(now);
        self.set_status("Stopped");
    }

    pub fn toggle_animation(&mut self) {
        self.animated = !self.animated;
        let state = if self.animated { "on" } else { "off" };
        self.set_status(format!("Animation {}", state));
    }

    pub fn toggle_ticker(&mut self) {
        self.ticker_enabled = !self.ticker_enabled;
        let state = if self.ticker_enabled { "started" } else { "stopped" };
        self.set_status(format!("Ticker {}", state));
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn is_input_mode(&self) -> bool {
        matches!(self.mode, Mode::Input(_))
    }

    pub fn start_input(&mut self) {
        self.mode = Mode::Input(String::new());
    }

    pub fn show_help(&mut self) {
        self.mode = Mode::Help;
    }

    pub fn exit_mode(&mut self) {
        self.mode = Mode::Normal;
    }

    /// Append to the input buffer; only characters of a decimal number are kept
    pub fn input_char(&mut self, c: char) {
        if let Mode::Input(buffer) = &mut self.mode {
            if c.is_ascii_digit() || c == '.' || (c == '-' && buffer.is_empty()) {
                buffer.push(c);
            }
        }
    }

    pub fn backspace(&mut self) {
        if let Mode::Input(buffer) = &mut self.mode {
            buffer.pop();
        }
    }

    /// Apply the typed value and return to normal mode
    pub fn confirm_input(&mut self, now: Instant) -> bool {
        let Mode::Input(buffer) = std::mem::replace(&mut self.mode, Mode::Normal) else {
            return false;
        };
        match buffer.parse::<f64>() {
            Ok(value) => self.set_value(value, now),
            Err(_) => {
                self.set_status(format!("Not a number: '{}'", buffer));
                false
            }
        }
    }
}
