pub mod animation;
pub mod config;
pub mod counter;
pub mod error;
pub mod scroller;

pub use config::{AppConfig, CounterConfig, EasingType, ScrollConfig};
pub use counter::{DigitCounter, NumberCounter};
pub use error::{Error, Result};
pub use scroller::{CircularScroller, ScrollDirection, Size, SlotItem, TickOutcome};
