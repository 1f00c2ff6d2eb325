//! Counters built from circular scrollers
//!
//! `DigitCounter` is a single odometer wheel; `NumberCounter` lines several of
//! them up to show a signed decimal number.

mod digit;
mod number;

pub use digit::{DigitCounter, DigitLabel};
pub use number::{digits_of, NumberCounter};
