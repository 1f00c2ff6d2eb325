//! Headless frame dump of one digit scroll
//!
//! Time is simulated: frames are sampled at fixed steps from a single start
//! instant, so the output only depends on the arguments and config.

use std::time::{Duration, Instant};

use anyhow::{bail, Result};
use clap::Args;
use serde::Serialize;

use tumbler_core::counter::DigitCounter;
use tumbler_core::scroller::ScrollSnapshot;
use tumbler_core::AppConfig;

/// Upper bound on printed frames for a single trace
const MAX_FRAMES: u64 = 10_000;

#[derive(Args, Debug)]
pub struct TraceArgs {
    /// Digit shown before the scroll starts
    #[arg(long, allow_negative_numbers = true)]
    pub from: i64,
    /// Digit to scroll to
    #[arg(long, allow_negative_numbers = true)]
    pub to: i64,
    /// Number of labels on the wheel (0..count); defaults to the configured digit range
    #[arg(long)]
    pub count: Option<u32>,
    /// Interrupt the scroll after this many milliseconds
    #[arg(long, requires = "then")]
    pub interrupt_at: Option<u64>,
    /// Digit to scroll to when interrupting
    #[arg(long, requires = "interrupt_at", allow_negative_numbers = true)]
    pub then: Option<i64>,
    /// Frames per second; defaults to scroll.animation_fps
    #[arg(long)]
    pub fps: Option<u32>,
    /// Print one JSON snapshot per frame
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct Frame<'a> {
    elapsed_ms: u64,
    digit: i64,
    target_digit: i64,
    snapshot: &'a ScrollSnapshot,
}

pub fn run(config: &AppConfig, args: &TraceArgs) -> Result<()> {
    let (min, max) = match args.count {
        Some(count) if count < 2 => bail!("--count must be at least 2"),
        Some(count) => (0, i64::from(count) - 1),
        None => (config.counter.digit_min, config.counter.digit_max),
    };

    let mut counter = DigitCounter::new(min, max, 1, &config.scroll)?;
    counter.set_overlay(config.counter.overlay);

    let fps = args.fps.unwrap_or(config.scroll.animation_fps).max(1);
    let frame = Duration::from_micros(1_000_000 / u64::from(fps));
    let start = Instant::now();

    counter.scroll_to_digit(args.from, false, start)?;
    counter.scroll_to_digit(args.to, true, start)?;
    print_frame(&counter, Duration::ZERO, args.json)?;

    let mut interrupt = args.interrupt_at.zip(args.then);
    for index in 1..=MAX_FRAMES {
        let elapsed = frame * index as u32;
        let now = start + elapsed;

        if let Some((at, digit)) = interrupt {
            if elapsed >= Duration::from_millis(at) {
                tracing::debug!("Interrupting at {:?} with {}", elapsed, digit);
                counter.scroll_to_digit(digit, true, now)?;
                interrupt = None;
            }
        }

        counter.tick(now);
        print_frame(&counter, elapsed, args.json)?;

        if !counter.is_animating() && interrupt.is_none() {
            return Ok(());
        }
    }

    bail!("Scroll did not settle within {} frames", MAX_FRAMES)
}

fn print_frame(counter: &DigitCounter, elapsed: Duration, json: bool) -> Result<()> {
    let snapshot = counter.scroller().snapshot();
    if json {
        let frame = Frame {
            elapsed_ms: elapsed.as_millis() as u64,
            digit: counter.digit(),
            target_digit: counter.target_digit(),
            snapshot: &snapshot,
        };
        println!("{}", serde_json::to_string(&frame)?);
        return Ok(());
    }

    let offsets: Vec<String> = snapshot
        .visible
        .iter()
        .map(|slot| format!("{}:{:+.3}", counter.min() + slot.tag as i64, slot.offset))
        .collect();
    println!(
        "{:>6}ms  digit={} target={}  [{}]",
        elapsed.as_millis(),
        counter.digit(),
        counter.target_digit(),
        offsets.join(" ")
    );
    Ok(())
}
