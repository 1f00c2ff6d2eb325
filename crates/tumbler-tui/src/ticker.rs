//! Random-walk value source
//!
//! The ticker runs as a tokio task and sends value deltas to the UI loop over
//! an unbounded channel. It stops on its own once the receiver is dropped.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

use tumbler_core::config::{TickerConfig, MAX_TICKER_STEP};

/// Largest half-width of any range a `RandomSteps` samples from
const MAX_SPAN: f64 = MAX_TICKER_STEP * 1e3;

/// Map a requested half-width onto a finite, non-negative one
fn finite_span(span: f64) -> f64 {
    if span.is_nan() {
        0.0
    } else {
        span.abs().min(MAX_SPAN)
    }
}

/// Uniform random steps within `[-max_step, max_step]`
#[derive(Debug, Clone)]
pub struct RandomSteps {
    rng: StdRng,
    max_step: f64,
}

impl RandomSteps {
    pub fn new(max_step: f64, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        Self {
            rng,
            max_step: finite_span(max_step),
        }
    }

    pub fn max_step(&self) -> f64 {
        self.max_step
    }

    pub fn next_step(&mut self) -> f64 {
        self.rng.random_range(-self.max_step..=self.max_step)
    }

    /// A fresh value anywhere within `[-span, span]`
    pub fn next_value(&mut self, span: f64) -> f64 {
        let span = finite_span(span);
        self.rng.random_range(-span..=span)
    }
}

/// Spawn the ticker task
pub fn spawn_ticker(config: &TickerConfig, tx: UnboundedSender<f64>) -> JoinHandle<()> {
    let mut steps = RandomSteps::new(config.max_step, config.seed);
    let period = Duration::from_millis(config.interval_ms.max(1));

    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        // The first tick completes immediately
        interval.tick().await;

        loop {
            interval.tick().await;
            if tx.send(steps.next_step()).is_err() {
                tracing::debug!("Ticker receiver dropped, stopping");
                break;
            }
        }
    })
}
