//! Time-based interpolation for slot offsets
//!
//! ## Atoms
//! - `easing` - Pure easing functions mapping [0, 1] onto [0, 1]
//! - `timing` - Progress and interpolation helpers; time is always passed in
//!
//! ## Molecule
//! - `animator` - A single cancellable offset animation with generation tracking
//!
//! Nothing here reads the clock. Callers hand in an `Instant` on every call,
//! which keeps the scroll engine deterministic under test.

pub mod animator;
pub mod easing;
pub mod timing;

pub use animator::{Animator, AnimatorState, Generation, OffsetAnimation, OffsetTrack};
pub use easing::EasingTypeExt;
