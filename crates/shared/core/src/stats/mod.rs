//! Floating-point statistics for feature computation
//!
//! Recursive and trailing-window estimators fed one observation at a time,
//! in row order. They never look at an observation before it is pushed,
//! which keeps every derived value a function of rows up to the current one.
//!
//! # Design
//!
//! - `Ema`: recursive average seeded with the first observation (no warm-up)
//! - `RollingWindow`: fixed-length trailing window over optional values;
//!   aggregates are `None` until the window is full of known values

mod ema;
mod rolling;

pub use ema::Ema;
pub use rolling::RollingWindow;

/// Natural log return between two prices
#[inline]
pub fn log_return(from: f64, to: f64) -> f64 {
    (to / from).ln()
}
