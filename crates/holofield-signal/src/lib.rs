// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Holofield Signal Generator
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Digit sources and the driver signal Λ.
//!
//! - `digits`: spigot expansions of π and e, pre-computed sources
//! - `driver`: moving-average smoothing + normalisation → Λ

pub mod digits;
pub mod driver;

pub use digits::{expand, parse_digits, DigitSource, PrecomputedDigits};
pub use driver::{
    generate_driver_signal, moving_average, normalize_digit_mean, DriverSignal, DIGIT_HALF_RANGE,
    DIGIT_MEAN,
};
