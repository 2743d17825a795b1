// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Digit Source
// ─────────────────────────────────────────────────────────────────────
//! Fractional decimal expansions of mathematical constants.
//!
//! The driver signal only ever sees a `&[u8]` of digits; where those
//! digits come from sits behind [`DigitSource`]. Two spigot expansions
//! ship with the kernel (π and e), and [`PrecomputedDigits`] wraps any
//! externally generated or synthetic sequence.

use std::time::Instant;

use holofield_types::{Constant, HolofieldError, HolofieldResult};

/// Trait for digit sources.
///
/// Returns exactly `count` digits, each in 0..=9.
pub trait DigitSource: Send + Sync {
    fn digits(&self, count: usize) -> HolofieldResult<Vec<u8>>;

    /// Short label used in logs.
    fn label(&self) -> &str;
}

impl DigitSource for Constant {
    fn digits(&self, count: usize) -> HolofieldResult<Vec<u8>> {
        Ok(expand(*self, count))
    }

    fn label(&self) -> &str {
        self.name()
    }
}

/// A fixed, pre-computed digit sequence.
#[derive(Debug, Clone)]
pub struct PrecomputedDigits {
    digits: Vec<u8>,
}

impl PrecomputedDigits {
    /// Wrap a digit vector. Every entry must be in 0..=9.
    pub fn new(digits: Vec<u8>) -> HolofieldResult<Self> {
        if let Some(pos) = digits.iter().position(|&d| d > 9) {
            return Err(HolofieldError::Validation(format!(
                "digit at index {pos} is {}, expected 0..=9",
                digits[pos]
            )));
        }
        Ok(Self { digits })
    }

    /// Parse from text, see [`parse_digits`].
    pub fn from_text(text: &str) -> HolofieldResult<Self> {
        Ok(Self {
            digits: parse_digits(text)?,
        })
    }

    pub fn len(&self) -> usize {
        self.digits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.digits
    }
}

impl DigitSource for PrecomputedDigits {
    fn digits(&self, count: usize) -> HolofieldResult<Vec<u8>> {
        if self.digits.len() < count {
            return Err(HolofieldError::InsufficientSource {
                required: count,
                available: self.digits.len(),
            });
        }
        Ok(self.digits[..count].to_vec())
    }

    fn label(&self) -> &str {
        "precomputed"
    }
}

/// First `count` fractional digits of `constant`.
pub fn expand(constant: Constant, count: usize) -> Vec<u8> {
    let start = Instant::now();
    let digits = match constant {
        Constant::Pi => pi_fraction_digits(count),
        Constant::E => e_fraction_digits(count),
    };
    log::debug!(
        "expanded {count} digits of {} in {:.1} ms",
        constant.name(),
        start.elapsed().as_secs_f64() * 1000.0
    );
    digits
}

/// Parse a digit string such as `"3.14159 26535"` or `"1415926535"`.
///
/// Whitespace is ignored and an integer part followed by `.` is dropped.
pub fn parse_digits(text: &str) -> HolofieldResult<Vec<u8>> {
    let text = text.trim();
    let fraction = match text.split_once('.') {
        Some((int_part, rest)) => {
            if !int_part.chars().all(|c| c.is_ascii_digit()) {
                return Err(HolofieldError::Validation(format!(
                    "invalid integer part '{int_part}' before '.'"
                )));
            }
            rest
        }
        None => text,
    };

    let mut digits = Vec::with_capacity(fraction.len());
    for (pos, ch) in fraction.char_indices() {
        if ch.is_whitespace() {
            continue;
        }
        match ch.to_digit(10) {
            Some(d) => digits.push(d as u8),
            None => {
                return Err(HolofieldError::Validation(format!(
                    "unexpected character '{ch}' at offset {pos} in digit text"
                )))
            }
        }
    }
    Ok(digits)
}

// ── π: base-10⁴ spigot ──────────────────────────────────────────────

const SPIGOT_BASE: u64 = 10_000;
/// Series terms consumed per emitted 4-digit chunk.
const TERMS_PER_CHUNK: usize = 14;
/// Extra chunks so the trailing requested digits are settled.
const GUARD_CHUNKS: usize = 3;

/// Rabinowitz–Wagon spigot emitting four digits per outer pass.
///
/// Chunks can exceed 9999, so carries are pushed back into the
/// previous chunk before the digits are split out.
fn pi_fraction_digits(count: usize) -> Vec<u8> {
    if count == 0 {
        return Vec::new();
    }

    // +1 for the integer digit 3
    let n_chunks = (count + 1).div_ceil(4) + GUARD_CHUNKS;
    let mut c = n_chunks * TERMS_PER_CHUNK;
    let mut f = vec![SPIGOT_BASE / 5; c + 1];
    f[c] = 0;

    let mut chunks: Vec<u64> = Vec::with_capacity(n_chunks);
    let mut carry = 0u64;

    while c > 0 {
        let mut d = 0u64;
        let mut g = (2 * c) as u64;
        let mut b = c;
        loop {
            d += f[b] * SPIGOT_BASE;
            g -= 1;
            f[b] = d % g;
            d /= g;
            g -= 1;
            b -= 1;
            if b == 0 {
                break;
            }
            d *= b as u64;
        }
        chunks.push(carry + d / SPIGOT_BASE);
        carry = d % SPIGOT_BASE;
        c -= TERMS_PER_CHUNK;
    }

    for i in (1..chunks.len()).rev() {
        if chunks[i] >= SPIGOT_BASE {
            chunks[i - 1] += chunks[i] / SPIGOT_BASE;
            chunks[i] %= SPIGOT_BASE;
        }
    }

    chunks
        .iter()
        .flat_map(|&v| {
            [
                (v / 1000 % 10) as u8,
                (v / 100 % 10) as u8,
                (v / 10 % 10) as u8,
                (v % 10) as u8,
            ]
        })
        .skip(1)
        .take(count)
        .collect()
}

// ── e: mixed-radix spigot ───────────────────────────────────────────

const E_GUARD_DIGITS: usize = 8;

/// Sale's spigot: e − 2 = Σ 1/k! held as mixed-radix digits with bases
/// 2, 3, 4, …; each ×10 pass carries one decimal digit out the top.
fn e_fraction_digits(count: usize) -> Vec<u8> {
    if count == 0 {
        return Vec::new();
    }

    // Smallest m with log10((m+1)!) > count + guard.
    let target = (count + E_GUARD_DIGITS) as f64;
    let mut log_fact = 0.0f64;
    let mut m = 0usize;
    while log_fact <= target {
        m += 1;
        log_fact += ((m + 1) as f64).log10();
    }

    let mut a = vec![1u64; m];
    let mut out = Vec::with_capacity(count);
    for _ in 0..count {
        let mut carry = 0u64;
        for i in (0..m).rev() {
            let base = (i + 2) as u64;
            let x = a[i] * 10 + carry;
            a[i] = x % base;
            carry = x / base;
        }
        out.push(carry as u8);
    }
    out
}
