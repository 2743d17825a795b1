// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Whole / Part History Views
// ─────────────────────────────────────────────────────────────────────
//! The "evolution of the whole" and the "memory of a part" are the
//! same driver prefix Λ[0 ..= t] seen through two names. There is one
//! backing slice and no second buffer to fall out of sync.

use holofield_signal::DriverSignal;

/// Borrowed view of the driver prefix up to the current step.
#[derive(Debug, Clone, Copy)]
pub struct HistoryView<'a> {
    prefix: &'a [f64],
}

impl<'a> HistoryView<'a> {
    /// View covering Λ[0 ..= t].
    pub fn through(signal: &'a DriverSignal, t: usize) -> Self {
        Self {
            prefix: signal.prefix(t),
        }
    }

    /// View before any step has run.
    pub fn empty() -> Self {
        Self { prefix: &[] }
    }

    /// Evolution of the whole.
    pub fn whole(&self) -> &'a [f64] {
        self.prefix
    }

    /// Memory of a part.
    pub fn part(&self) -> &'a [f64] {
        self.prefix
    }

    pub fn len(&self) -> usize {
        self.prefix.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prefix.is_empty()
    }

    /// Most recent driver value.
    pub fn latest(&self) -> Option<f64> {
        self.prefix.last().copied()
    }

    /// Bitwise comparison of the two views.
    pub fn whole_matches_part(&self) -> bool {
        let whole = self.whole();
        let part = self.part();
        whole.len() == part.len()
            && whole
                .iter()
                .zip(part)
                .all(|(w, p)| w.to_bits() == p.to_bits())
    }
}
