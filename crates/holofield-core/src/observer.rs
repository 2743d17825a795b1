// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Frame Observers
// ─────────────────────────────────────────────────────────────────────
//! Presentation seam. The simulation hands each observer a [`Frame`]
//! every `display_interval` steps; what happens next (heat map,
//! line plots, logging, a file) is the observer's business.
//!
//! An observer error aborts the run. There is no retry: a run has no
//! external side effects and is cheap to restart.

use std::io::Write;

use serde::Serialize;

use holofield_grid::PhenomenalGrid;
use holofield_types::{GridStats, HolofieldError, HolofieldResult, RunSummary};

use crate::history::HistoryView;

/// Colour range a renderer should use for the grid.
pub const DISPLAY_RANGE: (f64, f64) = (-1.0, 1.0);

/// One delivery to the presentation layer, after step `step` completed.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub step: usize,
    /// Λ(step), the driver value that produced this grid.
    pub driver: f64,
    pub grid: &'a PhenomenalGrid,
    /// Whole/part views, length `step + 1`.
    pub history: HistoryView<'a>,
}

/// Serialisable digest of a frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameRecord {
    pub step: usize,
    pub driver: f64,
    pub history_len: usize,
    pub whole_matches_part: bool,
    pub grid: GridStats,
    /// Cells a renderer would clip to [`DISPLAY_RANGE`] (non-finite included).
    pub clipped_cells: usize,
}

/// Number of cells outside [`DISPLAY_RANGE`].
pub fn clipped_cells(grid: &PhenomenalGrid) -> usize {
    let (lo, hi) = DISPLAY_RANGE;
    grid.as_slice()
        .iter()
        .filter(|v| !(lo..=hi).contains(*v))
        .count()
}

impl From<&Frame<'_>> for FrameRecord {
    fn from(frame: &Frame<'_>) -> Self {
        Self {
            step: frame.step,
            driver: frame.driver,
            history_len: frame.history.len(),
            whole_matches_part: frame.history.whole_matches_part(),
            grid: frame.grid.stats(),
            clipped_cells: clipped_cells(frame.grid),
        }
    }
}

/// Trait for frame consumers.
pub trait FrameObserver {
    fn on_frame(&mut self, frame: &Frame<'_>) -> HolofieldResult<()>;

    /// Called once after the last step.
    fn on_finish(&mut self, _summary: &RunSummary) -> HolofieldResult<()> {
        Ok(())
    }
}

/// Discards every frame.
pub struct NullObserver;

impl FrameObserver for NullObserver {
    fn on_frame(&mut self, _frame: &Frame<'_>) -> HolofieldResult<()> {
        Ok(())
    }
}

/// Logs a one-line digest per frame at `info`.
#[derive(Default)]
pub struct LogObserver;

impl FrameObserver for LogObserver {
    fn on_frame(&mut self, frame: &Frame<'_>) -> HolofieldResult<()> {
        let stats = frame.grid.stats();
        log::info!(
            "step {:>6}  Λ={:+.5}  Ψ mean={:+.5} var={:.3e} range=[{:+.4}, {:+.4}]",
            frame.step,
            frame.driver,
            stats.mean,
            stats.variance,
            stats.min,
            stats.max
        );
        let clipped = clipped_cells(frame.grid);
        if clipped > 0 {
            log::debug!(
                "step {}: {clipped} of {} cells outside display range {:?}",
                frame.step,
                frame.grid.len(),
                DISPLAY_RANGE
            );
        }
        Ok(())
    }

    fn on_finish(&mut self, summary: &RunSummary) -> HolofieldResult<()> {
        log::info!(
            "run complete: {} steps, {} frames, {:.1} ms",
            summary.steps,
            summary.frames,
            summary.elapsed_ms
        );
        Ok(())
    }
}

/// Keeps every frame digest in memory.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    pub records: Vec<FrameRecord>,
    pub summary: Option<RunSummary>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn steps(&self) -> Vec<usize> {
        self.records.iter().map(|r| r.step).collect()
    }
}

impl FrameObserver for RecordingObserver {
    fn on_frame(&mut self, frame: &Frame<'_>) -> HolofieldResult<()> {
        self.records.push(FrameRecord::from(frame));
        Ok(())
    }

    fn on_finish(&mut self, summary: &RunSummary) -> HolofieldResult<()> {
        self.summary = Some(summary.clone());
        Ok(())
    }
}

/// Writes one JSON object per frame, newline-delimited, then a final
/// `{"summary": …}` line.
pub struct JsonLinesObserver<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_line<T: Serialize>(&mut self, value: &T) -> HolofieldResult<()> {
        serde_json::to_writer(&mut self.writer, value)
            .map_err(|e| HolofieldError::Presentation(format!("JSON encode error: {e}")))?;
        self.writer
            .write_all(b"\n")
            .map_err(|e| HolofieldError::Presentation(format!("write error: {e}")))
    }
}

impl<W: Write> FrameObserver for JsonLinesObserver<W> {
    fn on_frame(&mut self, frame: &Frame<'_>) -> HolofieldResult<()> {
        self.write_line(&FrameRecord::from(frame))
    }

    fn on_finish(&mut self, summary: &RunSummary) -> HolofieldResult<()> {
        #[derive(Serialize)]
        struct SummaryLine<'s> {
            summary: &'s RunSummary,
        }
        self.write_line(&SummaryLine { summary })?;
        self.writer
            .flush()
            .map_err(|e| HolofieldError::Presentation(format!("flush error: {e}")))
    }
}

/// Closure-backed observer.
pub struct FnObserver<F>(pub F);

impl<F> FnObserver<F>
where
    F: FnMut(&Frame<'_>) -> HolofieldResult<()>,
{
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F> FrameObserver for FnObserver<F>
where
    F: FnMut(&Frame<'_>) -> HolofieldResult<()>,
{
    fn on_frame(&mut self, frame: &Frame<'_>) -> HolofieldResult<()> {
        (self.0)(frame)
    }
}

/// Forwards every frame to each inner observer in order.
#[derive(Default)]
pub struct FanOut<'o> {
    observers: Vec<&'o mut dyn FrameObserver>,
}

impl<'o> FanOut<'o> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, observer: &'o mut dyn FrameObserver) {
        self.observers.push(observer);
    }
}

impl FrameObserver for FanOut<'_> {
    fn on_frame(&mut self, frame: &Frame<'_>) -> HolofieldResult<()> {
        for obs in self.observers.iter_mut() {
            obs.on_frame(frame)?;
        }
        Ok(())
    }

    fn on_finish(&mut self, summary: &RunSummary) -> HolofieldResult<()> {
        for obs in self.observers.iter_mut() {
            obs.on_finish(summary)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use holofield_signal::generate_driver_signal;

    fn summary() -> RunSummary {
        let stats = GridStats::from_cells(&[0.0]);
        RunSummary {
            steps: 3,
            frames: 1,
            driver_min: 0.0,
            driver_max: 0.0,
            initial: stats,
            final_stats: stats,
            diverged_at: None,
            elapsed_ms: 0.5,
        }
    }

    #[test]
    fn test_frame_record_digest() {
        let signal = generate_driver_signal(&[4, 5, 6, 7, 8, 9, 0, 1], 5, 2).unwrap();
        let grid = PhenomenalGrid::uniform(3, 0.25);
        let frame = Frame {
            step: 2,
            driver: signal.as_slice()[2],
            grid: &grid,
            history: HistoryView::through(&signal, 2),
        };
        let rec = FrameRecord::from(&frame);
        assert_eq!(rec.step, 2);
        assert_eq!(rec.history_len, 3);
        assert!(rec.whole_matches_part);
        assert_eq!(rec.grid.mean, 0.25);
        assert_eq!(rec.clipped_cells, 0);
    }

    #[test]
    fn test_clipped_cells_outside_display_range() {
        let mut grid = PhenomenalGrid::uniform(3, 1.0);
        assert_eq!(clipped_cells(&grid), 0);
        grid.set(0, 0, 1.5);
        grid.set(1, 2, -1.0000001);
        grid.set(2, 2, f64::NAN);
        assert_eq!(clipped_cells(&grid), 3);
    }

    #[test]
    fn test_json_lines_output() {
        let signal = generate_driver_signal(&[4; 10], 5, 2).unwrap();
        let grid = PhenomenalGrid::new(2);
        let mut obs = JsonLinesObserver::new(Vec::new());
        obs.on_frame(&Frame {
            step: 0,
            driver: signal.as_slice()[0],
            grid: &grid,
            history: HistoryView::through(&signal, 0),
        })
        .unwrap();
        obs.on_finish(&summary()).unwrap();

        let text = String::from_utf8(obs.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["step"], 0);
        assert_eq!(first["history_len"], 1);
        assert_eq!(first["whole_matches_part"], true);
        let last: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(last["summary"]["steps"], 3);
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_json_lines_write_failure() {
        let signal = generate_driver_signal(&[4; 10], 5, 2).unwrap();
        let grid = PhenomenalGrid::new(2);
        let mut obs = JsonLinesObserver::new(FailingWriter);
        let err = obs
            .on_frame(&Frame {
                step: 0,
                driver: 0.0,
                grid: &grid,
                history: HistoryView::through(&signal, 0),
            })
            .unwrap_err();
        assert!(matches!(err, HolofieldError::Presentation(_)));
    }

    #[test]
    fn test_fan_out() {
        let signal = generate_driver_signal(&[4; 10], 5, 2).unwrap();
        let grid = PhenomenalGrid::new(2);
        let mut a = RecordingObserver::new();
        let mut b = RecordingObserver::new();
        {
            let mut fan = FanOut::new();
            fan.push(&mut a);
            fan.push(&mut b);
            fan.on_frame(&Frame {
                step: 4,
                driver: 0.0,
                grid: &grid,
                history: HistoryView::through(&signal, 4),
            })
            .unwrap();
            fan.on_finish(&summary()).unwrap();
        }
        assert_eq!(a.steps(), vec![4]);
        assert_eq!(b.steps(), vec![4]);
        assert!(a.summary.is_some());
    }
}
