//! Cooperative interruption and live-redraw hooks.
//!
//! Every multi-step raster operation accepts an [`OpControl`]: an injected
//! interrupt predicate plus a redraw callback, decoupling the raster core
//! from any particular event system. Aborting mid-shape is an expected
//! outcome, not an error; the partial result stays committed.
//!
//! Both hooks are rate-limited here so the algorithms can poll freely:
//! the predicate runs at most once per 8ms, the redraw callback at most
//! once per 16ms (~60Hz).

use pixelpaint_core::PixelBuffer;
use std::time::{Duration, Instant};

/// Minimum spacing between interrupt predicate evaluations
const INTERRUPT_GATE: Duration = Duration::from_millis(8);
/// Minimum spacing between redraw callback invocations
const REDRAW_GATE: Duration = Duration::from_millis(16);

/// Interrupt predicate and redraw callback for one long operation.
pub struct OpControl<'a> {
    interrupt: Option<Box<dyn FnMut() -> bool + 'a>>,
    redraw: Option<Box<dyn FnMut(&PixelBuffer) + 'a>>,
    last_check: Option<Instant>,
    last_redraw: Option<Instant>,
    interrupted: bool,
}

impl<'a> OpControl<'a> {
    /// A control that never interrupts and never redraws.
    pub fn new() -> Self {
        Self {
            interrupt: None,
            redraw: None,
            last_check: None,
            last_redraw: None,
            interrupted: false,
        }
    }

    /// Attach an interrupt predicate.
    pub fn with_interrupt(mut self, f: impl FnMut() -> bool + 'a) -> Self {
        self.interrupt = Some(Box::new(f));
        self
    }

    /// Attach a redraw callback.
    pub fn with_redraw(mut self, f: impl FnMut(&PixelBuffer) + 'a) -> Self {
        self.redraw = Some(Box::new(f));
        self
    }

    /// Poll the interrupt predicate, rate-limited. Once the predicate has
    /// returned true the operation stays interrupted; callers unwind by
    /// checking this at their own loop granularity.
    pub fn interrupted(&mut self) -> bool {
        if self.interrupted {
            return true;
        }
        let Some(pred) = self.interrupt.as_mut() else {
            return false;
        };
        let now = Instant::now();
        // first poll always runs; later polls are gated
        if let Some(last) = self.last_check {
            if now.duration_since(last) < INTERRUPT_GATE {
                return false;
            }
        }
        self.last_check = Some(now);
        if pred() {
            self.interrupted = true;
        }
        self.interrupted
    }

    /// Invoke the redraw callback if at least one redraw gate has elapsed,
    /// keeping the display live during multi-second operations.
    pub fn maybe_redraw(&mut self, buf: &PixelBuffer) {
        let Some(redraw) = self.redraw.as_mut() else {
            return;
        };
        let now = Instant::now();
        if let Some(last) = self.last_redraw {
            if now.duration_since(last) < REDRAW_GATE {
                return;
            }
        }
        self.last_redraw = Some(now);
        redraw(buf);
    }
}

impl Default for OpControl<'_> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_hooks_never_interrupt() {
        let mut ctl = OpControl::new();
        assert!(!ctl.interrupted());
        let buf = PixelBuffer::new(1, 1).unwrap();
        ctl.maybe_redraw(&buf); // no-op
    }

    #[test]
    fn test_first_poll_runs_predicate() {
        let mut ctl = OpControl::new().with_interrupt(|| true);
        assert!(ctl.interrupted());
        // latched
        assert!(ctl.interrupted());
    }

    #[test]
    fn test_rate_limited_polling() {
        let mut calls = 0;
        let mut ctl = OpControl::new().with_interrupt(|| {
            calls += 1;
            false
        });
        for _ in 0..100 {
            assert!(!ctl.interrupted());
        }
        drop(ctl);
        // only the first poll ran; the rest fell inside the 8ms gate
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_redraw_gated() {
        let mut draws = 0;
        let buf = PixelBuffer::new(1, 1).unwrap();
        let mut ctl = OpControl::new().with_redraw(|_| draws += 1);
        for _ in 0..50 {
            ctl.maybe_redraw(&buf);
        }
        drop(ctl);
        assert_eq!(draws, 1);
    }
}
