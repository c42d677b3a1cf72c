//! Throttled render queue
//!
//! A render pass draws its records in fixed-size batches, one batch per
//! scheduling tick, so a pointer-driven UI never blocks on a large redraw.
//! Passes are cancelled cooperatively: a pass checks its token before every
//! batch and stops for good once the token is set.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use dv_core::{PlotConfig, RecordId};
use tracing::debug;

use crate::painter::ItemPainter;
use crate::{BlendMode, Surface};

/// Shared invalidation flag of one render pass
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Handle to a started render pass
#[derive(Debug, Clone)]
pub struct RenderHandle {
    id: u64,
    token: CancellationToken,
}

impl RenderHandle {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Stop the pass before its next batch
    pub fn invalidate(&self) {
        self.token.cancel();
    }

    pub fn is_invalidated(&self) -> bool {
        self.token.is_cancelled()
    }
}

/// What a single [`RenderQueue::tick`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// No pass to run
    Idle,
    /// Too early for the next batch
    Waiting,
    /// Drew one batch, more remain
    Drew { pass: u64, drawn: usize, remaining: usize },
    /// Drew the last batch (possibly empty)
    Finished { pass: u64, batches: usize },
    /// The pass had been invalidated and was dropped without drawing
    Cancelled { pass: u64 },
}

struct RenderPass {
    id: u64,
    items: Vec<RecordId>,
    cursor: usize,
    batches: usize,
    token: CancellationToken,
}

/// Draws at most one pass at a time, one batch per tick
pub struct RenderQueue {
    rate: usize,
    interval: Duration,
    line_width: f32,
    next_id: u64,
    active: Option<RenderPass>,
    last_tick: Option<Instant>,
}

impl RenderQueue {
    pub fn new(config: &PlotConfig) -> Self {
        Self::with_rate(config.render_rate, config.tick_interval()).with_line_width(config.line_width)
    }

    /// `rate` items per batch, batches at least `interval` apart
    pub fn with_rate(rate: usize, interval: Duration) -> Self {
        Self {
            rate: rate.max(1),
            interval,
            line_width: 1.0,
            next_id: 0,
            active: None,
            last_tick: None,
        }
    }

    pub fn with_line_width(mut self, line_width: f32) -> Self {
        self.line_width = line_width;
        self
    }

    /// Start a new pass over `items`.
    ///
    /// Any pass still in flight is invalidated first, the surface is cleared
    /// and the pass-wide alpha, blending and line width are set.
    pub fn render(&mut self, surface: &mut dyn Surface, items: Vec<RecordId>, alpha: f32) -> RenderHandle {
        self.invalidate();

        surface.clear();
        surface.set_blend_mode(BlendMode::Darken);
        surface.set_line_width(self.line_width);
        surface.set_global_alpha(alpha);

        self.next_id += 1;
        let token = CancellationToken::new();
        debug!("Render pass {} started: {} records, alpha {:.3}", self.next_id, items.len(), alpha);

        self.active = Some(RenderPass {
            id: self.next_id,
            items,
            cursor: 0,
            batches: 0,
            token: token.clone(),
        });
        self.last_tick = None;

        RenderHandle { id: self.next_id, token }
    }

    /// Cancel the pass in flight, if any
    pub fn invalidate(&mut self) {
        if let Some(pass) = self.active.take() {
            pass.token.cancel();
            debug!(
                "Render pass {} invalidated after {} of {} records",
                pass.id,
                pass.cursor,
                pass.items.len()
            );
        }
    }

    /// Run one scheduling tick at time `now`
    pub fn tick(&mut self, now: Instant, surface: &mut dyn Surface, painter: &dyn ItemPainter) -> TickOutcome {
        let Some(pass) = self.active.as_mut() else {
            return TickOutcome::Idle;
        };

        if pass.token.is_cancelled() {
            let id = pass.id;
            self.active = None;
            debug!("Render pass {} cancelled", id);
            return TickOutcome::Cancelled { pass: id };
        }

        if let Some(last) = self.last_tick {
            if now.saturating_duration_since(last) < self.interval {
                return TickOutcome::Waiting;
            }
        }
        self.last_tick = Some(now);

        let end = (pass.cursor + self.rate).min(pass.items.len());
        for &id in &pass.items[pass.cursor..end] {
            painter.paint(surface, id);
        }
        let drawn = end - pass.cursor;
        pass.cursor = end;
        pass.batches += 1;

        if pass.cursor >= pass.items.len() {
            let (id, batches) = (pass.id, pass.batches);
            self.active = None;
            debug!("Render pass {} finished in {} batches", id, batches);
            TickOutcome::Finished { pass: id, batches }
        } else {
            TickOutcome::Drew {
                pass: pass.id,
                drawn,
                remaining: pass.items.len() - pass.cursor,
            }
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// `(drawn, total)` of the pass in flight
    pub fn progress(&self) -> Option<(usize, usize)> {
        self.active.as_ref().map(|p| (p.cursor, p.items.len()))
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::{RecordingSurface, SurfaceCall};
    use std::cell::RefCell;

    #[derive(Default)]
    struct IdLog(RefCell<Vec<RecordId>>);

    impl ItemPainter for IdLog {
        fn paint(&self, surface: &mut dyn Surface, id: RecordId) {
            self.0.borrow_mut().push(id);
            surface.begin_path();
            surface.stroke();
        }
    }

    fn queue() -> RenderQueue {
        RenderQueue::with_rate(30, Duration::from_millis(33))
    }

    #[test]
    fn test_render_resets_surface_state() {
        let mut q = queue();
        let mut surface = RecordingSurface::new();
        q.render(&mut surface, vec![1, 2], 0.5);
        assert_eq!(
            surface.calls(),
            &[
                SurfaceCall::Clear,
                SurfaceCall::Blend(BlendMode::Darken),
                SurfaceCall::LineWidth(1.0),
                SurfaceCall::GlobalAlpha(0.5),
            ]
        );
    }

    #[test]
    fn test_draws_in_batches() {
        let mut q = queue();
        let mut surface = RecordingSurface::new();
        let log = IdLog::default();
        let start = Instant::now();

        let handle = q.render(&mut surface, (0..70).collect(), 1.0);
        assert_eq!(
            q.tick(start, &mut surface, &log),
            TickOutcome::Drew {
                pass: handle.id(),
                drawn: 30,
                remaining: 40
            }
        );
        assert_eq!(q.progress(), Some((30, 70)));
        q.tick(start + Duration::from_millis(40), &mut surface, &log);
        assert_eq!(
            q.tick(start + Duration::from_millis(80), &mut surface, &log),
            TickOutcome::Finished {
                pass: handle.id(),
                batches: 3
            }
        );
        assert_eq!(*log.0.borrow(), (0..70).collect::<Vec<_>>());
        assert!(!q.is_active());
        assert_eq!(q.tick(start + Duration::from_millis(200), &mut surface, &log), TickOutcome::Idle);
    }

    #[test]
    fn test_ticks_are_rate_limited() {
        let mut q = queue();
        let mut surface = RecordingSurface::new();
        let log = IdLog::default();
        let start = Instant::now();

        q.render(&mut surface, (0..100).collect(), 1.0);
        q.tick(start, &mut surface, &log);
        assert_eq!(q.tick(start + Duration::from_millis(10), &mut surface, &log), TickOutcome::Waiting);
        assert_eq!(log.0.borrow().len(), 30);
        assert!(matches!(
            q.tick(start + Duration::from_millis(33), &mut surface, &log),
            TickOutcome::Drew { drawn: 30, .. }
        ));
    }

    #[test]
    fn test_new_pass_cancels_previous() {
        let mut q = queue();
        let mut surface = RecordingSurface::new();
        let log = IdLog::default();
        let start = Instant::now();

        let a = q.render(&mut surface, (0..100).collect(), 1.0);
        q.tick(start, &mut surface, &log);
        let b = q.render(&mut surface, vec![500, 501], 1.0);

        assert!(a.is_invalidated());
        assert!(!b.is_invalidated());
        log.0.borrow_mut().clear();

        let mut now = start;
        while q.is_active() {
            now += Duration::from_millis(50);
            q.tick(now, &mut surface, &log);
        }
        assert_eq!(*log.0.borrow(), vec![500, 501]);
        assert_eq!(surface.since_clear().iter().filter(|c| **c == SurfaceCall::Stroke).count(), 2);
    }

    #[test]
    fn test_external_invalidation_stops_pass() {
        let mut q = queue();
        let mut surface = RecordingSurface::new();
        let log = IdLog::default();
        let start = Instant::now();

        let handle = q.render(&mut surface, (0..100).collect(), 1.0);
        q.tick(start, &mut surface, &log);
        handle.invalidate();

        assert_eq!(
            q.tick(start + Duration::from_millis(50), &mut surface, &log),
            TickOutcome::Cancelled { pass: handle.id() }
        );
        assert_eq!(log.0.borrow().len(), 30);
        assert!(!q.is_active());
    }

    #[test]
    fn test_empty_pass_finishes_without_drawing() {
        let mut q = queue();
        let mut surface = RecordingSurface::new();
        let log = IdLog::default();

        let handle = q.render(&mut surface, Vec::new(), 1.0);
        assert_eq!(
            q.tick(Instant::now(), &mut surface, &log),
            TickOutcome::Finished {
                pass: handle.id(),
                batches: 1
            }
        );
        assert_eq!(surface.strokes(), 0);
        assert_eq!(surface.calls()[0], SurfaceCall::Clear);
    }
}
