use crate::core::{BinaryMinHeap, Event, EventPool, Particle};
use crate::error::{Error, Result};
use std::cmp::Ordering;

/// Small numeric tolerance for the monotonic-clock check.
const EPS_TIME: f64 = 1e-12;

/// Queue capacity reserved per particle pair at construction, bounded by a
/// ceiling so large systems do not reserve absurd amounts up front.
const QUEUE_PRESIZE_FACTOR: usize = 100;
const QUEUE_PRESIZE_CEILING: usize = 1 << 20;

/// Upper bound on pool prewarming; one full prediction round per particle is
/// enough to cover the initial burst.
const POOL_PREWARM_CEILING: usize = 1 << 16;

type EventCmp = fn(&Box<Event>, &Box<Event>) -> Ordering;

#[allow(clippy::borrowed_box)]
fn by_time(x: &Box<Event>, y: &Box<Event>) -> Ordering {
    x.time_ord().cmp(&y.time_ord())
}

/// Event-driven simulator of elastic collisions among hard discs in the
/// unit box.
///
/// The engine owns the particle set, a time-ordered event queue, and a pool
/// of recyclable event records. Predictions for every particle (all pairwise
/// candidates plus both walls) are enqueued eagerly; obsolete predictions are
/// discarded lazily at pop time by comparing each participant's live
/// collision counter against the snapshot taken at event creation, instead of
/// paying for removal from the priority structure.
///
/// The core is deterministic: identical initial particles and an identical
/// non-decreasing sequence of [`update`](Self::update) calls reproduce
/// trajectories bit for bit.
#[derive(Debug)]
pub struct CollisionSystem {
    particles: Vec<Particle>,
    queue: BinaryMinHeap<Box<Event>, EventCmp>,
    pool: EventPool,
    last_update_time: f64,
}

impl CollisionSystem {
    /// Build a system over `particles` and run the initial prediction pass.
    ///
    /// The queue is pre-sized from the particle count but left unbounded.
    /// Errors with [`Error::InvalidParam`] on an empty particle set or any
    /// particle with non-positive radius or mass.
    pub fn new(particles: Vec<Particle>) -> Result<Self> {
        Self::build(particles, None)
    }

    /// Like [`new`](Self::new), but the event queue is capped to retain only
    /// the `keep_min` smallest-time entries, bounding memory at the cost of
    /// discarding far-future predictions. The bound is a tunable: it must be
    /// generous enough that an event which could still be the true minimum is
    /// never evicted (a full prediction round is `2N + 2` events per
    /// particle). Errors when `keep_min` is zero.
    pub fn with_queue_bound(particles: Vec<Particle>, keep_min: usize) -> Result<Self> {
        Self::build(particles, Some(keep_min))
    }

    fn build(particles: Vec<Particle>, keep_min: Option<usize>) -> Result<Self> {
        if particles.is_empty() {
            return Err(Error::InvalidParam(
                "particle set must not be empty".into(),
            ));
        }
        for p in &particles {
            if !p.radius.is_finite() || p.radius <= 0.0 {
                return Err(Error::InvalidParam("radius must be finite and > 0".into()));
            }
            if !p.mass.is_finite() || p.mass <= 0.0 {
                return Err(Error::InvalidParam("mass must be finite and > 0".into()));
            }
        }

        let n = particles.len();
        let queue = match keep_min {
            Some(k) => BinaryMinHeap::keep_smallest(by_time as EventCmp, k)?,
            None => {
                let pre_size = (n * n)
                    .saturating_mul(QUEUE_PRESIZE_FACTOR)
                    .min(QUEUE_PRESIZE_CEILING);
                BinaryMinHeap::with_capacity(by_time as EventCmp, pre_size)
            }
        };
        let prewarm = n.saturating_mul(2 * n + 2).min(POOL_PREWARM_CEILING);

        let mut sim = Self {
            particles,
            queue,
            pool: EventPool::prewarmed(prewarm),
            last_update_time: 0.0,
        };
        for i in 0..n {
            sim.enqueue_predictions(i)?;
        }
        Ok(sim)
    }

    /// Current simulation clock: the time to which all particle positions
    /// are correct.
    pub fn time(&self) -> f64 {
        self.last_update_time
    }

    /// Number of particles.
    pub fn num_particles(&self) -> usize {
        self.particles.len()
    }

    /// Read-only snapshot of the particle collection.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Total kinetic energy (diagnostic; conserved by elastic collisions).
    pub fn kinetic_energy(&self) -> f64 {
        self.particles.iter().map(|p| p.kinetic_energy()).sum()
    }

    /// Advance the simulation to `now`, processing every due event in time
    /// order.
    ///
    /// If the earliest prediction lies beyond `now`, all particles drift
    /// straight to `now`. Otherwise events with time <= `now` are popped one
    /// by one: stale ones (collision-count mismatch) are reclaimed and
    /// skipped; real ones drift the whole system to the event time, apply the
    /// response, and re-predict for the particles involved.
    ///
    /// `now` must be finite and not earlier than the previous call's value;
    /// a decreasing clock is rejected with [`Error::TimeReversal`].
    pub fn update(&mut self, now: f64) -> Result<()> {
        if !now.is_finite() {
            return Err(Error::InvalidParam("update time must be finite".into()));
        }
        if now < self.last_update_time - EPS_TIME {
            return Err(Error::TimeReversal {
                last: self.last_update_time,
                requested: now,
            });
        }

        if self.queue.peek_min()?.time() > now {
            self.drift_all(now);
        }
        self.process_events(now)
    }

    // ============ Internal helpers ============

    fn process_events(&mut self, now: f64) -> Result<()> {
        loop {
            // Terminate when the head lies in the future or the queue is drained.
            let due = match self.queue.peek_min() {
                Ok(head) => head.time() <= now,
                Err(_) => false,
            };
            if !due {
                return Ok(());
            }

            let event = self.queue.pop_min()?;
            if !event.is_valid(&self.particles) {
                self.pool.reclaim(event);
                continue;
            }

            self.drift_all(event.time());

            match (event.a(), event.b()) {
                (Some(a), Some(b)) => {
                    self.bounce_pair(a.idx, b.idx);
                    self.enqueue_predictions(a.idx)?;
                    self.enqueue_predictions(b.idx)?;
                }
                (Some(a), None) => {
                    self.particles[a.idx].bounce_off_vertical_wall();
                    self.enqueue_predictions(a.idx)?;
                }
                (None, Some(b)) => {
                    self.particles[b.idx].bounce_off_horizontal_wall();
                    self.enqueue_predictions(b.idx)?;
                }
                // Never scheduled; both sides are always filled or a wall.
                (None, None) => {}
            }

            self.pool.reclaim(event);
        }
    }

    /// Drift every particle to the absolute time `to_time` and make it the
    /// authoritative clock. All particles advance together so each one's
    /// position stays valid for exactly the common elapsed interval.
    fn drift_all(&mut self, to_time: f64) {
        let dt = to_time - self.last_update_time;
        for p in &mut self.particles {
            p.drift(dt);
        }
        self.last_update_time = to_time;
    }

    /// Resolve a pairwise collision between particles `i` and `j`.
    fn bounce_pair(&mut self, i: usize, j: usize) {
        debug_assert_ne!(i, j, "self-pairs resolve to infinity and never pop");
        let (lo, hi) = if i < j { (i, j) } else { (j, i) };
        let (head, tail) = self.particles.split_at_mut(hi);
        head[lo].bounce_off(&mut tail[0]);
    }

    /// Predict and enqueue up to `2N + 2` fresh candidate events for particle
    /// `i`: one against every particle (the self-pair resolves to infinity)
    /// plus both walls. Events evicted by a bounded queue go straight back to
    /// the pool.
    fn enqueue_predictions(&mut self, i: usize) -> Result<()> {
        let now = self.last_update_time;

        for j in 0..self.particles.len() {
            let dt = self.particles[i].time_to_hit(&self.particles[j]);
            let ev = self
                .pool
                .new_event(now + dt, Some(i), Some(j), &self.particles)?;
            self.enqueue(ev);
        }

        let dtx = self.particles[i].time_to_hit_vertical_wall();
        let ev = self.pool.new_event(now + dtx, Some(i), None, &self.particles)?;
        self.enqueue(ev);

        let dty = self.particles[i].time_to_hit_horizontal_wall();
        let ev = self.pool.new_event(now + dty, None, Some(i), &self.particles)?;
        self.enqueue(ev);

        Ok(())
    }

    fn enqueue(&mut self, event: Box<Event>) {
        if let Some(evicted) = self.queue.push(event) {
            self.pool.reclaim(evicted);
        }
    }
}
