use crate::core::Particle;
use crate::error::{Error, Result};
use ordered_float::NotNan;

/// One side of a scheduled collision: a non-owning handle into the engine's
/// particle collection plus the collision count observed at event creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Participant {
    /// Index of the referenced particle.
    pub idx: usize,
    seen: u64,
}

/// A scheduled, possibly-stale prediction of a future collision.
///
/// Participant shapes:
/// - `a` and `b` both present: pairwise collision between two particles
/// - only `a` present: collision with a vertical wall
/// - only `b` present: collision with a horizontal wall
///
/// The time may be `+inf`, meaning the predicted encounter never happens;
/// such events sit at the bottom of the queue until evicted. NaN times are
/// rejected at initialization. Records are recycled through the
/// [`EventPool`](crate::core::EventPool): after being popped or evicted they
/// are reclaimed and later re-initialized with fresh fields.
#[derive(Debug)]
pub struct Event {
    time: NotNan<f64>,
    a: Option<Participant>,
    b: Option<Participant>,
}

impl Event {
    /// A blank record for the pool free list; re-initialized before use.
    pub(crate) fn vacant() -> Self {
        Self {
            time: NotNan::default(),
            a: None,
            b: None,
        }
    }

    /// Re-initialize this record in place, snapshotting the collision count
    /// of each referenced particle.
    ///
    /// Errors with [`Error::InvalidParam`] when `time` is NaN.
    pub fn init(
        &mut self,
        time: f64,
        a: Option<usize>,
        b: Option<usize>,
        particles: &[Particle],
    ) -> Result<()> {
        self.time =
            NotNan::new(time).map_err(|_| Error::InvalidParam("event time cannot be NaN".into()))?;
        self.a = a.map(|idx| Participant {
            idx,
            seen: particles[idx].collision_count,
        });
        self.b = b.map(|idx| Participant {
            idx,
            seen: particles[idx].collision_count,
        });
        Ok(())
    }

    /// Scheduled time as a raw f64 (possibly `+inf`).
    #[inline]
    pub fn time(&self) -> f64 {
        self.time.into_inner()
    }

    /// Scheduled time as a totally ordered key.
    #[inline]
    pub fn time_ord(&self) -> NotNan<f64> {
        self.time
    }

    /// First participant, if any.
    #[inline]
    pub fn a(&self) -> Option<Participant> {
        self.a
    }

    /// Second participant, if any.
    #[inline]
    pub fn b(&self) -> Option<Participant> {
        self.b
    }

    /// False once any referenced particle has collided since this event was
    /// created; a count mismatch is cheap proof of staleness.
    pub fn is_valid(&self, particles: &[Particle]) -> bool {
        let side_ok = |side: Option<Participant>| match side {
            Some(p) => particles[p.idx].collision_count == p.seen,
            None => true,
        };
        side_ok(self.a) && side_ok(self.b)
    }
}
