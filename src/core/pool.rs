use crate::core::{Event, Particle};
use crate::error::Result;

/// Free-list recycler for event records.
///
/// The prediction loop creates and discards events at high frequency; the
/// pool hands back previously reclaimed records instead of allocating. Usage
/// is single-threaded (the engine owns its pool) and a record must not be
/// reclaimed twice without being reissued in between.
#[derive(Debug, Default)]
pub struct EventPool {
    free: Vec<Box<Event>>,
}

impl EventPool {
    /// An empty pool; every record is allocated on first demand.
    pub fn new() -> Self {
        Self::default()
    }

    /// A pool pre-filled with `n` records, sized to the expected number of
    /// simultaneously live events so steady-state simulation does not
    /// allocate.
    pub fn prewarmed(n: usize) -> Self {
        Self {
            free: (0..n).map(|_| Box::new(Event::vacant())).collect(),
        }
    }

    /// Hand out a record initialized with the given fields, recycling a freed
    /// one when available.
    pub fn new_event(
        &mut self,
        time: f64,
        a: Option<usize>,
        b: Option<usize>,
        particles: &[Particle],
    ) -> Result<Box<Event>> {
        let mut ev = match self.free.pop() {
            Some(ev) => ev,
            None => Box::new(Event::vacant()),
        };
        ev.init(time, a, b, particles)?;
        Ok(ev)
    }

    /// Return a popped or evicted record to the free list.
    pub fn reclaim(&mut self, event: Box<Event>) {
        self.free.push(event);
    }

    /// Number of records currently waiting for reuse.
    pub fn free_len(&self) -> usize {
        self.free.len()
    }
}
