use crate::error::{Error, Result};

/// Spatial dimension of the unit box (2-D).
pub const DIM: usize = 2;

/// A hard disc moving in the unit box with a given position, velocity,
/// radius, and mass.
///
/// Positions live in `[radius, 1 - radius]` on each axis; the collision
/// response keeps them there between consecutive processed events, up to
/// floating point error. The type is mutable because position and velocity
/// change; radius and mass are fixed at construction. `rgb` is a cosmetic
/// color carried for renderers and never consulted by the physics.
#[derive(Debug, Clone)]
pub struct Particle {
    /// Position (x, y).
    pub r: [f64; DIM],
    /// Velocity (vx, vy).
    pub v: [f64; DIM],
    /// Disc radius (> 0).
    pub radius: f64,
    /// Mass (> 0).
    pub mass: f64,
    /// Number of realized collisions this particle has participated in,
    /// wall or pairwise. Snapshotted by events for invalidation.
    pub collision_count: u64,
    /// Display color.
    pub rgb: [u8; 3],
}

impl Particle {
    /// Create a particle after validating invariants.
    ///
    /// Errors:
    /// - [`Error::InvalidParam`] if `radius` or `mass` is non-positive, or
    ///   any component is NaN/inf.
    pub fn new(r: [f64; DIM], v: [f64; DIM], radius: f64, mass: f64, rgb: [u8; 3]) -> Result<Self> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(Error::InvalidParam("radius must be finite and > 0".into()));
        }
        if !mass.is_finite() || mass <= 0.0 {
            return Err(Error::InvalidParam("mass must be finite and > 0".into()));
        }
        if !r.iter().all(|x| x.is_finite()) {
            return Err(Error::InvalidParam("position must be finite".into()));
        }
        if !v.iter().all(|x| x.is_finite()) {
            return Err(Error::InvalidParam("velocity must be finite".into()));
        }
        Ok(Self {
            r,
            v,
            radius,
            mass,
            collision_count: 0,
            rgb,
        })
    }

    /// Move in a straight line for `dt`, which must equal the time elapsed
    /// since this position was last valid. The engine guarantees this by
    /// always drifting all particles together to a common clock.
    #[inline]
    pub fn drift(&mut self, dt: f64) {
        self.r[0] += self.v[0] * dt;
        self.r[1] += self.v[1] * dt;
    }

    /// Time until this particle collides with `that`, in seconds;
    /// `+inf` when they never do.
    ///
    /// Closed form from the relative-motion quadratic: with `dr` the center
    /// offset and `dv` the relative velocity, contact at center distance
    /// `sigma` happens at the earliest non-negative root. Never-cases:
    /// the same particle instance, separating motion (`dvdr > 0`), no
    /// relative motion (`dvdv == 0`), or a negative discriminant.
    pub fn time_to_hit(&self, that: &Particle) -> f64 {
        if std::ptr::eq(self, that) {
            return f64::INFINITY;
        }
        let dx = that.r[0] - self.r[0];
        let dy = that.r[1] - self.r[1];
        let dvx = that.v[0] - self.v[0];
        let dvy = that.v[1] - self.v[1];
        let dvdr = dx * dvx + dy * dvy;
        if dvdr > 0.0 {
            return f64::INFINITY;
        }
        let dvdv = dvx * dvx + dvy * dvy;
        if dvdv == 0.0 {
            return f64::INFINITY;
        }
        let drdr = dx * dx + dy * dy;
        let sigma = self.radius + that.radius;
        let d = dvdr * dvdr - dvdv * (drdr - sigma * sigma);
        if d < 0.0 {
            return f64::INFINITY;
        }
        -(dvdr + d.sqrt()) / dvdv
    }

    /// Time until the disc reaches the left or right wall; `+inf` with no
    /// horizontal motion.
    #[inline]
    pub fn time_to_hit_vertical_wall(&self) -> f64 {
        self.time_to_hit_wall(0)
    }

    /// Time until the disc reaches the bottom or top wall; `+inf` with no
    /// vertical motion.
    #[inline]
    pub fn time_to_hit_horizontal_wall(&self) -> f64 {
        self.time_to_hit_wall(1)
    }

    fn time_to_hit_wall(&self, axis: usize) -> f64 {
        let v = self.v[axis];
        if v > 0.0 {
            (1.0 - self.r[axis] - self.radius) / v
        } else if v < 0.0 {
            (self.radius - self.r[axis]) / v
        } else {
            f64::INFINITY
        }
    }

    /// Resolve an elastic collision with `that`, exchanging momentum along
    /// the line of centers. Both velocities are updated and both collision
    /// counters incremented.
    ///
    /// Must only be called when the two discs are at contact distance; the
    /// engine guarantees this by invoking it at the event's scheduled time
    /// after drifting positions there.
    pub fn bounce_off(&mut self, that: &mut Particle) {
        let dx = that.r[0] - self.r[0];
        let dy = that.r[1] - self.r[1];
        let dvx = that.v[0] - self.v[0];
        let dvy = that.v[1] - self.v[1];
        let dvdr = dx * dvx + dy * dvy;
        // Center distance at contact is the radius sum.
        let dist = self.radius + that.radius;

        // Magnitude of the normal impulse (reduced-mass form).
        let magnitude = 2.0 * self.mass * that.mass * dvdr / ((self.mass + that.mass) * dist);

        let fx = magnitude * dx / dist;
        let fy = magnitude * dy / dist;

        self.v[0] += fx / self.mass;
        self.v[1] += fy / self.mass;
        that.v[0] -= fx / that.mass;
        that.v[1] -= fy / that.mass;

        self.bump_collision_count();
        that.bump_collision_count();
    }

    /// Reflect off a vertical wall: negate vx, count the collision.
    pub fn bounce_off_vertical_wall(&mut self) {
        self.v[0] = -self.v[0];
        self.bump_collision_count();
    }

    /// Reflect off a horizontal wall: negate vy, count the collision.
    pub fn bounce_off_horizontal_wall(&mut self) {
        self.v[1] = -self.v[1];
        self.bump_collision_count();
    }

    /// Increment the collision counter (used for event invalidation).
    #[inline]
    pub fn bump_collision_count(&mut self) {
        self.collision_count = self.collision_count.saturating_add(1);
    }

    /// Kinetic energy: `m |v|^2 / 2`.
    #[inline]
    pub fn kinetic_energy(&self) -> f64 {
        let vsq: f64 = self.v.iter().map(|&c| c * c).sum();
        0.5 * self.mass * vsq
    }
}
