use particlesim::core::{CollisionSystem, Particle};
use particlesim::error::Result;
use particlesim::spawn;

fn particle(r: [f64; 2], v: [f64; 2], radius: f64, mass: f64) -> Particle {
    match Particle::new(r, v, radius, mass, [255, 255, 255]) {
        Ok(p) => p,
        Err(e) => panic!("test particle invalid: {e}"),
    }
}

/// Two discs on the unit line at 0.1 and 0.9 closing at 0.2: surfaces meet
/// after (0.8 - 0.02) / 0.2 = 3.9 s. Equal masses swap velocities, both
/// counters go to 1, and positions follow straight-line motion up to the
/// collision instant.
#[test]
fn head_on_pair_end_to_end() -> Result<()> {
    let mut sim = CollisionSystem::new(vec![
        particle([0.1, 0.5], [0.1, 0.0], 0.01, 1.0),
        particle([0.9, 0.5], [-0.1, 0.0], 0.01, 1.0),
    ])?;

    sim.update(4.0)?;

    let [a, b] = match sim.particles() {
        [a, b] => [a, b],
        other => panic!("expected 2 particles, got {}", other.len()),
    };
    assert!((a.v[0] + 0.1).abs() < 1e-9, "a.vx = {}", a.v[0]);
    assert!((b.v[0] - 0.1).abs() < 1e-9, "b.vx = {}", b.v[0]);
    assert_eq!(a.collision_count, 1);
    assert_eq!(b.collision_count, 1);

    // The clock rests at the processed event; positions are in contact there.
    assert!((sim.time() - 3.9).abs() < 1e-9);
    assert!((a.r[0] - 0.49).abs() < 1e-9);
    assert!((b.r[0] - 0.51).abs() < 1e-9);
    Ok(())
}

/// After the exchange the discs separate, reach the walls at x = 0.01 and
/// x = 0.99, and reflect back; each has then collided twice.
#[test]
fn pair_then_wall_sequence() -> Result<()> {
    let mut sim = CollisionSystem::new(vec![
        particle([0.1, 0.5], [0.1, 0.0], 0.01, 1.0),
        particle([0.9, 0.5], [-0.1, 0.0], 0.01, 1.0),
    ])?;

    // Collision at 3.9 leaves a at x=0.49 moving left; wall contact at
    // 3.9 + (0.49 - 0.01) / 0.1 = 8.7.
    sim.update(9.0)?;

    let particles = sim.particles();
    assert_eq!(particles[0].collision_count, 2);
    assert_eq!(particles[1].collision_count, 2);
    assert!((particles[0].v[0] - 0.1).abs() < 1e-9, "reflected back right");
    assert!((particles[1].v[0] + 0.1).abs() < 1e-9, "reflected back left");
    assert!((sim.time() - 8.7).abs() < 1e-9);
    Ok(())
}

/// Total kinetic energy is invariant across many wall and pair collisions.
#[test]
fn energy_conservation() -> Result<()> {
    let mut sim = CollisionSystem::new(spawn::random_particles(24, 0.02, 1.0, Some(12345))?)?;
    let e0 = sim.kinetic_energy();

    let t_end = 50.0;
    let steps = 200;
    for s in 1..=steps {
        sim.update(t_end * f64::from(s) / f64::from(steps))?;
    }

    let collisions: u64 = sim.particles().iter().map(|p| p.collision_count).sum();
    assert!(collisions > 0, "expected at least one collision in 50 s");

    let e1 = sim.kinetic_energy();
    let rel = ((e1 - e0) / e0).abs();
    assert!(
        rel < 1e-8,
        "relative energy drift {rel} too large (E0={e0}, E1={e1})"
    );
    Ok(())
}

/// Particles stay inside [radius, 1 - radius] on both axes at every
/// externally observed instant (small tolerance for accumulated rounding).
#[test]
fn positions_stay_in_the_box() -> Result<()> {
    let mut sim = CollisionSystem::new(spawn::random_particles(16, 0.03, 1.0, Some(777))?)?;
    for s in 1..=100 {
        sim.update(f64::from(s) * 0.25)?;
        for p in sim.particles() {
            for k in 0..2 {
                assert!(
                    p.r[k] >= p.radius - 1e-9 && p.r[k] <= 1.0 - p.radius + 1e-9,
                    "axis {k} out of box: {} (radius {})",
                    p.r[k],
                    p.radius
                );
            }
        }
    }
    Ok(())
}

/// Identical initial state and update schedule reproduce trajectories bit
/// for bit: the core is deterministic.
#[test]
fn trajectories_are_bit_for_bit_reproducible() -> Result<()> {
    let layout = spawn::random_particles(12, 0.02, 1.0, Some(2024))?;
    let mut a = CollisionSystem::new(layout.clone())?;
    let mut b = CollisionSystem::new(layout)?;

    for s in 1..=120 {
        let t = f64::from(s) * 0.2;
        a.update(t)?;
        b.update(t)?;
    }

    for (p, q) in a.particles().iter().zip(b.particles()) {
        for k in 0..2 {
            assert_eq!(p.r[k].to_bits(), q.r[k].to_bits());
            assert_eq!(p.v[k].to_bits(), q.v[k].to_bits());
        }
        assert_eq!(p.collision_count, q.collision_count);
    }
    Ok(())
}

/// The simulation clock never decreases, and a decreasing caller clock is
/// rejected outright.
#[test]
fn clock_is_monotone() -> Result<()> {
    let mut sim = CollisionSystem::new(spawn::random_particles(8, 0.02, 1.0, Some(5))?)?;
    let mut last = 0.0;
    for s in 1..=50 {
        sim.update(f64::from(s) * 0.1)?;
        assert!(sim.time() >= last);
        last = sim.time();
    }
    assert!(sim.update(0.0).is_err());
    Ok(())
}

/// Mass ratio 3:1 head-on: the heavy disc keeps going, the light one is
/// thrown forward at twice the closing speed of the heavy one's remainder.
/// (v1' = v1(m1-m2)/(m1+m2), v2' = 2 m1 v1 / (m1+m2) for v2 = 0.)
#[test]
fn unequal_mass_exchange() -> Result<()> {
    let mut sim = CollisionSystem::new(vec![
        particle([0.3, 0.5], [0.1, 0.0], 0.01, 3.0),
        particle([0.7, 0.5], [0.0, 0.0], 0.01, 1.0),
    ])?;
    // Gap 0.4 - 0.02 closes at 0.1: contact at t = 3.8.
    sim.update(4.0)?;

    let particles = sim.particles();
    assert!((particles[0].v[0] - 0.05).abs() < 1e-9, "heavy keeps half");
    assert!((particles[1].v[0] - 0.15).abs() < 1e-9, "light thrown ahead");
    Ok(())
}
