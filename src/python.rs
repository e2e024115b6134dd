//! Python bindings: a thin wrapper exposing the collision engine to
//! renderers and notebooks via numpy snapshots.

use numpy::ndarray::{Array1, Array2};
use numpy::{IntoPyArray, PyArray1, PyArray2};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::core::{CollisionSystem, Particle};
use crate::{io, spawn};

fn py_err<E: ToString>(e: E) -> PyErr {
    PyValueError::new_err(e.to_string())
}

/// Python-facing wrapper around the Rust collision engine.
///
/// Construction performs the initial prediction pass; `update(now)` advances
/// to the given absolute time and must be called with a non-decreasing
/// clock. Snapshots are copies; mutating them does not touch the engine.
#[pyclass]
pub struct ParticleSim {
    sim: CollisionSystem,
}

impl ParticleSim {
    fn wrap(particles: crate::Result<Vec<Particle>>) -> PyResult<Self> {
        let sim = CollisionSystem::new(particles.map_err(py_err)?).map_err(py_err)?;
        Ok(Self { sim })
    }

    fn snapshot2<'py>(
        &self,
        py: Python<'py>,
        field: impl Fn(&Particle) -> [f64; 2],
    ) -> PyResult<Py<PyArray2<f64>>> {
        let particles = self.sim.particles();
        let mut arr = Array2::<f64>::zeros((particles.len(), 2));
        for (i, p) in particles.iter().enumerate() {
            let value = field(p);
            arr[[i, 0]] = value[0];
            arr[[i, 1]] = value[1];
        }
        Ok(arr.into_pyarray(py).to_owned().into())
    }
}

#[pymethods]
impl ParticleSim {
    /// Build a simulation from explicit rows of
    /// `(rx, ry, vx, vy, radius, mass)`.
    ///
    /// Errors: raises ValueError on an empty list or non-positive
    /// radius/mass.
    #[new]
    fn new(rows: Vec<(f64, f64, f64, f64, f64, f64)>) -> PyResult<Self> {
        let particles = rows
            .into_iter()
            .map(|(rx, ry, vx, vy, radius, mass)| {
                Particle::new([rx, ry], [vx, vy], radius, mass, [255, 255, 255])
            })
            .collect();
        Self::wrap(particles)
    }

    /// Build a simulation from a particles file
    /// (`n`, then `rx ry vx vy radius mass r g b` per line).
    #[staticmethod]
    fn from_file(path: &str) -> PyResult<Self> {
        Self::wrap(io::read_particles(path))
    }

    /// Build a simulation of `n` identical discs placed randomly without
    /// overlap; a fixed `seed` reproduces the layout.
    #[staticmethod]
    #[pyo3(signature = (n, radius=0.01, mass=1.0, seed=None))]
    fn random(n: usize, radius: f64, mass: f64, seed: Option<u64>) -> PyResult<Self> {
        Self::wrap(spawn::random_particles(n, radius, mass, seed))
    }

    /// Advance the simulation to the absolute time `now` (seconds), which
    /// must not be earlier than the previous call's value. Releases the GIL
    /// during computation.
    fn update(&mut self, py: Python<'_>, now: f64) -> PyResult<()> {
        py.detach(|| self.sim.update(now)).map_err(py_err)
    }

    /// Current simulation clock.
    fn time(&self) -> f64 {
        self.sim.time()
    }

    /// Number of particles.
    fn num_particles(&self) -> usize {
        self.sim.num_particles()
    }

    /// Total kinetic energy (diagnostic).
    fn kinetic_energy(&self) -> f64 {
        self.sim.kinetic_energy()
    }

    /// Positions as an (N, 2) float64 array.
    fn get_positions<'py>(&self, py: Python<'py>) -> PyResult<Py<PyArray2<f64>>> {
        self.snapshot2(py, |p| p.r)
    }

    /// Velocities as an (N, 2) float64 array.
    fn get_velocities<'py>(&self, py: Python<'py>) -> PyResult<Py<PyArray2<f64>>> {
        self.snapshot2(py, |p| p.v)
    }

    /// Radii as an (N,) float64 array.
    fn get_radii<'py>(&self, py: Python<'py>) -> PyResult<Py<PyArray1<f64>>> {
        let arr = Array1::from_iter(self.sim.particles().iter().map(|p| p.radius));
        Ok(arr.into_pyarray(py).to_owned().into())
    }

    /// Display colors as an (N, 3) uint8 array.
    fn get_colors<'py>(&self, py: Python<'py>) -> PyResult<Py<PyArray2<u8>>> {
        let particles = self.sim.particles();
        let mut arr = Array2::<u8>::zeros((particles.len(), 3));
        for (i, p) in particles.iter().enumerate() {
            for (k, &c) in p.rgb.iter().enumerate() {
                arr[[i, k]] = c;
            }
        }
        Ok(arr.into_pyarray(py).to_owned().into())
    }
}

/// The particlesim Python module entry point.
#[pymodule]
fn particlesim(_py: Python<'_>, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<ParticleSim>()?;
    Ok(())
}
