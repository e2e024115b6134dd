//! Line-oriented ingestion of initial particle layouts.
//!
//! Format: the first line holds the particle count `n`; each of the next `n`
//! lines holds nine whitespace-separated fields
//! `rx ry vx vy radius mass r g b` (reals, then 0-255 color components).
//! Anything malformed is a hard parse failure carrying the offending line
//! number; the engine itself only ever sees already-validated particles.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::core::Particle;
use crate::error::{Error, Result};

/// Read a particle layout from the file at `path`.
pub fn read_particles<P: AsRef<Path>>(path: P) -> Result<Vec<Particle>> {
    let file = File::open(path)?;
    parse_particles(BufReader::new(file))
}

/// Parse a particle layout from any buffered reader, one particle per line
/// in input order. Lines beyond the declared count are ignored.
pub fn parse_particles<R: BufRead>(reader: R) -> Result<Vec<Particle>> {
    let mut lines = reader.lines();

    let header = next_line(&mut lines, 1)?;
    let count: usize = header.trim().parse().map_err(|_| Error::Parse {
        line: 1,
        reason: format!("expected particle count, got {:?}", header.trim()),
    })?;

    let mut particles = Vec::with_capacity(count);
    for i in 0..count {
        let line_no = i + 2;
        let line = next_line(&mut lines, line_no)?;
        particles.push(parse_particle(&line, line_no)?);
    }
    Ok(particles)
}

fn next_line<B: BufRead>(lines: &mut std::io::Lines<B>, line_no: usize) -> Result<String> {
    match lines.next() {
        Some(Ok(line)) => Ok(line),
        Some(Err(e)) => Err(Error::Io(e)),
        None => Err(Error::Parse {
            line: line_no,
            reason: "unexpected end of file".into(),
        }),
    }
}

fn parse_particle(line: &str, line_no: usize) -> Result<Particle> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != 9 {
        return Err(Error::Parse {
            line: line_no,
            reason: format!("expected 9 fields, got {}", fields.len()),
        });
    }

    let real = |idx: usize| -> Result<f64> {
        fields[idx].parse().map_err(|_| Error::Parse {
            line: line_no,
            reason: format!("field {} is not a number: {:?}", idx + 1, fields[idx]),
        })
    };
    let channel = |idx: usize| -> Result<u8> {
        fields[idx].parse().map_err(|_| Error::Parse {
            line: line_no,
            reason: format!("field {} is not a color component in 0..=255: {:?}", idx + 1, fields[idx]),
        })
    };

    let r = [real(0)?, real(1)?];
    let v = [real(2)?, real(3)?];
    let radius = real(4)?;
    let mass = real(5)?;
    let rgb = [channel(6)?, channel(7)?, channel(8)?];

    Particle::new(r, v, radius, mass, rgb)
}
