use std::convert::TryFrom;
use std::fmt;

use serde_derive::{Deserialize, Serialize};

use super::error::{Error, Result};

// Rasterized shape of a stroke: one bit per grid cell, row-major (x + y * grid_size)
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(try_from = "RawFingerprint")]
pub struct Fingerprint {
    // Side length of the square grid
    grid_size: usize,
    // True where the cell is inked
    bits: Vec<bool>,
}

// Fingerprint as it arrives over the wire, before the bit count is checked
#[derive(Deserialize)]
struct RawFingerprint {
    grid_size: usize,
    bits: Vec<bool>,
}

impl TryFrom<RawFingerprint> for Fingerprint {
    type Error = Error;

    fn try_from(raw: RawFingerprint) -> Result<Fingerprint> {
        if raw.grid_size == 0 {
            return Err(Error::InvalidConfiguration("fingerprint grid size must be positive".to_string()));
        }
        match raw.grid_size.checked_mul(raw.grid_size) {
            Some(expected) if expected == raw.bits.len() => Ok(Fingerprint {
                grid_size: raw.grid_size,
                bits: raw.bits,
            }),
            Some(expected) => Err(Error::LengthMismatch {
                expected: expected,
                actual: raw.bits.len(),
            }),
            None => Err(Error::InvalidConfiguration(format!(
                "fingerprint grid size {} is too large",
                raw.grid_size
            ))),
        }
    }
}

impl Fingerprint {
    // Empty fingerprint with every cell blank
    pub fn new(grid_size: usize) -> Fingerprint {
        Fingerprint {
            grid_size: grid_size,
            bits: vec![false; grid_size * grid_size],
        }
    }

    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    // Cells outside the grid read as blank
    pub fn get(&self, x: usize, y: usize) -> bool {
        if x >= self.grid_size || y >= self.grid_size {
            return false;
        }
        self.bits[x + y * self.grid_size]
    }

    // Inks one cell; cells outside the grid are ignored
    pub(crate) fn set(&mut self, x: usize, y: usize) {
        if x >= self.grid_size || y >= self.grid_size {
            return;
        }
        self.bits[x + y * self.grid_size] = true;
    }

    pub fn inked_count(&self) -> usize {
        self.bits.iter().filter(|bit| **bit).count()
    }

    /// Fraction of bit positions where both fingerprints hold the same value.
    pub fn agreement(&self, other: &Fingerprint) -> Result<f32> {
        if self.bits.len() != other.bits.len() {
            return Err(Error::LengthMismatch {
                expected: self.bits.len(),
                actual: other.bits.len(),
            });
        }
        if self.bits.is_empty() {
            return Err(Error::InvalidConfiguration("cannot compare empty fingerprints".to_string()));
        }
        let same = self.bits.iter().zip(other.bits.iter()).filter(|(a, b)| a == b).count();
        Ok(same as f32 / self.bits.len() as f32)
    }
}

// Draws the grid with the highest row first, so shapes appear upright
impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for y in (0..self.grid_size).rev() {
            for x in 0..self.grid_size {
                let c = if self.get(x, y) { '#' } else { '.' };
                write!(f, "{}", c)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

// A named fingerprint the recognizer compares candidates against
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Gesture {
    pub name: String,
    pub fingerprint: Fingerprint,
}

impl Gesture {
    pub fn new(name: &str, fingerprint: Fingerprint) -> Gesture {
        Gesture {
            name: name.to_string(),
            fingerprint: fingerprint,
        }
    }
}
