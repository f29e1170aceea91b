//! Recognizer configuration

use serde_derive::{Deserialize, Serialize};

use super::error::{Error, Result};

/// Default side length of the fingerprint grid
pub const DEFAULT_GRID_SIZE: usize = 64;
/// Default divisor turning grid size into stroke thickness
pub const DEFAULT_THICKNESS_FACTOR: usize = 4;
/// Largest grid side accepted; keeps `grid_size * grid_size` bits allocatable
pub const MAX_GRID_SIZE: usize = 4096;
/// Default minimum agreement ratio for a match
pub const DEFAULT_MATCH_THRESHOLD: f32 = 0.7;

/// Parameters shared by fingerprinting and matching
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct RecognizerConfig {
    /// Side length of the square bit grid
    pub grid_size: usize,
    /// Stroke thickness is `grid_size / thickness_factor` cells
    pub thickness_factor: usize,
    /// Number of resampled points; derived from stroke thickness when absent
    pub resample_count: Option<usize>,
    /// Minimum score a stored gesture needs to count as a match
    pub match_threshold: f32,
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        RecognizerConfig {
            grid_size: DEFAULT_GRID_SIZE,
            thickness_factor: DEFAULT_THICKNESS_FACTOR,
            resample_count: None,
            match_threshold: DEFAULT_MATCH_THRESHOLD,
        }
    }
}

impl RecognizerConfig {
    pub fn new(grid_size: usize, thickness_factor: usize) -> RecognizerConfig {
        RecognizerConfig {
            grid_size: grid_size,
            thickness_factor: thickness_factor,
            ..Default::default()
        }
    }

    pub fn with_resample_count(mut self, resample_count: usize) -> RecognizerConfig {
        self.resample_count = Some(resample_count);
        self
    }

    pub fn with_match_threshold(mut self, match_threshold: f32) -> RecognizerConfig {
        self.match_threshold = match_threshold;
        self
    }

    /// Number of grid cells, per axis, covered by one stroke.
    /// Zero when the factor is unusable; `validate` rejects that.
    pub fn stroke_thickness(&self) -> usize {
        if self.thickness_factor == 0 {
            return 0;
        }
        self.grid_size / self.thickness_factor
    }

    /// Points produced by resampling: `stroke_thickness` intervals unless set explicitly
    pub fn resample_count(&self) -> usize {
        match self.resample_count {
            Some(count) => count,
            None => self.stroke_thickness() + 1,
        }
    }

    /// Checks every parameter; returns the first problem found.
    pub fn validate(&self) -> Result<()> {
        if self.grid_size == 0 {
            return Err(Error::InvalidConfiguration("grid size must be positive".to_string()));
        }
        if self.grid_size > MAX_GRID_SIZE {
            return Err(Error::InvalidConfiguration(format!(
                "grid size must be at most {}, got {}",
                MAX_GRID_SIZE, self.grid_size
            )));
        }
        if self.thickness_factor == 0 {
            return Err(Error::InvalidConfiguration("thickness factor must be positive".to_string()));
        }
        if self.stroke_thickness() == 0 {
            return Err(Error::InvalidConfiguration(format!(
                "thickness factor {} leaves no stroke thickness on a grid of {}",
                self.thickness_factor, self.grid_size
            )));
        }
        if let Some(count) = self.resample_count {
            if count < 2 {
                return Err(Error::InvalidConfiguration(format!(
                    "resample count must be at least 2, got {}",
                    count
                )));
            }
        }
        if !self.match_threshold.is_finite() || self.match_threshold < 0f32 || self.match_threshold > 1f32 {
            return Err(Error::InvalidConfiguration(format!(
                "match threshold must lie in [0, 1], got {}",
                self.match_threshold
            )));
        }
        Ok(())
    }
}
