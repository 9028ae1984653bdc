//! Coarse-to-fine pyramid schedule derived from a configuration.

use serde::Serialize;

/// One pyramid level of the schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PyramidLevel {
    /// Zero-based level index, 0 being the coarsest.
    pub level: usize,
    /// Downsampling factor relative to full resolution.
    pub shrink_factor: usize,
    /// Optimizer iterations to run at this level.
    pub iterations: usize,
}

/// Per-level schedule with power-of-2 shrinking, coarsest level first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PyramidSchedule {
    levels: Vec<PyramidLevel>,
}

impl PyramidSchedule {
    /// Create a schedule of `levels` levels, each running `iterations` iterations.
    pub fn new(levels: usize, iterations: usize) -> Self {
        let levels = (0..levels)
            .map(|level| {
                let exponent = u32::try_from(levels - 1 - level).unwrap_or(u32::MAX);
                PyramidLevel {
                    level,
                    shrink_factor: 2usize.saturating_pow(exponent),
                    iterations,
                }
            })
            .collect();
        Self { levels }
    }

    pub fn levels(&self) -> &[PyramidLevel] {
        &self.levels
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn coarsest(&self) -> Option<&PyramidLevel> {
        self.levels.first()
    }

    pub fn finest(&self) -> Option<&PyramidLevel> {
        self.levels.last()
    }

    /// Total optimizer iterations over all levels, `None` on overflow.
    pub fn total_iterations(&self) -> Option<usize> {
        self.levels
            .iter()
            .try_fold(0usize, |total, l| total.checked_add(l.iterations))
    }
}
