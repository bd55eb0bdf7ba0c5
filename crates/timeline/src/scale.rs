use serde::{Deserialize, Serialize};

use crate::ScaleError;

/// Piecewise-linear mapping through a list of control points.
///
/// With more than two points the domain is split into segments and each
/// segment interpolates between its own pair of range values. Inputs outside
/// the domain extrapolate along the first or last segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ScalePoints")]
pub struct LinearScale {
    domain: Vec<f32>,
    range: Vec<f32>,
}

#[derive(Deserialize)]
struct ScalePoints {
    domain: Vec<f32>,
    range: Vec<f32>,
}

impl TryFrom<ScalePoints> for LinearScale {
    type Error = ScaleError;

    fn try_from(points: ScalePoints) -> Result<Self, Self::Error> {
        Self::new(points.domain, points.range)
    }
}

impl LinearScale {
    pub fn new(domain: Vec<f32>, range: Vec<f32>) -> Result<Self, ScaleError> {
        if domain.len() != range.len() {
            return Err(ScaleError::LengthMismatch {
                domain: domain.len(),
                range: range.len(),
            });
        }
        if domain.len() < 2 {
            return Err(ScaleError::TooFewPoints(domain.len()));
        }
        let ordered = domain.iter().all(|d| d.is_finite())
            && domain.windows(2).all(|pair| pair[0] < pair[1]);
        if !ordered {
            return Err(ScaleError::UnorderedDomain);
        }
        Ok(Self { domain, range })
    }

    pub fn domain(&self) -> &[f32] {
        &self.domain
    }

    pub fn range(&self) -> &[f32] {
        &self.range
    }

    pub fn apply(&self, x: f32) -> f32 {
        let last = self.domain.len() - 1;
        // Number of interior breakpoints at or below x selects the segment.
        let segment = self.domain[1..last].partition_point(|d| *d <= x);
        let (d0, d1) = (self.domain[segment], self.domain[segment + 1]);
        let (r0, r1) = (self.range[segment], self.range[segment + 1]);
        let t = (x - d0) / (d1 - d0);
        r0 + t * (r1 - r0)
    }
}

/// Per-row start delay: zero at the first and last row, `peak` at the middle.
///
/// The curve runs through `(0, 0)`, `((rows - 1) / 2, peak)` and
/// `(rows - 1, 0)`, so `for_row(i) == for_row(rows - 1 - i)` for every row.
/// With an even row count the two middle rows share the highest delay.
#[derive(Debug, Clone, PartialEq)]
pub struct StaggerDelay {
    rows: usize,
    peak: f32,
    curve: Option<LinearScale>,
}

impl StaggerDelay {
    pub fn new(rows: usize, peak: f32) -> Result<Self, ScaleError> {
        if rows == 0 {
            return Err(ScaleError::NoRows);
        }
        if !peak.is_finite() || peak < 0.0 {
            return Err(ScaleError::InvalidPeak(peak));
        }
        // A single row has no span to interpolate across.
        let curve = if rows > 1 {
            let last = (rows - 1) as f32;
            Some(LinearScale::new(
                vec![0.0, last / 2.0, last],
                vec![0.0, peak, 0.0],
            )?)
        } else {
            None
        };
        Ok(Self { rows, peak, curve })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn peak(&self) -> f32 {
        self.peak
    }

    /// Start delay of `row`. Rows beyond the grid get no delay.
    pub fn for_row(&self, row: usize) -> f32 {
        match &self.curve {
            Some(curve) if row < self.rows => curve.apply(row as f32).max(0.0),
            _ => 0.0,
        }
    }

    pub fn delays(&self) -> Vec<f32> {
        (0..self.rows).map(|row| self.for_row(row)).collect()
    }
}
