// =============================================================================
// Min-Max Scaler — maps a series onto [0, 1]
// =============================================================================
//
//   scaled   = (x - min) / range
//   restored = scaled * range + min
//
// A constant series has zero range; it is treated as 1 so the transform stays
// finite (scaled values become `x - min`, i.e. all zero).
// =============================================================================

/// Min-max normalisation fitted on a reference series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinMaxScaler {
    min: f64,
    range: f64,
}

impl MinMaxScaler {
    /// Fit on `values`. Returns `None` for an empty or non-finite series.
    pub fn fit(values: &[f64]) -> Option<Self> {
        if values.is_empty() || values.iter().any(|v| !v.is_finite()) {
            return None;
        }
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let range = if max - min == 0.0 { 1.0 } else { max - min };
        Some(Self { min, range })
    }

    pub fn transform(&self, x: f64) -> f64 {
        (x - self.min) / self.range
    }

    pub fn transform_all(&self, values: &[f64]) -> Vec<f64> {
        values.iter().map(|&v| self.transform(v)).collect()
    }

    pub fn inverse(&self, scaled: f64) -> f64 {
        scaled * self.range + self.min
    }
}
