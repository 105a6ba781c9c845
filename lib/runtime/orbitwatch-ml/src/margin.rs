//! Margin scoring: a one-class boundary around the normalized corpus. The
//! boundary is the 95th-percentile distance from the corpus centroid; the
//! raw score is the signed distance to it, scaled to [-1, 1], negative
//! outside the normal region.

use ndarray::{Array1, Array2, Axis};

use crate::trainer::AnomalyModel;

const BOUNDARY_QUANTILE: f64 = 0.95;
const RADIUS_FLOOR: f64 = 1e-8;

#[derive(Debug, Clone)]
pub struct MarginModel {
    center: Array1<f64>,
    radius: f64,
}

impl MarginModel {
    pub fn fit(corpus: &Array2<f64>) -> Self {
        let dims = corpus.ncols();
        let center = corpus
            .mean_axis(Axis(0))
            .unwrap_or_else(|| Array1::zeros(dims));

        let mut distances: Vec<f64> = corpus
            .rows()
            .into_iter()
            .map(|row| {
                let diff = &row.view() - &center;
                diff.dot(&diff).sqrt()
            })
            .collect();
        distances.sort_by(|a, b| a.total_cmp(b));

        let index = ((distances.len().saturating_sub(1)) as f64 * BOUNDARY_QUANTILE).round() as usize;
        let radius = distances
            .get(index)
            .copied()
            .unwrap_or(0.0)
            .max(RADIUS_FLOOR);
        Self { center, radius }
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl AnomalyModel for MarginModel {
    fn raw_score(&self, sample: &Array1<f64>) -> f64 {
        let diff = sample - &self.center;
        let distance = diff.dot(&diff).sqrt();
        ((self.radius - distance) / self.radius).clamp(-1.0, 1.0)
    }
}
