use ndarray::{Array1, Array2, Axis};

/// Floor added to every standard deviation so constant channels normalize
/// to zero instead of dividing by zero.
pub const STD_FLOOR: f64 = 1e-8;

/// Per-channel mean and standard deviation of one training corpus.
/// Computed once per training cycle and shared, immutable, by the three
/// models of an object.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizationStats {
    mean: Array1<f64>,
    std: Array1<f64>,
}

impl NormalizationStats {
    /// Population statistics over the corpus rows.
    pub fn fit(corpus: &Array2<f64>) -> Self {
        let columns = corpus.ncols();
        let mean = corpus
            .mean_axis(Axis(0))
            .unwrap_or_else(|| Array1::zeros(columns));
        let std = corpus.std_axis(Axis(0), 0.0) + STD_FLOOR;
        Self { mean, std }
    }

    pub fn apply(&self, values: &[f64]) -> Array1<f64> {
        let x = Array1::from_iter(values.iter().copied());
        (x - &self.mean) / &self.std
    }

    pub fn apply_matrix(&self, corpus: &Array2<f64>) -> Array2<f64> {
        let mut normalized = corpus.clone();
        for mut row in normalized.rows_mut() {
            let centered = (&row.view() - &self.mean) / &self.std;
            row.assign(&centered);
        }
        normalized
    }

    pub fn mean(&self) -> &Array1<f64> {
        &self.mean
    }

    pub fn std(&self) -> &Array1<f64> {
        &self.std
    }
}
