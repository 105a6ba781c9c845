//! Reconstruction scoring: a principal-subspace linear autoencoder. The
//! raw score is the mean squared deviation between a sample and its
//! projection onto the learned subspace.

use ndarray::{Array1, Array2, Axis};

use crate::trainer::AnomalyModel;

const POWER_ITERATIONS: usize = 100;
const CONVERGENCE_TOL: f64 = 1e-10;

#[derive(Debug, Clone)]
pub struct ReconstructionModel {
    components: Vec<Array1<f64>>,
}

impl ReconstructionModel {
    /// Fits the principal subspace of a normalized corpus, keeping
    /// components until `variance_target` of the total variance is
    /// captured, never keeping all dimensions.
    pub fn fit(corpus: &Array2<f64>, variance_target: f64) -> Self {
        let rows = corpus.nrows().max(1) as f64;
        let dims = corpus.ncols();
        let max_components = dims.saturating_sub(1).max(1);
        let mut deflated = corpus.t().dot(corpus) / rows;
        let total_variance: f64 = deflated.diag().sum();

        let mut components = Vec::new();
        let mut captured = 0.0;
        for _ in 0..max_components {
            let Some((eigvec, eigval)) = dominant_eigenpair(&deflated) else {
                break;
            };
            captured += eigval;
            // Deflate before the components list so the next iteration
            // finds the next eigenpair.
            let col = eigvec.clone().insert_axis(Axis(1));
            let row = eigvec.clone().insert_axis(Axis(0));
            deflated = deflated - col.dot(&row) * eigval;
            components.push(eigvec);
            if total_variance > 0.0 && captured / total_variance >= variance_target {
                break;
            }
        }
        Self { components }
    }

    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    pub fn reconstruct(&self, sample: &Array1<f64>) -> Array1<f64> {
        let mut reconstruction = Array1::zeros(sample.len());
        for component in &self.components {
            let coefficient = component.dot(sample);
            reconstruction = reconstruction + component * coefficient;
        }
        reconstruction
    }
}

impl AnomalyModel for ReconstructionModel {
    fn raw_score(&self, sample: &Array1<f64>) -> f64 {
        let residual = sample - &self.reconstruct(sample);
        residual.dot(&residual) / sample.len().max(1) as f64
    }
}

/// Deterministic power iteration with a fixed starting vector. Returns
/// `None` once the deflated matrix is numerically zero.
fn dominant_eigenpair(matrix: &Array2<f64>) -> Option<(Array1<f64>, f64)> {
    let dims = matrix.ncols();
    let mut vector = Array1::from_elem(dims, 1.0 / (dims as f64).sqrt());
    let mut eigenvalue = 0.0;
    for _ in 0..POWER_ITERATIONS {
        let product = matrix.dot(&vector);
        let norm = product.dot(&product).sqrt();
        if norm < 1e-12 {
            return None;
        }
        let next = product / norm;
        let delta = (&next - &vector).mapv(f64::abs).sum();
        vector = next;
        eigenvalue = norm;
        if delta < CONVERGENCE_TOL {
            break;
        }
    }
    Some((vector, eigenvalue))
}
