//! Isolation scoring: an isolation forest over the normalized corpus.
//! Points that separate from the bulk in few random splits score as
//! anomalous. The raw score is a signed decision value, negative for
//! anomalous, in the same orientation as the margin model.

use ndarray::{Array1, Array2};
use rand::seq::index;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::trainer::AnomalyModel;

const EULER_MASCHERONI: f64 = 0.577_215_664_901_532_9;
const SPLIT_EPS: f64 = 1e-12;

#[derive(Debug, Clone)]
enum IsoNode {
    Leaf {
        size: usize,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: Box<IsoNode>,
        right: Box<IsoNode>,
    },
}

#[derive(Debug, Clone)]
pub struct IsolationForest {
    trees: Vec<IsoNode>,
    sample_size: usize,
}

/// Average unsuccessful-search path length of a binary search tree over
/// `n` points; the standard normalization term of isolation forests.
fn average_path_length(n: usize) -> f64 {
    if n <= 1 {
        return 0.0;
    }
    let n = n as f64;
    2.0 * ((n - 1.0).ln() + EULER_MASCHERONI) - 2.0 * (n - 1.0) / n
}

fn build_tree(
    data: &Array2<f64>,
    rows: &[usize],
    depth: usize,
    height_limit: usize,
    rng: &mut ChaCha8Rng,
) -> IsoNode {
    if depth >= height_limit || rows.len() <= 1 {
        return IsoNode::Leaf { size: rows.len() };
    }

    let dims = data.ncols();
    // A constant feature cannot split; try a few before giving up on the
    // node entirely.
    for _ in 0..dims {
        let feature = rng.gen_range(0..dims);
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for &row in rows {
            let value = data[[row, feature]];
            lo = lo.min(value);
            hi = hi.max(value);
        }
        if hi - lo < SPLIT_EPS {
            continue;
        }
        let threshold = rng.gen_range(lo..hi);
        let (left_rows, right_rows): (Vec<usize>, Vec<usize>) = rows
            .iter()
            .copied()
            .partition(|&row| data[[row, feature]] < threshold);
        return IsoNode::Split {
            feature,
            threshold,
            left: Box::new(build_tree(data, &left_rows, depth + 1, height_limit, rng)),
            right: Box::new(build_tree(data, &right_rows, depth + 1, height_limit, rng)),
        };
    }
    IsoNode::Leaf { size: rows.len() }
}

fn path_length(node: &IsoNode, sample: &Array1<f64>, depth: f64) -> f64 {
    match node {
        IsoNode::Leaf { size } => depth + average_path_length(*size),
        IsoNode::Split {
            feature,
            threshold,
            left,
            right,
        } => {
            if sample[*feature] < *threshold {
                path_length(left, sample, depth + 1.0)
            } else {
                path_length(right, sample, depth + 1.0)
            }
        }
    }
}

impl IsolationForest {
    pub fn fit(
        corpus: &Array2<f64>,
        tree_count: usize,
        max_samples: usize,
        mut rng: ChaCha8Rng,
    ) -> Self {
        let rows = corpus.nrows();
        let sample_size = max_samples.min(rows).max(1);
        let height_limit = (sample_size as f64).log2().ceil().max(1.0) as usize;

        let trees = (0..tree_count)
            .map(|_| {
                let picked = index::sample(&mut rng, rows, sample_size).into_vec();
                build_tree(corpus, &picked, 0, height_limit, &mut rng)
            })
            .collect();
        Self { trees, sample_size }
    }
}

impl AnomalyModel for IsolationForest {
    fn raw_score(&self, sample: &Array1<f64>) -> f64 {
        if self.trees.is_empty() {
            return 0.0;
        }
        let mean_path = self
            .trees
            .iter()
            .map(|tree| path_length(tree, sample, 0.0))
            .sum::<f64>()
            / self.trees.len() as f64;
        let normalizer = average_path_length(self.sample_size).max(SPLIT_EPS);
        // 2^(-E[h]/c) is ~0.5 for unremarkable points and approaches 1 for
        // points isolated near the root; recentre so negative = anomalous.
        0.5 - 2f64.powf(-mean_path / normalizer)
    }
}
