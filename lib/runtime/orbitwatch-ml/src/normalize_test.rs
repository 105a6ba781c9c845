use ndarray::{arr2, Array2};

use crate::normalize::{NormalizationStats, STD_FLOOR};

#[test]
fn zero_variance_channels_normalize_to_zero() {
    let corpus: Array2<f64> = arr2(&[[5.0, 1.0], [5.0, 1.0], [5.0, 1.0]]);
    let stats = NormalizationStats::fit(&corpus);

    for value in stats.std() {
        assert!(*value >= STD_FLOOR, "std {value} lost its floor");
    }

    let normalized = stats.apply(&[5.0, 1.0]);
    for value in &normalized {
        assert_eq!(*value, 0.0);
        assert!(value.is_finite());
    }
}

#[test]
fn statistics_center_and_scale_the_corpus() {
    let corpus: Array2<f64> = arr2(&[[0.0, 10.0], [2.0, 30.0], [4.0, 50.0]]);
    let stats = NormalizationStats::fit(&corpus);

    assert!((stats.mean()[0] - 2.0).abs() < 1e-12);
    assert!((stats.mean()[1] - 30.0).abs() < 1e-12);

    let normalized = stats.apply_matrix(&corpus);
    let recentred = normalized.column(0).sum() / 3.0;
    assert!(recentred.abs() < 1e-9);

    // Population std of [0, 2, 4] is sqrt(8/3).
    let expected = (8.0f64 / 3.0).sqrt();
    assert!((stats.std()[0] - (expected + STD_FLOOR)).abs() < 1e-9);
}

#[test]
fn apply_matches_apply_matrix_row_by_row() {
    let corpus: Array2<f64> = arr2(&[[1.0, -4.0], [3.0, 6.0], [5.0, 2.0]]);
    let stats = NormalizationStats::fit(&corpus);
    let normalized = stats.apply_matrix(&corpus);
    for (i, row) in corpus.rows().into_iter().enumerate() {
        let single = stats.apply(&[row[0], row[1]]);
        for j in 0..2 {
            assert!((single[j] - normalized[[i, j]]).abs() < 1e-12);
        }
    }
}
