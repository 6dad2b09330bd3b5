//! The spectral embedding: normalized Laplacian plus power iteration.
//!
//! Accuracy is deliberately loose (a fixed number of power-iteration
//! passes with Gram–Schmidt deflation). That is sufficient to embed the
//! graph for partitioning but not to report eigenvalues, which is why none
//! leave this module.

use nalgebra::{DMatrix, DVector};
use rand::{rngs::StdRng, Rng};

const POWER_ITERATIONS: usize = 20;

/// `L_norm = I − D^{-1/2} A D^{-1/2}` over a symmetric adjacency matrix.
/// Isolated nodes get a zero inverse-root degree.
pub(super) fn normalized_laplacian(adjacency: &DMatrix<f64>) -> DMatrix<f64> {
    let n = adjacency.nrows();
    let inverse_root_degrees = DVector::from_iterator(
        n,
        adjacency.row_iter().map(|row| {
            let degree = row.sum();
            if degree > 0.0 {
                1.0 / degree.sqrt()
            } else {
                0.0
            }
        }),
    );

    DMatrix::from_fn(n, n, |i, j| {
        let identity = if i == j { 1.0 } else { 0.0 };
        identity - inverse_root_degrees[i] * adjacency[(i, j)] * inverse_root_degrees[j]
    })
}

/// The `k` smallest eigenvectors of the Laplacian, approximated by power
/// iteration on `I − L_norm` (whose largest eigenvalues correspond to the
/// smallest of `L_norm`), deflating each new vector against the previously
/// computed ones.
pub(super) fn smallest_eigenvectors(
    laplacian: &DMatrix<f64>,
    k: usize,
    rng: &mut StdRng,
) -> Vec<DVector<f64>> {
    let n = laplacian.nrows();
    let shifted = DMatrix::identity(n, n) - laplacian;
    let mut vectors: Vec<DVector<f64>> = Vec::with_capacity(k);

    for _ in 0..k {
        let mut vector = random_unit_vector(n, rng);

        for _ in 0..POWER_ITERATIONS {
            vector = &shifted * &vector;
            deflate(&mut vector, &vectors);
            if !normalize(&mut vector) {
                // collapsed into the span of the previous vectors
                vector = random_unit_vector(n, rng);
                deflate(&mut vector, &vectors);
                normalize(&mut vector);
            }
        }

        vectors.push(vector);
    }

    vectors
}

/// Gram–Schmidt: removes the projections onto `basis` from `vector`.
fn deflate(vector: &mut DVector<f64>, basis: &[DVector<f64>]) {
    for previous in basis {
        let projection = vector.dot(previous);
        vector.axpy(-projection, previous, 1.0);
    }
}

/// Scales to unit length; `false` when the vector is numerically zero.
fn normalize(vector: &mut DVector<f64>) -> bool {
    vector.try_normalize_mut(1e-12).is_some()
}

fn random_unit_vector(n: usize, rng: &mut StdRng) -> DVector<f64> {
    let mut vector = DVector::from_fn(n, |_, _| rng.gen_range(-1.0..1.0));
    if !normalize(&mut vector) {
        vector = DVector::from_element(n, 1.0);
        normalize(&mut vector);
    }
    vector
}
