//! k-means over the rows of the spectral embedding.
//!
//! Seeding is the deterministic-maximum k-means++ variant: the first
//! center is drawn from the RNG, every further center is the point with
//! the largest distance to its nearest chosen center.

use nalgebra::DVector;
use rand::{rngs::StdRng, Rng};

fn squared_distance(a: &DVector<f64>, b: &DVector<f64>) -> f64 {
    (a - b).norm_squared()
}

fn seed_centers(points: &[DVector<f64>], k: usize, rng: &mut StdRng) -> Vec<DVector<f64>> {
    let mut centers = Vec::with_capacity(k);
    centers.push(points[rng.gen_range(0..points.len())].clone());

    while centers.len() < k {
        let mut farthest = 0;
        let mut farthest_distance = -1.0;
        for (index, point) in points.iter().enumerate() {
            let nearest = centers
                .iter()
                .map(|center| squared_distance(point, center))
                .fold(f64::INFINITY, f64::min);
            if nearest > farthest_distance {
                farthest_distance = nearest;
                farthest = index;
            }
        }
        centers.push(points[farthest].clone());
    }

    centers
}

fn nearest_center(point: &DVector<f64>, centers: &[DVector<f64>]) -> usize {
    let mut best = 0;
    let mut best_distance = f64::INFINITY;
    for (index, center) in centers.iter().enumerate() {
        let distance = squared_distance(point, center);
        if distance < best_distance {
            best_distance = distance;
            best = index;
        }
    }
    best
}

/// Lloyd iterations until assignments stabilize or the cap is hit.
/// Returns the cluster index per point.
pub(super) fn kmeans(
    points: &[DVector<f64>],
    k: usize,
    max_iterations: usize,
    rng: &mut StdRng,
) -> Vec<usize> {
    let mut centers = seed_centers(points, k, rng);
    let mut assignment: Vec<usize> = points
        .iter()
        .map(|point| nearest_center(point, &centers))
        .collect();

    for _ in 0..max_iterations {
        let dimensions = points[0].len();
        let mut sums = vec![DVector::zeros(dimensions); k];
        let mut counts = vec![0_usize; k];
        for (point, &cluster) in points.iter().zip(&assignment) {
            counts[cluster] += 1;
            sums[cluster] += point;
        }
        #[allow(clippy::cast_precision_loss)]
        for (center, (sum, &count)) in centers.iter_mut().zip(sums.iter().zip(&counts)) {
            if count > 0 {
                *center = sum / count as f64;
            }
            // an emptied cluster keeps its previous center
        }

        let next: Vec<usize> = points
            .iter()
            .map(|point| nearest_center(point, &centers))
            .collect();
        if next == assignment {
            break;
        }
        assignment = next;
    }

    assignment
}
