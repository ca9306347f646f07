//! Trust Bisection
//!
//! Splits the population into a trusted and a deflated set each iteration.
//! A one-dimensional 2-means over the reception estimates finds two
//! centroids; their midpoint is the boundary. Estimates strictly below the
//! boundary fall in the low set and receive `mean(low) / mean(high)` as their
//! next trust; everything else (including ties with the boundary) is reset
//! to full trust.
//!
//! # Degenerate input
//!
//! When every estimate is identical the centroids coincide, the boundary
//! equals the common value and all agents land in the high set. The low
//! trust is then reported as 0. An empty input yields a zeroed bisection
//! with nobody assigned.

use serde::Serialize;

/// Upper bound on Lloyd iterations; 1-D two-cluster runs converge in a handful.
pub const MAX_KMEANS_ITERATIONS: usize = 100;

/// Outcome of one bisection pass
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bisection {
    /// Smaller centroid (c0)
    pub low_centroid: f64,
    /// Larger centroid (c1)
    pub high_centroid: f64,
    pub boundary: f64,
    /// Trust assigned to every member of the low set
    pub low_trust: f64,
    pub low_count: usize,
    pub high_count: usize,
}

impl Bisection {
    /// Cluster `estimates` and derive the boundary and low-set trust.
    pub fn compute(estimates: &[f64]) -> Self {
        let Some((low_centroid, high_centroid)) = two_means(estimates) else {
            return Self {
                low_centroid: 0.0,
                high_centroid: 0.0,
                boundary: 0.0,
                low_trust: 0.0,
                low_count: 0,
                high_count: 0,
            };
        };
        let boundary = (low_centroid + high_centroid) / 2.0;

        let mut low_sum = 0.0;
        let mut low_count = 0usize;
        let mut high_sum = 0.0;
        let mut high_count = 0usize;
        for &estimate in estimates {
            if estimate < boundary {
                low_sum += estimate;
                low_count += 1;
            } else {
                high_sum += estimate;
                high_count += 1;
            }
        }

        let low_trust = if low_count == 0 || high_count == 0 {
            0.0
        } else {
            let high_mean = high_sum / high_count as f64;
            if high_mean > 0.0 {
                (low_sum / low_count as f64) / high_mean
            } else {
                0.0
            }
        };

        Self {
            low_centroid,
            high_centroid,
            boundary,
            low_trust,
            low_count,
            high_count,
        }
    }

    /// Low set membership; an estimate equal to the boundary is high.
    pub fn is_low(&self, estimate: f64) -> bool {
        estimate < self.boundary
    }

    /// Trust an agent with `estimate` carries into the next iteration.
    pub fn next_trust(&self, estimate: f64) -> f64 {
        if self.is_low(estimate) {
            self.low_trust
        } else {
            1.0
        }
    }

    /// Everyone fell into one set.
    pub fn is_degenerate(&self) -> bool {
        self.low_count == 0 || self.high_count == 0
    }
}

/// One-dimensional 2-means seeded with the minimum and maximum values.
///
/// Returns the centroids ordered `(c0, c1)` with `c0 <= c1`, or `None` for an
/// empty input. A point equidistant from both centroids joins the upper one.
pub fn two_means(values: &[f64]) -> Option<(f64, f64)> {
    let mut iter = values.iter().copied();
    let first = iter.next()?;
    let (min, max) = iter.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));

    let mut centroids = [min, max];
    let mut assignments = vec![usize::MAX; values.len()];

    for _iteration in 0..MAX_KMEANS_ITERATIONS {
        let mut changed = false;

        // Assignment step
        for (slot, &value) in assignments.iter_mut().zip(values) {
            let cluster = if (value - centroids[0]).abs() < (value - centroids[1]).abs() {
                0
            } else {
                1
            };
            if *slot != cluster {
                *slot = cluster;
                changed = true;
            }
        }

        if !changed {
            break;
        }

        // Update step; an empty cluster keeps its previous centroid
        for (c, centroid) in centroids.iter_mut().enumerate() {
            let mut sum = 0.0;
            let mut count = 0usize;
            for (&value, &cluster) in values.iter().zip(&assignments) {
                if cluster == c {
                    sum += value;
                    count += 1;
                }
            }
            if count > 0 {
                *centroid = sum / count as f64;
            }
        }
    }

    let [a, b] = centroids;
    Some((a.min(b), a.max(b)))
}
