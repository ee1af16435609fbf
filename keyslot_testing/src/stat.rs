//! Empirical tests for the spread of hash functions.
use ndarray::prelude::*;
use ndarray::{ScalarOperand, Zip};
use num_traits::{Float, NumAssignOps};
use statrs::distribution::{ChiSquared, ContinuousCDF};

/// A result of a Chi-square test.
#[derive(Debug)]
pub struct Chi2Statistic<V> {
    pub chi2: V,
    pub dof: usize,
    pub p_value: V,
}

/// Calculates the chi-square statistic.
pub fn chi2<V>(observed: &[V], expected: &[V], dof: Option<usize>) -> Chi2Statistic<V>
where
    V: Float + NumAssignOps + From<f64>,
{
    debug_assert_eq!(observed.len(), expected.len(), "Dimensions must match");
    let chi2: V = Zip::from(observed)
        .and(expected)
        .fold(0.0.into(), |acc, &obs, &exp| {
            let diff = obs - exp;
            acc + diff.powf(2.0.into()) / exp
        });

    let dof = dof.unwrap_or(observed.len() - 1);
    let dist = ChiSquared::new(dof as f64).unwrap();
    let p_value = (1.0 - dist.cdf(chi2.to_f64().unwrap())).into();

    Chi2Statistic { chi2, dof, p_value }
}

/// Performs a Chi-square uniformity test.
pub fn chi2_uniformity<'a, V, A>(observed: A) -> Chi2Statistic<V>
where
    V: Float + NumAssignOps + From<f64> + ScalarOperand,
    A: AsArray<'a, V>,
{
    let observed: ArrayView1<V> = observed.into();
    let total_sum = observed.sum();
    let num_cells = observed.len();
    let expected_value = total_sum / (num_cells as f64).into();

    let expected = Array1::<V>::from_elem(observed.dim(), expected_value);

    chi2(
        observed.as_slice().unwrap(),
        expected.as_slice().unwrap(),
        None,
    )
}

/// Counts how many of `buckets` fall into each of `num_buckets` buckets.
pub fn bucket_counts(buckets: impl IntoIterator<Item = u32>, num_buckets: u32) -> Array1<f64> {
    let mut counts = Array1::<f64>::zeros(num_buckets as usize);
    for bucket in buckets {
        debug_assert!(
            bucket < num_buckets,
            r#""bucket" {} exceeds "num_buckets" {}"#,
            bucket,
            num_buckets
        );
        counts[bucket as usize] += 1.0;
    }
    counts
}

/// Tests whether bucket indices produced by a hash function are spread uniformly.
///
/// # Parameters
///
/// - `buckets`: Bucket index of every hashed key.
/// - `num_buckets`: Total number of buckets, including the ones no key landed in.
pub fn bucket_uniformity(
    buckets: impl IntoIterator<Item = u32>,
    num_buckets: u32,
) -> Chi2Statistic<f64> {
    debug_assert!(num_buckets > 1, r#""num_buckets" must be > 1"#);

    chi2_uniformity(&bucket_counts(buckets, num_buckets))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_counts() {
        let counts = bucket_counts([0, 2, 2, 3], 4);
        assert_eq!(counts, array![1.0, 0.0, 2.0, 1.0]);
    }

    #[test]
    fn test_perfectly_uniform_buckets() {
        let stat = bucket_uniformity((0..1000).map(|i| i % 10), 10);
        assert_eq!(stat.chi2, 0.0);
        assert_eq!(stat.dof, 9);
        assert!(stat.p_value > 0.99);
    }

    #[test]
    fn test_single_bucket_is_rejected() {
        let stat = bucket_uniformity(std::iter::repeat(3).take(1000), 10);
        assert!(stat.p_value < 0.0001, "{:?}", stat);
    }
}
