//! Age Sampler Module
//! Draws the user-age sample for the demographics histogram.

use rand::distributions::Distribution;
use rand::rngs::StdRng;
use rand::SeedableRng;
use statrs::distribution::Normal;

use super::DataError;

/// Fixed seed so the rendered histogram is reproducible run to run.
pub const AGE_SEED: u64 = 42;

const AGE_MEAN: f64 = 35.0;
const AGE_STD_DEV: f64 = 10.0;
const AGE_MIN: f64 = 18.0;
const AGE_MAX: f64 = 65.0;

/// Draw `count` ages from N(35, 10), clamped to the 18..=65 range.
pub fn sample_user_ages(count: usize, seed: u64) -> Result<Vec<f64>, DataError> {
    let normal = match Normal::new(AGE_MEAN, AGE_STD_DEV) {
        Ok(dist) => dist,
        Err(_) => return Err(DataError::InvalidDistribution),
    };

    let mut rng = StdRng::seed_from_u64(seed);
    Ok((0..count)
        .map(|_| normal.sample(&mut rng).clamp(AGE_MIN, AGE_MAX))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_has_requested_length() {
        let ages = sample_user_ages(18, AGE_SEED).unwrap();
        assert_eq!(ages.len(), 18);
    }

    #[test]
    fn ages_stay_in_realistic_range() {
        let ages = sample_user_ages(500, AGE_SEED).unwrap();
        assert!(ages.iter().all(|&a| (AGE_MIN..=AGE_MAX).contains(&a)));
    }

    #[test]
    fn same_seed_gives_same_sample() {
        let a = sample_user_ages(18, 7).unwrap();
        let b = sample_user_ages(18, 7).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_diverge() {
        let a = sample_user_ages(18, 1).unwrap();
        let b = sample_user_ages(18, 2).unwrap();
        assert_ne!(a, b);
    }
}
