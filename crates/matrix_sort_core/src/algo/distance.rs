//! Similarity to TSP distance conversion.

/// Maps a similarity value to a finite, non-negative edge distance.
pub trait SimilarityToDistance {
    fn convert(&self, similarity: f64) -> f64;
}

impl<F> SimilarityToDistance for F
where
    F: Fn(f64) -> f64,
{
    fn convert(&self, similarity: f64) -> f64 {
        self(similarity)
    }
}

/// `factor / (summand + exp(-|1 - s|))`, with NaN mapped to `nan_replacement`.
///
/// Well-matched pairs sit near `s = 1` and get distance `factor / (summand + 1)`;
/// dissimilar pairs grow towards `factor / summand` (unbounded when the
/// summand is 0, but finite for every finite input).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SigmoidDistance {
    factor: f64,
    summand: f64,
    nan_replacement: f64,
}

impl SigmoidDistance {
    pub const fn new(factor: f64) -> Self {
        Self {
            factor,
            summand: 0.0,
            nan_replacement: 0.0,
        }
    }

    pub const fn with_summand(mut self, summand: f64) -> Self {
        self.summand = summand;
        self
    }

    pub const fn with_nan_replacement(mut self, nan_replacement: f64) -> Self {
        self.nan_replacement = nan_replacement;
        self
    }

    pub fn factor(&self) -> f64 {
        self.factor
    }

    pub fn summand(&self) -> f64 {
        self.summand
    }

    pub fn nan_replacement(&self) -> f64 {
        self.nan_replacement
    }
}

impl SimilarityToDistance for SigmoidDistance {
    fn convert(&self, similarity: f64) -> f64 {
        if similarity.is_nan() {
            return self.nan_replacement;
        }
        let abs_diff = (1.0 - similarity).abs();
        self.factor / (self.summand + (-abs_diff).exp())
    }
}

#[cfg(test)]
mod tests {
    use super::{SigmoidDistance, SimilarityToDistance};

    const EPS: f64 = 1e-9;

    #[test]
    fn perfect_similarity_maps_to_factor() {
        let d = SigmoidDistance::new(1000.0);
        assert!((d.convert(1.0) - 1000.0).abs() < EPS);
    }

    #[test]
    fn nan_maps_to_replacement() {
        assert_eq!(SigmoidDistance::new(1000.0).convert(f64::NAN), 0.0);
        let d = SigmoidDistance::new(1000.0).with_nan_replacement(1_000_000.0);
        assert_eq!(d.convert(f64::NAN), 1_000_000.0);
    }

    #[test]
    fn distance_grows_as_similarity_drops() {
        let d = SigmoidDistance::new(1000.0);
        let near = d.convert(0.9);
        let far = d.convert(0.1);
        assert!(near < far);
        assert!((d.convert(0.0) - 1000.0 * std::f64::consts::E).abs() < 1e-6);
    }

    #[test]
    fn transform_is_symmetric_around_one() {
        let d = SigmoidDistance::new(10.0).with_summand(0.5);
        assert!((d.convert(0.75) - d.convert(1.25)).abs() < EPS);
    }

    #[test]
    fn summand_bounds_the_distance() {
        let d = SigmoidDistance::new(10.0).with_summand(1.0);
        assert!((d.convert(1.0) - 5.0).abs() < EPS);
        assert!(d.convert(-1e6) <= 10.0);
        assert!(d.convert(-1e6).is_finite());
    }

    #[test]
    fn closures_convert_too() {
        let scale = |s: f64| s * 2.0;
        assert_eq!(scale.convert(3.0), 6.0);
    }
}
