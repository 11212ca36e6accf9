use fastrand::Rng;
use fastrand_contrib::RngExt;

use crate::{DVector, Float};

/// Draw a vector whose components are independent uniform samples from `[0, 1)`.
pub fn generate_unit_vector(dimension: usize, rng: &mut Rng) -> DVector<Float> {
    DVector::from_iterator(dimension, (0..dimension).map(|_| rng.float()))
}

/// Draw a vector whose `i`-th component is uniform within `limits[i]`.
pub fn generate_random_vector_in_limits(limits: &[(Float, Float)], rng: &mut Rng) -> DVector<Float> {
    DVector::from_iterator(
        limits.len(),
        limits.iter().map(|&(lower, upper)| rng.range(lower, upper)),
    )
}

/// A helper trait to get feature-gated floating-point random values
pub trait SampleFloat {
    /// Get a random value in a range
    fn range(&mut self, lower: Float, upper: Float) -> Float;
    /// Get a random value in the range [0, 1)
    fn float(&mut self) -> Float;
}
impl SampleFloat for Rng {
    #[cfg(not(feature = "f32"))]
    fn range(&mut self, lower: Float, upper: Float) -> Float {
        self.f64_range(lower..upper)
    }
    #[cfg(feature = "f32")]
    fn range(&mut self, lower: Float, upper: Float) -> Float {
        self.f32_range(lower..upper)
    }
    #[cfg(not(feature = "f32"))]
    fn float(&mut self) -> Float {
        self.f64()
    }
    #[cfg(feature = "f32")]
    fn float(&mut self) -> Float {
        self.f32()
    }
}
