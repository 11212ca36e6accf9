use std::{cmp::Ordering, fmt::Display};

use serde::{Deserialize, Serialize};

use crate::{traits::CostFunction, DVector, Float};

/// Describes a point in parameter space along with its (cached) cost.
#[derive(Clone, Default, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// the point's position
    pub x: DVector<Float>,
    /// the point's evaluation (`None` if the point has not yet been evaluated)
    pub fx: Option<Float>,
}

impl Point {
    /// The number of coordinates of the point.
    pub fn dimension(&self) -> usize {
        self.x.len()
    }
    /// Compare two points by their `fx` value. Unevaluated points sort after evaluated ones, and a
    /// `NaN` cost sorts after every other evaluation regardless of its sign bit.
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        match (&self.fx, &other.fx) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(s), Some(o)) => match (s.is_nan(), o.is_nan()) {
                (true, true) => Ordering::Equal,
                (true, false) => Ordering::Greater,
                (false, true) => Ordering::Less,
                (false, false) => s.total_cmp(o),
            },
        }
    }
    /// Returns `true` if this point has been evaluated and its cost is no larger than `other`'s.
    ///
    /// An unevaluated `other` is beaten by any evaluated point. A `NaN` cost never beats anything,
    /// and any other cost beats a `NaN`.
    pub fn le_cost(&self, other: &Self) -> bool {
        match (self.fx, other.fx) {
            (Some(s), Some(o)) => !s.is_nan() && (o.is_nan() || s <= o),
            (Some(s), None) => !s.is_nan(),
            (None, _) => false,
        }
    }
    /// Move the point to a new position, resetting the evaluation of the point
    pub fn set_position(&mut self, x: DVector<Float>) {
        self.x = x;
        self.fx = None;
    }
    /// Returns `true` if every coordinate is finite.
    pub fn is_finite(&self) -> bool {
        self.x.iter().all(|xi| xi.is_finite())
    }
    /// Get the cost of the point, or `+inf` if it has not been evaluated.
    pub fn fx_or_inf(&self) -> Float {
        self.fx.unwrap_or(Float::INFINITY)
    }
    /// Evaluate the given function at the point's coordinate and set the `fx` value to the result.
    /// Points which already carry an evaluation are left untouched.
    ///
    /// # Errors
    ///
    /// Returns an `Err(E)` if the evaluation fails. Users should implement this trait to return a
    /// `std::convert::Infallible` if the function evaluation never fails.
    pub fn evaluate<U, E>(
        &mut self,
        func: &dyn CostFunction<U, E>,
        user_data: &mut U,
    ) -> Result<(), E> {
        if self.fx.is_none() {
            self.fx = Some(func.evaluate(self.x.as_slice(), user_data)?);
        }
        Ok(())
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "x: [")?;
        for (i, xi) in self.x.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{xi:+.6E}")?;
        }
        match self.fx {
            Some(fx) => write!(f, "], f(x): {fx:+.6E}"),
            None => write!(f, "], f(x): unevaluated"),
        }
    }
}

impl From<DVector<Float>> for Point {
    fn from(value: DVector<Float>) -> Self {
        Self { x: value, fx: None }
    }
}
impl From<Vec<Float>> for Point {
    fn from(value: Vec<Float>) -> Self {
        Self {
            x: DVector::from_vec(value),
            fx: None,
        }
    }
}
impl From<&[Float]> for Point {
    fn from(value: &[Float]) -> Self {
        Self {
            x: DVector::from_column_slice(value),
            fx: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;

    use super::*;

    struct Counter;
    impl CostFunction<usize, Infallible> for Counter {
        fn evaluate(&self, x: &[Float], n_evals: &mut usize) -> Result<Float, Infallible> {
            *n_evals += 1;
            Ok(x.iter().sum())
        }
    }

    #[test]
    fn test_evaluate_is_cached() {
        let mut p: Point = vec![1.0, 2.0].into();
        let mut n_evals = 0;
        p.evaluate(&Counter, &mut n_evals).unwrap();
        p.evaluate(&Counter, &mut n_evals).unwrap();
        assert_eq!(n_evals, 1);
        assert_eq!(p.fx, Some(3.0));
        p.set_position(DVector::from_vec(vec![0.0, 0.0]));
        assert_eq!(p.fx, None);
    }

    #[test]
    fn test_ordering() {
        let unevaluated: Point = vec![0.0].into();
        let low = Point {
            x: DVector::from_vec(vec![0.0]),
            fx: Some(1.0),
        };
        let high = Point {
            x: DVector::from_vec(vec![0.0]),
            fx: Some(2.0),
        };
        let nan = Point {
            x: DVector::from_vec(vec![0.0]),
            fx: Some(Float::NAN),
        };
        assert_eq!(low.total_cmp(&high), Ordering::Less);
        assert_eq!(unevaluated.total_cmp(&low), Ordering::Greater);
        assert!(low.le_cost(&high));
        assert!(low.le_cost(&low));
        assert!(!high.le_cost(&low));
        assert!(low.le_cost(&unevaluated));
        assert!(!unevaluated.le_cost(&low));
        assert!(!nan.le_cost(&unevaluated));
        assert!(!nan.le_cost(&high));
        assert!(high.le_cost(&nan));
        assert!(!nan.le_cost(&nan));
        let negative_nan = Point {
            x: DVector::from_vec(vec![0.0]),
            fx: Some(-Float::NAN),
        };
        assert!(low.le_cost(&negative_nan));
        assert_eq!(negative_nan.total_cmp(&low), Ordering::Greater);
        assert_eq!(low.total_cmp(&nan), Ordering::Less);
        assert_eq!(nan.total_cmp(&unevaluated), Ordering::Less);
    }

    #[test]
    fn test_display() {
        let p = Point {
            x: DVector::from_vec(vec![1.0]),
            fx: Some(0.5),
        };
        assert_eq!(p.to_string(), "x: [+1.000000E0], f(x): +5.000000E-1");
    }
}
