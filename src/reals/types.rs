//! Real-valued candidate representations.

use crate::error::ConfigError;

/// A candidate made of one or more real variables.
pub trait RealValued: Clone + Send {
    /// Number of variables.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get(&self, i: usize) -> f64;

    /// Sets variable `i`, clamped to the representation's bounds if any.
    fn set(&mut self, i: usize, value: f64);

    fn to_vec(&self) -> Vec<f64> {
        (0..self.len()).map(|i| self.get(i)).collect()
    }
}

/// Closed interval `[min, max]` applied by `set`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    min: f64,
    max: f64,
}

impl Bounds {
    /// Fails unless `min <= max` and neither is NaN. Infinite ends are
    /// allowed.
    pub fn new(min: f64, max: f64) -> Result<Self, ConfigError> {
        if min.is_nan() || max.is_nan() || min > max {
            return Err(ConfigError::invalid(
                "bounds",
                format!("min {min} must not exceed max {max}"),
            ));
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    #[inline]
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}

/// A single real variable.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SingleReal {
    value: f64,
    bounds: Option<Bounds>,
}

impl SingleReal {
    pub fn new(value: f64) -> Self {
        Self {
            value,
            bounds: None,
        }
    }

    /// Bounded variable; `value` is clamped into `bounds`.
    pub fn bounded(value: f64, bounds: Bounds) -> Self {
        Self {
            value: bounds.clamp(value),
            bounds: Some(bounds),
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }
}

impl RealValued for SingleReal {
    fn len(&self) -> usize {
        1
    }

    fn get(&self, i: usize) -> f64 {
        assert_eq!(i, 0, "index {i} out of range for SingleReal");
        self.value
    }

    fn set(&mut self, i: usize, value: f64) {
        assert_eq!(i, 0, "index {i} out of range for SingleReal");
        self.value = match self.bounds {
            Some(b) => b.clamp(value),
            None => value,
        };
    }
}

/// A vector of real variables sharing one optional bound.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RealVector {
    values: Vec<f64>,
    bounds: Option<Bounds>,
}

impl RealVector {
    pub fn new(values: Vec<f64>) -> Self {
        Self {
            values,
            bounds: None,
        }
    }

    /// Bounded vector; every value is clamped into `bounds`.
    pub fn bounded(mut values: Vec<f64>, bounds: Bounds) -> Self {
        for v in &mut values {
            *v = bounds.clamp(*v);
        }
        Self {
            values,
            bounds: Some(bounds),
        }
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }
}

impl RealValued for RealVector {
    fn len(&self) -> usize {
        self.values.len()
    }

    fn get(&self, i: usize) -> f64 {
        self.values[i]
    }

    fn set(&mut self, i: usize, value: f64) {
        self.values[i] = match self.bounds {
            Some(b) => b.clamp(value),
            None => value,
        };
    }

    fn to_vec(&self) -> Vec<f64> {
        self.values.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_real() {
        let mut x = SingleReal::new(2.5);
        assert_eq!(x.len(), 1);
        assert!(!x.is_empty());
        assert_eq!(x.get(0), 2.5);
        x.set(0, -100.0);
        assert_eq!(x.value(), -100.0);
        assert_eq!(x.to_vec(), vec![-100.0]);
    }

    #[test]
    fn test_bounds_validation() {
        assert!(Bounds::new(1.0, 0.0).is_err());
        assert!(Bounds::new(f64::NAN, 1.0).is_err());
        assert!(Bounds::new(0.0, f64::NAN).is_err());
        let point = Bounds::new(2.0, 2.0).unwrap();
        assert_eq!(point.clamp(-7.0), 2.0);
        let open = Bounds::new(f64::NEG_INFINITY, 0.0).unwrap();
        assert_eq!(open.clamp(-1e300), -1e300);
        assert_eq!(open.clamp(3.0), 0.0);
        assert_eq!((open.min(), open.max()), (f64::NEG_INFINITY, 0.0));
    }

    #[test]
    fn test_single_real_bounds() {
        let bounds = Bounds::new(-1.0, 1.0).unwrap();
        let mut x = SingleReal::bounded(5.0, bounds);
        assert_eq!(x.value(), 1.0);
        x.set(0, -3.0);
        assert_eq!(x.value(), -1.0);
        x.set(0, 0.25);
        assert_eq!(x.value(), 0.25);
    }

    #[test]
    #[should_panic]
    fn test_single_real_index_out_of_range() {
        SingleReal::new(0.0).get(1);
    }

    #[test]
    fn test_real_vector() {
        let mut v = RealVector::new(vec![1.0, 2.0, 3.0]);
        assert_eq!(v.len(), 3);
        v.set(1, 20.0);
        assert_eq!(v.values(), &[1.0, 20.0, 3.0]);
        assert!(RealVector::new(vec![]).is_empty());
    }

    #[test]
    fn test_real_vector_bounds() {
        let bounds = Bounds::new(0.0, 10.0).unwrap();
        let mut v = RealVector::bounded(vec![-1.0, 5.0, 11.0], bounds);
        assert_eq!(v.to_vec(), vec![0.0, 5.0, 10.0]);
        v.set(0, 12.0);
        assert_eq!(v.get(0), 10.0);
        assert_eq!(v.bounds(), Some(bounds));
    }
}
