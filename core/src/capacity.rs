//! Weekly capacity of a single consultant.

use crate::{
    error::{SatResult, SaturationError},
    types::Hours,
};
use serde::Serialize;

/// Contractual hours and the fraction of them that is usable.
///
/// Weekly capacity is derived on every call and never stored, so it can
/// not drift from its two inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConsultantCapacity {
    weekly_available_hours: Hours,
    productivity_factor:    f64,
}

impl ConsultantCapacity {
    /// Build a validated capacity.
    ///
    /// - `weekly_available_hours` must be finite and > 0
    /// - `productivity_factor` must be in (0, 1]
    pub fn new(weekly_available_hours: Hours, productivity_factor: f64) -> SatResult<Self> {
        if !weekly_available_hours.is_finite() || weekly_available_hours <= 0.0 || productivity_factor == 0.0 {
            return Err(SaturationError::InvalidCapacity {
                available_hours: weekly_available_hours,
                productivity_factor,
            });
        }
        if !(productivity_factor > 0.0 && productivity_factor <= 1.0) {
            return Err(SaturationError::InvalidProductivityFactor(productivity_factor));
        }
        Ok(Self {
            weekly_available_hours,
            productivity_factor,
        })
    }

    pub fn weekly_available_hours(&self) -> Hours {
        self.weekly_available_hours
    }

    pub fn productivity_factor(&self) -> f64 {
        self.productivity_factor
    }

    pub fn weekly_capacity_hours(&self) -> Hours {
        self.weekly_available_hours * self.productivity_factor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_is_hours_times_factor() {
        let c = ConsultantCapacity::new(40.0, 0.70).unwrap();
        assert!((c.weekly_capacity_hours() - 28.0).abs() < 1e-9);
    }

    #[test]
    fn zero_inputs_are_capacity_errors() {
        assert!(matches!(
            ConsultantCapacity::new(0.0, 0.7),
            Err(SaturationError::InvalidCapacity { .. })
        ));
        assert!(matches!(
            ConsultantCapacity::new(40.0, 0.0),
            Err(SaturationError::InvalidCapacity { .. })
        ));
    }

    #[test]
    fn factor_outside_unit_interval_rejected() {
        assert!(matches!(
            ConsultantCapacity::new(40.0, 1.2),
            Err(SaturationError::InvalidProductivityFactor(_))
        ));
        assert!(matches!(
            ConsultantCapacity::new(40.0, -0.1),
            Err(SaturationError::InvalidProductivityFactor(_))
        ));
        assert!(ConsultantCapacity::new(40.0, 1.0).is_ok());
    }
}
