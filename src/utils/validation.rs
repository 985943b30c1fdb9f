use crate::utils::error::{Result, ScoreError};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_range(field_name: &str, value: f64, min: f64, max: f64) -> Result<()> {
    if !value.is_finite() || value < min || value > max {
        return Err(ScoreError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

pub fn validate_positive_weight(field_name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ScoreError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Weight must be a positive number".to_string(),
        });
    }
    Ok(())
}

/// Percentage weights for the final aggregation must total 100 exactly
/// (within floating tolerance); they are never silently renormalized.
pub fn validate_weight_sum(weights: &[f64]) -> Result<()> {
    let sum: f64 = weights.iter().sum();
    if (sum - 100.0).abs() > 1e-6 {
        return Err(ScoreError::InvalidWeights { actual: sum });
    }
    Ok(())
}

/// Upstream classifier output is not fully trusted; out-of-range values
/// are clamped instead of rejected.
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    if value.is_nan() {
        return min;
    }
    value.max(min).min(max)
}
