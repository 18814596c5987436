//! Input checks run before any formula is evaluated
//!
//! Each helper names the field it checks so the caller gets a precise
//! `CalcError::InvalidInput` instead of a NaN further down the line.

use crate::error::{CalcError, Result};

/// Highest annual rate accepted for interest, returns or inflation, in percent
pub const MAX_RATE_PERCENT: f64 = 1_000.0;

/// Longest projection horizon or loan term, in years
pub const MAX_YEARS: u32 = 100;

/// Longest loan term, in monthly payments
pub const MAX_TERM_MONTHS: u32 = MAX_YEARS * 12;

pub fn require_finite(field: &str, value: f64) -> Result<f64> {
    if !value.is_finite() {
        return Err(CalcError::invalid(field, format!("must be a finite number, got {}", value)));
    }
    Ok(value)
}

pub fn require_non_negative(field: &str, value: f64) -> Result<f64> {
    require_finite(field, value)?;
    if value < 0.0 {
        return Err(CalcError::invalid(field, format!("must not be negative, got {}", value)));
    }
    Ok(value)
}

pub fn require_positive(field: &str, value: f64) -> Result<f64> {
    require_finite(field, value)?;
    if value <= 0.0 {
        return Err(CalcError::invalid(field, format!("must be positive, got {}", value)));
    }
    Ok(value)
}

/// Terms and horizons are counted in whole periods and must be at least one
pub fn require_term(field: &str, value: u32) -> Result<u32> {
    if value == 0 {
        return Err(CalcError::invalid(field, "must be at least 1"));
    }
    Ok(value)
}

/// Annual rates are non-negative and capped at `MAX_RATE_PERCENT`
pub fn require_rate(field: &str, value: f64) -> Result<f64> {
    require_non_negative(field, value)?;
    if value > MAX_RATE_PERCENT {
        return Err(CalcError::invalid(
            field,
            format!("must not exceed {}%, got {}", MAX_RATE_PERCENT, value),
        ));
    }
    Ok(value)
}

/// Number of periods between 1 and `max`
pub fn require_bounded_term(field: &str, value: u32, max: u32) -> Result<u32> {
    require_term(field, value)?;
    if value > max {
        return Err(CalcError::invalid(field, format!("must not exceed {}, got {}", max, value)));
    }
    Ok(value)
}

pub fn require_percent_range(field: &str, value: f64) -> Result<f64> {
    require_non_negative(field, value)?;
    if value > 100.0 {
        return Err(CalcError::invalid(field, format!("must not exceed 100%, got {}", value)));
    }
    Ok(value)
}
