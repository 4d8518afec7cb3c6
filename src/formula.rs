//! Chest-girth weight formula
//!
//! Weight estimation from the thoracic circumference (CT) of a goat/sheep:
//!
//! weight = 0.00073 x girth² - 0.031 x girth + 2.4
//!
//! Girth in centimeters, weight in kilograms. Pure functions, no unit
//! conversion or clamping.

use crate::error::{Error, Result};

/// Quadratic coefficient (kg/cm²)
pub const GIRTH_COEFF_QUADRATIC: f64 = 0.00073;
/// Linear coefficient (kg/cm)
pub const GIRTH_COEFF_LINEAR: f64 = -0.031;
/// Constant term (kg)
pub const GIRTH_CONSTANT: f64 = 2.4;

/// Estimate live weight from a chest-girth measurement.
///
/// Fails with `InvalidInput` when the value is not a positive finite number;
/// the polynomial is never evaluated for rejected input.
pub fn weight_from_girth(girth_cm: f64) -> Result<f64> {
    if !girth_cm.is_finite() {
        return Err(Error::InvalidInput(format!(
            "girth must be a finite number, got {}",
            girth_cm
        )));
    }
    if girth_cm <= 0.0 {
        return Err(Error::InvalidInput(format!(
            "girth must be positive, got {}",
            girth_cm
        )));
    }

    Ok(GIRTH_COEFF_QUADRATIC * girth_cm * girth_cm + GIRTH_COEFF_LINEAR * girth_cm + GIRTH_CONSTANT)
}

/// Parse a girth value as typed by the user.
///
/// Accepts a decimal comma as well as a dot (pt-BR keyboards); empty or
/// non-numeric input is `InvalidInput`.
pub fn parse_girth(input: &str) -> Result<f64> {
    let normalized = input.trim().replace(',', ".");
    if normalized.is_empty() {
        return Err(Error::InvalidInput("empty girth input".to_string()));
    }
    normalized
        .parse::<f64>()
        .map_err(|_| Error::InvalidInput(format!("not a number: {:?}", input)))
}
