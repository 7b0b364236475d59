/// Rounds a value to the given number of decimal digits, ties away from zero.
///
/// Used both for provider-side price rounding and for the fixed-precision
/// steps in the derived-metric formulas.
///
/// # Arguments
/// * `value` - The value to round.
/// * `digits` - Number of decimal digits to keep.
pub fn round_to(value: f64, digits: u32) -> f64 {
    let factor = 10f64.powi(digits as i32);
    (value * factor).round() / factor
}
