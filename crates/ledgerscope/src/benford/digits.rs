//! Leading-digit extraction and the Benford first-digit law.

/// Degrees of freedom of the first-digit chi-square test (9 digits - 1).
pub const DEGREES_OF_FREEDOM: u32 = 8;

/// Critical value for chi-squared with 8 degrees of freedom (p=0.05).
pub const BENFORD_CHI_SQ_CRITICAL: f64 = 15.507;

// Scaled values this close to an integer are re-checked against the
// decimal form, where a drifted 2.9999999 must still read as 3.
const BOUNDARY_TOLERANCE: f64 = 1e-9;

/// Expected proportion of leading digit `digit` (1-9): `log10(1 + 1/d)`.
///
/// # Panics
///
/// Panics if `digit` is not in 1..=9.
pub fn expected_proportion(digit: u8) -> f64 {
    assert!((1..=9).contains(&digit), "leading digit out of range: {digit}");
    (1.0 + 1.0 / digit as f64).log10()
}

/// Expected proportions for digits 1 through 9.
pub fn expected_distribution() -> [f64; 9] {
    std::array::from_fn(|i| expected_proportion(i as u8 + 1))
}

/// Leading significant digit of `value`, ignoring sign.
///
/// Returns `None` for zero, NaN and infinities, where the first-digit law
/// does not apply.
pub fn leading_digit(value: f64) -> Option<u8> {
    if !value.is_finite() || value == 0.0 {
        return None;
    }

    let magnitude = value.abs();
    let scaled = normalize(magnitude);

    if (scaled - scaled.round()).abs() <= BOUNDARY_TOLERANCE {
        return decimal_leading_digit(magnitude);
    }

    Some(scaled.trunc() as u8)
}

/// Scale a positive finite value by powers of ten into `[1, 10)`.
fn normalize(mut magnitude: f64) -> f64 {
    while magnitude >= 10.0 {
        magnitude /= 10.0;
    }
    while magnitude < 1.0 {
        magnitude *= 10.0;
    }
    magnitude
}

/// First digit of the shortest decimal representation that round-trips.
fn decimal_leading_digit(magnitude: f64) -> Option<u8> {
    let repr = format!("{magnitude:e}");
    repr.bytes()
        .find(|b| (b'1'..=b'9').contains(b))
        .map(|b| b - b'0')
}
