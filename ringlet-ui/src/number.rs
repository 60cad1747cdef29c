//! Number formatting for attribute values and labels.
//!
//! SVG and CSS consumers expect numbers written the way a browser stringifies
//! them: no trailing `.0`, no negative zero, and `NaN`/`Infinity` spelled out.
//! Rust's `Display` and `LowerExp` for `f64` already produce the shortest
//! round-tripping digits; this module picks the notation and spells out the
//! special values.

/// Magnitudes at or above this switch to exponent notation.
const EXPONENT_ABOVE: f64 = 1e21;
/// Magnitudes below this switch to exponent notation.
const EXPONENT_BELOW: f64 = 1e-6;

/// Formats `value` the way a browser would stringify it in markup.
///
/// Finite values use decimal notation unless their magnitude is below `1e-6`
/// or at least `1e21`, where they print as `1e-7` or `1e+21`. `-0.0` prints
/// as `0`, and non-finite values print as `NaN`, `Infinity` or `-Infinity`.
///
/// ```
/// use ringlet_ui::format_number;
///
/// assert_eq!(format_number(46.0), "46");
/// assert_eq!(format_number(-0.0), "0");
/// assert_eq!(format_number(f64::NAN), "NaN");
/// assert_eq!(format_number(1e21), "1e+21");
/// ```
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value.is_sign_positive() {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        }
    } else if value == 0.0 {
        "0".to_string()
    } else if (EXPONENT_BELOW..EXPONENT_ABOVE).contains(&value.abs()) {
        value.to_string()
    } else {
        exponent_form(value)
    }
}

fn exponent_form(value: f64) -> String {
    let formatted = format!("{value:e}");
    match formatted.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => formatted,
    }
}
