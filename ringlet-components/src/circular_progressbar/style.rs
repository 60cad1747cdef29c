//! Stroke dash parameters that reveal part of the ring.

use ringlet_ui::format_number;

/// Lower bound applied to the percentage before computing the dash offset.
pub const MIN_PERCENTAGE: f64 = 0.0;
/// Upper bound applied to the percentage before computing the dash offset.
pub const MAX_PERCENTAGE: f64 = 100.0;

/// Dash parameters for the progress arc.
///
/// The dash and the gap both span the full circumference, so exactly one dash
/// exists; shifting it by `dash_offset` hides the unfilled share of the ring.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProgressStyle {
    /// Dash length and gap length, in view box units.
    pub dash_array: (f64, f64),
    /// Offset of the dash pattern, in view box units.
    pub dash_offset: f64,
}

impl ProgressStyle {
    /// Inline CSS for the progress path.
    pub fn to_css(&self) -> String {
        format!(
            "stroke-dasharray: {}px {}px; stroke-dashoffset: {}px",
            format_number(self.dash_array.0),
            format_number(self.dash_array.1),
            format_number(self.dash_offset)
        )
    }
}

/// Computes the dash parameters for `percentage` on a ring of `radius`.
///
/// The percentage is clamped into `[0, 100]`: 0 hides the whole stroke, 100
/// shows all of it. A NaN percentage yields a NaN offset.
pub fn progress_style(percentage: f64, radius: f64) -> ProgressStyle {
    let circumference = std::f64::consts::PI * 2.0 * radius;
    let truncated_percentage = percentage.clamp(MIN_PERCENTAGE, MAX_PERCENTAGE);
    ProgressStyle {
        dash_array: (circumference, circumference),
        dash_offset: (MAX_PERCENTAGE - truncated_percentage) / MAX_PERCENTAGE * circumference,
    }
}
