//! Distance scale bar for projected-meter maps.

/// Round a target length down to the nearest 1–2–5 × 10^n meters.
pub fn nice_scale_length(target_m: f64) -> f64 {
    if target_m <= 0.0 {
        return 0.0;
    }
    let magnitude = 10f64.powi(target_m.log10().floor() as i32);
    let residual = target_m / magnitude;
    let nice = if residual >= 5.0 {
        5.0
    } else if residual >= 2.0 {
        2.0
    } else {
        1.0
    };
    nice * magnitude
}

/// Label for a bar length in meters.
pub fn scale_label(length_m: f64) -> String {
    if length_m >= 1000.0 {
        format!("{} km", format_length(length_m / 1000.0))
    } else {
        format!("{} m", format_length(length_m))
    }
}

/// Geometry for a lower-right scale bar inside the given data ranges.
///
/// Returns the bar rectangle corners and its label, or `None` when the
/// ranges are degenerate.
pub fn place_scale_bar(
    x_range: (f64, f64),
    y_range: (f64, f64),
) -> Option<((f64, f64), (f64, f64), String)> {
    let span_x = x_range.1 - x_range.0;
    let span_y = y_range.1 - y_range.0;
    if span_x <= 0.0 || span_y <= 0.0 {
        return None;
    }

    let length = nice_scale_length(span_x / 5.0);
    if length <= 0.0 {
        return None;
    }

    let margin_x = span_x * 0.04;
    let margin_y = span_y * 0.04;
    let height = span_y * 0.012;

    let x1 = x_range.1 - margin_x;
    let x0 = x1 - length;
    let y0 = y_range.0 + margin_y;
    let y1 = y0 + height;

    Some(((x0, y0), (x1, y1), scale_label(length)))
}

fn format_length(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{:.1}", value)
    }
}
