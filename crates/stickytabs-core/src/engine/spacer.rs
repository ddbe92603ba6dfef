//! Height of the spacer inside the sticky tabs row.
//!
//! The spacer grows from 0 to the nav overlay height while the scroll offset
//! crosses a band centered on the header bottom, so the tabs glide under the
//! overlay instead of jumping. The band is as wide as the nav is tall.

use super::clock::Geometry;

/// Linear map of `value` from `[in_min, in_max]` onto `[out_min, out_max]`, clamped
#[inline]
pub fn interpolate_clamped(
    value: f64,
    in_min: f64,
    in_max: f64,
    out_min: f64,
    out_max: f64,
) -> f64 {
    if in_max <= in_min {
        return if value < in_min { out_min } else { out_max };
    }
    if value <= in_min {
        return out_min;
    }
    if value >= in_max {
        return out_max;
    }
    let t = (value - in_min) / (in_max - in_min);
    out_min + (out_max - out_min) * t
}

/// Spacer height for a geometry snapshot.
///
/// Pure: the tab selection path calls this with the same snapshot the renderer
/// used, so both agree on the on-screen value.
pub fn spacer_height(geometry: &Geometry) -> f64 {
    let nav = geometry.nav_overlay_height;
    let threshold = geometry.header_height;
    let range = nav.max(1.0);
    interpolate_clamped(
        geometry.scroll_offset,
        threshold - range,
        threshold + range,
        0.0,
        nav,
    )
}
