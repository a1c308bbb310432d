//! Sequential color ramps for choropleth fills.

use plotters::style::RGBColor;

/// A multi-stop sequential ramp sampled by linear interpolation.
#[derive(Debug, Clone, Copy)]
pub struct ColorRamp {
    pub name: &'static str,
    anchors: &'static [(u8, u8, u8)],
}

/// ColorBrewer OrRd, the count-map fill.
pub const OR_RD: ColorRamp = ColorRamp {
    name: "OrRd",
    anchors: &[
        (255, 247, 236),
        (254, 232, 200),
        (253, 212, 158),
        (253, 187, 132),
        (252, 141, 89),
        (239, 101, 72),
        (215, 48, 31),
        (179, 0, 0),
        (127, 0, 0),
    ],
};

/// ColorBrewer YlGnBu, the density-map fill.
pub const YL_GN_BU: ColorRamp = ColorRamp {
    name: "YlGnBu",
    anchors: &[
        (255, 255, 217),
        (237, 248, 177),
        (199, 233, 180),
        (127, 205, 187),
        (65, 182, 196),
        (29, 145, 192),
        (34, 94, 168),
        (37, 52, 148),
        (8, 29, 88),
    ],
};

impl ColorRamp {
    /// Sample the ramp at `t` in [0, 1].
    pub fn sample(&self, t: f64) -> RGBColor {
        let t = t.clamp(0.0, 1.0);
        let last = self.anchors.len() - 1;
        let pos = t * last as f64;
        let lo = pos.floor() as usize;
        let hi = pos.ceil() as usize;
        let frac = pos - lo as f64;

        let (r0, g0, b0) = self.anchors[lo];
        let (r1, g1, b1) = self.anchors[hi];
        let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * frac).round() as u8;
        RGBColor(lerp(r0, r1), lerp(g0, g1), lerp(b0, b1))
    }

    /// Fill color for class `class` out of `classes`.
    pub fn class_color(&self, class: usize, classes: usize) -> RGBColor {
        if classes <= 1 {
            return self.sample(1.0);
        }
        self.sample(class as f64 / (classes - 1) as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_hits_anchor_endpoints() {
        assert_eq!(OR_RD.sample(0.0), RGBColor(255, 247, 236));
        assert_eq!(OR_RD.sample(1.0), RGBColor(127, 0, 0));
        assert_eq!(YL_GN_BU.sample(0.0), RGBColor(255, 255, 217));
        assert_eq!(YL_GN_BU.sample(1.0), RGBColor(8, 29, 88));
    }

    #[test]
    fn test_sample_clamps_out_of_range() {
        assert_eq!(OR_RD.sample(-1.0), OR_RD.sample(0.0));
        assert_eq!(OR_RD.sample(2.0), OR_RD.sample(1.0));
    }

    #[test]
    fn test_class_colors_span_the_ramp() {
        let first = OR_RD.class_color(0, 7);
        let last = OR_RD.class_color(6, 7);
        assert_eq!(first, OR_RD.sample(0.0));
        assert_eq!(last, OR_RD.sample(1.0));
    }

    #[test]
    fn test_midpoint_interpolates_between_anchors() {
        // Halfway between two adjacent anchors of an 9-stop ramp.
        let t = 0.5 / 8.0;
        let RGBColor(r, g, b) = OR_RD.sample(t);
        assert_eq!((r, g, b), (255, 240, 218));
    }
}
