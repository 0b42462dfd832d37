//! Pure wedge geometry, independent of any rendering backend.
//!
//! Angles follow the mathematical convention: radians, counter-clockwise,
//! measured from the positive x axis with y pointing up, and the pie is
//! centered on the origin. The render pass mirrors the y axis when mapping
//! this onto a raster surface.

use super::Pie;
use kurbo::{Point, Vec2};
use std::f64::consts::PI;

/// Fraction of the radius at which the percentage text sits.
const PERCENT_DISTANCE: f64 = 0.6;
/// Fraction of the radius at which the category label sits, outside the rim.
const LABEL_DISTANCE: f64 = 1.1;

#[derive(Debug, Clone, PartialEq)]
pub struct PieLayout {
    pub radius: f64,
    pub wedges: Vec<Wedge>,
}

/// One laid-out slice of the pie.
#[derive(Debug, Clone, PartialEq)]
pub struct Wedge {
    /// Angle of the wedge's leading edge.
    pub start_angle: f64,
    /// Angular span. Non-negative for valid input.
    pub sweep: f64,
    /// Displacement of the whole wedge away from the pie center, along the
    /// wedge's angular bisector.
    pub offset: Vec2,
    /// Share of the total, in percent.
    pub percent: f64,
    /// The percentage rendered to one decimal place, e.g. `"35.0%"`.
    pub percent_label: String,
    /// Center point for the percentage text.
    pub percent_anchor: Point,
    /// Center point for the category label.
    pub label_anchor: Point,
}

/// Lay out `pie` as a circle of the given radius.
///
/// Wedges keep the input order and are placed sequentially, the first one
/// opening at the chart's start angle. Callers are expected to hand over a
/// validated [`Pie`], so the value total is known to be positive.
pub fn layout(pie: &Pie, radius: f64) -> PieLayout {
    let total: f64 = pie.slices.iter().map(|s| s.value).sum();
    let mut start = pie.start_angle.to_radians();
    let mut wedges = Vec::with_capacity(pie.slices.len());
    for slice in &pie.slices {
        let proportion = slice.value / total;
        let sweep = 2. * PI * proportion;
        let bisector = Vec2::from_angle(start + sweep * 0.5);
        let offset = bisector * (slice.explode * radius);
        let percent = proportion * 100.;
        wedges.push(Wedge {
            start_angle: start,
            sweep,
            offset,
            percent,
            percent_label: format!("{:.1}%", percent),
            percent_anchor: (offset + bisector * (radius * PERCENT_DISTANCE)).to_point(),
            label_anchor: (offset + bisector * (radius * LABEL_DISTANCE)).to_point(),
        });
        start += sweep;
    }
    PieLayout { radius, wedges }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Pie;
    use std::f64::consts::FRAC_PI_2;

    fn assert_approx_eq(x: f64, y: f64) {
        assert!((x - y).abs() < 1e-9, "{} != {}", x, y);
    }

    // for values derived with pocket-calculator trigonometry
    fn assert_near(x: f64, y: f64) {
        assert!((x - y).abs() < 1e-3, "{} != {}", x, y);
    }

    fn battery_usage() -> Pie {
        Pie::from_parts(
            ["CPU", "Mobile Network", "Wi-Fi", "Bluetooth", "Backlight"],
            [35., 30., 25., 7., 3.],
            [0., 0., 0., 0.1, 0.2],
        )
        .unwrap()
        .with_start_angle(90.)
    }

    #[test]
    fn percent_labels_have_one_decimal_place() {
        let out = layout(&battery_usage(), 100.);
        let labels: Vec<&str> = out
            .wedges
            .iter()
            .map(|w| w.percent_label.as_str())
            .collect();
        assert_eq!(labels, ["35.0%", "30.0%", "25.0%", "7.0%", "3.0%"]);
    }

    #[test]
    fn percentages_sum_to_one_hundred() {
        let out = layout(&battery_usage(), 100.);
        let sum: f64 = out.wedges.iter().map(|w| w.percent).sum();
        assert!((sum - 100.).abs() < 0.1);

        // values that are not already percentages
        let thirds = Pie::from_parts(["a", "b", "c"], [1., 1., 1.], [0., 0., 0.]).unwrap();
        let out = layout(&thirds, 100.);
        let sum: f64 = out.wedges.iter().map(|w| w.percent).sum();
        assert!((sum - 100.).abs() < 0.1);
        assert_eq!(out.wedges[0].percent_label, "33.3%");
    }

    #[test]
    fn wedges_are_sequential_and_close_the_circle() {
        let out = layout(&battery_usage(), 100.);
        let mut expected_start = FRAC_PI_2;
        for w in &out.wedges {
            assert_approx_eq(w.start_angle, expected_start);
            assert!(w.sweep >= 0.);
            expected_start += w.sweep;
        }
        assert_approx_eq(expected_start, FRAC_PI_2 + 2. * PI);
    }

    #[test]
    fn explode_displaces_along_the_bisector() {
        let out = layout(&battery_usage(), 100.);
        let displacement: Vec<f64> = out.wedges.iter().map(|w| w.offset.hypot()).collect();
        assert_approx_eq(displacement[0], 0.);
        assert_approx_eq(displacement[1], 0.);
        assert_approx_eq(displacement[2], 0.);
        assert_approx_eq(displacement[3], 10.);
        assert_approx_eq(displacement[4], 20.);
        assert!(displacement[4] > displacement[3]);

        // Bluetooth spans 25.2 degrees starting at 54, so its bisector sits
        // at 66.6 degrees; Backlight's bisector sits at 84.6 degrees.
        assert_near(out.wedges[3].offset.x, 3.9715);
        assert_near(out.wedges[3].offset.y, 9.1775);
        assert_near(out.wedges[4].offset.x, 1.8822);
        assert_near(out.wedges[4].offset.y, 19.9112);
    }

    #[test]
    fn text_anchors_sit_on_the_bisector() {
        let out = layout(&battery_usage(), 100.);
        // CPU spans 126 degrees starting at 90, bisector at 153 degrees.
        let cpu = &out.wedges[0];
        assert_near(cpu.percent_anchor.x, -53.4604);
        assert_near(cpu.percent_anchor.y, 27.2394);
        assert_near(cpu.label_anchor.x, -98.0107);
        assert_near(cpu.label_anchor.y, 49.9390);

        // exploded wedges carry their displacement into the anchors
        let bluetooth = &out.wedges[3];
        let dir = Vec2::from_angle(bluetooth.start_angle + bluetooth.sweep * 0.5);
        let expected = bluetooth.offset + dir * 60.;
        assert_approx_eq(bluetooth.percent_anchor.x, expected.x);
        assert_approx_eq(bluetooth.percent_anchor.y, expected.y);
    }

    #[test]
    fn layout_is_deterministic() {
        let pie = battery_usage();
        assert_eq!(layout(&pie, 100.), layout(&pie, 100.));
    }
}
