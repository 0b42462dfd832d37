use super::{layout, Pie, PieStyle, TextStyle};
use kurbo::{CircleSegment, Point, Vec2};
use piet::{RenderContext, Text, TextLayout, TextLayoutBuilder};
use std::sync::Arc;

/// Side length of the square canvas. Width and height stay equal so wedges
/// render as true circular arcs.
pub(crate) const CANVAS_SIZE: f64 = 360.;

const PIE_RADIUS: f64 = 100.;
const TITLE_PADDING: f64 = 10.;

pub fn render<RC: RenderContext>(
    chart: &Pie,
    style: &PieStyle,
    ctx: &mut RC,
) -> Result<(), piet::Error> {
    let plan = layout::layout(chart, PIE_RADIUS);

    // build text layouts
    let title = chart
        .title
        .as_ref()
        .map(|title| {
            let title: Arc<str> = title.as_str().into();

            ctx.text()
                .new_text_layout(title)
                .apply_style(&style.title)
                .build()
        })
        .transpose()?;

    // build brushes
    let outline_brush = ctx.solid_brush(style.wedge_outline_color);
    let color_brushes = (0..chart.slices.len())
        .map(|idx| {
            let color = style.wedge_colors.color(idx);
            ctx.solid_brush(color)
        })
        .collect::<Vec<_>>();

    ctx.clear(None, style.background_color);

    // draw title
    if let Some(ref title_layout) = title {
        let size = title_layout.size();
        let title_tl = Point {
            x: (CANVAS_SIZE - size.width) * 0.5,
            y: TITLE_PADDING,
        };
        ctx.draw_text(title_layout, title_tl);
    }

    let center = Point::new(CANVAS_SIZE * 0.5, CANVAS_SIZE * 0.5);

    // shadow pass: the same wedges again, pushed aside, under everything
    if let Some(ref shadow) = style.shadow {
        let shadow_brush = ctx.solid_brush(shadow.color);
        for wedge in &plan.wedges {
            let segment = screen_segment(wedge, center + shadow.offset, plan.radius);
            ctx.fill(&segment, &shadow_brush);
        }
    }

    // draw wedges with their labels
    for ((wedge, slice), brush) in plan.wedges.iter().zip(&chart.slices).zip(&color_brushes) {
        let segment = screen_segment(wedge, center, plan.radius);
        ctx.fill(&segment, brush);
        ctx.stroke(&segment, &outline_brush, style.wedge_outline_thickness);

        if let Some(ref percent_style) = style.percent_label {
            let percent_layout = ctx
                .text()
                .new_text_layout(wedge.percent_label.clone())
                .apply_style(percent_style)
                .build()?;
            draw_centered(ctx, &percent_layout, center + to_screen(wedge.percent_anchor));
        }

        let label: Arc<str> = slice.label.as_str().into();
        let label_layout = ctx
            .text()
            .new_text_layout(label)
            .apply_style(&style.wedge_label)
            .build()?;
        draw_centered(ctx, &label_layout, center + to_screen(wedge.label_anchor));
    }

    Ok(())
}

/// Map a laid-out wedge onto the canvas. Layout angles are y-up and
/// counter-clockwise, the canvas is y-down, so angles negate.
fn screen_segment(wedge: &layout::Wedge, center: Point, radius: f64) -> CircleSegment {
    CircleSegment {
        center: center + Vec2::new(wedge.offset.x, -wedge.offset.y),
        outer_radius: radius,
        inner_radius: 0.,
        start_angle: -(wedge.start_angle + wedge.sweep),
        sweep_angle: wedge.sweep,
    }
}

/// A layout-space point as a canvas offset from the pie center.
fn to_screen(p: Point) -> Vec2 {
    Vec2::new(p.x, -p.y)
}

fn draw_centered<RC: RenderContext>(ctx: &mut RC, text_layout: &RC::TextLayout, at: Point) {
    let size = text_layout.size();
    let top_left = Point {
        x: at.x - size.width * 0.5,
        y: at.y - size.height * 0.5,
    };
    ctx.draw_text(text_layout, top_left);
}

trait ApplyStyle {
    fn apply_style(self, style: &TextStyle) -> Self;
}

impl<T: TextLayoutBuilder> ApplyStyle for T {
    fn apply_style(self, style: &TextStyle) -> Self {
        let mut this =
            self.default_attribute(piet::TextAttribute::FontSize(px_to_pt(style.font_size)));
        if style.bold {
            this = this.default_attribute(piet::TextAttribute::Weight(piet::FontWeight::BOLD));
        }
        this.text_color(style.color)
    }
}

fn px_to_pt(px: f64) -> f64 {
    0.75 * px
}
