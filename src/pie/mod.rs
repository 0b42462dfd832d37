use kurbo::{Size, Vec2};
use once_cell::sync::Lazy;
use piet::{Color, RenderContext};
use std::{fmt, fs, io, path::Path};
use thiserror::Error;

pub mod layout;
mod render;

/// The default style used with [`Pie::render`].
pub static DEFAULT_STYLE: Lazy<PieStyle> = Lazy::new(PieStyle::default);

/// One wedge of the chart: a category label, its proportional weight, and
/// how far the wedge is pulled out of the circle.
#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    pub label: String,
    /// Proportional weight. The values of a chart need not sum to 100.
    pub value: f64,
    /// Radial displacement as a fraction of the radius. `0.` keeps the
    /// wedge flush with the circle.
    pub explode: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Pie {
    pub title: Option<String>,
    pub slices: Vec<Slice>,
    /// Angle of the first wedge's leading edge, in degrees counter-clockwise
    /// from the positive x axis. Wedges proceed counter-clockwise from here
    /// in input order.
    pub start_angle: f64,
}

impl Pie {
    /// Build a chart from pre-assembled slices.
    ///
    /// Rejects negative values, negative explode offsets, and charts whose
    /// values sum to zero (the wedge angles would be undefined).
    pub fn new(slices: Vec<Slice>) -> Result<Self, InvalidInput> {
        for slice in &slices {
            if slice.value < 0. {
                return Err(InvalidInput::NegativeValue {
                    label: slice.label.clone(),
                    value: slice.value,
                });
            }
            if slice.explode < 0. {
                return Err(InvalidInput::NegativeExplode {
                    label: slice.label.clone(),
                    explode: slice.explode,
                });
            }
        }
        if slices.iter().map(|s| s.value).sum::<f64>() <= 0. {
            return Err(InvalidInput::ZeroTotal);
        }
        Ok(Pie {
            title: None,
            slices,
            start_angle: 0.,
        })
    }

    /// Build a chart from parallel label/value/explode sequences.
    ///
    /// All three sequences must have the same length.
    pub fn from_parts<L, S>(
        labels: L,
        values: impl IntoIterator<Item = f64>,
        explodes: impl IntoIterator<Item = f64>,
    ) -> Result<Self, InvalidInput>
    where
        L: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        let values: Vec<f64> = values.into_iter().collect();
        let explodes: Vec<f64> = explodes.into_iter().collect();
        if labels.len() != values.len() || values.len() != explodes.len() {
            return Err(InvalidInput::LengthMismatch {
                labels: labels.len(),
                values: values.len(),
                explodes: explodes.len(),
            });
        }
        let slices = labels
            .into_iter()
            .zip(values)
            .zip(explodes)
            .map(|((label, value), explode)| Slice {
                label,
                value,
                explode,
            })
            .collect();
        Self::new(slices)
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_start_angle(mut self, degrees: f64) -> Self {
        self.start_angle = degrees;
        self
    }

    pub fn render<RC: RenderContext>(&self, ctx: &mut RC) -> Result<(), piet::Error> {
        self.render_with_style(&DEFAULT_STYLE, ctx)
    }

    pub fn render_with_style<RC: RenderContext>(
        &self,
        style: &PieStyle,
        ctx: &mut RC,
    ) -> Result<(), piet::Error> {
        render::render(self, style, ctx)
    }

    pub fn to_svg(&self, writer: impl io::Write, style: Option<&PieStyle>) -> Result<(), Error> {
        let size = Size::new(render::CANVAS_SIZE, render::CANVAS_SIZE);
        let mut rc = piet_svg::RenderContext::new(size);
        self.render_with_style(style.unwrap_or(&DEFAULT_STYLE), &mut rc)?;
        rc.write(writer)?;
        Ok(())
    }

    pub fn to_svg_file(
        &self,
        filename: impl AsRef<Path>,
        style: Option<&PieStyle>,
    ) -> Result<(), Error> {
        let file = io::BufWriter::new(fs::File::create(filename)?);
        self.to_svg(file, style)
    }

    pub fn to_png_file(
        &self,
        filename: impl AsRef<Path>,
        px_scale: f64,
        style: Option<&PieStyle>,
    ) -> Result<(), Error> {
        let mut device = piet_common::Device::new()?;
        let size = (render::CANVAS_SIZE * px_scale) as usize;
        let mut bitmap = device.bitmap_target(size, size, px_scale)?;
        let mut rc = bitmap.render_context();
        let rendered = self.render_with_style(style.unwrap_or(&DEFAULT_STYLE), &mut rc);
        let finished = rc.finish();
        drop(rc);
        rendered?;
        finished?;
        bitmap.save_to_file(filename)?;
        Ok(())
    }
}

/// The ways chart data can be rejected before rendering is attempted.
#[derive(Debug, Error, PartialEq)]
pub enum InvalidInput {
    #[error("got {labels} labels, {values} values and {explodes} explode offsets; counts must match")]
    LengthMismatch {
        labels: usize,
        values: usize,
        explodes: usize,
    },
    #[error("slice {label:?} has negative value {value}")]
    NegativeValue { label: String, value: f64 },
    #[error("slice {label:?} has negative explode offset {explode}")]
    NegativeExplode { label: String, explode: f64 },
    #[error("slice values sum to zero, so wedge angles are undefined")]
    ZeroTotal,
}

/// Anything that can go wrong while building or emitting a chart.
///
/// `piet`'s error type is not `Send`, so backend failures are captured by
/// message.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid chart data: {0}")]
    InvalidInput(#[from] InvalidInput),
    #[error("rendering failed: {0}")]
    Render(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl From<piet::Error> for Error {
    fn from(e: piet::Error) -> Self {
        Error::Render(e.to_string())
    }
}

#[derive(Clone)]
pub struct PieStyle {
    pub background_color: Color,
    pub title: TextStyle,
    pub wedge_outline_color: Color,
    pub wedge_outline_thickness: f64,
    pub wedge_colors: Box<dyn ColorPalette + Send + Sync>,
    /// If `None`, percentage labels are not drawn.
    pub percent_label: Option<TextStyle>,
    /// Style of the category label drawn outside each wedge.
    pub wedge_label: TextStyle,
    /// If `None`, the chart casts no shadow.
    pub shadow: Option<ShadowStyle>,
}

impl fmt::Debug for PieStyle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("PieStyle")
            .field("background_color", &self.background_color)
            .field("title", &self.title)
            .field("wedge_outline_color", &self.wedge_outline_color)
            .field("wedge_outline_thickness", &self.wedge_outline_thickness)
            .field("wedge_colors", &"dyn ColorPalette")
            .field("percent_label", &self.percent_label)
            .field("wedge_label", &self.wedge_label)
            .field("shadow", &self.shadow)
            .finish()
    }
}

impl PieStyle {
    pub fn default() -> Self {
        Self {
            background_color: Color::WHITE,
            title: TextStyle::default().with_bold(true),
            wedge_outline_color: Color::BLACK,
            wedge_outline_thickness: 1.5,
            wedge_colors: Box::new(DefaultPalette),
            percent_label: Some(
                TextStyle::default()
                    .with_font_size(12.)
                    .with_color(Color::WHITE),
            ),
            wedge_label: TextStyle::default(),
            shadow: Some(ShadowStyle::default()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TextStyle {
    pub color: Color,
    pub font_size: f64,
    pub bold: bool,
}

impl TextStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            font_size: 16.,
            bold: false,
        }
    }

    fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }

    fn with_bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }
}

/// Drop shadow drawn beneath the pie: every wedge re-filled at `offset`,
/// in canvas pixels, before the wedges themselves are drawn.
#[derive(Debug, Clone)]
pub struct ShadowStyle {
    pub offset: Vec2,
    pub color: Color,
}

impl ShadowStyle {
    pub fn default() -> Self {
        Self {
            // down and to the left by 2% of the default radius
            offset: Vec2::new(-2., 2.),
            color: Color::rgba8(0, 0, 0, 0x60),
        }
    }
}

pub trait ColorPalette: dyn_clone::DynClone {
    /// This function is expected to give the same answer for the same input
    /// (i.e. be a pure fn).
    fn color(&self, index: usize) -> Color;
}

dyn_clone::clone_trait_object!(ColorPalette);

/// Evenly spread hues at fixed luminance and chroma.
#[derive(Copy, Clone)]
pub struct DefaultPalette;
impl ColorPalette for DefaultPalette {
    fn color(&self, index: usize) -> Color {
        let hue = (index as f64 * 140.).rem_euclid(360.);
        Color::hlc(hue, 40., 40.)
    }
}

/// Cycles through an explicit list of colors. The list must not be empty.
#[derive(Clone)]
pub struct FixedPalette(pub Vec<Color>);
impl ColorPalette for FixedPalette {
    fn color(&self, index: usize) -> Color {
        self.0[index % self.0.len()]
    }
}
