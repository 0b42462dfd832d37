//! Exploded pie charts, rendered through [`piet`].
//!
//! A chart is an ordered list of slices (label, proportional value, explode
//! offset). The pure wedge geometry lives in [`layout`] and is computed
//! without touching a rendering backend; [`Pie::render`] draws it through
//! any [`piet::RenderContext`], and there are helpers for SVG and PNG
//! output.

mod pie;

pub use pie::*;
