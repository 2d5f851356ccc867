mod frame;
mod html_page;
mod null_renderer;
mod palette;
mod primitives;
mod svg_renderer;

pub use frame::RenderFrame;
pub use html_page::{HtmlPage, TOOLTIP_POINTER_OFFSET_PX};
pub use null_renderer::NullRenderer;
pub use palette::{ACCENT, CATEGORY10, OrdinalColorScale, Palette};
pub use primitives::{
    CirclePrimitive, Color, FontWeight, HoverRegion, HoverShape, LinePrimitive, RectPrimitive,
    TextHAlign, TextPrimitive, TooltipContent,
};
pub use svg_renderer::{SvgRenderStats, SvgRenderer};
pub(crate) use svg_renderer::escape_xml;

use crate::error::ChartResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized, deterministic `RenderFrame` so
/// drawing code stays isolated from data loading and layout. A backend must
/// discard its previous output before drawing a new frame.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoContextRenderer, CairoRenderStats, CairoRenderer};
