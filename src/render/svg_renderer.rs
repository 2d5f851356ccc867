use tracing::trace;

use crate::error::ChartResult;
use crate::render::{
    CirclePrimitive, Color, FontWeight, HoverRegion, HoverShape, RectPrimitive, RenderFrame,
    Renderer, TextHAlign,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SvgRenderStats {
    pub lines_drawn: usize,
    pub rects_drawn: usize,
    pub circles_drawn: usize,
    pub texts_drawn: usize,
    pub hover_regions_drawn: usize,
}

/// Serializes frames into standalone SVG documents.
///
/// Every `render` call replaces the previous document, so repeated renders
/// never accumulate stale elements.
#[derive(Debug, Default)]
pub struct SvgRenderer {
    element_id: Option<String>,
    document: String,
    last_stats: SvgRenderStats,
}

impl SvgRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the `id` attribute written on the root `<svg>` element.
    #[must_use]
    pub fn with_element_id(mut self, element_id: impl Into<String>) -> Self {
        self.element_id = Some(element_id.into());
        self
    }

    #[must_use]
    pub fn element_id(&self) -> Option<&str> {
        self.element_id.as_deref()
    }

    #[must_use]
    pub fn document(&self) -> &str {
        &self.document
    }

    #[must_use]
    pub fn into_document(self) -> String {
        self.document
    }

    #[must_use]
    pub fn last_stats(&self) -> SvgRenderStats {
        self.last_stats
    }

    pub fn clear(&mut self) {
        self.document.clear();
        self.last_stats = SvgRenderStats::default();
    }
}

impl Renderer for SvgRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.clear();

        let mut stats = SvgRenderStats::default();
        let out = &mut self.document;
        let id_attr = self
            .element_id
            .as_deref()
            .map(|id| format!(" id=\"{}\"", escape_xml(id)))
            .unwrap_or_default();
        out.push_str(&format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\"{id_attr} width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n",
            w = frame.viewport.width,
            h = frame.viewport.height,
        ));

        for rect in &frame.rects {
            out.push_str(&rect_element(*rect, ""));
            out.push('\n');
            stats.rects_drawn += 1;
        }

        for circle in &frame.circles {
            out.push_str(&circle_element(*circle, ""));
            out.push('\n');
            stats.circles_drawn += 1;
        }

        for line in &frame.lines {
            out.push_str(&format!(
                "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"{}\" stroke-width=\"{}\"{}/>\n",
                fmt_px(line.x1),
                fmt_px(line.y1),
                fmt_px(line.x2),
                fmt_px(line.y2),
                line.color.to_hex(),
                fmt_px(line.stroke_width),
                opacity_attr("stroke-opacity", line.color),
            ));
            stats.lines_drawn += 1;
        }

        for text in &frame.texts {
            let anchor = match text.h_align {
                TextHAlign::Left => "start",
                TextHAlign::Center => "middle",
                TextHAlign::Right => "end",
            };
            let weight = match text.font_weight {
                FontWeight::Normal => "",
                FontWeight::Bold => " font-weight=\"bold\"",
            };
            let transform = if text.rotation_deg == 0.0 {
                String::new()
            } else {
                format!(
                    " transform=\"rotate({} {} {})\"",
                    fmt_px(text.rotation_deg),
                    fmt_px(text.x),
                    fmt_px(text.y)
                )
            };
            out.push_str(&format!(
                "<text x=\"{}\" y=\"{}\" font-size=\"{}\"{weight} fill=\"{}\" text-anchor=\"{anchor}\"{transform}>{}</text>\n",
                fmt_px(text.x),
                fmt_px(text.y),
                fmt_px(text.font_size_px),
                text.color.to_hex(),
                escape_xml(&text.text),
            ));
            stats.texts_drawn += 1;
        }

        for region in &frame.hover_regions {
            out.push_str(&hover_region_element(region));
            out.push('\n');
            stats.hover_regions_drawn += 1;
        }

        out.push_str("</svg>\n");
        trace!(
            rects = stats.rects_drawn,
            circles = stats.circles_drawn,
            texts = stats.texts_drawn,
            "svg frame rendered"
        );
        self.last_stats = stats;
        Ok(())
    }
}

fn rect_element(rect: RectPrimitive, extra_attrs: &str) -> String {
    format!(
        "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\"{}{}{extra_attrs}/>",
        fmt_px(rect.x),
        fmt_px(rect.y),
        fmt_px(rect.width),
        fmt_px(rect.height),
        rect.fill_color.to_hex(),
        opacity_attr("fill-opacity", rect.fill_color),
        border_attrs(rect.border_width, rect.border_color),
    )
}

fn circle_element(circle: CirclePrimitive, extra_attrs: &str) -> String {
    format!(
        "<circle cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"{}\"{}{}{extra_attrs}/>",
        fmt_px(circle.cx),
        fmt_px(circle.cy),
        fmt_px(circle.radius),
        circle.fill_color.to_hex(),
        opacity_attr("fill-opacity", circle.fill_color),
        border_attrs(circle.border_width, circle.border_color),
    )
}

/// Invisible pointer target carrying the tooltip as a `<title>` and as
/// data attributes for host-page scripts.
fn hover_region_element(region: &HoverRegion) -> String {
    const HIT_ATTRS: &str = " fill-opacity=\"0\" pointer-events=\"all\"";
    let shape = match region.shape {
        HoverShape::Circle(circle) => circle_element(
            CirclePrimitive::new(circle.cx, circle.cy, circle.radius, Color::BLACK),
            HIT_ATTRS,
        ),
        HoverShape::Rect(rect) => rect_element(
            RectPrimitive::new(rect.x, rect.y, rect.width, rect.height, Color::BLACK),
            HIT_ATTRS,
        ),
    };
    format!(
        "<g class=\"hover-region\" data-tooltip-title=\"{}\" data-tooltip-detail=\"{}\">{shape}<title>{}</title></g>",
        escape_xml(&region.tooltip.title),
        escape_xml(&region.tooltip.detail),
        escape_xml(&region.tooltip.summary()),
    )
}

fn border_attrs(width: f64, color: Color) -> String {
    if width > 0.0 {
        format!(
            " stroke=\"{}\" stroke-width=\"{}\"",
            color.to_hex(),
            fmt_px(width)
        )
    } else {
        String::new()
    }
}

fn opacity_attr(name: &str, color: Color) -> String {
    if color.alpha < 1.0 {
        format!(" {name}=\"{}\"", fmt_px(color.alpha))
    } else {
        String::new()
    }
}

/// Formats a coordinate with at most three decimals and no trailing zeros.
pub(crate) fn fmt_px(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{rounded}")
}

pub(crate) fn escape_xml(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
