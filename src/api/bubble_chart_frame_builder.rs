use tracing::debug;

use crate::core::{CategoryRecord, Hierarchy, HierarchyNode, PackLayout};
use crate::error::{ChartError, ChartResult};
use crate::render::{
    CirclePrimitive, Color, HoverRegion, HoverShape, RenderFrame, Renderer, TextHAlign,
    TextPrimitive, TooltipContent,
};

use super::chart_options::BubbleChartOptions;
use super::label_text_formatter::{format_percent, wrap_category_label};

const LABEL_FIRST_LINE_EM: f64 = -0.5;
const LABEL_LINE_SPACING_EM: f64 = 1.2;
const VALUE_LABEL_EM: f64 = 2.5;

/// Builds the packed bubble chart: one circle, one wrapped category label,
/// one percentage label and one hover region per record, in record order.
///
/// An empty record list, or records summing to zero, yields an empty frame.
pub fn build_bubble_chart_frame(
    records: &[CategoryRecord],
    options: &BubbleChartOptions,
) -> ChartResult<RenderFrame> {
    options.validate()?;
    let mut frame = RenderFrame::new(options.canvas);
    if records.is_empty() {
        debug!("bubble chart has no records");
        return Ok(frame);
    }

    let (width, height) = options.inner_size()?;
    let root = HierarchyNode::branch(
        "",
        records
            .iter()
            .map(|record| HierarchyNode::leaf(record.category.clone(), record.value))
            .collect(),
    );
    let hierarchy = Hierarchy::from_node(&root)?;
    if hierarchy.entry(hierarchy.root()).value <= 0.0 {
        debug!(records = records.len(), "bubble chart total is zero");
        return Ok(frame);
    }
    let circles = PackLayout::new(width, height)
        .with_padding(options.padding)
        .layout(&hierarchy)?;

    let leaves = hierarchy.leaves();
    if leaves.len() != records.len() {
        return Err(ChartError::InvalidData(format!(
            "bubble hierarchy produced {} leaves for {} records",
            leaves.len(),
            records.len()
        )));
    }

    let font_size = options.label_font_size_px;
    for (index, (&leaf, record)) in leaves.iter().zip(records).enumerate() {
        let packed = circles[leaf];
        let cx = packed.x + options.margins.left;
        let cy = packed.y + options.margins.top;
        let circle = CirclePrimitive::new(
            cx,
            cy,
            packed.r * options.radius_scale,
            options.palette.cyclic(index),
        )
        .with_border(options.border_width, Color::BLACK);
        frame.circles.push(circle);

        let first_baseline = cy + LABEL_FIRST_LINE_EM * font_size;
        let lines = wrap_category_label(&record.category, options.label_rules);
        for (line_index, line) in lines.iter().enumerate() {
            if line.is_empty() {
                continue;
            }
            let y = first_baseline + line_index as f64 * LABEL_LINE_SPACING_EM * font_size;
            frame.texts.push(
                TextPrimitive::new(
                    line.as_str(),
                    cx,
                    y,
                    font_size,
                    Color::BLACK,
                    TextHAlign::Center,
                )
                .bold(),
            );
        }

        let value_label = format_percent(record.value);
        frame.texts.push(
            TextPrimitive::new(
                value_label.as_str(),
                cx,
                cy + VALUE_LABEL_EM * font_size,
                font_size,
                Color::BLACK,
                TextHAlign::Center,
            )
            .bold(),
        );

        frame.hover_regions.push(HoverRegion::new(
            HoverShape::Circle(circle),
            TooltipContent::new(record.category.as_str(), value_label),
        ));
    }

    debug!(
        bubbles = frame.circles.len(),
        texts = frame.texts.len(),
        "bubble chart frame built"
    );
    Ok(frame)
}

/// Builds the bubble chart and hands it to `renderer`, which replaces any
/// previous output.
pub fn render_bubble_chart<R: Renderer>(
    renderer: &mut R,
    records: &[CategoryRecord],
    options: &BubbleChartOptions,
) -> ChartResult<RenderFrame> {
    let frame = build_bubble_chart_frame(records, options)?;
    renderer.render(&frame)?;
    Ok(frame)
}
