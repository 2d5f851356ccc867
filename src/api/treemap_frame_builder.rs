use tracing::{debug, trace};

use crate::core::{Hierarchy, HierarchyNode, TreemapLayout};
use crate::error::ChartResult;
use crate::render::{
    Color, HoverRegion, HoverShape, OrdinalColorScale, RectPrimitive, RenderFrame, Renderer,
    TextHAlign, TextPrimitive, TooltipContent,
};

use super::chart_options::TreemapOptions;
use super::label_text_formatter::{format_named_percent, format_percent};

const LABEL_DY_EM: f64 = 0.35;

/// Builds one treemap panel from a group node (for example
/// [`crate::data::remote_work::advantages`]).
///
/// Leaves are laid out after sorting every child list by descending value.
/// Leaf fills come from an ordinal palette keyed on the parent's name, so
/// siblings share a color.
pub fn build_treemap_frame(
    group: &HierarchyNode,
    options: &TreemapOptions,
) -> ChartResult<RenderFrame> {
    options.validate()?;
    let mut hierarchy = Hierarchy::from_node(group)?;
    hierarchy.sort_by_value_desc();

    let (width, height) = options.layout_size();
    let cells = TreemapLayout::new(width, height)
        .with_padding(options.padding)
        .layout(&hierarchy)?;

    let mut colors = OrdinalColorScale::new(options.palette);
    let mut frame = RenderFrame::new(options.canvas());
    let left = options.margins.left;
    let top = options.margins.top;
    let font_size = options.label_font_size_px;

    for id in hierarchy.leaves() {
        let entry = hierarchy.entry(id);
        let cell = cells[id];
        let color_key = hierarchy.parent_name(id).unwrap_or(entry.name.as_str());
        let rect = RectPrimitive::new(
            cell.x0 + left,
            cell.y0 + top,
            cell.width(),
            cell.height(),
            colors.color_for(color_key),
        )
        .with_border(options.border_width, Color::BLACK);
        frame.rects.push(rect);

        let value = entry.own_value.unwrap_or(entry.value);
        trace!(name = %entry.name, value, area = cell.area(), "treemap leaf placed");
        frame.texts.push(
            TextPrimitive::new(
                format_named_percent(&entry.name, value),
                rect.x + rect.width / 2.0,
                rect.y + rect.height / 2.0 + LABEL_DY_EM * font_size,
                font_size,
                Color::BLACK,
                TextHAlign::Center,
            )
            .bold(),
        );
        frame.hover_regions.push(HoverRegion::new(
            HoverShape::Rect(rect),
            TooltipContent::new(entry.name.as_str(), format_percent(value)),
        ));
    }

    debug!(
        group = %group.name,
        leaves = frame.rects.len(),
        "treemap frame built"
    );
    Ok(frame)
}

/// Builds one treemap panel and hands it to `renderer`, which replaces any
/// previous output.
pub fn render_treemap<R: Renderer>(
    renderer: &mut R,
    group: &HierarchyNode,
    options: &TreemapOptions,
) -> ChartResult<RenderFrame> {
    let frame = build_treemap_frame(group, options)?;
    renderer.render(&frame)?;
    Ok(frame)
}
