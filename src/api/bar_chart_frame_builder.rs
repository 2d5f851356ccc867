use tracing::{debug, warn};

use crate::core::{BandScale, CategoryRecord, LinearScale};
use crate::error::{ChartError, ChartResult};
use crate::render::{
    Color, LinePrimitive, RectPrimitive, RenderFrame, Renderer, TextHAlign, TextPrimitive,
};

use super::chart_options::BarChartOptions;
use super::label_text_formatter::{format_percent, format_value};

const AXIS_STROKE_WIDTH: f64 = 1.0;
/// Baseline shift that visually centers a label on its anchor.
const BOTTOM_TICK_LABEL_DY_EM: f64 = 0.71;
const LEFT_TICK_LABEL_DY_EM: f64 = 0.32;
const TITLE_BOTTOM_OFFSET_PX: f64 = 20.0;

/// Resolved scales shared by every part of one bar chart frame.
#[derive(Debug, Clone, PartialEq)]
pub struct BarChartScales {
    pub band: BandScale,
    pub value: LinearScale,
    /// Pixel row bars grow up from.
    pub baseline_y: f64,
    pub plot_top: f64,
}

impl BarChartScales {
    pub fn resolve(records: &[CategoryRecord], options: &BarChartOptions) -> ChartResult<Self> {
        let (width, height) = options.inner_size()?;
        let margins = options.margins;
        let band = BandScale::new(
            records.iter().map(|record| record.category.as_str()),
            margins.left,
            width - margins.right,
        )?
        .with_padding(options.band_padding)?;

        let (domain_min, domain_max) = options
            .value_domain
            .resolve(records.iter().map(|record| record.value));
        let baseline_y = height - margins.bottom;
        let value = LinearScale::new(domain_min, domain_max)?
            .nice(options.tick_count)
            .with_range(baseline_y, margins.top)?;

        Ok(Self {
            band,
            value,
            baseline_y,
            plot_top: margins.top,
        })
    }
}

/// Builds the bar chart: bars, category and value axes, value labels and
/// axis titles.
///
/// Bars are measured from the baseline and the value scale is not clamped,
/// so values above the domain reach past `plot_top`. Values below the
/// domain minimum are rejected.
pub fn build_bar_chart_frame(
    records: &[CategoryRecord],
    options: &BarChartOptions,
) -> ChartResult<RenderFrame> {
    options.validate()?;
    let scales = BarChartScales::resolve(records, options)?;
    let mut frame = RenderFrame::new(options.canvas);

    push_bars(&mut frame, records, options, &scales)?;
    push_category_axis(&mut frame, options, &scales)?;
    push_value_axis(&mut frame, options, &scales)?;
    push_value_labels(&mut frame, records, options, &scales)?;
    push_axis_titles(&mut frame, options)?;

    debug!(
        bars = frame.rects.len(),
        texts = frame.texts.len(),
        lines = frame.lines.len(),
        "bar chart frame built"
    );
    Ok(frame)
}

/// Builds the bar chart and hands it to `renderer`, which replaces any
/// previous output.
pub fn render_bar_chart<R: Renderer>(
    renderer: &mut R,
    records: &[CategoryRecord],
    options: &BarChartOptions,
) -> ChartResult<RenderFrame> {
    let frame = build_bar_chart_frame(records, options)?;
    renderer.render(&frame)?;
    Ok(frame)
}

fn band_start(scales: &BarChartScales, category: &str) -> ChartResult<f64> {
    scales.band.position(category).ok_or_else(|| {
        ChartError::InvalidData(format!("category `{category}` missing from band scale"))
    })
}

fn push_bars(
    frame: &mut RenderFrame,
    records: &[CategoryRecord],
    options: &BarChartOptions,
    scales: &BarChartScales,
) -> ChartResult<()> {
    let (domain_min, _) = scales.value.domain();
    for (index, record) in records.iter().enumerate() {
        if record.value < domain_min {
            return Err(ChartError::InvalidData(format!(
                "bar value {} for `{}` is below the value axis minimum {domain_min}",
                record.value, record.category
            )));
        }
        let x = band_start(scales, &record.category)?;
        let top = scales.value.domain_to_pixel(record.value)?;
        if top < scales.plot_top {
            warn!(
                category = %record.category,
                value = record.value,
                "bar value exceeds the value axis domain"
            );
        }
        frame.rects.push(RectPrimitive::new(
            x,
            top,
            scales.band.bandwidth(),
            (scales.baseline_y - top).max(0.0),
            options.palette.cyclic(index),
        ));
    }
    Ok(())
}

fn push_category_axis(
    frame: &mut RenderFrame,
    options: &BarChartOptions,
    scales: &BarChartScales,
) -> ChartResult<()> {
    let baseline = scales.baseline_y;
    let margins = options.margins;
    let (width, _) = options.inner_size()?;
    frame.lines.push(LinePrimitive::new(
        margins.left,
        baseline,
        width - margins.right,
        baseline,
        AXIS_STROKE_WIDTH,
        Color::BLACK,
    ));

    // Labels hang below the tick, then rotate around the tick foot.
    let font_size = options.category_label_font_size_px;
    let label_distance = options.tick_size_px
        + options.tick_padding_px
        + BOTTOM_TICK_LABEL_DY_EM * font_size;
    let rotation = options.category_label_rotation_deg.to_radians();
    let (sin, cos) = rotation.sin_cos();

    for category in scales.band.domain() {
        let Some(center) = scales.band.center(category) else {
            continue;
        };
        frame.lines.push(LinePrimitive::new(
            center,
            baseline,
            center,
            baseline + options.tick_size_px,
            AXIS_STROKE_WIDTH,
            Color::BLACK,
        ));
        if category.is_empty() {
            continue;
        }
        frame.texts.push(
            TextPrimitive::new(
                category,
                center - label_distance * sin,
                baseline + label_distance * cos,
                font_size,
                Color::BLACK,
                TextHAlign::Right,
            )
            .rotated(options.category_label_rotation_deg),
        );
    }
    Ok(())
}

fn push_value_axis(
    frame: &mut RenderFrame,
    options: &BarChartOptions,
    scales: &BarChartScales,
) -> ChartResult<()> {
    let axis_x = options.margins.left;
    let (range_start, range_end) = scales.value.range();
    frame.lines.push(LinePrimitive::new(
        axis_x,
        range_start,
        axis_x,
        range_end,
        AXIS_STROKE_WIDTH,
        Color::BLACK,
    ));

    let font_size = options.value_axis_font_size_px;
    for tick in scales.value.ticks(options.tick_count) {
        let y = scales.value.domain_to_pixel(tick)?;
        frame.lines.push(LinePrimitive::new(
            axis_x - options.tick_size_px,
            y,
            axis_x,
            y,
            AXIS_STROKE_WIDTH,
            Color::BLACK,
        ));
        frame.texts.push(TextPrimitive::new(
            format_value(tick),
            axis_x - options.tick_size_px - options.tick_padding_px,
            y + LEFT_TICK_LABEL_DY_EM * font_size,
            font_size,
            Color::BLACK,
            TextHAlign::Right,
        ));
    }
    Ok(())
}

fn push_value_labels(
    frame: &mut RenderFrame,
    records: &[CategoryRecord],
    options: &BarChartOptions,
    scales: &BarChartScales,
) -> ChartResult<()> {
    let half_band = scales.band.bandwidth() / 2.0;
    for record in records {
        let x = band_start(scales, &record.category)? + half_band;
        let y = scales.value.domain_to_pixel(record.value)? - options.value_label_offset_px;
        frame.texts.push(
            TextPrimitive::new(
                format_percent(record.value),
                x,
                y,
                options.value_label_font_size_px,
                Color::BLACK,
                TextHAlign::Center,
            )
            .bold(),
        );
    }
    Ok(())
}

fn push_axis_titles(frame: &mut RenderFrame, options: &BarChartOptions) -> ChartResult<()> {
    let (width, height) = options.inner_size()?;
    let margins = options.margins;
    let font_size = options.title_font_size_px;

    if !options.category_axis_title.is_empty() {
        frame.texts.push(
            TextPrimitive::new(
                options.category_axis_title.as_str(),
                width / 2.0,
                height + margins.bottom - TITLE_BOTTOM_OFFSET_PX,
                font_size,
                Color::BLACK,
                TextHAlign::Center,
            )
            .bold(),
        );
    }
    if !options.value_axis_title.is_empty() {
        frame.texts.push(
            TextPrimitive::new(
                options.value_axis_title.as_str(),
                margins.left / 2.0,
                height / 2.0,
                font_size,
                Color::BLACK,
                TextHAlign::Center,
            )
            .bold()
            .rotated(-90.0),
        );
    }
    Ok(())
}
