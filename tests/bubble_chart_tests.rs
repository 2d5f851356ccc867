use approx::assert_relative_eq;
use survey_charts::ChartError;
use survey_charts::api::{BubbleChartOptions, build_bubble_chart_frame, render_bubble_chart};
use survey_charts::core::CategoryRecord;
use survey_charts::render::{
    CATEGORY10, FontWeight, HoverShape, NullRenderer, Renderer, SvgRenderer,
};

fn survey_records() -> Vec<CategoryRecord> {
    vec![
        CategoryRecord::new("improved wellbeing", 47.0),
        CategoryRecord::new("no benefit", 8.0),
        CategoryRecord::new("fewer distractions", 53.0),
    ]
}

#[test]
fn single_record_yields_one_labeled_circle() {
    let records = vec![CategoryRecord::new("X", 50.0)];
    let frame = build_bubble_chart_frame(&records, &BubbleChartOptions::default()).expect("frame");

    assert_eq!(frame.circles.len(), 1);
    assert!(frame.circles[0].radius > 0.0);
    assert_eq!(frame.texts_containing("X").count(), 1);
    assert_eq!(frame.texts_containing("50%").count(), 1);
}

#[test]
fn single_bubble_sits_at_center_of_drawing_area() {
    let records = vec![CategoryRecord::new("X", 50.0)];
    let options = BubbleChartOptions::default();
    let frame = build_bubble_chart_frame(&records, &options).expect("frame");

    let circle = frame.circles[0];
    assert_relative_eq!(circle.cx, 20.0 + 1160.0 / 2.0, epsilon = 1e-9);
    assert_relative_eq!(circle.cy, 100.0 + 570.0 / 2.0, epsilon = 1e-9);
    assert_eq!(circle.fill_color, CATEGORY10[0]);
    assert_eq!(circle.border_width, 1.0);
}

#[test]
fn empty_records_yield_empty_frame() {
    let frame = build_bubble_chart_frame(&[], &BubbleChartOptions::default()).expect("frame");
    assert!(frame.is_empty());
    assert!(frame.hover_regions.is_empty());
}

#[test]
fn zero_total_yields_empty_frame() {
    let records = vec![CategoryRecord::new("a", 0.0), CategoryRecord::new("b", 0.0)];
    let frame = build_bubble_chart_frame(&records, &BubbleChartOptions::default())
        .expect("zero total still builds");
    assert!(frame.is_empty());
    assert!(frame.hover_regions.is_empty());

    let mut renderer = NullRenderer::default();
    render_bubble_chart(&mut renderer, &records[..1], &BubbleChartOptions::default())
        .expect("single zero record renders");
    assert_eq!(renderer.last_circle_count, 0);
}

#[test]
fn negative_record_is_rejected() {
    let records = vec![CategoryRecord::new("a", -5.0), CategoryRecord::new("b", 10.0)];
    let err = build_bubble_chart_frame(&records, &BubbleChartOptions::default())
        .expect_err("negative value must fail");
    assert!(matches!(err, ChartError::InvalidData(_)));
}

#[test]
fn bubbles_follow_record_order_and_palette() {
    let records = survey_records();
    let frame = build_bubble_chart_frame(&records, &BubbleChartOptions::default()).expect("frame");

    assert_eq!(frame.circles.len(), records.len());
    for (index, circle) in frame.circles.iter().enumerate() {
        assert_eq!(circle.fill_color, CATEGORY10[index]);
    }
    // Radius grows with value.
    assert!(frame.circles[1].radius < frame.circles[0].radius);
    assert!(frame.circles[0].radius < frame.circles[2].radius);
}

#[test]
fn labels_wrap_truncate_and_stack_below_center() {
    let records = vec![CategoryRecord::new("improved wellbeing", 47.0)];
    let options = BubbleChartOptions::default();
    let frame = build_bubble_chart_frame(&records, &options).expect("frame");

    let circle = frame.circles[0];
    let font = options.label_font_size_px;
    let texts: Vec<&str> = frame.texts.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(texts, vec!["improved", "wellbeing...", "47%"]);

    assert_relative_eq!(frame.texts[0].y, circle.cy - 0.5 * font, epsilon = 1e-9);
    assert_relative_eq!(frame.texts[1].y, circle.cy + 0.7 * font, epsilon = 1e-9);
    assert_relative_eq!(frame.texts[2].y, circle.cy + 2.5 * font, epsilon = 1e-9);
    assert!(frame.texts.iter().all(|t| t.font_weight == FontWeight::Bold));
}

#[test]
fn every_bubble_has_a_tooltip_region() {
    let records = survey_records();
    let frame = build_bubble_chart_frame(&records, &BubbleChartOptions::default()).expect("frame");

    assert_eq!(frame.hover_regions.len(), records.len());
    for (region, record) in frame.hover_regions.iter().zip(&records) {
        assert_eq!(region.tooltip.title, record.category);
        assert_eq!(region.tooltip.detail, format!("{}%", record.value));
        assert!(matches!(region.shape, HoverShape::Circle(_)));
    }
}

#[test]
fn packed_bubbles_do_not_overlap_before_scaling() {
    let records = survey_records();
    let options = BubbleChartOptions::default();
    let frame = build_bubble_chart_frame(&records, &options).expect("frame");

    let circles = &frame.circles;
    for i in 0..circles.len() {
        for j in i + 1..circles.len() {
            let distance =
                (circles[i].cx - circles[j].cx).hypot(circles[i].cy - circles[j].cy);
            let packed_radii = (circles[i].radius + circles[j].radius) / options.radius_scale;
            assert!(distance + 1e-6 >= packed_radii);
        }
    }
}

#[test]
fn rerender_replaces_previous_output() {
    let records = survey_records();
    let options = BubbleChartOptions::default();
    let mut renderer = SvgRenderer::new();

    render_bubble_chart(&mut renderer, &records, &options).expect("first render");
    let first = renderer.document().to_owned();
    render_bubble_chart(&mut renderer, &records, &options).expect("second render");

    assert_eq!(renderer.document(), first);
    assert_eq!(renderer.last_stats().circles_drawn, records.len());
}

#[test]
fn null_renderer_counts_last_frame_only() {
    let records = survey_records();
    let mut renderer = NullRenderer::default();
    let frame =
        render_bubble_chart(&mut renderer, &records, &BubbleChartOptions::default()).expect("render");
    renderer.render(&frame).expect("render again");

    assert_eq!(renderer.render_calls, 2);
    assert_eq!(renderer.last_circle_count, 3);
    assert_eq!(renderer.last_text_count, frame.texts.len());
}

#[test]
fn invalid_options_are_rejected() {
    let options = BubbleChartOptions::default().with_padding(-1.0);
    let records = vec![CategoryRecord::new("X", 50.0)];
    assert!(build_bubble_chart_frame(&records, &options).is_err());
}
