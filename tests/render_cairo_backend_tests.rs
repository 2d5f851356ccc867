#![cfg(feature = "cairo-backend")]

use cairo::{Context, Format, ImageSurface};
use survey_charts::ChartError;
use survey_charts::api::{
    BarChartOptions, BubbleChartOptions, TreemapOptions, render_bar_chart, render_bubble_chart,
    render_treemap,
};
use survey_charts::core::CategoryRecord;
use survey_charts::data::remote_work;
use survey_charts::render::{CairoContextRenderer, CairoRenderer};

fn records() -> Vec<CategoryRecord> {
    vec![
        CategoryRecord::new("improved wellbeing", 47.0),
        CategoryRecord::new("no benefit", 8.0),
    ]
}

#[test]
fn cairo_renderer_rejects_invalid_surface_size() {
    let err = CairoRenderer::new(0, 480).expect_err("invalid width must fail");
    assert!(matches!(err, ChartError::InvalidData(_)));
}

#[test]
fn cairo_renderer_draws_bubble_chart() {
    let mut renderer = CairoRenderer::new(1200, 700).expect("renderer");
    let frame = render_bubble_chart(&mut renderer, &records(), &BubbleChartOptions::default())
        .expect("render");

    let stats = renderer.last_stats();
    assert_eq!(stats.circles_drawn, 2);
    assert_eq!(stats.texts_drawn, frame.texts.len());
}

#[test]
fn cairo_renderer_draws_bar_and_treemap_charts() {
    let mut renderer = CairoRenderer::new(1200, 700).expect("renderer");
    render_bar_chart(&mut renderer, &records(), &BarChartOptions::default()).expect("bar");
    let stats = renderer.last_stats();
    assert_eq!(stats.rects_drawn, 2);
    assert!(stats.lines_drawn >= 13);

    let mut renderer = CairoRenderer::new(1240, 700).expect("renderer");
    render_treemap(
        &mut renderer,
        &remote_work::disadvantages(),
        &TreemapOptions::default(),
    )
    .expect("treemap");
    assert_eq!(renderer.last_stats().rects_drawn, 9);
}

#[test]
fn cairo_renderer_can_draw_on_external_context() {
    let mut renderer = CairoRenderer::new(600, 320).expect("renderer");
    let frame = survey_charts::api::build_bubble_chart_frame(
        &records(),
        &BubbleChartOptions::default(),
    )
    .expect("frame");

    let surface = ImageSurface::create(Format::ARgb32, 1200, 700).expect("surface");
    let context = Context::new(&surface).expect("context");
    renderer
        .render_on_cairo_context(&context, &frame)
        .expect("render on context");

    assert_eq!(renderer.last_stats().circles_drawn, 2);
}

#[test]
fn cairo_renderer_writes_png() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("bubble.png");

    let mut renderer = CairoRenderer::new(1200, 700).expect("renderer");
    render_bubble_chart(&mut renderer, &records(), &BubbleChartOptions::default())
        .expect("render");
    renderer.write_png(&path).expect("write png");

    assert!(std::fs::metadata(&path).expect("png metadata").len() > 0);
}
