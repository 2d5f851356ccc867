use survey_charts::api::{
    BarChartOptions, BubbleChartOptions, render_bar_chart, render_bubble_chart,
};
use survey_charts::data::{parse_survey_json, shape_records};
use survey_charts::render::SvgRenderer;

const SURVEY_JSON: &str = r#"{"improved_wellbeing": 47, "no_benefit": 8}"#;

#[test]
fn survey_json_flows_into_bubble_and_bar_charts() {
    let data = parse_survey_json(SURVEY_JSON).expect("parse");
    let records = shape_records(&data);
    assert_eq!(records.len(), 2);

    let mut bubble_renderer = SvgRenderer::new().with_element_id("bubble-chart-svg");
    let bubble = render_bubble_chart(&mut bubble_renderer, &records, &BubbleChartOptions::default())
        .expect("bubble render");
    assert_eq!(bubble.circles.len(), 2);
    let titles: Vec<&str> = bubble
        .hover_regions
        .iter()
        .map(|region| region.tooltip.title.as_str())
        .collect();
    assert_eq!(titles, vec!["improved wellbeing", "no benefit"]);
    assert_eq!(bubble.texts_containing("47%").count(), 1);
    assert_eq!(bubble.texts_containing("8%").count(), 1);
    assert_eq!(bubble.texts_containing("no benefit").count(), 1);

    let mut bar_renderer = SvgRenderer::new().with_element_id("bar-chart-svg");
    let bar = render_bar_chart(&mut bar_renderer, &records, &BarChartOptions::default())
        .expect("bar render");
    assert_eq!(bar.rects.len(), 2);
    for label in ["improved wellbeing", "no benefit", "47%", "8%"] {
        assert_eq!(bar.texts.iter().filter(|t| t.text == label).count(), 1);
    }

    assert_eq!(bubble_renderer.last_stats().circles_drawn, 2);
    assert_eq!(bar_renderer.last_stats().rects_drawn, 2);
    assert!(bubble_renderer.document().contains("data-tooltip-title=\"improved wellbeing\""));
    assert!(bar_renderer.document().contains(">no benefit</text>"));
}
