use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use survey_charts::api::{BubbleChartOptions, build_bubble_chart_frame};
use survey_charts::core::{CategoryRecord, Hierarchy, HierarchyNode, PackLayout, TreemapLayout};
use survey_charts::{DashboardConfig, SurveyDashboard};

fn generated_leaves(count: usize) -> HierarchyNode {
    let leaves = (0..count)
        .map(|i| HierarchyNode::leaf(format!("leaf {i}"), 1.0 + (i * 37 % 97) as f64))
        .collect();
    HierarchyNode::branch("root", leaves)
}

fn bench_pack_layout_500(c: &mut Criterion) {
    let hierarchy = Hierarchy::from_node(&generated_leaves(500)).expect("valid hierarchy");
    let layout = PackLayout::new(1160.0, 570.0).with_padding(25.0);

    c.bench_function("pack_layout_500", |b| {
        b.iter(|| {
            let _ = layout
                .layout(black_box(&hierarchy))
                .expect("pack should succeed");
        })
    });
}

fn bench_treemap_layout_500(c: &mut Criterion) {
    let mut hierarchy = Hierarchy::from_node(&generated_leaves(500)).expect("valid hierarchy");
    hierarchy.sort_by_value_desc();
    let layout = TreemapLayout::new(1160.0, 640.0).with_padding(4.0);

    c.bench_function("treemap_layout_500", |b| {
        b.iter(|| {
            let _ = layout
                .layout(black_box(&hierarchy))
                .expect("treemap should succeed");
        })
    });
}

fn bench_bubble_frame_survey(c: &mut Criterion) {
    let records: Vec<CategoryRecord> = (0..12)
        .map(|i| CategoryRecord::new(format!("survey answer number {i}"), 5.0 + i as f64 * 3.5))
        .collect();
    let options = BubbleChartOptions::default();

    c.bench_function("bubble_frame_12_categories", |b| {
        b.iter(|| {
            let _ = build_bubble_chart_frame(black_box(&records), black_box(&options))
                .expect("frame should build");
        })
    });
}

fn bench_dashboard_render(c: &mut Criterion) {
    let dashboard = SurveyDashboard::new(DashboardConfig::default()).expect("dashboard");
    let records = vec![
        CategoryRecord::new("improved wellbeing", 47.0),
        CategoryRecord::new("no benefit", 8.0),
    ];

    c.bench_function("dashboard_render_records", |b| {
        b.iter(|| {
            let report = dashboard
                .render_records(black_box(&records))
                .expect("render should succeed");
            let _ = report.page.to_html();
        })
    });
}

criterion_group!(
    benches,
    bench_pack_layout_500,
    bench_treemap_layout_500,
    bench_bubble_frame_survey,
    bench_dashboard_render
);
criterion_main!(benches);
