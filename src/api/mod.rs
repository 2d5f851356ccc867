mod bar_chart_frame_builder;
mod bubble_chart_frame_builder;
mod chart_options;
mod dashboard;
mod dashboard_config;
mod label_text_formatter;
mod treemap_frame_builder;

pub use bar_chart_frame_builder::{BarChartScales, build_bar_chart_frame, render_bar_chart};
pub use bubble_chart_frame_builder::{build_bubble_chart_frame, render_bubble_chart};
pub use chart_options::{
    BarChartOptions, BubbleChartOptions, LabelWrapRules, ROOT_FONT_SIZE_PX, TreemapOptions,
    ValueDomainPolicy,
};
pub use dashboard::{DashboardReport, SurveyDashboard};
pub use dashboard_config::{ContainerIds, DashboardConfig};
pub use label_text_formatter::{
    ELLIPSIS, LabelLines, format_named_percent, format_percent, format_value, truncate_category,
    wrap_category_label,
};
pub use treemap_frame_builder::{build_treemap_frame, render_treemap};
