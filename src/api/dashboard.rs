use std::path::Path;

use indexmap::IndexMap;
use tracing::{debug, error, info};

use crate::core::CategoryRecord;
use crate::data::{load_survey_data, remote_work, shape_records};
use crate::error::{ChartError, ChartResult};
use crate::render::{HtmlPage, RenderFrame, SvgRenderer};

use super::{
    DashboardConfig, render_bar_chart, render_bubble_chart, render_treemap,
};

/// Outcome of one dashboard run.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardReport {
    pub page: HtmlPage,
    /// Frames drawn this run, keyed by container id.
    pub frames: IndexMap<String, RenderFrame>,
    /// Set when the survey data could not be acquired; no chart is drawn then.
    pub data_error: Option<String>,
}

impl DashboardReport {
    #[must_use]
    pub fn frame(&self, container_id: &str) -> Option<&RenderFrame> {
        self.frames.get(container_id)
    }

    #[must_use]
    pub fn rendered_chart_count(&self) -> usize {
        self.frames.len()
    }

    pub fn write_html(&self, path: impl AsRef<Path>) -> ChartResult<()> {
        self.page.write_to(path)
    }
}

/// Loads the survey once and draws every chart into its container.
#[derive(Debug, Clone, PartialEq)]
pub struct SurveyDashboard {
    config: DashboardConfig,
}

impl SurveyDashboard {
    pub fn new(config: DashboardConfig) -> ChartResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    #[must_use]
    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Runs load → shape → bubble and bar → both treemaps.
    ///
    /// A data-acquisition failure is logged and reported in
    /// [`DashboardReport::data_error`]; every container stays empty. Any
    /// other error is returned.
    pub fn run(&self) -> ChartResult<DashboardReport> {
        let source = &self.config.data_source;
        match load_survey_data(source) {
            Ok(data) => {
                let records = shape_records(&data);
                debug!(records = records.len(), "survey data shaped");
                self.render_records(&records)
            }
            Err(err @ ChartError::DataAcquisition { .. }) => {
                error!(source = %source, error = %err, "error loading or processing data");
                Ok(DashboardReport {
                    page: self.empty_page(),
                    frames: IndexMap::new(),
                    data_error: Some(err.to_string()),
                })
            }
            Err(err) => Err(err),
        }
    }

    /// Draws every chart from already shaped records.
    pub fn render_records(&self, records: &[CategoryRecord]) -> ChartResult<DashboardReport> {
        let config = &self.config;
        let ids = &config.containers;
        let mut report = DashboardReport {
            page: self.empty_page(),
            frames: IndexMap::new(),
            data_error: None,
        };

        let mut renderer = chart_renderer(&ids.bubble);
        let frame = render_bubble_chart(&mut renderer, records, &config.bubble)?;
        mount(&mut report, &ids.bubble, renderer, frame);

        let mut renderer = chart_renderer(&ids.bar);
        let frame = render_bar_chart(&mut renderer, records, &config.bar)?;
        mount(&mut report, &ids.bar, renderer, frame);

        let mut renderer = chart_renderer(&ids.treemap_advantages);
        let frame = render_treemap(
            &mut renderer,
            &remote_work::advantages(),
            &config.treemap_advantages,
        )?;
        mount(&mut report, &ids.treemap_advantages, renderer, frame);

        let mut renderer = chart_renderer(&ids.treemap_disadvantages);
        let frame = render_treemap(
            &mut renderer,
            &remote_work::disadvantages(),
            &config.treemap_disadvantages,
        )?;
        mount(&mut report, &ids.treemap_disadvantages, renderer, frame);

        info!(charts = report.frames.len(), "dashboard rendered");
        Ok(report)
    }

    fn empty_page(&self) -> HtmlPage {
        let ids = &self.config.containers;
        let mut page = HtmlPage::new(self.config.page_title.as_str(), ids.tooltip.as_str());
        for id in [
            &ids.bubble,
            &ids.bar,
            &ids.treemap_advantages,
            &ids.treemap_disadvantages,
        ] {
            page.mount(id.as_str(), String::new());
        }
        page
    }
}

fn chart_renderer(container_id: &str) -> SvgRenderer {
    SvgRenderer::new().with_element_id(format!("{container_id}-svg"))
}

fn mount(
    report: &mut DashboardReport,
    container_id: &str,
    renderer: SvgRenderer,
    frame: RenderFrame,
) {
    report.page.mount(container_id, renderer.into_document());
    report.frames.insert(container_id.to_owned(), frame);
}
