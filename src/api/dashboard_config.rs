use serde::{Deserialize, Serialize};

use crate::data::DataSource;
use crate::error::{ChartError, ChartResult};
use crate::render::Palette;

use super::{BarChartOptions, BubbleChartOptions, TreemapOptions};

/// Element ids every chart and the tooltip are mounted under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerIds {
    pub bubble: String,
    pub bar: String,
    pub treemap_advantages: String,
    pub treemap_disadvantages: String,
    pub tooltip: String,
}

impl Default for ContainerIds {
    fn default() -> Self {
        Self {
            bubble: "bubble-chart".to_owned(),
            bar: "bar-chart".to_owned(),
            treemap_advantages: "treemap-advantages".to_owned(),
            treemap_disadvantages: "treemap-disadvantages".to_owned(),
            tooltip: "tooltip".to_owned(),
        }
    }
}

impl ContainerIds {
    fn all(&self) -> [&str; 5] {
        [
            &self.bubble,
            &self.bar,
            &self.treemap_advantages,
            &self.treemap_disadvantages,
            &self.tooltip,
        ]
    }

    pub fn validate(&self) -> ChartResult<()> {
        let ids = self.all();
        for (index, id) in ids.iter().enumerate() {
            if id.trim().is_empty() {
                return Err(ChartError::InvalidData(
                    "container ids must not be empty".to_owned(),
                ));
            }
            if ids[..index].contains(id) {
                return Err(ChartError::InvalidData(format!(
                    "container id `{id}` is used twice"
                )));
            }
        }
        Ok(())
    }
}

/// Dashboard bootstrap configuration.
///
/// Serializable so the page setup can live in a JSON file; omitted fields
/// fall back to the stock survey layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub data_source: DataSource,
    #[serde(default = "default_page_title")]
    pub page_title: String,
    #[serde(default)]
    pub containers: ContainerIds,
    #[serde(default)]
    pub bubble: BubbleChartOptions,
    #[serde(default)]
    pub bar: BarChartOptions,
    #[serde(default = "default_treemap_advantages")]
    pub treemap_advantages: TreemapOptions,
    #[serde(default = "default_treemap_disadvantages")]
    pub treemap_disadvantages: TreemapOptions,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_source: DataSource::default(),
            page_title: default_page_title(),
            containers: ContainerIds::default(),
            bubble: BubbleChartOptions::default(),
            bar: BarChartOptions::default(),
            treemap_advantages: default_treemap_advantages(),
            treemap_disadvantages: default_treemap_disadvantages(),
        }
    }
}

impl DashboardConfig {
    #[must_use]
    pub fn with_data_source(mut self, data_source: DataSource) -> Self {
        self.data_source = data_source;
        self
    }

    #[must_use]
    pub fn with_containers(mut self, containers: ContainerIds) -> Self {
        self.containers = containers;
        self
    }

    #[must_use]
    pub fn with_bar_options(mut self, bar: BarChartOptions) -> Self {
        self.bar = bar;
        self
    }

    #[must_use]
    pub fn with_bubble_options(mut self, bubble: BubbleChartOptions) -> Self {
        self.bubble = bubble;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        self.containers.validate()?;
        self.bubble.validate()?;
        self.bar.validate()?;
        self.treemap_advantages.validate()?;
        self.treemap_disadvantages.validate()
    }

    /// Serializes config to pretty JSON.
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize config: {e}")))
    }

    /// Deserializes config from JSON.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse config: {e}")))
    }
}

fn default_page_title() -> String {
    "Survey Charts".to_owned()
}

fn default_treemap_advantages() -> TreemapOptions {
    TreemapOptions::default().with_palette(Palette::Category10)
}

fn default_treemap_disadvantages() -> TreemapOptions {
    TreemapOptions::default().with_palette(Palette::Accent)
}
