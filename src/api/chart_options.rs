use serde::{Deserialize, Serialize};

use crate::core::types::{ensure_non_negative, ensure_positive};
use crate::core::{Margins, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::render::Palette;

/// Root font size the em-based offsets are measured against.
pub const ROOT_FONT_SIZE_PX: f64 = 16.0;

/// Word-wrap and truncation rules for bubble labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelWrapRules {
    /// Maximum characters per wrapped line.
    pub wrap_width: usize,
    /// Categories longer than this are truncated.
    pub truncate_threshold: usize,
    /// Characters kept before the ellipsis when truncating.
    pub truncate_length: usize,
}

impl Default for LabelWrapRules {
    fn default() -> Self {
        Self {
            wrap_width: 15,
            truncate_threshold: 15,
            truncate_length: 20,
        }
    }
}

/// Packed bubble chart setup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BubbleChartOptions {
    pub canvas: Viewport,
    pub margins: Margins,
    pub padding: f64,
    /// Drawn radius relative to the packed radius.
    pub radius_scale: f64,
    pub palette: Palette,
    pub border_width: f64,
    pub label_font_size_px: f64,
    pub label_rules: LabelWrapRules,
}

impl Default for BubbleChartOptions {
    fn default() -> Self {
        Self {
            canvas: Viewport::new(1200, 700),
            margins: Margins::new(100.0, 20.0, 30.0, 20.0),
            padding: 25.0,
            radius_scale: 1.15,
            palette: Palette::Category10,
            border_width: 1.0,
            label_font_size_px: 0.9 * ROOT_FONT_SIZE_PX,
            label_rules: LabelWrapRules::default(),
        }
    }
}

impl BubbleChartOptions {
    #[must_use]
    pub fn with_canvas(mut self, canvas: Viewport) -> Self {
        self.canvas = canvas;
        self
    }

    #[must_use]
    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    #[must_use]
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    #[must_use]
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Drawing area inside the margins.
    pub fn inner_size(&self) -> ChartResult<(f64, f64)> {
        inner_size(self.canvas, self.margins)
    }

    pub fn validate(&self) -> ChartResult<()> {
        self.canvas.validate()?;
        self.margins.validate()?;
        self.inner_size()?;
        ensure_non_negative(self.padding, "bubble padding")?;
        ensure_positive(self.radius_scale, "bubble radius scale")?;
        ensure_non_negative(self.border_width, "bubble border width")?;
        ensure_positive(self.label_font_size_px, "bubble label font size")?;
        if self.label_rules.wrap_width == 0 {
            return Err(ChartError::InvalidData(
                "label wrap width must be > 0".to_owned(),
            ));
        }
        Ok(())
    }
}

/// How the bar chart's value axis picks its domain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ValueDomainPolicy {
    /// Constant domain; values above `max` draw past the plot top.
    Fixed { min: f64, max: f64 },
    /// `[0, max(value) * headroom]`.
    FromData { headroom: f64 },
}

impl Default for ValueDomainPolicy {
    fn default() -> Self {
        Self::Fixed {
            min: 0.0,
            max: 50.0,
        }
    }
}

impl ValueDomainPolicy {
    /// Resolves the domain for `values`, widening empty or flat spans to
    /// one unit.
    #[must_use]
    pub fn resolve(self, values: impl Iterator<Item = f64>) -> (f64, f64) {
        let (min, max) = match self {
            Self::Fixed { min, max } => (min, max),
            Self::FromData { headroom } => {
                let data_max = values.fold(0.0_f64, f64::max);
                (0.0, data_max * headroom)
            }
        };
        if max > min { (min, max) } else { (min, min + 1.0) }
    }

    fn validate(self) -> ChartResult<()> {
        match self {
            Self::Fixed { min, max } => {
                if !min.is_finite() || !max.is_finite() || max <= min {
                    return Err(ChartError::InvalidData(
                        "fixed value domain must be finite with max > min".to_owned(),
                    ));
                }
                Ok(())
            }
            Self::FromData { headroom } => ensure_positive(headroom, "value domain headroom"),
        }
    }
}

/// Vertical bar chart setup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BarChartOptions {
    pub canvas: Viewport,
    pub margins: Margins,
    /// Inner and outer band padding as a fraction of the band step.
    pub band_padding: f64,
    pub value_domain: ValueDomainPolicy,
    pub palette: Palette,
    pub tick_count: usize,
    pub tick_size_px: f64,
    pub tick_padding_px: f64,
    pub category_label_font_size_px: f64,
    pub category_label_rotation_deg: f64,
    pub value_axis_font_size_px: f64,
    pub value_label_font_size_px: f64,
    /// Gap between a bar's top and its value label.
    pub value_label_offset_px: f64,
    pub title_font_size_px: f64,
    pub category_axis_title: String,
    pub value_axis_title: String,
}

impl Default for BarChartOptions {
    fn default() -> Self {
        Self {
            canvas: Viewport::new(1200, 700),
            margins: Margins::new(30.0, 20.0, 150.0, 80.0),
            band_padding: 0.1,
            value_domain: ValueDomainPolicy::default(),
            palette: Palette::Category10,
            tick_count: 10,
            tick_size_px: 6.0,
            tick_padding_px: 3.0,
            category_label_font_size_px: 10.0,
            category_label_rotation_deg: -45.0,
            value_axis_font_size_px: 0.8 * ROOT_FONT_SIZE_PX,
            value_label_font_size_px: 0.8 * ROOT_FONT_SIZE_PX,
            value_label_offset_px: 5.0,
            title_font_size_px: ROOT_FONT_SIZE_PX,
            category_axis_title: "Categories".to_owned(),
            value_axis_title: "Percentage of Responses".to_owned(),
        }
    }
}

impl BarChartOptions {
    #[must_use]
    pub fn with_canvas(mut self, canvas: Viewport) -> Self {
        self.canvas = canvas;
        self
    }

    #[must_use]
    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    #[must_use]
    pub fn with_value_domain(mut self, policy: ValueDomainPolicy) -> Self {
        self.value_domain = policy;
        self
    }

    #[must_use]
    pub fn with_band_padding(mut self, band_padding: f64) -> Self {
        self.band_padding = band_padding;
        self
    }

    pub fn inner_size(&self) -> ChartResult<(f64, f64)> {
        inner_size(self.canvas, self.margins)
    }

    pub fn validate(&self) -> ChartResult<()> {
        self.canvas.validate()?;
        self.margins.validate()?;
        let (width, height) = self.inner_size()?;
        if width - self.margins.right <= self.margins.left
            || height - self.margins.bottom <= self.margins.top
        {
            return Err(ChartError::InvalidData(
                "bar chart plot area collapses inside its margins".to_owned(),
            ));
        }
        if !self.band_padding.is_finite() || !(0.0..=1.0).contains(&self.band_padding) {
            return Err(ChartError::InvalidData(
                "band padding must be finite and in [0, 1]".to_owned(),
            ));
        }
        self.value_domain.validate()?;
        ensure_non_negative(self.tick_size_px, "tick size")?;
        ensure_non_negative(self.tick_padding_px, "tick padding")?;
        ensure_positive(self.category_label_font_size_px, "category label font size")?;
        ensure_positive(self.value_axis_font_size_px, "value axis font size")?;
        ensure_positive(self.value_label_font_size_px, "value label font size")?;
        ensure_positive(self.title_font_size_px, "title font size")
    }
}

/// One treemap panel; two panels share the `total_width`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreemapOptions {
    /// Width shared by both treemap panels.
    pub total_width: f64,
    pub height: f64,
    pub margins: Margins,
    pub padding: f64,
    pub palette: Palette,
    pub border_width: f64,
    pub label_font_size_px: f64,
}

impl Default for TreemapOptions {
    fn default() -> Self {
        Self {
            total_width: 2400.0,
            height: 700.0,
            margins: Margins::new(30.0, 20.0, 30.0, 60.0),
            padding: 4.0,
            palette: Palette::Category10,
            border_width: 1.0,
            label_font_size_px: 0.65 * ROOT_FONT_SIZE_PX,
        }
    }
}

impl TreemapOptions {
    #[must_use]
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    #[must_use]
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    /// Partition area of one panel: half of the width left after margins.
    #[must_use]
    pub fn layout_size(&self) -> (f64, f64) {
        (
            (self.total_width - self.margins.horizontal()) / 2.0,
            self.height - self.margins.vertical(),
        )
    }

    /// Panel canvas including margins.
    #[must_use]
    pub fn canvas(&self) -> Viewport {
        let (width, _) = self.layout_size();
        Viewport::new(
            (width + self.margins.horizontal()).round().max(0.0) as u32,
            self.height.round().max(0.0) as u32,
        )
    }

    pub fn validate(&self) -> ChartResult<()> {
        ensure_positive(self.total_width, "treemap total width")?;
        ensure_positive(self.height, "treemap height")?;
        self.margins.validate()?;
        let (width, height) = self.layout_size();
        ensure_positive(width, "treemap layout width")?;
        ensure_positive(height, "treemap layout height")?;
        ensure_non_negative(self.padding, "treemap padding")?;
        ensure_non_negative(self.border_width, "treemap border width")?;
        ensure_positive(self.label_font_size_px, "treemap label font size")
    }
}

fn inner_size(canvas: Viewport, margins: Margins) -> ChartResult<(f64, f64)> {
    let width = f64::from(canvas.width) - margins.horizontal();
    let height = f64::from(canvas.height) - margins.vertical();
    if width <= 0.0 || height <= 0.0 {
        return Err(ChartError::InvalidData(format!(
            "margins leave no drawing area on a {}x{} canvas",
            canvas.width, canvas.height
        )));
    }
    Ok((width, height))
}
