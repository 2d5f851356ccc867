//! survey-charts: survey-response charts rendered to SVG and HTML.
//!
//! Data flows one way: `data` loads and shapes the survey, `core` holds the
//! scale and layout math, `api` turns records into render frames and `render`
//! turns frames into output.

pub mod api;
pub mod core;
pub mod data;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{DashboardConfig, DashboardReport, SurveyDashboard};
pub use error::{ChartError, ChartResult};
