pub mod loader;
pub mod remote_work;
pub mod shaper;

pub use loader::{DEFAULT_DATA_PATH, DataSource, SurveyData, load_survey_data, parse_survey_json};
pub use shaper::{normalize_category, shape_records};
