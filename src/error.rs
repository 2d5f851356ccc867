use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    /// Survey data could not be read, fetched or parsed.
    #[error("failed to acquire data from `{source_label}`: {reason}")]
    DataAcquisition {
        source_label: String,
        reason: String,
    },

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl ChartError {
    pub(crate) fn data_acquisition(source_label: impl Into<String>, reason: impl ToString) -> Self {
        Self::DataAcquisition {
            source_label: source_label.into(),
            reason: reason.to_string(),
        }
    }
}
