use canonical::CanonicalError;
use ingest::IngestError;
use thiserror::Error;
use wordcloud::WordCloudError;

use crate::config::ConfigLoadError;

/// Errors surfaced by [`ChatStatistics`](crate::ChatStatistics).
///
/// Input problems (export, stopwords) are `DataLoad` and happen at
/// construction; output problems are `Render` and happen per generation call.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StatsError {
    #[error("failed to load chat data: {0}")]
    DataLoad(String),

    #[error("failed to render word cloud: {0}")]
    Render(String),

    #[error(transparent)]
    Config(#[from] ConfigLoadError),
}

impl StatsError {
    pub fn is_data_load(&self) -> bool {
        matches!(self, StatsError::DataLoad(_))
    }

    pub fn is_render(&self) -> bool {
        matches!(self, StatsError::Render(_))
    }
}

impl From<IngestError> for StatsError {
    fn from(value: IngestError) -> Self {
        StatsError::DataLoad(value.to_string())
    }
}

impl From<CanonicalError> for StatsError {
    fn from(value: CanonicalError) -> Self {
        StatsError::DataLoad(value.to_string())
    }
}

impl From<WordCloudError> for StatsError {
    fn from(value: WordCloudError) -> Self {
        StatsError::Render(value.to_string())
    }
}
