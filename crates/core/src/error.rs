use thiserror::Error;

/// Failures surfaced at the parse and selection boundaries. Data-quality
/// problems inside individual records never land here; rendering absorbs
/// those with fallback text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    #[error("no supported city found in the query")]
    UnrecognizedCity,
    #[error("no trip length found in the query; include something like \"4 days\" or \"2 nights\"")]
    MissingTripLength,
    #[error("no attractions on record for {city}")]
    EmptyAttractionPool { city: String },
}

impl PlanError {
    /// Stable machine-readable code for API payloads and logs.
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnrecognizedCity => "unrecognized_city",
            Self::MissingTripLength => "missing_trip_length",
            Self::EmptyAttractionPool { .. } => "empty_attraction_pool",
        }
    }
}
