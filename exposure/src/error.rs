use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExposureError {
    #[error("invalid configuration, {0}")]
    InvalidConfiguration(String),

    #[error("unknown {kind} '{key}'")]
    MissingReferenceData { kind: &'static str, key: String },

    #[error(
        "{origin} → {destination} is {distance_km:.1} km, outside the expected \
         [{min_km}, {max_km}] km window; port geometry is suspect"
    )]
    GeometricPreconditionFailure {
        origin: String,
        destination: String,
        distance_km: f64,
        min_km: f64,
        max_km: f64,
    },

    #[error(
        "{more_exposed} ({more_exposed_score:.3}) must exceed {less_exposed} \
         ({less_exposed_score:.3}) by at least {min_margin} but the difference is \
         {difference:+.3}; {rationale}"
    )]
    PlausibilityCheckFailure {
        more_exposed: String,
        more_exposed_score: f64,
        less_exposed: String,
        less_exposed_score: f64,
        difference: f64,
        min_margin: f64,
        rationale: String,
    },

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Json(#[from] serde_json::Error),
}

impl ExposureError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }
}
