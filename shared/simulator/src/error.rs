use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("invalid control limit {name}: {value} (must be positive and finite)")]
    InvalidLimit { name: &'static str, value: f64 },

    #[error("invalid physics configuration: {0}")]
    InvalidPhysics(String),

    #[error("unknown scenario {0:?}")]
    UnknownScenario(String),
}

/// Rejects limits the controllers have no defined behavior for.
pub(crate) fn check_limit(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(Error::InvalidLimit { name, value })
    }
}
