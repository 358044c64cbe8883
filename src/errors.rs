use thiserror::Error;

pub type Result<T> = std::result::Result<T, GoesError>;

#[derive(Error, Debug)]
pub enum GoesError {
    #[error("IO error {0}")]
    IOError(#[from] std::io::Error),

    #[error("netcdf error {0}")]
    NetcdfError(#[from] netcdf::Error),

    #[error("serde error {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("unknown product '{0}'")]
    UnknownProduct(String),

    #[error("unsupported satellite GOES-{0}")]
    UnsupportedSatellite(u8),

    #[error("variable '{0}' not found")]
    MissingVariable(String),

    #[error("variable '{name}' has {actual} values, expected {expected}")]
    LengthMismatch { name: String, expected: usize, actual: usize },

    #[error("variable '{0}' is not one dimensional")]
    NotOneDimensional(String),

    #[error("invalid time units '{0}'")]
    TimeUnitsError(String),

    #[error("invalid time tag '{0}'")]
    TimeTagError(String),

    #[error("column mismatch: expected {expected:?}, got {actual:?}")]
    ColumnMismatch { expected: Vec<String>, actual: Vec<String> },
}
