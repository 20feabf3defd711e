use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Line must have exactly 4 coordinates (x1, y1, x2, y2), got {0}")]
    InvalidLineLength(usize),

    #[error("Line start and end are the same point")]
    DegenerateLine,

    #[error("Line coordinates must be finite")]
    NonFiniteLine,

    #[error("Unknown line orientation: {0:?} (expected \"vertical\" or \"horizontal\")")]
    UnknownOrientation(String),

    #[error("Config IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config YAML Error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
