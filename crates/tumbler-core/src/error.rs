use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Scroller requires at least one item")]
    EmptyItems,

    #[error("Item extent must be positive and finite, got {width}x{height}")]
    InvalidItemExtent { width: f64, height: f64 },

    #[error("Item {tag} has size {actual_width}x{actual_height}, expected {expected_width}x{expected_height}")]
    MismatchedExtent {
        tag: usize,
        expected_width: f64,
        expected_height: f64,
        actual_width: f64,
        actual_height: f64,
    },

    #[error("Index {index} out of range for {len} items")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Invalid digit range {min}..={max}: needs min < max and at most 65535 labels")]
    InvalidDigitRange { min: i64, max: i64 },

    #[error("Digit {digit} outside range {min}..={max}")]
    DigitOutOfRange { digit: i64, min: i64, max: i64 },

    #[error("Cannot display non-finite value: {0}")]
    InvalidValue(f64),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
