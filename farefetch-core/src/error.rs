use thiserror::Error;

#[derive(Error, Debug)]
pub enum DataError {
    #[error("flight data CSV not found at {0}")]
    Load(String),

    #[error("flight data CSV at {0} contains no usable rows")]
    EmptyDataset(String),

    #[error("not enough data to plot {0}")]
    InsufficientPlotData(&'static str),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("chart rendering failed: {0}")]
    Chart(String),
}

pub type Result<T> = std::result::Result<T, DataError>;
