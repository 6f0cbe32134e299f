use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScrapeError {
    /// WebDriver session could not be created at all.
    #[error("WebDriver session could not be established: {0}")]
    Session(String),

    /// An element lookup/fill/submit step of the primary form path
    /// failed. Recovered by falling back to direct URL navigation.
    #[error("form interaction failed: {0}")]
    FormInteraction(String),

    /// Navigation failed or the results page never rendered. Terminal.
    #[error("navigation failed: {0}")]
    Navigation(String),

    /// The results page rendered but yielded zero flight rows. Terminal.
    #[error("no flight rows could be extracted from the results page")]
    Extraction,

    #[error("invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("slug override file {path}: {reason}")]
    SlugMap { path: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
