pub mod error;
pub mod extract;
pub mod form;
pub mod request;
pub mod search;
pub mod session;
pub mod slug;

pub use error::ScrapeError;
pub use request::SearchRequest;
pub use search::{BASE_URL, SearchOutcome, SearchPhase, build_results_url, run_search};
pub use session::BrowserSession;
pub use slug::SlugTable;
