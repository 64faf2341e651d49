//! Latest-release loading and its rendering into the page.

mod fetcher;
mod state;

pub use fetcher::{
    DIMMED_OPACITY, ERROR_COLOR, FAILED_TEXT, FallbackApplied, LOADING_CLASS, MUTED_COLOR,
    NO_PACKAGE_SUFFIX, ReleaseFetcher, SUCCESS_CLASS, UNAVAILABLE_TEXT,
};
pub use state::{ReleaseDetails, UiState};
