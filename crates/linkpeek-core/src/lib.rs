//! # linkpeek-core - Core Domain Types
//!
//! Foundation crate for linkpeek. Provides domain types, error handling,
//! the view-state event contract, the preview error taxonomy and logging.
//!
//! This crate has **zero internal dependencies** -- it only depends on external
//! crates (serde, chrono, thiserror, regex, tracing, url).
//!
//! ## Public API
//!
//! ### Domain Types (`types`)
//! - [`PageTitle`], [`WikiSite`], [`Namespace`] - Subject of a preview
//! - [`PageSummary`], [`GalleryItem`] - Data delivered by the data layer
//! - [`HistoryEntry`], [`HistorySource`] - Navigation context
//! - [`ReadingList`] - A user reading list
//!
//! ### Events (`events`)
//! - [`ViewState`] - One state announcement from the data source
//! - [`ErrorCause`], [`ErrorKind`] - Pre-classified failure
//!
//! ### Error Taxonomy (`error_type`)
//! - [`LinkPreviewErrorType`] - Message/button selection for failures
//!
//! ### Geography (`geo`)
//! - [`Location`], [`DistanceUnits`], [`distance_label()`]
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Custom error enum with `fatal` vs `recoverable` classification
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//! - [`ResultExt`] - Extension trait for adding error context
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use linkpeek_core::prelude::*;
//! ```

pub mod error;
pub mod error_type;
pub mod events;
pub mod geo;
pub mod logging;
pub mod text;
pub mod types;

/// Prelude for common imports used throughout all linkpeek crates
pub mod prelude {
    pub use super::error::{Error, Result, ResultExt};
    pub use tracing::{debug, error, info, instrument, trace, warn};
}

// Re-export commonly used types at crate root for convenience
pub use error::{Error, Result, ResultExt};
pub use error_type::{ErrorButtonAction, LinkPreviewErrorType};
pub use events::{ErrorCause, ErrorKind, ViewState};
pub use geo::{distance_label, format_distance, DistanceUnits, Location};
pub use text::{from_html, is_blank, keyword_ranges};
pub use types::{
    GalleryItem, HistoryEntry, HistorySource, Namespace, PageSummary, PageTitle, ReadingList,
    WikiSite,
};
