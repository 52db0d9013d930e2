//! Portfolio domain types for folio
//!
//! This crate provides the record models the portfolio data documents hold:
//! - Publication: A paper with authors, venue, type and optional BibTeX
//! - Author: A byline entry, flagged when it is the portfolio owner
//! - TimelineEntry: An education, experience or volunteering position
//! - Project: A project card with links
//! - Validation: Data-quality checks run after a document is loaded
//!
//! Records are read-only once loaded. Nothing in the engine creates or edits
//! them; it only filters and renders.

pub mod author;
pub mod project;
pub mod publication;
pub mod timeline;
pub mod validation;

pub use author::*;
pub use project::*;
pub use publication::*;
pub use timeline::*;
pub use validation::*;
