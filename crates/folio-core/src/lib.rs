//! folio-core: the portfolio engine
//!
//! Data flows one way through the crate:
//!
//! 1. [`loader`] fetches JSON data documents once and caches them
//! 2. [`filter`] selects publications for a year/type/search state
//! 3. [`render`] turns records into escaped HTML fragments
//! 4. [`view`] drives the publications section from UI events
//! 5. [`modal`] shows one record's BibTeX and copies it
//!
//! [`app::Portfolio`] wires these together for a page.

pub mod app;
pub mod config;
pub mod error;
pub mod filter;
pub mod loader;
pub mod modal;
pub mod render;
pub mod view;

pub use app::{MountReport, Portfolio, MODAL_CONTAINER};
pub use config::{DataConfig, FolioConfig, ServerConfig, SourceKind, ViewConfig};
pub use error::{ClipboardError, ConfigError, DataLoadError, LoadErrorKind, RenderTargetMissing};
pub use filter::{group_by_year, Facet, FilterState, PublicationIndex, YearGroup};
pub use loader::{DataLoader, DataSource, DirectorySource, DocumentCatalog, STANDARD_DOCUMENTS};
#[cfg(feature = "http")]
pub use loader::HttpSource;
pub use modal::{CitationModal, Clipboard, CopyMethod, ModalKey, ModalState};
pub use render::Markup;
pub use view::{
    Document, ElementId, ListPatch, MemoryDocument, PanelChange, PublicationsController,
    RenderCycle, RenderPass, SearchDebouncer, ViewEvent, ViewUpdate,
};
