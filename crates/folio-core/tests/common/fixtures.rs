//! Test fixture loading utilities

#![allow(dead_code)]

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use folio_core::loader::FetchResult;
use folio_core::{
    ClipboardError, DataLoader, DataSource, DirectorySource, DocumentCatalog, LoadErrorKind,
    MemoryDocument,
};
use futures::future::BoxFuture;
use futures::FutureExt;

/// Directory holding the fixture data documents
pub fn fixture_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("test_fixtures")
        .join("data")
}

/// Load a fixture document as a string
pub fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(fixture_dir().join(name))
        .unwrap_or_else(|_| panic!("Failed to load fixture: {}", name))
}

/// Loader reading the fixture directory
pub fn fixture_loader() -> Arc<DataLoader> {
    Arc::new(DataLoader::new(
        Arc::new(DirectorySource::new(fixture_dir())),
        DocumentCatalog::default(),
    ))
}

/// Every container the portfolio renders into
pub const ALL_CONTAINERS: [&str; 5] = [
    "publications-list",
    "education-timeline",
    "experience-timeline",
    "volunteering-timeline",
    "projects-grid",
];

pub fn full_document() -> MemoryDocument {
    MemoryDocument::with_containers(ALL_CONTAINERS)
}

/// Fixture directory source that fails selected paths and counts reads
pub struct FlakySource {
    inner: DirectorySource,
    failing: HashSet<String>,
    reads: AtomicUsize,
}

impl FlakySource {
    pub fn failing(paths: &[&str]) -> Self {
        Self {
            inner: DirectorySource::new(fixture_dir()),
            failing: paths.iter().map(|p| p.to_string()).collect(),
            reads: AtomicUsize::new(0),
        }
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

impl DataSource for FlakySource {
    fn fetch(&self, path: &str) -> BoxFuture<'static, FetchResult> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.failing.contains(path) {
            return async { Err(LoadErrorKind::Status(503)) }.boxed();
        }
        self.inner.fetch(path)
    }

    fn describe(&self) -> String {
        "flaky fixtures".into()
    }
}

/// Clipboard whose two paths can be switched off, recording what it copied
pub struct RecordingClipboard {
    pub api_ok: bool,
    pub legacy_ok: bool,
    pub copied: Mutex<Vec<String>>,
}

impl RecordingClipboard {
    pub fn new(api_ok: bool, legacy_ok: bool) -> Self {
        Self {
            api_ok,
            legacy_ok,
            copied: Mutex::new(Vec::new()),
        }
    }

    pub fn copied(&self) -> Vec<String> {
        self.copied.lock().unwrap().clone()
    }
}

impl folio_core::Clipboard for RecordingClipboard {
    fn write_text<'a>(&'a self, text: &'a str) -> BoxFuture<'a, Result<(), ClipboardError>> {
        async move {
            if !self.api_ok {
                return Err(ClipboardError::Rejected("permission denied".into()));
            }
            self.copied.lock().unwrap().push(text.to_string());
            Ok(())
        }
        .boxed()
    }

    fn legacy_copy(&self, text: &str) -> Result<(), ClipboardError> {
        if !self.legacy_ok {
            return Err(ClipboardError::Unsupported);
        }
        self.copied.lock().unwrap().push(text.to_string());
        Ok(())
    }
}
