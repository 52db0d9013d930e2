//! Data access layer
//!
//! [`DataLoader`] fetches each named document once and keeps the parsed JSON
//! for its lifetime. Concurrent callers asking for a document that is still
//! being fetched wait on the same in-flight future, so a burst of requests
//! costs one read. A failed load is not cached: the pending entry is dropped
//! and the next call fetches again. Nothing retries on its own.

mod source;

pub use source::{DataSource, DirectorySource, FetchResult};
#[cfg(feature = "http")]
pub use source::HttpSource;

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use futures::future::{BoxFuture, Shared};
use futures::FutureExt;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{DataLoadError, LoadErrorKind};

/// Logical document names every portfolio has
pub const STANDARD_DOCUMENTS: [&str; 7] = [
    "bio",
    "education",
    "experience",
    "projects",
    "publications",
    "volunteering",
    "travel",
];

/// Maps logical document names to resource paths
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentCatalog {
    paths: BTreeMap<String, String>,
}

impl Default for DocumentCatalog {
    fn default() -> Self {
        let paths = STANDARD_DOCUMENTS
            .iter()
            .map(|name| (name.to_string(), format!("{}.json", name)))
            .collect();
        Self { paths }
    }
}

impl DocumentCatalog {
    /// An empty catalog
    pub fn empty() -> Self {
        Self {
            paths: BTreeMap::new(),
        }
    }

    /// Builder method to add or replace a mapping
    pub fn with_document(mut self, name: impl Into<String>, path: impl Into<String>) -> Self {
        self.paths.insert(name.into(), path.into());
        self
    }

    pub fn resolve(&self, name: &str) -> Option<&str> {
        self.paths.get(name).map(String::as_str)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.paths.keys().map(String::as_str)
    }
}

type LoadResult = Result<Arc<Value>, DataLoadError>;
type SharedLoad = Shared<BoxFuture<'static, LoadResult>>;

struct Pending {
    generation: u64,
    load: SharedLoad,
}

#[derive(Default)]
struct LoaderState {
    cache: HashMap<String, Arc<Value>>,
    pending: HashMap<String, Pending>,
    next_generation: u64,
}

/// Fetch-once, cache-forever loader for data documents
pub struct DataLoader {
    source: Arc<dyn DataSource>,
    catalog: DocumentCatalog,
    state: Mutex<LoaderState>,
    fetches: AtomicUsize,
}

impl DataLoader {
    pub fn new(source: Arc<dyn DataSource>, catalog: DocumentCatalog) -> Self {
        Self {
            source,
            catalog,
            state: Mutex::new(LoaderState::default()),
            fetches: AtomicUsize::new(0),
        }
    }

    pub fn catalog(&self) -> &DocumentCatalog {
        &self.catalog
    }

    pub fn source(&self) -> &dyn DataSource {
        self.source.as_ref()
    }

    /// Number of source reads issued so far
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn is_cached(&self, name: &str) -> bool {
        self.lock().cache.contains_key(name)
    }

    /// Names of the documents currently cached
    pub fn cached_documents(&self) -> Vec<String> {
        let mut names: Vec<String> = self.lock().cache.keys().cloned().collect();
        names.sort();
        names
    }

    fn lock(&self) -> MutexGuard<'_, LoaderState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Load a document by logical name.
    ///
    /// Returns the cached value when present, joins an in-flight load when one
    /// exists, and otherwise starts exactly one fetch.
    pub async fn load(&self, name: &str) -> LoadResult {
        let (generation, load) = {
            let mut state = self.lock();

            if let Some(value) = state.cache.get(name) {
                tracing::debug!(document = name, "cache hit");
                return Ok(Arc::clone(value));
            }

            match state.pending.get(name) {
                Some(pending) => {
                    tracing::debug!(document = name, "joining in-flight load");
                    (pending.generation, pending.load.clone())
                }
                None => {
                    let path = self
                        .catalog
                        .resolve(name)
                        .ok_or_else(|| DataLoadError::new(name, LoadErrorKind::UnknownDocument))?;

                    tracing::info!(document = name, path, source = %self.source.describe(), "fetching document");
                    self.fetches.fetch_add(1, Ordering::SeqCst);
                    let load = start_load(name, self.source.fetch(path));

                    let generation = state.next_generation;
                    state.next_generation += 1;
                    state.pending.insert(
                        name.to_string(),
                        Pending {
                            generation,
                            load: load.clone(),
                        },
                    );
                    (generation, load)
                }
            }
        };

        let result = load.await;

        let mut state = self.lock();
        let owns_pending = state
            .pending
            .get(name)
            .is_some_and(|pending| pending.generation == generation);
        if owns_pending {
            state.pending.remove(name);
            match &result {
                Ok(value) => {
                    state.cache.insert(name.to_string(), Arc::clone(value));
                }
                Err(err) => {
                    tracing::warn!(document = name, error = %err, "document load failed");
                }
            }
        }

        result
    }

    /// Load an array document as typed records
    pub async fn load_records<T: DeserializeOwned>(
        &self,
        name: &str,
    ) -> Result<Vec<T>, DataLoadError> {
        self.load_as(name).await
    }

    /// Load a document and deserialize it into `T`
    pub async fn load_as<T: DeserializeOwned>(&self, name: &str) -> Result<T, DataLoadError> {
        let value = self.load(name).await?;
        T::deserialize(&*value)
            .map_err(|e| DataLoadError::new(name, LoadErrorKind::Decode(e.to_string())))
    }
}

fn start_load(name: &str, fetch: BoxFuture<'static, FetchResult>) -> SharedLoad {
    let document = name.to_string();
    async move {
        let bytes = fetch
            .await
            .map_err(|kind| DataLoadError::new(&document, kind))?;
        let value: Value = serde_json::from_slice(&bytes)
            .map_err(|e| DataLoadError::new(&document, LoadErrorKind::Parse(e.to_string())))?;
        Ok::<_, DataLoadError>(Arc::new(value))
    }
    .boxed()
    .shared()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Source serving fixed documents from memory and counting reads
    struct StaticSource {
        documents: HashMap<String, FetchResult>,
        reads: AtomicUsize,
    }

    impl StaticSource {
        fn new(documents: &[(&str, FetchResult)]) -> Self {
            Self {
                documents: documents
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.clone()))
                    .collect(),
                reads: AtomicUsize::new(0),
            }
        }
    }

    impl DataSource for StaticSource {
        fn fetch(&self, path: &str) -> BoxFuture<'static, FetchResult> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            let result = self
                .documents
                .get(path)
                .cloned()
                .unwrap_or(Err(LoadErrorKind::Status(404)));
            async move {
                tokio::task::yield_now().await;
                result
            }
            .boxed()
        }

        fn describe(&self) -> String {
            "memory".into()
        }
    }

    fn loader(documents: &[(&str, FetchResult)]) -> DataLoader {
        DataLoader::new(Arc::new(StaticSource::new(documents)), DocumentCatalog::default())
    }

    #[tokio::test]
    async fn second_load_hits_cache() {
        let loader = loader(&[("bio.json", Ok(br#"{"name": "M"}"#.to_vec()))]);

        let first = loader.load("bio").await.unwrap();
        let second = loader.load("bio").await.unwrap();

        assert_eq!(first["name"], "M");
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(loader.fetch_count(), 1);
        assert!(loader.is_cached("bio"));
    }

    #[tokio::test]
    async fn concurrent_loads_share_one_fetch() {
        let loader = loader(&[("publications.json", Ok(b"[]".to_vec()))]);

        let (a, b) = tokio::join!(loader.load("publications"), loader.load("publications"));

        assert!(Arc::ptr_eq(&a.unwrap(), &b.unwrap()));
        assert_eq!(loader.fetch_count(), 1);
    }

    #[tokio::test]
    async fn invalid_json_is_parse_error_and_not_cached() {
        let loader = loader(&[("travel.json", Ok(b"{not json".to_vec()))]);

        let err = loader.load("travel").await.unwrap_err();
        assert_eq!(err.document, "travel");
        assert!(matches!(err.kind, LoadErrorKind::Parse(_)));
        assert!(!loader.is_cached("travel"));

        // A later call retries rather than replaying the failure
        let _ = loader.load("travel").await;
        assert_eq!(loader.fetch_count(), 2);
    }

    #[tokio::test]
    async fn concurrent_failures_share_the_error() {
        let loader = loader(&[("projects.json", Err(LoadErrorKind::Status(500)))]);

        let (a, b) = tokio::join!(loader.load("projects"), loader.load("projects"));

        assert_eq!(a.unwrap_err().kind, LoadErrorKind::Status(500));
        assert_eq!(b.unwrap_err().kind, LoadErrorKind::Status(500));
        assert_eq!(loader.fetch_count(), 1);
    }

    #[tokio::test]
    async fn unknown_document_never_fetches() {
        let loader = loader(&[]);
        let err = loader.load("blog").await.unwrap_err();
        assert_eq!(err.kind, LoadErrorKind::UnknownDocument);
        assert_eq!(loader.fetch_count(), 0);
    }

    #[tokio::test]
    async fn wrong_shape_is_decode_error() {
        let loader = loader(&[("education.json", Ok(br#"{"not": "an array"}"#.to_vec()))]);
        let err = loader
            .load_records::<serde_json::Value>("education")
            .await
            .unwrap_err();
        assert!(matches!(err.kind, LoadErrorKind::Decode(_)));
        // The raw document is still cached; only the typed view failed
        assert!(loader.is_cached("education"));
    }

    #[test]
    fn catalog_overrides() {
        let catalog = DocumentCatalog::default().with_document("publications", "pubs/all.json");
        assert_eq!(catalog.resolve("publications"), Some("pubs/all.json"));
        assert_eq!(catalog.resolve("bio"), Some("bio.json"));
        assert_eq!(catalog.resolve("blog"), None);
        assert_eq!(catalog.names().count(), 7);
        assert_eq!(DocumentCatalog::empty().names().count(), 0);
    }
}
