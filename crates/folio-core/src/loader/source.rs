//! Data sources the loader fetches raw documents from

use std::path::{Path, PathBuf};

use futures::future::BoxFuture;
use futures::FutureExt;

use crate::error::LoadErrorKind;

/// Raw bytes of one document, or why they could not be read
pub type FetchResult = Result<Vec<u8>, LoadErrorKind>;

/// A place data documents are read from.
///
/// `fetch` returns an owned future so the loader can share one in-flight
/// read between every caller waiting on the same document.
pub trait DataSource: Send + Sync {
    fn fetch(&self, path: &str) -> BoxFuture<'static, FetchResult>;

    /// Short description for logs and the status endpoint
    fn describe(&self) -> String;
}

/// Reads documents from a directory on disk
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl DataSource for DirectorySource {
    fn fetch(&self, path: &str) -> BoxFuture<'static, FetchResult> {
        let full = self.root.join(path);
        async move {
            tokio::fs::read(&full)
                .await
                .map_err(|e| LoadErrorKind::Fetch(format!("{}: {}", full.display(), e)))
        }
        .boxed()
    }

    fn describe(&self) -> String {
        format!("directory {}", self.root.display())
    }
}

#[cfg(feature = "http")]
pub use http::HttpSource;

#[cfg(feature = "http")]
mod http {
    use super::{DataSource, FetchResult};
    use crate::error::LoadErrorKind;
    use futures::future::BoxFuture;
    use futures::FutureExt;
    use reqwest::Client;

    /// Fetches documents over HTTP relative to a base URL.
    ///
    /// No request timeout is set: a hung request leaves its section loading.
    #[derive(Debug, Clone)]
    pub struct HttpSource {
        client: Client,
        base_url: String,
        user_agent: String,
    }

    impl HttpSource {
        pub fn new(base_url: &str, user_agent: &str) -> Result<Self, reqwest::Error> {
            let client = Client::builder().build()?;
            Ok(Self {
                client,
                base_url: base_url.trim_end_matches('/').to_string(),
                user_agent: user_agent.to_string(),
            })
        }

        pub fn url_for(&self, path: &str) -> String {
            format!("{}/{}", self.base_url, path.trim_start_matches('/'))
        }
    }

    impl DataSource for HttpSource {
        fn fetch(&self, path: &str) -> BoxFuture<'static, FetchResult> {
            let client = self.client.clone();
            let url = self.url_for(path);
            let user_agent = self.user_agent.clone();
            async move {
                let response = client
                    .get(&url)
                    .header("User-Agent", &user_agent)
                    .send()
                    .await
                    .map_err(|e| LoadErrorKind::Fetch(e.to_string()))?;

                let status = response.status();
                if !status.is_success() {
                    return Err(LoadErrorKind::Status(status.as_u16()));
                }

                let body = response
                    .bytes()
                    .await
                    .map_err(|e| LoadErrorKind::Fetch(e.to_string()))?;
                Ok(body.to_vec())
            }
            .boxed()
        }

        fn describe(&self) -> String {
            format!("http {}", self.base_url)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn url_joins_without_double_slash() {
            let source = HttpSource::new("https://example.org/data/", "folio-test").unwrap();
            assert_eq!(
                source.url_for("/publications.json"),
                "https://example.org/data/publications.json"
            );
            assert_eq!(source.describe(), "http https://example.org/data");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn directory_source_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("bio.json"), br#"{"name": "M"}"#).unwrap();

        let source = DirectorySource::new(dir.path());
        let bytes = source.fetch("bio.json").await.unwrap();
        assert_eq!(bytes, br#"{"name": "M"}"#);
    }

    #[tokio::test]
    async fn directory_source_missing_file_is_fetch_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = DirectorySource::new(dir.path());
        let err = source.fetch("nope.json").await.unwrap_err();
        assert!(matches!(err, LoadErrorKind::Fetch(_)));
    }
}
