//! HTTP endpoint handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use thiserror::Error;

use folio_core::render::{
    render_load_error, render_projects, render_publication_list, render_timeline,
};
use folio_core::{DataLoadError, Facet, FilterState, LoadErrorKind, PublicationIndex};
use folio_domain::{Project, Publication, PublicationId, TimelineEntry, TimelineKind};

use crate::AppState;

/// Errors a handler can answer with
#[derive(Debug, Error)]
pub enum ServerError {
    /// A section's data failed to load; answered with the inline error fragment
    #[error("{section}: {source}")]
    Section {
        section: String,
        #[source]
        source: DataLoadError,
    },

    /// A raw document failed to load; answered as JSON
    #[error(transparent)]
    Document(#[from] DataLoadError),

    #[error("{0} not found")]
    NotFound(String),
}

impl ServerError {
    fn section(section: &str, source: DataLoadError) -> Self {
        ServerError::Section {
            section: section.to_string(),
            source,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        match self {
            ServerError::Section { section, source } => {
                tracing::warn!(section = %section, error = %source, "section load failed");
                let markup = render_load_error(&section, &source);
                (StatusCode::BAD_GATEWAY, Html(markup.into_string())).into_response()
            }
            ServerError::Document(err) => {
                let status = match err.kind {
                    LoadErrorKind::UnknownDocument => StatusCode::NOT_FOUND,
                    _ => StatusCode::BAD_GATEWAY,
                };
                let body = serde_json::json!({
                    "error": err.to_string(),
                    "document": err.document,
                });
                (status, Json(body)).into_response()
            }
            ServerError::NotFound(what) => {
                (StatusCode::NOT_FOUND, format!("{} not found", what)).into_response()
            }
        }
    }
}

// ============================================================================
// Data Endpoints
// ============================================================================

/// Raw JSON data document by logical name
pub async fn get_document(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<serde_json::Value>, ServerError> {
    let value = state.loader.load(&name).await?;
    Ok(Json(value.as_ref().clone()))
}

/// Query parameters of the publications section
#[derive(Debug, Default, Deserialize)]
pub struct PublicationQuery {
    pub year: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub search: Option<String>,
}

impl PublicationQuery {
    pub fn filter_state(&self) -> FilterState {
        FilterState {
            year: Facet::parse(self.year.as_deref().unwrap_or_default()),
            kind: Facet::parse(self.kind.as_deref().unwrap_or_default()),
            search: self
                .search
                .as_deref()
                .unwrap_or_default()
                .trim()
                .to_string(),
        }
    }
}

// ============================================================================
// Section Endpoints
// ============================================================================

/// Rendered publications list for a filter state
pub async fn publications_section(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PublicationQuery>,
) -> Result<Html<String>, ServerError> {
    let records: Vec<Publication> = state
        .loader
        .load_records("publications")
        .await
        .map_err(|e| ServerError::section("publications", e))?;

    let index = PublicationIndex::new(records);
    let filter = query.filter_state();
    let search_value = query.search.as_deref().unwrap_or_default();
    let markup = render_publication_list(&index, &filter, search_value, None);
    Ok(Html(markup.into_string()))
}

/// Rendered education, experience or volunteering timeline
pub async fn timeline_section(
    State(state): State<Arc<AppState>>,
    Path(kind): Path<String>,
) -> Result<Html<String>, ServerError> {
    let kind = TimelineKind::parse(&kind).ok_or_else(|| ServerError::NotFound(kind.clone()))?;
    let entries: Vec<TimelineEntry> = state
        .loader
        .load_records(kind.document())
        .await
        .map_err(|e| ServerError::section(kind.document(), e))?;
    Ok(Html(render_timeline(&entries, kind).into_string()))
}

/// Rendered project grid
pub async fn projects_section(
    State(state): State<Arc<AppState>>,
) -> Result<Html<String>, ServerError> {
    let projects: Vec<Project> = state
        .loader
        .load_records("projects")
        .await
        .map_err(|e| ServerError::section("projects", e))?;
    Ok(Html(render_projects(&projects).into_string()))
}

/// BibTeX of one publication as plain text
pub async fn get_citation(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Response, ServerError> {
    let records: Vec<Publication> = state.loader.load_records("publications").await?;
    let id = PublicationId::new(id);
    let citation = records
        .iter()
        .find(|p| p.id == id)
        .and_then(Publication::citation)
        .ok_or_else(|| ServerError::NotFound(format!("citation for '{}'", id)))?;

    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        citation.to_string(),
    )
        .into_response())
}

// ============================================================================
// System Endpoints
// ============================================================================

/// Loader statistics
pub async fn get_status(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let loader = &state.loader;
    let documents: Vec<&str> = loader.catalog().names().collect();

    Json(serde_json::json!({
        "source": loader.source().describe(),
        "documents": documents,
        "cached": loader.cached_documents(),
        "fetches": loader.fetch_count(),
        "view": {
            "search_debounce_ms": state.config.view.search_debounce_ms,
            "copy_feedback_ms": state.config.view.copy_feedback_ms,
        },
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_maps_to_filter_state() {
        let query = PublicationQuery {
            year: Some("2024".into()),
            kind: Some("all".into()),
            search: Some("  vision ".into()),
        };
        let state = query.filter_state();
        assert_eq!(state.year, Facet::Only("2024".into()));
        assert!(state.kind.is_all());
        assert_eq!(state.search, "vision");

        assert!(PublicationQuery::default().filter_state().is_default());
    }
}
