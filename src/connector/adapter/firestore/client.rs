use std::sync::Arc;
use std::time::Duration;

use reqwest::Url;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::domain::DomainError;

use super::auth::TokenProvider;
use super::value::{CommitRequest, CommitResponse, Document, ListDocumentsResponse, Write};

pub const DEFAULT_BASE_URL: &str = "https://firestore.googleapis.com/v1";
pub const DEFAULT_DATABASE: &str = "(default)";
/// Largest page the list endpoint returns.
const PAGE_SIZE: u32 = 300;

/// Minimal Firestore REST v1 client: paged collection listing and atomic commits.
pub struct FirestoreClient {
    http: reqwest::Client,
    base_url: Url,
    project_id: String,
    database: String,
    token_provider: Arc<dyn TokenProvider>,
}

impl FirestoreClient {
    pub fn new(
        base_url: &str,
        project_id: impl Into<String>,
        database: impl Into<String>,
        token_provider: Arc<dyn TokenProvider>,
    ) -> Result<Self, DomainError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| DomainError::config(format!("invalid Firestore URL {}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(DomainError::config(format!(
                "invalid Firestore URL {}",
                base_url
            )));
        }

        Ok(Self {
            http: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
            base_url,
            project_id: project_id.into(),
            database: database.into(),
            token_provider,
        })
    }

    /// Client for a local emulator at `host:port`.
    pub fn emulator(
        host: &str,
        project_id: impl Into<String>,
        database: impl Into<String>,
        token_provider: Arc<dyn TokenProvider>,
    ) -> Result<Self, DomainError> {
        Self::new(
            &format!("http://{}/v1", host.trim_end_matches('/')),
            project_id,
            database,
            token_provider,
        )
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    /// Resource name of the database's document root.
    pub fn documents_root(&self) -> String {
        format!(
            "projects/{}/databases/{}/documents",
            self.project_id, self.database
        )
    }

    /// Resource name of the document or collection at `segments`.
    pub fn resource_name(&self, segments: &[&str]) -> String {
        let mut name = self.documents_root();
        for segment in segments {
            name.push('/');
            name.push_str(segment);
        }
        name
    }

    fn url(&self, segments: &[&str]) -> Result<Url, DomainError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| DomainError::internal("Firestore URL cannot be a base"))?
            .pop_if_empty()
            .extend([
                "projects",
                self.project_id.as_str(),
                "databases",
                self.database.as_str(),
            ])
            .extend(segments);
        Ok(url)
    }

    /// All documents of the collection at `collection_path`, following page tokens.
    ///
    /// `fields` restricts the returned fields; subcollections are not included.
    pub async fn list_documents(
        &self,
        collection_path: &[&str],
        fields: &[&str],
    ) -> Result<Vec<Document>, DomainError> {
        let mut segments = vec!["documents"];
        segments.extend_from_slice(collection_path);
        let url = self.url(&segments)?;

        let mut documents = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut query: Vec<(&str, String)> = vec![("pageSize", PAGE_SIZE.to_string())];
            for field in fields {
                query.push(("mask.fieldPaths", field.to_string()));
            }
            if let Some(token) = &page_token {
                query.push(("pageToken", token.clone()));
            }

            let token = self.token_provider.access_token().await?;
            let request = self.http.get(url.clone()).bearer_auth(token).query(&query);
            let page: ListDocumentsResponse = self.send(request, "list documents").await?;

            debug!(
                "Listed {} documents from {}",
                page.documents.len(),
                collection_path.join("/")
            );
            documents.extend(page.documents);

            match page.next_page_token {
                Some(next) if !next.is_empty() => page_token = Some(next),
                _ => break,
            }
        }

        Ok(documents)
    }

    /// Apply `writes` atomically.
    pub async fn commit(&self, writes: Vec<Write>) -> Result<CommitResponse, DomainError> {
        let url = self.url(&["documents:commit"])?;
        let token = self.token_provider.access_token().await?;
        let request = self
            .http
            .post(url)
            .bearer_auth(token)
            .json(&CommitRequest { writes });
        self.send(request, "commit").await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        operation: &str,
    ) -> Result<T, DomainError> {
        let response = request
            .send()
            .await
            .map_err(|e| DomainError::storage(format!("Firestore {} failed: {}", operation, e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!("Firestore {} returned {}: {}", operation, status, body);
            return Err(DomainError::storage(format!(
                "Firestore {} returned {}",
                operation, status
            )));
        }

        response.json().await.map_err(|e| {
            DomainError::storage(format!(
                "Failed to parse Firestore {} response: {}",
                operation, e
            ))
        })
    }
}
