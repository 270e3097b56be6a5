//! Reqwest-backed Classify source adapter.
//!
//! This adapter owns transport details only: URL construction, timeout and
//! transport error mapping, and XML decoding into domain records.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::debug;

use super::dto::{LookupDocumentDto, ResponseDto, SearchDocumentDto};
use crate::domain::ports::{ClassificationSource, ClassificationSourceError};
use crate::domain::{LookupResult, SearchResult, WorkId};

/// Public Classify endpoint.
pub const DEFAULT_CLASSIFY_BASE_URL: &str = "http://classify.oclc.org/classify2/Classify";
/// Whole-request timeout applied to every upstream call.
pub const DEFAULT_CLASSIFY_TIMEOUT: Duration = Duration::from_secs(10);

/// Classify adapter issuing `GET` requests against one base URL.
pub struct ClassifyHttpSource {
    client: Client,
    base_url: Url,
}

impl ClassifyHttpSource {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    fn request_url(&self, key: &str, value: &str) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("summary", "true")
            .append_pair(key, value);
        url
    }

    /// Fetch the raw body for `key=value`.
    ///
    /// Non-success statuses are logged and the body is still returned; the
    /// parser decides whether it is usable.
    async fn fetch(&self, key: &str, value: &str) -> Result<String, ClassificationSourceError> {
        let url = self.request_url(key, value);
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/xml")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            debug!(
                status = status.as_u16(),
                "classification service answered with non-success status"
            );
        }
        response.text().await.map_err(map_transport_error)
    }
}

#[async_trait]
impl ClassificationSource for ClassifyHttpSource {
    async fn search_by_title(
        &self,
        query: &str,
    ) -> Result<Vec<SearchResult>, ClassificationSourceError> {
        let body = self.fetch("title", query).await?;
        parse_search(&body)
    }

    async fn lookup_by_work_id(
        &self,
        work_id: &WorkId,
    ) -> Result<LookupResult, ClassificationSourceError> {
        let body = self.fetch("owi", work_id.as_ref()).await?;
        parse_lookup(&body)
    }
}

fn response_code(response: Option<&ResponseDto>) -> &str {
    response
        .and_then(|envelope| envelope.code.as_deref())
        .unwrap_or("none")
}

fn parse_search(body: &str) -> Result<Vec<SearchResult>, ClassificationSourceError> {
    let document: SearchDocumentDto = quick_xml::de::from_str(body).map_err(|error| {
        ClassificationSourceError::parse(format!("invalid search document: {error}"))
    })?;
    debug!(
        response_code = response_code(document.response.as_ref()),
        "decoded search document"
    );
    document
        .into_search_results()
        .map_err(ClassificationSourceError::parse)
}

fn parse_lookup(body: &str) -> Result<LookupResult, ClassificationSourceError> {
    let document: LookupDocumentDto = quick_xml::de::from_str(body).map_err(|error| {
        ClassificationSourceError::parse(format!("invalid lookup document: {error}"))
    })?;
    debug!(
        response_code = response_code(document.response.as_ref()),
        "decoded lookup document"
    );
    document
        .into_lookup_result()
        .map_err(ClassificationSourceError::parse)
}

fn map_transport_error(error: reqwest::Error) -> ClassificationSourceError {
    if error.is_timeout() {
        ClassificationSourceError::transport(format!("request timed out: {error}"))
    } else {
        ClassificationSourceError::transport(error.to_string())
    }
}
