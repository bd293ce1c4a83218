use crate::error::SteamPrepError;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing;

// https://steamapi.xpaw.me/#ISteamRemoteStorage/GetCollectionDetails
pub const GET_COLLECTION_DETAILS_URL: &str =
    "https://api.steampowered.com/ISteamRemoteStorage/GetCollectionDetails/v1/";
// https://steamapi.xpaw.me/#ISteamRemoteStorage/GetPublishedFileDetails
pub const GET_PUBLISHED_FILE_DETAILS_URL: &str =
    "https://api.steampowered.com/ISteamRemoteStorage/GetPublishedFileDetails/v1/";

pub const DEFAULT_RETRIES: usize = 5;
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(5);

/// Raw outcome of a single metadata POST, before retry policy is applied.
#[derive(Clone, Debug)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Seam for the metadata POST so retry behavior is testable without a network.
#[async_trait]
pub trait MetadataTransport: Send + Sync {
    async fn post_form(
        &self,
        url: &str,
        form: &[(String, String)],
    ) -> Result<TransportResponse, SteamPrepError>;
}

#[derive(Clone, Debug, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MetadataTransport for HttpTransport {
    async fn post_form(
        &self,
        url: &str,
        form: &[(String, String)],
    ) -> Result<TransportResponse, SteamPrepError> {
        let response = self.client.post(url).form(form).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(TransportResponse { status, body })
    }
}

#[derive(Clone, Debug)]
pub struct ApiEndpoints {
    pub collection_details: String,
    pub file_details: String,
}

impl Default for ApiEndpoints {
    fn default() -> Self {
        Self {
            collection_details: GET_COLLECTION_DETAILS_URL.to_string(),
            file_details: GET_PUBLISHED_FILE_DETAILS_URL.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CollectionChild {
    pub publishedfileid: String,
}

#[derive(Debug, Deserialize)]
pub struct CollectionDetail {
    pub publishedfileid: String,
    #[serde(default)]
    pub children: Vec<CollectionChild>,
}

#[derive(Debug, Deserialize)]
pub struct CollectionDetailsResponse {
    #[serde(default)]
    pub collectiondetails: Vec<CollectionDetail>,
}

#[derive(Debug, Deserialize)]
struct CollectionDetailsEnvelope {
    response: CollectionDetailsResponse,
}

#[derive(Debug, Deserialize)]
pub struct PublishedFileDetail {
    pub publishedfileid: String,
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub file_size: u64,
    #[serde(default)]
    pub time_updated: u64,
    #[serde(default)]
    pub file_url: String,
}

#[derive(Debug, Deserialize)]
pub struct FileDetailsResponse {
    #[serde(default)]
    pub publishedfiledetails: Vec<PublishedFileDetail>,
}

#[derive(Debug, Deserialize)]
struct FileDetailsEnvelope {
    response: FileDetailsResponse,
}

/// Thin wrapper over the two Steam Remote Storage metadata operations.
///
/// Non-success statuses are retried on a fixed interval (no backoff, no
/// jitter); once the retry budget is exhausted the whole run is aborted with
/// [`SteamPrepError::RemoteUnavailable`]. Transport-level failures (e.g. a
/// refused connection) are not retried and propagate immediately.
pub struct MetadataClient<T = HttpTransport> {
    transport: T,
    endpoints: ApiEndpoints,
    retries: usize,
    retry_delay: Duration,
}

impl MetadataClient<HttpTransport> {
    pub fn new() -> Self {
        Self::with_transport(HttpTransport::new())
    }
}

impl Default for MetadataClient<HttpTransport> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: MetadataTransport> MetadataClient<T> {
    pub fn with_transport(transport: T) -> Self {
        Self {
            transport,
            endpoints: ApiEndpoints::default(),
            retries: DEFAULT_RETRIES,
            retry_delay: DEFAULT_RETRY_DELAY,
        }
    }

    pub fn with_endpoints(mut self, endpoints: ApiEndpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    pub fn with_retry(mut self, retries: usize, retry_delay: Duration) -> Self {
        self.retries = retries.max(1);
        self.retry_delay = retry_delay;
        self
    }

    /// Expand collection IDs into their membership listing. A zero-length
    /// input is still sent as a request with a declared zero count.
    pub async fn expand_collections(
        &self,
        collection_ids: &[String],
    ) -> Result<CollectionDetailsResponse, SteamPrepError> {
        let mut form = vec![(
            "collectioncount".to_string(),
            collection_ids.len().to_string(),
        )];
        for (i, id) in collection_ids.iter().enumerate() {
            form.push((format!("publishedfileids[{i}]"), id.clone()));
        }

        let body = self
            .post_with_retry(&self.endpoints.collection_details, form)
            .await?;
        let envelope: CollectionDetailsEnvelope = serde_json::from_str(&body)?;
        Ok(envelope.response)
    }

    /// Look up per-file metadata for the given published file IDs.
    pub async fn file_details(
        &self,
        file_ids: &[String],
    ) -> Result<FileDetailsResponse, SteamPrepError> {
        let mut form = vec![("itemcount".to_string(), file_ids.len().to_string())];
        for (i, id) in file_ids.iter().enumerate() {
            form.push((format!("publishedfileids[{i}]"), id.clone()));
        }

        let body = self
            .post_with_retry(&self.endpoints.file_details, form)
            .await?;
        let envelope: FileDetailsEnvelope = serde_json::from_str(&body)?;
        Ok(envelope.response)
    }

    async fn post_with_retry(
        &self,
        url: &str,
        form: Vec<(String, String)>,
    ) -> Result<String, SteamPrepError> {
        let mut last: Option<TransportResponse> = None;
        for attempt in 1..=self.retries.max(1) {
            let response = self.transport.post_form(url, &form).await?;
            if response.is_success() {
                return Ok(response.body);
            }
            tracing::warn!(
                url,
                status = response.status,
                attempt,
                retries = self.retries,
                "metadata request returned non-success status"
            );
            last = Some(response);
            // The delay applies after every failed attempt, including the last.
            tokio::time::sleep(self.retry_delay).await;
        }

        let last = last.unwrap_or(TransportResponse {
            status: 0,
            body: String::new(),
        });
        Err(SteamPrepError::RemoteUnavailable {
            url: url.to_string(),
            attempts: self.retries,
            status: last.status,
            body: last.body,
        })
    }
}
