use super::client::{MetadataClient, MetadataTransport};
use super::types::{CollectionId, FileId, FileMetadata};
use crate::error::SteamPrepError;
use indexmap::IndexMap;
use itertools::Itertools;
use tracing;

/// Expand a list of collection IDs into the deduplicated list of member file
/// IDs, preserving first-seen order. A file referenced by several collections
/// appears exactly once.
pub async fn resolve_membership<T: MetadataTransport>(
    client: &MetadataClient<T>,
    collection_ids: &[CollectionId],
) -> Result<Vec<FileId>, SteamPrepError> {
    let details = client.expand_collections(collection_ids).await?;

    let file_ids: Vec<FileId> = details
        .collectiondetails
        .into_iter()
        .flat_map(|collection| collection.children)
        .map(|child| child.publishedfileid)
        .unique()
        .collect();

    tracing::debug!(?file_ids, "resolved workshop collection membership");
    Ok(file_ids)
}

/// Look up metadata for each file ID. If the remote response carries duplicate
/// entries for one ID, the first occurrence wins and later ones are dropped
/// silently.
pub async fn fetch_details<T: MetadataTransport>(
    client: &MetadataClient<T>,
    file_ids: &[FileId],
) -> Result<IndexMap<FileId, FileMetadata>, SteamPrepError> {
    let details = client.file_details(file_ids).await?;

    let mut result: IndexMap<FileId, FileMetadata> = IndexMap::new();
    for detail in details.publishedfiledetails {
        if result.contains_key(&detail.publishedfileid) {
            continue;
        }
        result.insert(
            detail.publishedfileid.clone(),
            FileMetadata {
                file_id: detail.publishedfileid,
                file_name: detail.filename,
                file_size: detail.file_size,
                time_updated: detail.time_updated,
                file_url: detail.file_url,
            },
        );
    }

    tracing::debug!(count = result.len(), "fetched workshop file details");
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workshop::client::{MetadataTransport, TransportResponse};
    use async_trait::async_trait;
    use std::time::Duration;

    /// Transport answering every request with the same 200 body.
    struct CannedTransport {
        body: String,
    }

    #[async_trait]
    impl MetadataTransport for CannedTransport {
        async fn post_form(
            &self,
            _url: &str,
            _form: &[(String, String)],
        ) -> Result<TransportResponse, SteamPrepError> {
            Ok(TransportResponse {
                status: 200,
                body: self.body.clone(),
            })
        }
    }

    fn canned_client(body: &str) -> MetadataClient<CannedTransport> {
        MetadataClient::with_transport(CannedTransport {
            body: body.to_string(),
        })
        .with_retry(1, Duration::ZERO)
    }

    #[tokio::test]
    async fn test_overlapping_collections_deduplicate_first_seen() {
        // Collections "A" and "B" both reference file "42".
        let body = r#"{
            "response": {
                "collectiondetails": [
                    {"publishedfileid": "A", "children": [
                        {"publishedfileid": "42"},
                        {"publishedfileid": "7"}
                    ]},
                    {"publishedfileid": "B", "children": [
                        {"publishedfileid": "42"},
                        {"publishedfileid": "9"}
                    ]}
                ]
            }
        }"#;
        let client = canned_client(body);

        let file_ids = resolve_membership(&client, &["A".to_string(), "B".to_string()])
            .await
            .unwrap();

        assert_eq!(file_ids, vec!["42", "7", "9"]);
    }

    #[tokio::test]
    async fn test_empty_collection_response_yields_no_ids() {
        let client = canned_client(r#"{"response": {"collectiondetails": []}}"#);

        let file_ids = resolve_membership(&client, &[]).await.unwrap();

        assert!(file_ids.is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_detail_entries_first_occurrence_wins() {
        let body = r#"{
            "response": {
                "publishedfiledetails": [
                    {"publishedfileid": "42", "filename": "map.vpk",
                     "file_size": 100, "time_updated": 10, "file_url": "http://a/42"},
                    {"publishedfileid": "42", "filename": "other.vpk",
                     "file_size": 999, "time_updated": 99, "file_url": "http://b/42"}
                ]
            }
        }"#;
        let client = canned_client(body);

        let details = fetch_details(&client, &["42".to_string()]).await.unwrap();

        assert_eq!(details.len(), 1);
        let entry = &details["42"];
        assert_eq!(entry.file_name, "map.vpk");
        assert_eq!(entry.file_size, 100);
        assert_eq!(entry.file_url, "http://a/42");
    }

    #[tokio::test]
    async fn test_details_preserve_response_order() {
        let body = r#"{
            "response": {
                "publishedfiledetails": [
                    {"publishedfileid": "9", "filename": "b.vpk",
                     "file_size": 2, "time_updated": 2, "file_url": "http://x/9"},
                    {"publishedfileid": "7", "filename": "a.vpk",
                     "file_size": 1, "time_updated": 1, "file_url": "http://x/7"}
                ]
            }
        }"#;
        let client = canned_client(body);

        let details = fetch_details(&client, &["9".to_string(), "7".to_string()])
            .await
            .unwrap();

        let keys: Vec<_> = details.keys().cloned().collect();
        assert_eq!(keys, vec!["9", "7"]);
    }
}
