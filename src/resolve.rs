use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

const KG_SEARCH_URL: &str = "https://kgsearch.googleapis.com/v1/entities:search";

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Knowledge Graph returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),
}

/// Maps a query term to its best-matching answer.
///
/// `Ok(None)` means the source has nothing for the term; `Err` means the
/// source could not be asked.
#[async_trait]
pub trait Resolver: Send + Sync {
    async fn resolve(&self, term: &str) -> Result<Option<String>, LookupError>;
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(rename = "itemListElement", default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    result: Entity,
}

#[derive(Debug, Deserialize)]
struct Entity {
    name: Option<String>,
    url: Option<String>,
    #[serde(rename = "detailedDescription")]
    detailed_description: Option<DetailedDescription>,
}

#[derive(Debug, Deserialize)]
struct DetailedDescription {
    url: Option<String>,
}

fn best_match(response: SearchResponse) -> Option<String> {
    let entity = response.items.into_iter().next()?.result;
    entity
        .detailed_description
        .and_then(|d| d.url)
        .or(entity.url)
        .or(entity.name)
        .filter(|answer| !answer.is_empty())
}

/// Google Knowledge Graph Search API client.
pub struct KnowledgeGraphClient {
    api_key: String,
    client: reqwest::Client,
}

impl KnowledgeGraphClient {
    /// Fails only if the HTTP client cannot be built with the given timeout.
    pub fn new(api_key: String, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { api_key, client })
    }

    fn search_url(&self, term: &str) -> String {
        format!(
            "{}?query={}&key={}&limit=1",
            KG_SEARCH_URL,
            urlencoding::encode(term),
            urlencoding::encode(&self.api_key)
        )
    }
}

#[async_trait]
impl Resolver for KnowledgeGraphClient {
    async fn resolve(&self, term: &str) -> Result<Option<String>, LookupError> {
        if term.trim().is_empty() {
            tracing::debug!("Empty query, skipping Knowledge Graph lookup");
            return Ok(None);
        }

        tracing::info!("Knowledge Graph lookup: query={}", term);

        let response = self
            .client
            .get(self.search_url(term))
            .send()
            .await
            .map_err(|e| LookupError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let preview: String = body.chars().take(200).collect();
            tracing::warn!("Knowledge Graph returned {} - {}", status, preview);
            return Err(LookupError::Api {
                status: status.as_u16(),
                body: preview,
            });
        }

        let parsed: SearchResponse = response
            .json()
            .await
            .map_err(|e| LookupError::Decode(e.to_string()))?;

        let answer = best_match(parsed);
        match &answer {
            Some(a) => tracing::info!("Resolved {} to {}", term, a),
            None => tracing::debug!("No Knowledge Graph match for {}", term),
        }
        Ok(answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pick(json: &str) -> Option<String> {
        best_match(serde_json::from_str(json).unwrap())
    }

    #[test]
    fn prefers_detailed_description_url() {
        let json = r#"{
            "@type": "ItemList",
            "itemListElement": [{
                "@type": "EntitySearchResult",
                "result": {
                    "name": "Lion",
                    "url": "http://example.org/lion",
                    "description": "Mammal",
                    "detailedDescription": {
                        "articleBody": "The lion is a large cat...",
                        "url": "https://en.wikipedia.org/wiki/Lion",
                        "license": "https://en.wikipedia.org/wiki/Wikipedia:Text_of_Creative_Commons_Attribution-ShareAlike_3.0_Unported_License"
                    }
                },
                "resultScore": 1234.5
            }]
        }"#;
        assert_eq!(
            pick(json),
            Some("https://en.wikipedia.org/wiki/Lion".to_string())
        );
    }

    #[test]
    fn falls_back_to_entity_url_then_name() {
        let with_url = r#"{"itemListElement":[{"result":{"name":"Acme","url":"http://acme.example"}}]}"#;
        assert_eq!(pick(with_url), Some("http://acme.example".to_string()));

        let name_only = r#"{"itemListElement":[{"result":{"name":"Acme"}}]}"#;
        assert_eq!(pick(name_only), Some("Acme".to_string()));
    }

    #[test]
    fn only_first_item_is_considered() {
        let json = r#"{"itemListElement":[
            {"result":{"name":"First"}},
            {"result":{"name":"Second","url":"http://second.example"}}
        ]}"#;
        assert_eq!(pick(json), Some("First".to_string()));
    }

    #[test]
    fn empty_results_are_no_match() {
        assert_eq!(pick(r#"{"@type":"ItemList","itemListElement":[]}"#), None);
        assert_eq!(pick(r#"{}"#), None);
        assert_eq!(pick(r#"{"itemListElement":[{"result":{}}]}"#), None);
    }

    #[test]
    fn search_url_encodes_term_and_key() {
        let client = KnowledgeGraphClient::new("k&y".to_string(), Duration::from_secs(1)).unwrap();
        assert_eq!(
            client.search_url("grey wolf"),
            "https://kgsearch.googleapis.com/v1/entities:search?query=grey%20wolf&key=k%26y&limit=1"
        );
    }

    #[test]
    fn builds_with_configured_timeout() {
        assert!(KnowledgeGraphClient::new("key".to_string(), Duration::from_secs(3)).is_ok());
        assert!(KnowledgeGraphClient::new("key".to_string(), Duration::from_millis(1)).is_ok());
    }

    #[tokio::test]
    async fn blank_query_skips_the_network() {
        let client = KnowledgeGraphClient::new("key".to_string(), Duration::from_secs(1)).unwrap();
        assert_eq!(client.resolve("").await.unwrap(), None);
        assert_eq!(client.resolve("   ").await.unwrap(), None);
    }
}
