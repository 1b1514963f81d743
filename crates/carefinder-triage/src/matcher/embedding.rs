//! Embedding-backed semantic matching against a TEI-compatible service.
//!
//! Talks to a Text Embeddings Inference HTTP endpoint (`POST {base}/embed`).
//! Service-value embeddings are cached for the life of the matcher; reason
//! embeddings are computed per call. Every failure path returns `Err` or
//! `Ok(None)` so the caller can fall back to keyword matching.

use std::collections::HashMap;

use tokio::sync::Mutex;

use carefinder_core::Facility;

use crate::error::TriageError;

/// Maximum number of texts per /embed call.
const BATCH_SIZE: usize = 64;

/// Minimum cosine similarity for a semantic match.
const SIMILARITY_THRESHOLD: f32 = 0.5;

/// Client for a TEI-compatible embedding endpoint.
pub struct EmbeddingMatcher {
    client: reqwest::Client,
    url: String,
    cache: Mutex<HashMap<String, Vec<f32>>>,
}

#[derive(serde::Serialize)]
struct EmbedRequest<'a> {
    inputs: &'a [&'a str],
}

impl EmbeddingMatcher {
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        EmbeddingMatcher {
            client: reqwest::Client::new(),
            url: format!("{}/embed", base_url.trim_end_matches('/')),
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Finds the facility service value most similar to the reason.
    ///
    /// Returns `Ok(Some(description))` when the best similarity clears the
    /// threshold, `Ok(None)` when nothing does (including a facility with no
    /// service values or an empty reason).
    ///
    /// # Errors
    ///
    /// Returns [`TriageError::Embedding`] if the endpoint fails or returns
    /// an unexpected payload.
    pub async fn best_match(
        &self,
        facility: &Facility,
        reason: &str,
    ) -> Result<Option<String>, TriageError> {
        let reason = reason.trim();
        if reason.is_empty() {
            return Ok(None);
        }

        let service_values: Vec<&str> = facility
            .services
            .iter()
            .flat_map(|cat| &cat.values)
            .map(|item| item.val.as_str())
            .filter(|val| !val.is_empty())
            .collect();
        if service_values.is_empty() {
            return Ok(None);
        }

        let reason_embedding = self
            .embed(&[reason])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| TriageError::Embedding("empty embedding response".to_string()))?;

        self.cache_missing(&service_values).await?;

        let cache = self.cache.lock().await;
        let mut best_similarity = 0.0f32;
        let mut best_service: Option<&str> = None;
        for val in &service_values {
            let Some(service_embedding) = cache.get(*val) else {
                continue;
            };
            let similarity = cosine_similarity(&reason_embedding, service_embedding);
            if similarity > best_similarity {
                best_similarity = similarity;
                best_service = Some(val);
            }
        }

        match best_service {
            Some(service) if best_similarity >= SIMILARITY_THRESHOLD => Ok(Some(format!(
                "{service} (similarity: {best_similarity:.2})"
            ))),
            _ => Ok(None),
        }
    }

    /// Embeds any service values not yet in the cache, in one batched pass.
    async fn cache_missing(&self, service_values: &[&str]) -> Result<(), TriageError> {
        let missing: Vec<&str> = {
            let cache = self.cache.lock().await;
            service_values
                .iter()
                .copied()
                .filter(|val| !cache.contains_key(*val))
                .collect()
        };
        if missing.is_empty() {
            return Ok(());
        }

        let embeddings = self.embed(&missing).await?;

        let mut cache = self.cache.lock().await;
        for (val, embedding) in missing.into_iter().zip(embeddings) {
            cache.insert(val.to_string(), embedding);
        }
        Ok(())
    }

    /// Generates embeddings for a batch of texts, chunked at [`BATCH_SIZE`].
    /// Returns one vector per input text, in order.
    async fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, TriageError> {
        let mut all_embeddings = Vec::with_capacity(texts.len());

        for chunk in texts.chunks(BATCH_SIZE) {
            let request = EmbedRequest { inputs: chunk };
            let response = self
                .client
                .post(&self.url)
                .json(&request)
                .send()
                .await
                .map_err(|e| TriageError::Embedding(format!("embed request failed: {e}")))?;

            if !response.status().is_success() {
                return Err(TriageError::Embedding(format!(
                    "embedding endpoint returned status {}",
                    response.status()
                )));
            }

            let embeddings: Vec<Vec<f32>> = response
                .json()
                .await
                .map_err(|e| TriageError::Embedding(format!("embed response parse error: {e}")))?;

            if embeddings.len() != chunk.len() {
                return Err(TriageError::Embedding(format!(
                    "endpoint returned {} embeddings for {} inputs",
                    embeddings.len(),
                    chunk.len()
                )));
            }

            all_embeddings.extend(embeddings);
        }

        Ok(all_embeddings)
    }
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a > 0.0 && norm_b > 0.0 {
        dot / (norm_a * norm_b)
    } else {
        0.0
    }
}
