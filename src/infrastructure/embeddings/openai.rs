use crate::domain::error::DomainError;
use crate::domain::ports::embedding_port::{EmbeddingProvider, InputType};
use reqwest::Client;
use serde::{Deserialize, Serialize};

pub struct OpenAiProvider {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    dimension: Option<usize>,
}

#[derive(Serialize)]
struct OpenAiRequest {
    input: Vec<String>,
    model: String,
}

#[derive(Deserialize)]
struct OpenAiResponse {
    data: Vec<OpenAiEmbedding>,
}

#[derive(Deserialize)]
struct OpenAiEmbedding {
    embedding: Vec<f32>,
}

impl OpenAiProvider {
    /// `dimension` overrides the width reported for the model. Without it,
    /// known OpenAI models report their native width and any other model
    /// reports 0 (unknown).
    pub fn new(
        api_key: String,
        model: Option<String>,
        base_url: Option<String>,
        dimension: Option<usize>,
    ) -> Self {
        Self {
            client: Client::new(),
            api_key,
            model: model.unwrap_or_else(|| "text-embedding-3-small".to_string()),
            base_url: base_url.unwrap_or_else(|| "https://api.openai.com".to_string()),
            dimension,
        }
    }

    fn model_dimension(model: &str) -> Option<usize> {
        match model {
            "text-embedding-3-small" | "text-embedding-ada-002" => Some(1536),
            "text-embedding-3-large" => Some(3072),
            _ => None,
        }
    }
}

#[async_trait::async_trait]
impl EmbeddingProvider for OpenAiProvider {
    async fn embed(&self, texts: &[String], _input_type: InputType) -> Result<Vec<Vec<f32>>, DomainError> {
        let url = format!("{}/v1/embeddings", self.base_url.trim_end_matches('/'));
        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&OpenAiRequest {
                input: texts.to_vec(),
                model: self.model.clone(),
            })
            .send()
            .await
            .map_err(|e| DomainError::Embedding(format!("OpenAI API error: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(DomainError::Embedding(format!("OpenAI API {status}: {body}")));
        }

        let result: OpenAiResponse = resp
            .json()
            .await
            .map_err(|e| DomainError::Serialization(format!("Parse error: {e}")))?;
        Ok(result.data.into_iter().map(|d| d.embedding).collect())
    }

    fn dimension(&self) -> usize {
        self.dimension
            .or_else(|| Self::model_dimension(&self.model))
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_model_width() {
        let p = OpenAiProvider::new(String::new(), None, None, None);
        assert_eq!(p.dimension(), 1536);
        let p = OpenAiProvider::new(String::new(), Some("text-embedding-3-large".into()), None, None);
        assert_eq!(p.dimension(), 3072);
    }

    #[test]
    fn test_unknown_model_width() {
        let p = OpenAiProvider::new(String::new(), Some("all-minilm".into()), None, None);
        assert_eq!(p.dimension(), 0);
    }

    #[test]
    fn test_explicit_width_wins() {
        let p = OpenAiProvider::new(String::new(), Some("text-embedding-3-small".into()), None, Some(512));
        assert_eq!(p.dimension(), 512);
    }
}
