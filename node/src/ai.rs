//! Client for the external AI service (price estimates and chat).
//!
//! Talks to any OpenAI-compatible chat completions endpoint. Every failure
//! path is soft: callers degrade to the offline estimator or the generic chat
//! failure reply, so nothing here surfaces as a user-facing error.

use anyhow::{anyhow, Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use mkrm_common::chat::{ChatRole, Transcript};
use mkrm_common::pricing::{EstimateRequest, EstimateSource, PriceEstimate};

const ESTIMATOR_SYSTEM_PROMPT: &str = "You are a rice price estimator for MKRM, an Indian rice brand. \
Given a rice type, a quantity in kilograms and optionally a region and season, estimate a fair market price. \
Return ONLY a JSON object of the exact shape \
{\"total_price\": number, \"price_per_unit\": number, \"justification\": string} \
where prices are in INR and price_per_unit is per quintal. No markdown fences, no commentary.";

const CHAT_SYSTEM_PROMPT: &str = "You are the MKRM rice storefront assistant. \
Answer questions about MKRM rice varieties, cooking, storage, orders and batch traceability. \
Be concise and friendly. If a question is unrelated to rice or the store, politely steer back.";

#[derive(Debug, Clone)]
pub struct AiConfig {
    pub base_url: String,
    pub model: String,
    pub api_key: String,
}

pub struct AiClient {
    client: Client,
    config: AiConfig,
}

#[derive(Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<WireMessage>,
    temperature: f64,
}

#[derive(Serialize, Deserialize)]
struct WireMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: WireMessage,
}

/// Structured payload the estimator model is asked to return.
#[derive(Debug, PartialEq, Deserialize)]
pub struct EstimatePayload {
    pub total_price: f64,
    pub price_per_unit: f64,
    pub justification: String,
}

impl AiClient {
    pub fn new(config: AiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Ask the model for a price estimate. Any failure (network, HTTP status,
    /// malformed payload) is an `Err` the caller turns into a fallback.
    pub async fn estimate(&self, req: &EstimateRequest) -> Result<PriceEstimate> {
        let user = format!(
            "Rice type: {}\nQuantity: {} kg\nRegion: {}\nSeason: {}",
            req.rice_type,
            req.quantity_kg,
            req.region.as_deref().unwrap_or("unspecified"),
            req.season.as_deref().unwrap_or("unspecified"),
        );
        let content = self
            .complete(vec![
                WireMessage {
                    role: "system".into(),
                    content: ESTIMATOR_SYSTEM_PROMPT.into(),
                },
                WireMessage {
                    role: "user".into(),
                    content: user,
                },
            ])
            .await?;
        let payload = parse_estimate_payload(&content)?;
        Ok(PriceEstimate {
            total_price_inr: payload.total_price,
            price_per_quintal_inr: payload.price_per_unit,
            justification: payload.justification,
            source: EstimateSource::Ai,
        })
    }

    /// Send the transcript to the assistant and return its reply text.
    pub async fn chat(&self, transcript: &Transcript) -> Result<String> {
        let mut messages = vec![WireMessage {
            role: "system".into(),
            content: CHAT_SYSTEM_PROMPT.into(),
        }];
        messages.extend(transcript.messages.iter().filter(|m| !m.body.is_empty()).map(
            |m| WireMessage {
                role: match m.role {
                    ChatRole::User => "user".into(),
                    ChatRole::Assistant => "assistant".into(),
                },
                content: m.body.clone(),
            },
        ));
        self.complete(messages).await
    }

    async fn complete(&self, messages: Vec<WireMessage>) -> Result<String> {
        let url = format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );
        let request = ChatCompletionRequest {
            model: self.config.model.clone(),
            messages,
            temperature: 0.2,
        };
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .context("AI request failed")?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("AI endpoint returned {status}: {body}"));
        }
        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .context("AI response was not valid JSON")?;
        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| anyhow!("AI response contained no choices"))
    }
}

/// Strip a markdown code fence wrapped around a payload. Models routinely
/// return ```json ... ``` despite being told not to.
pub fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the language tag line, then the closing fence.
    let rest = match rest.find('\n') {
        Some(i) => &rest[i + 1..],
        None => rest,
    };
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

/// Parse the estimator's structured reply, tolerating fence wrapping.
pub fn parse_estimate_payload(raw: &str) -> Result<EstimatePayload> {
    serde_json::from_str(strip_code_fences(raw)).context("estimator returned malformed JSON")
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAYLOAD: &str =
        r#"{"total_price": 5500.0, "price_per_unit": 5500.0, "justification": "market rate"}"#;

    #[test]
    fn bare_json_passes_through() {
        assert_eq!(strip_code_fences(PAYLOAD), PAYLOAD);
    }

    #[test]
    fn strips_json_fence() {
        let wrapped = format!("```json\n{PAYLOAD}\n```");
        assert_eq!(strip_code_fences(&wrapped), PAYLOAD);
    }

    #[test]
    fn strips_anonymous_fence() {
        let wrapped = format!("```\n{PAYLOAD}\n```");
        assert_eq!(strip_code_fences(&wrapped), PAYLOAD);
    }

    #[test]
    fn parses_fenced_payload() {
        let wrapped = format!("```json\n{PAYLOAD}\n```");
        let payload = parse_estimate_payload(&wrapped).unwrap();
        assert_eq!(payload.total_price, 5500.0);
        assert_eq!(payload.price_per_unit, 5500.0);
        assert_eq!(payload.justification, "market rate");
    }

    #[test]
    fn malformed_payload_is_an_error() {
        assert!(parse_estimate_payload("not json at all").is_err());
        assert!(parse_estimate_payload(r#"{"total_price": "a lot"}"#).is_err());
        assert!(parse_estimate_payload("").is_err());
    }
}
