//! Azure Translator v3 provider.
//!
//! Speaks the `POST /translate?api-version=3.0&from=…&to=…` protocol with an
//! `Ocp-Apim-Subscription-Key` header (plus a region header for regional
//! resources). HTTP 429 maps to the distinct rate-limit condition; every
//! other non-success outcome is a plain failure.

use async_trait::async_trait;
use serde_json::{Value, json};

use super::oracle::{OracleError, Translator, validate_locale};

const DEFAULT_ENDPOINT: &str = "https://api.cognitive.microsofttranslator.com";
const REQUEST_TIMEOUT_SECS: u64 = 30;

pub struct AzureTranslator {
    api_key: String,
    region: Option<String>,
    client: reqwest::Client,
    base_url: String,
}

impl AzureTranslator {
    pub fn new(api_key: String, region: Option<String>) -> Result<Self, OracleError> {
        if api_key.trim().is_empty() {
            return Err(OracleError::Failed("API key is empty".to_string()));
        }
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| OracleError::Failed(format!("failed to create HTTP client: {}", e)))?;
        Ok(Self {
            api_key,
            region,
            client,
            base_url: DEFAULT_ENDPOINT.to_string(),
        })
    }

    /// Point the provider at a different endpoint (sovereign clouds, test
    /// servers).
    pub fn with_endpoint(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl std::fmt::Debug for AzureTranslator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AzureTranslator")
            .field("api_key", &"***")
            .field("region", &self.region)
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[async_trait]
impl Translator for AzureTranslator {
    async fn translate(
        &self,
        from: &str,
        to: &str,
        texts: &[String],
    ) -> Result<Vec<String>, OracleError> {
        validate_locale(from).map_err(OracleError::Failed)?;
        validate_locale(to).map_err(OracleError::Failed)?;
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let url = format!(
            "{}/translate?api-version=3.0&from={}&to={}",
            self.base_url, from, to
        );
        let body: Vec<Value> = texts.iter().map(|t| json!({ "Text": t })).collect();

        let mut request = self
            .client
            .post(&url)
            .header("Ocp-Apim-Subscription-Key", &self.api_key)
            .json(&body);
        if let Some(region) = &self.region {
            request = request.header("Ocp-Apim-Subscription-Region", region);
        }

        let response = request.send().await?;
        let status = response.status();
        if status.as_u16() == 429 {
            return Err(OracleError::RateLimited);
        }
        if !status.is_success() {
            let detail = response
                .text()
                .await
                .unwrap_or_else(|_| "no response body".to_string());
            return Err(OracleError::Failed(format!(
                "API error ({}): {}",
                status, detail
            )));
        }

        let items: Value = response
            .json()
            .await
            .map_err(|e| OracleError::Failed(format!("failed to parse API response: {}", e)))?;
        let items = items
            .as_array()
            .ok_or_else(|| OracleError::Failed("API response is not an array".to_string()))?;

        items
            .iter()
            .map(|item| {
                item["translations"][0]["text"]
                    .as_str()
                    .map(|s| s.to_string())
                    .ok_or_else(|| {
                        OracleError::Failed(
                            "API response item is missing 'translations[0].text'".to_string(),
                        )
                    })
            })
            .collect()
    }

    fn name(&self) -> &str {
        "azure"
    }
}
