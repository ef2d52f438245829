//! HTTP client for the Scryfall API.
//!
//! All lookups share one pacing contract: after every request the client
//! sleeps out the inter-request delay before it can be used again, whatever
//! the outcome. Scryfall asks clients to stay under ~10 requests per second.

use std::time::Duration;

use crate::error::{Error, Result};
use crate::scryfall::{Card, SearchList};

pub const API_BASE: &str = "https://api.scryfall.com";

/// Minimum delay between consecutive requests.
pub const REQUEST_PACING: Duration = Duration::from_millis(120);

const LOOKUP_TIMEOUT: Duration = Duration::from_secs(20);
const IMAGE_TIMEOUT: Duration = Duration::from_secs(60);
const USER_AGENT: &str = "DeckFetch/0.1";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupMode {
    Exact,
    Fuzzy,
}

impl LookupMode {
    pub fn param(&self) -> &'static str {
        match self {
            LookupMode::Exact => "exact",
            LookupMode::Fuzzy => "fuzzy",
        }
    }
}

/// One step of the name-resolution fallback chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategyStep {
    pub mode: LookupMode,
    pub lang: Option<String>,
}

impl StrategyStep {
    /// Query-string form of the step, reported in the summary CSV.
    pub fn tag(&self, name: &str) -> String {
        match &self.lang {
            Some(lang) => format!("{}={}&lang={}", self.mode.param(), name, lang),
            None => format!("{}={}", self.mode.param(), name),
        }
    }
}

/// Fixed lookup order: exact before fuzzy, language-constrained before
/// unconstrained.
pub fn strategy_steps(lang: Option<&str>) -> Vec<StrategyStep> {
    let mut steps = Vec::with_capacity(4);
    if let Some(lang) = lang {
        steps.push(StrategyStep {
            mode: LookupMode::Exact,
            lang: Some(lang.to_string()),
        });
    }
    steps.push(StrategyStep {
        mode: LookupMode::Exact,
        lang: None,
    });
    if let Some(lang) = lang {
        steps.push(StrategyStep {
            mode: LookupMode::Fuzzy,
            lang: Some(lang.to_string()),
        });
    }
    steps.push(StrategyStep {
        mode: LookupMode::Fuzzy,
        lang: None,
    });
    steps
}

pub struct ScryfallClient {
    http: reqwest::Client,
    base_url: String,
    pacing: Duration,
}

impl ScryfallClient {
    pub fn new() -> Self {
        Self::with_base_url(API_BASE, REQUEST_PACING)
    }

    /// Client against an alternative endpoint, used by the test suite to
    /// point at a mock server and shrink the pacing delay.
    pub fn with_base_url(base_url: &str, pacing: Duration) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            pacing,
        }
    }

    pub fn pacing(&self) -> Duration {
        self.pacing
    }

    /// Sleep out the inter-request pacing window.
    pub async fn pace(&self) {
        tokio::time::sleep(self.pacing).await;
    }

    /// Named-card lookup, exact or fuzzy, optionally constrained to a
    /// language. `Ok(None)` means Scryfall had no match (404, or a 200
    /// whose object tag is not "card").
    pub async fn fetch_named(
        &self,
        mode: LookupMode,
        name: &str,
        lang: Option<&str>,
    ) -> Result<Option<Card>> {
        let url = format!("{}/cards/named", self.base_url);
        let mut params: Vec<(&str, &str)> = vec![(mode.param(), name)];
        if let Some(lang) = lang {
            params.push(("lang", lang));
        }
        let result = self.get_card(&url, &params).await;
        self.pace().await;
        result
    }

    pub async fn fetch_exact(&self, name: &str, lang: Option<&str>) -> Result<Option<Card>> {
        self.fetch_named(LookupMode::Exact, name, lang).await
    }

    pub async fn fetch_fuzzy(&self, name: &str, lang: Option<&str>) -> Result<Option<Card>> {
        self.fetch_named(LookupMode::Fuzzy, name, lang).await
    }

    /// Most recently released print of the given card identity in the given
    /// language, or `Ok(None)` when no such print exists.
    pub async fn search_prints_by_identity(
        &self,
        oracle_id: &str,
        lang: &str,
    ) -> Result<Option<Card>> {
        let url = format!("{}/cards/search", self.base_url);
        let query = format!("oracleid:{} lang:{}", oracle_id, lang);
        let params = [
            ("q", query.as_str()),
            ("order", "released"),
            ("unique", "prints"),
        ];
        let result = self.get_print_list(&url, &params).await;
        self.pace().await;
        result
    }

    /// Fetch raw image bytes. Image transfers get a longer timeout than
    /// metadata lookups and are not paced; the flows pace per card name.
    pub async fn download_image(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .http
            .get(url)
            .header("User-Agent", USER_AGENT)
            .timeout(IMAGE_TIMEOUT)
            .send()
            .await?;
        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(Error::UnexpectedStatus {
                status,
                url: url.to_string(),
            });
        }
        Ok(response.bytes().await?.to_vec())
    }

    async fn get_card(&self, url: &str, params: &[(&str, &str)]) -> Result<Option<Card>> {
        let Some(body) = self.get_body(url, params).await? else {
            return Ok(None);
        };
        let value: serde_json::Value = serde_json::from_str(&body)?;
        if value.get("object").and_then(|v| v.as_str()) != Some("card") {
            return Ok(None);
        }
        Ok(Some(serde_json::from_value(value)?))
    }

    async fn get_print_list(&self, url: &str, params: &[(&str, &str)]) -> Result<Option<Card>> {
        let Some(body) = self.get_body(url, params).await? else {
            return Ok(None);
        };
        let list: SearchList = serde_json::from_str(&body)?;
        if list.object != "list" {
            return Ok(None);
        }
        // order=released puts the newest print first
        Ok(list.data.into_iter().next())
    }

    /// GET with the standard headers and lookup timeout. Only a 404 maps to
    /// `Ok(None)`; any other non-2xx status is a request failure.
    async fn get_body(&self, url: &str, params: &[(&str, &str)]) -> Result<Option<String>> {
        let response = self
            .http
            .get(url)
            .query(params)
            .header("User-Agent", USER_AGENT)
            .timeout(LOOKUP_TIMEOUT)
            .send()
            .await?;
        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(Error::UnexpectedStatus {
                status,
                url: url.to_string(),
            });
        }
        Ok(Some(response.text().await?))
    }
}

impl Default for ScryfallClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve a card name by walking the fallback chain, stopping at the first
/// hit. Request failures are logged and treated like a miss for that step;
/// `None` means every step came up empty.
pub async fn resolve_card(
    client: &ScryfallClient,
    name: &str,
    lang: Option<&str>,
) -> Option<(Card, String)> {
    for step in strategy_steps(lang) {
        match client
            .fetch_named(step.mode, name, step.lang.as_deref())
            .await
        {
            Ok(Some(card)) => return Some((card, step.tag(name))),
            Ok(None) => {}
            Err(e) => eprintln!("[{}] Lookup failed ({}): {}", name, step.tag(name), e),
        }
    }
    None
}
