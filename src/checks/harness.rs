//! Per-surface checks against the translation service
//!
//! Every check issues one request, times it, validates the status and the
//! response shape, and returns a [`CheckResult`]. Checks never return an
//! error: transport and parse failures become failed results.

use anyhow::Result;
use serde_json::{json, Value};
use tracing::{debug, info};

use super::endpoints::{self, deepl_language, hcfy_language, Endpoint};
use super::metrics::per_item_average;
use crate::config::HarnessConfig;
use crate::http::{HttpClient, HttpError};
use crate::models::{Check, CheckKind, CheckResult, LangPair};

/// Status, timing and parsed body of one round-trip
#[derive(Debug)]
struct Exchange {
    status_code: u16,
    elapsed_ms: f64,
    /// Parsed body; only present for a 200 response. Endpoints that may
    /// answer with plain text carry it as a JSON string.
    body: Option<Value>,
}

impl Exchange {
    fn is_ok(&self) -> bool {
        self.status_code == 200
    }

    fn extract(&self, endpoint: &Endpoint) -> Value {
        self.body
            .as_ref()
            .map(|body| endpoint.extract(body))
            .unwrap_or(Value::Null)
    }
}

/// Harness bound to one service instance.
///
/// Owns the HTTP client for its whole lifetime. Dropping the harness drops
/// the client and its pooled connections; there is no other cleanup.
pub struct Harness {
    pub(super) client: HttpClient,
    pub(super) token: Option<String>,
}

impl Harness {
    /// Create a harness for `base_url`; an empty token means unauthenticated
    pub fn new(base_url: &str, token: Option<&str>, timeout_secs: u64) -> Result<Self> {
        let client = HttpClient::new(base_url, timeout_secs)?;
        Ok(Self {
            client,
            token: token.filter(|t| !t.is_empty()).map(str::to_string),
        })
    }

    pub fn from_config(config: &HarnessConfig) -> Result<Self> {
        Self::new(
            &config.base_url,
            config.api_token.as_deref(),
            config.timeout_secs,
        )
    }

    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub(super) fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Run one planned check
    pub async fn run(&self, check: &Check) -> CheckResult {
        info!("Running {}", check.name());
        match check {
            Check::Health => self.health().await,
            Check::Version => self.version().await,
            Check::Heartbeat => self.heartbeat().await,
            Check::LbHeartbeat => self.lb_heartbeat().await,
            Check::Languages => self.languages().await,
            Check::Translate { text, langs } => self.translate(text, langs).await,
            Check::TranslateBatch { texts, langs } => self.translate_batch(texts, langs).await,
            Check::GoogleCompat { text, langs } => self.google_compat(text, langs).await,
            Check::ImmePlugin { texts, langs } => self.imme_plugin(texts, langs).await,
            Check::KissPlugin { text, langs } => self.kiss_plugin(text, langs).await,
            Check::DeeplPlugin { texts, langs } => self.deepl_plugin(texts, langs).await,
            Check::HcfyPlugin { text, langs } => self.hcfy_plugin(text, langs).await,
            Check::Benchmark { count } => self.benchmark(*count).await,
        }
    }

    async fn exchange(
        &self,
        endpoint: &Endpoint,
        payload: Option<Value>,
    ) -> Result<Exchange, HttpError> {
        let mut request = endpoint.request(self.token());
        if let Some(payload) = payload {
            request = request.json(payload);
        }

        let response = self.client.send(request).await?;
        let body = if !response.is_ok() {
            debug!("{} returned {}: {}", endpoint.path, response.status_code, response.body);
            None
        } else if endpoint.json_body {
            Some(response.json()?)
        } else {
            Some(response.json().unwrap_or_else(|_| Value::String(response.body.clone())))
        };

        Ok(Exchange {
            status_code: response.status_code,
            elapsed_ms: response.elapsed_ms,
            body,
        })
    }

    /// Judge an exchange: success means status 200
    fn judge(kind: CheckKind, name: String, exchange: &Exchange, message: String) -> CheckResult {
        let result = if exchange.is_ok() {
            CheckResult::pass(kind, message)
        } else {
            CheckResult::fail(kind, message)
        };
        result.named(name).with_status(exchange.status_code)
    }

    fn errored(kind: CheckKind, name: String, error: HttpError) -> CheckResult {
        CheckResult::fail(kind, format!("error: {error}")).named(name)
    }

    async fn plain_get(&self, kind: CheckKind, endpoint: &Endpoint) -> CheckResult {
        let name = kind.name().to_string();
        match self.exchange(endpoint, None).await {
            Ok(exchange) => {
                let message = format!("status: {}", exchange.status_code);
                let mut result = Self::judge(kind, name, &exchange, message);
                if let Some(body) = &exchange.body {
                    result = result.with_sample(endpoint.extract(body));
                }
                result
            }
            Err(e) => Self::errored(kind, name, e),
        }
    }

    /// GET /health
    pub async fn health(&self) -> CheckResult {
        self.plain_get(CheckKind::Health, &endpoints::HEALTH).await
    }

    /// GET /version
    pub async fn version(&self) -> CheckResult {
        self.plain_get(CheckKind::Version, &endpoints::VERSION).await
    }

    /// GET /__heartbeat__; any 200 body is accepted
    pub async fn heartbeat(&self) -> CheckResult {
        self.plain_get(CheckKind::Heartbeat, &endpoints::HEARTBEAT).await
    }

    /// GET /__lbheartbeat__; any 200 body is accepted
    pub async fn lb_heartbeat(&self) -> CheckResult {
        self.plain_get(CheckKind::LbHeartbeat, &endpoints::LB_HEARTBEAT).await
    }

    /// GET /languages
    pub async fn languages(&self) -> CheckResult {
        let kind = CheckKind::Languages;
        let name = kind.name().to_string();
        match self.exchange(&endpoints::LANGUAGES, None).await {
            Ok(exchange) => {
                let count = exchange
                    .extract(&endpoints::LANGUAGES)
                    .as_array()
                    .map_or(0, Vec::len);
                let message = format!("status: {}, languages: {count}", exchange.status_code);
                let mut result = Self::judge(kind, name, &exchange, message);
                if let Some(body) = exchange.body {
                    result = result.with_sample(body);
                }
                result
            }
            Err(e) => Self::errored(kind, name, e),
        }
    }

    /// POST /translate with `{from, to, text}`
    pub async fn translate(&self, text: &str, langs: &LangPair) -> CheckResult {
        let kind = CheckKind::Translate;
        let name = format!("{} ({langs})", kind.name());
        let payload = json!({"from": langs.from, "to": langs.to, "text": text});
        self.timed_translation(kind, name, &endpoints::TRANSLATE, payload, json!(text))
            .await
    }

    /// POST /translate/batch with `{from, to, texts}`
    pub async fn translate_batch(&self, texts: &[String], langs: &LangPair) -> CheckResult {
        let kind = CheckKind::TranslateBatch;
        let name = format!("{} ({langs})", kind.name());
        let payload = json!({"from": langs.from, "to": langs.to, "texts": texts});

        match self.exchange(&endpoints::TRANSLATE_BATCH, Some(payload)).await {
            Ok(exchange) => {
                let average = per_item_average(exchange.elapsed_ms, texts.len());
                let message = format!(
                    "status: {}, texts: {}, total: {:.2}ms, average: {:.2}ms",
                    exchange.status_code,
                    texts.len(),
                    exchange.elapsed_ms,
                    average
                );
                Self::judge(kind, name, &exchange, message)
                    .with_elapsed(exchange.elapsed_ms)
                    .with_sample(json!({
                        "source": texts,
                        "translation": exchange.extract(&endpoints::TRANSLATE_BATCH),
                        "average_ms": average,
                    }))
            }
            Err(e) => Self::errored(kind, name, e),
        }
    }

    /// POST /language/translate/v2 with `{q, source, target, format}`
    pub async fn google_compat(&self, text: &str, langs: &LangPair) -> CheckResult {
        let kind = CheckKind::GoogleCompat;
        let name = format!("{} ({langs})", kind.name());
        let payload = json!({
            "q": text,
            "source": langs.from,
            "target": langs.to,
            "format": "text",
        });
        self.timed_translation(kind, name, &endpoints::GOOGLE_COMPAT, payload, json!(text))
            .await
    }

    /// POST /imme with `{from, to, trans}`, token in the query string
    pub async fn imme_plugin(&self, texts: &[String], langs: &LangPair) -> CheckResult {
        let kind = CheckKind::ImmePlugin;
        let name = format!("{} ({langs})", kind.name());
        let payload = json!({"from": langs.from, "to": langs.to, "trans": texts});

        match self.exchange(&endpoints::IMME, Some(payload)).await {
            Ok(exchange) => {
                let message = format!(
                    "status: {}, texts: {}, elapsed: {:.2}ms",
                    exchange.status_code,
                    texts.len(),
                    exchange.elapsed_ms
                );
                Self::judge(kind, name, &exchange, message)
                    .with_elapsed(exchange.elapsed_ms)
                    .with_sample(json!({
                        "source": texts,
                        "translation": exchange.extract(&endpoints::IMME),
                    }))
            }
            Err(e) => Self::errored(kind, name, e),
        }
    }

    /// POST /kiss with `{from, to, text}`, token in the `KEY` header
    pub async fn kiss_plugin(&self, text: &str, langs: &LangPair) -> CheckResult {
        let kind = CheckKind::KissPlugin;
        let name = format!("{} ({langs})", kind.name());
        let payload = json!({"from": langs.from, "to": langs.to, "text": text});
        self.timed_translation(kind, name, &endpoints::KISS, payload, json!(text))
            .await
    }

    /// POST /deepl with `{text: array, source_lang, target_lang}` in DeepL notation
    pub async fn deepl_plugin(&self, texts: &[String], langs: &LangPair) -> CheckResult {
        let kind = CheckKind::DeeplPlugin;
        let name = format!("{} ({langs})", kind.name());
        let payload = json!({
            "text": texts,
            "source_lang": deepl_language(&langs.from),
            "target_lang": deepl_language(&langs.to),
        });
        self.timed_translation(kind, name, &endpoints::DEEPL, payload, json!(texts))
            .await
    }

    /// POST /hcfy with `{name, text, source, destination}` using extension language names
    pub async fn hcfy_plugin(&self, text: &str, langs: &LangPair) -> CheckResult {
        let kind = CheckKind::HcfyPlugin;
        let name = format!("{} ({langs})", kind.name());
        let payload = json!({
            "name": "mtran-harness",
            "text": text,
            "source": hcfy_language(&langs.from),
            "destination": [hcfy_language(&langs.to), hcfy_language(&langs.from)],
        });
        self.timed_translation(kind, name, &endpoints::HCFY, payload, json!(text))
            .await
    }

    async fn timed_translation(
        &self,
        kind: CheckKind,
        name: String,
        endpoint: &Endpoint,
        payload: Value,
        source: Value,
    ) -> CheckResult {
        match self.exchange(endpoint, Some(payload)).await {
            Ok(exchange) => {
                let message = format!(
                    "status: {}, elapsed: {:.2}ms",
                    exchange.status_code, exchange.elapsed_ms
                );
                Self::judge(kind, name, &exchange, message)
                    .with_elapsed(exchange.elapsed_ms)
                    .with_sample(json!({
                        "source": source,
                        "translation": exchange.extract(endpoint),
                    }))
            }
            Err(e) => Self::errored(kind, name, e),
        }
    }
}
