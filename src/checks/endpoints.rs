//! Endpoint descriptors for every surface of the service
//!
//! Each descriptor pins the method, path, credential placement and the JSON
//! pointer of the value a check reports back.

use reqwest::Method;
use serde_json::Value;

use crate::http::HttpRequest;
use crate::models::{AuthPlacement, CheckKind};

/// Static description of one endpoint surface
#[derive(Clone, Debug)]
pub struct Endpoint {
    pub method: Method,
    pub path: &'static str,
    pub auth: AuthPlacement,
    /// JSON pointer of the reported value; empty means the whole body
    pub extract: &'static str,
    /// Whether a 200 response must carry a JSON body
    pub json_body: bool,
}

pub static HEALTH: Endpoint = Endpoint {
    method: Method::GET,
    path: "/health",
    auth: AuthPlacement::None,
    extract: "",
    json_body: true,
};

pub static VERSION: Endpoint = Endpoint {
    method: Method::GET,
    path: "/version",
    auth: AuthPlacement::None,
    extract: "",
    json_body: true,
};

pub static HEARTBEAT: Endpoint = Endpoint {
    method: Method::GET,
    path: "/__heartbeat__",
    auth: AuthPlacement::None,
    extract: "",
    json_body: false,
};

pub static LB_HEARTBEAT: Endpoint = Endpoint {
    method: Method::GET,
    path: "/__lbheartbeat__",
    auth: AuthPlacement::None,
    extract: "",
    json_body: false,
};

pub static LANGUAGES: Endpoint = Endpoint {
    method: Method::GET,
    path: "/languages",
    auth: AuthPlacement::Bearer,
    extract: "/languages",
    json_body: true,
};

pub static TRANSLATE: Endpoint = Endpoint {
    method: Method::POST,
    path: "/translate",
    auth: AuthPlacement::Bearer,
    extract: "/result",
    json_body: true,
};

pub static TRANSLATE_BATCH: Endpoint = Endpoint {
    method: Method::POST,
    path: "/translate/batch",
    auth: AuthPlacement::Bearer,
    extract: "/results",
    json_body: true,
};

pub static GOOGLE_COMPAT: Endpoint = Endpoint {
    method: Method::POST,
    path: "/language/translate/v2",
    auth: AuthPlacement::Bearer,
    extract: "/data/translations/0/translatedText",
    json_body: true,
};

pub static IMME: Endpoint = Endpoint {
    method: Method::POST,
    path: "/imme",
    auth: AuthPlacement::Query("token"),
    extract: "/trans",
    json_body: true,
};

pub static KISS: Endpoint = Endpoint {
    method: Method::POST,
    path: "/kiss",
    auth: AuthPlacement::Header("KEY"),
    extract: "/text",
    json_body: true,
};

/// DeepL clients authenticate with their own scheme; the server also takes
/// a bearer token or `?token=`.
pub static DEEPL: Endpoint = Endpoint {
    method: Method::POST,
    path: "/deepl",
    auth: AuthPlacement::Scheme("DeepL-Auth-Key"),
    extract: "/translations",
    json_body: true,
};

pub static HCFY: Endpoint = Endpoint {
    method: Method::POST,
    path: "/hcfy",
    auth: AuthPlacement::Query("token"),
    extract: "/result",
    json_body: true,
};

/// Endpoint exercised by a surface; the benchmark reuses single translate
pub fn for_kind(kind: CheckKind) -> &'static Endpoint {
    match kind {
        CheckKind::Health => &HEALTH,
        CheckKind::Version => &VERSION,
        CheckKind::Heartbeat => &HEARTBEAT,
        CheckKind::LbHeartbeat => &LB_HEARTBEAT,
        CheckKind::Languages => &LANGUAGES,
        CheckKind::Translate | CheckKind::Benchmark => &TRANSLATE,
        CheckKind::TranslateBatch => &TRANSLATE_BATCH,
        CheckKind::GoogleCompat => &GOOGLE_COMPAT,
        CheckKind::ImmePlugin => &IMME,
        CheckKind::KissPlugin => &KISS,
        CheckKind::DeeplPlugin => &DEEPL,
        CheckKind::HcfyPlugin => &HCFY,
    }
}

/// Language code in DeepL notation (`EN`, `ZH`, `ZH-TW`)
pub fn deepl_language(code: &str) -> String {
    match code {
        "zh-Hans" => "ZH".to_string(),
        "zh-Hant" | "zh-TW" => "ZH-TW".to_string(),
        "no" => "NB".to_string(),
        other => other.to_uppercase(),
    }
}

/// Language name as the Selection Translator extension sends it
pub fn hcfy_language(code: &str) -> &str {
    match code {
        "zh-Hans" | "zh-CN" => "中文(简体)",
        "zh-Hant" | "zh-TW" => "中文(繁体)",
        "en" => "英语",
        "ja" => "日语",
        "ko" => "韩语",
        "fr" => "法语",
        "de" => "德语",
        "es" => "西班牙语",
        "ru" => "俄语",
        other => other,
    }
}

impl Endpoint {
    /// Request for this endpoint with credentials in place
    pub fn request(&self, token: Option<&str>) -> HttpRequest {
        HttpRequest::new(self.method.clone(), self.path).authorize(self.auth, token)
    }

    /// Pull the reported value out of a response body.
    ///
    /// A missing field yields `Value::Null` rather than an error.
    pub fn extract(&self, body: &Value) -> Value {
        body.pointer(self.extract).cloned().unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_whole_body() {
        let body = json!({"status": "ok"});
        assert_eq!(HEALTH.extract(&body), body);
    }

    #[test]
    fn test_extract_google_nested() {
        let body = json!({"data": {"translations": [{"translatedText": "吉萨大金字塔"}]}});
        assert_eq!(GOOGLE_COMPAT.extract(&body), json!("吉萨大金字塔"));
    }

    #[test]
    fn test_extract_missing_field_is_null() {
        assert_eq!(TRANSLATE.extract(&json!({"other": 1})), Value::Null);
        assert_eq!(GOOGLE_COMPAT.extract(&json!({"data": {}})), Value::Null);
        assert_eq!(GOOGLE_COMPAT.extract(&json!({"data": {"translations": []}})), Value::Null);
    }

    #[test]
    fn test_unauthenticated_surfaces() {
        for endpoint in [&HEALTH, &VERSION, &HEARTBEAT, &LB_HEARTBEAT] {
            let req = endpoint.request(Some("secret"));
            assert!(req.headers.is_empty());
            assert!(req.query.is_empty());
        }
    }

    #[test]
    fn test_plugin_placements() {
        let imme = IMME.request(Some("secret"));
        assert!(imme.headers.is_empty());
        assert_eq!(imme.query, vec![("token".to_string(), "secret".to_string())]);

        let kiss = KISS.request(Some("secret"));
        assert!(kiss.query.is_empty());
        assert_eq!(kiss.headers, vec![("KEY".to_string(), "secret".to_string())]);

        let hcfy = HCFY.request(Some("secret"));
        assert!(hcfy.headers.is_empty());
        assert_eq!(hcfy.query, vec![("token".to_string(), "secret".to_string())]);

        let deepl = DEEPL.request(Some("secret"));
        assert!(deepl.query.is_empty());
        assert_eq!(
            deepl.headers,
            vec![("Authorization".to_string(), "DeepL-Auth-Key secret".to_string())]
        );
    }

    #[test]
    fn test_language_notations() {
        assert_eq!(deepl_language("en"), "EN");
        assert_eq!(deepl_language("zh-Hans"), "ZH");
        assert_eq!(deepl_language("zh-Hant"), "ZH-TW");
        assert_eq!(hcfy_language("zh-Hans"), "中文(简体)");
        assert_eq!(hcfy_language("en"), "英语");
        assert_eq!(hcfy_language("xx"), "xx");
    }

    #[test]
    fn test_surfaces_map_to_distinct_paths() {
        let mut paths: Vec<&str> = CheckKind::all()
            .into_iter()
            .filter(|k| *k != CheckKind::Benchmark)
            .map(|k| for_kind(k).path)
            .collect();
        let total = paths.len();
        paths.sort_unstable();
        paths.dedup();
        assert_eq!(paths.len(), total);
        assert_eq!(for_kind(CheckKind::Benchmark).path, "/translate");
    }
}
