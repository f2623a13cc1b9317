//! Test helpers around a wiremock server standing in for the service

use serde_json::Value;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

/// Answer `http_method route` with a JSON body on every call
pub async fn mock_json(server: &MockServer, http_method: &str, route: &str, status: u16, body: Value) {
    Mock::given(method(http_method))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

/// Answer `http_method route` with a JSON body for the next `times` calls only.
///
/// Mocks are tried in mount order, so mounting several of these scripts a
/// sequence of responses.
pub async fn mock_json_times(
    server: &MockServer,
    http_method: &str,
    route: &str,
    status: u16,
    body: Value,
    times: u64,
) {
    Mock::given(method(http_method))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .up_to_n_times(times)
        .mount(server)
        .await;
}

pub async fn mock_text(server: &MockServer, http_method: &str, route: &str, status: u16, body: &str) {
    Mock::given(method(http_method))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(server)
        .await;
}

/// Every request the server has seen, in arrival order
pub async fn requests(server: &MockServer) -> Vec<Request> {
    server.received_requests().await.unwrap_or_default()
}

/// Number of requests received on `route`
pub async fn hits(server: &MockServer, route: &str) -> usize {
    requests(server)
        .await
        .iter()
        .filter(|request| request.url.path() == route)
        .count()
}

/// URL of a local port nothing listens on
pub fn unused_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let port = listener.local_addr().expect("local addr").port();
    format!("http://127.0.0.1:{port}")
}

/// Credential lookups on a recorded request
pub trait RecordedRequest {
    fn header_value(&self, name: &str) -> Option<&str>;
    fn query_value(&self, name: &str) -> Option<String>;
    fn has_credentials(&self) -> bool;
    fn json(&self) -> Value;
}

impl RecordedRequest for Request {
    fn header_value(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    fn query_value(&self, name: &str) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }

    fn has_credentials(&self) -> bool {
        self.header_value("authorization").is_some()
            || self.header_value("key").is_some()
            || self.query_value("token").is_some()
    }

    fn json(&self) -> Value {
        self.body_json().unwrap_or(Value::Null)
    }
}
