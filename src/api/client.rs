use std::time::Duration;

use http::{HeaderMap, HeaderValue, header::AUTHORIZATION};
use reqwest::{Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::prelude::*;

/// Shared KonnectX REST client.
///
/// Every call takes a fixed fallback message. The caller sees the server's `message` when
/// there is one, and the fallback otherwise – including for transport errors, which keep
/// the underlying cause in the error chain.
#[derive(Clone)]
pub struct Client {
    inner: reqwest::Client,
    base_url: Url,
}

impl Client {
    #[instrument(skip_all, fields(base_url = %base_url))]
    pub fn new(base_url: Url, token: Option<&str>, timeout: Duration) -> Result<Self> {
        ensure!(!base_url.cannot_be_a_base(), "`{base_url}` cannot be used as an API base URL");
        let mut headers = HeaderMap::new();
        if let Some(token) = token {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
                .context("the API token is not a valid header value")?;
            value.set_sensitive(true);
            headers.append(AUTHORIZATION, value);
        } else {
            debug!("no API token, requests go unauthenticated");
        }
        let inner = reqwest::Client::builder()
            .user_agent("konnectx")
            .timeout(timeout)
            .default_headers(headers)
            .build()?;
        Ok(Self { inner, base_url })
    }

    /// Build the endpoint URL from path segments, escaping each of them.
    pub fn url(&self, segments: &[&str], query: &[(&str, &str)]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        url
    }

    pub fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        self.inner.request(method, self.url(segments, &[]))
    }

    pub fn request_with_query(
        &self,
        method: Method,
        segments: &[&str],
        query: &[(&str, &str)],
    ) -> RequestBuilder {
        self.inner.request(method, self.url(segments, query))
    }

    /// Send the request and return the JSON body, provided that the call succeeded.
    ///
    /// An empty body deserializes to [`Value::Null`].
    #[instrument(skip_all, level = Level::DEBUG)]
    pub async fn send(&self, request: RequestBuilder, fallback: &'static str) -> Result<Value> {
        let response = request.send().await.context(fallback)?;
        let status = response.status();
        let url = response.url().clone();
        let bytes = response.bytes().await.context(fallback)?;

        let body = if bytes.is_empty() {
            Value::Null
        } else {
            match serde_json::from_slice::<Value>(&bytes) {
                Ok(body) => body,
                Err(_) if !status.is_success() => Value::Null,
                Err(error) => return Err(error).context(fallback),
            }
        };
        debug!(%url, %status, %body, "received");

        if !status.is_success() {
            warn!(%url, %status, "request failed");
            bail!(error_message(&body, fallback));
        }
        if body.get("success").and_then(Value::as_bool) == Some(false) {
            warn!(%url, "the API reported a failure");
            bail!(error_message(&body, fallback));
        }
        Ok(body)
    }

    /// Send the request and deserialize the successful response body.
    pub async fn call<R: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        fallback: &'static str,
    ) -> Result<R> {
        let body = self.send(request, fallback).await?;
        serde_json::from_value(body).context(fallback)
    }
}

fn error_message(body: &Value, fallback: &str) -> String {
    body.get("message")
        .and_then(Value::as_str)
        .filter(|message| !message.trim().is_empty())
        .unwrap_or(fallback)
        .to_owned()
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::{
        Mock,
        MockServer,
        ResponseTemplate,
        matchers::{header, method, path, query_param},
    };

    use super::*;

    const FALLBACK: &str = "Failed to do the thing";

    fn client(server: &MockServer, token: Option<&str>) -> Result<Client> {
        Client::new(format!("{}/api", server.uri()).parse()?, token, Duration::from_secs(5))
    }

    #[test]
    fn url_escapes_segments() -> Result {
        let client = Client::new(
            "http://localhost:5000/api/".parse()?,
            None,
            Duration::from_secs(1),
        )?;
        assert_eq!(
            client.url(&["hotspots", "a/b", "stats"], &[("range", "daily")]).as_str(),
            "http://localhost:5000/api/hotspots/a%2Fb/stats?range=daily",
        );
        Ok(())
    }

    #[test]
    fn error_message_prefers_server_message() {
        assert_eq!(error_message(&json!({"message": "Nope"}), FALLBACK), "Nope");
        assert_eq!(error_message(&json!({"message": ""}), FALLBACK), FALLBACK);
        assert_eq!(error_message(&json!({"error": "Nope"}), FALLBACK), FALLBACK);
        assert_eq!(error_message(&Value::Null, FALLBACK), FALLBACK);
    }

    #[tokio::test]
    async fn sends_bearer_token_and_query() -> Result {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/things"))
            .and(query_param("page", "2"))
            .and(header("authorization", "Bearer secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"answer": 42})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client(&server, Some("secret"))?;
        let request = client.request_with_query(Method::GET, &["things"], &[("page", "2")]);
        let body = client.send(request, FALLBACK).await?;
        assert_eq!(body, json!({"answer": 42}));
        Ok(())
    }

    #[tokio::test]
    async fn server_message_on_error_status() -> Result {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({"message": "Hotspot not found"})),
            )
            .mount(&server)
            .await;

        let client = client(&server, None)?;
        let error = client.send(client.request(Method::GET, &["things"]), FALLBACK).await.unwrap_err();
        assert_eq!(error.to_string(), "Hotspot not found");
        Ok(())
    }

    #[tokio::test]
    async fn fallback_on_error_status_without_message() -> Result {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let client = client(&server, None)?;
        let error = client.send(client.request(Method::GET, &["things"]), FALLBACK).await.unwrap_err();
        assert_eq!(error.to_string(), FALLBACK);
        Ok(())
    }

    #[tokio::test]
    async fn unsuccessful_envelope_is_an_error() -> Result {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"success": false, "message": "Insufficient balance"})),
            )
            .mount(&server)
            .await;

        let client = client(&server, None)?;
        let error = client.send(client.request(Method::GET, &["things"]), FALLBACK).await.unwrap_err();
        assert_eq!(error.to_string(), "Insufficient balance");
        Ok(())
    }

    #[tokio::test]
    async fn transport_error_uses_fallback() -> Result {
        let port = std::net::TcpListener::bind("127.0.0.1:0")?.local_addr()?.port();
        let client = Client::new(
            format!("http://127.0.0.1:{port}/api").parse()?,
            None,
            Duration::from_secs(5),
        )?;

        let error = client.send(client.request(Method::GET, &["things"]), FALLBACK).await.unwrap_err();
        assert_eq!(error.to_string(), FALLBACK);
        assert!(error.chain().count() > 1, "the transport cause is kept");
        Ok(())
    }

    #[tokio::test]
    async fn empty_body_is_null() -> Result {
        let server = MockServer::start().await;
        Mock::given(method("DELETE")).respond_with(ResponseTemplate::new(204)).mount(&server).await;

        let client = client(&server, None)?;
        let body = client.send(client.request(Method::DELETE, &["things", "1"]), FALLBACK).await?;
        assert_eq!(body, Value::Null);
        Ok(())
    }
}
