//! Postman API client implementation using reqwest.

use std::time::Duration;

use reqwest::Method;
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::Serialize;
use serde_json::{Value, json};
use url::Url;

use crate::domain::{AppError, Collection, Environment, PostmanApiConfig, RemoteRef};
use crate::ports::{CreateSpecRequest, GenerationRequest, PostmanApi};

const X_API_KEY: &str = "X-Api-Key";
const MAX_LOG_BODY_CHARS: usize = 512;

/// HTTP client for the Postman API.
#[derive(Clone)]
pub struct HttpPostmanClient {
    api_key: String,
    api_url: Url,
    max_retries: u32,
    retry_delay_ms: u64,
    client: Client,
}

impl std::fmt::Debug for HttpPostmanClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpPostmanClient")
            .field("api_url", &self.api_url)
            .field("max_retries", &self.max_retries)
            .field("retry_delay_ms", &self.retry_delay_ms)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl HttpPostmanClient {
    /// Create a new HTTP client with the given API key and configuration.
    pub fn new(api_key: String, config: &PostmanApiConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::config_error(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            api_key,
            api_url: config.api_url.clone(),
            max_retries: config.max_retries,
            retry_delay_ms: config.retry_delay_ms,
            client,
        })
    }

    fn endpoint(&self, segments: &[&str], query: &[(&str, &str)]) -> Result<Url, AppError> {
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                AppError::config_error(format!("Postman API URL cannot be a base: {}", self.api_url))
            })?
            .pop_if_empty()
            .extend(segments);
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    fn get(&self, url: Url) -> Result<Value, AppError> {
        self.send(Method::GET, url, None)
    }

    fn send_json<T: Serialize>(
        &self,
        method: Method,
        url: Url,
        body: &T,
    ) -> Result<Value, AppError> {
        let body = serde_json::to_value(body).map_err(|e| AppError::ParseError {
            what: "request body".to_string(),
            details: e.to_string(),
        })?;
        self.send(method, url, Some(&body))
    }

    fn send(&self, method: Method, url: Url, body: Option<&Value>) -> Result<Value, AppError> {
        let max_attempts = self.max_retries.max(1);
        let mut attempt = 1;

        loop {
            match self.send_once(method.clone(), url.clone(), body) {
                Ok(value) => return Ok(value),
                Err(error) => {
                    if attempt >= max_attempts || !Self::is_retryable(&method, &error) {
                        return Err(error);
                    }
                    tracing::warn!(
                        method = %method,
                        path = url.path(),
                        attempt,
                        max_attempts,
                        error = %error,
                        "Postman request failed; retrying"
                    );
                    std::thread::sleep(Duration::from_millis(self.retry_delay_ms));
                    attempt += 1;
                }
            }
        }
    }

    fn send_once(&self, method: Method, url: Url, body: Option<&Value>) -> Result<Value, AppError> {
        tracing::debug!(method = %method, path = url.path(), "Postman request");

        let mut request = self
            .client
            .request(method, url)
            .header(X_API_KEY, &self.api_key)
            .header(ACCEPT, "application/json");
        if let Some(body) = body {
            request = request.header(CONTENT_TYPE, "application/json").json(body);
        }

        let response =
            request.send().map_err(|e| AppError::api(format!("HTTP request failed: {}", e), None))?;
        let status = response.status();
        let text = response
            .text()
            .map_err(|e| AppError::api(format!("Failed to read response: {}", e), None))?;

        if !status.is_success() {
            return Err(AppError::api(
                format!("Postman API error ({}): {}", status.as_u16(), truncate(&text)),
                Some(status.as_u16()),
            ));
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| AppError::ParseError {
            what: "Postman response".to_string(),
            details: e.to_string(),
        })
    }

    // POST is not idempotent here: only rate-limit rejections are safe to resend.
    fn is_retryable(method: &Method, error: &AppError) -> bool {
        match error {
            AppError::PostmanApi { status: Some(429), .. } => true,
            AppError::PostmanApi { status: Some(code), .. } => {
                *code >= 500 && *method != Method::POST
            }
            AppError::PostmanApi { status: None, .. } => *method != Method::POST,
            _ => false,
        }
    }

    fn list(&self, url: Url, key: &str) -> Result<Vec<RemoteRef>, AppError> {
        let response = self.get(url)?;
        match response.get(key) {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(items) => serde_json::from_value(items.clone()).map_err(|e| AppError::ParseError {
                what: format!("{} listing", key),
                details: e.to_string(),
            }),
        }
    }

    fn delete(&self, segments: &[&str]) -> Result<(), AppError> {
        let url = self.endpoint(segments, &[])?;
        self.send(Method::DELETE, url, None).map(|_| ())
    }
}

fn truncate(text: &str) -> String {
    if text.chars().count() <= MAX_LOG_BODY_CHARS {
        return text.to_string();
    }
    let head: String = text.chars().take(MAX_LOG_BODY_CHARS).collect();
    format!("{}...", head)
}

impl PostmanApi for HttpPostmanClient {
    fn list_specs(&self, workspace_id: &str) -> Result<Vec<RemoteRef>, AppError> {
        self.list(self.endpoint(&["specs"], &[("workspaceId", workspace_id)])?, "specs")
    }

    fn create_spec(
        &self,
        workspace_id: &str,
        request: &CreateSpecRequest,
    ) -> Result<Value, AppError> {
        let url = self.endpoint(&["specs"], &[("workspaceId", workspace_id)])?;
        self.send_json(Method::POST, url, request)
    }

    fn delete_spec(&self, spec_id: &str) -> Result<(), AppError> {
        self.delete(&["specs", spec_id])
    }

    fn generate_collection(
        &self,
        spec_id: &str,
        request: &GenerationRequest,
    ) -> Result<Value, AppError> {
        let url = self.endpoint(&["specs", spec_id, "generations", "collection"], &[])?;
        self.send_json(Method::POST, url, request)
    }

    fn list_generated_collections(&self, spec_id: &str) -> Result<Vec<RemoteRef>, AppError> {
        let url = self.endpoint(&["specs", spec_id, "generations", "collection"], &[])?;
        self.list(url, "collections")
    }

    fn list_collections(&self, workspace_id: &str) -> Result<Vec<RemoteRef>, AppError> {
        self.list(self.endpoint(&["collections"], &[("workspace", workspace_id)])?, "collections")
    }

    fn get_collection(&self, collection_id: &str) -> Result<Collection, AppError> {
        let mut response = self.get(self.endpoint(&["collections", collection_id], &[])?)?;
        let collection = response
            .get_mut("collection")
            .map(Value::take)
            .ok_or_else(|| AppError::ParseError {
                what: format!("collection {}", collection_id),
                details: "response has no 'collection' object".to_string(),
            })?;
        serde_json::from_value(collection).map_err(|e| AppError::ParseError {
            what: format!("collection {}", collection_id),
            details: e.to_string(),
        })
    }

    fn put_collection(
        &self,
        collection_id: &str,
        collection: &Collection,
    ) -> Result<(), AppError> {
        let url = self.endpoint(&["collections", collection_id], &[])?;
        self.send_json(Method::PUT, url, &json!({ "collection": collection })).map(|_| ())
    }

    fn delete_collection(&self, collection_id: &str) -> Result<(), AppError> {
        self.delete(&["collections", collection_id])
    }

    fn list_environments(&self, workspace_id: &str) -> Result<Vec<RemoteRef>, AppError> {
        self.list(
            self.endpoint(&["environments"], &[("workspace", workspace_id)])?,
            "environments",
        )
    }

    fn create_environment(
        &self,
        workspace_id: &str,
        environment: &Environment,
    ) -> Result<Value, AppError> {
        let url = self.endpoint(&["environments"], &[("workspace", workspace_id)])?;
        self.send_json(Method::POST, url, &json!({ "environment": environment }))
    }

    fn update_environment(
        &self,
        environment_id: &str,
        environment: &Environment,
    ) -> Result<(), AppError> {
        let url = self.endpoint(&["environments", environment_id], &[])?;
        self.send_json(Method::PUT, url, &json!({ "environment": environment })).map(|_| ())
    }

    fn delete_environment(&self, environment_id: &str) -> Result<(), AppError> {
        self.delete(&["environments", environment_id])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EnvironmentVariable, SpecDocument};
    use mockito::Matcher;

    fn client_for(server: &mockito::Server) -> HttpPostmanClient {
        let config = PostmanApiConfig {
            api_url: Url::parse(&server.url()).unwrap(),
            timeout_secs: 1,
            max_retries: 3,
            retry_delay_ms: 1,
        };
        HttpPostmanClient::new("fake-key".to_string(), &config).unwrap()
    }

    #[test]
    fn list_specs_sends_key_and_workspace() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/specs")
            .match_query(Matcher::UrlEncoded("workspaceId".into(), "ws-1".into()))
            .match_header("x-api-key", "fake-key")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"specs": [{"id": "s-1", "name": "Refund API", "type": "OPENAPI:3.0"}]}"#)
            .create();

        let specs = client_for(&server).list_specs("ws-1").unwrap();
        assert_eq!(specs, vec![RemoteRef::new("s-1", "Refund API")]);
        mock.assert();
    }

    #[test]
    fn create_spec_posts_document_and_returns_raw_body() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/specs")
            .match_query(Matcher::UrlEncoded("workspaceId".into(), "ws-1".into()))
            .match_body(Matcher::PartialJson(serde_json::json!({
                "name": "Refund API",
                "type": "OPENAPI:3.0",
                "files": [{"path": "index.yaml", "content": "openapi: 3.0.0\n"}]
            })))
            .with_status(200)
            .with_body(r#"{"id": "s-9", "name": "Refund API"}"#)
            .create();

        let doc = SpecDocument::new("refund.yaml", "openapi: 3.0.0\n".to_string());
        let request = CreateSpecRequest::from_document("Refund API", &doc);
        let response = client_for(&server).create_spec("ws-1", &request).unwrap();
        assert_eq!(response["id"], "s-9");
        mock.assert();
    }

    #[test]
    fn get_and_put_collection_round_trip_unknown_fields() {
        let mut server = mockito::Server::new();
        let _get = server
            .mock("GET", "/collections/c-1")
            .with_status(200)
            .with_body(
                r#"{"collection": {"info": {"name": "Refund API Collection"}, "item": [{"name": "a"}]}}"#,
            )
            .create();
        let put = server
            .mock("PUT", "/collections/c-1")
            .match_body(Matcher::AllOf(vec![
                Matcher::PartialJson(serde_json::json!({"collection": {"item": [{"name": "a"}]}})),
                Matcher::Regex(r#""listen":"prerequest""#.to_string()),
            ]))
            .with_status(200)
            .with_body(r#"{"collection": {"id": "c-1"}}"#)
            .create();

        let client = client_for(&server);
        let mut collection = client.get_collection("c-1").unwrap();
        assert_eq!(collection.name(), Some("Refund API Collection"));
        collection.replace_prerequest(vec!["// x".to_string()]);
        client.put_collection("c-1", &collection).unwrap();
        put.assert();
    }

    #[test]
    fn get_collection_without_container_is_parse_error() {
        let mut server = mockito::Server::new();
        let _m = server.mock("GET", "/collections/c-1").with_status(200).with_body("{}").create();

        let result = client_for(&server).get_collection("c-1");
        assert!(matches!(result, Err(AppError::ParseError { .. })));
    }

    #[test]
    fn environment_payload_is_wrapped() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/environments")
            .match_query(Matcher::UrlEncoded("workspace".into(), "ws-1".into()))
            .match_body(Matcher::Json(serde_json::json!({
                "environment": {
                    "name": "Refund API - DEV",
                    "values": [{"key": "base_url", "value": "https://dev", "enabled": true, "type": "default"}]
                }
            })))
            .with_status(200)
            .with_body(r#"{"environment": {"id": "e-1", "name": "Refund API - DEV"}}"#)
            .create();

        let env = Environment {
            name: "Refund API - DEV".to_string(),
            values: vec![EnvironmentVariable::new("base_url", "https://dev")],
        };
        let response = client_for(&server).create_environment("ws-1", &env).unwrap();
        assert_eq!(response["environment"]["id"], "e-1");
        mock.assert();
    }

    #[test]
    fn delete_accepts_empty_body() {
        let mut server = mockito::Server::new();
        let mock = server.mock("DELETE", "/specs/s-1").with_status(204).create();

        client_for(&server).delete_spec("s-1").unwrap();
        mock.assert();
    }

    #[test]
    fn get_retries_on_500() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/collections/c-1")
            .with_status(500)
            .expect(3)
            .create();

        let result = client_for(&server).get_collection("c-1");
        assert_eq!(result.unwrap_err().status(), Some(500));
        mock.assert();
    }

    #[test]
    fn post_is_not_retried_on_500() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/specs/s-1/generations/collection")
            .with_status(502)
            .expect(1)
            .create();

        let result =
            client_for(&server).generate_collection("s-1", &GenerationRequest::named("X"));
        assert!(result.is_err());
        mock.assert();
    }

    #[test]
    fn post_is_retried_on_429() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/specs/s-1/generations/collection")
            .with_status(429)
            .expect(3)
            .create();

        let result =
            client_for(&server).generate_collection("s-1", &GenerationRequest::named("X"));
        assert_eq!(result.unwrap_err().status(), Some(429));
        mock.assert();
    }

    #[test]
    fn client_error_fails_fast_with_body() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("PUT", "/environments/e-1")
            .with_status(400)
            .with_body(r#"{"error": {"name": "invalidParamsError"}}"#)
            .expect(1)
            .create();

        let env = Environment { name: "x".into(), values: vec![] };
        let err = client_for(&server).update_environment("e-1", &env).unwrap_err();
        assert!(err.to_string().contains("400"));
        assert!(err.to_string().contains("invalidParamsError"));
        mock.assert();
    }

    #[test]
    fn base_url_path_prefix_is_kept() {
        let config = PostmanApiConfig {
            api_url: Url::parse("https://proxy.example.com/postman/").unwrap(),
            ..Default::default()
        };
        let client = HttpPostmanClient::new("k".into(), &config).unwrap();
        let url = client.endpoint(&["specs", "s 1"], &[("workspaceId", "w")]).unwrap();
        assert_eq!(url.as_str(), "https://proxy.example.com/postman/specs/s%201?workspaceId=w");
    }

    #[test]
    fn debug_redacts_api_key() {
        let client = HttpPostmanClient::new("secret".into(), &PostmanApiConfig::default()).unwrap();
        assert!(!format!("{:?}", client).contains("secret"));
    }
}
