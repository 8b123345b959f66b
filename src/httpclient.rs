//! HTTP client construction from the `httpclient` configuration section.
//!
//! Only the `DEFAULT` client type is supported: a plain `reqwest` client that
//! sends a configured `Content-Type` header on every request.

use std::str::FromStr;

use reqwest::Client;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

use crate::config::ConfigError;

/// Default `Content-Type` sent by the default client.
pub const DEFAULT_CONTENT_TYPE: &str = "application/json";

fn default_type() -> String {
    HttpClientType::Default.to_string()
}

fn default_content_type() -> String {
    DEFAULT_CONTENT_TYPE.to_string()
}

/// Supported HTTP client types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, AsRefStr)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum HttpClientType {
    /// Plain `reqwest` client with default headers.
    Default,
}

/// Settings of the default client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultClientConfig {
    /// Content type sent with every request (default: application/json).
    #[serde(default = "default_content_type")]
    pub content_type: String,
}

impl Default for DefaultClientConfig {
    fn default() -> Self {
        Self {
            content_type: default_content_type(),
        }
    }
}

/// HTTP client configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpClientConfig {
    /// Type of HTTP client (default: DEFAULT).
    #[serde(default = "default_type")]
    pub r#type: String,

    /// Default client settings.
    #[serde(default)]
    pub default: DefaultClientConfig,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            r#type: default_type(),
            default: DefaultClientConfig::default(),
        }
    }
}

impl HttpClientConfig {
    /// Parsed client type.
    ///
    /// # Errors
    /// Returns `ConfigError::ValidationError` for an unknown type.
    pub fn client_type(&self) -> Result<HttpClientType, ConfigError> {
        HttpClientType::from_str(self.r#type.trim()).map_err(|_| {
            ConfigError::ValidationError(format!("unknown HTTP client type {}", self.r#type))
        })
    }

    fn default_headers(&self) -> Result<HeaderMap, ConfigError> {
        let content_type = HeaderValue::from_str(&self.default.content_type).map_err(|e| {
            ConfigError::ValidationError(format!(
                "invalid HTTP content type '{}': {}",
                self.default.content_type, e
            ))
        })?;
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, content_type);
        Ok(headers)
    }

    /// Validate type and headers.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.client_type()?;
        self.default_headers()?;
        Ok(())
    }

    /// Build the configured client.
    ///
    /// # Errors
    /// Returns `ConfigError::ValidationError` for an unknown type, an invalid
    /// header value, or a client that cannot be built.
    pub fn build(&self) -> Result<Client, ConfigError> {
        match self.client_type()? {
            HttpClientType::Default => Client::builder()
                .default_headers(self.default_headers()?)
                .build()
                .map_err(|e| {
                    ConfigError::ValidationError(format!("Failed to build HTTP client: {}", e))
                }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::ErrorKind;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn config(kind: &str) -> HttpClientConfig {
        HttpClientConfig {
            r#type: kind.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_http_client_config_defaults() {
        let config = HttpClientConfig::default();
        assert_eq!(config.r#type, "DEFAULT");
        assert_eq!(config.default.content_type, DEFAULT_CONTENT_TYPE);
        assert_eq!(config.client_type().unwrap(), HttpClientType::Default);
    }

    #[test]
    fn test_build_default_type() {
        assert!(config("DEFAULT").build().is_ok());
    }

    #[test]
    fn test_build_type_case_insensitive() {
        assert!(config("default").build().is_ok());
        assert!(config("Default").validate().is_ok());
    }

    #[test]
    fn test_build_unknown_type() {
        let err = config("MISSING").build().unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
        assert!(err.to_string().contains("unknown HTTP client type MISSING"));
    }

    #[test]
    fn test_invalid_content_type_rejected() {
        let mut config = HttpClientConfig::default();
        config.default.content_type = "application/json\n".to_string();
        assert!(config.validate().is_err());
    }

    #[tokio::test]
    async fn test_default_client_sends_content_type() {
        let listener = match TcpListener::bind("127.0.0.1:0").await {
            Ok(l) => l,
            Err(e) if e.kind() == ErrorKind::PermissionDenied => {
                // Some sandboxed environments disallow binding; skip the test.
                return;
            }
            Err(e) => panic!("Failed to bind test listener: {e}"),
        };
        let addr = listener.local_addr().unwrap();

        // Capture the request head and answer with an empty 200.
        let server = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            stream
                .write_all(b"HTTP/1.1 200 OK\r\ncontent-length: 0\r\nconnection: close\r\n\r\n")
                .await
                .unwrap();
            String::from_utf8_lossy(&request).to_ascii_lowercase()
        });

        let client = HttpClientConfig::default().build().unwrap();
        let response = client
            .get(format!("http://{}/", addr))
            .send()
            .await
            .unwrap();
        assert!(response.status().is_success());

        let request = server.await.unwrap();
        assert!(request.contains("content-type: application/json"));
    }
}
