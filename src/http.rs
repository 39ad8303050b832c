pub use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};

use crate::{Result, config::HttpConfig, error};
use reqwest::blocking::{Client, Response};
use std::time::Duration;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client wrapper with user agent, proxy, and timeout support.
///
/// Requests are not retried; a failed request is reported to the caller immediately.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Build a new [`HttpClient`] with the given configuration.
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let user_agent = format!(
            "cake-action/{} ({})",
            env!("CARGO_PKG_VERSION"),
            env!("CARGO_PKG_REPOSITORY")
        );

        let mut builder = Client::builder()
            .user_agent(user_agent)
            .timeout(config.timeout)
            .connect_timeout(CONNECT_TIMEOUT);

        if let Some(ref proxy_url) = config.proxy {
            let proxy = reqwest::Proxy::all(proxy_url).map_err(|e| error::Error::HttpClientBuild {
                message: format!("invalid proxy URL '{}': {}", proxy_url, e),
            })?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build().map_err(|e| error::Error::HttpClientBuild {
            message: e.to_string(),
        })?;

        Ok(Self { client })
    }

    /// Perform a GET request with the given headers.
    ///
    /// Any response the server sends back is returned as-is, whatever its status; only
    /// transport failures are errors.
    pub fn get_with_headers(
        &self,
        url: &str,
        headers: &HeaderMap,
    ) -> std::result::Result<Response, reqwest::Error> {
        self.client.get(url).headers(headers.clone()).send()
    }
}
