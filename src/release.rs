use crate::http::{ACCEPT, HeaderMap, HeaderValue, HttpClient};
use serde::Deserialize;

/// GitHub API endpoint describing the latest release of Cake.
pub const DEFAULT_RELEASE_URL: &str = "https://api.github.com/repos/cake-build/cake/releases/latest";

/// Looks up the most recent released version of Cake.
pub trait ReleaseLookup {
    /// The latest version number, without any `v` prefix.
    ///
    /// Returns `None` whenever the version cannot be determined; failures are logged, never
    /// returned.
    fn latest_version(&self) -> Option<String>;
}

#[derive(Deserialize)]
struct ReleaseResponse {
    tag_name: Option<String>,
}

/// [`ReleaseLookup`] backed by the GitHub Releases API.
#[derive(Debug, Clone)]
pub struct GithubReleaseLookup {
    client: HttpClient,
    url: String,
}

impl GithubReleaseLookup {
    pub fn new(client: HttpClient, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    fn fetch_tag(&self) -> Option<String> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));

        let response = match self.client.get_with_headers(&self.url, &headers) {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!("Could not determine the latest version of Cake: {e}");
                return None;
            }
        };

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            tracing::warn!(
                "Could not determine the latest version of Cake. GitHub returned status code {}",
                status.as_u16()
            );
            return None;
        }

        let text = match response.text() {
            Ok(t) => t,
            Err(e) => {
                tracing::warn!("Could not read the latest Cake release from GitHub: {e}");
                return None;
            }
        };

        match serde_json::from_str::<ReleaseResponse>(&text) {
            Ok(release) => release.tag_name,
            Err(e) => {
                tracing::warn!("Could not parse the latest Cake release from GitHub: {e}");
                None
            }
        }
    }
}

impl ReleaseLookup for GithubReleaseLookup {
    fn latest_version(&self) -> Option<String> {
        let version = self.fetch_tag().and_then(|tag| extract_version_number(&tag));
        if let Some(version) = &version {
            tracing::debug!("Latest Cake release is {version}");
        }
        version
    }
}

/// Strip a leading `v` from a release tag. An empty tag yields no version.
fn extract_version_number(tag: &str) -> Option<String> {
    let version = tag.strip_prefix('v').unwrap_or(tag);
    (!version.is_empty()).then(|| version.to_string())
}
