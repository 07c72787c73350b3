use typed_builder::TypedBuilder;
use url::Url;

use crate::ClientError;

pub const DEFAULT_API_VERSION: &str = "8.0.0.0";
pub const DEFAULT_USER_AGENT: &str = concat!("ironvim/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, TypedBuilder)]
pub struct ClientConfig {
    /// SDK endpoint, usually from [`sdk_url`].
    pub url: Url,

    /// Sent as `SOAPAction: urn:vim25/<api_version>`.
    #[builder(default = DEFAULT_API_VERSION.to_string(), setter(into))]
    pub api_version: String,

    #[builder(default = DEFAULT_USER_AGENT.to_string(), setter(into))]
    pub user_agent: String,

    /// Generate an `operationID` header for calls whose context has none.
    #[builder(default)]
    pub operation_ids: bool,
}

/// Parses a server address into an SDK endpoint.
///
/// `vc.example.com` becomes `https://vc.example.com/sdk`. An explicit path is kept.
/// Only `http` and `https` are accepted.
pub fn sdk_url(input: &str) -> Result<Url, ClientError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ClientError::InvalidUrl("empty server address".to_string()));
    }

    let with_scheme = if input.contains("://") {
        input.to_string()
    } else {
        format!("https://{input}")
    };

    let mut url =
        Url::parse(&with_scheme).map_err(|e| ClientError::InvalidUrl(format!("{input}: {e}")))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ClientError::InvalidUrl(format!(
            "{input}: unsupported scheme {}",
            url.scheme()
        )));
    }

    if url.path().is_empty() || url.path() == "/" {
        url.set_path("/sdk");
    }

    Ok(url)
}
