use std::time::Duration;

use async_trait::async_trait;
use bookshelf_model::BookCover;
use reqwest::Client;
use url::Url;

use super::{error::RemoteCallError, fetcher::CoverSource, target::FetchTarget};

/// [`CoverSource`] backed by the cover service's HTTP API.
///
/// The client is shared by every download, so concurrent requests reuse
/// pooled connections.
#[derive(Debug, Clone)]
pub struct HttpCoverSource {
    client: Client,
    base_url: Url,
}

impl HttpCoverSource {
    pub fn new(
        base_url: Url,
        request_timeout: Duration,
    ) -> Result<Self, RemoteCallError> {
        let client = Client::builder().timeout(request_timeout).build()?;
        Self::with_client(client, base_url)
    }

    pub fn with_client(
        client: Client,
        base_url: Url,
    ) -> Result<Self, RemoteCallError> {
        if base_url.cannot_be_a_base() {
            return Err(RemoteCallError::InvalidEndpoint(base_url.to_string()));
        }
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `GET {base}/api/bookcovers/{cover_id}[?returnFault=true]`
    pub fn endpoint(
        &self,
        target: &FetchTarget,
    ) -> Result<Url, RemoteCallError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                RemoteCallError::InvalidEndpoint(self.base_url.to_string())
            })?
            .pop_if_empty()
            .extend(["api", "bookcovers", target.cover_id.as_str()]);
        if target.return_fault {
            url.query_pairs_mut().append_pair("returnFault", "true");
        }
        Ok(url)
    }
}

#[async_trait]
impl CoverSource for HttpCoverSource {
    async fn download(
        &self,
        target: &FetchTarget,
    ) -> Result<BookCover, RemoteCallError> {
        let url = self.endpoint(target)?;
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RemoteCallError::Status { status });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(RemoteCallError::Decode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(base: &str) -> HttpCoverSource {
        HttpCoverSource::new(Url::parse(base).unwrap(), Duration::from_secs(1))
            .unwrap()
    }

    #[test]
    fn endpoint_appends_cover_path() {
        let url = source("http://localhost:52644")
            .endpoint(&FetchTarget::new(0, "abc-dummycover1"))
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:52644/api/bookcovers/abc-dummycover1"
        );
    }

    #[test]
    fn endpoint_keeps_base_path_and_adds_fault_flag() {
        let url = source("http://covers.local/v2/")
            .endpoint(&FetchTarget::new(1, "abc-dummycover2").with_fault(true))
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://covers.local/v2/api/bookcovers/abc-dummycover2?returnFault=true"
        );
    }

    #[test]
    fn opaque_base_urls_are_rejected() {
        let result = HttpCoverSource::new(
            Url::parse("mailto:covers@example.com").unwrap(),
            Duration::from_secs(1),
        );
        assert!(matches!(result, Err(RemoteCallError::InvalidEndpoint(_))));
    }
}
