//! Transport seam between the sync engine and the network

use crate::error::Result;
use async_trait::async_trait;

/// Sends a SOAP envelope and returns the response body
///
/// Implementations report any failure (network error, non-success status)
/// as an error; the caller does not retry.
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST `body` to `url` as `application/xml`
    async fn post_xml(&self, url: &str, body: String) -> Result<String>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for &T {
    async fn post_xml(&self, url: &str, body: String) -> Result<String> {
        (**self).post_xml(url, body).await
    }
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Box<T> {
    async fn post_xml(&self, url: &str, body: String) -> Result<String> {
        (**self).post_xml(url, body).await
    }
}
