use async_trait::async_trait;

/// Validates the credentials a request carries before it reaches a guarded route.
///
/// Implementations look at the request parts only (headers, cookies, extensions),
/// never the body, and resolve them to whatever identity the handlers need.
#[async_trait]
pub trait AuthValidator: Clone + Send + Sync + 'static {
    /// The identity handed to route handlers on success.
    type Claims: Clone + Send + Sync + 'static;

    /// Typically `http::request::Parts`.
    type RequestParts: Send + Sync;

    type Error: std::error::Error + Send + Sync + 'static;

    /// # Errors
    ///
    /// Fails when no credential is present, when it is expired or unknown, or
    /// when the backing store cannot be reached.
    async fn validate(&self, parts: &Self::RequestParts) -> Result<Self::Claims, Self::Error>;
}
