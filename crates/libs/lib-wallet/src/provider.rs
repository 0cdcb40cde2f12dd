//! The wallet capability seam.

use async_trait::async_trait;

use crate::error::Result;

/// Host-injected wallet capability.
///
/// This is the one edge through which the session manager reaches the
/// outside world. The front-end implements it over the browser's injected
/// provider; tests implement it with scripted results. The session runs on
/// a single-threaded event loop, hence `?Send`.
#[async_trait(?Send)]
pub trait WalletProvider {
    /// Opaque signing capability bound to one account.
    type Signer: Clone;

    /// Ask the wallet to expose its accounts.
    ///
    /// Suspends while the user approves or rejects the request in the
    /// wallet's own UI. An approved request with no accounts is reported
    /// as an empty list, not an error.
    async fn request_accounts(&self) -> Result<Vec<String>>;

    /// Derive a fresh signing capability for `address`.
    async fn derive_signer(&self, address: &str) -> Result<Self::Signer>;
}
