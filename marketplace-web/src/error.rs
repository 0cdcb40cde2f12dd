//! Application-wide error type for the marketplace front-end.
//!
//! Every failure a page can hit collapses into two buckets: wallet session
//! failures (re-exported from `lib-wallet`) and upstream call failures
//! (uploads and contract calls, including a receipt that lacks an expected
//! event). All of them end up as a toast notice; none propagate further.

use lib_wallet::WalletError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum AppError {
    /// Wallet session failure (provider missing, rejection, no accounts).
    #[error("{0}")]
    Wallet(#[from] WalletError),

    /// Generic bucket for any failed upload or contract call, including
    /// missing expected event data in a transaction receipt.
    #[error("upstream call failed: {0}")]
    Upstream(String),
}

/// Convenience type alias for `Result<T, AppError>`.
pub type Result<T> = std::result::Result<T, AppError>;
