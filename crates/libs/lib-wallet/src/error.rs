//! Wallet session error kinds.
//!
//! Every failure is terminal for the call that produced it; nothing in
//! this library retries. Consumers convert these into user-facing notices.

use thiserror::Error;

/// Failures surfaced by the wallet session manager.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalletError {
    /// No injected wallet capability exists in the host environment.
    #[error("no wallet provider found in this environment")]
    ProviderUnavailable,

    /// The wallet approved the request but returned an empty account list.
    #[error("wallet returned no accounts")]
    NoAccounts,

    /// The user rejected the request, or the provider itself failed it.
    #[error("wallet connection failed: {0}")]
    ConnectFailed(String),

    /// A connect call is already suspended in the wallet's approval UI.
    #[error("a wallet connection is already in progress")]
    ConnectInProgress,
}

/// Convenience type alias for `Result<T, WalletError>`.
pub type Result<T> = std::result::Result<T, WalletError>;
