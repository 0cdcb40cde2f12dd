//! # Wallet Session Library
//!
//! Connection-state management for a host-injected wallet capability.
//!
//! The library is deliberately host-agnostic: everything that talks to a
//! concrete wallet goes through the [`WalletProvider`] trait, so the same
//! session machine runs against the browser's injected provider in the
//! front-end and against a scripted stub in tests.
//!
//! ## Structure
//!
//! - [`provider`] - the [`WalletProvider`] capability trait
//! - [`session`] - [`SessionState`] transitions and the [`WalletSession`]
//!   driver that owns one provider
//! - [`error`] - [`WalletError`] failure kinds
//!
//! ## Session rules
//!
//! - An address and its signing capability are only ever present together.
//! - `connecting` is true for at most the duration of one connect call.
//! - Account switches replace the address and re-derive the signer without
//!   an explicit reconnect; network switches clear the session entirely.
//! - Signers must be re-fetched from the session for every use; values
//!   cached across a change notification are stale.

pub mod error;
pub mod provider;
pub mod session;

pub use error::{Result, WalletError};
pub use provider::WalletProvider;
pub use session::{SessionState, SessionView, WalletSession};
