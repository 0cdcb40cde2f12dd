//! Session state machine and the driver that owns one wallet provider.

use std::cell::RefCell;

use crate::error::{Result, WalletError};
use crate::provider::WalletProvider;

/// Plain-data snapshot of the session for UI consumption.
///
/// Deliberately excludes the signer: callers fetch that from the session
/// at the point of use so a value from before a change notification can
/// never be reused.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionView {
    pub address: Option<String>,
    pub connecting: bool,
    pub logged_out: bool,
}

impl SessionView {
    pub fn is_connected(&self) -> bool {
        self.address.is_some()
    }
}

/// Session fields and their legal transitions.
///
/// `address` and `signer` are only ever set or cleared together, so the
/// signer-iff-address invariant holds by construction.
#[derive(Debug, Clone)]
pub struct SessionState<S> {
    address: Option<String>,
    signer: Option<S>,
    connecting: bool,
    logged_out: bool,
}

impl<S> Default for SessionState<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> SessionState<S> {
    /// Fresh session: nothing connected, nothing in flight.
    pub fn new() -> Self {
        Self {
            address: None,
            signer: None,
            connecting: false,
            logged_out: false,
        }
    }

    /// Start a connect attempt. A second attempt while one is suspended in
    /// the wallet's approval UI is rejected rather than coalesced.
    pub fn begin_connect(&mut self) -> Result<()> {
        if self.connecting {
            return Err(WalletError::ConnectInProgress);
        }
        self.connecting = true;
        Ok(())
    }

    /// Success path of a connect.
    pub fn complete_connect(&mut self, address: String, signer: S) {
        self.address = Some(address);
        self.signer = Some(signer);
        self.connecting = false;
        self.logged_out = false;
    }

    /// Failure path of a connect: the session is left cleared.
    pub fn fail_connect(&mut self) {
        self.address = None;
        self.signer = None;
        self.connecting = false;
    }

    /// Disconnect-equivalent transition: clears the session and records
    /// the logout so consumers stop auto-reconnecting.
    pub fn clear(&mut self) {
        self.address = None;
        self.signer = None;
        self.connecting = false;
        self.logged_out = true;
    }

    /// Externally reported account switch: the address is replaced and the
    /// signer re-derived by the caller. `connecting` is deliberately left
    /// untouched; the switch is independent of any in-flight connect.
    pub fn replace_account(&mut self, address: String, signer: S) {
        self.address = Some(address);
        self.signer = Some(signer);
        self.logged_out = false;
    }

    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    pub fn signer(&self) -> Option<&S> {
        self.signer.as_ref()
    }

    pub fn is_connected(&self) -> bool {
        self.address.is_some()
    }

    pub fn is_connecting(&self) -> bool {
        self.connecting
    }

    pub fn has_logged_out(&self) -> bool {
        self.logged_out
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            address: self.address.clone(),
            connecting: self.connecting,
            logged_out: self.logged_out,
        }
    }
}

/// Mediates all interaction with one wallet provider and exposes a
/// consistent session view to consumers.
///
/// The state sits behind a `RefCell` and no borrow is ever held across an
/// await point, so a provider notification delivered while a connect is
/// suspended in the wallet's approval UI cannot observe a torn state.
pub struct WalletSession<P: WalletProvider> {
    provider: P,
    state: RefCell<SessionState<P::Signer>>,
}

impl<P: WalletProvider> WalletSession<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            state: RefCell::new(SessionState::new()),
        }
    }

    /// Connect to the wallet and populate the session.
    ///
    /// Suspends while the user approves the request. On success, returns
    /// the connected address. On any failure the session is left cleared;
    /// `connecting` is reset on both paths.
    pub async fn connect(&self) -> Result<String> {
        self.state.borrow_mut().begin_connect()?;

        let accounts = match self.provider.request_accounts().await {
            Ok(accounts) => accounts,
            Err(err) => {
                self.state.borrow_mut().fail_connect();
                return Err(err);
            }
        };

        let address = match accounts.into_iter().next() {
            Some(address) => address,
            None => {
                self.state.borrow_mut().fail_connect();
                return Err(WalletError::NoAccounts);
            }
        };

        let signer = match self.provider.derive_signer(&address).await {
            Ok(signer) => signer,
            Err(err) => {
                self.state.borrow_mut().fail_connect();
                return Err(err);
            }
        };

        log::info!("wallet connected: {}", address);
        self.state
            .borrow_mut()
            .complete_connect(address.clone(), signer);
        Ok(address)
    }

    /// Clear the local session. Wallet providers offer no programmatic
    /// disconnect, so no external call is made.
    pub fn disconnect(&self) {
        log::info!("wallet disconnected");
        self.state.borrow_mut().clear();
    }

    /// Reaction to the provider's accounts-changed notification.
    ///
    /// An empty list behaves like [`disconnect`](Self::disconnect);
    /// otherwise the first account becomes the session address and the
    /// signer is re-derived, without requiring an explicit reconnect.
    pub async fn accounts_changed(&self, accounts: Vec<String>) {
        let Some(address) = accounts.into_iter().next() else {
            log::info!("wallet reported an empty account list, clearing session");
            self.state.borrow_mut().clear();
            return;
        };

        match self.provider.derive_signer(&address).await {
            Ok(signer) => {
                log::info!("wallet account switched: {}", address);
                self.state.borrow_mut().replace_account(address, signer);
            }
            Err(err) => {
                // A stale signer must never survive an account switch.
                log::warn!("signer re-derivation failed after account switch: {}", err);
                self.state.borrow_mut().clear();
            }
        }
    }

    /// Reaction to the provider's chain-changed notification. Any chain
    /// switch invalidates the current signer, so the session is cleared
    /// and the user must reconnect.
    pub fn chain_changed(&self) {
        log::info!("chain changed, clearing wallet session");
        self.state.borrow_mut().clear();
    }

    pub fn address(&self) -> Option<String> {
        self.state.borrow().address().map(str::to_string)
    }

    /// Current signing capability.
    ///
    /// Fetch this at the call site for every transaction; a value obtained
    /// before an account or network change is stale and must not be reused.
    pub fn signer(&self) -> Option<P::Signer> {
        self.state.borrow().signer().cloned()
    }

    pub fn is_connected(&self) -> bool {
        self.state.borrow().is_connected()
    }

    pub fn is_connecting(&self) -> bool {
        self.state.borrow().is_connecting()
    }

    pub fn has_logged_out(&self) -> bool {
        self.state.borrow().has_logged_out()
    }

    pub fn view(&self) -> SessionView {
        self.state.borrow().view()
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::cell::Cell;
    use std::collections::VecDeque;
    use tokio::sync::oneshot;

    /// Signer carrying a derivation counter, so tests can tell a freshly
    /// derived signer from a stale one.
    #[derive(Debug, Clone, PartialEq, Eq)]
    struct StubSigner {
        address: String,
        generation: u32,
    }

    #[derive(Default)]
    struct StubProvider {
        scripted_accounts: RefCell<VecDeque<Result<Vec<String>>>>,
        fail_derive: Cell<bool>,
        derives: Cell<u32>,
    }

    impl StubProvider {
        fn with_accounts(accounts: &[&str]) -> Self {
            let provider = Self::default();
            provider.script_accounts(Ok(accounts.iter().map(|a| a.to_string()).collect()));
            provider
        }

        fn script_accounts(&self, outcome: Result<Vec<String>>) {
            self.scripted_accounts.borrow_mut().push_back(outcome);
        }
    }

    #[async_trait(?Send)]
    impl WalletProvider for StubProvider {
        type Signer = StubSigner;

        async fn request_accounts(&self) -> Result<Vec<String>> {
            self.scripted_accounts
                .borrow_mut()
                .pop_front()
                .unwrap_or(Err(WalletError::ProviderUnavailable))
        }

        async fn derive_signer(&self, address: &str) -> Result<StubSigner> {
            if self.fail_derive.get() {
                return Err(WalletError::ConnectFailed("signer derivation failed".into()));
            }
            let generation = self.derives.get() + 1;
            self.derives.set(generation);
            Ok(StubSigner {
                address: address.to_string(),
                generation,
            })
        }
    }

    fn assert_invariant(session: &WalletSession<StubProvider>) {
        assert_eq!(
            session.address().is_some(),
            session.signer().is_some(),
            "address and signer must be present together"
        );
    }

    #[tokio::test]
    async fn test_connect_populates_session() {
        let session = WalletSession::new(StubProvider::with_accounts(&["0xA1"]));

        assert!(!session.is_connecting());
        let address = session.connect().await.unwrap();

        assert_eq!(address, "0xA1");
        assert_eq!(session.address().as_deref(), Some("0xA1"));
        assert_eq!(session.signer().unwrap().generation, 1);
        assert!(!session.is_connecting());
        assert!(!session.has_logged_out());
        assert_invariant(&session);
    }

    #[tokio::test]
    async fn test_connect_empty_accounts() {
        let provider = StubProvider::default();
        provider.script_accounts(Ok(vec![]));
        let session = WalletSession::new(provider);

        let err = session.connect().await.unwrap_err();

        assert_eq!(err, WalletError::NoAccounts);
        assert_eq!(session.address(), None);
        assert!(session.signer().is_none());
        assert!(!session.is_connecting());
        assert_invariant(&session);
    }

    #[tokio::test]
    async fn test_connect_rejection_clears_prior_session() {
        let provider = StubProvider::with_accounts(&["0xA1"]);
        provider.script_accounts(Err(WalletError::ConnectFailed("user rejected".into())));
        let session = WalletSession::new(provider);

        session.connect().await.unwrap();
        assert!(session.is_connected());

        let err = session.connect().await.unwrap_err();

        assert_eq!(err, WalletError::ConnectFailed("user rejected".into()));
        assert!(!session.is_connected());
        assert!(!session.is_connecting());
        assert_invariant(&session);
    }

    #[tokio::test]
    async fn test_connect_derive_failure_clears_session() {
        let provider = StubProvider::with_accounts(&["0xA1"]);
        provider.fail_derive.set(true);
        let session = WalletSession::new(provider);

        let err = session.connect().await.unwrap_err();

        assert!(matches!(err, WalletError::ConnectFailed(_)));
        assert!(!session.is_connected());
        assert!(!session.is_connecting());
        assert_invariant(&session);
    }

    #[tokio::test]
    async fn test_second_connect_rejected_while_first_in_flight() {
        /// Provider that blocks its first accounts request until released.
        struct GatedProvider {
            gate: RefCell<Option<oneshot::Receiver<()>>>,
        }

        #[async_trait(?Send)]
        impl WalletProvider for GatedProvider {
            type Signer = u32;

            async fn request_accounts(&self) -> Result<Vec<String>> {
                let gate = self.gate.borrow_mut().take();
                if let Some(gate) = gate {
                    gate.await.ok();
                }
                Ok(vec!["0xA1".to_string()])
            }

            async fn derive_signer(&self, _address: &str) -> Result<u32> {
                Ok(1)
            }
        }

        let (release, gate) = oneshot::channel();
        let session = WalletSession::new(GatedProvider {
            gate: RefCell::new(Some(gate)),
        });

        let first = session.connect();
        let second = async {
            // Runs after the first call has suspended on the gate.
            assert!(session.is_connecting());
            let err = session.connect().await.unwrap_err();
            assert_eq!(err, WalletError::ConnectInProgress);
            // The rejected call must not have disturbed the in-flight one.
            assert!(session.is_connecting());
            release.send(()).unwrap();
        };

        let (first_result, ()) = tokio::join!(first, second);
        assert_eq!(first_result.unwrap(), "0xA1");
        assert!(session.is_connected());
        assert!(!session.is_connecting());
    }

    #[tokio::test]
    async fn test_disconnect_clears_session() {
        let session = WalletSession::new(StubProvider::with_accounts(&["0xA1"]));
        session.connect().await.unwrap();

        session.disconnect();

        assert_eq!(session.address(), None);
        assert!(session.signer().is_none());
        assert!(!session.is_connecting());
        assert!(session.has_logged_out());
        assert_invariant(&session);
    }

    #[tokio::test]
    async fn test_logged_out_marker_cleared_by_connect() {
        let provider = StubProvider::with_accounts(&["0xA1"]);
        provider.script_accounts(Ok(vec!["0xA1".to_string()]));
        let session = WalletSession::new(provider);

        session.connect().await.unwrap();
        session.disconnect();
        assert!(session.has_logged_out());

        session.connect().await.unwrap();
        assert!(!session.has_logged_out());
    }

    #[tokio::test]
    async fn test_empty_account_list_notification_clears_session() {
        let session = WalletSession::new(StubProvider::with_accounts(&["0xA1"]));
        session.connect().await.unwrap();

        session.accounts_changed(vec![]).await;

        assert_eq!(session.address(), None);
        assert!(session.signer().is_none());
        assert!(session.has_logged_out());
        assert_invariant(&session);
    }

    #[tokio::test]
    async fn test_account_switch_rederives_signer() {
        let session = WalletSession::new(StubProvider::with_accounts(&["0xA1"]));
        session.connect().await.unwrap();
        let stale = session.signer().unwrap();

        session
            .accounts_changed(vec!["0xB2".to_string(), "0xC3".to_string()])
            .await;

        assert_eq!(session.address().as_deref(), Some("0xB2"));
        let fresh = session.signer().unwrap();
        assert_eq!(fresh.address, "0xB2");
        assert_ne!(fresh.generation, stale.generation);
        assert_invariant(&session);
    }

    #[tokio::test]
    async fn test_account_switch_without_prior_connect() {
        let session = WalletSession::new(StubProvider::default());

        session.accounts_changed(vec!["0xB2".to_string()]).await;

        assert_eq!(session.address().as_deref(), Some("0xB2"));
        assert!(session.signer().is_some());
        assert!(!session.is_connecting());
        assert_invariant(&session);
    }

    #[tokio::test]
    async fn test_account_switch_derive_failure_clears_session() {
        let session = WalletSession::new(StubProvider::with_accounts(&["0xA1"]));
        session.connect().await.unwrap();

        session.provider().fail_derive.set(true);
        session.accounts_changed(vec!["0xB2".to_string()]).await;

        assert_eq!(session.address(), None);
        assert!(session.signer().is_none());
        assert_invariant(&session);
    }

    #[tokio::test]
    async fn test_chain_change_clears_session() {
        let session = WalletSession::new(StubProvider::with_accounts(&["0xA1"]));
        session.connect().await.unwrap();

        session.chain_changed();

        assert_eq!(session.address(), None);
        assert!(session.signer().is_none());
        assert!(!session.is_connecting());
        assert!(session.has_logged_out());
        assert_invariant(&session);
    }

    #[test]
    fn test_state_begin_connect_twice() {
        let mut state: SessionState<u32> = SessionState::new();
        state.begin_connect().unwrap();
        assert_eq!(
            state.begin_connect().unwrap_err(),
            WalletError::ConnectInProgress
        );
        assert!(state.is_connecting());
    }

    #[test]
    fn test_state_replace_account_preserves_connecting() {
        let mut state: SessionState<u32> = SessionState::new();
        state.begin_connect().unwrap();

        state.replace_account("0xB2".to_string(), 7);

        assert!(state.is_connecting());
        assert_eq!(state.address(), Some("0xB2"));
        assert_eq!(state.signer(), Some(&7));
    }

    #[test]
    fn test_state_view_snapshot() {
        let mut state: SessionState<u32> = SessionState::new();
        assert_eq!(state.view(), SessionView::default());

        state.complete_connect("0xA1".to_string(), 1);
        let view = state.view();
        assert_eq!(view.address.as_deref(), Some("0xA1"));
        assert!(view.is_connected());
        assert!(!view.connecting);
        assert!(!view.logged_out);
    }
}
