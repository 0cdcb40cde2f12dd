//! Injected Wallet Provider Adapter via wasm-bindgen
//!
//! JavaScript interop for the browser-injected EIP-1193 provider
//! (`window.ethereum`) and the page-loaded ethers.js bundle. All access to
//! the ambient provider object funnels through [`InjectedProvider::detect`];
//! nothing else in the crate touches the global directly, which keeps one
//! substitutable dependency edge for the session machinery in `lib-wallet`.

use async_trait::async_trait;
use lib_wallet::{Result, WalletError, WalletProvider};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::services::js_error_message;

#[wasm_bindgen(inline_js = "
export function hasInjectedProvider() {
    return typeof window !== 'undefined' && !!window.ethereum;
}

export async function requestAccounts() {
    return await window.ethereum.request({ method: 'eth_requestAccounts' });
}

export async function deriveSigner() {
    const provider = new window.ethers.BrowserProvider(window.ethereum);
    return await provider.getSigner();
}

export function browserProvider() {
    return new window.ethers.BrowserProvider(window.ethereum);
}

export function providerOn(event, callback) {
    window.ethereum.on(event, callback);
}

export function providerRemoveListener(event, callback) {
    window.ethereum.removeListener(event, callback);
}
")]
extern "C" {
    /// Check whether a wallet extension injected a provider
    fn hasInjectedProvider() -> bool;

    /// Ask the wallet to expose its accounts (suspends on the approval UI)
    #[wasm_bindgen(catch)]
    async fn requestAccounts() -> std::result::Result<JsValue, JsValue>;

    /// Derive an ethers.js signer for the currently selected account
    #[wasm_bindgen(catch)]
    async fn deriveSigner() -> std::result::Result<JsValue, JsValue>;

    /// Read-only ethers.js provider over the injected transport
    fn browserProvider() -> JsValue;

    /// Subscribe to a provider notification
    fn providerOn(event: &str, callback: &js_sys::Function);

    /// Remove a previously registered notification listener
    fn providerRemoveListener(event: &str, callback: &js_sys::Function);
}

/// Opaque ethers.js signer handle bound to the connected account.
///
/// Treat as single-use state: re-fetch from the wallet session for every
/// transaction instead of caching across change notifications.
#[derive(Debug, Clone)]
pub struct JsSigner(JsValue);

impl JsSigner {
    pub fn as_js(&self) -> &JsValue {
        &self.0
    }
}

/// Handle to the browser-injected wallet provider.
///
/// Carries no data; its existence proves the ambient provider was present
/// when [`detect`](Self::detect) ran.
#[derive(Debug, Clone, Copy)]
pub struct InjectedProvider(());

impl InjectedProvider {
    /// The one accessor for the ambient provider object. Fails fast when
    /// no wallet extension is installed.
    pub fn detect() -> Result<Self> {
        if hasInjectedProvider() {
            Ok(Self(()))
        } else {
            Err(WalletError::ProviderUnavailable)
        }
    }

    /// Read-only ethers.js provider for contract view calls.
    pub fn read_only(&self) -> JsValue {
        browserProvider()
    }
}

#[async_trait(?Send)]
impl WalletProvider for InjectedProvider {
    type Signer = JsSigner;

    async fn request_accounts(&self) -> Result<Vec<String>> {
        let accounts = requestAccounts()
            .await
            .map_err(|err| WalletError::ConnectFailed(js_error_message(&err)))?;
        serde_wasm_bindgen::from_value(accounts)
            .map_err(|err| WalletError::ConnectFailed(format!("malformed account list: {}", err)))
    }

    async fn derive_signer(&self, _address: &str) -> Result<JsSigner> {
        // ethers derives the signer for the wallet's currently selected
        // account, which is the address the session just adopted.
        deriveSigner()
            .await
            .map(JsSigner)
            .map_err(|err| WalletError::ConnectFailed(js_error_message(&err)))
    }
}

/// Paired subscription to the provider's `accountsChanged` and
/// `chainChanged` notifications.
///
/// Registers both listeners on construction and removes both on drop, so a
/// torn-down app never has callbacks fired against a dead session.
pub struct ProviderEvents {
    on_accounts: Closure<dyn FnMut(JsValue)>,
    on_chain: Closure<dyn FnMut(JsValue)>,
}

impl ProviderEvents {
    pub fn register(
        mut accounts_changed: impl FnMut(Vec<String>) + 'static,
        mut chain_changed: impl FnMut() + 'static,
    ) -> Result<Self> {
        InjectedProvider::detect()?;

        let on_accounts = Closure::wrap(Box::new(move |payload: JsValue| {
            // An unreadable payload is treated as "no accounts", which
            // downgrades to a disconnect rather than a stale session.
            let accounts: Vec<String> = serde_wasm_bindgen::from_value(payload).unwrap_or_default();
            accounts_changed(accounts);
        }) as Box<dyn FnMut(JsValue)>);

        let on_chain = Closure::wrap(Box::new(move |_payload: JsValue| {
            chain_changed();
        }) as Box<dyn FnMut(JsValue)>);

        providerOn("accountsChanged", on_accounts.as_ref().unchecked_ref());
        providerOn("chainChanged", on_chain.as_ref().unchecked_ref());

        Ok(Self {
            on_accounts,
            on_chain,
        })
    }
}

impl Drop for ProviderEvents {
    fn drop(&mut self) {
        providerRemoveListener("accountsChanged", self.on_accounts.as_ref().unchecked_ref());
        providerRemoveListener("chainChanged", self.on_chain.as_ref().unchecked_ref());
    }
}
