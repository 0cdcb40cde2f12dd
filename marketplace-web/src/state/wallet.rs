//! Wallet state management
//!
//! Bridges the `lib-wallet` session driver into Leptos reactivity. The
//! session driver (which holds the JS signer handle) lives in a
//! thread-local slot; the [`WalletContext`] handed to components is a
//! `Copy` struct around a plain-data [`SessionView`] snapshot signal.
//! Keeping the signer out of the reactive layer forces callers to re-fetch
//! it at the point of use, so a handle issued before an account or chain
//! change is never reused.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use lib_wallet::{Result, SessionView, WalletError, WalletSession};

use crate::services::eip1193::{InjectedProvider, JsSigner, ProviderEvents};

thread_local! {
    // The session driver and the notification-listener guard. One slot
    // each: the app creates them once at startup and drops them together
    // at teardown.
    static SESSION: RefCell<Option<Rc<WalletSession<InjectedProvider>>>> =
        const { RefCell::new(None) };
    static EVENTS: RefCell<Option<ProviderEvents>> = const { RefCell::new(None) };
}

fn current_session() -> Option<Rc<WalletSession<InjectedProvider>>> {
    SESSION.with(|slot| slot.borrow().clone())
}

/// Drops the listener guard (deregistering both provider listeners) and
/// the session. Registered with `on_cleanup` so teardown is paired with
/// the registration in [`provide_wallet_context`].
fn teardown_wallet() {
    EVENTS.with(|slot| slot.borrow_mut().take());
    SESSION.with(|slot| slot.borrow_mut().take());
}

/// Global wallet context
#[derive(Clone, Copy)]
pub struct WalletContext {
    view: RwSignal<SessionView>,
}

impl WalletContext {
    pub fn is_connected(&self) -> bool {
        self.view.with(|view| view.is_connected())
    }

    pub fn is_connecting(&self) -> bool {
        self.view.with(|view| view.connecting)
    }

    pub fn has_logged_out(&self) -> bool {
        self.view.with(|view| view.logged_out)
    }

    pub fn address(&self) -> Option<String> {
        self.view.with(|view| view.address.clone())
    }

    /// Current signing capability. Fetch this for every transaction; never
    /// cache it across a change notification.
    pub fn signer(&self) -> Option<JsSigner> {
        current_session().and_then(|session| session.signer())
    }

    /// Detected provider handle, for read-only contract proxies.
    pub fn provider(&self) -> Result<InjectedProvider> {
        match current_session() {
            Some(session) => Ok(*session.provider()),
            None => Err(WalletError::ProviderUnavailable),
        }
    }

    /// Connect to the injected wallet and refresh the snapshot.
    ///
    /// Fails with `ProviderUnavailable`, before ever flagging the session
    /// as connecting, when no wallet extension is installed.
    pub async fn connect(&self) -> Result<String> {
        let Some(session) = current_session() else {
            return Err(WalletError::ProviderUnavailable);
        };

        // Mirror the in-flight flag immediately so views can show progress
        // while the wallet's approval UI is open.
        self.view.update(|view| view.connecting = true);
        let result = session.connect().await;
        self.sync();
        result
    }

    /// Clear the local session; no external call is made.
    pub fn disconnect(&self) {
        if let Some(session) = current_session() {
            session.disconnect();
        }
        self.sync();
    }

    fn sync(&self) {
        if let Some(session) = current_session() {
            self.view.set(session.view());
        }
    }
}

/// Create the wallet context, subscribe to the provider's change
/// notifications, and provide the context to the component tree.
pub fn provide_wallet_context() -> WalletContext {
    let context = WalletContext {
        view: RwSignal::new(SessionView::default()),
    };

    match InjectedProvider::detect() {
        Ok(provider) => {
            let session = Rc::new(WalletSession::new(provider));
            SESSION.with(|slot| *slot.borrow_mut() = Some(session));

            let ctx = context;
            let on_accounts = move |accounts: Vec<String>| {
                leptos::task::spawn_local(async move {
                    if let Some(session) = current_session() {
                        session.accounts_changed(accounts).await;
                        ctx.sync();
                    }
                });
            };
            let on_chain = move || {
                if let Some(session) = current_session() {
                    session.chain_changed();
                    ctx.sync();
                }
            };

            match ProviderEvents::register(on_accounts, on_chain) {
                Ok(events) => {
                    EVENTS.with(|slot| *slot.borrow_mut() = Some(events));
                    on_cleanup(teardown_wallet);
                }
                Err(err) => log::warn!("failed to subscribe to wallet notifications: {}", err),
            }
        }
        Err(_) => log::warn!("no injected wallet provider found; connect will be unavailable"),
    }

    provide_context(context);
    context
}

pub fn use_wallet_context() -> WalletContext {
    expect_context::<WalletContext>()
}
