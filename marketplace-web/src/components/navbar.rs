//! Navigation Bar Component

use leptos::prelude::*;
use leptos_router::components::A;

use shared::utils::truncate_address;

use crate::state::wallet::use_wallet_context;

#[component]
pub fn Navbar() -> impl IntoView {
    let wallet = use_wallet_context();

    view! {
        <nav>
            <div style="max-width: 1200px; margin: 0 auto; padding: 0 24px; display: flex; justify-content: space-between; align-items: center;">
                <A href="/" attr:class="nav-link-clean">
                    <span class="nav-title">"Brewify"</span>
                </A>
                <div style="display: flex; gap: 16px; align-items: center;">
                    <A href="/roles" attr:class="nav-link">"Get Started"</A>
                    <A href="/farmer/minting" attr:class="nav-link">"Mint Batch"</A>
                    <span class="nav-wallet" style="font-family: monospace; font-size: 0.9em;">
                        {move || match wallet.address() {
                            Some(address) => truncate_address(&address),
                            None => "Not connected".to_string(),
                        }}
                    </span>
                </div>
            </div>
        </nav>
    }
}
