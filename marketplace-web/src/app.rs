//! Brewify Marketplace Web App - Leptos Frontend
//!
//! Router plus the wallet context shared by every page.

use leptos::prelude::*;
use leptos_router::{
    components::{A, Route, Router, Routes},
    path,
};

use crate::components::Navbar;
use crate::pages::{MarketPage, MintingPage, RolesPage};
use crate::state::wallet::provide_wallet_context;

#[component]
pub fn App() -> impl IntoView {
    // One wallet context for the whole app; this also subscribes to the
    // provider's account/chain notifications until the app is torn down.
    provide_wallet_context();

    view! {
        <Router>
            <div class="app-container">
                <Navbar/>
                <Routes fallback=|| view! { <NotFound/> }>
                    <Route path=path!("/") view=MarketPage/>
                    <Route path=path!("/roles") view=RolesPage/>
                    <Route path=path!("/farmer/minting") view=MintingPage/>
                </Routes>
            </div>
        </Router>
    }
}

#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="app-container" style="display: flex; justify-content: center; align-items: center; min-height: calc(100vh - 60px);">
            <div class="card" style="max-width: 500px; text-align: center;">
                <h1 style="margin-bottom: 16px; font-size: 32px; font-weight: 700;">"404 - Page Not Found"</h1>
                <p style="color: #666666; margin-bottom: 24px;">"The page you're looking for doesn't exist."</p>
                <A href="/">
                    <span class="btn" style="margin-top: 20px; display: inline-block;">
                        "Back to the Marketplace"
                    </span>
                </A>
            </div>
        </div>
    }
}
