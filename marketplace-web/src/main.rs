//! Brewify Marketplace - Leptos Frontend
//!
//! Browser front-end for the coffee supply-chain marketplace. Pages talk
//! to two deployed contracts (UserProfile, BatchNFT) through thin ethers.js
//! proxies and to the upload endpoint for batch artwork; the wallet session
//! itself lives in `lib-wallet` behind the injected-provider adapter in
//! [`services::eip1193`].

use leptos::prelude::*;
use wasm_bindgen::prelude::*;

mod app;
mod catalog;
mod components;
mod error;
mod pages;
mod services;
mod state;
mod utils;

use app::App;

#[wasm_bindgen(start)]
pub fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    // Initialize logger
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("Brewify marketplace starting...");

    // Mount the Leptos app
    leptos::mount::mount_to_body(|| view! { <App/> });
}
