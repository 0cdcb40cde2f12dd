//! Marketplace Page - curated batch listing plus wallet session entry
//!
//! Connects the wallet on first visit (unless the user logged out), reads
//! the visitor's on-chain profile, and routes unregistered visitors to the
//! onboarding flow.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use lib_wallet::WalletError;
use shared::dto::{Product, UserProfileInfo};
use shared::utils::truncate_address;

use crate::catalog::{seeded_products, ListingFilters};
use crate::components::{Toast, ToastMessage};
use crate::error::Result;
use crate::services::contracts::UserProfileContract;
use crate::state::wallet::{use_wallet_context, WalletContext};
use crate::utils::constants::{PRICE_RANGES, PROCESS_TYPES, PRODUCT_TYPES};
use crate::utils::format::{format_eth, format_quantity};

/// Read the on-chain profile for `address` through a read-only proxy.
async fn fetch_profile(wallet: WalletContext, address: &str) -> Result<Option<UserProfileInfo>> {
    let provider = wallet.provider()?;
    let contract = UserProfileContract::read_only(&provider)?;
    contract.profile_of(address).await
}

#[component]
pub fn MarketPage() -> impl IntoView {
    let wallet = use_wallet_context();
    let navigate = use_navigate();

    let toast = RwSignal::new(None::<ToastMessage>);
    let (profile, set_profile) = signal(None::<UserProfileInfo>);
    let (selected, set_selected) = signal(None::<Product>);

    let (type_filter, set_type_filter) = signal(None::<String>);
    let (process_filter, set_process_filter) = signal(None::<String>);
    let (price_filter, set_price_filter) = signal(None::<(f64, f64)>);

    let products = StoredValue::new(seeded_products());
    let filtered = Memo::new(move |_| {
        let filters = ListingFilters {
            product_type: type_filter.get(),
            process: process_filter.get(),
            price_range: price_filter.get(),
        };
        products.with_value(|products| filters.apply(products))
    });

    // Connect the wallet and pull the profile; unregistered visitors are
    // sent to onboarding.
    let connect_and_load = {
        let navigate = navigate.clone();
        move || {
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                let address = match wallet.connect().await {
                    Ok(address) => address,
                    Err(WalletError::ProviderUnavailable) => {
                        toast.set(Some(ToastMessage::error(
                            "No wallet extension found. Install MetaMask first!",
                        )));
                        return;
                    }
                    Err(WalletError::ConnectInProgress) => return,
                    Err(err) => {
                        toast.set(Some(ToastMessage::error(format!(
                            "Failed to connect wallet: {}",
                            err
                        ))));
                        return;
                    }
                };

                match fetch_profile(wallet, &address).await {
                    Ok(Some(found)) => set_profile.set(Some(found)),
                    Ok(None) => navigate("/roles", Default::default()),
                    Err(err) => toast.set(Some(ToastMessage::error(err.to_string()))),
                }
            });
        }
    };

    // Auto-connect on first visit; an explicit logout suppresses it.
    {
        let connect_and_load = connect_and_load.clone();
        if !wallet.is_connected() && !wallet.has_logged_out() {
            connect_and_load();
        }
    }

    let on_logout = move |_| {
        wallet.disconnect();
        set_profile.set(None);
    };

    let on_connect_click = {
        let connect_and_load = connect_and_load.clone();
        move |_| connect_and_load()
    };

    view! {
        <main style="max-width: 1200px; margin: 0 auto; padding: 24px;">
            <div style="display: flex; justify-content: space-between; align-items: center; margin-bottom: 24px;">
                <div>
                    <h1 style="font-size: 28px; font-weight: 700;">"Brewify Marketplace"</h1>
                    <p class="subtitle">"Single-origin coffee batches, traceable from farm to cup"</p>
                </div>
                <div style="display: flex; gap: 12px; align-items: center;">
                    {move || if wallet.is_connected() {
                        let greeting = profile.get()
                            .map(|p| format!("{} ({})", p.username, p.role.label()))
                            .or_else(|| wallet.address().map(|a| truncate_address(&a)))
                            .unwrap_or_default();
                        view! {
                            <div style="display: flex; gap: 12px; align-items: center;">
                                <span style="font-family: monospace;">{greeting}</span>
                                <button class="btn" on:click=on_logout>"Log out"</button>
                            </div>
                        }.into_any()
                    } else {
                        view! {
                            <button
                                class="btn"
                                disabled=move || wallet.is_connecting()
                                on:click=on_connect_click.clone()
                            >
                                {move || if wallet.is_connecting() { "Connecting..." } else { "Connect Wallet" }}
                            </button>
                        }.into_any()
                    }}
                </div>
            </div>

            // Filters
            <div style="display: flex; gap: 12px; margin-bottom: 24px;">
                <select on:change=move |ev| {
                    let value = event_target_value(&ev);
                    set_type_filter.set(if value.is_empty() { None } else { Some(value) });
                }>
                    <option value="">"All varieties"</option>
                    {PRODUCT_TYPES.iter().map(|name| view! {
                        <option value=*name>{*name}</option>
                    }).collect::<Vec<_>>()}
                </select>

                <select on:change=move |ev| {
                    let value = event_target_value(&ev);
                    set_process_filter.set(if value.is_empty() { None } else { Some(value) });
                }>
                    <option value="">"All processes"</option>
                    {PROCESS_TYPES.iter().map(|name| view! {
                        <option value=*name>{*name}</option>
                    }).collect::<Vec<_>>()}
                </select>

                <select on:change=move |ev| {
                    let picked = event_target_value(&ev).parse::<usize>().ok();
                    set_price_filter.set(
                        picked
                            .and_then(|index| PRICE_RANGES.get(index))
                            .map(|(min, max, _)| (*min, *max)),
                    );
                }>
                    <option value="">"Any price"</option>
                    {PRICE_RANGES.iter().enumerate().map(|(index, (_, _, label))| view! {
                        <option value=index.to_string()>{*label}</option>
                    }).collect::<Vec<_>>()}
                </select>
            </div>

            // Listing grid
            <div style="display: grid; grid-template-columns: repeat(auto-fill, minmax(240px, 1fr)); gap: 16px;">
                {move || filtered.get().into_iter().map(|product| {
                    let for_select = product.clone();
                    view! {
                        <div
                            class="card product-card"
                            style="cursor: pointer;"
                            on:click=move |_| set_selected.set(Some(for_select.clone()))
                        >
                            <img
                                src=product.image.clone()
                                alt=product.name.clone()
                                style="width: 100%; height: 160px; object-fit: cover; border-radius: 8px; margin-bottom: 12px;"
                            />
                            <h3 style="font-weight: 600; margin-bottom: 4px;">{product.name.clone()}</h3>
                            <p class="subtitle" style="margin-bottom: 8px;">{product.origin.clone()}</p>
                            <p style="font-size: 0.9em; margin-bottom: 12px;">{product.notes.clone()}</p>
                            <div style="display: flex; justify-content: space-between; font-weight: 600;">
                                <span>{format_eth(product.price_eth)}</span>
                                <span style="color: #666666;">{format_quantity(product.quantity)}</span>
                            </div>
                        </div>
                    }
                }).collect::<Vec<_>>()}
            </div>

            // Selected batch detail
            {move || selected.get().map(|product| view! {
                <div class="card" style="margin-top: 24px; padding: 24px;">
                    <div style="display: flex; justify-content: space-between; align-items: start;">
                        <h2 style="font-weight: 700;">{product.name.clone()}</h2>
                        <button class="btn" on:click=move |_| set_selected.set(None)>"Close"</button>
                    </div>
                    <p class="subtitle">{product.origin.clone()} " \u{00b7} " {product.process.clone()}</p>
                    <p style="margin: 12px 0;">{product.notes.clone()}</p>
                    <div style="display: flex; gap: 32px; margin-top: 12px;">
                        <div>
                            <p class="subtitle">"Harvested"</p>
                            <p>{product.timeline.harvested.to_string()}</p>
                        </div>
                        <div>
                            <p class="subtitle">"Roasted"</p>
                            <p>{product.timeline.roasted.to_string()}</p>
                        </div>
                        <div>
                            <p class="subtitle">"Packed"</p>
                            <p>{product.timeline.packed.to_string()}</p>
                        </div>
                        <div>
                            <p class="subtitle">"Price"</p>
                            <p>{format_eth(product.price_eth)}</p>
                        </div>
                    </div>
                </div>
            })}

            <Toast message=toast/>
        </main>
    }
}
