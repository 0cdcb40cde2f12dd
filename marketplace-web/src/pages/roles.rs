//! Roles Page - two-step onboarding against the UserProfile contract
//!
//! Step 1 picks a marketplace role, step 2 picks a username; submitting
//! writes both to the UserProfile contract with the session signer.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use lib_wallet::WalletError;
use shared::dto::UserRole;

use crate::components::{Toast, ToastMessage};
use crate::error::{AppError, Result};
use crate::services::contracts::UserProfileContract;
use crate::state::wallet::{use_wallet_context, WalletContext};
use crate::utils::url::get_query_param;

/// Register `role` and `username` on chain, connecting first if the
/// session has no signer yet.
async fn submit_profile(wallet: WalletContext, role: UserRole, username: &str) -> Result<()> {
    let signer = match wallet.signer() {
        Some(signer) => signer,
        None => {
            wallet.connect().await?;
            wallet.signer().ok_or(AppError::Wallet(WalletError::ConnectFailed(
                "wallet session is empty after connect".to_string(),
            )))?
        }
    };

    let contract = UserProfileContract::with_signer(&signer)?;
    contract.set_profile(role, username).await
}

fn role_from_param(param: &str) -> Option<UserRole> {
    match param {
        "buyer" => Some(UserRole::Buyer),
        "farmer" => Some(UserRole::Farmer),
        "logistics" => Some(UserRole::Logistics),
        _ => None,
    }
}

#[component]
pub fn RolesPage() -> impl IntoView {
    let wallet = use_wallet_context();
    let navigate = use_navigate();

    let toast = RwSignal::new(None::<ToastMessage>);
    let (step, set_step) = signal(1u8);
    let (selected_role, set_selected_role) = signal(None::<UserRole>);
    let (username, set_username) = signal(String::new());
    let (saving, set_saving) = signal(false);

    // A marketing link may preselect the role (?role=farmer).
    if let Some(preselected) = get_query_param("role").as_deref().and_then(role_from_param) {
        set_selected_role.set(Some(preselected));
        set_step.set(2);
    }

    // Auto-connect so the signer is ready by the time the form submits.
    leptos::task::spawn_local(async move {
        if wallet.is_connected() || wallet.has_logged_out() {
            return;
        }
        match wallet.connect().await {
            Ok(_) | Err(WalletError::ConnectInProgress) => {}
            Err(err) => toast.set(Some(ToastMessage::error(format!(
                "Failed to connect wallet: {}",
                err
            )))),
        }
    });

    let progress = move || if step.get() == 1 { 50 } else { 100 };

    let handle_submit = {
        let navigate = navigate.clone();
        move |_| {
            let Some(role) = selected_role.get_untracked() else {
                toast.set(Some(ToastMessage::error("Pick a role first")));
                return;
            };
            let name = username.get_untracked().trim().to_string();
            if name.is_empty() {
                toast.set(Some(ToastMessage::error("Username is required")));
                return;
            }

            set_saving.set(true);
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                let result = submit_profile(wallet, role, &name).await;
                set_saving.set(false);
                match result {
                    Ok(()) => {
                        toast.set(Some(ToastMessage::success("Profile saved on chain")));
                        navigate("/", Default::default());
                    }
                    Err(err) => {
                        log::error!("profile registration failed: {}", err);
                        toast.set(Some(ToastMessage::error(format!(
                            "Failed to save profile: {}",
                            err
                        ))));
                    }
                }
            });
        }
    };

    view! {
        <div style="min-height: calc(100vh - 60px); display: flex; align-items: center; justify-content: center; padding: 0 16px;">
            <div style="width: 100%; max-width: 640px;">
                // Progress bar
                <div style="height: 8px; background: #e5e5e5; border-radius: 9999px; margin-bottom: 32px; overflow: hidden;">
                    <div style=move || format!(
                        "height: 100%; background: #2563eb; border-radius: 9999px; width: {}%; transition: width 0.4s;",
                        progress(),
                    )></div>
                </div>

                {move || if step.get() == 1 {
                    view! {
                        <div>
                            <h1 style="font-size: 24px; font-weight: 600; margin-bottom: 24px;">
                                "Welcome to Brewify!"
                            </h1>
                            <div style="display: grid; grid-template-columns: repeat(auto-fit, minmax(180px, 1fr)); gap: 16px;">
                                {[UserRole::Buyer, UserRole::Farmer, UserRole::Logistics].into_iter().map(|role| view! {
                                    <button
                                        class="card"
                                        style="text-align: left; cursor: pointer; padding: 20px;"
                                        on:click=move |_| {
                                            set_selected_role.set(Some(role));
                                            set_step.set(2);
                                        }
                                    >
                                        <h3 style="font-weight: 600; margin-bottom: 4px;">{role.label()}</h3>
                                        <p class="subtitle" style="font-size: 0.9em;">{role.tagline()}</p>
                                    </button>
                                }).collect::<Vec<_>>()}
                            </div>
                        </div>
                    }.into_any()
                } else {
                    view! {
                        <div>
                            <button
                                class="btn"
                                style="margin-bottom: 24px;"
                                on:click=move |_| set_step.set(1)
                            >
                                "\u{2190} Back"
                            </button>

                            <h1 style="font-size: 24px; font-weight: 600; margin-bottom: 24px;">
                                {move || selected_role.get()
                                    .map(|role| format!("Signing up as {}", role.label()))
                                    .unwrap_or_else(|| "Let's get acquainted!".to_string())}
                            </h1>

                            <div style="display: flex; flex-direction: column; gap: 16px;">
                                <input
                                    placeholder="Enter a username"
                                    prop:value=move || username.get()
                                    on:input=move |ev| set_username.set(event_target_value(&ev))
                                    style="border: 1px solid #d4d4d4; border-radius: 9999px; padding: 12px 16px;"
                                />
                                <button
                                    class="btn"
                                    disabled=move || saving.get()
                                    on:click=handle_submit.clone()
                                >
                                    {move || if saving.get() { "Saving..." } else { "Submit" }}
                                </button>
                            </div>
                        </div>
                    }.into_any()
                }}
            </div>

            <Toast message=toast/>
        </div>
    }
}
