//! Minting Page - farmer batch form, artwork upload, and NFT mint
//!
//! The flow is strictly sequential: validate the form, upload the artwork,
//! mint with the resulting `ipfs://` URI, then read the recorded metadata
//! and status back for display. A mint failure after a successful upload
//! leaves the uploaded artwork orphaned; there is no compensating delete.

use chrono::NaiveDate;
use leptos::prelude::*;
use web_sys::{File, HtmlInputElement};

use lib_wallet::WalletError;
use shared::dto::{BatchTimeline, MintedBatch};

use crate::components::{Toast, ToastMessage};
use crate::error::{AppError, Result};
use crate::services::contracts::BatchNftContract;
use crate::services::upload::upload_file;
use crate::state::wallet::{use_wallet_context, WalletContext};
use crate::utils::format::{format_eth, format_token_id};

/// Raw form fields as entered; everything is a string until validation.
#[derive(Debug, Clone, Default, PartialEq)]
struct MintForm {
    name: String,
    origin: String,
    process: String,
    description: String,
    price_eth: String,
    quantity: String,
    harvested: String,
    roasted: String,
    packed: String,
}

/// Form fields after validation, ready to accompany a mint.
#[derive(Debug, Clone, PartialEq)]
struct ValidatedBatch {
    name: String,
    origin: String,
    process: String,
    description: String,
    price_eth: f64,
    quantity: u32,
    timeline: BatchTimeline,
}

fn parse_date(raw: &str, label: &str) -> std::result::Result<NaiveDate, String> {
    raw.trim()
        .parse()
        .map_err(|_| format!("{} date must be YYYY-MM-DD", label))
}

impl MintForm {
    fn validate(&self) -> std::result::Result<ValidatedBatch, String> {
        let required = [
            ("Batch name", &self.name),
            ("Origin", &self.origin),
            ("Process", &self.process),
            ("Description", &self.description),
            ("Price", &self.price_eth),
            ("Quantity", &self.quantity),
            ("Harvested", &self.harvested),
            ("Roasted", &self.roasted),
            ("Packed", &self.packed),
        ];
        for (label, value) in required {
            if value.trim().is_empty() {
                return Err(format!("{} is required", label));
            }
        }

        let price_eth: f64 = self
            .price_eth
            .trim()
            .parse()
            .map_err(|_| "Price must be a number".to_string())?;
        if price_eth <= 0.0 {
            return Err("Price must be positive".to_string());
        }

        let quantity: u32 = self
            .quantity
            .trim()
            .parse()
            .map_err(|_| "Quantity must be a whole number".to_string())?;
        if quantity == 0 {
            return Err("Quantity must be at least 1".to_string());
        }

        Ok(ValidatedBatch {
            name: self.name.trim().to_string(),
            origin: self.origin.trim().to_string(),
            process: self.process.trim().to_string(),
            description: self.description.trim().to_string(),
            price_eth,
            quantity,
            timeline: BatchTimeline {
                harvested: parse_date(&self.harvested, "Harvested")?,
                roasted: parse_date(&self.roasted, "Roasted")?,
                packed: parse_date(&self.packed, "Packed")?,
            },
        })
    }
}

/// Upload the artwork, mint against the BatchNFT contract, and read the
/// recorded metadata back.
async fn mint_batch_flow(wallet: WalletContext, file: &File) -> Result<MintedBatch> {
    let token_uri = upload_file(file).await?;

    let signer = match wallet.signer() {
        Some(signer) => signer,
        None => {
            wallet.connect().await?;
            wallet.signer().ok_or(AppError::Wallet(WalletError::ConnectFailed(
                "wallet session is empty after connect".to_string(),
            )))?
        }
    };
    let to = wallet.address().ok_or(AppError::Wallet(WalletError::ConnectFailed(
        "no connected account".to_string(),
    )))?;

    let contract = BatchNftContract::with_signer(&signer)?;
    let token_id = contract.mint_batch(&to, &token_uri).await?;

    // Read back what the contract actually recorded for display.
    let metadata = contract.batch_metadata(token_id).await?;
    let status = contract.batch_status(token_id).await?;

    Ok(MintedBatch {
        token_id,
        token_uri: metadata,
        status,
    })
}

#[component]
pub fn MintingPage() -> impl IntoView {
    let wallet = use_wallet_context();

    let toast = RwSignal::new(None::<ToastMessage>);
    let form = RwSignal::new(MintForm::default());
    let (minting, set_minting) = signal(false);
    let (minted, set_minted) = signal(None::<MintedBatch>);
    let (preview, set_preview) = signal(None::<ValidatedBatch>);

    let picked_file = StoredValue::new_local(None::<File>);
    let (file_name, set_file_name) = signal(None::<String>);

    let on_file_change = move |ev: web_sys::Event| {
        let input = event_target::<HtmlInputElement>(&ev);
        let picked = input.files().and_then(|files| files.get(0));
        set_file_name.set(picked.as_ref().map(|file| file.name()));
        picked_file.set_value(picked);
    };

    let handle_mint = move |_| {
        let validated = match form.get_untracked().validate() {
            Ok(validated) => validated,
            Err(message) => {
                toast.set(Some(ToastMessage::error(message)));
                return;
            }
        };
        let Some(file) = picked_file.get_value() else {
            toast.set(Some(ToastMessage::error("Select a file first!")));
            return;
        };

        set_minting.set(true);
        leptos::task::spawn_local(async move {
            let outcome = mint_batch_flow(wallet, &file).await;
            set_minting.set(false);
            match outcome {
                Ok(batch) => {
                    set_minted.set(Some(batch));
                    set_preview.set(Some(validated));
                    toast.set(Some(ToastMessage::success("Batch NFT minted!")));
                }
                Err(err) => {
                    log::error!("mint failed: {}", err);
                    toast.set(Some(ToastMessage::error(format!("Minting failed: {}", err))));
                }
            }
        });
    };

    let text_input = move |label: &'static str,
                           placeholder: &'static str,
                           read: fn(&MintForm) -> &String,
                           write: fn(&mut MintForm, String)| {
        view! {
            <label style="display: flex; flex-direction: column; gap: 4px;">
                <span class="subtitle" style="font-size: 0.85em;">{label}</span>
                <input
                    placeholder=placeholder
                    prop:value=move || form.with(|f| read(f).clone())
                    on:input=move |ev| form.update(|f| write(f, event_target_value(&ev)))
                    style="border: 1px solid #d4d4d4; border-radius: 8px; padding: 10px 12px;"
                />
            </label>
        }
    };

    let date_input = move |label: &'static str,
                           read: fn(&MintForm) -> &String,
                           write: fn(&mut MintForm, String)| {
        view! {
            <label style="display: flex; flex-direction: column; gap: 4px; width: 100%;">
                <span class="subtitle" style="font-size: 0.85em;">{label}</span>
                <input
                    type="date"
                    prop:value=move || form.with(|f| read(f).clone())
                    on:input=move |ev| form.update(|f| write(f, event_target_value(&ev)))
                    style="border: 1px solid #d4d4d4; border-radius: 8px; padding: 10px 12px;"
                />
            </label>
        }
    };

    view! {
        <main style="max-width: 960px; margin: 0 auto; padding: 40px 16px; display: flex; flex-direction: column; gap: 24px;">
            <h1 style="font-size: 24px; font-weight: 700; text-align: center;">"Mint New Batch NFT"</h1>

            <div style="display: flex; gap: 32px; align-items: start;">
                // Left: form
                <div class="card" style="flex: 1; display: flex; flex-direction: column; gap: 12px; padding: 24px;">
                    {text_input("Batch name", "Batch Arabica Kintamani #A1", |f| &f.name, |f, v| f.name = v)}
                    {text_input("Origin", "Kintamani, Bali", |f| &f.origin, |f, v| f.origin = v)}
                    {text_input("Process", "Natural / Washed / Honey", |f| &f.process, |f, v| f.process = v)}
                    {text_input("Description", "Tasting notes, lot details", |f| &f.description, |f, v| f.description = v)}
                    {text_input("Price (ETH)", "0.015", |f| &f.price_eth, |f, v| f.price_eth = v)}
                    {text_input("Quantity", "120", |f| &f.quantity, |f, v| f.quantity = v)}

                    <span class="subtitle" style="margin-top: 8px;">"Timeline"</span>
                    <div style="display: flex; gap: 8px;">
                        {date_input("Harvested", |f| &f.harvested, |f, v| f.harvested = v)}
                        {date_input("Roasted", |f| &f.roasted, |f, v| f.roasted = v)}
                        {date_input("Packed", |f| &f.packed, |f, v| f.packed = v)}
                    </div>

                    <button
                        class="btn"
                        style="margin-top: 16px;"
                        disabled=move || minting.get()
                        on:click=handle_mint
                    >
                        {move || if minting.get() { "Minting..." } else { "Mint Batch NFT" }}
                    </button>
                </div>

                // Right: artwork picker and mint outcome
                <div style="flex: 1; display: flex; flex-direction: column; gap: 16px;">
                    <label class="card" style="cursor: pointer; border-style: dashed; text-align: center; padding: 24px; color: #666666;">
                        <span>
                            {move || file_name.get().unwrap_or_else(|| "Choose batch artwork".to_string())}
                        </span>
                        <input type="file" style="display: none;" on:change=on_file_change/>
                    </label>

                    {move || minted.get().map(|batch| {
                        let status_label = batch.status.map(|s| s.label()).unwrap_or("Unknown");
                        view! {
                            <div class="card" style="padding: 24px;">
                                <h2 style="font-weight: 700; margin-bottom: 8px;">
                                    "Batch " {format_token_id(batch.token_id)} " minted"
                                </h2>
                                <p class="subtitle" style="margin-bottom: 4px;">"Metadata URI"</p>
                                <p style="font-family: monospace; word-break: break-all; margin-bottom: 12px;">
                                    {batch.token_uri.clone()}
                                </p>
                                <p class="subtitle" style="margin-bottom: 4px;">"Status"</p>
                                <p style="margin-bottom: 12px;">{status_label}</p>
                                {move || preview.get().map(|batch_preview| view! {
                                    <div>
                                        <p class="subtitle" style="margin-bottom: 4px;">"Listing preview"</p>
                                        <p style="font-weight: 600;">{batch_preview.name.clone()}</p>
                                        <p>{batch_preview.origin.clone()} " \u{00b7} " {batch_preview.process.clone()}</p>
                                        <p>
                                            {format_eth(batch_preview.price_eth)}
                                            " \u{00b7} harvested "
                                            {batch_preview.timeline.harvested.to_string()}
                                        </p>
                                    </div>
                                })}
                            </div>
                        }
                    })}
                </div>
            </div>

            <Toast message=toast/>
        </main>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> MintForm {
        MintForm {
            name: "Batch Arabica Kintamani #A1".to_string(),
            origin: "Kintamani, Bali".to_string(),
            process: "Natural".to_string(),
            description: "Fruity, bright".to_string(),
            price_eth: "0.015".to_string(),
            quantity: "120".to_string(),
            harvested: "2024-07-12".to_string(),
            roasted: "2024-07-20".to_string(),
            packed: "2024-07-22".to_string(),
        }
    }

    #[test]
    fn test_validate_accepts_filled_form() {
        let batch = filled_form().validate().unwrap();
        assert_eq!(batch.price_eth, 0.015);
        assert_eq!(batch.quantity, 120);
        assert_eq!(batch.timeline.harvested.to_string(), "2024-07-12");
    }

    #[test]
    fn test_validate_rejects_missing_field() {
        let mut form = filled_form();
        form.origin.clear();
        assert_eq!(form.validate().unwrap_err(), "Origin is required");
    }

    #[test]
    fn test_validate_rejects_bad_price() {
        let mut form = filled_form();
        form.price_eth = "free".to_string();
        assert_eq!(form.validate().unwrap_err(), "Price must be a number");

        form.price_eth = "-1".to_string();
        assert_eq!(form.validate().unwrap_err(), "Price must be positive");
    }

    #[test]
    fn test_validate_rejects_bad_quantity() {
        let mut form = filled_form();
        form.quantity = "0".to_string();
        assert_eq!(form.validate().unwrap_err(), "Quantity must be at least 1");
    }

    #[test]
    fn test_validate_rejects_bad_date() {
        let mut form = filled_form();
        form.packed = "soon".to_string();
        assert_eq!(form.validate().unwrap_err(), "Packed date must be YYYY-MM-DD");
    }
}
