//! Toast Notice Component
//!
//! Every caught failure in the app ends up here as a dismissable notice;
//! notices also auto-dismiss after a few seconds.

use leptos::prelude::*;

use crate::utils::constants::TOAST_DISMISS_MS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastMessage {
    pub text: String,
    pub kind: ToastKind,
}

impl ToastMessage {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: ToastKind::Success,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: ToastKind::Error,
        }
    }
}

#[component]
pub fn Toast(message: RwSignal<Option<ToastMessage>>) -> impl IntoView {
    Effect::new(move || {
        let Some(active) = message.get() else {
            return;
        };
        leptos::task::spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(TOAST_DISMISS_MS).await;
            // Only dismiss if a newer notice hasn't replaced this one.
            message.update(|slot| {
                if slot.as_ref() == Some(&active) {
                    *slot = None;
                }
            });
        });
    });

    view! {
        {move || message.get().map(|toast| {
            let accent = match toast.kind {
                ToastKind::Success => "#16a34a",
                ToastKind::Error => "#dc2626",
            };
            view! {
                <div
                    class="toast"
                    style=format!(
                        "position: fixed; bottom: 24px; left: 50%; transform: translateX(-50%); \
                         background: #ffffff; border: 1px solid #e5e5e5; border-left: 4px solid {}; \
                         border-radius: 8px; padding: 12px 16px; display: flex; gap: 12px; \
                         align-items: center; box-shadow: 0 4px 12px rgba(0,0,0,0.12);",
                        accent,
                    )
                >
                    <span>{toast.text.clone()}</span>
                    <button
                        style="border: none; background: none; cursor: pointer; font-size: 1.1em;"
                        on:click=move |_| message.set(None)
                    >
                        "\u{00d7}"
                    </button>
                </div>
            }
        })}
    }
}
