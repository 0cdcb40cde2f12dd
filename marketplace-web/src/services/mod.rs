//! JS interop and HTTP service layer.
//!
//! - [`eip1193`] - injected wallet provider adapter + change notifications
//! - [`contracts`] - ethers.js contract proxies for UserProfile / BatchNFT
//! - [`upload`] - upload endpoint client

pub mod contracts;
pub mod eip1193;
pub mod upload;

use wasm_bindgen::JsValue;

/// Best-effort human-readable message out of a JS exception value.
pub(crate) fn js_error_message(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    js_sys::Reflect::get(value, &JsValue::from_str("message"))
        .ok()
        .and_then(|message| message.as_string())
        .unwrap_or_else(|| format!("{:?}", value))
}
