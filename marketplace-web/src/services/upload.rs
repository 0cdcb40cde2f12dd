//! Upload endpoint client.

use gloo_net::http::Request;
use wasm_bindgen::JsValue;
use web_sys::{File, FormData};

use shared::dto::UploadResponse;

use crate::error::{AppError, Result};
use crate::services::js_error_message;
use crate::utils::constants;

/// POST a single file to the upload endpoint and return the
/// content-addressed `ipfs://` URI of the stored artifact.
///
/// Failures map to the upstream bucket. A mint that fails after this call
/// succeeds leaves the upload orphaned; no compensating delete exists.
pub async fn upload_file(file: &File) -> Result<String> {
    let form = FormData::new().map_err(|err| AppError::Upstream(js_error_message(&err)))?;
    form.append_with_blob("file", file)
        .map_err(|err| AppError::Upstream(js_error_message(&err)))?;

    let response = Request::post(constants::upload_endpoint())
        .body(JsValue::from(form))
        .map_err(|err| AppError::Upstream(format!("failed to build upload request: {}", err)))?
        .send()
        .await
        .map_err(|err| AppError::Upstream(format!("upload request failed: {}", err)))?;

    if !response.ok() {
        return Err(AppError::Upstream(format!(
            "upload failed with status {}",
            response.status()
        )));
    }

    let body: UploadResponse = response
        .json()
        .await
        .map_err(|err| AppError::Upstream(format!("malformed upload response: {}", err)))?;
    if body.cid.is_empty() {
        return Err(AppError::Upstream("upload response carried no cid".to_string()));
    }

    log::info!("uploaded batch artwork: {}", body.cid);
    Ok(body.ipfs_uri())
}
