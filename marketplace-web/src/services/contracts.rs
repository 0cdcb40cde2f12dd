//! Thin contract-call wrappers over ethers.js proxies.
//!
//! The proxy mechanism itself is external: given an address, an ABI, and a
//! signer or read-only provider, ethers.js returns a callable object whose
//! methods map one-to-one onto the deployed contract. This module only
//! constructs and invokes such proxies; arguments travel to the JS side as
//! JSON arrays and results come back as strings.
//!
//! Contract addresses resolve from the embedded build artifacts (the
//! `networks` map written by the migration), with compile-time overrides
//! for deployments that are not recorded in the artifact.

use std::collections::BTreeMap;

use serde::Deserialize;
use wasm_bindgen::prelude::*;

use shared::dto::{BatchStatus, UserProfileInfo, UserRole};

use crate::error::{AppError, Result};
use crate::services::eip1193::{InjectedProvider, JsSigner};
use crate::services::js_error_message;
use crate::utils::constants;

const USER_PROFILE_ARTIFACT: &str = include_str!("../../abi/UserProfile.json");
const BATCH_NFT_ARTIFACT: &str = include_str!("../../abi/BatchNFT.json");

#[wasm_bindgen(inline_js = "
export function contractAt(address, abiJson, signerOrProvider) {
    return new window.ethers.Contract(address, JSON.parse(abiJson), signerOrProvider);
}

export async function contractSend(contract, method, argsJson) {
    const tx = await contract[method](...JSON.parse(argsJson));
    return await tx.wait();
}

export async function contractRead(contract, method, argsJson) {
    const value = await contract[method](...JSON.parse(argsJson));
    return value === null || value === undefined ? null : value.toString();
}

export function receiptEventArg(receipt, eventName, argName) {
    const events = receipt.events || receipt.logs || [];
    for (const ev of events) {
        const name = ev.eventName || ev.event;
        if (name === eventName && ev.args && ev.args[argName] !== undefined) {
            return ev.args[argName].toString();
        }
    }
    return null;
}
")]
extern "C" {
    /// Construct an ethers.js Contract proxy
    fn contractAt(address: &str, abi_json: &str, signer_or_provider: &JsValue) -> JsValue;

    /// Invoke a state-changing method and wait for the receipt
    #[wasm_bindgen(catch)]
    async fn contractSend(
        contract: &JsValue,
        method: &str,
        args_json: &str,
    ) -> std::result::Result<JsValue, JsValue>;

    /// Invoke a view method and return its stringified result
    #[wasm_bindgen(catch)]
    async fn contractRead(
        contract: &JsValue,
        method: &str,
        args_json: &str,
    ) -> std::result::Result<JsValue, JsValue>;

    /// Pull one event argument out of a transaction receipt
    fn receiptEventArg(receipt: &JsValue, event_name: &str, arg_name: &str) -> Option<String>;
}

/// Truffle-style build artifact: the ABI plus the per-network deployment
/// records written by the migration.
#[derive(Debug, Clone, Deserialize)]
pub struct ContractArtifact {
    pub abi: serde_json::Value,
    #[serde(default)]
    pub networks: BTreeMap<String, NetworkDeployment>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NetworkDeployment {
    pub address: String,
}

impl ContractArtifact {
    fn parse(raw: &str) -> Result<Self> {
        serde_json::from_str(raw)
            .map_err(|err| AppError::Upstream(format!("invalid contract artifact: {}", err)))
    }

    /// Address recorded for the first deployed network. `BTreeMap` keeps
    /// the choice deterministic when an artifact carries several networks.
    pub fn deployed_address(&self) -> Result<&str> {
        self.networks
            .values()
            .next()
            .map(|deployment| deployment.address.as_str())
            .ok_or_else(|| AppError::Upstream("contract not deployed on any network".to_string()))
    }

    pub fn abi_json(&self) -> String {
        self.abi.to_string()
    }
}

pub fn user_profile_artifact() -> Result<ContractArtifact> {
    ContractArtifact::parse(USER_PROFILE_ARTIFACT)
}

pub fn batch_nft_artifact() -> Result<ContractArtifact> {
    ContractArtifact::parse(BATCH_NFT_ARTIFACT)
}

/// UserProfile contract address: compile-time override first, then the
/// artifact's networks map.
pub fn user_profile_address() -> Result<String> {
    if let Some(address) = constants::USERPROFILE_ADDRESS_OVERRIDE {
        return Ok(address.to_string());
    }
    Ok(user_profile_artifact()?.deployed_address()?.to_string())
}

/// Proxy for the UserProfile registry contract.
pub struct UserProfileContract {
    inner: JsValue,
}

impl UserProfileContract {
    /// Transaction-capable proxy bound to the session signer.
    pub fn with_signer(signer: &JsSigner) -> Result<Self> {
        let artifact = user_profile_artifact()?;
        let address = user_profile_address()?;
        Ok(Self {
            inner: contractAt(&address, &artifact.abi_json(), signer.as_js()),
        })
    }

    /// Read-only proxy; needs a detected provider but no account approval.
    pub fn read_only(provider: &InjectedProvider) -> Result<Self> {
        let artifact = user_profile_artifact()?;
        let address = user_profile_address()?;
        Ok(Self {
            inner: contractAt(&address, &artifact.abi_json(), &provider.read_only()),
        })
    }

    /// Register or update the caller's profile; waits for the receipt.
    pub async fn set_profile(&self, role: UserRole, username: &str) -> Result<()> {
        let args = serde_json::json!([role.as_u8(), username]).to_string();
        contractSend(&self.inner, "setUserProfile", &args)
            .await
            .map(|_receipt| ())
            .map_err(|err| AppError::Upstream(js_error_message(&err)))
    }

    /// Profile registered for `address`, or `None` when unregistered.
    pub async fn profile_of(&self, address: &str) -> Result<Option<UserProfileInfo>> {
        let args = serde_json::json!([address]).to_string();
        let raw = contractRead(&self.inner, "getUserProfile", &args)
            .await
            .map_err(|err| AppError::Upstream(js_error_message(&err)))?;
        match raw.as_string() {
            Some(raw) => parse_profile_tuple(&raw),
            None => Ok(None),
        }
    }
}

/// Decode the stringified `(role, username)` tuple an ethers proxy returns
/// for `getUserProfile`. Role `0` means the address never registered.
fn parse_profile_tuple(raw: &str) -> Result<Option<UserProfileInfo>> {
    let (role_raw, username) = raw
        .split_once(',')
        .ok_or_else(|| AppError::Upstream(format!("malformed profile tuple: {}", raw)))?;
    let role_value: u8 = role_raw
        .trim()
        .parse()
        .map_err(|_| AppError::Upstream(format!("malformed profile role: {}", role_raw)))?;
    Ok(UserRole::from_u8(role_value).map(|role| UserProfileInfo {
        role,
        username: username.to_string(),
    }))
}

/// Proxy for the BatchNFT minting contract.
pub struct BatchNftContract {
    inner: JsValue,
}

impl BatchNftContract {
    /// Transaction-capable proxy bound to the session signer.
    pub fn with_signer(signer: &JsSigner) -> Result<Self> {
        let artifact = batch_nft_artifact()?;
        Ok(Self {
            inner: contractAt(
                constants::batch_nft_address(),
                &artifact.abi_json(),
                signer.as_js(),
            ),
        })
    }

    /// Read-only proxy; needs a detected provider but no account approval.
    pub fn read_only(provider: &InjectedProvider) -> Result<Self> {
        let artifact = batch_nft_artifact()?;
        Ok(Self {
            inner: contractAt(
                constants::batch_nft_address(),
                &artifact.abi_json(),
                &provider.read_only(),
            ),
        })
    }

    /// Mint a batch NFT to `to` with a content-addressed metadata URI.
    /// The new token id comes from the `BatchMinted` event in the receipt.
    pub async fn mint_batch(&self, to: &str, token_uri: &str) -> Result<u64> {
        let args = serde_json::json!([to, token_uri]).to_string();
        let receipt = contractSend(&self.inner, "mintBatch", &args)
            .await
            .map_err(|err| AppError::Upstream(js_error_message(&err)))?;

        let token_id = receiptEventArg(&receipt, "BatchMinted", "tokenId")
            .ok_or_else(|| AppError::Upstream("BatchMinted event not found in receipt".to_string()))?;
        token_id
            .parse()
            .map_err(|_| AppError::Upstream(format!("unparseable token id: {}", token_id)))
    }

    /// Metadata URI stored for a minted batch.
    pub async fn batch_metadata(&self, token_id: u64) -> Result<String> {
        let args = serde_json::json!([token_id]).to_string();
        let raw = contractRead(&self.inner, "batchMetadata", &args)
            .await
            .map_err(|err| AppError::Upstream(js_error_message(&err)))?;
        raw.as_string()
            .ok_or_else(|| AppError::Upstream(format!("no metadata recorded for token {}", token_id)))
    }

    /// Supply-chain status stored for a minted batch.
    pub async fn batch_status(&self, token_id: u64) -> Result<Option<BatchStatus>> {
        let args = serde_json::json!([token_id]).to_string();
        let raw = contractRead(&self.inner, "batchStatus", &args)
            .await
            .map_err(|err| AppError::Upstream(js_error_message(&err)))?;
        let Some(raw) = raw.as_string() else {
            return Ok(None);
        };
        let value: u8 = raw
            .trim()
            .parse()
            .map_err(|_| AppError::Upstream(format!("malformed batch status: {}", raw)))?;
        Ok(BatchStatus::from_u8(value))
    }

    /// Advance the supply-chain status of a minted batch.
    pub async fn update_batch_status(&self, token_id: u64, status: BatchStatus) -> Result<()> {
        let args = serde_json::json!([token_id, status.as_u8()]).to_string();
        contractSend(&self.inner, "updateBatchStatus", &args)
            .await
            .map(|_receipt| ())
            .map_err(|err| AppError::Upstream(js_error_message(&err)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_artifacts_parse() {
        let user_profile = user_profile_artifact().unwrap();
        assert!(user_profile.abi.is_array());
        assert_eq!(
            user_profile.deployed_address().unwrap(),
            "0x9fBDa871d559710256a2502A2517b794B482Db40"
        );

        let batch_nft = batch_nft_artifact().unwrap();
        assert!(batch_nft.abi.is_array());
        assert!(batch_nft.deployed_address().is_ok());
    }

    #[test]
    fn test_deployed_address_missing_networks() {
        let artifact = ContractArtifact::parse(r#"{"abi": []}"#).unwrap();
        assert!(artifact.deployed_address().is_err());
    }

    #[test]
    fn test_parse_profile_tuple() {
        let profile = parse_profile_tuple("2,alice").unwrap().unwrap();
        assert_eq!(profile.role, UserRole::Farmer);
        assert_eq!(profile.username, "alice");
    }

    #[test]
    fn test_parse_profile_tuple_unregistered() {
        assert_eq!(parse_profile_tuple("0,").unwrap(), None);
    }

    #[test]
    fn test_parse_profile_tuple_username_with_comma() {
        let profile = parse_profile_tuple("1,bean, hunter").unwrap().unwrap();
        assert_eq!(profile.role, UserRole::Buyer);
        assert_eq!(profile.username, "bean, hunter");
    }

    #[test]
    fn test_parse_profile_tuple_malformed() {
        assert!(parse_profile_tuple("not a tuple").is_err());
        assert!(parse_profile_tuple("role,alice").is_err());
    }
}
