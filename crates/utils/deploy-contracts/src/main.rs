//! # Contract Deployment Utility
//!
//! Deploys a compiled contract artifact to a development node over JSON-RPC.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --package deploy-contracts --bin deploy_contracts -- build/contracts/UserProfile.json
//! ```
//!
//! The program will:
//! 1. Read `RPC_URL` (and optionally `DEPLOYER_ADDRESS`) from the environment
//! 2. Load the artifact and its creation bytecode
//! 3. Submit the creation transaction from the deployer account
//! 4. Poll for the receipt and print the deployed address
//!
//! The node signs the transaction: this targets a development chain with
//! unlocked accounts, the same workflow that produced the artifacts'
//! `networks` maps. No private key ever touches this utility.

use std::env;
use std::fs;
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use serde::Deserialize;
use serde_json::{json, Value};

const DEFAULT_RPC_URL: &str = "http://127.0.0.1:8545";
const DEFAULT_ARTIFACT: &str = "build/contracts/UserProfile.json";

/// Development-chain block gas limit; creation transactions fit well below it.
const DEPLOY_GAS: &str = "0x6691b7";

const RECEIPT_POLL_INTERVAL: Duration = Duration::from_secs(1);
const RECEIPT_POLL_ATTEMPTS: u32 = 30;

/// The slice of a Truffle-style artifact this utility needs.
#[derive(Debug, Deserialize)]
struct Artifact {
    #[serde(rename = "contractName", default)]
    contract_name: String,
    bytecode: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let rpc_url = env::var("RPC_URL").unwrap_or_else(|_| DEFAULT_RPC_URL.to_string());
    let artifact_path = env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_ARTIFACT.to_string());

    println!("============================================");
    println!("  Contract Deployment Utility");
    println!("============================================");
    println!();
    println!("RPC endpoint: {}", rpc_url);
    println!("Artifact:     {}", artifact_path);
    println!();

    let raw = fs::read_to_string(&artifact_path)
        .with_context(|| format!("failed to read artifact {}", artifact_path))?;
    let artifact: Artifact = serde_json::from_str(&raw)
        .with_context(|| format!("invalid artifact {}", artifact_path))?;
    if artifact.bytecode.trim_start_matches("0x").is_empty() {
        bail!("artifact {} carries no creation bytecode", artifact_path);
    }

    let client = reqwest::Client::new();

    let deployer = match env::var("DEPLOYER_ADDRESS") {
        Ok(address) => address,
        Err(_) => first_unlocked_account(&client, &rpc_url).await?,
    };
    println!("Deployer:     {}", deployer);

    let params = deployment_params(&deployer, &artifact.bytecode);
    let tx_hash = rpc_call(&client, &rpc_url, "eth_sendTransaction", params)
        .await?
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| anyhow!("node returned a malformed transaction hash"))?;
    println!("Transaction:  {}", tx_hash);
    println!();
    println!("Waiting for the deployment receipt...");

    let address = await_contract_address(&client, &rpc_url, &tx_hash).await?;
    println!();
    println!("{} deployed at: {}", artifact.contract_name, address);

    Ok(())
}

/// Parameters for the creation transaction.
fn deployment_params(from: &str, bytecode: &str) -> Value {
    let data = if bytecode.starts_with("0x") {
        bytecode.to_string()
    } else {
        format!("0x{}", bytecode)
    };
    json!([{
        "from": from,
        "data": data,
        "gas": DEPLOY_GAS,
    }])
}

/// One JSON-RPC call; unwraps `result` or surfaces the node's error object.
async fn rpc_call(
    client: &reqwest::Client,
    url: &str,
    method: &str,
    params: Value,
) -> Result<Value> {
    let response: Value = client
        .post(url)
        .json(&json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        }))
        .send()
        .await
        .with_context(|| format!("{} request failed", method))?
        .error_for_status()
        .with_context(|| format!("{} returned an HTTP error", method))?
        .json()
        .await
        .with_context(|| format!("{} returned malformed JSON", method))?;

    if let Some(error) = response.get("error") {
        bail!("{} failed: {}", method, error);
    }
    response
        .get("result")
        .cloned()
        .ok_or_else(|| anyhow!("{} returned no result", method))
}

async fn first_unlocked_account(client: &reqwest::Client, url: &str) -> Result<String> {
    let accounts = rpc_call(client, url, "eth_accounts", json!([])).await?;
    accounts
        .as_array()
        .and_then(|list| list.first())
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| anyhow!("node exposes no unlocked accounts; set DEPLOYER_ADDRESS"))
}

/// Poll for the transaction receipt and pull the deployed address out of it.
async fn await_contract_address(
    client: &reqwest::Client,
    url: &str,
    tx_hash: &str,
) -> Result<String> {
    for _ in 0..RECEIPT_POLL_ATTEMPTS {
        let receipt = rpc_call(client, url, "eth_getTransactionReceipt", json!([tx_hash])).await?;
        if receipt.is_null() {
            tokio::time::sleep(RECEIPT_POLL_INTERVAL).await;
            continue;
        }

        if receipt.get("status").and_then(Value::as_str) == Some("0x0") {
            bail!("deployment transaction {} reverted", tx_hash);
        }
        return receipt
            .get("contractAddress")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| anyhow!("receipt for {} carries no contract address", tx_hash));
    }
    bail!(
        "no receipt for {} after {} attempts; is the node mining?",
        tx_hash,
        RECEIPT_POLL_ATTEMPTS
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deployment_params_prefixes_bytecode() {
        let params = deployment_params("0xAbCd", "6080604052");
        assert_eq!(params[0]["from"], "0xAbCd");
        assert_eq!(params[0]["data"], "0x6080604052");
        assert_eq!(params[0]["gas"], DEPLOY_GAS);
    }

    #[test]
    fn test_deployment_params_keeps_existing_prefix() {
        let params = deployment_params("0xAbCd", "0x6080604052");
        assert_eq!(params[0]["data"], "0x6080604052");
    }

    #[test]
    fn test_artifact_parses() {
        let artifact: Artifact = serde_json::from_str(
            r#"{"contractName": "UserProfile", "abi": [], "bytecode": "0x6080"}"#,
        )
        .unwrap();
        assert_eq!(artifact.contract_name, "UserProfile");
        assert_eq!(artifact.bytecode, "0x6080");
    }
}
