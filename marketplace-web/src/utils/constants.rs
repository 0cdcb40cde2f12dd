//! Application constants
//!
//! Endpoint and address values are baked in at compile time; each has an
//! environment override resolved with `option_env!` so a deployment can
//! retarget without touching the source.

/// Upload endpoint accepting a single-file POST and answering `{"cid": ...}`.
const DEFAULT_UPLOAD_ENDPOINT: &str = "/api/upload";

/// BatchNFT deployment on the development network.
const DEFAULT_BATCH_NFT_ADDRESS: &str = "0x4A1628B149b78F4b04820f5fe9B29b2F30c0cA46";

/// Compile-time override for the UserProfile contract address; when unset
/// the address recorded in the embedded artifact wins.
pub const USERPROFILE_ADDRESS_OVERRIDE: Option<&str> = option_env!("USERPROFILE_ADDRESS");

pub fn upload_endpoint() -> &'static str {
    option_env!("UPLOAD_ENDPOINT").unwrap_or(DEFAULT_UPLOAD_ENDPOINT)
}

pub fn batch_nft_address() -> &'static str {
    option_env!("BATCHNFT_ADDRESS").unwrap_or(DEFAULT_BATCH_NFT_ADDRESS)
}

// Marketplace filter options
pub const PRODUCT_TYPES: &[&str] = &["Arabica", "Robusta", "Liberica", "Excelsa", "Geisha", "Blend"];
pub const PROCESS_TYPES: &[&str] = &["Natural", "Washed", "Honey Process", "Mixed Process"];

/// Price buckets as (min ETH, max ETH, label).
pub const PRICE_RANGES: &[(f64, f64, &str)] = &[
    (0.010, 0.015, "0.010 - 0.015 ETH"),
    (0.016, 0.025, "0.016 - 0.025 ETH"),
    (0.026, 0.050, "0.026 - 0.050 ETH"),
];

// UI constants
pub const TOAST_DISMISS_MS: u32 = 4000;
