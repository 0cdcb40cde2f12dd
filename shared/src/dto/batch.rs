use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A coffee batch as listed on the marketplace.
///
/// Catalog entries mirror the metadata a farmer submits when minting a
/// batch NFT; `price_eth` is the asking price in ETH, `quantity` the number
/// of bags in the batch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: u64,
    pub name: String,
    pub origin: String,
    pub process: String,
    pub notes: String,
    pub price_eth: f64,
    pub quantity: u32,
    pub timeline: BatchTimeline,
    pub image: String,
}

/// Supply-chain timeline dates for one batch. Serializes as ISO-8601
/// date strings, matching the form inputs and the minted metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BatchTimeline {
    pub harvested: NaiveDate,
    pub roasted: NaiveDate,
    pub packed: NaiveDate,
}

/// Supply-chain progression of a minted batch, stored on chain as a small
/// integer by the BatchNFT contract.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BatchStatus {
    Harvested,
    Roasted,
    Packed,
    Shipped,
    Delivered,
}

impl BatchStatus {
    /// On-chain integer representation.
    pub fn as_u8(&self) -> u8 {
        match self {
            BatchStatus::Harvested => 0,
            BatchStatus::Roasted => 1,
            BatchStatus::Packed => 2,
            BatchStatus::Shipped => 3,
            BatchStatus::Delivered => 4,
        }
    }

    /// Decode the integer the contract returns. `None` for values the
    /// contract version in this repository never emits.
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(BatchStatus::Harvested),
            1 => Some(BatchStatus::Roasted),
            2 => Some(BatchStatus::Packed),
            3 => Some(BatchStatus::Shipped),
            4 => Some(BatchStatus::Delivered),
            _ => None,
        }
    }

    /// Human-readable label for display.
    pub fn label(&self) -> &'static str {
        match self {
            BatchStatus::Harvested => "Harvested",
            BatchStatus::Roasted => "Roasted",
            BatchStatus::Packed => "Packed",
            BatchStatus::Shipped => "Shipped",
            BatchStatus::Delivered => "Delivered",
        }
    }
}

/// Outcome of a successful batch mint, assembled from the transaction
/// receipt and the follow-up metadata reads.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MintedBatch {
    pub token_id: u64,
    pub token_uri: String,
    pub status: Option<BatchStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_status_round_trip() {
        for status in [
            BatchStatus::Harvested,
            BatchStatus::Roasted,
            BatchStatus::Packed,
            BatchStatus::Shipped,
            BatchStatus::Delivered,
        ] {
            assert_eq!(BatchStatus::from_u8(status.as_u8()), Some(status));
        }
    }

    #[test]
    fn test_batch_status_unknown_value() {
        assert_eq!(BatchStatus::from_u8(9), None);
    }

    #[test]
    fn test_product_json_shape() {
        let product = Product {
            id: 1,
            name: "Batch Arabica Kintamani #A1".to_string(),
            origin: "Kintamani, Bali".to_string(),
            process: "Natural".to_string(),
            notes: "Fruity, Citrus, Caramel".to_string(),
            price_eth: 0.015,
            quantity: 120,
            timeline: BatchTimeline {
                harvested: NaiveDate::from_ymd_opt(2024, 7, 12).unwrap(),
                roasted: NaiveDate::from_ymd_opt(2024, 7, 20).unwrap(),
                packed: NaiveDate::from_ymd_opt(2024, 7, 22).unwrap(),
            },
            image: "https://example.com/a1.jpg".to_string(),
        };

        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["price_eth"], 0.015);
        assert_eq!(json["timeline"]["harvested"], "2024-07-12");

        let back: Product = serde_json::from_value(json).unwrap();
        assert_eq!(back, product);
    }
}
