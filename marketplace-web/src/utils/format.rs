//! # Formatting Utilities for the Marketplace
//!
//! Value formatting specific to the marketplace pages. For address
//! formatting, use `shared::utils::format_address` or
//! `shared::utils::truncate_address`.

/// Format an ETH amount for display with three decimal places and unit.
pub fn format_eth(amount: f64) -> String {
    format!("{:.3} ETH", amount)
}

/// Format a batch quantity for display.
pub fn format_quantity(quantity: u32) -> String {
    if quantity == 1 {
        "1 bag".to_string()
    } else {
        format!("{} bags", quantity)
    }
}

/// Format a minted token id the way the marketplace displays it.
pub fn format_token_id(token_id: u64) -> String {
    format!("#{}", token_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_eth() {
        assert_eq!(format_eth(0.015), "0.015 ETH");
        assert_eq!(format_eth(1.0), "1.000 ETH");
    }

    #[test]
    fn test_format_quantity() {
        assert_eq!(format_quantity(1), "1 bag");
        assert_eq!(format_quantity(120), "120 bags");
    }

    #[test]
    fn test_format_token_id() {
        assert_eq!(format_token_id(7), "#7");
    }
}
