//! # Shared Utility Functions
//!
//! Common utility functions used across the marketplace front-end and the
//! deployment tooling.
//!
//! ## Address Formatting
//!
//! Functions for formatting hex wallet addresses for display:
//! - [`format_address`] - Format address with ellipsis (first N and last M characters)
//! - [`truncate_address`] - Alias for `format_address` with default parameters
//!
//! ## Usage
//!
//! ```rust
//! use shared::utils::format_address;
//!
//! let address = "0x4A1628B149b78F4b04820f5fe9B29b2F30c0cA46";
//! let formatted = format_address(address, 6, 4);
//! assert_eq!(formatted, "0x4A16...cA46");
//! ```

/// Format a wallet address by showing the first `prefix_len` and last `suffix_len` characters.
///
/// If the address is shorter than `prefix_len + suffix_len`, it is returned as-is.
///
/// # Arguments
///
/// * `address` - The wallet address to format
/// * `prefix_len` - Number of characters to show at the start
/// * `suffix_len` - Number of characters to show at the end
///
/// # Examples
///
/// ```rust
/// use shared::utils::format_address;
///
/// let addr = "0x4A1628B149b78F4b04820f5fe9B29b2F30c0cA46";
/// assert_eq!(format_address(addr, 6, 4), "0x4A16...cA46");
/// assert_eq!(format_address(addr, 10, 8), "0x4A1628B1...30c0cA46");
/// assert_eq!(format_address("0xabc", 6, 4), "0xabc");
/// ```
pub fn format_address(address: &str, prefix_len: usize, suffix_len: usize) -> String {
    let address_len = address.len();

    // Return early if address is too short to truncate meaningfully
    // Also guard against individual lengths exceeding address length to prevent panics
    if address_len <= prefix_len + suffix_len
        || prefix_len >= address_len
        || suffix_len >= address_len
    {
        return address.to_string();
    }

    // Safe to slice: we've verified prefix_len and suffix_len are within bounds
    // Hex addresses are ASCII-only, so byte indexing is character indexing
    let prefix = &address[..prefix_len];
    let suffix = &address[address_len - suffix_len..];

    format!("{}...{}", prefix, suffix)
}

/// Format a wallet address with a default 6-character prefix (covering the
/// `0x` tag) and 4-character suffix.
///
/// # Examples
///
/// ```rust
/// use shared::utils::truncate_address;
///
/// let addr = "0x4A1628B149b78F4b04820f5fe9B29b2F30c0cA46";
/// assert_eq!(truncate_address(addr), "0x4A16...cA46");
/// ```
pub fn truncate_address(address: &str) -> String {
    format_address(address, 6, 4)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_address() {
        let addr = "0x4A1628B149b78F4b04820f5fe9B29b2F30c0cA46";
        assert_eq!(format_address(addr, 6, 4), "0x4A16...cA46");
        assert_eq!(format_address(addr, 10, 8), "0x4A1628B1...30c0cA46");
        assert_eq!(format_address(addr, 2, 2), "0x...46");
    }

    #[test]
    fn test_format_address_short() {
        assert_eq!(format_address("0xabc", 6, 4), "0xabc");
        assert_eq!(format_address("abc", 4, 4), "abc");
    }

    #[test]
    fn test_truncate_address() {
        let addr = "0x4A1628B149b78F4b04820f5fe9B29b2F30c0cA46";
        assert_eq!(truncate_address(addr), "0x4A16...cA46");
    }
}
