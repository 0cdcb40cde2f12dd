//! # Shared Data Transfer Objects Library
//!
//! This library defines the data shapes shared by the marketplace front-end
//! and the contract tooling. All DTOs use JSON serialization via `serde`.
//!
//! ## Structure
//!
//! - **[`dto`]**: Data Transfer Objects
//!   - **[`dto::batch`]**: Coffee batch, catalog product, and status DTOs
//!   - **[`dto::profile`]**: On-chain user-profile and role DTOs
//!   - **[`dto::upload`]**: Upload endpoint response DTOs
//! - **[`utils`]**: Shared utility functions
//!   - **[`utils::format_address`]**: Format wallet addresses for display
//!   - **[`utils::truncate_address`]**: Truncate addresses with ellipsis
//!
//! ## Wire Format
//!
//! All DTOs serialize to JSON with default `serde` behavior: snake_case
//! field names, `Serialize` and `Deserialize` on every type. Role and
//! status enums additionally map to the small integers the contracts store
//! on chain (see [`dto::profile::UserRole`] and [`dto::batch::BatchStatus`]).

pub mod dto;
pub mod utils;

// Re-export commonly used types for convenience
// Note: Wildcard re-exports are used here since shared is a DTO library
// where all exports are meant to be public API
pub use dto::*;
pub use utils::*;
