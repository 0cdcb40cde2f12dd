//! # Data Transfer Objects (DTOs)
//!
//! Data structures shared between the marketplace pages, the contract-call
//! wrappers, and the deployment tooling.
//!
//! ## Module Organization
//!
//! - [`batch`] - Coffee batch catalog entries and on-chain batch status
//! - [`profile`] - On-chain user profile and marketplace roles
//! - [`upload`] - Upload endpoint request/response DTOs
//!
//! ## Serialization Format
//!
//! All DTOs use `serde_json` for JSON serialization:
//!
//! - **Field naming**: snake_case (default serde behavior)
//! - **Enums stored on chain**: carry explicit `as_u8`/`from_u8` mappings,
//!   because the contracts store them as small unsigned integers
//! - **All types**: Implement both `Serialize` and `Deserialize`

pub mod batch;
pub mod profile;
pub mod upload;

pub use batch::*;
pub use profile::*;
pub use upload::*;
