//! Page-level components.

mod market;
mod minting;
mod roles;

pub use market::MarketPage;
pub use minting::MintingPage;
pub use roles::RolesPage;
