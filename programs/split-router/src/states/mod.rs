pub mod router_config;
pub mod role_registry;
pub mod router_factory;
pub mod permit_nonce;

pub use router_config::*;
pub use role_registry::*;
pub use router_factory::*;
pub use permit_nonce::*;
