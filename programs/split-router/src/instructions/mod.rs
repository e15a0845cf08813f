pub mod initialize_factory;
pub use initialize_factory::*;

pub mod create_router;
pub use create_router::*;

pub mod compute_router_address;
pub use compute_router_address::*;

pub mod distribute;
pub use distribute::*;

pub mod distribute_with_authorization;
pub use distribute_with_authorization::*;

pub mod update_config;
pub use update_config::*;

pub mod manage_roles;
pub use manage_roles::*;

pub mod circuit_breaker;
pub use circuit_breaker::*;

pub mod preview_split;
pub use preview_split::*;
