pub mod address;
pub mod breaker;
pub mod distribution;
pub mod ledger;
pub mod lock;
pub mod permit;
pub mod roles;
pub mod scoped_allowance;
pub mod spl_ledger;
pub mod split;

#[cfg(test)]
pub(crate) mod testing;

pub use address::{compute_router_address, InstanceArgs};
pub use breaker::CircuitBreaker;
pub use distribution::DistributionEngine;
pub use ledger::{Ledger, OfflineAuthorization};
pub use roles::{Role, RoleStore};
pub use spl_ledger::{PermitAccounts, SplLedger};
pub use split::{compute_split, SplitAmounts};
