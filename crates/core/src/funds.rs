//! Project funds - stored figures only, no arithmetic in the core.

use serde::{Deserialize, Serialize};

/// Budget figures for the project, replaced wholesale by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Funds {
    /// Approved budget
    pub budget: u64,
    /// Spent to date
    pub spent: u64,
    /// Projected total cost
    pub projected: u64,
}
