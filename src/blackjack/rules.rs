//! Table rule variations

use serde::{Deserialize, Serialize};

/// Rule switches for the simplified game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRules {
    /// Dealer draws on a soft 17 instead of standing.
    pub dealer_hits_soft_17: bool,
    /// Whether a player already holding 21 may double down. When forbidden,
    /// a double-down request on 21 is played as a stand.
    pub allow_double_on_21: bool,
}

impl TableRules {
    pub fn with_dealer_hits_soft_17(mut self, hits: bool) -> Self {
        self.dealer_hits_soft_17 = hits;
        self
    }

    pub fn with_double_on_21(mut self, allowed: bool) -> Self {
        self.allow_double_on_21 = allowed;
        self
    }
}

impl Default for TableRules {
    fn default() -> Self {
        Self {
            dealer_hits_soft_17: true,
            allow_double_on_21: false,
        }
    }
}
