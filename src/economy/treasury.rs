use serde::{Deserialize, Serialize};

/// Coins held by an empire
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Treasury {
    coins: u64,
}

impl Treasury {
    pub fn new(coins: u64) -> Self {
        Treasury { coins }
    }

    pub fn total(&self) -> u64 {
        self.coins
    }

    /// Add coins
    pub fn add(&mut self, amount: u64) {
        self.coins = self.coins.saturating_add(amount);
    }

    /// Subtract coins, stopping at zero
    pub fn subtract(&mut self, amount: u64) {
        self.coins = self.coins.saturating_sub(amount);
    }

    /// True while minting may still add coins
    pub fn below(&self, max: u64) -> bool {
        self.coins < max
    }
}
