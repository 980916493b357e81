use std::collections::HashSet;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Technology {
    /// Lets the empire use the workforce at all
    Workforce,
    /// Unlocks skilled production, gardening and trapping
    SkilledLabor,
}

/// Set of technologies owned by an empire
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Technologies(pub HashSet<Technology>);

impl Technologies {
    pub fn new() -> Self {
        Self(HashSet::new())
    }

    pub fn has(&self, tech: Technology) -> bool {
        self.0.contains(&tech)
    }

    pub fn unlock(&mut self, tech: Technology) {
        self.0.insert(tech);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlock_is_idempotent() {
        let mut techs = Technologies::new();
        assert!(!techs.has(Technology::Workforce));
        techs.unlock(Technology::Workforce);
        techs.unlock(Technology::Workforce);
        assert!(techs.has(Technology::Workforce));
        assert_eq!(techs.0.len(), 1);
    }
}
