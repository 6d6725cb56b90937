//! Adventure player

pub const MAX_PATIENCE: u32 = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    name: String,
    patience: u32,
}

impl Player {
    /// New player with full patience
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            patience: MAX_PATIENCE,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn patience(&self) -> u32 {
        self.patience
    }

    /// Lower patience, stopping at zero
    pub fn decrease_patience(&mut self, amount: u32) {
        self.patience = self.patience.saturating_sub(amount);
    }

    /// Raise patience, capped at [`MAX_PATIENCE`]
    pub fn increase_patience(&mut self, amount: u32) {
        self.patience = self.patience.saturating_add(amount).min(MAX_PATIENCE);
    }

    pub fn has_patience(&self) -> bool {
        self.patience > 0
    }
}
