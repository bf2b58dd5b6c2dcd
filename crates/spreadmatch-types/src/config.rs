//! Session configuration.
//!
//! The signature and field modulus are properties of the scheme and are
//! not configurable. A session only chooses how many price slots and how
//! many participants it runs with, plus an optional decimal price grid.

use serde::{Deserialize, Serialize};

use crate::{PriceGrid, Result, SpreadmatchError, constants};

/// Parameters of one trading session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Number of price slots `P`.
    pub prices: usize,
    /// Number of participants `N`.
    pub participants: usize,
    /// Optional decimal price ladder; its slot count must equal `prices`.
    pub grid: Option<PriceGrid>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            prices: constants::DEFAULT_PRICES,
            participants: constants::DEFAULT_PARTICIPANTS,
            grid: None,
        }
    }
}

impl SessionConfig {
    #[must_use]
    pub fn new(prices: usize, participants: usize) -> Self {
        Self {
            prices,
            participants,
            grid: None,
        }
    }

    /// Attach a price grid; `prices` is taken from the grid.
    #[must_use]
    pub fn with_grid(mut self, grid: PriceGrid) -> Self {
        self.prices = grid.prices;
        self.grid = Some(grid);
        self
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.prices == 0 || self.prices > constants::MAX_PRICES {
            return Err(SpreadmatchError::Configuration(format!(
                "prices must be in [1, {}], got {}",
                constants::MAX_PRICES,
                self.prices
            )));
        }
        if self.participants == 0 || self.participants > constants::MAX_PARTICIPANTS {
            return Err(SpreadmatchError::Configuration(format!(
                "participants must be in [1, {}], got {}",
                constants::MAX_PARTICIPANTS,
                self.participants
            )));
        }
        if let Some(grid) = &self.grid {
            grid.validate()?;
            if grid.prices != self.prices {
                return Err(SpreadmatchError::Configuration(format!(
                    "grid has {} slots but session has {} prices",
                    grid.prices, self.prices
                )));
            }
        }
        Ok(())
    }
}
