//! Mapping between decimal limit prices and price slots.
//!
//! The protocol only knows slot indices `0..P`. A [`PriceGrid`] fixes the
//! price of slot 0 and the tick between adjacent slots, so client prices
//! and revealed spreads can be expressed in quote currency.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::{Result, Spread, SpreadmatchError};

/// Evenly spaced price ladder: slot `i` has price `base_price + i * tick_size`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceGrid {
    /// Price of slot 0.
    pub base_price: Decimal,
    /// Price granularity between adjacent slots.
    pub tick_size: Decimal,
    /// Number of slots `P`.
    pub prices: usize,
}

impl PriceGrid {
    pub fn new(base_price: Decimal, tick_size: Decimal, prices: usize) -> Result<Self> {
        let grid = Self {
            base_price,
            tick_size,
            prices,
        };
        grid.validate()?;
        Ok(grid)
    }

    pub fn validate(&self) -> Result<()> {
        if self.tick_size <= Decimal::ZERO {
            return Err(SpreadmatchError::Configuration(format!(
                "tick size must be positive, got {}",
                self.tick_size
            )));
        }
        if self.prices == 0 {
            return Err(SpreadmatchError::Configuration(
                "price grid needs at least one slot".into(),
            ));
        }
        Ok(())
    }

    /// Slot index of a decimal price. The price must lie on a tick.
    pub fn slot_of(&self, price: Decimal) -> Result<usize> {
        let offset = price.checked_sub(self.base_price).ok_or_else(|| {
            SpreadmatchError::PriceOutOfRange {
                reason: format!("{price} too far from grid base {}", self.base_price),
            }
        })?;
        if offset < Decimal::ZERO {
            return Err(SpreadmatchError::PriceOutOfRange {
                reason: format!("{price} below grid base {}", self.base_price),
            });
        }
        let ticks = offset.checked_div(self.tick_size).ok_or_else(|| {
            SpreadmatchError::PriceOutOfRange {
                reason: format!("{price} beyond the grid in ticks of {}", self.tick_size),
            }
        })?;
        if ticks.fract() != Decimal::ZERO {
            return Err(SpreadmatchError::PriceOutOfRange {
                reason: format!("{price} not a multiple of tick {}", self.tick_size),
            });
        }
        let slot = ticks
            .to_usize()
            .filter(|slot| *slot < self.prices)
            .ok_or_else(|| SpreadmatchError::PriceOutOfRange {
                reason: format!("{price} beyond the last grid slot {}", self.prices.saturating_sub(1)),
            })?;
        Ok(slot)
    }

    /// Decimal price of a slot index.
    pub fn price_of(&self, slot: usize) -> Result<Decimal> {
        if slot >= self.prices {
            return Err(SpreadmatchError::PriceOutOfRange {
                reason: format!("slot {slot} outside [0, {})", self.prices),
            });
        }
        self.tick_size
            .checked_mul(Decimal::from(slot))
            .and_then(|offset| self.base_price.checked_add(offset))
            .ok_or_else(|| SpreadmatchError::PriceOutOfRange {
                reason: format!("slot {slot} price overflows the decimal range"),
            })
    }

    /// `(ask_price, bid_price)` of a revealed spread.
    pub fn spread_prices(&self, spread: &Spread) -> Result<(Decimal, Decimal)> {
        Ok((self.price_of(spread.ask)?, self.price_of(spread.bid)?))
    }

    /// Highest representable price.
    pub fn max_price(&self) -> Result<Decimal> {
        self.price_of(self.prices.saturating_sub(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> PriceGrid {
        // 100.00, 100.50, ..., 107.50
        PriceGrid::new(Decimal::new(100, 0), Decimal::new(50, 2), 16).unwrap()
    }

    #[test]
    fn slot_and_price_roundtrip() {
        let g = grid();
        assert_eq!(g.slot_of(Decimal::new(100, 0)).unwrap(), 0);
        assert_eq!(g.slot_of(Decimal::new(10250, 2)).unwrap(), 5);
        assert_eq!(g.price_of(5).unwrap(), Decimal::new(10250, 2));
        assert_eq!(g.max_price().unwrap(), Decimal::new(1075, 1));
    }

    #[test]
    fn off_tick_and_out_of_range_rejected() {
        let g = grid();
        for bad in [
            Decimal::new(9950, 2),
            Decimal::new(10025, 2),
            Decimal::new(108, 0),
        ] {
            let err = g.slot_of(bad).unwrap_err();
            assert!(matches!(err, SpreadmatchError::PriceOutOfRange { .. }), "{bad}: {err}");
        }
        assert!(g.price_of(16).is_err());
    }

    #[test]
    fn spread_prices_map_both_ends() {
        let (ask, bid) = grid().spread_prices(&Spread::new(4, 9)).unwrap();
        assert_eq!(ask, Decimal::new(102, 0));
        assert_eq!(bid, Decimal::new(1045, 1));
    }

    #[test]
    fn invalid_grids_rejected() {
        assert!(PriceGrid::new(Decimal::ZERO, Decimal::ZERO, 4).is_err());
        assert!(PriceGrid::new(Decimal::ZERO, Decimal::ONE, 0).is_err());
    }

    #[test]
    fn grid_serde_roundtrip() {
        let json = serde_json::to_string(&grid()).unwrap();
        let back: PriceGrid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, grid());
    }

    #[test]
    fn extreme_prices_are_out_of_range() {
        // offset / tick exceeds the decimal range
        let fine = PriceGrid::new(Decimal::ZERO, Decimal::new(1, 28), 16).unwrap();
        let err = fine.slot_of(Decimal::MAX).unwrap_err();
        assert!(matches!(err, SpreadmatchError::PriceOutOfRange { .. }));

        // price - base exceeds the decimal range
        let low = PriceGrid::new(Decimal::MIN, Decimal::ONE, 16).unwrap();
        let err = low.slot_of(Decimal::MAX).unwrap_err();
        assert!(matches!(err, SpreadmatchError::PriceOutOfRange { .. }));
    }

    #[test]
    fn slot_prices_beyond_decimal_range_rejected() {
        let high = PriceGrid::new(Decimal::MAX, Decimal::ONE, 4).unwrap();
        assert_eq!(high.price_of(0).unwrap(), Decimal::MAX);
        assert!(matches!(
            high.price_of(3).unwrap_err(),
            SpreadmatchError::PriceOutOfRange { .. }
        ));
        assert!(high.max_price().is_err());

        let wide = PriceGrid::new(Decimal::ZERO, Decimal::MAX, 4).unwrap();
        assert!(wide.price_of(2).is_err());
    }
}
