//! Shop basket: line-item arithmetic and its persisted snapshot.
//!
//! [`BasketState`] is the pure in-memory model. [`Basket`] wraps it with the
//! storage round-trip and the session gate: every mutation loads the current
//! snapshot, applies the change and writes the whole snapshot back before
//! returning.

use std::collections::BTreeMap;

use crate::config;
use crate::error::{LostFoundError, Result};
use crate::models::BasketLine;
use crate::session::Session;
use crate::storage::KeyValueStore;

/// Render a money amount with two decimals, rounding half away from zero.
///
/// Rounding happens on the `f64` value, not on a decimal, so it matches JS
/// `toFixed(2)` on doubles: `1.005` is stored as `1.00499...` and renders
/// as `"1.00"`.
pub fn format_price(amount: f64) -> String {
    let cents = (amount * 100.0).round();
    format!("{:.2}", cents / 100.0)
}

// ---------------------------------------------------------------------------
// BasketState
// ---------------------------------------------------------------------------

/// Basket lines keyed by product code.
///
/// No line ever holds a quantity below 1: decrementing the last unit removes
/// the line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BasketState {
    lines: BTreeMap<String, BasketLine>,
}

impl BasketState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a persisted snapshot. Lines with a zero quantity are dropped.
    pub fn from_json(raw: &str) -> Result<Self> {
        let lines: BTreeMap<String, BasketLine> = serde_json::from_str(raw)?;
        Ok(Self {
            lines: lines.into_iter().filter(|(_, l)| l.quantity >= 1).collect(),
        })
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.lines)?)
    }

    pub fn add(&mut self, code: &str, name: &str, price: f64) -> Result<()> {
        if !price.is_finite() || price < 0.0 {
            return Err(LostFoundError::InvalidArgument(format!(
                "Invalid unit price for {}: {}",
                code, price
            )));
        }
        self.lines
            .entry(code.to_string())
            .and_modify(|line| line.quantity += 1)
            .or_insert_with(|| BasketLine::new(code, name, price));
        Ok(())
    }

    /// Apply a +1/-1 step. Returns whether anything changed.
    pub fn change_qty(&mut self, code: &str, delta: i32) -> Result<bool> {
        if delta != 1 && delta != -1 {
            return Err(LostFoundError::InvalidArgument(format!(
                "Quantity delta must be +1 or -1, got {}",
                delta
            )));
        }
        let Some(line) = self.lines.get_mut(code) else {
            return Ok(false);
        };
        if delta > 0 {
            line.quantity += 1;
        } else if line.quantity > 1 {
            line.quantity -= 1;
        } else {
            self.lines.remove(code);
        }
        Ok(true)
    }

    /// Returns whether a line was removed.
    pub fn remove(&mut self, code: &str) -> bool {
        self.lines.remove(code).is_some()
    }

    pub fn get(&self, code: &str) -> Option<&BasketLine> {
        self.lines.get(code)
    }

    /// Lines ordered by product code.
    pub fn lines(&self) -> Vec<BasketLine> {
        self.lines.values().cloned().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn total_items(&self) -> u32 {
        self.lines.values().map(|l| l.quantity).sum()
    }

    pub fn total_price(&self) -> String {
        format_price(self.lines.values().map(BasketLine::subtotal).sum())
    }
}

// ---------------------------------------------------------------------------
// Basket
// ---------------------------------------------------------------------------

/// Persisted basket bound to the client's storage.
pub struct Basket<'a> {
    storage: &'a dyn KeyValueStore,
    session: Session<'a>,
}

impl<'a> Basket<'a> {
    pub fn new(storage: &'a dyn KeyValueStore, session: Session<'a>) -> Self {
        Self { storage, session }
    }

    /// Load the persisted snapshot.
    ///
    /// A missing or corrupt snapshot (bad JSON or bytes that are not UTF-8)
    /// reads as an empty basket. The next mutation overwrites it.
    pub fn load(&self) -> Result<BasketState> {
        let raw = match self.storage.get(config::BASKET_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Ok(BasketState::new()),
            Err(LostFoundError::Io(e)) if e.kind() == std::io::ErrorKind::InvalidData => {
                tracing::warn!(error = %e, "unreadable basket snapshot, starting empty");
                return Ok(BasketState::new());
            }
            Err(e) => return Err(e),
        };
        match BasketState::from_json(&raw) {
            Ok(state) => Ok(state),
            Err(e) => {
                tracing::warn!(error = %e, "corrupt basket snapshot, starting empty");
                Ok(BasketState::new())
            }
        }
    }

    fn save(&self, state: &BasketState) -> Result<()> {
        self.storage.set(config::BASKET_KEY, &state.to_json()?)
    }

    /// Add one unit of a product. Requires an active session.
    ///
    /// Returns the new total item count for the basket badge.
    pub fn add(&self, code: &str, name: &str, price: f64) -> Result<u32> {
        if !self.session.is_active() {
            return Err(LostFoundError::LoginRequired);
        }
        let mut state = self.load()?;
        state.add(code, name, price)?;
        self.save(&state)?;
        tracing::debug!(code, items = state.total_items(), "added to basket");
        Ok(state.total_items())
    }

    /// Step a line's quantity by +1 or -1. Unknown codes are a no-op.
    pub fn change_qty(&self, code: &str, delta: i32) -> Result<u32> {
        let mut state = self.load()?;
        if state.change_qty(code, delta)? {
            self.save(&state)?;
        }
        Ok(state.total_items())
    }

    pub fn remove(&self, code: &str) -> Result<u32> {
        let mut state = self.load()?;
        if state.remove(code) {
            self.save(&state)?;
        }
        Ok(state.total_items())
    }

    pub fn lines(&self) -> Result<Vec<BasketLine>> {
        Ok(self.load()?.lines())
    }

    pub fn total_items(&self) -> Result<u32> {
        Ok(self.load()?.total_items())
    }

    pub fn total_price(&self) -> Result<String> {
        Ok(self.load()?.total_price())
    }

    /// Drop the persisted basket. Run when the user navigates to the shop.
    pub fn reset(&self) -> Result<()> {
        self.storage.remove(config::BASKET_KEY)
    }
}
