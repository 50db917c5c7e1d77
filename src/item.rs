//! Line item model.
//!
//! Maintains the invariants `quantity >= 1` and a participant selection
//! kept in ascending order.

use crate::money::Amount;
use std::collections::BTreeSet;
use std::fmt;

/// Stable identifier of a line item within its ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemId(pub u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single editable field of a line item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemField {
    Name(String),

    /// Clamped to at least 1 when applied.
    Quantity(u32),

    Price(Amount),
}

/// One purchased thing and the participants who share its cost.
///
/// # Invariants
///
/// - `quantity >= 1` after every operation
/// - `unit_price` is non-negative by construction of [`Amount`]
/// - `selected` iterates in ascending participant order
///
/// # Empty Selection
///
/// Toggling off the last sharer leaves `selected` empty. Such an item still
/// counts toward the grand total but is not allocated to anybody until a
/// participant is selected again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    pub id: ItemId,

    /// Display name; may be empty.
    pub name: String,

    pub quantity: u32,

    pub unit_price: Amount,

    /// 1-based participant indices sharing this item.
    pub selected: BTreeSet<u32>,
}

impl LineItem {
    /// Creates a blank item shared by participants `1..=participants`.
    pub fn new(id: ItemId, participants: u32) -> Self {
        LineItem {
            id,
            name: String::new(),
            quantity: 1,
            unit_price: Amount::ZERO,
            selected: (1..=participants).collect(),
        }
    }

    /// Price times quantity.
    pub fn cost(&self) -> Amount {
        self.unit_price.times(self.quantity)
    }

    /// Number of participants sharing this item.
    pub fn sharer_count(&self) -> usize {
        self.selected.len()
    }

    /// Returns `true` if nobody shares this item.
    pub fn is_unallocated(&self) -> bool {
        self.selected.is_empty()
    }

    /// Returns `true` if `participant` shares this item.
    pub fn is_shared_by(&self, participant: u32) -> bool {
        self.selected.contains(&participant)
    }

    /// Applies a field edit, clamping quantity to at least 1.
    pub fn apply(&mut self, field: ItemField) {
        match field {
            ItemField::Name(name) => self.name = name,
            ItemField::Quantity(quantity) => self.quantity = quantity.max(1),
            ItemField::Price(price) => self.unit_price = price,
        }
    }

    /// Adds one to the quantity.
    pub fn increment_quantity(&mut self) {
        self.quantity = self.quantity.saturating_add(1);
    }

    /// Removes one from the quantity.
    ///
    /// Returns `false` if the quantity is already 1.
    pub fn decrement_quantity(&mut self) -> bool {
        if self.quantity <= 1 {
            return false;
        }
        self.quantity -= 1;
        true
    }

    /// Flips `participant` in or out of the selection.
    ///
    /// Returns `true` if the participant is selected afterwards.
    pub fn toggle(&mut self, participant: u32) -> bool {
        if self.selected.remove(&participant) {
            false
        } else {
            self.selected.insert(participant);
            true
        }
    }

    /// Selects every participant in `from..=to`.
    pub fn include_range(&mut self, from: u32, to: u32) {
        self.selected.extend(from..=to);
    }

    /// Drops every participant above `max`.
    pub fn retain_up_to(&mut self, max: u32) {
        self.selected.retain(|&p| p <= max);
    }
}
