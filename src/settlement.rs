//! Settlement derivation.
//!
//! [`settle`] is a pure function of the ledger. It is re-run after every
//! mutation rather than updated incrementally.

use crate::ledger::ItemLedger;
use crate::money::Amount;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Totals derived from a ledger.
///
/// # Rounding
///
/// Each item's cost is split among its sharers and every share is rounded up
/// to a whole unit. The sum of owed amounts can therefore exceed
/// `grand_total` by up to one unit per sharer per item.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SettlementResult {
    /// Sum of price times quantity over all items, regardless of selection.
    pub grand_total: Amount,

    /// Owed amount for every participant `1..=N`, ascending.
    pub per_participant: BTreeMap<u32, Amount>,
}

impl SettlementResult {
    /// Amount owed by `participant`; zero for unknown indices.
    pub fn owed(&self, participant: u32) -> Amount {
        self.per_participant
            .get(&participant)
            .copied()
            .unwrap_or(Amount::ZERO)
    }

    /// Tabular form: one row per participant, then a `total` row.
    pub fn rows(&self) -> Vec<SettlementRow> {
        self.per_participant
            .iter()
            .map(|(participant, owed)| SettlementRow {
                participant: participant.to_string(),
                owed: *owed,
            })
            .chain(std::iter::once(SettlementRow {
                participant: SettlementRow::TOTAL.to_string(),
                owed: self.grand_total,
            }))
            .collect()
    }

    /// Sum of every participant's owed amount.
    pub fn allocated_total(&self) -> Amount {
        self.per_participant.values().sum()
    }

    /// How much the rounded shares overshoot the grand total.
    ///
    /// Items nobody shares are left out of the allocation, so this is floored
    /// at zero rather than going negative.
    pub fn rounding_surplus(&self) -> Amount {
        self.allocated_total().saturating_sub(self.grand_total)
    }
}

/// One line of the settlement table as written to CSV.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementRow {
    /// Participant index, or `total` for the grand total row.
    pub participant: String,

    pub owed: Amount,
}

impl SettlementRow {
    pub const TOTAL: &'static str = "total";
}

/// Computes the grand total and each participant's share.
///
/// Items with an empty selection count toward the grand total but are not
/// allocated to anyone.
pub fn settle(ledger: &ItemLedger) -> SettlementResult {
    let mut per_participant: BTreeMap<u32, Amount> =
        ledger.participants().map(|p| (p, Amount::ZERO)).collect();
    let mut grand_total = Amount::ZERO;

    for item in ledger.items() {
        let cost = item.cost();
        grand_total += cost;

        let share = match cost.split_ceil(item.sharer_count()) {
            Some(share) => share,
            None => continue,
        };
        for participant in &item.selected {
            if let Some(owed) = per_participant.get_mut(participant) {
                *owed += share;
            }
        }
    }

    SettlementResult {
        grand_total,
        per_participant,
    }
}

/// Cost of items that nobody currently shares.
pub fn unallocated_total(ledger: &ItemLedger) -> Amount {
    ledger
        .items()
        .iter()
        .filter(|item| item.is_unallocated())
        .map(|item| item.cost())
        .sum()
}
