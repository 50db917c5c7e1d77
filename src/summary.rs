//! Plain-text settlement summary.
//!
//! Consumes the item list and a computed settlement as plain data; it never
//! writes back into either.

use crate::item::LineItem;
use crate::ledger::ItemLedger;
use crate::settlement::{unallocated_total, SettlementResult};
use std::io::{self, Write};

/// Shown in place of an empty item name.
pub const UNNAMED_ITEM: &str = "Unnamed item";

/// Writes the summary: items with their sharers, the grand total, and what
/// each participant owes.
pub fn write_summary<W: Write>(
    ledger: &ItemLedger,
    settlement: &SettlementResult,
    mut writer: W,
) -> io::Result<()> {
    writeln!(writer, "Settlement summary")?;
    writeln!(writer)?;

    for item in ledger.items() {
        writeln!(
            writer,
            "{} x{}  {}",
            display_name(item),
            item.quantity,
            item.cost().grouped()
        )?;
        writeln!(writer, "  shared by: {}", sharers(item))?;
    }
    if !ledger.is_empty() {
        writeln!(writer)?;
    }

    writeln!(writer, "Total: {}", settlement.grand_total.grouped())?;
    let unallocated = unallocated_total(ledger);
    if !unallocated.is_zero() {
        writeln!(writer, "Unallocated: {}", unallocated.grouped())?;
    }

    writeln!(writer, "Owed:")?;
    for (participant, owed) in &settlement.per_participant {
        writeln!(writer, "  #{}: {}", participant, owed.grouped())?;
    }

    let surplus = settlement.rounding_surplus();
    if !surplus.is_zero() {
        writeln!(writer, "Rounding surplus: {}", surplus.grouped())?;
    }

    writer.flush()
}

fn display_name(item: &LineItem) -> &str {
    if item.name.trim().is_empty() {
        UNNAMED_ITEM
    } else {
        item.name.as_str()
    }
}

fn sharers(item: &LineItem) -> String {
    if item.is_unallocated() {
        return "nobody".to_string();
    }
    item.selected
        .iter()
        .map(|p| format!("#{}", p))
        .collect::<Vec<_>>()
        .join(", ")
}
