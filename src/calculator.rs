//! Calculator session.
//!
//! Applies edit events to a ledger and recomputes the settlement before
//! every return, so the stored result always matches the ledger.

use crate::edit::{EditEvent, EditRecord};
use crate::error::Result;
use crate::ledger::ItemLedger;
use crate::settlement::{settle, SettlementResult};
use crate::summary;
use csv::{ReaderBuilder, Trim};
use log::{debug, warn};
use std::io::{Read, Write};

/// A ledger together with its latest settlement.
///
/// The only state besides the ledger is the last computed result; there is
/// no incremental bookkeeping.
pub struct Calculator {
    ledger: ItemLedger,
    settlement: SettlementResult,
}

impl Calculator {
    /// Starts from the opening state: one participant and one blank item.
    pub fn new() -> Self {
        Self::with_ledger(ItemLedger::default())
    }

    /// Wraps an existing ledger.
    pub fn with_ledger(ledger: ItemLedger) -> Self {
        let settlement = settle(&ledger);
        Calculator { ledger, settlement }
    }

    pub fn ledger(&self) -> &ItemLedger {
        &self.ledger
    }

    pub fn settlement(&self) -> &SettlementResult {
        &self.settlement
    }

    /// Applies one event and returns the recomputed settlement.
    pub fn apply(&mut self, event: EditEvent) -> &SettlementResult {
        debug!("Applying {:?}", event);

        match event {
            EditEvent::AddItem => {
                self.ledger.add_item();
            }
            EditEvent::RemoveItem(id) => {
                self.ledger.remove_item(id);
            }
            EditEvent::UpdateField(id, field) => {
                self.ledger.update_field(id, field);
            }
            EditEvent::ToggleParticipant(id, participant) => {
                self.ledger.toggle_participant(id, participant);
            }
            EditEvent::SetParticipantCount(count) => {
                self.ledger.set_participant_count(count);
            }
            EditEvent::AddParticipant => self.ledger.add_participant(),
            EditEvent::RemoveParticipant => self.ledger.remove_participant(),
            EditEvent::IncrementQuantity(id) => {
                if !self.ledger.increment_quantity(id) {
                    debug!("Increment of unknown item {}, ignoring", id);
                }
            }
            EditEvent::DecrementQuantity(id) => {
                if !self.ledger.decrement_quantity(id) {
                    debug!("Decrement on item {} had no effect", id);
                }
            }
        }

        self.settlement = settle(&self.ledger);
        &self.settlement
    }

    /// Replays an edit script from a CSV reader, one row at a time.
    ///
    /// Rows that cannot be read or parsed are logged at warn level and
    /// skipped.
    pub fn process_csv<R: Read>(&mut self, reader: R) -> Result<()> {
        let mut csv_reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);

        for (row_idx, result) in csv_reader.deserialize::<EditRecord>().enumerate() {
            let row_num = row_idx + 2; // 1-indexed, accounting for header row

            match result {
                Ok(record) => {
                    if let Some(event) = record.parse() {
                        self.apply(event);
                    } else {
                        warn!("Row {}: Failed to parse edit record", row_num);
                    }
                }
                Err(e) => {
                    warn!("Row {}: CSV parse error: {}", row_num, e);
                }
            }
        }

        Ok(())
    }

    /// Writes the settlement as CSV: one `participant,owed` row per
    /// participant in ascending order, then a `total` row.
    pub fn write_output<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        for row in self.settlement.rows() {
            csv_writer.serialize(row)?;
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Writes the human-readable summary.
    pub fn write_summary<W: Write>(&self, writer: W) -> Result<()> {
        summary::write_summary(&self.ledger, &self.settlement, writer)?;
        Ok(())
    }
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}
