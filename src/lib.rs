//! # Settlement Calculator
//!
//! Splits a bill between a group of participants. Each line item has a unit
//! price, a quantity and the subset of participants sharing it; the
//! settlement reports the grand total and what each participant owes.
//!
//! ## Design Principles
//!
//! - **Decimal arithmetic**: Money is held in `rust_decimal`, never floats
//! - **Per-item ceiling**: Each share is rounded up, so owed amounts may sum
//!   to slightly more than the grand total
//! - **No error states**: Bad input is clamped at the edit boundary
//! - **Explicit recomputation**: [`settle`] is a pure function re-run after
//!   every edit
//!
//! ## Example
//!
//! ```
//! use settlement_calculator::{settle, Amount, ItemField, ItemLedger};
//!
//! let mut ledger = ItemLedger::new(3);
//! let dinner = ledger.add_item();
//! ledger.update_field(dinner, ItemField::Price(Amount::from(1000u64)));
//!
//! let result = settle(&ledger);
//! assert_eq!(result.grand_total, Amount::from(1000u64));
//! assert_eq!(result.owed(1), Amount::from(334u64));
//! ```

pub mod calculator;
pub mod config;
pub mod edit;
pub mod error;
pub mod item;
pub mod ledger;
pub mod money;
pub mod settlement;
pub mod summary;

pub use calculator::Calculator;
pub use config::{Config, OutputFormat};
pub use edit::{parse_count, parse_price, EditEvent, EditRecord};
pub use error::{CalculatorError, Result};
pub use item::{ItemField, ItemId, LineItem};
pub use ledger::ItemLedger;
pub use money::Amount;
pub use settlement::{settle, unallocated_total, SettlementResult, SettlementRow};
