//! Edit events and the lenient parsing applied to raw user input.
//!
//! Nothing typed into the calculator is rejected as an error: bad prices
//! become 0, bad quantities and counts become 1.

use crate::item::{ItemField, ItemId};
use crate::money::Amount;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;

/// A user action against the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditEvent {
    /// Append a blank item shared by everyone.
    AddItem,

    RemoveItem(ItemId),

    UpdateField(ItemId, ItemField),

    /// Flip one participant in or out of an item's selection.
    ToggleParticipant(ItemId, u32),

    /// Set the participant count directly (clamped to at least 1).
    SetParticipantCount(u32),

    AddParticipant,

    RemoveParticipant,

    IncrementQuantity(ItemId),

    DecrementQuantity(ItemId),
}

/// Raw edit row as read from a CSV script.
///
/// Columns are `action,item,field,value`; trailing columns may be omitted.
#[derive(Debug, Deserialize)]
pub struct EditRecord {
    /// add, remove, set, toggle, people, add_person, remove_person,
    /// increment, decrement
    pub action: String,

    #[serde(default)]
    pub item: Option<u64>,

    /// name, price or quantity (only for `set`)
    #[serde(default)]
    pub field: Option<String>,

    #[serde(default)]
    pub value: Option<String>,
}

impl EditRecord {
    /// Parses the raw row into a typed event.
    ///
    /// Returns `None` for unknown actions or fields, a missing item id, or a
    /// toggle without a participant number.
    pub fn parse(&self) -> Option<EditEvent> {
        let action = self.action.trim().to_lowercase();

        match action.as_str() {
            "add" => Some(EditEvent::AddItem),
            "remove" => Some(EditEvent::RemoveItem(self.item_id()?)),
            "set" => {
                let id = self.item_id()?;
                let field = parse_field(self.field.as_deref()?, self.raw_value())?;
                Some(EditEvent::UpdateField(id, field))
            }
            "toggle" => {
                let id = self.item_id()?;
                let participant = self.raw_value().trim().parse::<u32>().ok()?;
                Some(EditEvent::ToggleParticipant(id, participant))
            }
            "people" => Some(EditEvent::SetParticipantCount(parse_count(
                self.raw_value(),
            ))),
            "add_person" => Some(EditEvent::AddParticipant),
            "remove_person" => Some(EditEvent::RemoveParticipant),
            "increment" => Some(EditEvent::IncrementQuantity(self.item_id()?)),
            "decrement" => Some(EditEvent::DecrementQuantity(self.item_id()?)),
            _ => None,
        }
    }

    fn item_id(&self) -> Option<ItemId> {
        self.item.map(ItemId)
    }

    fn raw_value(&self) -> &str {
        self.value.as_deref().unwrap_or("")
    }
}

/// Builds a field edit from a field name and raw text.
pub fn parse_field(field: &str, value: &str) -> Option<ItemField> {
    match field.trim().to_lowercase().as_str() {
        "name" => Some(ItemField::Name(value.to_string())),
        "price" => Some(ItemField::Price(parse_price(value))),
        "quantity" | "qty" => Some(ItemField::Quantity(parse_count(value))),
        _ => None,
    }
}

/// Reads a unit price from the leading number in `input`.
///
/// Trailing garbage is ignored (`"12.5won"` is 12.5) and exponent notation
/// is honoured (`"2.5e2"` is 250). Missing, unparseable, negative or
/// out-of-range input yields zero.
pub fn parse_price(input: &str) -> Amount {
    let prefix = numeric_prefix(input.trim(), NumberShape::Decimal);
    if prefix.starts_with('-') {
        return Amount::ZERO;
    }

    let unsigned = prefix.trim_start_matches('+');
    let text = if unsigned.starts_with('.') {
        format!("0{}", unsigned)
    } else {
        unsigned.to_string()
    };

    let parsed = if text.contains(['e', 'E']) {
        Decimal::from_scientific(&text)
    } else {
        Decimal::from_str(&text)
    };
    parsed.map(Amount::new).unwrap_or(Amount::ZERO)
}

/// Reads a positive whole number from the leading digits in `input`.
///
/// Missing, unparseable, non-positive or overflowing input yields 1.
pub fn parse_count(input: &str) -> u32 {
    let prefix = numeric_prefix(input.trim(), NumberShape::Integer);
    if prefix.is_empty() || prefix.starts_with('-') {
        return 1;
    }

    prefix
        .trim_start_matches('+')
        .parse::<u32>()
        .map(|n| n.max(1))
        .unwrap_or(1)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NumberShape {
    /// `[+-]digits`
    Integer,

    /// `[+-]digits[.digits][(e|E)[+-]digits]`
    Decimal,
}

/// Longest prefix of `s` matching `shape`, or `""` when it holds no mantissa
/// digits at all.
fn numeric_prefix(s: &str, shape: NumberShape) -> &str {
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }

    let digits_start = end;
    end = skip_digits(bytes, end);
    let mut has_digits = end > digits_start;

    if shape == NumberShape::Decimal && bytes.get(end) == Some(&b'.') {
        let fraction_end = skip_digits(bytes, end + 1);
        if fraction_end > end + 1 {
            has_digits = true;
            end = fraction_end;
        }
    }

    if !has_digits {
        return "";
    }

    if shape == NumberShape::Decimal && matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let mut exponent_start = end + 1;
        if matches!(bytes.get(exponent_start), Some(b'+') | Some(b'-')) {
            exponent_start += 1;
        }
        let exponent_end = skip_digits(bytes, exponent_start);
        if exponent_end > exponent_start {
            end = exponent_end;
        }
    }

    &s[..end]
}

fn skip_digits(bytes: &[u8], mut pos: usize) -> usize {
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    pos
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(action: &str, item: Option<u64>, field: Option<&str>, value: Option<&str>) -> EditRecord {
        EditRecord {
            action: action.to_string(),
            item,
            field: field.map(str::to_string),
            value: value.map(str::to_string),
        }
    }

    fn amt(s: &str) -> Amount {
        Amount::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_price_lenient() {
        assert_eq!(parse_price("1000"), amt("1000"));
        assert_eq!(parse_price("  12.5  "), amt("12.5"));
        assert_eq!(parse_price("12.5won"), amt("12.5"));
        assert_eq!(parse_price(".5"), amt("0.5"));
        assert_eq!(parse_price("+7"), amt("7"));
        assert_eq!(parse_price("5."), amt("5"));
        assert_eq!(parse_price("1e3"), amt("1000"));
        assert_eq!(parse_price("2.5e2"), amt("250"));
        assert_eq!(parse_price("2.5E+2"), amt("250"));
        assert_eq!(parse_price("125e-2"), amt("1.25"));
        assert_eq!(parse_price("3e"), amt("3"));
        assert_eq!(parse_price("4e+x"), amt("4"));
    }

    #[test]
    fn test_parse_price_invalid_is_zero() {
        assert_eq!(parse_price(""), Amount::ZERO);
        assert_eq!(parse_price("abc"), Amount::ZERO);
        assert_eq!(parse_price("-300"), Amount::ZERO);
        assert_eq!(parse_price("."), Amount::ZERO);
        assert_eq!(parse_price("e3"), Amount::ZERO);
        assert_eq!(parse_price("1e400"), Amount::ZERO);
    }

    #[test]
    fn test_parse_count_lenient() {
        assert_eq!(parse_count("3"), 3);
        assert_eq!(parse_count(" 4 "), 4);
        assert_eq!(parse_count("2.7"), 2);
        assert_eq!(parse_count("5 people"), 5);
    }

    #[test]
    fn test_parse_count_invalid_is_one() {
        assert_eq!(parse_count(""), 1);
        assert_eq!(parse_count("x"), 1);
        assert_eq!(parse_count("0"), 1);
        assert_eq!(parse_count("-4"), 1);
        assert_eq!(parse_count("99999999999"), 1);
    }

    #[test]
    fn test_parse_field_names() {
        assert_eq!(
            parse_field("name", "Dinner"),
            Some(ItemField::Name("Dinner".to_string()))
        );
        assert_eq!(parse_field("PRICE", "3000"), Some(ItemField::Price(amt("3000"))));
        assert_eq!(parse_field("qty", "0"), Some(ItemField::Quantity(1)));
        assert_eq!(parse_field("colour", "red"), None);
    }

    #[test]
    fn test_parse_set_record() {
        let rec = record("set", Some(1), Some("price"), Some("oops"));
        assert_eq!(
            rec.parse(),
            Some(EditEvent::UpdateField(ItemId(1), ItemField::Price(Amount::ZERO)))
        );
    }

    #[test]
    fn test_parse_set_name_without_value_clears_name() {
        let rec = record("set", Some(2), Some("name"), None);
        assert_eq!(
            rec.parse(),
            Some(EditEvent::UpdateField(ItemId(2), ItemField::Name(String::new())))
        );
    }

    #[test]
    fn test_parse_handles_case_and_whitespace() {
        let rec = record("  Toggle ", Some(3), None, Some(" 2 "));
        assert_eq!(rec.parse(), Some(EditEvent::ToggleParticipant(ItemId(3), 2)));
    }

    #[test]
    fn test_parse_people_and_steps() {
        assert_eq!(
            record("people", None, None, Some("abc")).parse(),
            Some(EditEvent::SetParticipantCount(1))
        );
        assert_eq!(record("add", None, None, None).parse(), Some(EditEvent::AddItem));
        assert_eq!(
            record("add_person", None, None, None).parse(),
            Some(EditEvent::AddParticipant)
        );
        assert_eq!(
            record("remove_person", None, None, None).parse(),
            Some(EditEvent::RemoveParticipant)
        );
        assert_eq!(
            record("increment", Some(1), None, None).parse(),
            Some(EditEvent::IncrementQuantity(ItemId(1)))
        );
        assert_eq!(
            record("decrement", Some(1), None, None).parse(),
            Some(EditEvent::DecrementQuantity(ItemId(1)))
        );
    }

    #[test]
    fn test_parse_rejects_invalid_rows() {
        assert!(record("explode", None, None, None).parse().is_none());
        assert!(record("remove", None, None, None).parse().is_none());
        assert!(record("set", Some(1), None, Some("5")).parse().is_none());
        assert!(record("set", Some(1), Some("colour"), Some("5")).parse().is_none());
        assert!(record("toggle", Some(1), None, Some("two")).parse().is_none());
        assert!(record("toggle", Some(1), None, None).parse().is_none());
    }
}
