//! The item ledger: an ordered list of line items plus the participant count.
//!
//! Every selection stays a subset of `1..=participant_count`. Count changes
//! propagate to all items before the mutating call returns.

use crate::item::{ItemField, ItemId, LineItem};
use log::debug;

/// Ordered collection of line items shared among `participant_count` people.
///
/// Edits that reference an unknown item are no-ops. Nothing here fails; bad
/// values are clamped instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemLedger {
    items: Vec<LineItem>,

    /// Always at least 1.
    participants: u32,

    /// Next id to hand out. Ids are never reused.
    next_id: u64,
}

impl ItemLedger {
    /// Largest group a ledger tracks. Larger counts are clamped to this.
    pub const MAX_PARTICIPANTS: u32 = 1_000;

    /// Creates an empty ledger for `participants` people, clamped to
    /// `1..=MAX_PARTICIPANTS`.
    pub fn new(participants: u32) -> Self {
        ItemLedger {
            items: Vec::new(),
            participants: participants.clamp(1, Self::MAX_PARTICIPANTS),
            next_id: 1,
        }
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn get(&self, id: ItemId) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn participant_count(&self) -> u32 {
        self.participants
    }

    /// Participant indices `1..=participant_count`.
    pub fn participants(&self) -> impl Iterator<Item = u32> {
        1..=self.participants
    }

    /// Appends a blank item shared by everyone and returns its id.
    pub fn add_item(&mut self) -> ItemId {
        let id = ItemId(self.next_id);
        self.next_id += 1;
        self.items.push(LineItem::new(id, self.participants));
        debug!("Added item {}", id);
        id
    }

    /// Removes the item with `id`. Returns `false` if there was none.
    pub fn remove_item(&mut self, id: ItemId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        let removed = self.items.len() != before;
        if !removed {
            debug!("Remove of unknown item {}, ignoring", id);
        }
        removed
    }

    /// Sets one field of an item. Returns `false` if the item is unknown.
    pub fn update_field(&mut self, id: ItemId, field: ItemField) -> bool {
        match self.get_mut(id) {
            Some(item) => {
                item.apply(field);
                true
            }
            None => {
                debug!("Update of unknown item {}, ignoring", id);
                false
            }
        }
    }

    /// Adds one to an item's quantity.
    pub fn increment_quantity(&mut self, id: ItemId) -> bool {
        match self.get_mut(id) {
            Some(item) => {
                item.increment_quantity();
                true
            }
            None => false,
        }
    }

    /// Removes one from an item's quantity, stopping at 1.
    pub fn decrement_quantity(&mut self, id: ItemId) -> bool {
        self.get_mut(id)
            .map(LineItem::decrement_quantity)
            .unwrap_or(false)
    }

    /// Flips `participant` in or out of an item's selection.
    ///
    /// Indices outside `1..=participant_count` and unknown items are ignored.
    /// Returns `true` if the selection changed.
    pub fn toggle_participant(&mut self, id: ItemId, participant: u32) -> bool {
        if participant == 0 || participant > self.participants {
            debug!(
                "Participant {} out of range 1..={}, ignoring toggle",
                participant, self.participants
            );
            return false;
        }

        match self.get_mut(id) {
            Some(item) => {
                let selected = item.toggle(participant);
                if item.is_unallocated() {
                    debug!("Item {} has no participants left", id);
                } else {
                    debug!("Participant {} on item {}: {}", participant, id, selected);
                }
                true
            }
            None => {
                debug!("Toggle on unknown item {}, ignoring", id);
                false
            }
        }
    }

    /// Changes the number of participants, clamped to `1..=MAX_PARTICIPANTS`.
    ///
    /// New participants join every existing item. Participants beyond the new
    /// count are dropped from every item.
    pub fn set_participant_count(&mut self, count: u32) {
        let count = count.clamp(1, Self::MAX_PARTICIPANTS);
        let previous = self.participants;

        if count > previous {
            for item in &mut self.items {
                item.include_range(previous + 1, count);
            }
        } else if count < previous {
            for item in &mut self.items {
                item.retain_up_to(count);
            }
        }

        self.participants = count;
        debug!("Participant count {} -> {}", previous, count);
    }

    /// Adds one participant, who joins every item.
    pub fn add_participant(&mut self) {
        self.set_participant_count(self.participants.saturating_add(1));
    }

    /// Removes the highest-numbered participant unless only one is left.
    pub fn remove_participant(&mut self) {
        if self.participants > 1 {
            self.set_participant_count(self.participants - 1);
        }
    }

    fn get_mut(&mut self, id: ItemId) -> Option<&mut LineItem> {
        self.items.iter_mut().find(|item| item.id == id)
    }
}

/// Opening state of the calculator: one person and one blank item.
impl Default for ItemLedger {
    fn default() -> Self {
        let mut ledger = ItemLedger::new(1);
        ledger.add_item();
        ledger
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Amount;

    fn selection(ledger: &ItemLedger, id: ItemId) -> Vec<u32> {
        ledger.get(id).unwrap().selected.iter().copied().collect()
    }

    #[test]
    fn test_default_has_one_blank_item() {
        let ledger = ItemLedger::default();
        assert_eq!(ledger.participant_count(), 1);
        assert_eq!(ledger.len(), 1);
        assert_eq!(selection(&ledger, ItemId(1)), vec![1]);
    }

    #[test]
    fn test_new_clamps_participants() {
        let ledger = ItemLedger::new(0);
        assert_eq!(ledger.participant_count(), 1);
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_add_item_selects_everyone() {
        let mut ledger = ItemLedger::new(3);
        let id = ledger.add_item();
        assert_eq!(selection(&ledger, id), vec![1, 2, 3]);
        assert_eq!(ledger.get(id).unwrap().quantity, 1);
        assert_eq!(ledger.get(id).unwrap().unit_price, Amount::ZERO);
    }

    #[test]
    fn test_ids_are_unique_and_not_reused() {
        let mut ledger = ItemLedger::new(1);
        let a = ledger.add_item();
        let b = ledger.add_item();
        assert_ne!(a, b);

        ledger.remove_item(b);
        let c = ledger.add_item();
        assert_ne!(b, c);
        assert_eq!(ledger.items().iter().map(|i| i.id).collect::<Vec<_>>(), vec![a, c]);
    }

    #[test]
    fn test_remove_unknown_item_is_noop() {
        let mut ledger = ItemLedger::default();
        assert!(!ledger.remove_item(ItemId(42)));
        assert_eq!(ledger.len(), 1);
        assert!(ledger.remove_item(ItemId(1)));
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_update_field_unknown_item() {
        let mut ledger = ItemLedger::new(1);
        assert!(!ledger.update_field(ItemId(1), ItemField::Quantity(3)));
    }

    #[test]
    fn test_update_field_clamps_quantity() {
        let mut ledger = ItemLedger::default();
        assert!(ledger.update_field(ItemId(1), ItemField::Quantity(0)));
        assert_eq!(ledger.get(ItemId(1)).unwrap().quantity, 1);
    }

    #[test]
    fn test_quantity_steps_on_ledger() {
        let mut ledger = ItemLedger::default();
        assert!(!ledger.decrement_quantity(ItemId(1)));
        assert!(ledger.increment_quantity(ItemId(1)));
        assert_eq!(ledger.get(ItemId(1)).unwrap().quantity, 2);
        assert!(ledger.decrement_quantity(ItemId(1)));
        assert!(!ledger.increment_quantity(ItemId(9)));
    }

    #[test]
    fn test_toggle_out_of_range_is_ignored() {
        let mut ledger = ItemLedger::new(2);
        let id = ledger.add_item();
        assert!(!ledger.toggle_participant(id, 0));
        assert!(!ledger.toggle_participant(id, 3));
        assert_eq!(selection(&ledger, id), vec![1, 2]);
    }

    #[test]
    fn test_toggle_twice_restores() {
        let mut ledger = ItemLedger::new(3);
        let id = ledger.add_item();
        assert!(ledger.toggle_participant(id, 2));
        assert_eq!(selection(&ledger, id), vec![1, 3]);
        assert!(ledger.toggle_participant(id, 2));
        assert_eq!(selection(&ledger, id), vec![1, 2, 3]);
    }

    #[test]
    fn test_increase_count_adds_new_participant_everywhere() {
        let mut ledger = ItemLedger::new(2);
        let a = ledger.add_item();
        let b = ledger.add_item();
        ledger.toggle_participant(b, 1);

        ledger.add_participant();
        assert_eq!(ledger.participant_count(), 3);
        assert_eq!(selection(&ledger, a), vec![1, 2, 3]);
        assert_eq!(selection(&ledger, b), vec![2, 3]);
    }

    #[test]
    fn test_jump_in_count_adds_every_new_index() {
        let mut ledger = ItemLedger::default();
        ledger.set_participant_count(4);
        assert_eq!(selection(&ledger, ItemId(1)), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_decrease_count_drops_higher_indices() {
        let mut ledger = ItemLedger::new(4);
        let a = ledger.add_item();
        let b = ledger.add_item();
        ledger.toggle_participant(b, 1);
        ledger.toggle_participant(b, 2);

        ledger.set_participant_count(2);
        assert_eq!(selection(&ledger, a), vec![1, 2]);
        assert!(ledger.get(b).unwrap().is_unallocated());
    }

    #[test]
    fn test_count_never_below_one() {
        let mut ledger = ItemLedger::default();
        ledger.remove_participant();
        assert_eq!(ledger.participant_count(), 1);
        ledger.set_participant_count(0);
        assert_eq!(ledger.participant_count(), 1);
        assert_eq!(selection(&ledger, ItemId(1)), vec![1]);
    }

    #[test]
    fn test_count_is_capped() {
        let mut ledger = ItemLedger::default();
        ledger.set_participant_count(u32::MAX);
        assert_eq!(ledger.participant_count(), ItemLedger::MAX_PARTICIPANTS);
        assert_eq!(
            ledger.get(ItemId(1)).unwrap().sharer_count(),
            ItemLedger::MAX_PARTICIPANTS as usize
        );

        ledger.add_participant();
        assert_eq!(ledger.participant_count(), ItemLedger::MAX_PARTICIPANTS);
        assert_eq!(ItemLedger::new(u32::MAX).participant_count(), ItemLedger::MAX_PARTICIPANTS);
    }

    #[test]
    fn test_participants_iterates_all_indices() {
        let ledger = ItemLedger::new(3);
        assert_eq!(ledger.participants().collect::<Vec<_>>(), vec![1, 2, 3]);
    }
}
