//! Menu items and the item mapping served to clients.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Full item mapping of one menu, keyed by item name.
///
/// A [`BTreeMap`] keeps the serialized order stable across reads.
pub type Menu = BTreeMap<String, MenuItem>;

/// One countable item on a menu.
///
/// `count` is the aggregate tally; `owner_count` attributes it to the
/// owners that contributed. After every completed mutation `count` equals
/// the sum of `owner_count`, and owners are only listed while their
/// contribution is positive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct MenuItem {
    /// Item name. Identical to the key the item is stored under.
    pub name: String,
    /// Per-owner contributions.
    #[ts(type = "Record<string, number>")]
    pub owner_count: BTreeMap<String, u64>,
    /// Aggregate tally across all owners.
    #[ts(type = "number")]
    pub count: u64,
}

impl MenuItem {
    /// Create an empty item with no contributions.
    pub const fn new(name: String) -> Self {
        Self {
            name,
            owner_count: BTreeMap::new(),
            count: 0,
        }
    }

    /// Sum of all owner contributions.
    pub fn owner_total(&self) -> u64 {
        self.owner_count
            .values()
            .fold(0_u64, |acc, n| acc.saturating_add(*n))
    }

    /// Whether `count` agrees with the owner bookkeeping.
    pub fn is_consistent(&self) -> bool {
        self.count == self.owner_total() && self.owner_count.values().all(|n| *n > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_item_is_empty_and_consistent() {
        let item = MenuItem::new(String::from("coffee"));
        assert_eq!(item.count, 0);
        assert!(item.owner_count.is_empty());
        assert!(item.is_consistent());
    }

    #[test]
    fn zero_owner_entry_is_inconsistent() {
        let mut item = MenuItem::new(String::from("tea"));
        item.owner_count.insert(String::from("alice"), 0);
        assert!(!item.is_consistent());
    }

    #[test]
    fn serializes_with_wire_field_names() {
        let mut item = MenuItem::new(String::from("coffee"));
        item.owner_count.insert(String::from("alice"), 2);
        item.count = 2;

        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["name"], "coffee");
        assert_eq!(json["count"], 2);
        assert_eq!(json["owner_count"]["alice"], 2);
    }
}
