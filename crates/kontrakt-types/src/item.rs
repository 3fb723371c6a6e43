//! Line items and the in-progress item accumulator.

use serde::{Deserialize, Serialize};

/// One product or service entry on the contract.
///
/// Items form an ordered sequence (insertion order = display/edit order) and
/// are addressed by position. An item is only ever appended once all three
/// fields are known -- the multi-step entry accumulates in [`PendingItem`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub name: String,
    /// Unit count; validated positive before acceptance.
    pub quantity: u32,
    /// Price per unit in UZS, VAT not included.
    pub unit_price: u64,
}

/// Partially built line item during name -> quantity -> price entry.
///
/// Present on the session only inside that sub-flow; never visible in the
/// item list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingItem {
    pub name: String,
    pub quantity: Option<u32>,
}

impl PendingItem {
    /// Start accumulating a new item from its name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantity: None,
        }
    }

    /// Complete the item with the final price, consuming the accumulator.
    ///
    /// Returns `None` if the quantity step was never recorded.
    pub fn into_item(self, unit_price: u64) -> Option<LineItem> {
        Some(LineItem {
            name: self.name,
            quantity: self.quantity?,
            unit_price,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_item_completes_only_with_quantity() {
        let pending = PendingItem::named("Цемент М400");
        assert_eq!(pending.clone().into_item(120_000), None);

        let mut pending = pending;
        pending.quantity = Some(3);
        let item = pending.into_item(120_000).unwrap();
        assert_eq!(item.name, "Цемент М400");
        assert_eq!(item.quantity, 3);
        assert_eq!(item.unit_price, 120_000);
    }
}
