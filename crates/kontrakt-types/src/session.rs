//! The per-conversation session record and its state machine tags.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use std::collections::BTreeMap;

use crate::field::{BuyerField, ItemField};
use crate::item::{LineItem, PendingItem};

/// The form state machine tag.
///
/// A closed tagged union: edit targets travel inside the variant
/// (`EditingItemField` carries both the index and the field), so no state is
/// ever reconstructed from a string at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum FormState {
    /// No form in progress.
    Idle,
    /// Collecting one buyer field from the catalog.
    CollectingField { field: BuyerField },
    EnteringItemName,
    EnteringItemQuantity,
    EnteringItemPrice,
    /// The menu state after at least one item exists.
    ReviewingItems,
    /// Picking an item from the indexed list.
    SelectingItem,
    /// Picking which field of item `index` to change.
    SelectingItemField { index: usize },
    /// Awaiting the replacement value for one item field.
    EditingItemField { index: usize, field: ItemField },
    /// Picking which buyer field to change.
    SelectingBuyerField,
    /// Awaiting the replacement value for one buyer field.
    EditingBuyerField { field: BuyerField },
}

/// One user's in-progress form-filling conversation.
///
/// Created on session start, mutated exclusively by state machine
/// transitions, and destroyed on restart or successful completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntakeSession {
    pub conversation_id: String,
    pub state: FormState,
    /// Collected buyer fields. Absent key = not yet collected; the
    /// placeholder sentinel marks an explicitly skipped field.
    pub buyer_fields: BTreeMap<BuyerField, String>,
    pub items: Vec<LineItem>,
    /// Present only during the name -> quantity -> price sub-flow.
    pub pending_item: Option<PendingItem>,
    pub started_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
}

impl IntakeSession {
    /// Create a fresh idle session for a conversation.
    pub fn new(conversation_id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            conversation_id: conversation_id.into(),
            state: FormState::Idle,
            buyer_fields: BTreeMap::new(),
            items: Vec::new(),
            pending_item: None,
            started_at: now,
            last_activity: now,
        }
    }

    /// Reset to the first catalog field, discarding all prior data.
    ///
    /// Guards against stale data from an abandoned earlier run of the form.
    pub fn restart(&mut self) {
        self.buyer_fields.clear();
        self.items.clear();
        self.pending_item = None;
        self.state = FormState::CollectingField {
            field: BuyerField::first(),
        };
        self.started_at = Utc::now();
        self.last_activity = self.started_at;
    }

    /// Record activity for idle-eviction accounting.
    pub fn touch(&mut self) {
        self.last_activity = Utc::now();
    }

    /// How long the session has been idle.
    pub fn idle_for(&self) -> chrono::Duration {
        Utc::now() - self.last_activity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_idle_and_empty() {
        let session = IntakeSession::new("chat-42");
        assert_eq!(session.state, FormState::Idle);
        assert!(session.buyer_fields.is_empty());
        assert!(session.items.is_empty());
        assert!(session.pending_item.is_none());
    }

    #[test]
    fn test_restart_discards_everything() {
        let mut session = IntakeSession::new("chat-42");
        session
            .buyer_fields
            .insert(BuyerField::Inn, "301234567".to_string());
        session.items.push(LineItem {
            name: "Кирпич".to_string(),
            quantity: 100,
            unit_price: 1_500,
        });
        session.pending_item = Some(PendingItem::named("Цемент"));
        session.state = FormState::EnteringItemPrice;

        session.restart();

        assert_eq!(
            session.state,
            FormState::CollectingField {
                field: BuyerField::BuyerName
            }
        );
        assert!(session.buyer_fields.is_empty());
        assert!(session.items.is_empty());
        assert!(session.pending_item.is_none());
    }

    #[test]
    fn test_touch_advances_last_activity() {
        let mut session = IntakeSession::new("chat-42");
        let before = session.last_activity;
        session.touch();
        assert!(session.last_activity >= before);
    }
}
