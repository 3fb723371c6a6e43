//! External events consumed by the form state machine.
//!
//! The messaging transport delivers two kinds of events: free text typed by
//! the user, and discrete commands (buttons). Commands carry their own data
//! (selected index, selected field) so the wire shape stays self-describing.

use serde::{Deserialize, Serialize};

use crate::field::{BuyerField, ItemField};

/// A discrete command event, normally triggered by an inline button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    /// Skip the buyer field currently being collected.
    Skip,
    /// Start entering another line item.
    AddItem,
    /// Open the item list for editing.
    EditItems,
    /// Open the buyer-field list for editing.
    EditBuyer,
    /// Pick the item at `index` from the edit list.
    SelectItem { index: usize },
    /// Pick which field of the selected item to edit.
    SelectItemField { field: ItemField },
    /// Pick which buyer field to edit.
    SelectBuyerField { field: BuyerField },
    /// Remove the item at `index`.
    DeleteItem { index: usize },
    /// Validate and submit the assembled contract.
    Finish,
}

/// An external event for one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    /// Session start (or restart): discards any prior session data.
    Start,
    /// Free text typed by the user.
    Text { text: String },
    /// A discrete command.
    Command {
        #[serde(flatten)]
        command: Command,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_wire_shapes() {
        let event = SessionEvent::Text {
            text: "ООО Биной".to_string(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "text");
        assert_eq!(json["text"], "ООО Биной");

        let event = SessionEvent::Command {
            command: Command::SelectItem { index: 2 },
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "command");
        assert_eq!(json["command"], "select_item");
        assert_eq!(json["index"], 2);
    }

    #[test]
    fn test_event_deserializes_from_transport_json() {
        let event: SessionEvent =
            serde_json::from_str(r#"{"type":"command","command":"skip"}"#).unwrap();
        assert_eq!(
            event,
            SessionEvent::Command {
                command: Command::Skip
            }
        );

        let event: SessionEvent = serde_json::from_str(
            r#"{"type":"command","command":"select_buyer_field","field":"inn"}"#,
        )
        .unwrap();
        assert_eq!(
            event,
            SessionEvent::Command {
                command: Command::SelectBuyerField {
                    field: BuyerField::Inn
                }
            }
        );
    }
}
