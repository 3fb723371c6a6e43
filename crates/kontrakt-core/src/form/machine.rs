//! The form state machine transition function.
//!
//! One table-driven function handles every buyer field: the field catalog is
//! the iteration table, so the skip-command path and the skip-synonym path
//! share a single normalization and can never diverge. Validation failures
//! leave the session untouched -- the caller re-issues the current prompt.

use kontrakt_types::config::FormConfig;
use kontrakt_types::error::ValidationError;
use kontrakt_types::event::{Command, SessionEvent};
use kontrakt_types::field::{BuyerField, ItemField};
use kontrakt_types::item::PendingItem;
use kontrakt_types::reply::Prompt;
use kontrakt_types::session::{FormState, IntakeSession};

use super::finalize::{self, FinalizedForm};
use super::prompts;

/// The effect of one accepted transition.
#[derive(Debug, Clone)]
pub enum StepOutcome {
    /// Display this prompt next.
    Prompt(Prompt),
    /// The form validated; hand the assembled payload to the collaborators.
    /// The session state is intentionally left at `ReviewingItems` so a
    /// collaborator failure needs no rollback.
    Finalize(FinalizedForm),
}

/// Advance `session` by one event.
///
/// Every `Err` is recoverable: the session is unchanged and the caller
/// re-prompts. `Start` is accepted in any state and discards prior data.
pub fn apply(
    session: &mut IntakeSession,
    event: &SessionEvent,
    cfg: &FormConfig,
) -> Result<StepOutcome, ValidationError> {
    if matches!(event, SessionEvent::Start) {
        session.restart();
        return Ok(StepOutcome::Prompt(prompts::start_prompt()));
    }

    let state = session.state.clone();
    match (state, event) {
        // --- Buyer field collection ---
        (FormState::CollectingField { field }, SessionEvent::Text { text }) => {
            Ok(store_and_advance(session, field, cfg.normalize(text)))
        }
        (
            FormState::CollectingField { field },
            SessionEvent::Command {
                command: Command::Skip,
            },
        ) => Ok(store_and_advance(session, field, cfg.placeholder.clone())),

        // --- Item entry: name -> quantity -> price ---
        (FormState::EnteringItemName, SessionEvent::Text { text }) => {
            session.pending_item = Some(PendingItem::named(text.trim()));
            session.state = FormState::EnteringItemQuantity;
            Ok(StepOutcome::Prompt(prompts::prompt_for(session)))
        }
        (FormState::EnteringItemQuantity, SessionEvent::Text { text }) => {
            let quantity = parse_quantity(text)?;
            let pending = session
                .pending_item
                .as_mut()
                .ok_or(ValidationError::UnexpectedEvent)?;
            pending.quantity = Some(quantity);
            session.state = FormState::EnteringItemPrice;
            Ok(StepOutcome::Prompt(prompts::prompt_for(session)))
        }
        (FormState::EnteringItemPrice, SessionEvent::Text { text }) => {
            let price = parse_price(text)?;
            let item = session
                .pending_item
                .take()
                .and_then(|pending| pending.into_item(price))
                .ok_or(ValidationError::UnexpectedEvent)?;
            session.items.push(item);
            session.state = FormState::ReviewingItems;
            Ok(StepOutcome::Prompt(prompts::item_added(session)))
        }

        // --- The review menu ---
        (FormState::ReviewingItems, SessionEvent::Command { command }) => match command {
            Command::AddItem => {
                session.pending_item = None;
                session.state = FormState::EnteringItemName;
                Ok(StepOutcome::Prompt(prompts::prompt_for(session)))
            }
            Command::EditItems => {
                if session.items.is_empty() {
                    return Err(ValidationError::NoItems);
                }
                session.state = FormState::SelectingItem;
                Ok(StepOutcome::Prompt(prompts::prompt_for(session)))
            }
            Command::EditBuyer => {
                session.state = FormState::SelectingBuyerField;
                Ok(StepOutcome::Prompt(prompts::prompt_for(session)))
            }
            Command::Finish => {
                if session.items.is_empty() {
                    return Err(ValidationError::NoItems);
                }
                Ok(StepOutcome::Finalize(finalize::finalized(session, cfg)))
            }
            _ => Err(ValidationError::UnexpectedEvent),
        },

        // --- Item edit sub-dialog ---
        (
            FormState::SelectingItem,
            SessionEvent::Command {
                command: Command::SelectItem { index },
            },
        ) => {
            check_index(*index, session.items.len())?;
            session.state = FormState::SelectingItemField { index: *index };
            Ok(StepOutcome::Prompt(prompts::prompt_for(session)))
        }
        (
            FormState::SelectingItem | FormState::SelectingItemField { .. },
            SessionEvent::Command {
                command: Command::DeleteItem { index },
            },
        ) => {
            check_index(*index, session.items.len())?;
            session.items.remove(*index);
            session.state = if session.items.is_empty() {
                FormState::ReviewingItems
            } else {
                FormState::SelectingItem
            };
            Ok(StepOutcome::Prompt(prompts::prompt_for(session)))
        }
        (
            FormState::SelectingItemField { index },
            SessionEvent::Command {
                command: Command::SelectItemField { field },
            },
        ) => {
            check_index(index, session.items.len())?;
            session.state = FormState::EditingItemField {
                index,
                field: *field,
            };
            Ok(StepOutcome::Prompt(prompts::prompt_for(session)))
        }
        (FormState::EditingItemField { index, field }, SessionEvent::Text { text }) => {
            let len = session.items.len();
            let item = session
                .items
                .get_mut(index)
                .ok_or(ValidationError::ItemIndexOutOfRange { index, len })?;
            match field {
                ItemField::Name => item.name = text.trim().to_string(),
                ItemField::Quantity => item.quantity = parse_quantity(text)?,
                ItemField::UnitPrice => item.unit_price = parse_price(text)?,
            }
            session.state = FormState::ReviewingItems;
            Ok(StepOutcome::Prompt(prompts::prompt_for(session)))
        }

        // --- Buyer field edit sub-dialog ---
        (
            FormState::SelectingBuyerField,
            SessionEvent::Command {
                command: Command::SelectBuyerField { field },
            },
        ) => {
            session.state = FormState::EditingBuyerField { field: *field };
            Ok(StepOutcome::Prompt(prompts::prompt_for(session)))
        }
        (FormState::EditingBuyerField { field }, SessionEvent::Text { text }) => {
            session.buyer_fields.insert(field, cfg.normalize(text));
            session.state = FormState::ReviewingItems;
            Ok(StepOutcome::Prompt(prompts::prompt_for(session)))
        }
        (
            FormState::EditingBuyerField { field },
            SessionEvent::Command {
                command: Command::Skip,
            },
        ) => {
            session.buyer_fields.insert(field, cfg.placeholder.clone());
            session.state = FormState::ReviewingItems;
            Ok(StepOutcome::Prompt(prompts::prompt_for(session)))
        }

        _ => Err(ValidationError::UnexpectedEvent),
    }
}

/// Store one collected buyer field and advance along the catalog.
///
/// After the last catalog field the dialog moves into item entry.
fn store_and_advance(session: &mut IntakeSession, field: BuyerField, value: String) -> StepOutcome {
    session.buyer_fields.insert(field, value);
    session.state = match field.next() {
        Some(next) => FormState::CollectingField { field: next },
        None => FormState::EnteringItemName,
    };
    StepOutcome::Prompt(prompts::prompt_for(session))
}

fn parse_quantity(text: &str) -> Result<u32, ValidationError> {
    let quantity: u32 = text
        .trim()
        .parse()
        .map_err(|_| ValidationError::NotAnInteger {
            input: text.trim().to_string(),
        })?;
    if quantity == 0 {
        return Err(ValidationError::NotPositive);
    }
    Ok(quantity)
}

fn parse_price(text: &str) -> Result<u64, ValidationError> {
    text.trim()
        .parse()
        .map_err(|_| ValidationError::NotAnInteger {
            input: text.trim().to_string(),
        })
}

fn check_index(index: usize, len: usize) -> Result<(), ValidationError> {
    if index >= len {
        return Err(ValidationError::ItemIndexOutOfRange { index, len });
    }
    Ok(())
}
