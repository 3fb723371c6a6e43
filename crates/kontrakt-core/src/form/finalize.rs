//! Payload assembly for the finish transition.
//!
//! The total is derived here and nowhere else: it is never stored on the
//! session. Buyer fields that were somehow never collected fall back to the
//! placeholder sentinel so the payload carries every field.

use kontrakt_types::config::FormConfig;
use kontrakt_types::contract::{ContractPayload, PayloadItem};
use kontrakt_types::field::BuyerField;
use kontrakt_types::item::LineItem;
use kontrakt_types::session::IntakeSession;

/// VAT multiplier applied to the item subtotal at finalize time.
pub const VAT_MULTIPLIER: f64 = 1.12;

/// A validated form ready for the collaborators.
#[derive(Debug, Clone)]
pub struct FinalizedForm {
    pub payload: ContractPayload,
    pub total_sum: f64,
}

/// Assemble the finalized form from a session that passed validation.
pub fn finalized(session: &IntakeSession, cfg: &FormConfig) -> FinalizedForm {
    FinalizedForm {
        payload: assemble_payload(session, cfg),
        total_sum: total_with_vat(&session.items),
    }
}

/// `Σ quantity × unit_price × 1.12` over the ordered item list.
pub fn total_with_vat(items: &[LineItem]) -> f64 {
    items
        .iter()
        .map(|item| item.quantity as f64 * item.unit_price as f64)
        .sum::<f64>()
        * VAT_MULTIPLIER
}

/// Build the generator payload; every buyer field is present.
pub fn assemble_payload(session: &IntakeSession, cfg: &FormConfig) -> ContractPayload {
    let value = |field: BuyerField| {
        session
            .buyer_fields
            .get(&field)
            .cloned()
            .unwrap_or_else(|| cfg.placeholder.clone())
    };

    ContractPayload {
        agreement_number: "AUTO".to_string(),
        buyer_name: value(BuyerField::BuyerName),
        buyer_inn: value(BuyerField::Inn),
        buyer_address: value(BuyerField::Address),
        buyer_phone: value(BuyerField::Phone),
        buyer_account: value(BuyerField::Account),
        buyer_bank: value(BuyerField::Bank),
        buyer_mfo: value(BuyerField::Mfo),
        buyer_director: value(BuyerField::Director),
        items: session
            .items
            .iter()
            .map(|item| PayloadItem {
                name: item.name.clone(),
                quantity: item.quantity,
                price_no_vat: item.unit_price,
            })
            .collect(),
    }
}
