//! Contract payload and summary-record types.
//!
//! [`ContractPayload`] is the wire shape the document-generation service
//! expects: PascalCase keys with an `Items` array of `{name, quantity,
//! priceNoVat}` entries. [`ContractRecord`] is the persisted summary row.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The request body submitted to the document-generation service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ContractPayload {
    /// Always `"AUTO"` -- the generator assigns the real number.
    pub agreement_number: String,
    pub buyer_name: String,
    pub buyer_inn: String,
    pub buyer_address: String,
    pub buyer_phone: String,
    pub buyer_account: String,
    pub buyer_bank: String,
    pub buyer_mfo: String,
    pub buyer_director: String,
    pub items: Vec<PayloadItem>,
}

/// One item entry in the generator payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayloadItem {
    pub name: String,
    pub quantity: u32,
    #[serde(rename = "priceNoVat")]
    pub price_no_vat: u64,
}

/// A summary row to insert after a successful generation.
#[derive(Debug, Clone, PartialEq)]
pub struct NewContract {
    pub buyer_name: String,
    pub inn: String,
    pub phone: String,
    pub total_sum: f64,
    pub file_ref: String,
}

/// A persisted contract summary row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractRecord {
    pub id: i64,
    pub buyer_name: String,
    pub inn: String,
    pub phone: String,
    pub total_sum: f64,
    pub file_ref: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_serializes_with_generator_keys() {
        let payload = ContractPayload {
            agreement_number: "AUTO".to_string(),
            buyer_name: "ООО Биной".to_string(),
            buyer_inn: "301234567".to_string(),
            buyer_address: "________".to_string(),
            buyer_phone: "+998901234567".to_string(),
            buyer_account: "20208000900123456001".to_string(),
            buyer_bank: "Капиталбанк".to_string(),
            buyer_mfo: "01088".to_string(),
            buyer_director: "Каримов А.А.".to_string(),
            items: vec![PayloadItem {
                name: "Цемент М400".to_string(),
                quantity: 2,
                price_no_vat: 150_000,
            }],
        };

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["AgreementNumber"], "AUTO");
        assert_eq!(json["BuyerName"], "ООО Биной");
        assert_eq!(json["BuyerInn"], "301234567");
        assert_eq!(json["BuyerMfo"], "01088");
        assert_eq!(json["Items"][0]["name"], "Цемент М400");
        assert_eq!(json["Items"][0]["quantity"], 2);
        assert_eq!(json["Items"][0]["priceNoVat"], 150_000);
        // No snake_case leakage
        assert!(json.get("buyer_name").is_none());
        assert!(json["Items"][0].get("price_no_vat").is_none());
    }
}
