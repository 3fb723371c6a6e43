//! The buyer-field catalog and line-item field identifiers.
//!
//! The catalog is a fixed ordered list: order defines prompt sequencing and
//! skip-chain traversal. No two entries share a name.

use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// One buyer field collected during the intake dialog.
///
/// Variant order matches [`BuyerField::CATALOG`]; the dialog walks the
/// catalog front to back exactly once before item entry starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuyerField {
    BuyerName,
    Inn,
    Address,
    Phone,
    Account,
    Bank,
    Mfo,
    Director,
}

impl BuyerField {
    /// The full catalog in collection order.
    pub const CATALOG: [BuyerField; 8] = [
        BuyerField::BuyerName,
        BuyerField::Inn,
        BuyerField::Address,
        BuyerField::Phone,
        BuyerField::Account,
        BuyerField::Bank,
        BuyerField::Mfo,
        BuyerField::Director,
    ];

    /// The first field of the catalog (where a fresh session starts).
    pub const fn first() -> BuyerField {
        BuyerField::BuyerName
    }

    /// The field after `self` in catalog order, or `None` for the last one.
    pub fn next(self) -> Option<BuyerField> {
        let pos = Self::CATALOG.iter().position(|f| *f == self)?;
        Self::CATALOG.get(pos + 1).copied()
    }

    /// Stable snake_case name, used as map key and in wire payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            BuyerField::BuyerName => "buyer_name",
            BuyerField::Inn => "inn",
            BuyerField::Address => "address",
            BuyerField::Phone => "phone",
            BuyerField::Account => "account",
            BuyerField::Bank => "bank",
            BuyerField::Mfo => "mfo",
            BuyerField::Director => "director",
        }
    }

    /// Human-readable label shown in prompts and edit menus.
    pub fn label(&self) -> &'static str {
        match self {
            BuyerField::BuyerName => "Имя покупателя",
            BuyerField::Inn => "ИНН",
            BuyerField::Address => "Юридический адрес",
            BuyerField::Phone => "Телефон",
            BuyerField::Account => "Р/С",
            BuyerField::Bank => "Банк",
            BuyerField::Mfo => "МФО",
            BuyerField::Director => "Директор",
        }
    }
}

impl fmt::Display for BuyerField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BuyerField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "buyer_name" => Ok(BuyerField::BuyerName),
            "inn" => Ok(BuyerField::Inn),
            "address" => Ok(BuyerField::Address),
            "phone" => Ok(BuyerField::Phone),
            "account" => Ok(BuyerField::Account),
            "bank" => Ok(BuyerField::Bank),
            "mfo" => Ok(BuyerField::Mfo),
            "director" => Ok(BuyerField::Director),
            other => Err(format!("unknown buyer field: '{other}'")),
        }
    }
}

/// An editable field of a line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemField {
    Name,
    Quantity,
    UnitPrice,
}

impl ItemField {
    /// Human-readable label shown in edit menus.
    pub fn label(&self) -> &'static str {
        match self {
            ItemField::Name => "Название",
            ItemField::Quantity => "Количество",
            ItemField::UnitPrice => "Цена",
        }
    }
}

impl fmt::Display for ItemField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemField::Name => write!(f, "name"),
            ItemField::Quantity => write!(f, "quantity"),
            ItemField::UnitPrice => write!(f, "unit_price"),
        }
    }
}
