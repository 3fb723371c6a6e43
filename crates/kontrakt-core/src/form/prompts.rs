//! Prompt catalog: user-facing texts and inline choice sets.
//!
//! All strings live here so the transition function stays free of wording.
//! The dialog speaks Russian, matching the deployed product.

use kontrakt_types::error::{GeneratorError, StoreError, ValidationError};
use kontrakt_types::event::Command;
use kontrakt_types::field::{BuyerField, ItemField};
use kontrakt_types::item::LineItem;
use kontrakt_types::reply::{Choice, Prompt};
use kontrakt_types::session::{FormState, IntakeSession};

fn skip_choice() -> Choice {
    Choice::new("⏭ Пропустить", Command::Skip)
}

fn review_choices() -> Vec<Choice> {
    vec![
        Choice::new("➕ Добавить товар", Command::AddItem),
        Choice::new("✏️ Изменить товары", Command::EditItems),
        Choice::new("👤 Данные покупателя", Command::EditBuyer),
        Choice::new("📄 Сформировать договор", Command::Finish),
    ]
}

/// The opening prompt issued on session start.
pub fn start_prompt() -> Prompt {
    Prompt::with_choices(
        "📄 Начинаем создание договора.\nВведите Имя покупателя:",
        vec![skip_choice()],
    )
}

/// The prompt for whatever state the session is currently in.
///
/// Also used to re-prompt after a rejected input.
pub fn prompt_for(session: &IntakeSession) -> Prompt {
    match &session.state {
        FormState::Idle => Prompt::text("Отправьте /start, чтобы оформить договор."),
        FormState::CollectingField { field } => field_prompt(*field),
        FormState::EnteringItemName => Prompt::text("🔻 Введите название товара:"),
        FormState::EnteringItemQuantity => {
            let name = session
                .pending_item
                .as_ref()
                .map(|pending| pending.name.as_str())
                .unwrap_or("товара");
            Prompt::text(format!("Введите количество «{name}»:"))
        }
        FormState::EnteringItemPrice => Prompt::text("Стоимость за 1 шт (UZS):"),
        FormState::ReviewingItems => review_prompt(session),
        FormState::SelectingItem => item_list_prompt(&session.items),
        FormState::SelectingItemField { index } => item_field_prompt(&session.items, *index),
        FormState::EditingItemField { field, .. } => match field {
            ItemField::Name => Prompt::text("Введите новое название:"),
            ItemField::Quantity => Prompt::text("Введите новое количество:"),
            ItemField::UnitPrice => Prompt::text("Введите новую цену (UZS):"),
        },
        FormState::SelectingBuyerField => buyer_field_list_prompt(),
        FormState::EditingBuyerField { field } => Prompt::with_choices(
            format!("{}:", field.label()),
            vec![skip_choice()],
        ),
    }
}

/// Confirmation shown right after an item lands in the list.
pub fn item_added(session: &IntakeSession) -> Prompt {
    let text = match session.items.last() {
        Some(item) => format!(
            "Товар добавлен ✔\n\n🟦 {}\nКоличество: {}\nЦена: {} сум",
            item.name, item.quantity, item.unit_price
        ),
        None => "Товар добавлен ✔".to_string(),
    };
    Prompt::with_choices(text, review_choices())
}

fn field_prompt(field: BuyerField) -> Prompt {
    let text = match field {
        BuyerField::BuyerName => "Введите Имя покупателя:".to_string(),
        BuyerField::Inn => "Введите ИНН:".to_string(),
        other => format!("{}:", other.label()),
    };
    Prompt::with_choices(text, vec![skip_choice()])
}

fn review_prompt(session: &IntakeSession) -> Prompt {
    let text = if session.items.is_empty() {
        "Список товаров пуст.".to_string()
    } else {
        let lines: Vec<String> = session
            .items
            .iter()
            .enumerate()
            .map(|(i, item)| item_line(i, item))
            .collect();
        format!("🗂 Товары:\n{}", lines.join("\n"))
    };
    Prompt::with_choices(text, review_choices())
}

fn item_list_prompt(items: &[LineItem]) -> Prompt {
    let choices = items
        .iter()
        .enumerate()
        .map(|(i, item)| Choice::new(item_line(i, item), Command::SelectItem { index: i }))
        .collect();
    Prompt::with_choices("Выберите товар:", choices)
}

fn item_field_prompt(items: &[LineItem], index: usize) -> Prompt {
    let name = items
        .get(index)
        .map(|item| item.name.as_str())
        .unwrap_or("товар");
    let choices = vec![
        Choice::new(
            ItemField::Name.label(),
            Command::SelectItemField {
                field: ItemField::Name,
            },
        ),
        Choice::new(
            ItemField::Quantity.label(),
            Command::SelectItemField {
                field: ItemField::Quantity,
            },
        ),
        Choice::new(
            ItemField::UnitPrice.label(),
            Command::SelectItemField {
                field: ItemField::UnitPrice,
            },
        ),
        Choice::new("🗑 Удалить товар", Command::DeleteItem { index }),
    ];
    Prompt::with_choices(format!("Что изменить в «{name}»?"), choices)
}

fn buyer_field_list_prompt() -> Prompt {
    let choices = BuyerField::CATALOG
        .iter()
        .map(|field| {
            Choice::new(
                field.label(),
                Command::SelectBuyerField { field: *field },
            )
        })
        .collect();
    Prompt::with_choices("Какое поле изменить?", choices)
}

fn item_line(index: usize, item: &LineItem) -> String {
    format!(
        "{}. {} — {} × {} сум",
        index + 1,
        item.name,
        item.quantity,
        item.unit_price
    )
}

/// User-facing message for a rejected input.
pub fn validation_message(err: &ValidationError) -> String {
    match err {
        ValidationError::NotAnInteger { .. } => "❗ Введите число".to_string(),
        ValidationError::NotPositive => "❗ Количество должно быть больше нуля".to_string(),
        ValidationError::NoItems => {
            "❗ Список товаров пуст. Сначала добавьте товар.".to_string()
        }
        ValidationError::ItemIndexOutOfRange { .. } => {
            "❗ Такого товара уже нет в списке.".to_string()
        }
        ValidationError::UnexpectedEvent => "❗ Я ожидал другой ввод. Продолжим:".to_string(),
    }
}

/// Message for a session-less event.
pub fn no_session_message() -> String {
    "Сессия не найдена. Отправьте /start, чтобы начать заново.".to_string()
}

/// User-facing message for a failed document generation. Retryable.
pub fn generation_failed(err: &GeneratorError) -> String {
    match err {
        GeneratorError::Status { status, .. } => {
            format!("❌ API ERROR {status}. Попробуйте ещё раз: «Сформировать договор».")
        }
        GeneratorError::Timeout { seconds } => format!(
            "⌛ Сервис не ответил за {seconds} с. Попробуйте ещё раз: «Сформировать договор»."
        ),
        GeneratorError::Request(_) => {
            "❌ Не удалось связаться с сервисом документов. Попробуйте ещё раз.".to_string()
        }
    }
}

/// User-facing message for a failed document write. Retryable.
pub fn store_failed(_err: &StoreError) -> String {
    "❌ Не удалось сохранить документ. Попробуйте ещё раз.".to_string()
}
