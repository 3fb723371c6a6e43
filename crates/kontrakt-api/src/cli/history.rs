//! `kontrakt history` -- list recently generated contracts.

use comfy_table::Table;
use comfy_table::presets::UTF8_FULL;
use console::style;

use kontrakt_core::repository::ContractRepository;

use crate::state::AppState;

/// Print the most recent contract summary rows.
pub async fn show_history(state: &AppState, limit: i64, json: bool) -> anyhow::Result<()> {
    let records = state.intake.repo().list_recent(limit).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    if records.is_empty() {
        println!("{}", style("📂 История пуста").dim());
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec![
        "ID",
        "Покупатель",
        "ИНН",
        "Сумма (сум)",
        "Создан",
    ]);
    for record in &records {
        table.add_row(vec![
            record.id.to_string(),
            record.buyer_name.clone(),
            record.inn.clone(),
            format!("{:.0}", record.total_sum),
            record.created_at.format("%d.%m %H:%M").to_string(),
        ]);
    }
    println!("{table}");

    Ok(())
}
