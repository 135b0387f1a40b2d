//! Ledgers command - balances and ledger entries

use anyhow::Result;
use bitpay_lib::Client;
use chrono::NaiveDate;

use crate::ui;

pub async fn balances(client: &Client) -> Result<()> {
    ui::title("Ledger Balances");
    let ledgers = client.get_ledgers().await?;
    for ledger in &ledgers {
        ui::field(
            ledger.currency.as_deref().unwrap_or("?"),
            &ui::or_dash(ledger.balance),
        );
    }
    Ok(())
}

pub async fn entries(client: &Client, currency: &str, from: NaiveDate, to: NaiveDate) -> Result<()> {
    ui::title(&format!("{} Ledger {} to {}", currency, from, to));
    let entries = client.get_ledger(currency, from, to).await?;
    if entries.is_empty() {
        ui::info("No entries in range");
        return Ok(());
    }
    ui::print_json(&entries)?;
    Ok(())
}
