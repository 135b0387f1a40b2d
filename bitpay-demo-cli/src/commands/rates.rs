//! Rates command - show exchange rates

use anyhow::Result;
use bitpay_lib::Client;

use crate::ui;

pub async fn run(client: &Client, base: &str, currency: Option<String>) -> Result<()> {
    if let Some(currency) = currency {
        ui::title(&format!("Rate {}/{}", base, currency));
        let rate = client.get_currency_pair_rate(base, &currency).await?;
        ui::field(
            rate.code.as_deref().unwrap_or(&currency),
            &ui::or_dash(rate.rate),
        );
        return Ok(());
    }

    ui::title(&format!("Rates for {}", base));
    let rates = client.get_currency_rates(base).await?;
    if rates.is_empty() {
        ui::info("No rates returned");
        return Ok(());
    }
    for rate in &rates.rates {
        let label = match (&rate.code, &rate.name) {
            (Some(code), Some(name)) => format!("{} ({})", code, name),
            (Some(code), None) => code.clone(),
            _ => "?".to_string(),
        };
        ui::field(
            &label,
            &ui::or_dash(rate.rate),
        );
    }
    ui::rule();
    ui::info(&format!("{} rates", rates.len()));
    Ok(())
}
