//! Currencies command - show the currency table loaded by the client

use anyhow::Result;
use bitpay_lib::Client;

use crate::ui;

pub fn run(client: &Client, code: Option<String>) -> Result<()> {
    if let Some(code) = code {
        let Some(info) = client.currency_info(&code) else {
            ui::warning(&format!("Unknown currency {}", code));
            return Ok(());
        };
        ui::title(&format!("Currency {}", info.code));
        ui::print_json(info)?;
        return Ok(());
    }

    ui::title("Supported Currencies");
    for info in client.currencies().iter() {
        ui::field(
            &info.code,
            &format!(
                "{} (precision {})",
                info.name.as_deref().unwrap_or("-"),
                client.currencies().precision(&info.code)
            ),
        );
    }
    ui::rule();
    ui::info(&format!("{} currencies", client.currencies().len()));
    Ok(())
}
