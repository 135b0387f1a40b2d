//! Wallets command - list wallets that can pay invoices

use anyhow::Result;
use bitpay_lib::Client;

use crate::ui;

pub async fn run(client: &Client) -> Result<()> {
    ui::title("Supported Wallets");
    let wallets = client.get_supported_wallets().await?;
    for wallet in &wallets {
        let currencies: Vec<&str> = wallet
            .currencies
            .iter()
            .flatten()
            .filter_map(|c| c.code.as_deref())
            .collect();
        ui::field(
            wallet.display_name.as_deref().or(wallet.key.as_deref()).unwrap_or("?"),
            &currencies.join(", "),
        );
    }
    ui::rule();
    ui::info(&format!("{} wallets", wallets.len()));
    Ok(())
}
