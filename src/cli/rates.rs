use super::ui;
use crate::core::{Clock, CryptoAsset, FiatCurrency, RateCache, RateSnapshot, RateSource};
use anyhow::Result;
use comfy_table::Cell;

impl RateSnapshot {
    /// Renders the whole table, one row per fiat currency and one column per asset.
    pub fn display_as_table(&self) -> String {
        let mut table = ui::new_styled_table();

        let mut header = vec![ui::header_cell("Currency")];
        header.extend(
            CryptoAsset::ALL
                .iter()
                .map(|asset| ui::header_cell(&format!("1 {}", asset.ticker()))),
        );
        table.set_header(header);

        for fiat in FiatCurrency::ALL {
            let mut row = vec![Cell::new(fiat.code())];
            row.extend(CryptoAsset::ALL.iter().map(|asset| {
                ui::rate_cell(self.table.rate(*asset, fiat), |rate| fiat.format_amount(rate))
            }));
            table.add_row(row);
        }

        format!(
            "{}\n\n{}\n\n{}",
            ui::style_text("Crypto spot rates", ui::StyleType::Title),
            table,
            ui::freshness_line(self)
        )
    }
}

pub async fn run<S: RateSource, C: Clock>(cache: &RateCache<S, C>) -> Result<()> {
    let pb = ui::new_spinner("Fetching rates...");
    let snapshot = cache.snapshot().await;
    pb.finish_and_clear();

    println!("{}", snapshot.display_as_table());
    Ok(())
}
