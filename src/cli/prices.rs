use super::ui;
use crate::core::Chain;
use crate::ticker::{TickerPipeline, TickerState};
use anyhow::Result;
use comfy_table::Cell;

/// Renders the loaded tickers, one row per chain and one column per fiat currency.
pub fn display_prices(state: &TickerState) -> String {
    let mut table = ui::new_styled_table();

    let mut header = vec![ui::header_cell("Chain")];
    header.extend(state.fiat_tickers.iter().map(|fiat| {
        if fiat.eq_ignore_ascii_case(&state.fiat_ticker) {
            ui::header_cell(&format!("{fiat} *"))
        } else {
            ui::header_cell(fiat)
        }
    }));
    table.set_header(header);

    for chain in Chain::ALL {
        let prices = state.price_by_chain.get(&chain);
        let mut row = vec![Cell::new(chain.display_name())];
        for fiat in &state.fiat_tickers {
            let selected = fiat.eq_ignore_ascii_case(&state.fiat_ticker);
            row.push(
                prices
                    .and_then(|p| p.get(fiat))
                    .map_or_else(|| ui::na_cell(state.last_error.is_some()), |price| {
                        ui::price_cell(price, selected)
                    }),
            );
        }
        table.add_row(row);
    }

    let mut output = format!("{}\n\n", ui::style_text("Tickers", ui::StyleType::Title));
    output.push_str(&table.to_string());

    if let Some(updated) = state.last_updated {
        output.push_str(&format!(
            "\n{}",
            ui::style_text(
                &format!("Updated {}", updated.format("%Y-%m-%d %H:%M:%S UTC")),
                ui::StyleType::Subtle
            )
        ));
    }
    if let Some(error) = &state.last_error {
        output.push_str(&format!(
            "\n{}",
            ui::style_text(error, ui::StyleType::Error)
        ));
    }
    output
}

pub async fn run(pipeline: &mut TickerPipeline) -> Result<()> {
    let pb = ui::new_spinner("Fetching tickers...");
    let result = pipeline.init_tickers().await;
    pb.finish_and_clear();

    println!("{}", display_prices(pipeline.state()));
    result.map(|_| ()).map_err(anyhow::Error::from)
}
