use super::ui;
use anyhow::Result;
use crate::core::Chain;
use crate::ticker::TickerPipeline;
use crate::ticker::selectors;
use comfy_table::Cell;

/// Renders the unit options of the selected chain, marking the active one.
pub fn display_units(pipeline: &TickerPipeline) -> String {
    let state = pipeline.state();
    let title = format!(
        "{} ({})",
        pipeline.crypto_name().unwrap_or("No chain selected"),
        pipeline.canonical_unit_name()
    );

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Unit"),
        ui::header_cell("Name"),
        ui::header_cell("Selected"),
    ]);
    for option in pipeline.unit_options() {
        let selected = state.selected_currency_unit.as_deref() == Some(option.key.as_str());
        table.add_row(vec![
            Cell::new(&option.key),
            Cell::new(&option.name),
            Cell::new(if selected { "*" } else { "" }),
        ]);
    }

    let mut output = format!("{}\n\n", ui::style_text(&title, ui::StyleType::Title));
    output.push_str(&table.to_string());

    if let Some(name) = pipeline.display_name_for_unit() {
        output.push_str(&format!(
            "\nDisplaying amounts in {}",
            ui::style_text(&name, ui::StyleType::Highlight)
        ));
    }
    if let Some(price) = selectors::select_active_fiat_price(state) {
        output.push_str(&format!(
            "\n1 {} = {} {}",
            pipeline.canonical_unit_name(),
            price,
            selectors::select_fiat_ticker(state)
        ));
    }
    output
}

pub async fn run(pipeline: &mut TickerPipeline, chain: Chain, unit: Option<&str>) -> Result<()> {
    pipeline.receive_cryptocurrency(chain).await;
    if let Some(unit) = unit {
        pipeline.set_currency(unit).await?;
    }
    println!("{}", display_units(pipeline));
    Ok(())
}
