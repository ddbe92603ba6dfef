use anyhow::Result;
use stickytabs_core::catalog::Row;
use stickytabs_core::{AppConfig, Catalog, CatalogItem, StickyTabs};

pub fn run(config: &AppConfig, catalog: Catalog, show_header: bool, json: bool) -> Result<()> {
    let has_header = show_header && catalog.has_header();
    let engine = StickyTabs::new(catalog.sections, has_header, config.engine.clone());

    if json {
        println!("{}", serde_json::to_string_pretty(engine.rows())?);
    } else {
        print!("{}", format_rows(&engine));
    }
    Ok(())
}

fn format_rows(engine: &StickyTabs<CatalogItem>) -> String {
    let rows = engine.rows();
    let mut out = String::new();

    out.push_str(&format!(
        "Rows ({}), tabs at {}, section headers {:?}\n\n",
        rows.len(),
        rows.tabs_row,
        rows.section_header_rows
    ));

    for (index, flat) in rows.iter().enumerate() {
        let detail = match flat.row {
            Row::Header => "header".to_string(),
            Row::TabsBar => format!("tabs bar ({} tabs)", engine.tab_titles().len()),
            Row::SectionHeader { section } => {
                let title = engine
                    .tab_titles()
                    .get(section)
                    .map(String::as_str)
                    .unwrap_or("");
                format!("section {} \"{}\"", section, title)
            }
            Row::Item { .. } => match engine.item(index) {
                Some(item) => format!("item {} \"{}\" {}", item.id, item.name, item.price),
                None => "item".to_string(),
            },
        };
        out.push_str(&format!("  {:>4}  {:<24} {}\n", index, flat.key, detail));
    }
    out
}
