use anyhow::Result;
use serde::Serialize;
use stickytabs_core::engine::{FrameValues, RecordingHost, ScrollToRow};
use stickytabs_core::{AppConfig, Catalog, CatalogItem, StickyTabs};

/// Geometry and optional press to evaluate
#[derive(Debug, Clone, Copy)]
pub struct ProbeInput {
    pub offset: f64,
    pub header: f64,
    pub nav: Option<f64>,
    pub tabs: Option<f64>,
    pub press: Option<usize>,
}

#[derive(Debug, Serialize)]
struct ProbeReport {
    frame: FrameValues,
    #[serde(skip_serializing_if = "Option::is_none")]
    press: Option<PressReport>,
}

#[derive(Debug, Serialize)]
struct PressReport {
    tab: usize,
    request: ScrollToRow,
    active_index: usize,
    suppressed: bool,
}

pub fn run(config: &AppConfig, catalog: Catalog, input: ProbeInput, json: bool) -> Result<()> {
    let has_header = catalog.has_header();
    let mut engine = StickyTabs::new(catalog.sections, has_header, config.engine.clone());
    let report = probe(&mut engine, input)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&engine, &report);
    }
    Ok(())
}

fn probe(engine: &mut StickyTabs<CatalogItem>, input: ProbeInput) -> Result<ProbeReport> {
    engine.on_header_layout(input.header);
    if let Some(nav) = input.nav {
        engine.on_nav_layout(nav);
    }
    if let Some(tabs) = input.tabs {
        engine.on_tabs_layout(tabs);
    }
    let frame = engine.on_scroll(input.offset);

    let press = match input.press {
        Some(tab) => {
            let mut host = RecordingHost::default();
            let request = engine.press_tab(tab, &mut host)?;
            Some(PressReport {
                tab,
                request,
                active_index: engine.active_index(),
                suppressed: engine.is_suppressed(),
            })
        }
        None => None,
    };

    Ok(ProbeReport { frame, press })
}

fn print_report(engine: &StickyTabs<CatalogItem>, report: &ProbeReport) {
    let geometry = engine.geometry();
    let nav = report.frame.nav;

    println!(
        "Geometry: offset {:.1}, header {:.1}, nav {:.1}, tabs {:.1}",
        geometry.scroll_offset,
        geometry.header_height,
        geometry.nav_overlay_height,
        geometry.tabs_bar_height
    );
    println!("Spacer height: {:.1}", report.frame.spacer_height);
    println!(
        "Nav progress: {:.3} (underlay {:.3}, light {:.3}, dark {:.3}, touch {:?})",
        nav.progress, nav.underlay_opacity, nav.light_opacity, nav.dark_opacity, nav.touch_layer
    );

    if let Some(press) = &report.press {
        println!(
            "Press tab {}: scroll to row {} with view offset {:.1} ({:?}, animated: {})",
            press.tab,
            press.request.row,
            press.request.view_offset,
            press.request.align,
            press.request.animated
        );
        println!(
            "Active index {}, suppressed: {}",
            press.active_index, press.suppressed
        );
    }
}

#[cfg(test)]
mod tests {
    use stickytabs_core::EngineConfig;

    use super::*;

    fn engine() -> StickyTabs<CatalogItem> {
        StickyTabs::new(Catalog::demo().sections, true, EngineConfig::default())
    }

    #[test]
    fn test_probe_band_midpoint() {
        let report = probe(
            &mut engine(),
            ProbeInput {
                offset: 300.0,
                header: 300.0,
                nav: Some(80.0),
                tabs: Some(48.0),
                press: None,
            },
        )
        .unwrap();
        assert_eq!(report.frame.spacer_height, 40.0);
        assert!(report.press.is_none());
    }

    #[test]
    fn test_probe_press() {
        let report = probe(
            &mut engine(),
            ProbeInput {
                offset: 500.0,
                header: 300.0,
                nav: Some(80.0),
                tabs: Some(48.0),
                press: Some(1),
            },
        )
        .unwrap();
        let press = report.press.unwrap();
        assert_eq!(press.request.view_offset, 129.0);
        assert_eq!(press.request.row, 9);
        assert!(press.suppressed);
    }

    #[test]
    fn test_probe_press_out_of_range() {
        let result = probe(
            &mut engine(),
            ProbeInput {
                offset: 0.0,
                header: 240.0,
                nav: None,
                tabs: None,
                press: Some(7),
            },
        );
        assert!(result.is_err());
    }
}
