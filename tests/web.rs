//! Browser tests for the DOM adapter. Run with `wasm-pack test --headless --firefox`.

#![cfg(target_arch = "wasm32")]

use bluegem::browser::DomHost;
use bluegem::{Annotator, AnnotatorConfig, ListingHost, MetricSet, PatternDatabase};
use wasm_bindgen_test::*;
use web_sys::Document;

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

fn mount(html: &str) -> DomHost {
    let doc = document();
    doc.body().unwrap().set_inner_html(html);
    DomHost::new(doc, AnnotatorConfig::default())
}

fn row(seed: u32, series: &str, weapon: &str, with_anchor: bool) -> String {
    let asset = format!(r#"{{"info":{{"paintseed":{}}}}}"#, seed);
    let goods = format!(
        r#"{{"tags":{{"series":{{"internal_name":"{}"}},"weapon":{{"internal_name":"{}"}}}}}}"#,
        series, weapon
    );
    let anchor = if with_anchor { r#"<div class="sticker-premium"></div>"# } else { "" };
    format!(
        "<tr class=\"selling\" data-asset-info='{}' data-goods-info='{}'><td>{}</td></tr>",
        asset, goods, anchor
    )
}

fn database() -> PatternDatabase {
    let mut db = PatternDatabase::default();
    db.insert("ak47", 7, MetricSet::new(62.3, 40.1, 55.0, 70.0));
    db
}

#[wasm_bindgen_test]
fn finds_only_rows_with_both_attributes() {
    let host = mount(&format!(
        "<table class=\"list_tb_csgo\"><tbody>{}<tr class=\"selling\" data-asset-info='{{}}'></tr></tbody></table>",
        row(7, "case_hardened", "weapon_ak47", true)
    ));
    assert_eq!(host.listings().len(), 1);
}

#[wasm_bindgen_test]
fn scan_appends_one_badge_and_invalidate_removes_it() {
    let host = mount(&format!(
        "<table class=\"list_tb_csgo\"><tbody>{}{}</tbody></table>",
        row(7, "case_hardened", "weapon_ak47", true),
        row(7, "case_hardened", "weapon_ak47", false)
    ));
    let mut annotator = Annotator::default();
    annotator.load_database(database());

    let report = annotator.scan(&host);
    annotator.scan(&host);

    assert_eq!(report.annotated, 1);
    assert_eq!(report.no_anchor, 1);
    let badges = document().query_selector_all(".ch-blue-gem").unwrap();
    assert_eq!(badges.length(), 1);
    let badge = document().query_selector(".ch-blue-gem").unwrap().unwrap();
    assert_eq!(badge.text_content().unwrap(), "Top: 62.3%");
    assert!(badge.get_attribute("title").unwrap().contains("Pattern Seed: 7"));

    annotator.invalidate(&host);
    assert_eq!(document().query_selector_all(".ch-blue-gem").unwrap().length(), 0);
    assert!(document().query_selector("[data-ch-processed]").unwrap().is_none());
}

#[wasm_bindgen_test]
fn observe_target_falls_back_to_body() {
    let host = mount("<div>no listings here</div>");
    let target = host.observe_target().unwrap();
    assert_eq!(target.node_name(), "BODY");
}

#[wasm_bindgen_test]
fn invalidate_clears_row_that_lost_its_goods_attribute() {
    let host = mount(&format!(
        "<table class=\"list_tb_csgo\"><tbody>{}</tbody></table>",
        row(7, "case_hardened", "weapon_ak47", true)
    ));
    let mut annotator = Annotator::default();
    annotator.load_database(database());
    annotator.scan(&host);

    let listing = document().query_selector("tr.selling").unwrap().unwrap();
    listing.remove_attribute("data-goods-info").unwrap();
    assert_eq!(host.listings().len(), 0);
    assert_eq!(host.marked_listings().len(), 1);

    assert_eq!(annotator.invalidate(&host), 1);
    assert_eq!(document().query_selector_all(".ch-blue-gem").unwrap().length(), 0);
    assert!(document().query_selector("[data-ch-processed]").unwrap().is_none());
}
