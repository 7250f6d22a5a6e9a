use super::mock::{asset, fixture_database, goods, MockPage};
use crate::annotator::conductor::Annotator;
use crate::pattern::{ColorTier, Metric};

fn ready_annotator() -> Annotator {
    let mut annotator = Annotator::default();
    annotator.load_database(fixture_database());
    annotator
}

#[test]
fn test_scan_before_load_touches_nothing() {
    let page = MockPage::new();
    let row = page.add_listing(&asset(7), &goods("case_hardened", "weapon_ak47"));

    let mut annotator = Annotator::default();
    let report = annotator.scan(&page);

    assert!(report.skipped_not_ready);
    assert!(!page.is_marked(row), "early scans must not mark rows");
    assert_eq!(page.total_badges(), 0);

    annotator.load_database(fixture_database());
    let report = annotator.scan(&page);
    assert_eq!(report.annotated, 1);
    assert_eq!(page.badges(row).len(), 1);
}

#[test]
fn test_ak47_end_to_end() {
    let page = MockPage::new();
    let row = page.add_listing(&asset(7), &goods("weapon_case_hardened", "weapon_ak47"));

    let mut annotator = ready_annotator();
    annotator.scan(&page);

    let badges = page.badges(row);
    assert_eq!(badges.len(), 1);
    let badge = &badges[0];
    assert_eq!(badge.label, "Top: 62.3%");
    assert_eq!(badge.tier, ColorTier::High);
    assert_eq!(badge.tooltip, "Pattern Seed: 7\nTop: 62.30%\nMagazine: 40.10%\nOverall: 55.00%\n");
}

#[test]
fn test_karambit_end_to_end() {
    let page = MockPage::new();
    let row = page.add_listing(&asset(123), &goods("case_hardened", "weapon_knife_karambit"));

    let mut annotator = ready_annotator();
    annotator.set_preference(Metric::Magazine);
    annotator.scan(&page);

    let badge = &page.badges(row)[0];
    assert_eq!(badge.label, "Overall: 12.0%");
    assert_eq!(badge.tier, ColorTier::Low);
    assert_eq!(badge.tooltip, "Pattern Seed: 123\nOverall Blue: 12.00%");
}

#[test]
fn test_second_scan_is_a_no_op() {
    let page = MockPage::new();
    page.add_listing(&asset(7), &goods("case_hardened", "weapon_ak47"));
    page.add_listing(&asset(123), &goods("case_hardened", "weapon_knife_karambit"));
    page.add_listing(&asset(5), &goods("fade", "weapon_ak47"));

    let mut annotator = ready_annotator();
    let first = annotator.scan(&page);
    let second = annotator.scan(&page);

    assert_eq!(first.annotated, 2);
    assert_eq!(first.rejected, 1);
    assert_eq!(second.annotated, 0);
    assert_eq!(second.already_marked, 3);
    assert_eq!(page.total_badges(), 2);
}

#[test]
fn test_every_examined_listing_is_marked() {
    let page = MockPage::new();
    let rejected = page.add_listing(&asset(7), &goods("doppler", "weapon_ak47"));
    let unresolved = page.add_listing(&asset(7), &goods("case_hardened", "weapon_unknown"));
    let no_data = page.add_listing(&asset(999), &goods("case_hardened", "weapon_ak47"));
    let no_anchor = page.add_listing_without_anchor(&asset(7), &goods("case_hardened", "weapon_ak47"));
    let malformed = page.add_listing("{broken", &goods("case_hardened", "weapon_ak47"));

    let report = ready_annotator().scan(&page);

    assert_eq!(report.examined, 5);
    assert_eq!(report.rejected, 1);
    assert_eq!(report.unresolved, 1);
    assert_eq!(report.no_data, 1);
    assert_eq!(report.no_anchor, 1);
    assert_eq!(report.malformed, 1);
    assert_eq!(report.annotated, 0);
    for row in [rejected, unresolved, no_data, no_anchor, malformed] {
        assert!(page.is_marked(row));
    }
    assert_eq!(page.total_badges(), 0);
}

#[test]
fn test_bad_listing_does_not_abort_batch() {
    let page = MockPage::new();
    page.add_listing("not json at all", "also not json");
    let good = page.add_listing(&asset(7), &goods("case_hardened", "weapon_ak47"));

    let report = ready_annotator().scan(&page);

    assert_eq!(report.malformed, 1);
    assert_eq!(report.annotated, 1);
    assert_eq!(page.badges(good).len(), 1);
}

#[test]
fn test_non_family_listing_never_badged() {
    let page = MockPage::new();
    // Seed and weapon both present in the database, only the series differs
    let row = page.add_listing(&asset(7), &goods("weapon_fade", "weapon_ak47"));

    let mut annotator = ready_annotator();
    for pref in Metric::ALL {
        annotator.set_preference(pref);
        annotator.invalidate(&page);
        annotator.scan(&page);
        assert!(page.badges(row).is_empty());
    }
}

#[test]
fn test_unrelated_rows_are_not_listings() {
    let page = MockPage::new();
    let row = page.add_unrelated_row(&asset(7));

    let report = ready_annotator().scan(&page);

    assert_eq!(report.examined, 0);
    assert!(!page.is_marked(row));
}

#[test]
fn test_new_rows_after_scan_are_picked_up() {
    let page = MockPage::new();
    page.add_listing(&asset(7), &goods("case_hardened", "weapon_ak47"));

    let mut annotator = ready_annotator();
    annotator.scan(&page);

    let late = page.add_listing(&asset(400), &goods("case_hardened", "weapon_knife_m9_bayonet"));
    let report = annotator.scan(&page);

    assert_eq!(report.annotated, 1);
    assert_eq!(report.already_marked, 1);
    assert_eq!(page.badges(late)[0].label, "Overall: 31.5%");
    assert_eq!(page.badges(late)[0].tier, ColorTier::MidHigh);
}

#[test]
fn test_invalidate_clears_markers_and_badges() {
    let page = MockPage::new();
    let a = page.add_listing(&asset(7), &goods("case_hardened", "weapon_ak47"));
    let b = page.add_listing(&asset(5), &goods("fade", "weapon_ak47"));

    let mut annotator = ready_annotator();
    annotator.scan(&page);
    let cleared = annotator.invalidate(&page);

    assert_eq!(cleared, 2);
    assert!(!page.is_marked(a));
    assert!(!page.is_marked(b));
    assert_eq!(page.total_badges(), 0);
    assert_eq!(annotator.stats().badges_removed, 1);
}

#[test]
fn test_invalidate_then_scan_reflects_new_preference() {
    let page = MockPage::new();
    let ak = page.add_listing(&asset(661), &goods("case_hardened", "weapon_ak47"));
    let knife = page.add_listing(&asset(123), &goods("case_hardened", "weapon_knife_karambit"));

    let mut annotator = ready_annotator();
    annotator.scan(&page);
    assert_eq!(page.badges(ak)[0].label, "Top: 18.0%");

    for (pref, label) in [
        (Metric::Magazine, "Magazine: 32.0%"),
        (Metric::Overall, "Overall: 5.0%"),
        (Metric::AnyBlue, "Blue: 50.0%"),
        (Metric::Top, "Top: 18.0%"),
    ] {
        annotator.set_preference(pref);
        annotator.invalidate(&page);
        annotator.scan(&page);

        let ak_badges = page.badges(ak);
        assert_eq!(ak_badges.len(), 1, "no stale badge may survive");
        assert_eq!(ak_badges[0].label, label);
        assert_eq!(ak_badges[0].metric, pref);

        let knife_badges = page.badges(knife);
        assert_eq!(knife_badges.len(), 1);
        assert_eq!(knife_badges[0].label, "Overall: 12.0%");
    }
}

#[test]
fn test_invalidate_clears_row_that_lost_its_data_attribute() {
    let page = MockPage::new();
    let row = page.add_listing(&asset(7), &goods("case_hardened", "weapon_ak47"));

    let mut annotator = ready_annotator();
    annotator.scan(&page);
    assert_eq!(page.badges(row)[0].label, "Top: 62.3%");

    page.strip_attribute(row, "data-goods-info");
    annotator.set_preference(Metric::Magazine);
    let cleared = annotator.invalidate(&page);

    assert_eq!(cleared, 1);
    assert!(!page.is_marked(row));
    assert!(page.badges(row).is_empty(), "stale badge survived invalidate");
}

#[test]
fn test_whole_float_seed_is_badged() {
    let page = MockPage::new();
    let row = page.add_listing(r#"{"info":{"paintseed":7.0}}"#, &goods("case_hardened", "weapon_ak47"));

    let report = ready_annotator().scan(&page);

    assert_eq!(report.malformed, 0);
    assert_eq!(report.annotated, 1);
    assert_eq!(page.badges(row)[0].label, "Top: 62.3%");
}

#[test]
fn test_detached_rows_are_ignored() {
    let page = MockPage::new();
    let gone = page.add_listing(&asset(7), &goods("case_hardened", "weapon_ak47"));
    page.detach(gone);

    let report = ready_annotator().scan(&page);

    assert_eq!(report.examined, 0);
    assert_eq!(page.total_badges(), 0);
}

#[test]
fn test_database_loads_once() {
    let mut annotator = ready_annotator();
    annotator.load_database(Default::default());

    assert_eq!(annotator.state_name(), "ready");
    assert!(annotator.database().unwrap().lookup("ak47", 7).is_some());
}
