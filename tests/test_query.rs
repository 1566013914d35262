//! Unit tests for quick and advanced search parameter construction.

use lostfound_client::query::{
    build_advanced, build_quick, AdvancedSearchForm, QuickSearchType, SearchParamsBuilder, Status,
};
use lostfound_client::LostFoundError;
use serde_json::json;

// ---------------------------------------------------------------------------
// Quick mode
// ---------------------------------------------------------------------------

#[test]
fn quick_search_maps_each_selector_to_one_filter() {
    let cases = [
        ("near_me", json!({"keyword": "keys", "near_me": true, "page": 1})),
        ("by_venue", json!({"keyword": "keys", "by_venue": true, "page": 1})),
        ("lost", json!({"keyword": "keys", "status": "Lost", "page": 1})),
        ("found", json!({"keyword": "keys", "status": "Found", "page": 1})),
        ("", json!({"keyword": "keys", "page": 1})),
        ("whatever", json!({"keyword": "keys", "page": 1})),
    ];
    for (selector, expected) in cases {
        let params = build_quick(" keys ", QuickSearchType::from(selector)).unwrap();
        assert_eq!(params.to_json().unwrap(), expected, "selector {:?}", selector);
    }
}

#[test]
fn quick_search_requires_keyword() {
    let err = build_quick("   ", QuickSearchType::Lost).unwrap_err();
    assert!(matches!(err, LostFoundError::Validation(_)));
}

// ---------------------------------------------------------------------------
// Advanced mode
// ---------------------------------------------------------------------------

#[test]
fn advanced_all_blank_is_match_all() {
    let form = AdvancedSearchForm {
        keyword: "   ".to_string(),
        city: "\t".to_string(),
        ..Default::default()
    };
    let params = build_advanced(&form).unwrap();
    assert_eq!(params.to_json().unwrap(), json!({"page": 1}));
}

#[test]
fn advanced_zipcode_only_without_radius() {
    let form = AdvancedSearchForm {
        zipcode: "00000".to_string(),
        ..Default::default()
    };
    let params = build_advanced(&form).unwrap();
    assert_eq!(
        params.to_json().unwrap(),
        json!({"zipcode": "00000", "page": 1})
    );
}

#[test]
fn advanced_radius_requires_zipcode() {
    let with_zip = AdvancedSearchForm {
        zipcode: "NW1".to_string(),
        radius: Some(10),
        ..Default::default()
    };
    assert_eq!(build_advanced(&with_zip).unwrap().radius, Some(10));

    let without_zip = AdvancedSearchForm {
        radius: Some(10),
        ..Default::default()
    };
    assert_eq!(
        build_advanced(&without_zip).unwrap().to_json().unwrap(),
        json!({"page": 1})
    );
}

#[test]
fn advanced_trims_and_uses_wire_names() {
    let form = AdvancedSearchForm {
        status: "Found".to_string(),
        keyword: " phone ".to_string(),
        category: "Electronics".to_string(),
        sub_category: " Mobile ".to_string(),
        country: "UK".to_string(),
        state: "".to_string(),
        city: "Leeds".to_string(),
        zipcode: "".to_string(),
        radius: None,
    };
    let params = build_advanced(&form).unwrap();
    assert_eq!(
        params.to_json().unwrap(),
        json!({
            "status": "Found",
            "keyword": "phone",
            "category": "Electronics",
            "subCategory": "Mobile",
            "country": "UK",
            "city": "Leeds",
            "page": 1
        })
    );
}

#[test]
fn advanced_rejects_unknown_status() {
    let form = AdvancedSearchForm {
        status: "Stolen".to_string(),
        ..Default::default()
    };
    assert!(matches!(
        build_advanced(&form).unwrap_err(),
        LostFoundError::InvalidArgument(_)
    ));
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

#[test]
fn builder_ignores_blank_setters_and_clamps_page() {
    let params = SearchParamsBuilder::new()
        .keyword("bag")
        .keyword("  ")
        .status(Status::Lost)
        .page(0)
        .build();
    assert!(params.keyword.is_none());
    assert_eq!(params.status, Some(Status::Lost));
    assert_eq!(params.page, 1);
}
