//! Search execution tests against a scripted transport.

mod common;

use lostfound_client::config;
use lostfound_client::query::{AdvancedSearchForm, QuickSearchType, SearchParams};
use lostfound_client::LostFoundError;
use serde_json::json;

use common::{anonymous_client, results_body, signed_in_client, ScriptedTransport};

// ---------------------------------------------------------------------------
// execute
// ---------------------------------------------------------------------------

#[test]
fn quick_search_posts_params_with_bearer() {
    let transport = ScriptedTransport::new();
    transport.reply_json(200, results_body(3, 1, 4));
    let client = signed_in_client(&transport);

    let page = client
        .search()
        .quick_search("wallet", QuickSearchType::Lost)
        .unwrap();

    assert_eq!(page.items.len(), 3);
    assert_eq!(page.total_pages, 4);
    assert_eq!(page.items[0].detail_path(), "/item/item-0");

    let sent = transport.last_sent().unwrap();
    assert_eq!(sent.path, config::SEARCH_PATH);
    assert_eq!(sent.bearer.as_deref(), Some("test-token"));
    assert_eq!(
        sent.body,
        json!({"keyword": "wallet", "status": "Lost", "page": 1})
    );
    assert_eq!(client.search().results(), page);
}

#[test]
fn missing_fields_default_to_empty_first_page() {
    let transport = ScriptedTransport::new();
    transport.reply_json(200, json!({"status": "success"}));
    let client = signed_in_client(&transport);

    let page = client.search().execute(SearchParams::match_all()).unwrap();

    assert!(page.items.is_empty());
    assert_eq!(page.page, 1);
    assert_eq!(page.total_pages, 1);
}

#[test]
fn unauthorized_keeps_previous_results() {
    let transport = ScriptedTransport::new();
    transport
        .reply_json(200, results_body(2, 1, 3))
        .reply_json(401, json!({"status": "error", "message": "Authentication failed"}));
    let client = signed_in_client(&transport);

    let first = client.search().execute(SearchParams::match_all()).unwrap();
    let err = client
        .search()
        .quick_search("phone", QuickSearchType::Any)
        .unwrap_err();

    assert!(err.is_login_required());
    assert_eq!(client.search().results(), first);
    assert_eq!(client.search().params(), Some(SearchParams::match_all()));
}

#[test]
fn server_error_is_search_failure() {
    let transport = ScriptedTransport::new();
    transport.reply_raw(500, "boom");
    let client = signed_in_client(&transport);

    let err = client.search().execute(SearchParams::match_all()).unwrap_err();
    assert!(matches!(err, LostFoundError::SearchFailed { status: 500 }));
    assert!(client.search().params().is_none());
}

#[test]
fn malformed_body_leaves_state_intact() {
    let transport = ScriptedTransport::new();
    transport.reply_raw(200, "<html>");
    let client = signed_in_client(&transport);

    let err = client.search().execute(SearchParams::match_all()).unwrap_err();
    assert!(matches!(err, LostFoundError::Json(_)));
    assert!(client.search().results().items.is_empty());
}

#[test]
fn transport_failure_propagates() {
    let transport = ScriptedTransport::new();
    transport.fail();
    let client = signed_in_client(&transport);

    assert!(client.search().execute(SearchParams::match_all()).is_err());
    assert!(client.search().params().is_none());
}

// ---------------------------------------------------------------------------
// session gate
// ---------------------------------------------------------------------------

#[test]
fn searches_without_session_never_hit_network() {
    let transport = ScriptedTransport::new();
    let client = anonymous_client(&transport);

    let quick = client
        .search()
        .quick_search("wallet", QuickSearchType::Any)
        .unwrap_err();
    let advanced = client
        .search()
        .advanced_search(&AdvancedSearchForm::default())
        .unwrap_err();

    assert!(quick.is_login_required());
    assert!(advanced.is_login_required());
    assert!(transport.sent().is_empty());
}

#[test]
fn gate_runs_before_keyword_validation() {
    let client = anonymous_client(&ScriptedTransport::new());
    let err = client
        .search()
        .quick_search("", QuickSearchType::Any)
        .unwrap_err();
    assert!(err.is_login_required());
}

#[test]
fn empty_keyword_is_validation_failure() {
    let transport = ScriptedTransport::new();
    let client = signed_in_client(&transport);

    let err = client
        .search()
        .quick_search("  ", QuickSearchType::Found)
        .unwrap_err();
    assert!(matches!(err, LostFoundError::Validation(_)));
    assert!(transport.sent().is_empty());
}

// ---------------------------------------------------------------------------
// pagination
// ---------------------------------------------------------------------------

#[test]
fn go_to_page_reissues_with_new_page() {
    let transport = ScriptedTransport::new();
    transport
        .reply_json(200, results_body(10, 1, 5))
        .reply_json(200, results_body(10, 3, 5));
    let client = signed_in_client(&transport);

    let form = AdvancedSearchForm {
        category: "Bags".to_string(),
        ..Default::default()
    };
    client.search().advanced_search(&form).unwrap();
    assert!(client.search().go_to_page(3).unwrap());

    let sent = transport.last_sent().unwrap();
    assert_eq!(sent.body, json!({"category": "Bags", "page": 3}));
    assert_eq!(client.search().results().page, 3);
    assert_eq!(client.search().pagination().current, 3);
}

#[test]
fn go_to_current_page_is_noop() {
    let transport = ScriptedTransport::new();
    transport.reply_json(200, results_body(10, 1, 5));
    let client = signed_in_client(&transport);
    client.search().execute(SearchParams::match_all()).unwrap();

    assert!(!client.search().go_to_page(1).unwrap());
    assert_eq!(transport.sent().len(), 1);
}

#[test]
fn go_to_page_out_of_range_is_rejected() {
    let transport = ScriptedTransport::new();
    transport.reply_json(200, results_body(10, 1, 5));
    let client = signed_in_client(&transport);
    client.search().execute(SearchParams::match_all()).unwrap();

    assert!(client.search().go_to_page(6).is_err());
    assert!(client.search().go_to_page(0).is_err());
    assert_eq!(transport.sent().len(), 1);
}

#[test]
fn go_to_page_without_search_is_rejected() {
    let client = signed_in_client(&ScriptedTransport::new());
    assert!(matches!(
        client.search().go_to_page(2).unwrap_err(),
        LostFoundError::InvalidArgument(_)
    ));
}

#[test]
fn failed_page_change_keeps_previous_page() {
    let transport = ScriptedTransport::new();
    transport
        .reply_json(200, results_body(10, 1, 5))
        .reply_raw(503, "");
    let client = signed_in_client(&transport);
    client.search().execute(SearchParams::match_all()).unwrap();

    assert!(client.search().go_to_page(2).is_err());
    assert_eq!(client.search().results().page, 1);
    assert_eq!(client.search().params().unwrap().page, 1);
}

// ---------------------------------------------------------------------------
// refine_keyword
// ---------------------------------------------------------------------------

#[test]
fn refine_keyword_replaces_keyword_only() {
    let transport = ScriptedTransport::new();
    transport
        .reply_json(200, results_body(1, 1, 1))
        .reply_json(200, results_body(1, 1, 1));
    let client = signed_in_client(&transport);
    client
        .search()
        .quick_search("wallet", QuickSearchType::NearMe)
        .unwrap();

    assert!(!client.search().refine_keyword("   ").unwrap());
    assert!(client.search().refine_keyword(" purse ").unwrap());

    let sent = transport.last_sent().unwrap();
    assert_eq!(
        sent.body,
        json!({"keyword": "purse", "near_me": true, "page": 1})
    );
    assert_eq!(transport.sent().len(), 2);
}

// ---------------------------------------------------------------------------
// response normalisation
// ---------------------------------------------------------------------------

#[test]
fn empty_search_reports_one_page() {
    let transport = ScriptedTransport::new();
    transport.reply_json(
        200,
        json!({
            "status": "success",
            "results": [],
            "page": 1,
            "total_pages": 0,
            "total_items": 0,
            "per_page": 10
        }),
    );
    let client = signed_in_client(&transport);

    let page = client.search().execute(SearchParams::match_all()).unwrap();

    assert_eq!(page.total_pages, 1);
    assert_eq!(client.search().results().total_pages, 1);
    assert!(client.search().pagination().links.is_empty());
}

#[test]
fn null_fields_read_as_defaults() {
    let transport = ScriptedTransport::new();
    transport.reply_json(
        200,
        json!({"results": null, "page": null, "total_pages": null}),
    );
    let client = signed_in_client(&transport);

    let page = client.search().execute(SearchParams::match_all()).unwrap();

    assert!(page.items.is_empty());
    assert_eq!(page.page, 1);
    assert_eq!(page.total_pages, 1);
}
