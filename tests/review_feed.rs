mod common;

use common::{app, by_id, feed_item, feed_page, Scripted};
use futures::executor::block_on;
use serde_json::json;
use shelfnote::ui::{EXPAND_BUTTON, EXPAND_LABEL, HIDE_LABEL, REVIEW_ARTICLE, REVIEW_ARTICLE_EXPANDED};
use shelfnote::Event;

#[test]
fn load_more_appends_after_existing_reviews() {
    let dom = feed_page(&["r1", "r2"]);
    let transport = Scripted::new();
    transport.reply_json(json!({
        "success": true,
        "data": {
            "results": [feed_item("r3"), feed_item("r4")],
            "next_cursor": "c2",
            "next_review_id": 4
        }
    }));
    let app = app(&dom, transport.clone());

    block_on(app.handle_event(&Event::FetchMoreReviews)).unwrap();

    let feed = by_id(&dom, "review-bookshelves");
    let cursor = by_id(&dom, "cursor");
    let review_id = by_id(&dom, "review-id");
    dom.read(|doc| {
        let articles = doc.children(feed);
        assert_eq!(articles.len(), 4);
        assert_eq!(doc.attr(articles[0], "data-review"), Some("r1"));
        assert_eq!(doc.attr(articles[1], "data-review"), Some("r2"));
        assert!(doc.has_class(articles[2], REVIEW_ARTICLE));
        assert!(doc.text_content(articles[2]).contains("review r3"));
        assert!(doc.text_content(articles[3]).contains("review r4"));
        assert_eq!(doc.value(cursor), "c2");
        assert_eq!(doc.value(review_id), "4");
    });

    let requests = transport.requests();
    assert_eq!(requests[0].url, "/api/fetch-more-reviews");
    assert_eq!(requests[0].payload.get("cursor"), Some("c1"));
    assert_eq!(requests[0].payload.get("review_id"), Some("r2"));
}

#[test]
fn last_page_clears_the_cursor() {
    let dom = feed_page(&["r1"]);
    let transport = Scripted::new();
    transport.reply_json(json!({
        "success": true,
        "data": {"results": [feed_item("r2")], "next_cursor": null}
    }));
    let app = app(&dom, transport);

    block_on(app.handle_event(&Event::FetchMoreReviews)).unwrap();

    let cursor = by_id(&dom, "cursor");
    assert_eq!(dom.read(|doc| doc.value(cursor).to_string()), "");
}

#[test]
fn empty_page_reports_message_and_keeps_cursor() {
    let dom = feed_page(&["r1", "r2"]);
    let transport = Scripted::new();
    transport.reply_json(json!({
        "success": true,
        "message": "No more reviews.",
        "data": {"results": [], "next_cursor": null}
    }));
    let app = app(&dom, transport);

    block_on(app.handle_event(&Event::FetchMoreReviews)).unwrap();

    let feed = by_id(&dom, "review-bookshelves");
    let cursor = by_id(&dom, "cursor");
    let errors = by_id(&dom, "fetch-form-errors");
    dom.read(|doc| {
        assert_eq!(doc.children(feed).len(), 2);
        assert_eq!(doc.value(cursor), "c1");
        assert_eq!(doc.text_content(errors), "No more reviews.");
    });
}

#[test]
fn failed_page_leaves_feed_unchanged() {
    let dom = feed_page(&["r1", "r2"]);
    let transport = Scripted::new();
    transport.reply_json(json!({
        "success": false,
        "message": "Invalid cursor.",
        "errors": {"cursor": "expired"}
    }));
    let app = app(&dom, transport);

    block_on(app.handle_event(&Event::FetchMoreReviews)).unwrap();

    let feed = by_id(&dom, "review-bookshelves");
    let cursor = by_id(&dom, "cursor");
    let errors = by_id(&dom, "fetch-form-errors");
    let loader = by_id(&dom, "global-loader");
    dom.read(|doc| {
        assert_eq!(doc.children(feed).len(), 2);
        assert_eq!(doc.value(cursor), "c1");
        assert_eq!(doc.text_content(errors), "Invalid cursor. cursor: expired");
        assert!(doc.is_hidden(loader));
    });
}

#[test]
fn retry_after_failure_resends_same_cursor() {
    let dom = feed_page(&["r1"]);
    let transport = Scripted::new();
    transport.fail("timeout");
    transport.reply_json(json!({
        "success": true,
        "data": {"results": [feed_item("r2")], "next_cursor": "c2"}
    }));
    let app = app(&dom, transport.clone());

    block_on(app.handle_event(&Event::FetchMoreReviews)).unwrap();
    block_on(app.handle_event(&Event::FetchMoreReviews)).unwrap();

    let requests = transport.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].payload.get("cursor"), Some("c1"));
    assert_eq!(requests[1].payload.get("cursor"), Some("c1"));

    let errors = by_id(&dom, "fetch-form-errors");
    let feed = by_id(&dom, "review-bookshelves");
    dom.read(|doc| {
        assert_eq!(doc.children(feed).len(), 2);
        assert_eq!(doc.text_content(errors), "");
    });
}

#[test]
fn long_appended_review_toggles_through_events() {
    let dom = feed_page(&[]);
    let transport = Scripted::new();
    let mut item = feed_item("r1");
    item["content"] = json!("word ".repeat(60));
    transport.reply_json(json!({
        "success": true,
        "data": {"results": [item], "next_cursor": "c2"}
    }));
    let app = app(&dom, transport);
    block_on(app.handle_event(&Event::FetchMoreReviews)).unwrap();

    let feed = by_id(&dom, "review-bookshelves");
    let article = dom.read(|doc| doc.children(feed)[0]);
    let button = dom
        .read(|doc| doc.query_class(article, EXPAND_BUTTON))
        .expect("long review has an expand button");

    let toggle = Event::ToggleReviewExpansion { article };
    block_on(app.handle_event(&toggle)).unwrap();
    dom.read(|doc| {
        assert!(doc.has_class(article, REVIEW_ARTICLE_EXPANDED));
        assert_eq!(doc.text_content(button), HIDE_LABEL);
    });

    block_on(app.handle_event(&toggle)).unwrap();
    dom.read(|doc| {
        assert!(!doc.has_class(article, REVIEW_ARTICLE_EXPANDED));
        assert_eq!(doc.text_content(button), EXPAND_LABEL);
    });
}

#[test]
fn missing_feed_markup_is_an_error() {
    let dom = common::confirmation_page();
    let app = app(&dom, Scripted::new());
    assert!(block_on(app.handle_event(&Event::FetchMoreReviews)).is_err());
}
