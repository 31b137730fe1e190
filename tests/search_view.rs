mod common;

use common::{add_book_page, app, book, by_id, yield_now, Gated, Scripted};
use futures::executor::block_on;
use serde_json::json;
use shelfnote::dom::{Element, SubmitEvent};
use shelfnote::http::{HttpJsonClient, HttpReply};
use shelfnote::ui::{BOOK_CARD, NO_RESULTS};
use shelfnote::{Event, SearchSource};

const SEARCH: Event = Event::SubmitSearch {
    source: SearchSource::Remote,
};

#[test]
fn search_renders_one_card_per_result() {
    let dom = add_book_page();
    let transport = Scripted::new();
    transport.reply_json(json!({
        "success": true,
        "data": {"results": [book("Dune", "/works/OL1W"), book("Emma", "/works/OL2W")]}
    }));
    let app = app(&dom, transport.clone());

    let actions = block_on(app.handle_event(&SEARCH)).unwrap();
    assert!(actions.is_empty());

    let results = by_id(&dom, "results");
    dom.read(|doc| {
        let cards = doc.children(results);
        assert_eq!(cards.len(), 2);
        assert!(cards.iter().all(|&c| doc.has_class(c, BOOK_CARD)));
        assert!(doc.text_content(cards[0]).contains("Dune"));
        assert!(doc.text_content(cards[0]).contains("Pages: 412"));
    });

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "POST");
    assert_eq!(requests[0].url, "/api/search-books");
    assert_eq!(requests[0].payload.get("q"), Some("dune"));
}

#[test]
fn failed_search_shows_message_and_field_errors() {
    let dom = add_book_page();
    let transport = Scripted::new();
    transport.reply_json(json!({
        "success": false,
        "message": "Invalid search.",
        "errors": {"q": ["too short", "must be letters"], "csrf_token": "missing"}
    }));
    let app = app(&dom, transport);

    block_on(app.handle_event(&SEARCH)).unwrap();

    let results = by_id(&dom, "results");
    dom.read(|doc| {
        assert!(doc.children(results).is_empty());
        assert_eq!(
            doc.text_content(results),
            "Invalid search. csrf_token: missing, q: too short, must be letters"
        );
    });
}

#[test]
fn empty_search_says_no_results() {
    let dom = add_book_page();
    let transport = Scripted::new();
    transport.reply_json(json!({"success": true, "data": {"results": []}}));
    let app = app(&dom, transport);

    block_on(app.handle_event(&SEARCH)).unwrap();

    let results = by_id(&dom, "results");
    dom.read(|doc| {
        assert!(doc.children(results).is_empty());
        assert_eq!(doc.text_content(results), NO_RESULTS);
    });
}

#[test]
fn http_error_is_reported_and_loader_hidden() {
    let dom = add_book_page();
    let transport = Scripted::new();
    transport.reply(HttpReply::new(500, "<html>oops</html>"));
    let app = app(&dom, transport);

    block_on(app.handle_event(&SEARCH)).unwrap();

    let results = by_id(&dom, "results");
    let loader = by_id(&dom, "global-loader");
    dom.read(|doc| {
        assert_eq!(
            doc.text_content(results),
            "Error posting form data to: /api/search-books - HTTP error: 500"
        );
        assert!(doc.is_hidden(loader));
    });
}

#[test]
fn submit_suppresses_navigation_and_hides_loader_after_transport_failure() {
    let dom = add_book_page();
    let transport = Scripted::new();
    transport.fail("connection reset");
    let controller =
        shelfnote::app::SubmissionController::new(dom.clone(), HttpJsonClient::new(transport));
    let sequencer = shelfnote::app::RequestSequencer::new();
    let form = by_id(&dom, "search-form");
    let loader = by_id(&dom, "global-loader");

    let mut event = SubmitEvent::new(form);
    let submission = block_on(controller.submit::<serde_json::Value>(
        &mut event,
        "/api/search-books",
        Some(loader),
        &sequencer,
    ));

    assert!(event.default_prevented());
    assert!(!submission.envelope.is_success());
    assert!(dom.read(|doc| doc.is_hidden(loader)));
}

#[test]
fn local_search_renders_catalog_cards() {
    let dom = add_book_page();
    let transport = Scripted::new();
    transport.reply_json(json!({
        "success": "true",
        "data": {"results": [{"id": 7, "title": "Dune", "author_display": "Frank Herbert"}]}
    }));
    let app = app(&dom, transport);

    block_on(app.handle_event(&Event::SubmitSearch {
        source: SearchSource::Local,
    }))
    .unwrap();

    let results = by_id(&dom, "results");
    dom.read(|doc| {
        let card = doc.children(results)[0];
        assert!(doc.query_class(card, "select-book-btn").is_none());
        let link = doc
            .descendants(card)
            .into_iter()
            .find(|&n| doc.attr(n, "href") == Some("/book/7"));
        assert!(link.is_some());
    });
}

#[test]
fn provider_change_redirects_next_search() {
    let dom = add_book_page();
    let transport = Scripted::new();
    transport.reply_json(json!({"success": true, "data": {"results": []}}));
    let app = app(&dom, transport.clone());

    block_on(app.handle_event(&Event::ChangeSearchProvider {
        action: "/api/search-google".to_string(),
    }))
    .unwrap();
    block_on(app.handle_event(&SEARCH)).unwrap();

    assert_eq!(transport.requests()[0].url, "/api/search-google");
}

#[test]
fn stale_search_response_is_discarded() {
    let dom = add_book_page();
    let transport = Gated::new();
    let app = app(&dom, transport.clone());

    let older = app.handle_event(&SEARCH);
    let newer = app.handle_event(&SEARCH);
    let driver = async {
        assert_eq!(transport.pending(), 2);
        transport.release(
            1,
            json!({"success": true, "data": {"results": [book("Newer", "/works/OL2W")]}}),
        );
        yield_now().await;
        transport.release(
            0,
            json!({"success": true, "data": {"results": [book("Older", "/works/OL1W")]}}),
        );
    };

    let (older, newer, ()) = block_on(async { futures::join!(older, newer, driver) });
    older.unwrap();
    newer.unwrap();

    let results = by_id(&dom, "results");
    dom.read(|doc| {
        let text = doc.text_content(results);
        assert!(text.contains("Newer"));
        assert!(!text.contains("Older"));
    });
}

#[test]
fn select_then_back_restores_exact_position() {
    let dom = add_book_page();
    let transport = Scripted::new();
    transport.reply_json(json!({
        "success": true,
        "data": {"results": [
            book("A", "/works/OL1W"),
            book("B", "/works/OL2W"),
            book("C", "/works/OL3W")
        ]}
    }));
    let app = app(&dom, transport);
    block_on(app.handle_event(&SEARCH)).unwrap();

    let results = by_id(&dom, "results");
    let cards = dom.read(|doc| doc.children(results).to_vec());

    block_on(app.handle_event(&Event::SelectCard { card: cards[1] })).unwrap();

    let container = by_id(&dom, "review-card-container");
    let hidden_id = by_id(&dom, "openlib-id-hidden");
    dom.read(|doc| {
        assert_eq!(doc.children(container), &[cards[1]]);
        assert_eq!(doc.value(hidden_id), "/works/OL2W");
        assert!(doc.is_hidden(by_id_in(doc, "search")));
        assert!(!doc.is_hidden(by_id_in(doc, "review-form")));
    });

    // unrelated cards rendered elsewhere while reviewing
    dom.write(|doc| {
        let elsewhere = doc.mount(doc.body(), &Element::new("div")).unwrap();
        doc.mount(elsewhere, &Element::new("div").class(BOOK_CARD)).unwrap();
    });

    block_on(app.handle_event(&Event::Back)).unwrap();

    dom.read(|doc| {
        assert_eq!(doc.children(results), cards.as_slice());
        assert!(doc.children(container).is_empty());
        assert!(!doc.is_hidden(by_id_in(doc, "search")));
        assert!(!doc.is_hidden(results));
        assert!(doc.is_hidden(by_id_in(doc, "review-form")));
    });
}

#[test]
fn back_without_selection_leaves_structure_alone() {
    let dom = add_book_page();
    let app = app(&dom, Scripted::new());
    let before = dom.read(|doc| doc.descendants(doc.body()));

    block_on(app.handle_event(&Event::Back)).unwrap();

    let after = dom.read(|doc| doc.descendants(doc.body()));
    assert_eq!(before, after);
    dom.read(|doc| assert!(doc.is_hidden(by_id_in(doc, "review-form"))));
}

fn by_id_in(doc: &shelfnote::dom::Document, id: &str) -> shelfnote::dom::NodeId {
    doc.get_element_by_id(id).unwrap()
}
