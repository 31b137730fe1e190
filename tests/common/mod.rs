#![allow(dead_code)]

use futures::channel::oneshot;
use futures::future::LocalBoxFuture;
use futures::FutureExt;
use serde_json::Value;
use shelfnote::dom::{Document, Dom, Element, FormPayload, NodeId, HIDDEN};
use shelfnote::http::{HttpReply, Transport};
use shelfnote::storage::{MemoryStore, SubmissionCache, SUBMISSIONS_KEY};
use shelfnote::{App, ClientError, Config, Result};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::rc::Rc;

/// One request seen by a test transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: &'static str,
    pub url: String,
    pub payload: FormPayload,
}

/// Transport answering from a queue of prepared replies.
#[derive(Default)]
pub struct Scripted {
    replies: RefCell<VecDeque<std::result::Result<HttpReply, String>>>,
    requests: RefCell<Vec<Request>>,
}

impl Scripted {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn reply_json(&self, body: Value) {
        self.replies.borrow_mut().push_back(Ok(HttpReply::ok(body.to_string())));
    }

    pub fn reply(&self, reply: HttpReply) {
        self.replies.borrow_mut().push_back(Ok(reply));
    }

    pub fn fail(&self, cause: &str) {
        self.replies.borrow_mut().push_back(Err(cause.to_string()));
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests.borrow().clone()
    }

    fn answer(&self, request: Request) -> LocalBoxFuture<'_, Result<HttpReply>> {
        self.requests.borrow_mut().push(request);
        let reply = self
            .replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err("no scripted reply".to_string()))
            .map_err(ClientError::Transport);
        async move { reply }.boxed_local()
    }
}

impl Transport for Scripted {
    fn post_form<'a>(
        &'a self,
        url: &'a str,
        payload: &'a FormPayload,
    ) -> LocalBoxFuture<'a, Result<HttpReply>> {
        self.answer(Request {
            method: "POST",
            url: url.to_string(),
            payload: payload.clone(),
        })
    }

    fn get<'a>(&'a self, url: &'a str) -> LocalBoxFuture<'a, Result<HttpReply>> {
        self.answer(Request {
            method: "GET",
            url: url.to_string(),
            payload: FormPayload::default(),
        })
    }
}

/// Transport whose requests stay pending until the test releases them, in any order.
#[derive(Default)]
pub struct Gated {
    senders: RefCell<Vec<Option<oneshot::Sender<HttpReply>>>>,
}

impl Gated {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn pending(&self) -> usize {
        self.senders.borrow().iter().filter(|s| s.is_some()).count()
    }

    /// Completes the `index`-th request (in issue order) with a JSON body.
    pub fn release(&self, index: usize, body: Value) {
        let sender = self.senders.borrow_mut()[index]
            .take()
            .expect("request already released");
        sender
            .send(HttpReply::ok(body.to_string()))
            .expect("request future dropped");
    }

    fn park(&self) -> LocalBoxFuture<'static, Result<HttpReply>> {
        let (tx, rx) = oneshot::channel();
        self.senders.borrow_mut().push(Some(tx));
        async move {
            rx.await
                .map_err(|_| ClientError::Transport("request abandoned".to_string()))
        }
        .boxed_local()
    }
}

impl Transport for Gated {
    fn post_form<'a>(
        &'a self,
        _url: &'a str,
        _payload: &'a FormPayload,
    ) -> LocalBoxFuture<'a, Result<HttpReply>> {
        self.park()
    }

    fn get<'a>(&'a self, _url: &'a str) -> LocalBoxFuture<'a, Result<HttpReply>> {
        self.park()
    }
}

/// Gives every other future in a `join!` one chance to run.
pub async fn yield_now() {
    YieldNow(false).await;
}

struct YieldNow(bool);

impl Future for YieldNow {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.0 {
            return Poll::Ready(());
        }
        self.0 = true;
        cx.waker().wake_by_ref();
        Poll::Pending
    }
}

pub fn memory_cache() -> SubmissionCache {
    SubmissionCache::new(Some(Box::new(MemoryStore::new())), SUBMISSIONS_KEY)
}

pub fn app(dom: &Dom, transport: Rc<dyn Transport>) -> App {
    App::new(Config::default(), dom.clone(), transport, memory_cache())
}

pub fn by_id(dom: &Dom, id: &str) -> NodeId {
    dom.read(|doc| doc.get_element_by_id(id))
        .unwrap_or_else(|| panic!("no element #{id}"))
}

fn csrf_field() -> Element {
    Element::new("input")
        .attr("type", "hidden")
        .attr("name", "csrf_token")
        .class("csrf-token")
}

fn loader() -> Element {
    Element::new("div").attr("id", "global-loader").class(HIDDEN)
}

/// The add-book page: search form, results, and the hidden review form.
pub fn add_book_page() -> Dom {
    let mut doc = Document::new();
    let body = doc.body();

    let search = Element::new("div").attr("id", "search").child(
        Element::new("form")
            .attr("id", "search-form")
            .attr("action", "/api/search-books")
            .child(Element::new("input").attr("name", "q").value("dune"))
            .child(csrf_field()),
    );
    let review_form = Element::new("div")
        .attr("id", "review-form")
        .class(HIDDEN)
        .child(Element::new("div").attr("id", "review-card-container"))
        .child(
            Element::new("form")
                .attr("id", "submit-form")
                .child(
                    Element::new("input")
                        .attr("id", "openlib-id-hidden")
                        .attr("type", "hidden")
                        .attr("name", "openlib_id_hidden"),
                )
                .child(Element::new("textarea").attr("name", "review"))
                .child(csrf_field()),
        )
        .child(Element::new("span").attr("id", "text-counter"))
        .child(Element::new("div").attr("id", "review-form-errors"));

    for element in [
        loader(),
        search,
        Element::new("div").attr("id", "results"),
        review_form,
    ] {
        doc.mount(body, &element).expect("mount fixture");
    }
    Dom::new(doc)
}

/// The home page with a review feed already showing `existing` articles.
pub fn feed_page(existing: &[&str]) -> Dom {
    let mut doc = Document::new();
    let body = doc.body();

    let feed = existing.iter().fold(
        Element::new("div").attr("id", "review-bookshelves"),
        |feed, id| {
            feed.child(
                Element::new("article")
                    .class("compact-book-review-container")
                    .attr("data-review", *id),
            )
        },
    );
    let form = Element::new("form")
        .attr("id", "fetch-reviews-form")
        .child(
            Element::new("input")
                .attr("id", "cursor")
                .attr("name", "cursor")
                .value("c1"),
        )
        .child(
            Element::new("input")
                .attr("id", "review-id")
                .attr("name", "review_id")
                .value("r2"),
        )
        .child(csrf_field());

    for element in [
        loader(),
        feed,
        form,
        Element::new("div").attr("id", "fetch-form-errors"),
    ] {
        doc.mount(body, &element).expect("mount fixture");
    }
    Dom::new(doc)
}

/// The confirmation page listing stored receipts.
pub fn confirmation_page() -> Dom {
    let mut doc = Document::new();
    let body = doc.body();
    doc.mount(body, &Element::new("div").attr("id", "submissions-container"))
        .expect("mount fixture");
    doc.mount(body, &Element::new("button").attr("id", "clear-submissions"))
        .expect("mount fixture");
    Dom::new(doc)
}

pub fn book(title: &str, work_key: &str) -> Value {
    serde_json::json!({
        "cover_id": 12345,
        "title": title,
        "author_names": ["Frank Herbert"],
        "first_publish_year": 1965,
        "number_of_pages_median": 412,
        "openlib_work_key": work_key,
    })
}

pub fn feed_item(id: &str) -> Value {
    serde_json::json!({
        "id": id,
        "content": format!("review {id}"),
        "created_at": "2024-03-01T12:30:00",
        "book": {"id": 7, "title": "Dune", "author_display": "Frank Herbert"},
    })
}
