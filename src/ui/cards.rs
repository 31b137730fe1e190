//! Card builders.
//!
//! Pure data → fragment functions for every card the client renders. None of them
//! touches a document; controllers mount the returned [`Element`] where it belongs.

use crate::dom::Element;
use crate::domain::{openlib_link, BookResult, LinkOut, ReviewFeedItem, SubmissionReceipt};

/// Class of a search result card.
pub const BOOK_CARD: &str = "book-card";

/// Class of the "select" button on a search result card.
pub const SELECT_BUTTON: &str = "select-book-btn";

/// Class of the hidden element holding a card's OpenLibrary work key.
pub const OPENLIB_ID: &str = "openlib_id";

/// Class of a review feed article.
pub const REVIEW_ARTICLE: &str = "compact-book-review-container";

/// Added to a review article while its full text is shown.
pub const REVIEW_ARTICLE_EXPANDED: &str = "compact-book-review-container-expanded";

/// Class of the element holding review text.
pub const REVIEW_CONTENT: &str = "review-content";

/// Added to review text while it is expanded.
pub const REVIEW_CONTENT_EXPANDED: &str = "review-content-expanded";

/// Class of the expand/collapse button on long reviews.
pub const EXPAND_BUTTON: &str = "expand-btn";

/// Label of the expand button while the review is collapsed.
pub const EXPAND_LABEL: &str = "Expand review";

/// Label of the expand button while the review is expanded.
pub const HIDE_LABEL: &str = "Hide review";

/// Reviews longer than this many characters render collapsed.
pub const SNIPPET_LIMIT: usize = 150;

/// Card for a remote search result, with a "Select" button.
#[must_use]
pub fn book_card(book: &BookResult) -> Element {
    let work_key = book.openlib_work_key.clone().unwrap_or_default();

    let meta = Element::new("div")
        .class("book-meta")
        .child(Element::new("h3").text(&book.title))
        .child(author(&book.author_names))
        .child(published(book))
        .maybe_child(pages(book))
        .maybe_child(book.openlib_url().map(|url| openlib_anchor(&url)))
        .child(Element::new("div").class("hidden").class(OPENLIB_ID).text(work_key))
        .child(Element::new("button").class(SELECT_BUTTON).text("Select"));

    Element::new("div")
        .class(BOOK_CARD)
        .maybe_child(book.cover_url().map(|url| cover(&url)))
        .child(meta)
}

/// Card for a result from the site's own catalog, linking to the book page.
#[must_use]
pub fn local_book_card(book: &BookResult) -> Element {
    let page = book_page(book);

    Element::new("div")
        .class(BOOK_CARD)
        .class("local-book-card")
        .maybe_child(book.cover_url().map(|url| linked_cover(&url, page.as_deref())))
        .child(catalog_meta(book, page.as_deref()))
}

/// Article for one entry of the review feed.
///
/// Reviews longer than [`SNIPPET_LIMIT`] characters render as a collapsed snippet
/// followed by an expand button.
#[must_use]
pub fn review_article(review: &ReviewFeedItem) -> Element {
    let page = book_page(&review.book);

    let wrapper = Element::new("div")
        .class("review-card-wrapper")
        .maybe_child(
            review
                .book
                .cover_url()
                .map(|url| linked_cover(&url, page.as_deref())),
        )
        .child(catalog_meta(&review.book, page.as_deref()));

    let header = Element::new("h4").class("review-header").child(
        Element::new("a")
            .attr("href", format!("/review/{}", review.id))
            .text("Review"),
    );

    let mut section = Element::new("section").class("review-section").child(header);
    if review.content.chars().count() > SNIPPET_LIMIT {
        section = section
            .child(
                Element::new("div")
                    .class(REVIEW_CONTENT)
                    .class("review-content-snippet")
                    .text(&review.content),
            )
            .child(Element::new("button").class(EXPAND_BUTTON).text(EXPAND_LABEL));
    } else {
        section = section.child(Element::new("div").class(REVIEW_CONTENT).text(&review.content));
    }

    let footer = Element::new("footer").class("book-review-footer").child(
        Element::new("small").text(format!("First added: {}", review.created_display())),
    );

    Element::new("article")
        .class(REVIEW_ARTICLE)
        .child(wrapper)
        .child(section)
        .child(footer)
}

/// Entry on the confirmation page for one stored receipt.
#[must_use]
pub fn submission_entry(receipt: &SubmissionReceipt) -> Element {
    Element::new("div")
        .class("submission-container")
        .child(Element::new("h3").text(format!("Submitted on {}", receipt.submitted_display())))
        .child(Element::new("p").text(&receipt.review))
        .child(openlib_anchor(&openlib_link(&receipt.openlib_id)))
}

fn book_page(book: &BookResult) -> Option<String> {
    book.id.as_ref().map(|id| format!("/book/{id}"))
}

fn catalog_meta(book: &BookResult, page: Option<&str>) -> Element {
    let title = match page {
        Some(href) => Element::new("h3").child(Element::new("a").attr("href", href).text(&book.title)),
        None => Element::new("h3").text(&book.title),
    };

    let authors = (!book.author_names.is_empty()).then(|| author(&book.author_names));
    let links = (!book.link_outs.is_empty()).then(|| link_outs(&book.link_outs));

    Element::new("div")
        .class("book-meta")
        .child(title)
        .maybe_child(authors)
        .child(published(book))
        .maybe_child(pages(book))
        .maybe_child(links)
}

fn cover(url: &str) -> Element {
    Element::new("div").class("img-wrapper").child(cover_img(url))
}

fn linked_cover(url: &str, page: Option<&str>) -> Element {
    match page {
        Some(href) => Element::new("div")
            .class("img-wrapper")
            .child(Element::new("a").attr("href", href).child(cover_img(url))),
        None => cover(url),
    }
}

fn cover_img(url: &str) -> Element {
    Element::new("img")
        .attr("src", url)
        .attr("alt", "book cover")
        .attr("loading", "lazy")
}

fn author(names: &str) -> Element {
    Element::new("p").text(format!("by {names}"))
}

fn published(book: &BookResult) -> Element {
    let year = book
        .first_publish_year
        .map(|y| y.to_string())
        .unwrap_or_default();
    Element::new("p").text(format!("Published: {year}"))
}

fn pages(book: &BookResult) -> Option<Element> {
    book.number_of_pages
        .filter(|&n| n != 0)
        .map(|n| Element::new("p").text(format!("Pages: {n}")))
}

fn openlib_anchor(url: &str) -> Element {
    Element::new("p").child(
        Element::new("a")
            .attr("href", url)
            .attr("target", "_blank")
            .text("OpenLibrary"),
    )
}

fn link_outs(links: &[LinkOut]) -> Element {
    links.iter().fold(Element::new("ul").class("link-outs"), |list, link| {
        list.child(
            Element::new("li").child(
                Element::new("a")
                    .attr("href", link.url())
                    .attr("target", "_blank")
                    .text(link.label()),
            ),
        )
    })
}
