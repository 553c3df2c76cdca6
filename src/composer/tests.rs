//! Unit tests for composition, eligibility, and part packing.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use bytes::Bytes;

use super::{
    ComposedResponse,
    ContentProducer,
    FragmentComposer,
    NoExternalContent,
    is_fragment_capable,
    request_url,
};
use crate::{
    envelope::{Envelope, Headers, parse_outer_content_type},
    error::ComposeError,
    fragment::{ContentPosition, FragmentDescriptor},
};

/// Producer that counts invocations and returns a fixed body.
#[derive(Default)]
struct CountingProducer {
    calls: AtomicUsize,
}

#[async_trait]
impl ContentProducer for CountingProducer {
    async fn produce(&self, _descriptor: &FragmentDescriptor) -> Result<Bytes, ComposeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Bytes::from_static(b"\xEF\xBB\xBF<p>rendered</p>"))
    }
}

fn capable_request() -> Headers {
    let mut headers = Headers::new();
    headers.insert("X-Fragmented", "true");
    headers
}

fn decode(response: &ComposedResponse) -> Vec<crate::envelope::Part> {
    let (_, boundary) = parse_outer_content_type(response.content_type());
    Envelope::decode(&boundary.expect("boundary"), response.body()).expect("decode")
}

#[tokio::test]
async fn ineligible_request_fails_before_any_bytes_are_produced() {
    let producer = CountingProducer::default();
    let fragments = [FragmentDescriptor::markup().with_selector(".x")];
    let err = FragmentComposer::new()
        .compose(&Headers::new(), &fragments, &producer)
        .await
        .expect_err("must reject");
    assert!(matches!(err, ComposeError::IneligibleRequest));
    assert_eq!(producer.calls.load(Ordering::SeqCst), 0);
}

#[test]
fn explicit_false_opts_out_even_with_the_xhr_signal() {
    let mut headers = Headers::new();
    headers.insert("X-Fragmented", "FALSE");
    headers.insert("X-Requested-With", "XMLHttpRequest");
    assert!(!is_fragment_capable(&headers));
}

#[test]
fn xhr_indicator_alone_is_accepted_as_the_legacy_signal() {
    let mut headers = Headers::new();
    headers.insert("x-requested-with", "XMLHttpRequest");
    assert!(is_fragment_capable(&headers));
}

#[tokio::test]
async fn bodiless_positions_skip_the_producer_and_emit_empty_bodies() {
    let producer = CountingProducer::default();
    let fragments = [
        FragmentDescriptor::markup()
            .with_selector(".r1")
            .with_position(ContentPosition::RemoveElement)
            .with_text("<b>must never appear</b>"),
        FragmentDescriptor::markup()
            .with_selector(".r2")
            .with_position(ContentPosition::RemoveContent),
    ];
    let response = FragmentComposer::new()
        .compose(&capable_request(), &fragments, &producer)
        .await
        .expect("compose");

    let parts = decode(&response);
    assert_eq!(parts.len(), 2);
    assert!(parts.iter().all(|part| part.body.is_empty()));
    assert_eq!(
        parts[0].headers.get("X-Fragment-ContentPosition"),
        Some("RemoveElement")
    );
    assert_eq!(producer.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn empty_source_falls_back_to_the_producer_and_trims_the_bom() {
    let producer = CountingProducer::default();
    let fragments = [FragmentDescriptor::markup().with_selector(".x")];
    let response = FragmentComposer::new()
        .compose(&capable_request(), &fragments, &producer)
        .await
        .expect("compose");

    let parts = decode(&response);
    assert_eq!(parts[0].body.as_ref(), b"<p>rendered</p>");
    assert_eq!(producer.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn placement_metadata_round_trips_through_the_envelope() {
    let fragments = [
        FragmentDescriptor::markup()
            .with_selector(".x")
            .with_position(ContentPosition::BeforeElement)
            .with_text("<b>A</b>"),
        FragmentDescriptor::markup()
            .with_selector(".x")
            .with_position(ContentPosition::AfterElement)
            .with_delay(std::time::Duration::from_millis(500))
            .with_text("<b>B</b>"),
    ];
    let response = FragmentComposer::new()
        .compose(&capable_request(), &fragments, &NoExternalContent)
        .await
        .expect("compose");

    let parts = decode(&response);
    assert_eq!(parts.len(), 2);
    assert_eq!(
        parts[0].headers.get("X-Fragment-ContentPosition"),
        Some("BeforeElement")
    );
    assert!(parts[0].headers.get("X-Fragment-Delay").is_none());
    assert_eq!(parts[0].body.as_ref(), b"<b>A</b>");
    assert_eq!(parts[1].headers.get("X-Fragment-Selector"), Some(".x"));
    assert_eq!(parts[1].headers.get("X-Fragment-Delay"), Some("500"));
    assert_eq!(parts[1].body.as_ref(), b"<b>B</b>");
}

#[tokio::test]
async fn multiple_sources_fail_synchronously() {
    let fragments = [FragmentDescriptor::markup()
        .with_text("inline")
        .with_bytes(Bytes::from_static(b"bytes"))];
    let err = FragmentComposer::new()
        .compose(&capable_request(), &fragments, &NoExternalContent)
        .await
        .expect_err("must reject");
    assert!(matches!(err, ComposeError::MultipleContentSources));
}

#[tokio::test]
async fn no_source_and_no_external_content_reports_content_not_found() {
    let fragments = [FragmentDescriptor::markup().with_selector(".x")];
    let err = FragmentComposer::new()
        .compose(&capable_request(), &fragments, &NoExternalContent)
        .await
        .expect_err("must reject");
    assert!(matches!(err, ComposeError::ContentNotFound { .. }));
}

#[tokio::test]
async fn placement_headers_are_emitted_only_for_markup_parts() {
    let fragments = [
        FragmentDescriptor::script().with_text("console.log(1)"),
        FragmentDescriptor::opaque("text/css")
            .with_selector(".ignored")
            .with_text("body {}"),
    ];
    let response = FragmentComposer::new()
        .compose(&capable_request(), &fragments, &NoExternalContent)
        .await
        .expect("compose");

    let parts = decode(&response);
    assert_eq!(parts[0].headers.get("Content-Type"), Some("text/javascript"));
    assert!(parts[0].headers.get("X-Fragment-Selector").is_none());
    assert_eq!(parts[1].headers.get("Content-Type"), Some("text/css"));
    assert!(parts[1].headers.get("X-Fragment-Selector").is_none());
}

#[tokio::test]
async fn page_navigation_emits_the_url_header() {
    let response = FragmentComposer::new()
        .with_page_url("https://example.test/orders?page=2")
        .compose(&capable_request(), &[], &NoExternalContent)
        .await
        .expect("compose");

    assert_eq!(response.page_url(), Some("https://example.test/orders?page=2"));
    let headers = response.headers();
    assert_eq!(
        headers.get("X-Fragment-Url"),
        Some("https://example.test/orders?page=2")
    );
    assert_eq!(headers.get("Content-Type"), Some(response.content_type()));
}

#[tokio::test]
async fn write_to_copies_the_body_into_the_sink() {
    let fragments = [FragmentDescriptor::markup()
        .with_selector(".x")
        .with_text("<b>A</b>")];
    let response = FragmentComposer::new()
        .compose(&capable_request(), &fragments, &NoExternalContent)
        .await
        .expect("compose");

    let mut sink = Vec::new();
    response.write_to(&mut sink).await.expect("write");
    assert_eq!(sink.as_slice(), response.body().as_ref());
}

#[test]
fn request_url_joins_scheme_host_path_and_query() {
    assert_eq!(
        request_url("https", "example.test", "/orders", Some("page=2")),
        "https://example.test/orders?page=2"
    );
    assert_eq!(
        request_url("http", "localhost:8080", "/", None),
        "http://localhost:8080/"
    );
}
