//! Tests for delay-ordered scheduling. Time is virtual throughout.

use std::time::Duration;

use tokio::time::Instant;

use super::support::{TestDocument, capturing_hooks};
use crate::client::{engine::DecodedFragment, scheduler::FragmentScheduler};

fn labelled(label: &str, delay_millis: u64) -> DecodedFragment {
    DecodedFragment {
        selector: None,
        position: None,
        delay_millis,
        content_type: "text/html".to_owned(),
        body: label.to_owned(),
    }
}

fn applied_labels(document: &TestDocument) -> Vec<String> {
    document
        .operations
        .iter()
        .map(|op| {
            op.trim_start_matches("replace_document(")
                .trim_end_matches(')')
                .to_owned()
        })
        .collect()
}

#[tokio::test(start_paused = true)]
async fn zero_delay_fragments_keep_envelope_order() {
    let mut document = TestDocument::new();
    let (mut hooks, _) = capturing_hooks();
    let batch = vec![labelled("A", 0), labelled("B", 0), labelled("C", 0)];

    FragmentScheduler::new().run(batch, &mut document, &mut hooks).await;

    assert_eq!(applied_labels(&document), ["A", "B", "C"]);
}

#[tokio::test(start_paused = true)]
async fn delayed_fragments_run_after_immediate_ones_in_delay_order() {
    let mut document = TestDocument::new();
    let (mut hooks, _) = capturing_hooks();
    // Envelope order deliberately interleaves delayed and immediate parts.
    let batch = vec![
        labelled("A", 0),
        labelled("C", 40),
        labelled("B", 20),
        labelled("D", 0),
    ];

    let start = Instant::now();
    FragmentScheduler::new().run(batch, &mut document, &mut hooks).await;

    assert_eq!(applied_labels(&document), ["A", "D", "B", "C"]);
    assert_eq!(start.elapsed(), Duration::from_millis(40));
}

#[tokio::test(start_paused = true)]
async fn immediate_fragments_run_first_then_equal_delays_keep_envelope_order() {
    let mut document = TestDocument::new();
    let (mut hooks, _) = capturing_hooks();
    let batch = vec![
        labelled("A", 0),
        labelled("B", 500),
        labelled("C", 0),
        labelled("D", 500),
    ];

    FragmentScheduler::new().run(batch, &mut document, &mut hooks).await;

    assert_eq!(applied_labels(&document), ["A", "C", "B", "D"]);
}

#[tokio::test(start_paused = true)]
async fn equal_delays_preserve_envelope_order() {
    let mut document = TestDocument::new();
    let (mut hooks, _) = capturing_hooks();
    let batch = vec![labelled("A", 30), labelled("B", 30), labelled("C", 30)];

    FragmentScheduler::new().run(batch, &mut document, &mut hooks).await;

    assert_eq!(applied_labels(&document), ["A", "B", "C"]);
}

#[tokio::test(start_paused = true)]
async fn delays_are_measured_from_batch_start_not_cumulatively() {
    let mut document = TestDocument::new();
    let (mut hooks, _) = capturing_hooks();
    let batch = vec![labelled("A", 25), labelled("B", 50)];

    let start = Instant::now();
    FragmentScheduler::new().run(batch, &mut document, &mut hooks).await;

    // 25 + 50 cumulative would be 75; both delays share one origin.
    assert_eq!(start.elapsed(), Duration::from_millis(50));
    assert_eq!(applied_labels(&document), ["A", "B"]);
}
