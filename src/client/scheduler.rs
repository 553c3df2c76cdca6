//! Delay-ordered application of a decoded batch.

use std::time::Duration;

use tokio::time::{Instant, sleep_until};

use crate::client::{
    dom::Document,
    engine::{DecodedFragment, MutationEngine},
    hooks::FragmentHooks,
};

/// Applies a batch of fragments in delay order.
///
/// Zero-delay fragments run immediately in envelope order; delayed
/// fragments follow in increasing delay, measured from the moment the
/// batch was handed over. Equal delays keep envelope order: the sort is
/// stable and applications never run concurrently, so two fragments can
/// never interleave their document mutations. Dropping the returned
/// future cancels every application still pending.
#[derive(Clone, Copy, Debug, Default)]
pub struct FragmentScheduler;

impl FragmentScheduler {
    #[must_use]
    pub fn new() -> Self { Self }

    /// Apply `fragments` to `document`, honouring each declared delay.
    pub async fn run<D: Document>(
        self,
        mut fragments: Vec<DecodedFragment>,
        document: &mut D,
        hooks: &mut FragmentHooks,
    ) {
        let start = Instant::now();
        fragments.sort_by_key(|fragment| fragment.delay_millis);

        let mut engine = MutationEngine::new(document, hooks);
        for fragment in &fragments {
            if fragment.delay_millis > 0 {
                sleep_until(start + Duration::from_millis(fragment.delay_millis)).await;
            }
            engine.apply(fragment);
        }
    }
}
