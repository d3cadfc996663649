//! Parallel identity scoring for ferro-align
//!
//! Identities of different features do not depend on each other, so the
//! comparisons can run on a rayon pool. Results are applied to the store
//! on the calling thread, giving the same store contents and counts as
//! [`IdentityScorer::score_all`]. Enable with the `parallel` feature.
//!
//! # Example
//!
//! ```no_run
//! # #[cfg(feature = "parallel")]
//! # fn main() {
//! use ferro_align::config::BlastMode;
//! use ferro_align::feature::FeatureStore;
//! use ferro_align::identity::{segment::ReferenceSequence, IdentityScorer};
//! use ferro_align::parallel::score_features_parallel;
//! use ferro_align::sequence::SequenceRegistry;
//!
//! let mut store = FeatureStore::new();
//! let registry = SequenceRegistry::new();
//! let reference = ReferenceSequence::from_start("ACGTACGT");
//!
//! let ids: Vec<_> = store.iter().map(|(id, _)| id).collect();
//! let mut scorer = IdentityScorer::new(BlastMode::BlastN);
//! score_features_parallel(&mut scorer, &mut store, &registry, &reference, &ids);
//! let report = scorer.finish();
//! # }
//! # #[cfg(not(feature = "parallel"))]
//! # fn main() {}
//! ```

use rayon::prelude::*;

use crate::error::AlignError;
use crate::feature::{FeatureId, FeatureStore};
use crate::identity::segment::ReferenceSequence;
use crate::identity::{IdentityScorer, ScoreOutcome};
use crate::sequence::SequenceRegistry;

/// Score `ids` in parallel and record the results through `scorer`
pub fn score_features_parallel(
    scorer: &mut IdentityScorer,
    store: &mut FeatureStore,
    registry: &SequenceRegistry,
    reference: &ReferenceSequence<'_>,
    ids: &[FeatureId],
) {
    let results: Vec<(FeatureId, Option<Result<ScoreOutcome, AlignError>>)> = {
        let shared: &IdentityScorer = scorer;
        let store: &FeatureStore = store;
        ids.par_iter()
            .map(|&id| (id, shared.evaluate(store, registry, reference, id)))
            .collect()
    };

    for (id, result) in results {
        scorer.record(store, id, result);
    }
}
