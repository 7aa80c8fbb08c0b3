//! Flattening of the `extends`/`uses` graph into a normalized specification.
//!
//! Resolution is a depth-first traversal with three-color marking, run
//! separately over calendars and modules. A node already merged is skipped,
//! which collapses diamonds; a node still in progress closes a cycle and is
//! reported as an error. Merge happens in post-order: parents, then modules,
//! then the node's own content.

mod merge;
mod traversal;

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::catalog::SpecCatalog;
use crate::error::SpecResult;
use crate::model::NormalizedSpecification;

use traversal::Traversal;

type Cache = HashMap<String, Arc<NormalizedSpecification>>;

/// Resolves calendar identifiers against a catalog, memoizing results.
///
/// The cache belongs to this instance. Lookups take a read lock; a resolved
/// specification is only published once complete, so concurrent callers
/// never observe a partial result.
#[derive(Debug)]
pub struct SpecificationResolver<C> {
    catalog: C,
    cache: RwLock<Cache>,
}

impl<C: SpecCatalog> SpecificationResolver<C> {
    #[must_use]
    pub fn new(catalog: C) -> Self {
        Self {
            catalog,
            cache: RwLock::new(HashMap::new()),
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// ## Summary
    /// Returns the normalized specification of calendar `id`.
    ///
    /// ## Errors
    /// - `UnknownCalendar` / `UnknownModule` for an identifier missing from
    ///   the catalog, anywhere in the graph.
    /// - `CircularDependency` when `extends` or `uses` loops back on itself.
    #[tracing::instrument(skip(self))]
    pub fn resolve(&self, id: &str) -> SpecResult<Arc<NormalizedSpecification>> {
        if let Some(cached) = self
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
        {
            tracing::trace!("Specification cache hit");
            return Ok(Arc::clone(cached));
        }

        let resolved = Arc::new(Traversal::new(&self.catalog).run(id)?);
        tracing::debug!(
            event_sources = resolved.event_sources.len(),
            deltas = resolved.deltas.len(),
            chain = ?resolved.resolution_chain,
            "Resolved specification"
        );

        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        let entry = cache.entry(id.to_string()).or_insert(resolved);
        Ok(Arc::clone(entry))
    }

    /// Forgets every memoized specification.
    pub fn clear_cache(&self) {
        self.cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Identifiers currently memoized, sorted.
    #[must_use]
    pub fn cached_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        ids.sort();
        ids
    }
}
