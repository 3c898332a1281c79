//! Multi-key prioritization engine.

use std::cmp::Ordering;
use std::sync::Arc;

use crate::coercion::{CoercionRegistry, CoercionSnapshot};
use crate::error::Result;
use crate::priority::{Priority, Score};
use crate::value::Prioritizable;

/// Comparison vectors for one prioritization call.
///
/// Holds one vector per object (indexed by position, which is the object's
/// identity within the call) with one directional value per priority. Each
/// vector is computed exactly once and dropped with the call. All values are
/// coerced through one snapshot of the registry taken when the call starts.
struct ComparisonKeys {
    keys: Vec<Vec<Score>>,
}

impl ComparisonKeys {
    fn compute<T>(items: &[T], priorities: &[Priority], registry: &CoercionRegistry) -> Result<Self>
    where
        T: Prioritizable,
    {
        let coercions: CoercionSnapshot = registry.snapshot();
        let keys = items
            .iter()
            .map(|item| {
                priorities
                    .iter()
                    .map(|priority| priority.comparable_value_from(item, &coercions))
                    .collect::<Result<Vec<Score>>>()
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { keys })
    }

    /// Lexicographic comparison, first priority most significant.
    fn compare(&self, a: usize, b: usize) -> Ordering {
        self.keys[a]
            .iter()
            .zip(&self.keys[b])
            .map(|(va, vb)| va.cmp(vb))
            .find(|ord| ord.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

/// A borrowed collection that can be ordered by a priority list.
///
/// Objects are ordered greatest comparison vector first. The sort is
/// stable: objects whose vectors are equal keep their input order.
///
/// # Examples
///
/// ```ignore
/// let priorities = PriorityBuilder::build_all(&["like_count".into(), "is_sponsored".into()])?;
/// let ordered = Collection::new(&posts).prioritize_by(&priorities)?;
/// ```
pub struct Collection<'a, T> {
    items: &'a [T],
    registry: Arc<CoercionRegistry>,
}

impl<'a, T: Prioritizable> Collection<'a, T> {
    /// Wraps `items`, converting values through the global registry.
    pub fn new(items: &'a [T]) -> Self {
        Self {
            items,
            registry: Arc::clone(CoercionRegistry::global()),
        }
    }

    /// Sets the registry used to convert non-numeric values.
    pub fn with_registry(mut self, registry: Arc<CoercionRegistry>) -> Self {
        self.registry = registry;
        self
    }

    /// Number of objects in the collection.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the collection holds no objects.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Orders the collection by `priorities`.
    ///
    /// Returns indices into the original slice, highest priority first.
    ///
    /// # Errors
    ///
    /// Propagates the first failure raised while computing a comparable
    /// value (missing attribute, non-numeric value).
    pub fn prioritized_indices(&self, priorities: &[Priority]) -> Result<Vec<usize>> {
        let keys = ComparisonKeys::compute(self.items, priorities, &self.registry)?;

        let mut indices: Vec<usize> = (0..self.items.len()).collect();
        indices.sort_by(|&a, &b| keys.compare(b, a));

        log::trace!(
            "prioritized {} objects by {} priorities",
            indices.len(),
            priorities.len()
        );
        Ok(indices)
    }

    /// Orders the collection and returns references in priority order.
    pub fn prioritize_by(&self, priorities: &[Priority]) -> Result<Vec<&'a T>> {
        let items = self.items;
        Ok(self
            .prioritized_indices(priorities)?
            .into_iter()
            .map(|i| &items[i])
            .collect())
    }

    /// Returns the highest-priority object, or `None` for an empty collection.
    ///
    /// Among equal objects the earliest one wins.
    pub fn highest(&self, priorities: &[Priority]) -> Result<Option<&'a T>> {
        let items = self.items;
        let keys = ComparisonKeys::compute(items, priorities, &self.registry)?;
        let best = (0..items.len()).reduce(|best, i| {
            if keys.compare(i, best) == Ordering::Greater {
                i
            } else {
                best
            }
        });
        Ok(best.map(|i| &items[i]))
    }
}
