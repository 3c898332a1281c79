//! Prioritization configuration and entry point.

use std::any::TypeId;
use std::collections::HashSet;
use std::sync::Arc;

use super::declared::DeclaredPriorities;
use crate::coercion::{CoercionRegistry, Conversion};
use crate::collection::Collection;
use crate::error::{PrioraError, Result};
use crate::priority::{Priority, PriorityBuilder, RawPriority};
use crate::value::{Prioritizable, ValueKind};

/// Configuration for prioritizing collections.
///
/// Bundles the coercion registry and the declared-priorities registry.
/// The default configuration shares the process-wide instances; tests and
/// embedders can supply isolated ones.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use u_priora::{CoercionRegistry, Prioritizer};
///
/// let prioritizer = Prioritizer::default()
///     .with_coercions(Arc::new(CoercionRegistry::new()));
/// ```
#[derive(Debug, Clone)]
pub struct Prioritizer {
    coercions: Arc<CoercionRegistry>,
    declarations: Arc<DeclaredPriorities>,
}

impl Default for Prioritizer {
    fn default() -> Self {
        Self {
            coercions: Arc::clone(CoercionRegistry::global()),
            declarations: Arc::clone(DeclaredPriorities::global()),
        }
    }
}

impl Prioritizer {
    /// Creates a configuration with fresh, unshared registries.
    pub fn isolated() -> Self {
        Self {
            coercions: Arc::new(CoercionRegistry::new()),
            declarations: Arc::new(DeclaredPriorities::new()),
        }
    }

    /// Sets the coercion registry.
    pub fn with_coercions(mut self, coercions: Arc<CoercionRegistry>) -> Self {
        self.coercions = coercions;
        self
    }

    /// Sets the declared-priorities registry.
    pub fn with_declarations(mut self, declarations: Arc<DeclaredPriorities>) -> Self {
        self.declarations = declarations;
        self
    }

    /// The coercion registry in use.
    pub fn coercions(&self) -> &CoercionRegistry {
        &self.coercions
    }

    /// The declared-priorities registry in use.
    pub fn declarations(&self) -> &DeclaredPriorities {
        &self.declarations
    }

    /// Registers a conversion for `kind`. See [`CoercionRegistry::register`].
    pub fn add_conversion<C>(&self, kind: ValueKind, conversion: C) -> Result<()>
    where
        C: Conversion + 'static,
    {
        self.coercions.register(kind, conversion)
    }

    /// Removes the conversion for `kind`. See [`CoercionRegistry::unregister`].
    pub fn remove_conversion(&self, kind: &ValueKind) -> bool {
        self.coercions.unregister(kind)
    }

    /// Declares the default priorities of `T`. See [`DeclaredPriorities::declare`].
    pub fn declare<T: 'static>(&self, raws: &[RawPriority]) -> Result<()> {
        self.declarations.declare::<T>(raws)
    }

    /// Orders `objects` from highest to lowest priority.
    ///
    /// Uses `priorities` when given. Otherwise the objects' types must
    /// declare defaults, and all declaring types must agree on one list.
    ///
    /// The input is left untouched; the result borrows from it.
    ///
    /// # Errors
    ///
    /// - [`PrioraError::InvalidPrioritySyntax`] for a malformed raw priority.
    /// - [`PrioraError::UnsuppliedPriorities`] when no priorities are given
    ///   and no single declared list applies.
    /// - Any error raised while reading values, see
    ///   [`Collection::prioritize_by`].
    pub fn prioritize<'a, T>(
        &self,
        objects: &'a [T],
        priorities: Option<&[RawPriority]>,
    ) -> Result<Vec<&'a T>>
    where
        T: Prioritizable + 'static,
    {
        let priorities = self.resolve_priorities(objects, priorities)?;
        self.order(objects, &priorities)
    }

    /// Orders `objects` by explicitly supplied priorities.
    ///
    /// Never consults declarations, so `T` may borrow data.
    pub fn prioritize_with<'a, T>(&self, objects: &'a [T], raws: &[RawPriority]) -> Result<Vec<&'a T>>
    where
        T: Prioritizable,
    {
        let priorities = PriorityBuilder::build_all(raws)?;
        self.order(objects, &priorities)
    }

    fn order<'a, T>(&self, objects: &'a [T], priorities: &[Priority]) -> Result<Vec<&'a T>>
    where
        T: Prioritizable,
    {
        Collection::new(objects)
            .with_registry(Arc::clone(&self.coercions))
            .prioritize_by(priorities)
    }

    /// Resolves the priority list a call to [`prioritize`](Self::prioritize) would use.
    pub fn resolve_priorities<T>(
        &self,
        objects: &[T],
        priorities: Option<&[RawPriority]>,
    ) -> Result<Arc<[Priority]>>
    where
        T: Prioritizable + 'static,
    {
        if let Some(raws) = priorities {
            return Ok(PriorityBuilder::build_all(raws)?.into());
        }

        let mut seen: HashSet<TypeId> = HashSet::new();
        let mut found: Vec<Arc<[Priority]>> = Vec::new();
        for key in objects.iter().map(Prioritizable::priority_key) {
            if !seen.insert(key) {
                continue;
            }
            if let Some(list) = self.declarations.lookup(key) {
                if !found.contains(&list) {
                    found.push(list);
                }
            }
        }

        match found.len() {
            1 => Ok(found.swap_remove(0)),
            n => {
                log::debug!("cannot resolve declared priorities: {n} distinct declarations");
                Err(PrioraError::UnsuppliedPriorities)
            }
        }
    }
}
