//! Type-level default priority declarations.

use std::any::TypeId;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;

use crate::error::Result;
use crate::priority::{Priority, PriorityBuilder, RawPriority};

static GLOBAL: Lazy<Arc<DeclaredPriorities>> = Lazy::new(|| Arc::new(DeclaredPriorities::new()));

/// Registry of the priority lists types declare as their defaults.
///
/// A declaration is built into [`Priority`] values once, when it is made,
/// and shared by every later lookup.
///
/// # Examples
///
/// ```ignore
/// DeclaredPriorities::global().declare::<Post>(&["like_count".into(), "is_sponsored".into()])?;
///
/// // later, with no explicit priorities
/// let ordered = u_priora::prioritize(&posts, None)?;
/// ```
#[derive(Default)]
pub struct DeclaredPriorities {
    lists: RwLock<HashMap<TypeId, Arc<[Priority]>>>,
}

impl DeclaredPriorities {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry used by [`crate::prioritize`].
    pub fn global() -> &'static Arc<DeclaredPriorities> {
        &GLOBAL
    }

    /// Declares the default priorities of `T`, replacing any earlier ones.
    ///
    /// # Errors
    ///
    /// Returns [`PrioraError::InvalidPrioritySyntax`](crate::PrioraError::InvalidPrioritySyntax)
    /// if any entry is malformed; the previous declaration is then kept.
    pub fn declare<T: 'static>(&self, raws: &[RawPriority]) -> Result<()> {
        let priorities: Arc<[Priority]> = PriorityBuilder::build_all(raws)?.into();
        log::debug!(
            "declared {} priorities for {}",
            priorities.len(),
            std::any::type_name::<T>()
        );
        self.lists.write().insert(TypeId::of::<T>(), priorities);
        Ok(())
    }

    /// Removes the declaration of `T`. Returns whether one existed.
    pub fn revoke<T: 'static>(&self) -> bool {
        self.lists.write().remove(&TypeId::of::<T>()).is_some()
    }

    /// Returns the priorities declared by `T`.
    pub fn get<T: 'static>(&self) -> Option<Arc<[Priority]>> {
        self.lookup(TypeId::of::<T>())
    }

    /// Returns the priorities declared under a type key.
    pub fn lookup(&self, key: TypeId) -> Option<Arc<[Priority]>> {
        self.lists.read().get(&key).cloned()
    }
}

impl fmt::Debug for DeclaredPriorities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeclaredPriorities")
            .field("declared_types", &self.lists.read().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{PrioraError, SyntaxViolation};
    use crate::priority::{DirectedMap, Direction};

    struct Post;
    struct Comment;

    #[test]
    fn test_declare_and_get() {
        let declared = DeclaredPriorities::new();
        declared
            .declare::<Post>(&["like_count".into(), ("age", Direction::Ascending).into()])
            .unwrap();

        let list = declared.get::<Post>().unwrap();
        assert_eq!(
            &*list,
            &[
                Priority::new("like_count"),
                Priority::with_direction("age", Direction::Ascending),
            ]
        );
        assert!(declared.get::<Comment>().is_none());
    }

    #[test]
    fn test_declaration_is_shared() {
        let declared = DeclaredPriorities::new();
        declared.declare::<Post>(&["like_count".into()]).unwrap();

        let a = declared.get::<Post>().unwrap();
        let b = declared.lookup(TypeId::of::<Post>()).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_invalid_declaration_keeps_previous() {
        let declared = DeclaredPriorities::new();
        declared.declare::<Post>(&["like_count".into()]).unwrap();

        let bad = RawPriority::Directed(DirectedMap::new());
        assert_eq!(
            declared.declare::<Post>(&[bad]),
            Err(PrioraError::InvalidPrioritySyntax(
                SyntaxViolation::MultipleAttributes
            ))
        );
        assert_eq!(declared.get::<Post>().unwrap().len(), 1);
    }

    #[test]
    fn test_revoke() {
        let declared = DeclaredPriorities::new();
        declared.declare::<Post>(&["like_count".into()]).unwrap();
        assert!(declared.revoke::<Post>());
        assert!(!declared.revoke::<Post>());
        assert!(declared.get::<Post>().is_none());
    }
}
