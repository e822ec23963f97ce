//! Injection keys: the stable handles registrations are stored under.

use std::any::{type_name, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Identifies the contract type a value is registered and requested under.
///
/// Keys compare and hash by canonical type name, so two lookups for the same
/// type always hit the same registry slot. The [`TypeId`] is kept alongside
/// for diagnostics; it never participates in slot addressing.
#[derive(Debug, Clone, Copy)]
pub struct Key {
    name: &'static str,
    id: TypeId,
}

impl Key {
    /// Key of any `'static` type, sized or not (trait-object keys included).
    pub fn of<T: 'static + ?Sized>() -> Self {
        Self {
            name: type_name::<T>(),
            id: TypeId::of::<T>(),
        }
    }

    /// Canonical name of the keyed type.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// [`TypeId`] of the keyed type, for callers that need exact-type checks.
    pub fn id(&self) -> TypeId {
        self.id
    }
}

impl PartialEq for Key {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Key {}

impl Hash for Key {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    trait Contract: Send + Sync {}
    struct Concrete;

    #[test]
    fn same_type_same_slot() {
        let a = Key::of::<Concrete>();
        let b = Key::of::<Concrete>();
        assert_eq!(a, b);

        let mut slots = HashMap::new();
        slots.insert(a, 1);
        slots.insert(b, 2);
        assert_eq!(slots.len(), 1);
    }

    #[test]
    fn trait_object_keys_are_distinct_from_concrete_ones() {
        assert_ne!(Key::of::<dyn Contract>(), Key::of::<Concrete>());
        assert_ne!(
            Key::of::<dyn Contract>().id(),
            Key::of::<Concrete>().id()
        );
    }

    #[test]
    fn display_is_the_canonical_name() {
        let key = Key::of::<Concrete>();
        assert_eq!(key.to_string(), key.name());
        assert!(key.name().ends_with("Concrete"));
    }
}
