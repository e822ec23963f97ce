//! The capability marker and the explicit build recipes that replace
//! runtime reflection.
//!
//! A type participates in the container by carrying the [`Injectable`]
//! capability. Concrete types additionally describe how to build themselves
//! through [`Construct`]: an ordered list of constructor candidates plus
//! optional setter injection points, both resolving their own dependencies
//! through the [`Container`] they are handed.

use std::any::Any;
use std::sync::Arc;

use crate::container::Container;
use crate::registration::BuildFn;

/// A constructor candidate: resolves its parameter types through the
/// container and produces a value, or reports why the attempt failed.
pub type Constructor<T> = fn(&Container) -> anyhow::Result<T>;

/// A setter injection point, run once after the winning constructor on the
/// definition path. Failures are logged and the slot keeps its
/// constructor-assigned default.
pub type Setter<T> = fn(&mut T, &Container) -> anyhow::Result<()>;

/// Marker capability: types allowed to participate in the container, as
/// injection keys or as implementations.
///
/// Implement it bare on trait-object keys (`impl Injectable for dyn Foo {}`)
/// and through the [`injectable!`](crate::injectable) macro on concrete
/// constructible types; the macro form additionally opts the type into lazy
/// self-definition when an unregistered key is first requested.
pub trait Injectable: Any + Send + Sync {
    /// Definition builder installed when this type is requested as an
    /// unregistered key. `None` (the default, and the only possibility for
    /// trait-object keys) makes such a request fail instead.
    fn auto_definition() -> Option<BuildFn> {
        None
    }
}

/// Explicit build recipe of a concrete implementation type.
pub trait Construct: Injectable + Sized {
    /// Constructor candidates in declaration order. Resolution commits to
    /// the first candidate that fully succeeds; later ones are never tried.
    fn constructors() -> Vec<Constructor<Self>>;

    /// Setter injection points, run after the winning constructor.
    fn setters() -> Vec<Setter<Self>> {
        Vec::new()
    }
}

/// Coercion from an implementation type to the key it is registered under.
///
/// The identity case is blanket-implemented; registering a concrete type
/// under a trait-object key takes a one-line impl:
///
/// ```ignore
/// impl Provide<dyn ServiceA> for ServiceB {
///     fn provide(this: Arc<Self>) -> Arc<dyn ServiceA> {
///         this
///     }
/// }
/// ```
pub trait Provide<K: Injectable + ?Sized>: Injectable + Sized {
    fn provide(this: Arc<Self>) -> Arc<K>;
}

impl<T: Injectable> Provide<T> for T {
    fn provide(this: Arc<T>) -> Arc<T> {
        this
    }
}

/// A zero-argument callable usable as a custom builder strategy.
///
/// Closure *types* (structs implementing this plus [`Construct`]) are
/// themselves rebuilt through the full construction pipeline on every
/// resolution, so they may declare injected dependencies of their own.
/// Closure *instances* are invoked as-is, their dependencies bound at
/// registration time. Plain `Fn() -> anyhow::Result<Arc<K>>` closures are
/// accepted directly.
pub trait Closure<K: Injectable + ?Sized>: Send + Sync {
    fn call(&self) -> anyhow::Result<Arc<K>>;
}

impl<K, F> Closure<K> for F
where
    K: Injectable + ?Sized,
    F: Fn() -> anyhow::Result<Arc<K>> + Send + Sync,
{
    fn call(&self) -> anyhow::Result<Arc<K>> {
        (self)()
    }
}
