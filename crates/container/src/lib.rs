//! Lazy dependency-injection container.
//!
//! A [`Container`] maps injection keys to builder strategies and resolves a
//! full, possibly nested, object graph on demand: singletons are cached
//! after the first construction, transients are built fresh on every
//! request. Nothing is constructed at registration time.
//!
//! Instead of runtime reflection, every constructible type carries an
//! explicit recipe ([`Construct`]): constructor candidates tried in
//! declaration order (first full success wins, failed attempts keep their
//! side effects) and optional setter injection points run after
//! construction. The [`Injectable`] capability gates participation; the
//! [`injectable!`] macro is the attribute-style way to grant it.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use container::{injectable, Construct, Constructor, Container, Injectable, Provide};
//!
//! trait Greeter: Send + Sync {
//!     fn greet(&self) -> String;
//! }
//! impl Injectable for dyn Greeter {}
//!
//! struct Dictionary;
//! injectable!(Dictionary);
//! impl Construct for Dictionary {
//!     fn constructors() -> Vec<Constructor<Self>> {
//!         vec![|_| Ok(Dictionary)]
//!     }
//! }
//!
//! struct EnglishGreeter {
//!     dictionary: Arc<Dictionary>,
//! }
//! injectable!(EnglishGreeter);
//! impl Construct for EnglishGreeter {
//!     fn constructors() -> Vec<Constructor<Self>> {
//!         vec![|c| {
//!             Ok(EnglishGreeter {
//!                 dictionary: c.get::<Dictionary>()?,
//!             })
//!         }]
//!     }
//! }
//! impl Greeter for EnglishGreeter {
//!     fn greet(&self) -> String {
//!         "hello".to_owned()
//!     }
//! }
//! impl Provide<dyn Greeter> for EnglishGreeter {
//!     fn provide(this: Arc<Self>) -> Arc<dyn Greeter> {
//!         this
//!     }
//! }
//!
//! # fn main() -> anyhow::Result<()> {
//! let container = Container::new();
//! container.add_definition::<dyn Greeter, EnglishGreeter>()?;
//!
//! let greeter = container.get::<dyn Greeter>()?;
//! assert_eq!(greeter.greet(), "hello");
//! # Ok(())
//! # }
//! ```
//!
//! # Concurrency caveat
//!
//! The registry tolerates concurrent registration and resolution, but
//! resolving a given *unresolved* key is not atomic end-to-end: lookup,
//! build, and memoization are three separate registry operations. Two
//! threads racing `get` on the same unresolved singleton may both run the
//! builder; the last memoization write wins and the other thread keeps its
//! own, now-orphaned value. This is a documented trade against holding a
//! lock across user builders (which recurse into the container).
//!
//! Cyclic graphs (A needs B needs A) are unsupported: resolution recurses
//! without bound and dies by stack exhaustion rather than deadlocking.

mod catalog;
mod container;
mod construct;
mod errors;
mod global;
mod injectable;
mod key;
mod load;
mod registration;
mod registry;

pub use catalog::Catalog;
pub use container::Container;
pub use errors::{ContainerError, LoadError};
pub use global::global;
pub use injectable::{Closure, Construct, Constructor, Injectable, Provide, Setter};
pub use key::Key;
pub use load::{TomlContainer, YamlContainer};
pub use registration::{BuildFn, Lifecycle};

#[doc(hidden)]
pub use construct::definition_builder;

/// Grants a concrete constructible type the injectable capability,
/// attribute-style, and opts it into lazy self-definition: requesting the
/// type as an unregistered key installs a definition of the type as its own
/// implementation.
///
/// The type still supplies its recipe through [`Construct`]. Hand-written
/// `impl Injectable` blocks remain accepted (that is the only form possible
/// for trait-object keys).
#[macro_export]
macro_rules! injectable {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::Injectable for $ty {
                fn auto_definition() -> ::core::option::Option<$crate::BuildFn> {
                    ::core::option::Option::Some($crate::definition_builder::<$ty, $ty>())
                }
            }
        )+
    };
}
