//! Registrations: the stored (builder, lifecycle) pair for a key.

use std::any::Any;
use std::sync::Arc;

use crate::container::Container;
use crate::errors::ContainerError;

/// Type-erased builder invocation. The boxed product always wraps an
/// `Arc<K>` of the registered key type; the resolver downcasts it back.
pub type BuildFn =
    Box<dyn Fn(&Container) -> Result<Box<dyn Any + Send + Sync>, ContainerError> + Send + Sync>;

/// How long a built value lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lifecycle {
    /// Built once, cached, and returned for every later request of the key.
    #[default]
    Singleton,
    /// Built fresh on every request.
    Transient,
}

/// The three builder strategies a registration can hold.
pub(crate) enum Builder {
    /// Build by running the implementation type's constructor-selection and
    /// setter-injection pipeline.
    Definition(BuildFn),
    /// Return a fixed, already-built `Arc<K>`.
    Instance(Box<dyn Any + Send + Sync>),
    /// Invoke a zero-argument callable; its product is the value.
    Closure(BuildFn),
}

/// One active registration per present key. Cloning shares the builder.
#[derive(Clone)]
pub(crate) struct Registration {
    pub(crate) builder: Arc<Builder>,
    pub(crate) lifecycle: Lifecycle,
}

impl Registration {
    pub(crate) fn new(builder: Builder, lifecycle: Lifecycle) -> Self {
        Self {
            builder: Arc::new(builder),
            lifecycle,
        }
    }

    /// Memoization record: a fixed instance, always singleton.
    pub(crate) fn instance(value: Box<dyn Any + Send + Sync>) -> Self {
        Self::new(Builder::Instance(value), Lifecycle::Singleton)
    }

    pub(crate) fn is_instance(&self) -> bool {
        matches!(*self.builder, Builder::Instance(_))
    }
}
