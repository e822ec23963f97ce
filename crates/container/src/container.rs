//! The container: registration API plus the lazy resolver.

use std::any::type_name;
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::construct::{closure_builder, closure_instance_builder, definition_builder};
use crate::errors::ContainerError;
use crate::injectable::{Closure, Construct, Injectable, Provide};
use crate::key::Key;
use crate::registration::{Builder, Lifecycle, Registration};
use crate::registry::Registry;

/// Lazy dependency-injection container.
///
/// Nothing is built at registration time; `get` resolves the requested key's
/// dependency graph depth-first on the calling thread, caching singletons as
/// it goes. Containers are independent of each other and safe to share
/// across threads.
pub struct Container {
    registry: Registry,
    auto_definition: bool,
}

impl Container {
    /// Container with lazy self-definition enabled: requesting an
    /// unregistered constructible key installs a definition of the key as
    /// its own implementation.
    pub fn new() -> Self {
        Self::with_auto_definition(true)
    }

    /// Chooses whether unregistered keys may self-register on first `get`.
    /// With `false`, every key must be registered explicitly beforehand.
    pub fn with_auto_definition(auto_definition: bool) -> Self {
        Self {
            registry: Registry::new(),
            auto_definition,
        }
    }

    /// Registers `I` as the implementation built for requests of `K`,
    /// singleton lifecycle.
    pub fn add_definition<K, I>(&self) -> Result<&Self, ContainerError>
    where
        K: Injectable + ?Sized,
        I: Construct + Provide<K>,
    {
        self.add_definition_with::<K, I>(Lifecycle::Singleton)
    }

    /// [`add_definition`](Self::add_definition) with an explicit lifecycle.
    pub fn add_definition_with<K, I>(&self, lifecycle: Lifecycle) -> Result<&Self, ContainerError>
    where
        K: Injectable + ?Sized,
        I: Construct + Provide<K>,
    {
        let key = Key::of::<K>();
        self.registry.insert(
            key,
            Registration::new(Builder::Definition(definition_builder::<K, I>()), lifecycle),
        );
        debug!(
            "registered definition {} -> {} ({:?})",
            key,
            type_name::<I>(),
            lifecycle
        );
        Ok(self)
    }

    /// Registers a constructible type as its own implementation.
    pub fn add_self_definition<I: Construct>(&self) -> Result<&Self, ContainerError> {
        self.add_definition::<I, I>()
    }

    /// Registers a fixed, already-built value. Always singleton: the exact
    /// `Arc` handed in is what every `get` returns.
    pub fn add_instance<K>(&self, value: Arc<K>) -> Result<&Self, ContainerError>
    where
        K: Injectable + ?Sized,
    {
        let key = Key::of::<K>();
        self.registry.insert(key, Registration::instance(Box::new(value)));
        debug!("registered instance for {}", key);
        Ok(self)
    }

    /// Registers a closure *type* as the builder for `K`, singleton
    /// lifecycle. The closure object is itself resolved through the full
    /// construction pipeline on every invocation, so it may declare injected
    /// dependencies of its own.
    pub fn add_closure<K, C>(&self) -> Result<&Self, ContainerError>
    where
        K: Injectable + ?Sized,
        C: Construct + Closure<K>,
    {
        self.add_closure_with::<K, C>(Lifecycle::Singleton)
    }

    /// [`add_closure`](Self::add_closure) with an explicit lifecycle for the
    /// closure's product.
    pub fn add_closure_with<K, C>(&self, lifecycle: Lifecycle) -> Result<&Self, ContainerError>
    where
        K: Injectable + ?Sized,
        C: Construct + Closure<K>,
    {
        let key = Key::of::<K>();
        self.registry.insert(
            key,
            Registration::new(Builder::Closure(closure_builder::<K, C>()), lifecycle),
        );
        debug!("registered closure type {} for {}", type_name::<C>(), key);
        Ok(self)
    }

    /// Registers an already-built closure as the builder for `K`, singleton
    /// lifecycle. Its dependencies are assumed bound by its creator; it is
    /// invoked as-is.
    pub fn add_closure_instance<K, C>(&self, closure: C) -> Result<&Self, ContainerError>
    where
        K: Injectable + ?Sized,
        C: Closure<K> + 'static,
    {
        self.add_closure_instance_with::<K, C>(closure, Lifecycle::Singleton)
    }

    /// [`add_closure_instance`](Self::add_closure_instance) with an explicit
    /// lifecycle for the closure's product.
    pub fn add_closure_instance_with<K, C>(
        &self,
        closure: C,
        lifecycle: Lifecycle,
    ) -> Result<&Self, ContainerError>
    where
        K: Injectable + ?Sized,
        C: Closure<K> + 'static,
    {
        let key = Key::of::<K>();
        self.registry.insert(
            key,
            Registration::new(
                Builder::Closure(closure_instance_builder::<K, C>(closure)),
                lifecycle,
            ),
        );
        debug!("registered closure instance for {}", key);
        Ok(self)
    }

    /// Resolves the value registered under `K`.
    ///
    /// An unregistered constructible key self-registers first (unless the
    /// container was created with auto definition disabled). If the key's
    /// registration is singleton-scoped, the built value is memoized as a
    /// fixed instance so later calls short-circuit.
    ///
    /// Lookup, build, and memoization are three separate registry
    /// operations: two threads racing an unresolved key may both run the
    /// builder, and the last memoization write wins. See the crate docs.
    pub fn get<K>(&self) -> Result<Arc<K>, ContainerError>
    where
        K: Injectable + ?Sized,
    {
        let key = Key::of::<K>();

        if !self.registry.contains(&key) {
            if !self.auto_definition {
                return Err(ContainerError::resolution::<K>(
                    "no registration for key and auto definition is disabled",
                ));
            }
            match K::auto_definition() {
                Some(builder) => {
                    debug!("self-registering definition {0} -> {0}", key);
                    self.registry.insert(
                        key,
                        Registration::new(Builder::Definition(builder), Lifecycle::Singleton),
                    );
                }
                // Trait-object keys can not construct themselves.
                None => return Err(ContainerError::instantiation_failure(key.name())),
            }
        }

        let registration = self
            .registry
            .lookup(&key)
            .ok_or_else(|| ContainerError::resolution::<K>("registration removed while resolving"))?;

        let value: Arc<K> = match &*registration.builder {
            Builder::Instance(stored) => stored
                .downcast_ref::<Arc<K>>()
                .cloned()
                .ok_or_else(|| {
                    ContainerError::resolution::<K>(
                        "stored instance does not match the requested key type",
                    )
                })?,
            Builder::Definition(build) | Builder::Closure(build) => {
                let product = build(self)?;
                *product.downcast::<Arc<K>>().map_err(|_| {
                    ContainerError::resolution::<K>(
                        "builder product does not match the requested key type",
                    )
                })?
            }
        };

        if registration.lifecycle == Lifecycle::Singleton && !registration.is_instance() {
            self.registry
                .insert(key, Registration::instance(Box::new(value.clone())));
            debug!("memoized singleton {}", key);
        }

        Ok(value)
    }

    /// Whether `K` currently has a registration (including memoized
    /// instances and lazily self-registered definitions).
    pub fn exists_key<K>(&self) -> bool
    where
        K: Injectable + ?Sized,
    {
        self.registry.contains(&Key::of::<K>())
    }

    /// Removes every definition and instance.
    pub fn clear(&self) {
        let dropped = self.registry.clear();
        debug!("cleared {} registrations", dropped);
    }

    /// Number of keys currently registered.
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.len() == 0
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("registrations", &self.registry.len())
            .field("auto_definition", &self.auto_definition)
            .finish()
    }
}
