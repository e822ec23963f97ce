//! The catalog: the runtime image of the injectable capability.
//!
//! Typed registration proves the capability through the `Injectable` trait
//! bound at compile time. Definition files only carry *names*, so the
//! loaders need a runtime stand-in: a catalog maps stable type names to
//! registration thunks for the bindings an application is willing to accept
//! from configuration. A name the catalog can not prove injectable is
//! rejected with [`ContainerError::NotInjectable`]; a name it has never
//! heard of fails the load outright.

use std::any::type_name;
use std::collections::{HashMap, HashSet};

use crate::container::Container;
use crate::errors::{ContainerError, LoadError};
use crate::injectable::{Construct, Injectable, Provide};
use crate::key::Key;

type RegisterFn = fn(&Container) -> Result<(), ContainerError>;

/// Name-addressed registration thunks for definition-file loading.
#[derive(Default)]
pub struct Catalog {
    /// key name -> implementation name -> registration thunk
    bindings: HashMap<String, HashMap<String, RegisterFn>>,
    /// every name mentioned by a binding
    names: HashSet<String>,
    /// names declared known but not capability-carrying
    opaque: HashSet<String>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares the binding `K -> I` under the types' canonical names.
    pub fn definition<K, I>(self) -> Self
    where
        K: Injectable + ?Sized,
        I: Construct + Provide<K>,
    {
        let key_name = Key::of::<K>().name().to_owned();
        let impl_name = type_name::<I>().to_owned();
        self.definition_as::<K, I>(key_name, impl_name)
    }

    /// Declares the binding `K -> I` under explicit stable names, the form
    /// definition files usually refer to.
    pub fn definition_as<K, I>(
        mut self,
        key_name: impl Into<String>,
        impl_name: impl Into<String>,
    ) -> Self
    where
        K: Injectable + ?Sized,
        I: Construct + Provide<K>,
    {
        let key_name = key_name.into();
        let impl_name = impl_name.into();
        let register: RegisterFn = |container| container.add_definition::<K, I>().map(|_| ());
        self.names.insert(key_name.clone());
        self.names.insert(impl_name.clone());
        self.bindings
            .entry(key_name)
            .or_default()
            .insert(impl_name, register);
        self
    }

    /// Declares a name as known but not carrying the injectable capability.
    /// Definition files naming it are rejected with `NotInjectable` instead
    /// of an unknown-name failure.
    pub fn opaque(mut self, name: impl Into<String>) -> Self {
        self.opaque.insert(name.into());
        self
    }

    /// The capability gate for the by-name surface: pure predicate, no
    /// side effects.
    pub fn is_injectable(&self, name: &str) -> bool {
        self.names.contains(name) && !self.opaque.contains(name)
    }

    /// Whether the catalog has heard of `name` at all.
    pub fn knows(&self, name: &str) -> bool {
        self.names.contains(name) || self.opaque.contains(name)
    }

    /// Registers the named binding into `container`: gate both names, then
    /// run the matching thunk.
    pub fn apply(
        &self,
        container: &Container,
        key: &str,
        implementation: &str,
    ) -> Result<(), LoadError> {
        for name in [key, implementation] {
            if !self.knows(name) {
                return Err(LoadError::UnknownType {
                    name: name.to_owned(),
                });
            }
            if !self.is_injectable(name) {
                return Err(ContainerError::not_injectable(name).into());
            }
        }

        let register = self
            .bindings
            .get(key)
            .and_then(|implementations| implementations.get(implementation))
            .ok_or_else(|| LoadError::UnknownBinding {
                key: key.to_owned(),
                implementation: implementation.to_owned(),
            })?;

        register(container).map_err(LoadError::from)
    }
}
