//! Error taxonomy of the container and its definition-file loaders.
//!
//! Resolution errors are deliberately a small, closed set:
//! - [`ContainerError::NotInjectable`] — a registration named a type the
//!   runtime can not prove injectable (by-name surface only; the typed
//!   surface rejects at compile time through the `Injectable` bound).
//! - [`ContainerError::InstantiationFailure`] — every constructor candidate
//!   of a definition's implementation type failed.
//! - [`ContainerError::ResolutionFailure`] — anything else a builder did
//!   wrong, wrapping the original cause.
//!
//! There are no retries anywhere: every failure here is a misconfiguration,
//! surfaced immediately and synchronously.

use std::any::type_name;
use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

/// Failures raised by registration and resolution.
#[derive(Debug, Error, Clone)]
pub enum ContainerError {
    /// The named type does not carry the injectable capability.
    #[error("{type_name} can not be provided by the container: does it carry the injectable capability?")]
    NotInjectable { type_name: String },

    /// No constructor of the implementation type could be resolved and invoked.
    #[error("no constructor of {type_name} could be resolved and invoked")]
    InstantiationFailure { type_name: String },

    /// A builder failed for any other reason; carries the original cause.
    #[error("resolution of {type_name} failed: {detail}")]
    ResolutionFailure {
        type_name: String,
        detail: String,
        #[source]
        source: Option<Arc<dyn std::error::Error + Send + Sync + 'static>>,
    },
}

impl ContainerError {
    /// Capability rejection for a type only known by name.
    pub fn not_injectable(type_name: impl Into<String>) -> Self {
        Self::NotInjectable {
            type_name: type_name.into(),
        }
    }

    pub(crate) fn instantiation_failure(type_name: &str) -> Self {
        Self::InstantiationFailure {
            type_name: type_name.to_owned(),
        }
    }

    /// Resolution failure of key `K` without an underlying cause.
    pub fn resolution<K: ?Sized + 'static>(detail: impl Into<String>) -> Self {
        Self::ResolutionFailure {
            type_name: type_name::<K>().to_owned(),
            detail: detail.into(),
            source: None,
        }
    }

    /// Resolution failure of key `K` wrapping a builder's own error.
    pub fn with_cause<K: ?Sized + 'static>(cause: anyhow::Error) -> Self {
        let detail = cause.to_string();
        let boxed: Box<dyn std::error::Error + Send + Sync + 'static> = cause.into();
        Self::ResolutionFailure {
            type_name: type_name::<K>().to_owned(),
            detail,
            source: Some(Arc::from(boxed)),
        }
    }
}

/// Failures raised while loading a container from a definitions document.
///
/// The historical behavior of swallowing the cause into an absent result
/// survives only as the loaders' `try_from_*` wrappers; this type is the
/// primary, cause-preserving surface.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read definitions from {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read definitions from reader")]
    Reader {
        #[source]
        source: std::io::Error,
    },

    #[error("malformed section/key-value definitions")]
    Toml {
        #[source]
        source: toml::de::Error,
    },

    #[error("malformed flat key-value definitions")]
    Yaml {
        #[source]
        source: serde_yaml::Error,
    },

    /// Structurally valid document with an entry of the wrong shape.
    #[error("malformed definitions: {detail}")]
    Malformed { detail: String },

    /// A name in the document resolves to no type known to the catalog.
    #[error("`{name}` does not name a type known to the catalog")]
    UnknownType { name: String },

    /// Both names are known but no binding between them is declared.
    #[error("no binding from `{key}` to `{implementation}` is declared in the catalog")]
    UnknownBinding { key: String, implementation: String },

    /// The capability gate or the registry rejected a definition.
    #[error(transparent)]
    Rejected(#[from] ContainerError),
}
