//! Constructor selection and setter injection.
//!
//! The selection policy is declaration-order, first-success: candidates are
//! attempted in the order the recipe lists them, the first one whose
//! parameters all resolve and whose invocation succeeds wins, and side
//! effects of failed attempts (nested lazy registrations, memoizations) are
//! kept, never rolled back. No specificity heuristic is applied.

use std::any::{type_name, Any};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::container::Container;
use crate::errors::ContainerError;
use crate::injectable::{Closure, Construct, Injectable, Provide};
use crate::registration::BuildFn;

/// Runs `T`'s recipe against `container`: pick the first working
/// constructor candidate, then run the setter pass on the fresh value.
pub(crate) fn construct<T: Construct>(container: &Container) -> Result<T, ContainerError> {
    let target = type_name::<T>();
    for (index, constructor) in T::constructors().into_iter().enumerate() {
        match constructor(container) {
            Ok(mut value) => {
                debug!("constructor {} of {} selected", index, target);
                run_setters(&mut value, container);
                return Ok(value);
            }
            Err(error) => {
                debug!(
                    "constructor {} of {} failed, trying next: {:#}",
                    index, target, error
                );
            }
        }
    }
    Err(ContainerError::instantiation_failure(target))
}

/// Setter pass: each failure is logged and the slot keeps whatever default
/// the winning constructor assigned. The value is returned regardless.
fn run_setters<T: Construct>(value: &mut T, container: &Container) {
    for (index, setter) in T::setters().into_iter().enumerate() {
        if let Err(error) = setter(value, container) {
            warn!(
                "setter {} of {} failed, slot left at its default: {:#}",
                index,
                type_name::<T>(),
                error
            );
        }
    }
}

/// Type-erased definition builder: construct `I`, hand it out as the key
/// type `K`.
#[doc(hidden)]
pub fn definition_builder<K, I>() -> BuildFn
where
    K: Injectable + ?Sized,
    I: Construct + Provide<K>,
{
    Box::new(|container| {
        let value = construct::<I>(container)?;
        Ok(Box::new(I::provide(Arc::new(value))) as Box<dyn Any + Send + Sync>)
    })
}

/// Closure-type builder: the closure object is rebuilt through the full
/// construction pipeline on every invocation; only its product is cached,
/// according to the enclosing key's lifecycle.
pub(crate) fn closure_builder<K, C>() -> BuildFn
where
    K: Injectable + ?Sized,
    C: Construct + Closure<K>,
{
    Box::new(|container| {
        let closure = construct::<C>(container)?;
        closure
            .call()
            .map(|product| Box::new(product) as Box<dyn Any + Send + Sync>)
            .map_err(ContainerError::with_cause::<K>)
    })
}

/// Closure-instance builder: dependencies were bound at registration time,
/// the callable is invoked as-is.
pub(crate) fn closure_instance_builder<K, C>(closure: C) -> BuildFn
where
    K: Injectable + ?Sized,
    C: Closure<K> + 'static,
{
    let closure = Arc::new(closure);
    Box::new(move |_container| {
        closure
            .call()
            .map(|product| Box::new(product) as Box<dyn Any + Send + Sync>)
            .map_err(ContainerError::with_cause::<K>)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::injectable::Constructor;

    struct Picky {
        via: usize,
    }
    crate::injectable!(Picky);
    impl Construct for Picky {
        fn constructors() -> Vec<Constructor<Self>> {
            vec![
                |_| anyhow::bail!("first candidate refuses"),
                |_| Ok(Picky { via: 1 }),
                |_| Ok(Picky { via: 2 }),
            ]
        }
    }

    #[derive(Debug)]
    struct Hopeless;
    crate::injectable!(Hopeless);
    impl Construct for Hopeless {
        fn constructors() -> Vec<Constructor<Self>> {
            vec![
                |_| anyhow::bail!("nope"),
                |_| anyhow::bail!("still no"),
            ]
        }
    }

    #[test]
    fn first_success_wins_and_later_candidates_are_never_tried() {
        let container = Container::new();
        let picky = construct::<Picky>(&container).expect("second candidate succeeds");
        assert_eq!(picky.via, 1);
    }

    #[test]
    fn total_failure_is_an_instantiation_failure_naming_the_target() {
        let container = Container::new();
        let error = construct::<Hopeless>(&container).unwrap_err();
        match error {
            ContainerError::InstantiationFailure { type_name } => {
                assert!(type_name.ends_with("Hopeless"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
