mod common;

use common::*;
use container::{Container, ContainerError};

#[test]
fn strict_containers_refuse_unregistered_keys() {
    init_tracing();
    let container = Container::with_auto_definition(false);

    assert!(matches!(
        container.get::<dyn ServiceA>().unwrap_err(),
        ContainerError::ResolutionFailure { .. }
    ));
    // Even a constructible type must be registered up front.
    assert!(matches!(
        container.get::<ServiceC>().unwrap_err(),
        ContainerError::ResolutionFailure { .. }
    ));
    assert!(container.is_empty());
}

#[test]
fn explicit_registrations_still_resolve_in_strict_mode() -> anyhow::Result<()> {
    init_tracing();
    let container = Container::with_auto_definition(false);
    container
        .add_definition::<dyn ServiceA, ServiceB>()?
        .add_self_definition::<ServiceC>()?;

    let service_a = container.get::<dyn ServiceA>()?;
    assert!(service_a.as_any().downcast_ref::<ServiceB>().is_some());
    Ok(())
}

#[test]
fn strict_mode_does_not_leak_registrations_on_failed_gets() {
    init_tracing();
    let container = Container::with_auto_definition(false);
    let _ = container.get::<ServiceC>();
    assert!(!container.exists_key::<ServiceC>());
}
