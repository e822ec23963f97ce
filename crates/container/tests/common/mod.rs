//! Dummy service graph shared by the integration tests.
#![allow(dead_code)]

use std::any::Any;
use std::sync::Arc;

use container::{injectable, Closure, Construct, Constructor, Injectable, Provide, Setter};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("container=debug")
        .with_test_writer()
        .try_init();
}

/// The contract the container hands out for `dyn ServiceA` requests.
pub trait ServiceA: Send + Sync + std::fmt::Debug {
    fn as_any(&self) -> &dyn Any;
    fn tag(&self) -> &'static str;
}
impl Injectable for dyn ServiceA {}

#[derive(Debug)]
pub struct ServiceC;
injectable!(ServiceC);
impl Construct for ServiceC {
    fn constructors() -> Vec<Constructor<Self>> {
        vec![|_| Ok(ServiceC)]
    }
}

#[derive(Debug)]
pub struct ServiceB {
    service_c: Arc<ServiceC>,
}

impl ServiceB {
    pub fn new(service_c: Arc<ServiceC>) -> Self {
        Self { service_c }
    }

    pub fn service_c(&self) -> &Arc<ServiceC> {
        &self.service_c
    }
}

injectable!(ServiceB);
impl Construct for ServiceB {
    fn constructors() -> Vec<Constructor<Self>> {
        vec![|c| Ok(ServiceB::new(c.get::<ServiceC>()?))]
    }
}

impl ServiceA for ServiceB {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn tag(&self) -> &'static str {
        "ServiceB"
    }
}

impl Provide<dyn ServiceA> for ServiceB {
    fn provide(this: Arc<Self>) -> Arc<dyn ServiceA> {
        this
    }
}

pub struct ServiceF;

impl ServiceF {
    pub fn test(&self) -> &'static str {
        "Hello world!"
    }
}

injectable!(ServiceF);
impl Construct for ServiceF {
    fn constructors() -> Vec<Constructor<Self>> {
        vec![|_| Ok(ServiceF)]
    }
}

/// Setter-injected slot, populated after construction.
pub struct ServiceE {
    service_f: Option<Arc<ServiceF>>,
}

impl ServiceE {
    pub fn service_f(&self) -> Option<&Arc<ServiceF>> {
        self.service_f.as_ref()
    }
}

injectable!(ServiceE);
impl Construct for ServiceE {
    fn constructors() -> Vec<Constructor<Self>> {
        vec![|_| Ok(ServiceE { service_f: None })]
    }

    fn setters() -> Vec<Setter<Self>> {
        vec![|value, c| {
            value.service_f = Some(c.get::<ServiceF>()?);
            Ok(())
        }]
    }
}

/// Transitively setter-injected: its slot's type has a setter slot itself.
pub struct ServiceH {
    service_e: Option<Arc<ServiceE>>,
}

impl ServiceH {
    pub fn service_e(&self) -> Option<&Arc<ServiceE>> {
        self.service_e.as_ref()
    }
}

injectable!(ServiceH);
impl Construct for ServiceH {
    fn constructors() -> Vec<Constructor<Self>> {
        vec![|_| Ok(ServiceH { service_e: None })]
    }

    fn setters() -> Vec<Setter<Self>> {
        vec![|value, c| {
            value.service_e = Some(c.get::<ServiceE>()?);
            Ok(())
        }]
    }
}

/// Two constructors: the first always throws, the second resolves.
pub struct ServiceG {
    pub service_c: Arc<ServiceC>,
}

injectable!(ServiceG);
impl Construct for ServiceG {
    fn constructors() -> Vec<Constructor<Self>> {
        vec![
            |_| anyhow::bail!("invalid constructor"),
            |c| {
                Ok(ServiceG {
                    service_c: c.get::<ServiceC>()?,
                })
            },
        ]
    }
}

/// First candidate resolves a dependency and then fails; the resolved
/// dependency's lazy registration is expected to stick.
pub struct SideEffectful {
    pub via: &'static str,
}

injectable!(SideEffectful);
impl Construct for SideEffectful {
    fn constructors() -> Vec<Constructor<Self>> {
        vec![
            |c| {
                let _ = c.get::<ServiceC>()?;
                anyhow::bail!("fails after resolving ServiceC")
            },
            |_| Ok(SideEffectful { via: "second" }),
        ]
    }
}

/// Setter resolving an unregistered trait-object key: the failure must be
/// swallowed and the slot left at its default.
pub struct Fragile {
    pub missing: Option<Arc<dyn ServiceA>>,
}

injectable!(Fragile);
impl Construct for Fragile {
    fn constructors() -> Vec<Constructor<Self>> {
        vec![|_| Ok(Fragile { missing: None })]
    }

    fn setters() -> Vec<Setter<Self>> {
        vec![|value, c| {
            value.missing = Some(c.get::<dyn ServiceA>()?);
            Ok(())
        }]
    }
}

/// Closure type with an injected dependency of its own.
pub struct DummyClosure {
    service_c: Arc<ServiceC>,
}

impl DummyClosure {
    pub fn new(service_c: Arc<ServiceC>) -> Self {
        Self { service_c }
    }
}

injectable!(DummyClosure);
impl Construct for DummyClosure {
    fn constructors() -> Vec<Constructor<Self>> {
        vec![|c| Ok(DummyClosure::new(c.get::<ServiceC>()?))]
    }
}

impl Closure<dyn ServiceA> for DummyClosure {
    fn call(&self) -> anyhow::Result<Arc<dyn ServiceA>> {
        Ok(Arc::new(ServiceB::new(self.service_c.clone())))
    }
}

/// Marker type for transient-lifecycle checks.
pub struct Stamp;
injectable!(Stamp);
impl Construct for Stamp {
    fn constructors() -> Vec<Constructor<Self>> {
        vec![|_| Ok(Stamp)]
    }
}
