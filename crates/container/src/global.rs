//! Process-wide container accessor.
//!
//! A deliberate convenience for binary start-up code that genuinely needs
//! one shared container: constructed once on first access, never torn down.
//! Library code should take a `&Container` (or an owned one) instead of
//! reaching for ambient state; nothing inside this crate consults the
//! global.

use once_cell::sync::Lazy;

use crate::container::Container;

static GLOBAL: Lazy<Container> = Lazy::new(Container::new);

/// The process-wide container. First call constructs it with lazy
/// self-definition enabled; there is no way to replace or drop it.
pub fn global() -> &'static Container {
    &GLOBAL
}
