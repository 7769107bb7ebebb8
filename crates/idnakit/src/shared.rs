//! Process wide context
//!
//! The first successful [`init`] wins; later calls return the same
//! context whatever configuration they pass.

use std::sync::OnceLock;

use idnakit_core::IdnaResult;
use parking_lot::Mutex;

use crate::config::IdnaConfig;
use crate::context::IdnaContext;

static SHARED: OnceLock<IdnaContext> = OnceLock::new();
static INIT: Mutex<()> = parking_lot::const_mutex(());

/// Build the shared context once. A failed build leaves it unset so a
/// later call may retry.
pub fn init(config: &IdnaConfig) -> IdnaResult<IdnaContext> {
    if let Some(ctx) = SHARED.get() {
        return Ok(ctx.clone());
    }
    let _guard = INIT.lock();
    if let Some(ctx) = SHARED.get() {
        return Ok(ctx.clone());
    }
    let ctx = IdnaContext::build(config)?;
    let _ = SHARED.set(ctx.clone());
    Ok(ctx)
}

pub fn try_get() -> Option<&'static IdnaContext> {
    SHARED.get()
}

/// # Panics
///
/// Panics if [`init`] has not succeeded yet.
pub fn get() -> &'static IdnaContext {
    match SHARED.get() {
        Some(ctx) => ctx,
        None => panic!("idnakit::shared::get called before init"),
    }
}
