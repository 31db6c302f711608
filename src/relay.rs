//! Single-slot hand-off of the captured call site from the logging call to
//! the Format Stage.
//!
//! The slot is not a queue: every [`set`] overwrites the previous value. That
//! is only correct while a log call runs capture → dispatch → format to
//! completion before the next log call starts, which holds for the synchronous
//! pipeline in this crate. Each thread owns its own slot, so log calls on
//! different threads never observe each other's call sites. The Format Stage
//! reads the slot without emptying it; the [`init`](crate::logger::init)
//! adapter clears it when its call returns.
//!
//! Producers that can attach the call site to the record itself should set
//! [`LogRecord::callsite`](crate::record::LogRecord::callsite) instead.

use std::cell::RefCell;

use crate::callsite::CallSite;

thread_local! {
    static SLOT: RefCell<Option<CallSite>> = const { RefCell::new(None) };
}

/// Store `callsite`, replacing whatever the slot held.
pub fn set(callsite: CallSite) {
    SLOT.with(|slot| *slot.borrow_mut() = Some(callsite));
}

/// Copy of the current value, leaving it in place.
pub fn get() -> Option<CallSite> {
    SLOT.with(|slot| slot.borrow().clone())
}

/// Remove and return the current value.
pub fn take() -> Option<CallSite> {
    SLOT.with(|slot| slot.borrow_mut().take())
}

pub fn clear() {
    SLOT.with(|slot| *slot.borrow_mut() = None);
}
