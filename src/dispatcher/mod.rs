//! # Dispatcher Module
//!
//! The front controller.
//!
//! [`Application`] runs the whole dispatch pipeline during construction:
//! normalize the raw `url` query value into [`RouteSegments`], resolve the
//! controller and method, resolve parameters, invoke, and keep the rendered
//! body on a [`DispatchOutcome`]. Recoverable dispatch failures do not
//! unwind; the in-progress target is overwritten with the error controller
//! and dispatch continues from there, logging exactly one line per fallback.

mod core;

pub use core::{
    Application, DispatchOutcome, DispatchTarget, RouteSegments, DEFAULT_METHOD,
    EXCLUDED_CONTROLLER_DIR, PARAM_INDEX_START, RESERVED_ERROR_CONTROLLER,
};
