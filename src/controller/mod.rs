//! # Controller Module
//!
//! The [`Controller`] trait is the dispatch seam: the front controller
//! resolves a name to a boxed controller via the registry, validates the
//! requested method against [`Controller::methods`], and calls
//! [`Controller::invoke`] with the URL-derived parameter list. Rendering is
//! the invocation's effect; the returned string is the assembled page body.
//!
//! [`PageController`] is the shared base concrete controllers embed. It holds
//! exactly one [`Model`](crate::model::Model) and one
//! [`View`](crate::view::View), set once at construction, and provides the
//! templating-glue helpers that translate model records into view
//! properties (head metadata, includes, navigation, branding, footer).

mod core;

pub use core::{current_year, Controller, PageController};
