//! # View Module
//!
//! HTML assembly for the application.
//!
//! A [`View`] is a property map plus a set of pure fragment builders
//! (anchors, nav items, meta tags, CSS/JS includes, favicon, branding logo,
//! copyright, link-list columns). Controllers call builders to produce
//! fragments, write them into named properties, and finish with
//! [`View::render_page`], which assembles the full document from whatever
//! properties were set. Builders never touch the property map; `render_page`
//! is the only operation whose output leaves the view.
//!
//! Builder inputs arrive as small spec structs ([`AnchorSpec`],
//! [`JsInclude`], …) so call sites stay readable where the data has many
//! optional attributes.

mod core;

pub use core::{
    AnchorSpec, AssetPaths, CopyrightSpec, CssInclude, FaviconSpec, JsInclude, LogoSpec, View,
};
