//! Built-in controllers.
//!
//! Three controllers ship with the framework: [`ErrorController`] is the
//! fallback target every failed resolution redirects to and is never
//! directly routable; [`HomeController`] is the usual default page; and
//! [`BlogController`] demonstrates a multi-method controller with URL
//! parameters. Applications register their own controllers alongside these
//! through the [`ControllerRegistry`](crate::registry::ControllerRegistry).

mod blog;
mod error;
mod home;

pub use blog::BlogController;
pub use error::ErrorController;
pub use home::HomeController;
