//! # Model Module
//!
//! The base model for the application.
//!
//! A [`Model`] owns one [`Storage`](crate::storage::Storage) adapter plus its
//! collaborators: a [`Logger`](crate::logger::Logger), an optional
//! [`Database`] handle, a [`KeyGenerator`](crate::keygen::KeyGenerator), and
//! an optional [`Mailer`](crate::email::Mailer). Construction eagerly loads
//! every matching data file from the configured directory, so controllers can
//! assume records are present by the time they run. Nothing is cached across
//! requests; each dispatch builds a fresh model.

mod core;

pub use core::{Database, Model};
pub(crate) use core::strip_tags;
