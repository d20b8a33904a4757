//! # cronhub-notify
//!
//! SMTP delivery for failure notifications. [`SmtpNotifier`] implements
//! the [`Notifier`] trait over lettre's async transport; message
//! rendering lives in [`message`] so it can be tested without a server.
//!
//! [`Notifier`]: cronhub_core::traits::notify::Notifier

pub mod message;
pub mod smtp;

pub use smtp::SmtpNotifier;
