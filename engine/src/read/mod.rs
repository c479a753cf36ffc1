//! Read models derived from [`Sale`] collections.
//!
//! All of them are recomputed from scratch on every [`Engine`] run and carry
//! no identity or persistence of their own.
//!
//! [`Engine`]: crate::Engine
//! [`Sale`]: crate::domain::Sale

pub mod commission;
pub mod distribution;
pub mod trend;
