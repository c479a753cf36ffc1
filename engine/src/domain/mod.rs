//! Domain definitions.

pub mod agent;
pub mod property;
pub mod sale;
pub mod unit;

pub use self::{agent::Agent, property::Property, sale::Sale, unit::Unit};
