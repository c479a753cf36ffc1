//! Report aggregations over filtered [`Sale`] collections.
//!
//! All three aggregations run independently over the same filtered set and
//! are composed into a single [`Output`] by [`Engine::execute`].
//!
//! [`Engine::execute`]: crate::Engine::execute
//! [`Sale`]: crate::domain::Sale

pub mod commissions;
pub mod distribution;
pub mod trends;

use serde::Serialize;

use crate::read;

/// Composed result of a full [`Engine`] run.
///
/// [`Engine`]: crate::Engine
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Output {
    /// Per-agent commission summaries.
    pub agent_commissions: Vec<read::commission::Summary>,

    /// Top-level totals over the whole filtered set.
    pub totals: read::commission::Totals,

    /// Per-property sales distribution.
    pub property_distribution: distribution::Output,

    /// Time-bucketed performance trends.
    pub trends: trends::Output,
}
