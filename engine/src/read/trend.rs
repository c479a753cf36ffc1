//! Time-bucketed performance trend read models.

use std::collections::BTreeMap;

use common::YearMonth;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::agent;
#[cfg(doc)]
use crate::domain::{Agent, Sale};

/// Aggregated [`Sale`]s of a single calendar month.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyEntry {
    /// [`YearMonth`] this [`MonthlyEntry`] is about.
    pub month: YearMonth,

    /// Human-readable label of the month, like `January 2024`.
    pub label: String,

    /// Number of [`Sale`]s within the month.
    pub sales_count: usize,

    /// Total sale value within the month.
    pub sales_value: Decimal,

    /// Per-[`Agent`] [`Activity`] within the month.
    ///
    /// Only agents active in the month appear here; unattributed sales are
    /// counted in the month totals but not in this mapping.
    pub by_agent: BTreeMap<agent::Id, Activity>,
}

/// [`Sale`]s of a single [`Agent`] within a single month.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    /// Number of [`Sale`]s.
    pub sales_count: usize,

    /// Total sale value.
    pub sales_value: Decimal,
}

/// Month-by-month performance of a single [`Agent`] over the whole reported
/// span.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentEntry {
    /// ID of the [`Agent`] this [`AgentEntry`] is about.
    pub agent_id: agent::Id,

    /// Name of the [`Agent`].
    pub agent_name: agent::Name,

    /// Number of [`Sale`]s over the whole span.
    pub total_sales: usize,

    /// Total sale value over the whole span.
    pub total_value: Decimal,

    /// Month-ordered series covering every reported month.
    ///
    /// Always exactly as long as the reported months list: months without
    /// any activity from the [`Agent`] are present zero-filled, not omitted.
    pub monthly_sales: Vec<MonthlySales>,
}

/// Single month in the series of an [`AgentEntry`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySales {
    /// [`YearMonth`] this entry is about.
    pub month: YearMonth,

    /// Number of [`Sale`]s within the month.
    pub sales_count: usize,

    /// Total sale value within the month.
    pub sales_value: Decimal,
}
