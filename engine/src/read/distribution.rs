//! Per-[`Property`] sales distribution read models.
//!
//! [`Property`]: crate::domain::Property

use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::{property, unit};
#[cfg(doc)]
use crate::domain::{Property, Sale, Unit};

/// Sales distribution of a single [`Property`].
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    /// ID of the [`Property`] this [`Entry`] is about.
    ///
    /// [`None`] is the bucket of [`Sale`]s without any resolvable property.
    pub property_id: Option<property::Id>,

    /// Name of the [`Property`].
    pub property_name: property::Name,

    /// Number of [`Sale`]s of the [`Property`].
    pub sales_count: usize,

    /// Total sale value of the [`Property`].
    pub total_value: Decimal,

    /// Share of the grand total sale value, in percent rounded to one
    /// decimal.
    ///
    /// `0` for every [`Entry`] when the grand total is `0`.
    pub percentage: Decimal,

    /// Nested per-[`Unit`] breakdown.
    pub units: Vec<UnitEntry>,
}

/// Sales distribution of a single [`Unit`] within an [`Entry`].
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitEntry {
    /// ID of the [`Unit`] this [`UnitEntry`] is about.
    ///
    /// [`None`] is the bucket of [`Sale`]s without any resolvable unit.
    pub unit_id: Option<unit::Id>,

    /// Name of the [`Unit`].
    pub unit_name: unit::Name,

    /// Number of [`Sale`]s of the [`Unit`].
    pub sales_count: usize,

    /// Total sale value of the [`Unit`].
    pub total_value: Decimal,
}
