//! Per-[`Agent`] commission read models.
//!
//! [`Agent`]: crate::domain::Agent

use common::{DateTime, Percent};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::{agent, property, sale, unit};
#[cfg(doc)]
use crate::domain::{Agent, Sale};

/// Commission summary of a single [`Agent`].
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// ID of the [`Agent`] this [`Summary`] is about.
    pub agent_id: agent::Id,

    /// Name of the [`Agent`].
    pub agent_name: agent::Name,

    /// Email of the [`Agent`], if known.
    pub agent_email: Option<agent::Email>,

    /// Number of [`Sale`]s attributed to the [`Agent`].
    ///
    /// Always equals the length of [`sales`].
    ///
    /// [`sales`]: Self::sales
    pub total_sales: usize,

    /// Total commission of the [`Agent`].
    ///
    /// Always equals [`total_paid`] plus [`total_pending`], exactly.
    ///
    /// [`total_paid`]: Self::total_paid
    /// [`total_pending`]: Self::total_pending
    pub total_commission: Decimal,

    /// Paid-out part of [`total_commission`].
    ///
    /// [`total_commission`]: Self::total_commission
    pub total_paid: Decimal,

    /// Still-owed part of [`total_commission`].
    ///
    /// [`total_commission`]: Self::total_commission
    pub total_pending: Decimal,

    /// Per-[`Sale`] line items, in the order the sales were encountered.
    pub sales: Vec<LineItem>,
}

/// Single [`Sale`] line item in a [`Summary`].
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Name of the sold property.
    pub property: property::Name,

    /// Name of the sold unit.
    pub unit: unit::Name,

    /// Name of the purchasing customer.
    pub customer: Option<sale::CustomerName>,

    /// Effective date of the sale.
    pub date: Option<DateTime>,

    /// Price for which the property was sold.
    pub price: Decimal,

    /// Commission percentage the amount was derived from, if any.
    pub percent: Option<Percent>,

    /// Commission amount of the sale.
    pub amount: Decimal,

    /// Payment status of the commission.
    pub status: sale::Status,
}

/// Top-level totals over a whole filtered [`Sale`] collection, attributed or
/// not.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    /// Number of [`Sale`]s in the collection.
    pub total_sales: usize,

    /// Total commission over the collection.
    pub total_commission: Decimal,

    /// Paid-out part of [`total_commission`].
    ///
    /// [`total_commission`]: Self::total_commission
    pub total_paid: Decimal,

    /// Still-owed part of [`total_commission`].
    ///
    /// [`total_commission`]: Self::total_commission
    pub total_pending: Decimal,
}
