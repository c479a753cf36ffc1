//! [`Sale`] record definitions.

use common::{define_kind, unit::Creation, DateTime, DateTimeOf, Percent};
use derive_more::{AsRef, Display, From, Into};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::{Agent, Property, Unit};

/// Normalized sale transaction.
///
/// Every [`Sale`] comes out of the [`Normalizer`] with its numeric fields
/// defaulted and its [`Commission`] fully resolved, so aggregation never
/// branches on missing data.
///
/// [`Normalizer`]: crate::normalize::Normalizer
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Sale {
    /// ID of this [`Sale`], if the source supplied one.
    pub id: Option<Id>,

    /// [`DateTime`] when this [`Sale`] was closed.
    pub sale_date: Option<DateTime>,

    /// [`DateTime`] when this [`Sale`] was created in the source system.
    pub created_at: Option<CreationDateTime>,

    /// Price for which the property was sold.
    ///
    /// Never negative; a missing or unparseable price normalizes to `0`.
    pub price: Decimal,

    /// [`Agent`] this [`Sale`] is attributed to.
    ///
    /// [`None`] means the sale carries no resolvable agent ID, excluding it
    /// from agent-keyed aggregates only.
    pub agent: Option<Agent>,

    /// [`Property`] this [`Sale`] refers to.
    pub property: Option<Property>,

    /// [`Unit`] within the [`Property`] this [`Sale`] refers to.
    pub unit: Option<Unit>,

    /// Name of the purchasing customer.
    pub customer: Option<CustomerName>,

    /// Resolved [`Commission`] of this [`Sale`].
    pub commission: Commission,
}

impl Sale {
    /// Returns the effective [`DateTime`] of this [`Sale`]: its
    /// [`sale_date`], falling back to [`created_at`].
    ///
    /// [`created_at`]: Self::created_at
    /// [`sale_date`]: Self::sale_date
    #[must_use]
    pub fn effective_date(&self) -> Option<DateTime> {
        self.sale_date
            .or_else(|| self.created_at.map(DateTimeOf::coerce))
    }
}

/// ID of a [`Sale`].
#[derive(
    AsRef, Clone, Debug, Display, Eq, From, Hash, Into, PartialEq, Serialize,
)]
#[as_ref(str, String)]
pub struct Id(String);

/// [`DateTime`] when a [`Sale`] was created in the source system.
pub type CreationDateTime = DateTimeOf<Creation>;

/// Name of the customer who purchased a [`Sale`].
#[derive(AsRef, Clone, Debug, Display, Eq, From, Into, PartialEq, Serialize)]
#[as_ref(str, String)]
pub struct CustomerName(String);

/// Commission owed to an [`Agent`] for a [`Sale`], resolved by the
/// [`Normalizer`].
///
/// [`Normalizer`]: crate::normalize::Normalizer
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct Commission {
    /// [`Percent`] of the sale price this [`Commission`] was derived from.
    ///
    /// [`None`] means the source stated the [`amount`] directly without any
    /// percentage.
    ///
    /// [`amount`]: Self::amount
    pub percent: Option<Percent>,

    /// Monetary amount of this [`Commission`].
    pub amount: Decimal,

    /// Payment [`Status`] of this [`Commission`].
    pub status: Status,
}

define_kind! {
    #[doc = "Payment status of a [`Commission`]."]
    enum Status {
        #[doc = "The commission has been paid out to the agent."]
        Paid = 1,

        #[doc = "The commission is still owed to the agent."]
        Pending = 2,
    }
}
