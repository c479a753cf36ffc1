//! [`Sale`] collection filtering.

use common::{define_kind, DateTime};
use derive_more::{Display, Error};
use smart_default::SmartDefault;
use tracerr::Traced;

use crate::domain::{agent, sale, Sale};
#[cfg(doc)]
use crate::domain::Agent;

/// Filter narrowing down a [`Sale`] collection.
///
/// All the supplied criteria apply as a conjunction, and the result preserves
/// the input order.
#[derive(Clone, Debug, SmartDefault)]
pub struct Filter {
    /// Inclusive [`DateRange`] the effective date of a [`Sale`] must fall
    /// within.
    ///
    /// A [`Sale`] without any resolvable date is excluded whenever a range is
    /// supplied.
    pub date_range: Option<DateRange>,

    /// IDs of [`Agent`]s to keep the sales of.
    ///
    /// An empty list means no agent filtering at all.
    pub agent_ids: Vec<agent::Id>,

    /// Commission [`PaymentStatus`] to keep the sales with.
    #[default(PaymentStatus::All)]
    pub payment_status: PaymentStatus,
}

impl Filter {
    /// Validates this [`Filter`].
    ///
    /// # Errors
    ///
    /// With an [`InvalidError`] if the [`Filter`] violates the caller
    /// contract, indicating a programmer error rather than dirty data.
    pub fn validate(&self) -> Result<(), Traced<InvalidError>> {
        if let Some(range) = &self.date_range {
            if range.start > range.end {
                return Err(tracerr::new!(InvalidError::ReversedDateRange {
                    start: range.start,
                    end: range.end,
                }));
            }
        }
        Ok(())
    }

    /// Applies this [`Filter`] to the provided [`Sale`]s.
    #[must_use]
    pub fn apply(&self, sales: Vec<Sale>) -> Vec<Sale> {
        sales.into_iter().filter(|s| self.keeps(s)).collect()
    }

    /// Indicates whether this [`Filter`] keeps the provided [`Sale`].
    fn keeps(&self, sale: &Sale) -> bool {
        if let Some(range) = &self.date_range {
            if !sale.effective_date().is_some_and(|d| range.contains(d)) {
                return false;
            }
        }

        if !self.agent_ids.is_empty()
            && !sale
                .agent
                .as_ref()
                .is_some_and(|a| self.agent_ids.contains(&a.id))
        {
            return false;
        }

        match self.payment_status {
            PaymentStatus::All => true,
            PaymentStatus::Paid => {
                sale.commission.status == sale::Status::Paid
            }
            PaymentStatus::Unpaid => {
                sale.commission.status != sale::Status::Paid
            }
        }
    }
}

/// Inclusive range of [`DateTime`]s.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DateRange {
    /// Start of the range, inclusive.
    pub start: DateTime,

    /// End of the range, inclusive.
    pub end: DateTime,
}

impl DateRange {
    /// Indicates whether the provided [`DateTime`] falls within this
    /// [`DateRange`].
    #[must_use]
    pub fn contains(&self, dt: DateTime) -> bool {
        self.start <= dt && dt <= self.end
    }
}

define_kind! {
    #[doc = "Commission payment status criterion of a [`Filter`]."]
    enum PaymentStatus {
        #[doc = "Keep every sale regardless of its commission status."]
        All = 1,

        #[doc = "Keep only sales whose commission is paid out."]
        Paid = 2,

        #[doc = "Keep sales whose commission is anything but paid out."]
        Unpaid = 3,
    }
}

/// Error of validating a [`Filter`].
#[derive(Clone, Copy, Debug, Display, Error)]
pub enum InvalidError {
    /// [`DateRange`] of the [`Filter`] starts after it ends.
    #[display(
        "date range starts at `{}` after it ends at `{}`",
        start.to_rfc3339(),
        end.to_rfc3339()
    )]
    ReversedDateRange {
        /// Start of the reversed range.
        start: DateTime,

        /// End of the reversed range.
        end: DateTime,
    },
}
