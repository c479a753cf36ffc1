//! Sales-and-commission analytics engine.
//!
//! Turns a flat list of raw sale transactions into three correlated
//! aggregate views: per-agent commission summaries, per-property sales
//! distribution and time-bucketed performance trends. Fetching, persisting
//! and rendering the data are collaborator concerns, not this crate's.
#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod domain;
pub mod filter;
pub mod normalize;
pub mod read;
pub mod report;

use common::Percent;
use rust_decimal::Decimal;
use smart_default::SmartDefault;
use tracerr::Traced;
use tracing::debug;

use crate::{
    domain::Agent,
    normalize::{Normalizer, RawSale},
};

pub use self::{filter::Filter, report::Output};

/// [`Engine`] configuration.
#[derive(Clone, Copy, Debug, SmartDefault)]
pub struct Config {
    /// [`Percent`] of the sale price a commission defaults to, whenever a
    /// sale states no commission percentage at all.
    #[default(Percent::new(Decimal::from(5)).expect("valid percent"))]
    pub default_commission_percent: Percent,
}

/// Sales-and-commission analytics engine.
///
/// A pure, synchronous transformation: the same inputs always yield the same
/// [`Output`], byte for byte. An [`Engine`] holds no mutable state between
/// runs, so a single instance may serve concurrent callers freely.
#[derive(Clone, Copy, Debug, Default)]
pub struct Engine {
    /// Configuration of this [`Engine`].
    config: Config,
}

impl Engine {
    /// Creates a new [`Engine`] with the provided [`Config`].
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Returns [`Config`] of this [`Engine`].
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Runs the full aggregation over the provided raw `sales`.
    ///
    /// The `roster` resolves agent display names when the references
    /// embedded into sales are incomplete; it may be empty.
    ///
    /// # Errors
    ///
    /// With a [`filter::InvalidError`] if the `filter` violates the caller
    /// contract. Dirty data never errors: malformed records normalize into
    /// safe defaults instead, and an empty filtered set produces empty but
    /// well-typed aggregates.
    pub fn execute(
        &self,
        sales: Vec<RawSale>,
        roster: &[Agent],
        filter: &Filter,
    ) -> Result<Output, Traced<filter::InvalidError>> {
        filter.validate().map_err(tracerr::wrap!())?;

        let normalizer = Normalizer::new(&self.config, roster);
        let sales = sales
            .into_iter()
            .map(|s| normalizer.normalize(s))
            .collect::<Vec<_>>();
        let sales = filter.apply(sales);
        debug!(sales = sales.len(), "aggregating filtered sales");

        Ok(Output {
            agent_commissions: report::commissions::aggregate(&sales),
            totals: report::commissions::totals(&sales),
            property_distribution: report::distribution::aggregate(&sales),
            trends: report::trends::aggregate(
                &sales,
                filter.date_range.as_ref(),
            ),
        })
    }
}
