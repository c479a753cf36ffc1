//! [`Sale`]s aggregation by attributed [`Agent`].
//!
//! [`Agent`]: crate::domain::Agent
//! [`Sale`]: crate::domain::Sale

use std::collections::HashMap;

use itertools::Itertools as _;
use rust_decimal::Decimal;

use crate::{
    domain::{agent, property, sale, unit, Sale},
    read::commission::{LineItem, Summary, Totals},
};

/// Groups the provided [`Sale`]s by their attributed agent, folding each
/// group into a [`Summary`].
///
/// Sales without a resolvable agent ID are dropped from this view only.
/// The result is sorted descending by total commission; ties keep the
/// first-encountered agent order, so identical inputs always produce an
/// identical ordering.
#[must_use]
pub fn aggregate(sales: &[Sale]) -> Vec<Summary> {
    let mut order = Vec::new();
    let mut groups: HashMap<agent::Id, Summary> = HashMap::new();

    for sale in sales {
        let Some(agent) = &sale.agent else {
            continue;
        };

        let summary = groups.entry(agent.id.clone()).or_insert_with(|| {
            order.push(agent.id.clone());
            Summary {
                agent_id: agent.id.clone(),
                agent_name: agent.name.clone(),
                agent_email: agent.email.clone(),
                total_sales: 0,
                total_commission: Decimal::ZERO,
                total_paid: Decimal::ZERO,
                total_pending: Decimal::ZERO,
                sales: Vec::new(),
            }
        });

        summary.total_sales += 1;
        match sale.commission.status {
            sale::Status::Paid => {
                summary.total_paid += sale.commission.amount;
            }
            sale::Status::Pending => {
                summary.total_pending += sale.commission.amount;
            }
        }
        summary.total_commission =
            summary.total_paid + summary.total_pending;
        summary.sales.push(line_item(sale));
    }

    order
        .into_iter()
        .filter_map(|id| groups.remove(&id))
        .sorted_by(|a, b| b.total_commission.cmp(&a.total_commission))
        .collect()
}

/// Folds top-level [`Totals`] over all the provided [`Sale`]s, attributed or
/// not.
#[must_use]
pub fn totals(sales: &[Sale]) -> Totals {
    let mut paid = Decimal::ZERO;
    let mut pending = Decimal::ZERO;
    for sale in sales {
        match sale.commission.status {
            sale::Status::Paid => paid += sale.commission.amount,
            sale::Status::Pending => pending += sale.commission.amount,
        }
    }

    Totals {
        total_sales: sales.len(),
        total_commission: paid + pending,
        total_paid: paid,
        total_pending: pending,
    }
}

/// Builds a [`LineItem`] out of the provided [`Sale`].
fn line_item(sale: &Sale) -> LineItem {
    LineItem {
        property: sale
            .property
            .as_ref()
            .map_or_else(property::Name::unknown, |p| p.name.clone()),
        unit: sale
            .unit
            .as_ref()
            .map_or_else(unit::Name::unknown, |u| u.name.clone()),
        customer: sale.customer.clone(),
        date: sale.effective_date(),
        price: sale.price,
        percent: sale.commission.percent,
        amount: sale.commission.amount,
        status: sale.commission.status,
    }
}
