//! [`Sale`]s aggregation by [`Property`].
//!
//! [`Property`]: crate::domain::Property
//! [`Sale`]: crate::domain::Sale

use std::collections::HashMap;

use itertools::Itertools as _;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::{
    domain::{property, unit, Sale},
    read::distribution::{Entry, UnitEntry},
};

/// Output of the [`aggregate`] aggregation.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Output {
    /// Per-property [`Entry`]s, sorted descending by total value.
    pub entries: Vec<Entry>,

    /// Sum of the sale price over all the aggregated [`Sale`]s.
    pub grand_total: Decimal,
}

/// Groups the provided [`Sale`]s by their property, nesting a per-unit
/// breakdown into each group.
///
/// Sales without a resolvable property (or unit) fall into an
/// "Unknown Property" (or "Unknown Unit") bucket rather than being dropped,
/// so the distribution reflects all revenue. Percentages are shares of the
/// grand total sale value, rounded to one decimal, and `0` everywhere when
/// the grand total is `0`.
#[must_use]
pub fn aggregate(sales: &[Sale]) -> Output {
    let grand_total: Decimal = sales.iter().map(|s| s.price).sum();

    let mut order = Vec::new();
    let mut groups: HashMap<Option<property::Id>, Group> = HashMap::new();

    for sale in sales {
        let key = sale.property.as_ref().map(|p| p.id.clone());
        let group = groups.entry(key.clone()).or_insert_with(|| {
            order.push(key);
            Group {
                name: sale
                    .property
                    .as_ref()
                    .map_or_else(property::Name::unknown, |p| {
                        p.name.clone()
                    }),
                sales_count: 0,
                total_value: Decimal::ZERO,
                unit_order: Vec::new(),
                units: HashMap::new(),
            }
        });

        group.sales_count += 1;
        group.total_value += sale.price;

        let unit_key = sale.unit.as_ref().map(|u| u.id.clone());
        if !group.units.contains_key(&unit_key) {
            group.unit_order.push(unit_key.clone());
            let _ = group.units.insert(
                unit_key.clone(),
                UnitGroup {
                    name: sale
                        .unit
                        .as_ref()
                        .map_or_else(unit::Name::unknown, |u| u.name.clone()),
                    sales_count: 0,
                    total_value: Decimal::ZERO,
                },
            );
        }
        let unit_group =
            group.units.get_mut(&unit_key).expect("inserted above");
        unit_group.sales_count += 1;
        unit_group.total_value += sale.price;
    }

    let entries = order
        .into_iter()
        .filter_map(|key| {
            let group = groups.remove(&key)?;
            Some(group.into_entry(key, grand_total))
        })
        .sorted_by(|a, b| b.total_value.cmp(&a.total_value))
        .collect();

    Output {
        entries,
        grand_total,
    }
}

/// Accumulator of a single property group.
struct Group {
    /// Resolved name of the property.
    name: property::Name,

    /// Number of sales accumulated so far.
    sales_count: usize,

    /// Total sale value accumulated so far.
    total_value: Decimal,

    /// Unit keys in first-encountered order.
    unit_order: Vec<Option<unit::Id>>,

    /// Nested per-unit accumulators.
    units: HashMap<Option<unit::Id>, UnitGroup>,
}

impl Group {
    /// Finalizes this [`Group`] into an [`Entry`].
    fn into_entry(
        mut self,
        property_id: Option<property::Id>,
        grand_total: Decimal,
    ) -> Entry {
        let percentage = if grand_total.is_zero() {
            Decimal::ZERO
        } else {
            (self.total_value / grand_total * Decimal::ONE_HUNDRED)
                .round_dp(1)
        };

        let units = self
            .unit_order
            .into_iter()
            .filter_map(|key| {
                let unit = self.units.remove(&key)?;
                Some(UnitEntry {
                    unit_id: key,
                    unit_name: unit.name,
                    sales_count: unit.sales_count,
                    total_value: unit.total_value,
                })
            })
            .sorted_by(|a, b| b.total_value.cmp(&a.total_value))
            .collect();

        Entry {
            property_id,
            property_name: self.name,
            sales_count: self.sales_count,
            total_value: self.total_value,
            percentage,
            units,
        }
    }
}

/// Accumulator of a single unit group.
struct UnitGroup {
    /// Resolved name of the unit.
    name: unit::Name,

    /// Number of sales accumulated so far.
    sales_count: usize,

    /// Total sale value accumulated so far.
    total_value: Decimal,
}
