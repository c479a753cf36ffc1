//! [`Sale`]s aggregation by calendar month and [`Agent`].
//!
//! [`Agent`]: crate::domain::Agent
//! [`Sale`]: crate::domain::Sale

use std::collections::{BTreeMap, HashMap};

use common::YearMonth;
use itertools::Itertools as _;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::{
    domain::{agent, Sale},
    filter::DateRange,
    read::trend::{Activity, AgentEntry, MonthlyEntry, MonthlySales},
};

/// Output of the [`aggregate`] aggregation.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct Output {
    /// Per-month entries covering every calendar month of the range,
    /// ascending.
    pub months: Vec<MonthlyEntry>,

    /// Per-agent series, sorted descending by total value.
    ///
    /// Every series is exactly as long as [`months`].
    ///
    /// [`months`]: Self::months
    pub agents: Vec<AgentEntry>,
}

/// Buckets the provided [`Sale`]s by calendar month and, within each month,
/// by attributed agent.
///
/// The month series spans every calendar month of the provided range,
/// zero-filled: a month (or an agent-month combination) without any activity
/// is present with zero count and value, never omitted.
///
/// Without a range this view is meaningless, so [`None`] produces an empty
/// [`Output`] while the other aggregations remain valid.
#[must_use]
pub fn aggregate(sales: &[Sale], range: Option<&DateRange>) -> Output {
    let Some(range) = range else {
        return Output::default();
    };

    // Pre-fill the whole month span of the range, so zero-activity months
    // are present from the start. A reversed range spans no months at all,
    // yielding an empty `Output` in bounded time.
    let mut months: BTreeMap<YearMonth, MonthGroup> = BTreeMap::new();
    let last = YearMonth::from(range.end);
    let mut ym = YearMonth::from(range.start);
    while ym <= last {
        let _ = months.insert(ym, MonthGroup::default());
        ym = ym.next();
    }

    let mut agent_order = Vec::new();
    let mut agent_names: HashMap<agent::Id, agent::Name> = HashMap::new();

    for sale in sales {
        let Some(date) = sale.effective_date() else {
            continue;
        };
        if !range.contains(date) {
            continue;
        }

        let group = months
            .get_mut(&YearMonth::from(date))
            .expect("month span covers the range");
        group.sales_count += 1;
        group.sales_value += sale.price;

        if let Some(agent) = &sale.agent {
            let activity =
                group.by_agent.entry(agent.id.clone()).or_default();
            activity.sales_count += 1;
            activity.sales_value += sale.price;

            if !agent_names.contains_key(&agent.id) {
                agent_order.push(agent.id.clone());
                let _ =
                    agent_names.insert(agent.id.clone(), agent.name.clone());
            }
        }
    }

    let months = months
        .into_iter()
        .map(|(month, group)| MonthlyEntry {
            month,
            label: month.label(),
            sales_count: group.sales_count,
            sales_value: group.sales_value,
            by_agent: group.by_agent,
        })
        .collect::<Vec<_>>();

    let agents = agent_order
        .into_iter()
        .map(|id| {
            let monthly_sales = months
                .iter()
                .map(|m| {
                    let activity =
                        m.by_agent.get(&id).copied().unwrap_or_default();
                    MonthlySales {
                        month: m.month,
                        sales_count: activity.sales_count,
                        sales_value: activity.sales_value,
                    }
                })
                .collect::<Vec<_>>();

            AgentEntry {
                agent_name: agent_names
                    .remove(&id)
                    .expect("recorded alongside the order"),
                agent_id: id,
                total_sales: monthly_sales
                    .iter()
                    .map(|m| m.sales_count)
                    .sum(),
                total_value: monthly_sales
                    .iter()
                    .map(|m| m.sales_value)
                    .sum(),
                monthly_sales,
            }
        })
        .sorted_by(|a, b| b.total_value.cmp(&a.total_value))
        .collect();

    Output { months, agents }
}

/// Accumulator of a single month bucket.
#[derive(Default)]
struct MonthGroup {
    /// Number of sales accumulated so far.
    sales_count: usize,

    /// Total sale value accumulated so far.
    sales_value: Decimal,

    /// Nested per-agent activity.
    by_agent: BTreeMap<agent::Id, Activity>,
}

#[cfg(test)]
mod spec {
    use common::{DateTime, YearMonth};
    use rust_decimal::Decimal;

    use crate::{
        domain::{agent, sale, Agent, Sale},
        filter::DateRange,
    };

    use super::aggregate;

    fn decimal(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn date(s: &str) -> DateTime {
        DateTime::from_rfc3339(s).unwrap()
    }

    fn range(start: &str, end: &str) -> DateRange {
        DateRange {
            start: date(start),
            end: date(end),
        }
    }

    fn sale(agent_id: Option<&str>, sale_date: &str, price: &str) -> Sale {
        Sale {
            id: None,
            sale_date: Some(date(sale_date)),
            created_at: None,
            price: decimal(price),
            agent: agent_id.map(|id| Agent {
                id: agent::Id::from(id.to_owned()),
                name: agent::Name::from(format!("Agent {id}")),
                email: None,
            }),
            property: None,
            unit: None,
            customer: None,
            commission: sale::Commission {
                percent: None,
                amount: Decimal::ZERO,
                status: sale::Status::Pending,
            },
        }
    }

    #[test]
    fn zero_fills_months_without_activity() {
        let sales = vec![
            sale(Some("x"), "2024-01-10T00:00:00Z", "100"),
            sale(Some("x"), "2024-03-20T00:00:00Z", "300"),
        ];
        let range = range("2024-01-01T00:00:00Z", "2024-03-31T23:59:59Z");

        let output = aggregate(&sales, Some(&range));
        assert_eq!(output.months.len(), 3);

        let feb = &output.months[1];
        assert_eq!(feb.month, YearMonth::new(2024, 2).unwrap());
        assert_eq!(feb.label, "February 2024");
        assert_eq!(feb.sales_count, 0);
        assert_eq!(feb.sales_value, Decimal::ZERO);
        assert!(feb.by_agent.is_empty());
    }

    #[test]
    fn every_agent_series_spans_every_month() {
        let sales = vec![
            sale(Some("x"), "2024-01-10T00:00:00Z", "100"),
            sale(Some("y"), "2024-03-20T00:00:00Z", "300"),
        ];
        let range = range("2024-01-01T00:00:00Z", "2024-03-31T23:59:59Z");

        let output = aggregate(&sales, Some(&range));
        for entry in &output.agents {
            assert_eq!(entry.monthly_sales.len(), output.months.len());
        }

        let x = output
            .agents
            .iter()
            .find(|a| a.agent_id == agent::Id::from("x".to_owned()))
            .unwrap();
        assert_eq!(x.monthly_sales[0].sales_count, 1);
        assert_eq!(x.monthly_sales[1].sales_count, 0);
        assert_eq!(x.monthly_sales[1].sales_value, Decimal::ZERO);
        assert_eq!(x.monthly_sales[2].sales_count, 0);
    }

    #[test]
    fn months_are_ascending_and_span_years() {
        let sales = vec![];
        let range = range("2023-11-01T00:00:00Z", "2024-02-28T23:59:59Z");

        let output = aggregate(&sales, Some(&range));
        let months = output
            .months
            .iter()
            .map(|m| m.month.to_string())
            .collect::<Vec<_>>();
        assert_eq!(months, vec!["2023-11", "2023-12", "2024-01", "2024-02"]);
    }

    #[test]
    fn agents_sort_descending_by_total_value() {
        let sales = vec![
            sale(Some("low"), "2024-01-10T00:00:00Z", "100"),
            sale(Some("high"), "2024-01-11T00:00:00Z", "900"),
        ];
        let range = range("2024-01-01T00:00:00Z", "2024-01-31T23:59:59Z");

        let output = aggregate(&sales, Some(&range));
        let ids = output
            .agents
            .iter()
            .map(|a| a.agent_id.clone())
            .collect::<Vec<_>>();
        assert_eq!(
            ids,
            vec![
                agent::Id::from("high".to_owned()),
                agent::Id::from("low".to_owned()),
            ],
        );
    }

    #[test]
    fn unattributed_sales_count_in_month_totals_only() {
        let sales = vec![sale(None, "2024-01-10T00:00:00Z", "100")];
        let range = range("2024-01-01T00:00:00Z", "2024-01-31T23:59:59Z");

        let output = aggregate(&sales, Some(&range));
        assert_eq!(output.months[0].sales_count, 1);
        assert_eq!(output.months[0].sales_value, decimal("100"));
        assert!(output.months[0].by_agent.is_empty());
        assert_eq!(output.agents, vec![]);
    }

    #[test]
    fn reversed_range_returns_empty_output() {
        let sales = vec![sale(Some("x"), "2024-02-10T00:00:00Z", "100")];
        let range = range("2024-03-01T00:00:00Z", "2024-01-31T23:59:59Z");

        let output = aggregate(&sales, Some(&range));
        assert_eq!(output.months, vec![]);
        assert_eq!(output.agents, vec![]);
    }

    #[test]
    fn missing_range_produces_empty_output() {
        let sales = vec![sale(Some("x"), "2024-01-10T00:00:00Z", "100")];

        let output = aggregate(&sales, None);
        assert_eq!(output.months, vec![]);
        assert_eq!(output.agents, vec![]);
    }
}
