//! [`Sale`] record normalization.

use std::collections::HashMap;

use common::{DateTime, Percent};
use rust_decimal::Decimal;
use serde::{de::IgnoredAny, Deserialize, Deserializer};
use tracing::warn;

use crate::{
    domain::{agent, property, sale, unit, Agent, Property, Sale, Unit},
    Config,
};

/// Normalizer of [`RawSale`]s into [`Sale`] records.
///
/// Normalization never fails: malformed fields are repaired into safe
/// defaults, so downstream aggregation operates on guaranteed-present data.
#[derive(Debug)]
pub struct Normalizer<'r> {
    /// [`Percent`] of the sale price a commission defaults to, whenever a
    /// sale carries no commission percentage at all.
    default_commission_percent: Percent,

    /// Roster of known [`Agent`]s, used to resolve display names when the
    /// reference embedded into a sale is incomplete.
    roster: HashMap<&'r str, &'r Agent>,
}

impl<'r> Normalizer<'r> {
    /// Creates a new [`Normalizer`] resolving agent names against the
    /// provided `roster`.
    ///
    /// An empty `roster` is fine: names then resolve from the sales
    /// themselves only.
    #[must_use]
    pub fn new(config: &Config, roster: &'r [Agent]) -> Self {
        Self {
            default_commission_percent: config.default_commission_percent,
            roster: roster.iter().map(|a| (a.id.as_ref(), a)).collect(),
        }
    }

    /// Normalizes the provided [`RawSale`] into a [`Sale`].
    #[must_use]
    pub fn normalize(&self, raw: RawSale) -> Sale {
        let RawSale {
            id,
            sale_date,
            created_at,
            sale_price,
            agent,
            property,
            unit,
            customer,
            commission,
        } = raw;

        let price = sale_price.unwrap_or_default();
        let price = if price < Decimal::ZERO {
            warn!(%price, "negative sale price, normalizing to zero");
            Decimal::ZERO
        } else {
            price
        };

        Sale {
            id: id.map(sale::Id::from),
            sale_date: resolve_datetime(sale_date),
            created_at: resolve_datetime(created_at).map(DateTime::coerce),
            price,
            agent: agent.and_then(|a| self.resolve_agent(a)),
            property: property.and_then(resolve_property),
            unit: unit.and_then(resolve_unit),
            customer: customer.and_then(|c| c.name.map(sale::CustomerName::from)),
            commission: self.resolve_commission(commission, price),
        }
    }

    /// Resolves the [`Agent`] out of the provided raw reference.
    ///
    /// [`None`] is returned whenever the reference carries no ID, leaving the
    /// sale unattributed.
    fn resolve_agent(&self, raw: RawAgent) -> Option<Agent> {
        let id = agent::Id::from(raw.id?);
        let key: &str = id.as_ref();
        let known = self.roster.get(key).copied();

        let name = raw
            .name
            .map(agent::Name::from)
            .or_else(|| known.map(|a| a.name.clone()))
            .unwrap_or_else(agent::Name::unknown);
        let email = raw
            .email
            .map(agent::Email::from)
            .or_else(|| known.and_then(|a| a.email.clone()));

        Some(Agent { id, name, email })
    }

    /// Resolves the [`sale::Commission`] of a sale with the provided `price`.
    ///
    /// An explicitly stated amount always wins; otherwise the amount derives
    /// from the stated percentage, or from the configured default percentage
    /// when no percentage is stated at all. An explicit percentage of `0` is
    /// valid and yields a zero commission.
    fn resolve_commission(
        &self,
        raw: Option<RawCommission>,
        price: Decimal,
    ) -> sale::Commission {
        let raw = raw.unwrap_or_default();

        let status = raw.status.as_deref().map_or(
            sale::Status::Pending,
            |s| {
                if s.eq_ignore_ascii_case("paid") {
                    sale::Status::Paid
                } else {
                    sale::Status::Pending
                }
            },
        );

        let percent = raw.percentage.map(|p| {
            Percent::new(p).unwrap_or_else(|| {
                warn!(
                    %p,
                    "commission percentage out of range, using the default",
                );
                self.default_commission_percent
            })
        });

        let (percent, amount) = match raw.amount {
            Some(a) if a >= Decimal::ZERO => (percent, a),
            Some(a) => {
                warn!(%a, "negative commission amount, normalizing to zero");
                (percent, Decimal::ZERO)
            }
            None => {
                let pct =
                    percent.unwrap_or(self.default_commission_percent);
                let amount =
                    price * Decimal::from(pct) / Decimal::ONE_HUNDRED;
                (Some(pct), amount)
            }
        };

        sale::Commission {
            percent,
            amount,
            status,
        }
    }
}

/// Resolves a [`DateTime`] out of the provided [`RawTimestamp`].
fn resolve_datetime(raw: Option<RawTimestamp>) -> Option<DateTime> {
    match raw? {
        RawTimestamp::Unix(ts) => {
            let dt = DateTime::from_unix_timestamp(ts);
            if dt.is_none() {
                warn!(ts, "out of range unix timestamp, dropping");
            }
            dt
        }
        RawTimestamp::Rfc3339(s) => match DateTime::from_rfc3339(&s) {
            Ok(dt) => Some(dt),
            Err(e) => {
                warn!(%e, "unparseable timestamp, dropping");
                None
            }
        },
    }
}

/// Resolves the [`Property`] out of the provided raw reference.
fn resolve_property(raw: RawReference) -> Option<Property> {
    let id = property::Id::from(raw.id?);
    let name = raw
        .name
        .map(property::Name::from)
        .unwrap_or_else(property::Name::unknown);
    Some(Property { id, name })
}

/// Resolves the [`Unit`] out of the provided raw reference.
fn resolve_unit(raw: RawReference) -> Option<Unit> {
    let id = unit::Id::from(raw.id?);
    let name = raw
        .name
        .map(unit::Name::from)
        .unwrap_or_else(unit::Name::unknown);
    Some(Unit { id, name })
}

/// Raw sale transaction of unknown shape, as returned by the sales data
/// source.
///
/// Every field deserializes leniently: a missing, `null` or wrongly-typed
/// value becomes [`None`] instead of failing the whole record.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawSale {
    /// ID of the sale.
    #[serde(deserialize_with = "lenient")]
    pub id: Option<String>,

    /// Timestamp when the sale was closed.
    #[serde(deserialize_with = "lenient")]
    pub sale_date: Option<RawTimestamp>,

    /// Timestamp when the sale was created in the source system.
    #[serde(deserialize_with = "lenient")]
    pub created_at: Option<RawTimestamp>,

    /// Price for which the property was sold.
    #[serde(deserialize_with = "lenient")]
    pub sale_price: Option<Decimal>,

    /// Reference to the agent the sale is attributed to.
    #[serde(deserialize_with = "lenient")]
    pub agent: Option<RawAgent>,

    /// Reference to the property the sale is about.
    #[serde(deserialize_with = "lenient")]
    pub property: Option<RawReference>,

    /// Reference to the unit within the property.
    #[serde(deserialize_with = "lenient")]
    pub unit: Option<RawReference>,

    /// Reference to the purchasing customer.
    #[serde(deserialize_with = "lenient")]
    pub customer: Option<RawReference>,

    /// Commission metadata of the sale.
    #[serde(deserialize_with = "lenient")]
    pub commission: Option<RawCommission>,
}

/// Raw reference to an agent embedded into a [`RawSale`].
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawAgent {
    /// ID of the agent.
    #[serde(deserialize_with = "lenient")]
    pub id: Option<String>,

    /// Display name of the agent.
    #[serde(deserialize_with = "lenient")]
    pub name: Option<String>,

    /// Email of the agent.
    #[serde(deserialize_with = "lenient")]
    pub email: Option<String>,
}

/// Raw reference to a named entity embedded into a [`RawSale`].
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawReference {
    /// ID of the referenced entity.
    #[serde(deserialize_with = "lenient")]
    pub id: Option<String>,

    /// Display name of the referenced entity.
    #[serde(deserialize_with = "lenient")]
    pub name: Option<String>,
}

/// Raw commission metadata embedded into a [`RawSale`].
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawCommission {
    /// Commission percentage of the sale price.
    #[serde(deserialize_with = "lenient")]
    pub percentage: Option<Decimal>,

    /// Explicitly stated commission amount.
    #[serde(deserialize_with = "lenient")]
    pub amount: Option<Decimal>,

    /// Payment status of the commission.
    #[serde(deserialize_with = "lenient")]
    pub status: Option<String>,
}

/// Timestamp of a [`RawSale`], accepted as either Unix seconds or an
/// [RFC 3339] string.
///
/// [RFC 3339]: https://tools.ietf.org/html/rfc3339
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum RawTimestamp {
    /// Unix timestamp in seconds.
    Unix(i64),

    /// [RFC 3339] formatted string.
    ///
    /// [RFC 3339]: https://tools.ietf.org/html/rfc3339
    Rfc3339(String),
}

/// Deserializes a `T`, swallowing any value `T` cannot be deserialized from
/// into [`None`].
fn lenient<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Lenient<T> {
        Value(T),
        Invalid(IgnoredAny),
    }

    Ok(match Lenient::<T>::deserialize(deserializer)? {
        Lenient::Value(v) => Some(v),
        Lenient::Invalid(_) => None,
    })
}

#[cfg(test)]
mod spec {
    use common::Percent;
    use rust_decimal::Decimal;
    use serde_json::json;

    use crate::{
        domain::{agent, property, sale, Agent},
        Config,
    };

    use super::{Normalizer, RawSale};

    fn decimal(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn raw(value: serde_json::Value) -> RawSale {
        serde_json::from_value(value).unwrap()
    }

    fn normalize(value: serde_json::Value) -> sale::Sale {
        Normalizer::new(&Config::default(), &[]).normalize(raw(value))
    }

    #[test]
    fn defaults_commission_to_five_percent_of_price() {
        let sale = normalize(json!({
            "id": "s1",
            "salePrice": 1_000_000,
        }));

        assert_eq!(sale.commission.amount, decimal("50000"));
        assert_eq!(
            sale.commission.percent,
            Some(Percent::new(decimal("5")).unwrap()),
        );
        assert_eq!(sale.commission.status, sale::Status::Pending);
    }

    #[test]
    fn explicit_zero_percentage_yields_zero_commission() {
        let sale = normalize(json!({
            "salePrice": 1_000_000,
            "commission": {"percentage": 0},
        }));

        assert_eq!(sale.commission.amount, Decimal::ZERO);
        assert_eq!(
            sale.commission.percent,
            Some(Percent::new(Decimal::ZERO).unwrap()),
        );
    }

    #[test]
    fn explicit_amount_wins_over_percentage() {
        let sale = normalize(json!({
            "salePrice": 1_000_000,
            "commission": {"percentage": 5, "amount": 12345},
        }));

        assert_eq!(sale.commission.amount, decimal("12345"));
    }

    #[test]
    fn paid_status_is_case_insensitive() {
        let paid = normalize(json!({"commission": {"status": "PAID"}}));
        assert_eq!(paid.commission.status, sale::Status::Paid);

        let pending = normalize(json!({"commission": {"status": "refunded"}}));
        assert_eq!(pending.commission.status, sale::Status::Pending);

        let absent = normalize(json!({}));
        assert_eq!(absent.commission.status, sale::Status::Pending);
    }

    #[test]
    fn malformed_price_normalizes_to_zero() {
        assert_eq!(normalize(json!({})).price, Decimal::ZERO);
        assert_eq!(normalize(json!({"salePrice": "garbage"})).price, Decimal::ZERO);
        assert_eq!(normalize(json!({"salePrice": -500})).price, Decimal::ZERO);
    }

    #[test]
    fn price_accepts_numbers_and_numeric_strings() {
        assert_eq!(normalize(json!({"salePrice": 800_000})).price, decimal("800000"));
        assert_eq!(normalize(json!({"salePrice": "800000"})).price, decimal("800000"));
    }

    #[test]
    fn agent_without_id_leaves_sale_unattributed() {
        let sale = normalize(json!({"agent": {"name": "Jane Doe"}}));
        assert_eq!(sale.agent, None);
    }

    #[test]
    fn agent_name_resolves_from_roster_then_fallback() {
        let roster = [Agent {
            id: agent::Id::from("a1".to_owned()),
            name: agent::Name::from("Jane Doe".to_owned()),
            email: Some(agent::Email::from("jane@example.com".to_owned())),
        }];
        let normalizer = Normalizer::new(&Config::default(), &roster);

        let known = normalizer.normalize(raw(json!({"agent": {"id": "a1"}})));
        let known = known.agent.unwrap();
        assert_eq!(known.name, agent::Name::from("Jane Doe".to_owned()));
        assert_eq!(
            known.email,
            Some(agent::Email::from("jane@example.com".to_owned())),
        );

        let embedded = normalizer
            .normalize(raw(json!({"agent": {"id": "a1", "name": "J. Doe"}})));
        assert_eq!(
            embedded.agent.unwrap().name,
            agent::Name::from("J. Doe".to_owned()),
        );

        let unknown = normalizer.normalize(raw(json!({"agent": {"id": "a2"}})));
        assert_eq!(unknown.agent.unwrap().name, agent::Name::unknown());
    }

    #[test]
    fn property_name_falls_back_to_unknown() {
        let sale = normalize(json!({"property": {"id": "p1"}}));
        assert_eq!(sale.property.unwrap().name, property::Name::unknown());
    }

    #[test]
    fn timestamps_accept_unix_and_rfc3339() {
        let unix = normalize(json!({"saleDate": 1_700_000_000}));
        assert_eq!(
            unix.sale_date.map(|d| d.unix_timestamp()),
            Some(1_700_000_000),
        );

        let rfc = normalize(json!({"saleDate": "2024-01-15T00:00:00Z"}));
        assert!(rfc.sale_date.is_some());

        let garbage = normalize(json!({"saleDate": "tomorrow"}));
        assert_eq!(garbage.sale_date, None);
    }

    #[test]
    fn effective_date_falls_back_to_created_at() {
        let sale = normalize(json!({"createdAt": 1_700_000_000}));
        assert_eq!(
            sale.effective_date().map(|d| d.unix_timestamp()),
            Some(1_700_000_000),
        );

        let dated = normalize(json!({
            "saleDate": 1_800_000_000,
            "createdAt": 1_700_000_000,
        }));
        assert_eq!(
            dated.effective_date().map(|d| d.unix_timestamp()),
            Some(1_800_000_000),
        );

        assert_eq!(normalize(json!({})).effective_date(), None);
    }

    #[test]
    fn wrongly_typed_fields_never_fail_the_record() {
        let sale = normalize(json!({
            "id": 42,
            "agent": "not an object",
            "property": [1, 2, 3],
            "commission": {"percentage": [], "status": 7},
            "salePrice": {"nested": true},
        }));

        assert_eq!(sale.id, None);
        assert_eq!(sale.agent, None);
        assert_eq!(sale.property, None);
        assert_eq!(sale.price, Decimal::ZERO);
        assert_eq!(sale.commission.status, sale::Status::Pending);
    }

    #[test]
    fn out_of_range_percentage_uses_the_default() {
        let sale = normalize(json!({
            "salePrice": 1000,
            "commission": {"percentage": 150},
        }));

        assert_eq!(
            sale.commission.percent,
            Some(Percent::new(decimal("5")).unwrap()),
        );
        assert_eq!(sale.commission.amount, decimal("50"));
    }
}
