//! Date and time utilities.

use std::{cmp::Ordering, fmt, marker::PhantomData};

use derive_more::{Debug, Display, Error};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use time::{format_description::well_known::Rfc3339, Month, UtcOffset};

/// Untyped date and time.
pub type DateTime = DateTimeOf;

/// UTC date and time.
#[derive(Debug)]
pub struct DateTimeOf<Of: ?Sized = ()> {
    /// Inner representation of the date and time.
    inner: time::OffsetDateTime,

    /// Type parameter describing the kind of date and time.
    #[debug(skip)]
    _of: PhantomData<Of>,
}

impl<Of: ?Sized> DateTimeOf<Of> {
    /// A [`DateTime`] representing the Unix epoch.
    pub const UNIX_EPOCH: Self = Self {
        inner: time::OffsetDateTime::UNIX_EPOCH,
        _of: PhantomData,
    };

    /// Creates a new [`DateTime`] from the provided [`UNIX_EPOCH`] timestamp.
    ///
    /// [`None`] is returned if the timestamp is invalid.
    ///
    /// [`UNIX_EPOCH`]: Self::UNIX_EPOCH
    #[must_use]
    pub fn from_unix_timestamp(timestamp: i64) -> Option<Self> {
        Some(Self {
            inner: time::OffsetDateTime::from_unix_timestamp(timestamp).ok()?,
            _of: PhantomData,
        })
    }

    /// Returns the [`UNIX_EPOCH`] timestamp of this [`DateTime`].
    ///
    /// [`UNIX_EPOCH`]: Self::UNIX_EPOCH
    #[must_use]
    pub fn unix_timestamp(&self) -> i64 {
        self.inner.unix_timestamp()
    }

    /// Creates a new [`DateTime`] from the provided [RFC 3339] string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid [RFC 3339] date and time.
    ///
    /// [RFC 3339]: https://tools.ietf.org/html/rfc3339
    pub fn from_rfc3339(input: &str) -> Result<Self, ParseError> {
        use ParseError as E;

        time::OffsetDateTime::parse(input, &Rfc3339)
            .map_err(E::Parse)?
            .try_into()
            .map_err(E::ComponentRange)
    }

    /// Returns the [`DateTime`] as an [RFC 3339] string.
    ///
    /// [RFC 3339]: https://tools.ietf.org/html/rfc3339
    #[expect(clippy::missing_panics_doc, reason = "infallible")]
    #[must_use]
    pub fn to_rfc3339(&self) -> String {
        self.inner.format(&Rfc3339).unwrap_or_else(|e| {
            panic!("cannot format `DateTime` as RFC 3339: {e}")
        })
    }

    /// Coerces one kind of [`DateTime`] into another.
    #[must_use]
    pub fn coerce<NewOf: ?Sized>(self) -> DateTimeOf<NewOf> {
        DateTimeOf {
            inner: self.inner,
            _of: PhantomData,
        }
    }
}

/// Error of parsing [`DateTime`] from a string.
#[derive(Clone, Copy, Debug, Display, Error)]
pub enum ParseError {
    /// Failed to parse the string into an [`DateTime`].
    Parse(time::error::Parse),

    /// Parsed [`DateTime`] has an out of range component.
    ComponentRange(time::error::ComponentRange),
}

impl<Of: ?Sized> Copy for DateTimeOf<Of> {}
impl<Of: ?Sized> Clone for DateTimeOf<Of> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Of: ?Sized> Eq for DateTimeOf<Of> {}
impl<Of: ?Sized> PartialEq for DateTimeOf<Of> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<Of: ?Sized> Ord for DateTimeOf<Of> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.inner.cmp(&other.inner)
    }
}
impl<Of: ?Sized> PartialOrd for DateTimeOf<Of> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<Of: ?Sized> TryFrom<time::OffsetDateTime> for DateTimeOf<Of> {
    type Error = time::error::ComponentRange;

    fn try_from(dt: time::OffsetDateTime) -> Result<Self, Self::Error> {
        dt.to_offset(UtcOffset::UTC)
            .replace_microsecond(dt.microsecond())
            .map(|inner| Self {
                inner,
                _of: PhantomData,
            })
    }
}

impl<Of: ?Sized> From<DateTimeOf<Of>> for time::OffsetDateTime {
    fn from(dt: DateTimeOf<Of>) -> Self {
        dt.inner
    }
}

impl<Of: ?Sized> Serialize for DateTimeOf<Of> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_rfc3339())
    }
}

impl<'de, Of: ?Sized> Deserialize<'de> for DateTimeOf<Of> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_rfc3339(&s).map_err(de::Error::custom)
    }
}

/// Calendar month of a specific year, keying month-bucketed aggregates.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct YearMonth {
    /// Calendar year.
    year: i32,

    /// Month number, in `1..=12` range.
    month: u8,
}

impl YearMonth {
    /// Creates a new [`YearMonth`] by checking the provided month number is
    /// in `1..=12` range.
    #[must_use]
    pub fn new(year: i32, month: u8) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    /// Returns the calendar year of this [`YearMonth`].
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Returns the month number of this [`YearMonth`], in `1..=12` range.
    #[must_use]
    pub const fn month(&self) -> u8 {
        self.month
    }

    /// Returns the [`YearMonth`] immediately following this one.
    #[must_use]
    pub const fn next(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// Returns a human-readable label of this [`YearMonth`], like
    /// `January 2024`.
    #[expect(clippy::missing_panics_doc, reason = "month checked on creation")]
    #[must_use]
    pub fn label(&self) -> String {
        let month = Month::try_from(self.month).expect("in `1..=12` range");
        format!("{month} {}", self.year)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl<Of: ?Sized> From<DateTimeOf<Of>> for YearMonth {
    fn from(dt: DateTimeOf<Of>) -> Self {
        let dt = time::OffsetDateTime::from(dt);
        Self {
            year: dt.year(),
            month: u8::from(dt.month()),
        }
    }
}

impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(test)]
mod spec {
    use super::{DateTime, YearMonth};

    #[test]
    fn year_month_displays_zero_padded() {
        let ym = YearMonth::new(2024, 3).unwrap();
        assert_eq!(ym.to_string(), "2024-03");
    }

    #[test]
    fn year_month_rejects_invalid_month() {
        assert!(YearMonth::new(2024, 0).is_none());
        assert!(YearMonth::new(2024, 13).is_none());
    }

    #[test]
    fn year_month_next_rolls_over_year() {
        let dec = YearMonth::new(2023, 12).unwrap();
        assert_eq!(dec.next(), YearMonth::new(2024, 1).unwrap());

        let jan = YearMonth::new(2024, 1).unwrap();
        assert_eq!(jan.next(), YearMonth::new(2024, 2).unwrap());
    }

    #[test]
    fn year_month_orders_chronologically() {
        let a = YearMonth::new(2023, 12).unwrap();
        let b = YearMonth::new(2024, 1).unwrap();
        let c = YearMonth::new(2024, 11).unwrap();
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn year_month_labels_month_name() {
        let ym = YearMonth::new(2024, 1).unwrap();
        assert_eq!(ym.label(), "January 2024");
    }

    #[test]
    fn year_month_of_datetime() {
        let dt = DateTime::from_rfc3339("2024-03-15T12:30:00Z").unwrap();
        assert_eq!(YearMonth::from(dt), YearMonth::new(2024, 3).unwrap());
    }

    #[test]
    fn datetime_roundtrips_unix_timestamp() {
        let dt = DateTime::from_unix_timestamp(1_700_000_000).unwrap();
        assert_eq!(dt.unix_timestamp(), 1_700_000_000);
    }

    #[test]
    fn datetime_parses_rfc3339() {
        let dt = DateTime::from_rfc3339("1970-01-01T00:00:00Z").unwrap();
        assert_eq!(dt, DateTime::UNIX_EPOCH);
        assert!(DateTime::from_rfc3339("not a date").is_err());
    }
}
