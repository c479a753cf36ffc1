//! [`Unit`] definitions.

use derive_more::{AsRef, Display, From, Into};
use serde::Serialize;

#[cfg(doc)]
use crate::domain::Property;

/// Unit within a [`Property`] a [`Sale`] refers to.
///
/// [`Sale`]: crate::domain::Sale
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Unit {
    /// ID of this [`Unit`].
    pub id: Id,

    /// [`Name`] of this [`Unit`].
    pub name: Name,
}

/// ID of a [`Unit`].
#[derive(
    AsRef,
    Clone,
    Debug,
    Display,
    Eq,
    From,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[as_ref(str, String)]
pub struct Id(String);

/// Name of a [`Unit`].
#[derive(AsRef, Clone, Debug, Display, Eq, From, Into, PartialEq, Serialize)]
#[as_ref(str, String)]
pub struct Name(String);

impl Name {
    /// Placeholder [`Name`] of a [`Unit`] that cannot be resolved.
    #[must_use]
    pub fn unknown() -> Self {
        Self("Unknown Unit".into())
    }
}
