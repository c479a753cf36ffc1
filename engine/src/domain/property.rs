//! [`Property`] definitions.

use derive_more::{AsRef, Display, From, Into};
use serde::Serialize;

/// Property a [`Sale`] refers to.
///
/// [`Sale`]: crate::domain::Sale
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Property {
    /// ID of this [`Property`].
    pub id: Id,

    /// [`Name`] of this [`Property`].
    pub name: Name,
}

/// ID of a [`Property`].
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

/// Name of a [`Property`].
#[derive(AsRef, Clone, Debug, Display, Eq, From, Into, PartialEq, Serialize)]
#[as_ref(str, String)]
pub struct Name(String);

impl Name {
    /// Placeholder [`Name`] of a [`Property`] that cannot be resolved.
    #[must_use]
    pub fn unknown() -> Self {
        Self("Unknown Property".into())
    }
}
