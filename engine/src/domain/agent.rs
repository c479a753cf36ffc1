//! [`Agent`] definitions.

use derive_more::{AsRef, Display, From, Into};
use serde::Serialize;

/// Sales agent a [`Sale`] is attributed to.
///
/// [`Sale`]: crate::domain::Sale
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Agent {
    /// ID of this [`Agent`].
    pub id: Id,

    /// [`Name`] of this [`Agent`].
    pub name: Name,

    /// [`Email`] of this [`Agent`], if known.
    pub email: Option<Email>,
}

/// ID of an [`Agent`].
///
/// IDs are opaque strings assigned by the upstream sales data source.
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

/// Name of an [`Agent`].
#[derive(AsRef, Clone, Debug, Display, Eq, From, Into, PartialEq, Serialize)]
#[as_ref(str, String)]
pub struct Name(String);

impl Name {
    /// Placeholder [`Name`] of an [`Agent`] whose name cannot be resolved
    /// from either the sale itself or the roster.
    #[must_use]
    pub fn unknown() -> Self {
        Self("Unknown Agent".into())
    }
}

/// Email of an [`Agent`].
#[derive(AsRef, Clone, Debug, Display, Eq, From, Into, PartialEq, Serialize)]
#[as_ref(str, String)]
pub struct Email(String);
