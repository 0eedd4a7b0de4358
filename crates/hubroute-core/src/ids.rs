use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a location in the transportation network.
///
/// The same id plays the role of origin, destination or hub candidate
/// depending on context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationId(usize);

impl LocationId {
    #[inline]
    pub fn new(value: usize) -> Self {
        LocationId(value)
    }

    #[inline]
    pub fn value(&self) -> usize {
        self.0
    }
}

impl From<usize> for LocationId {
    fn from(value: usize) -> Self {
        LocationId(value)
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Convert a list of raw ids into `LocationId`s.
pub fn location_ids<I>(raw: I) -> Vec<LocationId>
where
    I: IntoIterator<Item = usize>,
{
    raw.into_iter().map(LocationId::new).collect()
}
