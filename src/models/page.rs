use serde::{Deserialize, Serialize};

/// Server-issued continuation token for marker-based listings.
///
/// Opaque: the client only ever echoes it back on the next request. Kept as its
/// own type so it cannot be passed where an item id is expected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Marker(String);

impl Marker {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Wire value of `next_marker`; an empty token means there is no next page.
    pub fn from_wire(token: Option<String>) -> Option<Self> {
        token.filter(|t| !t.is_empty()).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One page of a marker-paginated listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub entries: Vec<T>,
    /// Present iff more pages exist.
    pub marker: Option<Marker>,
    /// Count reported to callers. For app activity this is the size of this
    /// page, not the remote total.
    pub total_count: usize,
    /// Total the server claimed, when it sent one. May be approximate.
    pub server_total_count: Option<u64>,
}

impl<T> Page<T> {
    pub fn has_more(&self) -> bool {
        self.marker.is_some()
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            entries: self.entries.into_iter().map(f).collect(),
            marker: self.marker,
            total_count: self.total_count,
            server_total_count: self.server_total_count,
        }
    }
}

/// An offset-style listing returned whole, e.g. comments on a file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection<T> {
    #[serde(default = "Vec::new")]
    pub entries: Vec<T>,
    #[serde(default)]
    pub total_count: u64,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            total_count: 0,
        }
    }
}
