//! Source — where a series came from.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Upstream data provider.
///
/// Provenance only: the source never changes computed values, except that
/// the reconciler uses it to decide which series wins on a shared date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// Stooq continuous futures quotes (full OHLC).
    Stooq,
    /// FRED daily spot series (close only).
    Fred,
}

impl Source {
    pub const ALL: [Source; 2] = [Source::Stooq, Source::Fred];

    pub fn name(&self) -> &'static str {
        match self {
            Source::Stooq => "stooq",
            Source::Fred => "fred",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
