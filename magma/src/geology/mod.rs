//! Geological map data for a probed location.
//!
//! [`GeologyFetcher`] pulls rock units and legend colors from a
//! [`GeologyProvider`](crate::provider::GeologyProvider). The units lookup is
//! mandatory; the legend only decorates rendering.

mod fetcher;
mod types;

pub use fetcher::{FetchError, GeologyFetcher, GeologyReport};
pub use types::{GeologicalUnit, Legend, LegendEntry, DEFAULT_UNIT_COLOR};

pub(crate) use types::lenient_string;
