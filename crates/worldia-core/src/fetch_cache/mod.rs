//! Client-side fetch cache.
//!
//! [`FetchCache`] holds fetched values per key with a TTL and tracks, per key,
//! when the network was last hit and whether a fetch is outstanding.
//! [`Resource`] binds a key and a fetcher to a cache and keeps the
//! consumer-facing state (data, error, loading flags).

mod resource;
mod store;

pub use resource::{Resource, ResourceState};
pub use store::{FetchCache, FetchCacheConfig, FetchMode, FetchOutcome};
