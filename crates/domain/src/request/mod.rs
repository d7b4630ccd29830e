//! Request shape types
//!
//! Everything needed to describe the HTTP call a route test makes:
//! the method, the query mapping and the assembled request parameters.

mod method;
mod params;
mod query;

pub use method::HttpMethod;
pub use params::RequestParams;
pub use query::Query;
