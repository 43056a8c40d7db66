#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/statline/statline/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod reducer;
pub use reducer::{EventError, EventReducer, Reduction};

mod aggregate;
pub use aggregate::WindowAggregator;

mod smoother;
pub use smoother::RateSmoother;

mod enrich;
pub use enrich::{EnrichError, Enricher};
