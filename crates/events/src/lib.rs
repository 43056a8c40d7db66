#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/statline/statline/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod taxonomy;
pub use taxonomy::{Outcome, OutcomeTaxonomy};

mod reducer;
pub use reducer::{MalformedPolicy, PlateAppearanceReducer, ReducerConfig};

mod rollup;
pub use rollup::daily_rollup;
