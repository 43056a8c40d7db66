#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/statline/statline/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod window;
pub use window::SlidingWindow;

mod shrinkage;
pub use shrinkage::{PseudoCountSmoother, population_rate, shrink_rate, shrink_rates};

mod error;
pub use error::MathError;
