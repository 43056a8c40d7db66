#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/statline/statline/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod timeline;
pub use timeline::dense_timeline;

mod rolling;
pub use rolling::{RollingAggregator, RollingConfig};

mod season;
pub use season::{SeasonAggregator, SeasonMode, SeasonTable};

mod error;
pub use error::WindowError;
