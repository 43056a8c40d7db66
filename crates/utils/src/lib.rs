#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/statline/statline/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod union;
pub use union::align_and_union;

mod split;
pub use split::{ROLE_COLUMN, RoleFrames, split_by_role};

mod error;
pub use error::UtilsError;
