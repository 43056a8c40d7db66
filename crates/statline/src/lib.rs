#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/statline/statline/issues/")]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

#[cfg(feature = "primitives")]
#[doc(inline)]
pub use statline_primitives as primitives;
#[cfg(feature = "traits")]
#[doc(inline)]
pub use statline_traits as traits;
#[cfg(feature = "math")]
#[doc(inline)]
pub use statline_math as math;
#[cfg(feature = "events")]
#[doc(inline)]
pub use statline_events as events;
#[cfg(feature = "windows")]
#[doc(inline)]
pub use statline_windows as windows;
#[cfg(feature = "pipeline")]
#[doc(inline)]
pub use statline_pipeline as pipeline;
#[cfg(feature = "utils")]
#[doc(inline)]
pub use statline_utils as utils;

// Used only by the `build-features` binary.
#[cfg(feature = "cli")]
use {clap as _, polars as _, tracing as _, tracing_subscriber as _};
