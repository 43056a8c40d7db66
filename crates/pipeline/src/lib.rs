#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/statline/statline/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod config;
pub use config::{PipelineConfig, PriorCounts};

mod frame;
pub use frame::{EventBatch, EventColumns, events_from_frame};

mod merge;
pub use merge::{merge_with_season, union_roles};

mod smooth;
pub use smooth::{GlobalRates, ShrinkageSmoother, Smoothed};

mod table;
pub use table::FeatureTable;

mod enrich;
pub use enrich::{
    ROSTER_TEMPLATE_COLUMNS, Roster, RosterConfig, RosterEnricher, enrich_or_degrade,
    roster_template,
};

mod audit;
pub use audit::{FeatureAudit, RoleCoverage, SMALL_SAMPLE_ROWS};

mod pipeline;
pub use pipeline::FeaturePipeline;

mod error;
pub use error::PipelineError;

/// Re-export commonly used types.
pub mod prelude {
    pub use statline_traits::{Enricher, EventReducer, RateSmoother, WindowAggregator};
    pub use statline_windows::{RollingConfig, SeasonMode};

    pub use super::{FeaturePipeline, FeatureTable, PipelineConfig, PipelineError};
}
