#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/statline/statline/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod ids;
pub use ids::{AtBatId, GameId, PlayerId};

mod role;
pub use role::Role;

mod event;
pub use event::RawEvent;

mod appearance;
pub use appearance::{DailyStat, PlateAppearance};

mod features;
pub use features::{
    FeatureRecord, MergedFeatureRow, RateFeature, RollingFeatureRow, SeasonStat, WindowStats,
    guarded_rate,
};

mod roster;
pub use roster::RosterEntry;

/// Re-export common date type.
pub type Date = chrono::NaiveDate;
