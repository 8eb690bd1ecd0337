//! Platform-independent core: section tracking, projection transitions and
//! the data they are driven by. Nothing in here touches `web_sys`.

pub mod config;
pub mod constants;
pub mod dataset;
pub mod dispatch;
pub mod lock;
pub mod orchestrator;
pub mod projection;
pub mod scroller;
pub mod targets;
pub mod topology;
pub mod transition;

pub use config::ViewConfig;
pub use dataset::{parse_crashes, Crash, DatasetError, Flight, Place};
pub use dispatch::{Dispatcher, ListenerId};
pub use lock::{AnimationLocks, LockKey, LockToken};
pub use orchestrator::{Orchestrator, SectionEmphasis};
pub use projection::{great_circle, GeoPoint, ProjectionState};
pub use scroller::{
    locate, Bounds, Container, ScrollError, ScrollEvent, ScrollHost, Scroller, SectionPositions,
};
pub use targets::{ProjectionTarget, TargetError, TargetTable, Translation};
pub use topology::Topology;
pub use transition::{Easing, ParamValue, TransitionEngine};
