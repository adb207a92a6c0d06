//! Slot assignment and end-to-end planning.
//!
//! # Algorithm
//!
//! `DsaturScheduler` colors the conflict graph greedily by saturation
//! degree (Brélaz). It is a heuristic: the slot count is an upper bound on
//! the minimum, reached exactly on bipartite graphs.
//!
//! # Planning
//!
//! `ExamPlanner` chains graph construction, coloring, calendar mapping,
//! validation, and `ScheduleStats`.
//!
//! # References
//!
//! - Brélaz (1979), "New Methods to Color the Vertices of a Graph"
//! - Carter, Laporte & Lee (1996), "Examination Timetabling: Algorithmic
//!   Strategies and Applications"

mod dsatur;
mod planner;
mod stats;

pub use dsatur::DsaturScheduler;
pub use planner::{ensure_consistent, ExamPlan, ExamPlanner};
pub use stats::ScheduleStats;
