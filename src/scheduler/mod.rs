//! Section building, student assignment, and conflict scoring.
//!
//! # Algorithm
//!
//! `TimetableScheduler` is a deterministic, single-pass allocator: it sizes
//! each course's sections from expected demand, staffs them, then places
//! students first-fit in roster order. It does not backtrack and makes no
//! optimality claim; quality is measured by the conflict count.
//!
//! # Components
//!
//! - [`needed_courses`] / [`expected_demand`]: what each student needs.
//! - [`SectionBuilder`]: capacity-bounded, staffed, empty sections.
//! - [`assign`]: first-fit enrollment.
//! - [`score`]: itemized conflicts of a finished schedule.
//! - [`ScheduleKpi`]: seat usage and placement metrics.
//!
//! # References
//!
//! - Schaerf (1999), "A Survey of Automated Timetabling"
//! - Carter & Laporte (1998), "Recent Developments in Practical Course Timetabling"

mod assign;
mod demand;
mod kpi;
mod scorer;
mod sections;
mod simple;

pub use assign::assign;
pub use demand::{department_candidates, expected_demand, needed_courses};
pub use kpi::ScheduleKpi;
pub use scorer::{score, ConflictReport};
pub use sections::SectionBuilder;
pub use simple::{ScheduleRequest, SchedulerConfig, TimetableScheduler};
