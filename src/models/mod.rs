//! Timetabling domain models.
//!
//! Provides the input types (catalog and roster) and the output types
//! (sections and the schedule) of a scheduling run.
//!
//! # Domain Mappings
//!
//! | u-timetable | School | University | Training Center |
//! |-------------|--------|------------|-----------------|
//! | Course | Subject | Course | Workshop |
//! | Class | Class period | Section | Session |
//! | Cohort | Grade level | Degree program | Track |
//! | MeetingTime | Period | Time block | Slot |

mod catalog;
mod class;
mod course;
mod meeting_time;
mod person;
mod schedule;

pub use catalog::{Catalog, Roster};
pub use class::Class;
pub use course::{Cohort, Course};
pub use meeting_time::{MeetingTime, Weekday, DEFAULT_PERIOD_MINUTES, MINUTES_PER_DAY};
pub use person::{Instructor, Student};
pub use schedule::{Requirement, Schedule, StudentPlan, Violation, ViolationType};
