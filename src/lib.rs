//! Course timetabling for the U-Engine ecosystem.
//!
//! Splits each course's demand into capacity-bounded sections, staffs them,
//! places students first-fit, and scores the result by counting conflicts.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Catalog`, `Course`, `Cohort`, `Instructor`,
//!   `MeetingTime`, `Roster`, `Student`, `Class`, `Schedule`
//! - **`validation`**: Input integrity checks (duplicate IDs, capacities,
//!   dangling references, prerequisite cycles)
//! - **`scheduler`**: Section builder, assignment engine, conflict scorer, KPIs
//! - **`synthetic`**: Seeded generation of demo catalogs and rosters
//! - **`error`**: Run-level errors
//!
//! # Architecture
//!
//! The engine is a pure in-memory computation over an immutable catalog and
//! roster: no I/O, no global state, no randomness. Rendering, persistence and
//! data import belong to callers.
//!
//! # References
//!
//! - Schaerf (1999), "A Survey of Automated Timetabling"
//! - Burke & Petrovic (2002), "Recent Research Directions in Automated Timetabling"

pub mod error;
pub mod models;
pub mod scheduler;
pub mod synthetic;
pub mod validation;

pub use error::SchedulingError;
