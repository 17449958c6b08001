//! End-to-end timetabling run.
//!
//! # Pipeline
//!
//! 1. Validate the catalog (abort before any section exists).
//! 2. Compute expected demand per course (roster-derived, or overridden).
//! 3. Build sections for every course, in catalog order.
//! 4. Assign the roster (validates the roster first).
//! 5. Score the final state and stamp the conflicts on the schedule.
//!
//! The run is single-threaded and deterministic: the same catalog, roster
//! and configuration always yield an identical [`Schedule`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::assign::assign;
use super::demand::expected_demand;
use super::scorer::score;
use super::sections::SectionBuilder;
use crate::error::SchedulingError;
use crate::models::{Catalog, Roster, Schedule, ViolationType};
use crate::validation::validate_catalog;

/// Tunables for a scheduling run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Identifier stamped on the produced schedule.
    pub schedule_id: String,
    /// Expected demand per course ID, replacing the roster-derived count.
    pub demand_overrides: BTreeMap<String, usize>,
    /// Whether a course listing no meeting times may use every catalog
    /// meeting time. When `false`, such courses are left unscheduled.
    pub inherit_catalog_meeting_times: bool,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            schedule_id: "1".to_string(),
            demand_overrides: BTreeMap::new(),
            inherit_catalog_meeting_times: true,
        }
    }
}

impl SchedulerConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the schedule identifier.
    pub fn with_schedule_id(mut self, id: impl Into<String>) -> Self {
        self.schedule_id = id.into();
        self
    }

    /// Overrides the expected demand of one course.
    pub fn with_expected_demand(mut self, course_id: impl Into<String>, demand: usize) -> Self {
        self.demand_overrides.insert(course_id.into(), demand);
        self
    }

    /// Sets whether courses inherit the catalog's meeting times.
    pub fn with_catalog_meeting_times(mut self, inherit: bool) -> Self {
        self.inherit_catalog_meeting_times = inherit;
        self
    }
}

/// Input container for scheduling.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScheduleRequest {
    /// Courses, instructors, meeting times, cohorts.
    pub catalog: Catalog,
    /// Students to place.
    pub roster: Roster,
    /// Run configuration.
    #[serde(default)]
    pub config: SchedulerConfig,
}

impl ScheduleRequest {
    /// Creates a new schedule request.
    pub fn new(catalog: Catalog, roster: Roster) -> Self {
        Self {
            catalog,
            roster,
            config: SchedulerConfig::default(),
        }
    }

    /// Sets the run configuration.
    pub fn with_config(mut self, config: SchedulerConfig) -> Self {
        self.config = config;
        self
    }
}

/// Section-splitting, first-fit timetable scheduler.
///
/// # Example
///
/// ```
/// use u_timetable::models::{Catalog, Course, Instructor, MeetingTime, Roster, Student, Weekday};
/// use u_timetable::scheduler::TimetableScheduler;
///
/// let catalog = Catalog::new()
///     .with_instructor(Instructor::new("I1"))
///     .with_meeting_time(MeetingTime::at_hour("T1", Weekday::Monday, 9))
///     .with_course(Course::new("ALG", 30).with_name("Algebra").with_instructor("I1"));
/// let roster = Roster::new()
///     .with_student(Student::new("S1"))
///     .with_student(Student::new("S2"));
///
/// let schedule = TimetableScheduler::new().schedule(&catalog, &roster).unwrap();
/// assert_eq!(schedule.sections_of("ALG")[0].students, vec!["S1", "S2"]);
/// assert_eq!(schedule.conflicts, 0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TimetableScheduler {
    config: SchedulerConfig,
}

impl TimetableScheduler {
    /// Creates a scheduler with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the run configuration.
    pub fn with_config(mut self, config: SchedulerConfig) -> Self {
        self.config = config;
        self
    }

    /// Runs the full pipeline.
    ///
    /// # Errors
    /// - [`SchedulingError::InvalidCatalog`] before any section is built.
    /// - [`SchedulingError::InvalidRoster`] before any student is placed.
    /// - [`SchedulingError::CapacityExceeded`] or
    ///   [`SchedulingError::InconsistentScore`] on an engine defect.
    pub fn schedule(
        &self,
        catalog: &Catalog,
        roster: &Roster,
    ) -> Result<Schedule, SchedulingError> {
        validate_catalog(catalog).map_err(SchedulingError::InvalidCatalog)?;
        info!(
            courses = catalog.courses.len(),
            students = roster.len(),
            schedule = %self.config.schedule_id,
            "scheduling run started"
        );

        let mut demand = expected_demand(roster, catalog);
        for (course_id, count) in &self.config.demand_overrides {
            demand.insert(course_id.clone(), *count);
        }

        let mut builder = SectionBuilder::new(catalog)
            .with_catalog_meeting_times(self.config.inherit_catalog_meeting_times);
        let mut schedule = Schedule::new(self.config.schedule_id.clone());
        for course in &catalog.courses {
            let expected = demand.get(&course.id).copied().unwrap_or(0);
            schedule.add_row(builder.build_sections(course, expected));
        }

        let unmet = assign(&mut schedule, roster, catalog)?;
        stamp_conflicts(&mut schedule, unmet)?;
        info!(
            sections = schedule.class_count(),
            enrolled = schedule.total_enrolled(),
            unmet,
            conflicts = schedule.conflicts,
            "scheduling run finished"
        );
        Ok(schedule)
    }

    /// Schedules from a request, using the request's configuration.
    pub fn schedule_request(
        &self,
        request: &ScheduleRequest,
    ) -> Result<Schedule, SchedulingError> {
        let scheduler = Self {
            config: request.config.clone(),
        };
        scheduler.schedule(&request.catalog, &request.roster)
    }
}

/// Scores the schedule and records its conflicts.
///
/// The scorer must find exactly the `unmet` requirements the assignment
/// engine tallied.
fn stamp_conflicts(schedule: &mut Schedule, unmet: usize) -> Result<(), SchedulingError> {
    let report = score(schedule)?;
    let scored = report.count(ViolationType::UnmetRequirement);
    if scored != unmet {
        return Err(SchedulingError::InconsistentScore {
            assigned: unmet,
            scored,
        });
    }

    schedule.conflicts = report.total();
    schedule.violations = report.violations;
    Ok(())
}
