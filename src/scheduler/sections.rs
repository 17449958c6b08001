//! Section builder.
//!
//! Splits a course's expected demand into capacity-bounded sections and
//! staffs each one with an instructor and a meeting time.
//!
//! # Algorithm
//!
//! 1. `sections = max(1, ceil(demand / max_class_size))`.
//! 2. Instructors rotate round-robin over the course's eligible list.
//! 3. Each section takes the eligible meeting time with the smallest key
//!    `(instructor clash, same-course load, instructor's load that day,
//!    global load, list position)`, so instructors are spread out before
//!    any student is placed.
//! 4. With no eligible instructor or meeting time the section is left
//!    unstaffed; the scorer reports it as a staffing gap.
//!
//! Usage is tracked across calls, so one builder should build every course
//! of a run.
//!
//! # Complexity
//! O(s * t * b) per course where s=sections, t=eligible times,
//! b=sections already booked for the instructor.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::models::{Catalog, Class, Course, MeetingTime};

/// Builds staffed, empty sections for the courses of one catalog.
#[derive(Debug, Clone)]
pub struct SectionBuilder<'a> {
    catalog: &'a Catalog,
    inherit_catalog_meeting_times: bool,
    /// instructor_id → meeting times already taught
    instructor_bookings: HashMap<String, Vec<MeetingTime>>,
    /// meeting_time_id → sections placed there
    time_load: HashMap<String, usize>,
}

impl<'a> SectionBuilder<'a> {
    /// Creates a builder over a catalog.
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            inherit_catalog_meeting_times: true,
            instructor_bookings: HashMap::new(),
            time_load: HashMap::new(),
        }
    }

    /// Whether a course listing no meeting times may use every catalog
    /// meeting time (default: `true`).
    pub fn with_catalog_meeting_times(mut self, inherit: bool) -> Self {
        self.inherit_catalog_meeting_times = inherit;
        self
    }

    /// Builds the sections of one course.
    ///
    /// Returns at least one section; every section is empty.
    pub fn build_sections(&mut self, course: &Course, expected_demand: usize) -> Vec<Class> {
        let count = course.section_count(expected_demand);
        let times = self.eligible_times(course);
        let mut sections: Vec<Class> = Vec::with_capacity(count);

        for index in 0..count {
            let mut class = Class::new(course, index);

            let instructor = if course.instructors.is_empty() {
                None
            } else {
                Some(course.instructors[index % course.instructors.len()].as_str())
            };
            if let Some(id) = instructor {
                class = class.with_instructor(id);
            }

            if let Some(time) = self.pick_meeting_time(instructor, &times, &sections) {
                self.record(instructor, time);
                class = class.with_meeting_time(time.clone());
            }

            if !class.is_staffed() {
                warn!(
                    section = %class.label(),
                    has_instructor = class.instructor_id.is_some(),
                    has_meeting_time = class.meeting_time.is_some(),
                    "section left unstaffed"
                );
            }
            sections.push(class);
        }

        debug!(
            course = %course.id,
            demand = expected_demand,
            sections = sections.len(),
            "built sections"
        );
        sections
    }

    /// Meeting times a course may use, in preference order.
    fn eligible_times(&self, course: &Course) -> Vec<&'a MeetingTime> {
        let catalog: &'a Catalog = self.catalog;
        if course.meeting_times.is_empty() {
            if self.inherit_catalog_meeting_times {
                catalog.meeting_times.iter().collect()
            } else {
                Vec::new()
            }
        } else {
            course
                .meeting_times
                .iter()
                .filter_map(|id| catalog.meeting_time(id))
                .collect()
        }
    }

    fn pick_meeting_time(
        &self,
        instructor: Option<&str>,
        times: &[&'a MeetingTime],
        siblings: &[Class],
    ) -> Option<&'a MeetingTime> {
        let booked: &[MeetingTime] = instructor
            .and_then(|id| self.instructor_bookings.get(id))
            .map(|v| v.as_slice())
            .unwrap_or(&[]);

        times
            .iter()
            .enumerate()
            .min_by_key(|(position, time)| {
                let clash = booked.iter().any(|b| b.overlaps(time));
                let same_course = siblings.iter().filter(|c| c.meets_during(time)).count();
                let day_load = booked.iter().filter(|b| b.day == time.day).count();
                let load = self.time_load.get(&time.id).copied().unwrap_or(0);
                (clash, same_course, day_load, load, *position)
            })
            .map(|(_, time)| *time)
    }

    fn record(&mut self, instructor: Option<&str>, time: &MeetingTime) {
        *self.time_load.entry(time.id.clone()).or_insert(0) += 1;
        if let Some(id) = instructor {
            self.instructor_bookings
                .entry(id.to_string())
                .or_default()
                .push(time.clone());
        }
    }
}
