//! Course and cohort models.
//!
//! A course is a catalog entry that is instantiated as one or more
//! capacity-bounded sections. Prerequisite edges between courses must
//! form a DAG (checked by [`crate::validation::validate_catalog`]).
//!
//! A cohort is a named curriculum: a list of required courses plus a list
//! of departments from which each member must take at least one course.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A course in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Unique course identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Owning department.
    pub department: String,
    /// Capacity of each section (must be > 0).
    pub max_class_size: u32,
    /// IDs of instructors eligible to teach this course.
    #[serde(default)]
    pub instructors: Vec<String>,
    /// IDs of meeting times this course may be held at.
    /// Empty = any catalog meeting time (see `SchedulerConfig`).
    #[serde(default)]
    pub meeting_times: Vec<String>,
    /// IDs of courses that must be completed first.
    #[serde(default)]
    pub prerequisites: Vec<String>,
}

impl Course {
    /// Creates a new course with the given section capacity.
    pub fn new(id: impl Into<String>, max_class_size: u32) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            department: String::new(),
            max_class_size,
            instructors: Vec::new(),
            meeting_times: Vec::new(),
            prerequisites: Vec::new(),
        }
    }

    /// Sets the course name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the department.
    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = department.into();
        self
    }

    /// Adds an eligible instructor.
    pub fn with_instructor(mut self, instructor_id: impl Into<String>) -> Self {
        self.instructors.push(instructor_id.into());
        self
    }

    /// Adds an eligible meeting time.
    pub fn with_meeting_time(mut self, meeting_time_id: impl Into<String>) -> Self {
        self.meeting_times.push(meeting_time_id.into());
        self
    }

    /// Adds a prerequisite course.
    pub fn with_prerequisite(mut self, course_id: impl Into<String>) -> Self {
        self.prerequisites.push(course_id.into());
        self
    }

    /// Whether every prerequisite is in `completed`.
    pub fn prerequisites_met(&self, completed: &BTreeSet<String>) -> bool {
        self.prerequisites.iter().all(|p| completed.contains(p))
    }

    /// Number of sections needed for `expected_demand` students.
    ///
    /// `ceil(demand / max_class_size)`, never less than one: a course with
    /// no demand still exists in the catalog and gets an empty section.
    pub fn section_count(&self, expected_demand: usize) -> usize {
        if self.max_class_size == 0 {
            return 1;
        }
        expected_demand
            .div_ceil(self.max_class_size as usize)
            .max(1)
    }
}

/// A cohort of students sharing a curriculum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cohort {
    /// Unique cohort identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Courses every member must take.
    #[serde(default)]
    pub required_courses: Vec<String>,
    /// Departments from which every member must take at least one course.
    #[serde(default)]
    pub required_departments: Vec<String>,
}

impl Cohort {
    /// Creates an empty cohort.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            required_courses: Vec::new(),
            required_departments: Vec::new(),
        }
    }

    /// Sets the cohort name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Adds a required course.
    pub fn with_required_course(mut self, course_id: impl Into<String>) -> Self {
        self.required_courses.push(course_id.into());
        self
    }

    /// Adds a required department.
    pub fn with_required_department(mut self, department: impl Into<String>) -> Self {
        self.required_departments.push(department.into());
        self
    }
}
