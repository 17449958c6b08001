//! Instructor and student models.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// An instructor who can teach course sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instructor {
    /// Unique instructor identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
}

impl Instructor {
    /// Creates a new instructor.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
        }
    }

    /// Sets the instructor name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

/// A student to be placed into sections.
///
/// Completed courses are a set: order is irrelevant and duplicates
/// collapse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    /// Unique student identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Cohort membership. `None` = cohort-less.
    pub cohort: Option<String>,
    /// IDs of courses already completed.
    #[serde(default)]
    pub completed_courses: BTreeSet<String>,
}

impl Student {
    /// Creates a cohort-less student with no history.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            cohort: None,
            completed_courses: BTreeSet::new(),
        }
    }

    /// Sets the student name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Places the student in a cohort.
    pub fn with_cohort(mut self, cohort_id: impl Into<String>) -> Self {
        self.cohort = Some(cohort_id.into());
        self
    }

    /// Records a completed course.
    pub fn with_completed(mut self, course_id: impl Into<String>) -> Self {
        self.completed_courses.insert(course_id.into());
        self
    }

    /// Whether the student has completed a course.
    pub fn has_completed(&self, course_id: &str) -> bool {
        self.completed_courses.contains(course_id)
    }
}
