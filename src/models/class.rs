//! Class (section) model.
//!
//! A class is one scheduled instance of a course: an instructor, a meeting
//! time, a capacity, and the students enrolled in it, in enrollment order.
//!
//! # Capacity Invariant
//! `students.len() <= capacity` always holds. [`Class::enroll`] refuses to
//! break it; a class found over capacity indicates an engine defect.

use serde::{Deserialize, Serialize};

use super::{Course, MeetingTime};
use crate::error::SchedulingError;

/// A section of a course.
///
/// Carries the course facts needed to score it (department, prerequisites)
/// and a copy of its meeting time, so a [`super::Schedule`] can be scored
/// without the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Class {
    /// Course this section instantiates.
    pub course_id: String,
    /// Course name (denormalized for rendering).
    pub course_name: String,
    /// Course department.
    pub department: String,
    /// Position among the course's sections (0-indexed).
    pub section: usize,
    /// Assigned instructor. `None` = staffing gap.
    pub instructor_id: Option<String>,
    /// Assigned meeting time. `None` = staffing gap.
    pub meeting_time: Option<MeetingTime>,
    /// Maximum enrollment (the course's class size).
    pub capacity: u32,
    /// Prerequisites of the course.
    pub prerequisites: Vec<String>,
    /// Enrolled student IDs, in enrollment order.
    pub students: Vec<String>,
}

impl Class {
    /// Creates an empty, unstaffed section of a course.
    pub fn new(course: &Course, section: usize) -> Self {
        Self {
            course_id: course.id.clone(),
            course_name: course.name.clone(),
            department: course.department.clone(),
            section,
            instructor_id: None,
            meeting_time: None,
            capacity: course.max_class_size,
            prerequisites: course.prerequisites.clone(),
            students: Vec::new(),
        }
    }

    /// Assigns an instructor.
    pub fn with_instructor(mut self, instructor_id: impl Into<String>) -> Self {
        self.instructor_id = Some(instructor_id.into());
        self
    }

    /// Assigns a meeting time.
    pub fn with_meeting_time(mut self, meeting_time: MeetingTime) -> Self {
        self.meeting_time = Some(meeting_time);
        self
    }

    /// Display label, e.g. `ALG-2` for the second section of `ALG`.
    pub fn label(&self) -> String {
        format!("{}-{}", self.course_id, self.section + 1)
    }

    /// Number of enrolled students.
    #[inline]
    pub fn enrolled(&self) -> usize {
        self.students.len()
    }

    /// Seats left (0 if full or over capacity).
    #[inline]
    pub fn remaining(&self) -> usize {
        (self.capacity as usize).saturating_sub(self.students.len())
    }

    /// Whether no seats are left.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.remaining() == 0
    }

    /// Whether both an instructor and a meeting time are assigned.
    pub fn is_staffed(&self) -> bool {
        self.instructor_id.is_some() && self.meeting_time.is_some()
    }

    /// Whether a student is enrolled.
    pub fn has_student(&self, student_id: &str) -> bool {
        self.students.iter().any(|s| s == student_id)
    }

    /// Whether this section meets at a time overlapping `time`.
    ///
    /// A section without a meeting time overlaps nothing.
    pub fn meets_during(&self, time: &MeetingTime) -> bool {
        self.meeting_time.as_ref().is_some_and(|t| t.overlaps(time))
    }

    /// Whether two sections' meeting times overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        other
            .meeting_time
            .as_ref()
            .is_some_and(|t| self.meets_during(t))
    }

    /// Appends a student.
    ///
    /// # Errors
    /// [`SchedulingError::CapacityExceeded`] if the section is full.
    pub fn enroll(&mut self, student_id: impl Into<String>) -> Result<(), SchedulingError> {
        if self.is_full() {
            return Err(SchedulingError::CapacityExceeded {
                section: self.label(),
                enrolled: self.students.len() + 1,
                capacity: self.capacity,
            });
        }
        self.students.push(student_id.into());
        Ok(())
    }
}
