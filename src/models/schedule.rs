//! Schedule (solution) model.
//!
//! A schedule is the output of one scheduling run: a matrix of sections
//! (one row per catalog course, one column per section of that course),
//! the requirement plan of every student, and the conflicts found by the
//! scorer.
//!
//! Produced once and not revised: a new run yields a new schedule.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::Class;

/// A complete timetable.
///
/// Equality is field-wise: same sections with the same enrollments in the
/// same order, same plans, same conflicts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    /// Schedule identifier.
    pub id: String,
    /// Sections, one row per course in catalog order.
    pub matrix: Vec<Vec<Class>>,
    /// Requirement plans, one per student in roster order.
    pub plans: Vec<StudentPlan>,
    /// Total conflict count.
    pub conflicts: usize,
    /// Conflicts, itemized.
    pub violations: Vec<Violation>,
}

/// What one student needed this run, and what they had already completed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentPlan {
    /// Student ID.
    pub student_id: String,
    /// Courses completed before this run.
    pub completed_courses: BTreeSet<String>,
    /// Requirements, in the order they were placed.
    pub requirements: Vec<Requirement>,
}

/// A single course need.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Requirement {
    /// A specific course (cohort-required, or open enrollment).
    Course {
        /// Course ID.
        course_id: String,
    },
    /// One course from a department, resolved to a concrete course.
    /// `course_id` is `None` when no eligible course exists.
    Department {
        /// Department name.
        department: String,
        /// Chosen course.
        course_id: Option<String>,
    },
}

impl Requirement {
    /// Creates a course requirement.
    pub fn course(course_id: impl Into<String>) -> Self {
        Requirement::Course {
            course_id: course_id.into(),
        }
    }

    /// The course that would satisfy this requirement, if any.
    pub fn course_id(&self) -> Option<&str> {
        match self {
            Requirement::Course { course_id } => Some(course_id),
            Requirement::Department { course_id, .. } => course_id.as_deref(),
        }
    }

    /// Whether the given enrollments satisfy this requirement.
    pub fn is_satisfied_by(&self, enrolled: &[&Class]) -> bool {
        match self {
            Requirement::Course { course_id } => {
                enrolled.iter().any(|c| &c.course_id == course_id)
            }
            Requirement::Department { department, .. } => {
                enrolled.iter().any(|c| &c.department == department)
            }
        }
    }

    /// Short description for reports.
    pub fn describe(&self) -> String {
        match self {
            Requirement::Course { course_id } => format!("course '{course_id}'"),
            Requirement::Department {
                department,
                course_id: Some(id),
            } => format!("department '{department}' (via '{id}')"),
            Requirement::Department {
                department,
                course_id: None,
            } => format!("department '{department}' (no eligible course)"),
        }
    }
}

/// A scored conflict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Type of conflict.
    pub violation_type: ViolationType,
    /// Related entity ID (student, section label, or instructor).
    pub entity_id: String,
    /// Human-readable description.
    pub message: String,
}

/// Classification of conflicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViolationType {
    /// A student could not be placed for a needed course.
    UnmetRequirement,
    /// A student holds two sections with overlapping meeting times.
    TimeOverlap,
    /// A student is enrolled without a course's prerequisites.
    MissingPrerequisite,
    /// An instructor teaches two sections at overlapping times.
    InstructorDoubleBooked,
    /// A section has no instructor or no meeting time.
    StaffingGap,
}

impl Violation {
    /// Creates a violation.
    pub fn new(
        violation_type: ViolationType,
        entity_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            violation_type,
            entity_id: entity_id.into(),
            message: message.into(),
        }
    }
}

impl StudentPlan {
    /// Creates a plan with no requirements.
    pub fn new(student_id: impl Into<String>, completed_courses: BTreeSet<String>) -> Self {
        Self {
            student_id: student_id.into(),
            completed_courses,
            requirements: Vec::new(),
        }
    }
}

impl Schedule {
    /// Creates an empty schedule.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Appends a row of sections.
    pub fn add_row(&mut self, sections: Vec<Class>) {
        self.matrix.push(sections);
    }

    /// All sections of a course, in section order.
    pub fn sections_of(&self, course_id: &str) -> &[Class] {
        self.matrix
            .iter()
            .find(|row| row.first().is_some_and(|c| c.course_id == course_id))
            .map(|row| row.as_slice())
            .unwrap_or(&[])
    }

    /// Mutable sections of a course, in section order.
    pub fn sections_of_mut(&mut self, course_id: &str) -> Option<&mut [Class]> {
        self.matrix
            .iter_mut()
            .find(|row| row.first().is_some_and(|c| c.course_id == course_id))
            .map(|row| row.as_mut_slice())
    }

    /// Iterates over every section, row by row.
    pub fn classes(&self) -> impl Iterator<Item = &Class> {
        self.matrix.iter().flatten()
    }

    /// Number of sections.
    pub fn class_count(&self) -> usize {
        self.matrix.iter().map(|row| row.len()).sum()
    }

    /// Sections a student is enrolled in, in matrix order.
    pub fn enrollments_for(&self, student_id: &str) -> Vec<&Class> {
        self.classes().filter(|c| c.has_student(student_id)).collect()
    }

    /// Finds a student's plan.
    pub fn plan_for(&self, student_id: &str) -> Option<&StudentPlan> {
        self.plans.iter().find(|p| p.student_id == student_id)
    }

    /// Total enrolled seats.
    pub fn total_enrolled(&self) -> usize {
        self.classes().map(|c| c.enrolled()).sum()
    }

    /// Whether the schedule has no conflicts.
    pub fn is_conflict_free(&self) -> bool {
        self.conflicts == 0
    }

    /// Conflicts of one type.
    pub fn violations_of(&self, violation_type: ViolationType) -> Vec<&Violation> {
        self.violations
            .iter()
            .filter(|v| v.violation_type == violation_type)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Course, MeetingTime, Weekday};

    fn sample_schedule() -> Schedule {
        let alg = Course::new("ALG", 2).with_department("Math");
        let bio = Course::new("BIO", 3).with_department("Science");
        let mut s = Schedule::new("1");

        let mut a0 = Class::new(&alg, 0)
            .with_meeting_time(MeetingTime::at_hour("T1", Weekday::Monday, 9));
        a0.enroll("S1").unwrap();
        let mut a1 = Class::new(&alg, 1);
        a1.enroll("S2").unwrap();
        let mut b0 = Class::new(&bio, 0);
        b0.enroll("S1").unwrap();

        s.add_row(vec![a0, a1]);
        s.add_row(vec![b0]);
        s
    }

    #[test]
    fn test_sections_of() {
        let s = sample_schedule();
        assert_eq!(s.sections_of("ALG").len(), 2);
        assert_eq!(s.sections_of("BIO").len(), 1);
        assert!(s.sections_of("CHEM").is_empty());
        assert_eq!(s.class_count(), 3);
    }

    #[test]
    fn test_sections_of_mut() {
        let mut s = sample_schedule();
        let sections = s.sections_of_mut("ALG").unwrap();
        sections[1].enroll("S3").unwrap();
        assert_eq!(s.sections_of("ALG")[1].students, vec!["S2", "S3"]);
        assert!(s.sections_of_mut("CHEM").is_none());
    }

    #[test]
    fn test_enrollments_for() {
        let s = sample_schedule();
        let ids: Vec<String> = s.enrollments_for("S1").iter().map(|c| c.label()).collect();
        assert_eq!(ids, vec!["ALG-1", "BIO-1"]);
        assert_eq!(s.total_enrolled(), 3);
    }

    #[test]
    fn test_requirement_satisfaction() {
        let s = sample_schedule();
        let enrolled = s.enrollments_for("S1");

        assert!(Requirement::course("BIO").is_satisfied_by(&enrolled));
        assert!(!Requirement::course("CHEM").is_satisfied_by(&enrolled));

        let science = Requirement::Department {
            department: "Science".into(),
            course_id: Some("BIO".into()),
        };
        assert!(science.is_satisfied_by(&enrolled));
        assert_eq!(science.course_id(), Some("BIO"));

        let arts = Requirement::Department {
            department: "Arts".into(),
            course_id: None,
        };
        assert!(!arts.is_satisfied_by(&enrolled));
        assert_eq!(arts.course_id(), None);
        assert!(arts.describe().contains("no eligible course"));
    }

    #[test]
    fn test_violations_of() {
        let mut s = sample_schedule();
        s.violations.push(Violation::new(ViolationType::StaffingGap, "ALG-2", "unstaffed"));
        s.violations.push(Violation::new(ViolationType::UnmetRequirement, "S9", "unmet"));
        s.conflicts = 2;

        assert_eq!(s.violations_of(ViolationType::StaffingGap).len(), 1);
        assert!(s.violations_of(ViolationType::TimeOverlap).is_empty());
        assert!(!s.is_conflict_free());
        assert!(Schedule::new("2").is_conflict_free());
    }
}
