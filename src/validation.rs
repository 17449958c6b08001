//! Input validation for timetabling runs.
//!
//! Checks structural integrity of the catalog and roster before any
//! section is built or any student is placed. Detects:
//! - Duplicate IDs
//! - Non-positive section capacities and malformed meeting times
//! - Dangling instructor, meeting time, course, and cohort references
//! - Circular prerequisite chains (DAG validation)
//!
//! # Reference
//! Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.4 (Topological Sort)

use crate::models::{Catalog, Roster, MINUTES_PER_DAY};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// A course has a section capacity of zero.
    InvalidCapacity,
    /// A meeting time has zero length or runs past midnight.
    InvalidMeetingTime,
    /// A course references an instructor that doesn't exist.
    InvalidInstructorReference,
    /// A course references a meeting time that doesn't exist.
    InvalidMeetingTimeReference,
    /// A cohort or student references a course that doesn't exist.
    InvalidCourseReference,
    /// A course references a prerequisite that doesn't exist.
    InvalidPrerequisite,
    /// Prerequisite graph contains a cycle.
    CyclicDependency,
    /// A student references a cohort that doesn't exist.
    InvalidCohortReference,
}

impl ValidationError {
    /// Creates a validation error.
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Validates a catalog.
///
/// Checks:
/// 1. No duplicate course, instructor, meeting time, or cohort IDs
/// 2. Every course has a section capacity > 0
/// 3. Every meeting time has a positive length and ends by midnight
/// 4. Course instructor and meeting time references resolve
/// 5. Prerequisite references resolve
/// 6. Cohort required-course references resolve
/// 7. No circular prerequisite chains
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_catalog(catalog: &Catalog) -> ValidationResult {
    let mut errors = Vec::new();

    let course_ids = collect_ids(
        catalog.courses.iter().map(|c| c.id.as_str()),
        "course",
        &mut errors,
    );
    let instructor_ids = collect_ids(
        catalog.instructors.iter().map(|i| i.id.as_str()),
        "instructor",
        &mut errors,
    );
    let meeting_time_ids = collect_ids(
        catalog.meeting_times.iter().map(|t| t.id.as_str()),
        "meeting time",
        &mut errors,
    );
    collect_ids(catalog.cohorts.iter().map(|k| k.id.as_str()), "cohort", &mut errors);

    for time in &catalog.meeting_times {
        if time.duration_minutes == 0 || time.end_minute() > MINUTES_PER_DAY {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidMeetingTime,
                format!(
                    "Meeting time '{}' ({} for {} min) is empty or runs past midnight",
                    time.id, time, time.duration_minutes
                ),
            ));
        }
    }

    for course in &catalog.courses {
        if course.max_class_size == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidCapacity,
                format!("Course '{}' has a maximum class size of 0", course.id),
            ));
        }
        for inst in &course.instructors {
            if !instructor_ids.contains(inst.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidInstructorReference,
                    format!(
                        "Course '{}' references unknown instructor '{}'",
                        course.id, inst
                    ),
                ));
            }
        }
        for time in &course.meeting_times {
            if !meeting_time_ids.contains(time.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidMeetingTimeReference,
                    format!(
                        "Course '{}' references unknown meeting time '{}'",
                        course.id, time
                    ),
                ));
            }
        }
        for pred in &course.prerequisites {
            if !course_ids.contains(pred.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidPrerequisite,
                    format!(
                        "Course '{}' references unknown prerequisite '{}'",
                        course.id, pred
                    ),
                ));
            }
        }
    }

    for cohort in &catalog.cohorts {
        for course in &cohort.required_courses {
            if !course_ids.contains(course.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidCourseReference,
                    format!(
                        "Cohort '{}' requires unknown course '{}'",
                        cohort.id, course
                    ),
                ));
            }
        }
    }

    if let Some(cycle_err) = detect_cycles(catalog) {
        errors.push(cycle_err);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates a roster against the catalog it will be scheduled with.
///
/// Checks:
/// 1. No duplicate student IDs
/// 2. Cohort references resolve
/// 3. Completed-course references resolve
pub fn validate_roster(roster: &Roster, catalog: &Catalog) -> ValidationResult {
    let mut errors = Vec::new();

    collect_ids(roster.students.iter().map(|s| s.id.as_str()), "student", &mut errors);

    for student in &roster.students {
        if let Some(cohort) = &student.cohort {
            if catalog.cohort(cohort).is_none() {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidCohortReference,
                    format!(
                        "Student '{}' references unknown cohort '{}'",
                        student.id, cohort
                    ),
                ));
            }
        }
        for course in &student.completed_courses {
            if catalog.course(course).is_none() {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidCourseReference,
                    format!(
                        "Student '{}' completed unknown course '{}'",
                        student.id, course
                    ),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn collect_ids<'a>(
    ids: impl Iterator<Item = &'a str>,
    entity: &str,
    errors: &mut Vec<ValidationError>,
) -> HashSet<&'a str> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate {entity} ID: {id}"),
            ));
        }
    }
    seen
}

/// Detects cycles in the prerequisite graph using DFS.
///
/// Nodes are visited in catalog order so the reported edge is stable.
///
/// # Algorithm
/// Topological sort via DFS with an explicit stack. If a back-edge is found
/// (reaching a node currently on the stack), a cycle exists and that edge
/// lies on it.
fn detect_cycles(catalog: &Catalog) -> Option<ValidationError> {
    // prerequisite → courses that require it
    let mut adj: HashMap<&str, Vec<&str>> = HashMap::new();
    for course in &catalog.courses {
        for pred in &course.prerequisites {
            adj.entry(pred.as_str()).or_default().push(course.id.as_str());
        }
    }

    let mut visited = HashSet::new();

    for course in &catalog.courses {
        let node = course.id.as_str();
        if visited.contains(node) {
            continue;
        }
        if let Some((prerequisite, dependent)) = find_back_edge(node, &adj, &mut visited) {
            let message = if prerequisite == dependent {
                format!(
                    "Circular prerequisite chain detected: course '{dependent}' requires itself"
                )
            } else {
                format!(
                    "Circular prerequisite chain detected: course '{dependent}' requires \
                     '{prerequisite}', which already depends on '{dependent}'"
                )
            };
            return Some(ValidationError::new(
                ValidationErrorKind::CyclicDependency,
                message,
            ));
        }
    }

    None
}

/// Returns the back-edge `(prerequisite, dependent)` closing a cycle
/// reachable from `start`, if any.
fn find_back_edge<'a>(
    start: &'a str,
    adj: &HashMap<&'a str, Vec<&'a str>>,
    visited: &mut HashSet<&'a str>,
) -> Option<(&'a str, &'a str)> {
    let mut in_stack = HashSet::new();
    // (node, index of the next neighbor to explore)
    let mut stack: Vec<(&'a str, usize)> = vec![(start, 0)];
    visited.insert(start);
    in_stack.insert(start);

    while let Some(frame) = stack.last_mut() {
        let (node, cursor) = *frame;
        match adj.get(node).and_then(|n| n.get(cursor)).copied() {
            Some(next) => {
                frame.1 += 1;
                if in_stack.contains(next) {
                    return Some((node, next));
                }
                if visited.insert(next) {
                    in_stack.insert(next);
                    stack.push((next, 0));
                }
            }
            None => {
                in_stack.remove(node);
                stack.pop();
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Cohort, Course, Instructor, MeetingTime, Student, Weekday};

    fn sample_catalog() -> Catalog {
        Catalog::new()
            .with_instructor(Instructor::new("I1"))
            .with_instructor(Instructor::new("I2"))
            .with_meeting_time(MeetingTime::at_hour("T1", Weekday::Monday, 9))
            .with_meeting_time(MeetingTime::at_hour("T2", Weekday::Tuesday, 9))
            .with_course(
                Course::new("ALG1", 20)
                    .with_department("Math")
                    .with_instructor("I1")
                    .with_meeting_time("T1"),
            )
            .with_course(
                Course::new("ALG2", 20)
                    .with_department("Math")
                    .with_instructor("I2")
                    .with_meeting_time("T2")
                    .with_prerequisite("ALG1"),
            )
            .with_cohort(Cohort::new("K1").with_required_course("ALG1"))
    }

    fn has_kind(errors: &[ValidationError], kind: ValidationErrorKind) -> bool {
        errors.iter().any(|e| e.kind == kind)
    }

    #[test]
    fn test_valid_catalog() {
        assert!(validate_catalog(&sample_catalog()).is_ok());
    }

    #[test]
    fn test_duplicate_course_id() {
        let catalog = sample_catalog().with_course(Course::new("ALG1", 10));
        let errors = validate_catalog(&catalog).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId && e.message.contains("course")));
    }

    #[test]
    fn test_zero_capacity() {
        let catalog = sample_catalog().with_course(Course::new("EMPTY", 0));
        let errors = validate_catalog(&catalog).unwrap_err();
        assert!(has_kind(&errors, ValidationErrorKind::InvalidCapacity));
        assert!(errors[0].message.contains("EMPTY"));
    }

    #[test]
    fn test_invalid_meeting_time() {
        let catalog = sample_catalog()
            .with_meeting_time(MeetingTime::at_hour("LATE", Weekday::Friday, 23).with_duration(90))
            .with_meeting_time(MeetingTime::at_hour("ZERO", Weekday::Friday, 9).with_duration(0))
            .with_meeting_time(MeetingTime::at_hour("HUGE", Weekday::Friday, u32::MAX));
        let errors = validate_catalog(&catalog).unwrap_err();
        assert_eq!(
            errors
                .iter()
                .filter(|e| e.kind == ValidationErrorKind::InvalidMeetingTime)
                .count(),
            3
        );
    }

    #[test]
    fn test_dangling_references() {
        let catalog = sample_catalog().with_course(
            Course::new("X", 10)
                .with_instructor("NOBODY")
                .with_meeting_time("NEVER")
                .with_prerequisite("MISSING"),
        );
        let errors = validate_catalog(&catalog).unwrap_err();
        assert!(has_kind(&errors, ValidationErrorKind::InvalidInstructorReference));
        assert!(has_kind(&errors, ValidationErrorKind::InvalidMeetingTimeReference));
        assert!(has_kind(&errors, ValidationErrorKind::InvalidPrerequisite));
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_cohort_unknown_course() {
        let catalog =
            sample_catalog().with_cohort(Cohort::new("K2").with_required_course("NOPE"));
        let errors = validate_catalog(&catalog).unwrap_err();
        assert!(has_kind(&errors, ValidationErrorKind::InvalidCourseReference));
    }

    #[test]
    fn test_prerequisite_cycle() {
        // A → B → C → A
        let catalog = Catalog::new()
            .with_course(Course::new("A", 10).with_prerequisite("C"))
            .with_course(Course::new("B", 10).with_prerequisite("A"))
            .with_course(Course::new("C", 10).with_prerequisite("B"));
        let errors = validate_catalog(&catalog).unwrap_err();
        assert!(has_kind(&errors, ValidationErrorKind::CyclicDependency));
        assert!(errors[0].message.contains("'A'"));
        assert!(errors[0].message.contains("'C'"));
    }

    #[test]
    fn test_cycle_names_courses_on_the_cycle() {
        // A leads into B ↔ C but is not part of the cycle
        let catalog = Catalog::new()
            .with_course(Course::new("A", 10))
            .with_course(Course::new("B", 10).with_prerequisite("A").with_prerequisite("C"))
            .with_course(Course::new("C", 10).with_prerequisite("B"));
        let errors = validate_catalog(&catalog).unwrap_err();
        assert_eq!(errors.len(), 1);
        let message = &errors[0].message;
        assert!(message.contains("'B'") && message.contains("'C'"), "{message}");
        assert!(!message.contains("'A'"), "{message}");
    }

    #[test]
    fn test_long_prerequisite_chain() {
        let mut catalog = Catalog::new().with_course(Course::new("C0", 10));
        for i in 1..50_000 {
            let course = Course::new(format!("C{i}"), 10).with_prerequisite(format!("C{}", i - 1));
            catalog = catalog.with_course(course);
        }
        assert!(validate_catalog(&catalog).is_ok());
    }

    #[test]
    fn test_self_prerequisite_is_cycle() {
        let catalog = Catalog::new().with_course(Course::new("A", 10).with_prerequisite("A"));
        let errors = validate_catalog(&catalog).unwrap_err();
        assert!(has_kind(&errors, ValidationErrorKind::CyclicDependency));
        assert!(errors[0].message.contains("'A' requires itself"));
    }

    #[test]
    fn test_prerequisite_diamond_is_not_cycle() {
        let catalog = Catalog::new()
            .with_course(Course::new("A", 10))
            .with_course(Course::new("B", 10).with_prerequisite("A"))
            .with_course(Course::new("C", 10).with_prerequisite("A"))
            .with_course(Course::new("D", 10).with_prerequisite("B").with_prerequisite("C"));
        assert!(validate_catalog(&catalog).is_ok());
    }

    #[test]
    fn test_valid_roster() {
        let roster = Roster::new()
            .with_student(Student::new("S1").with_cohort("K1").with_completed("ALG1"))
            .with_student(Student::new("S2"));
        assert!(validate_roster(&roster, &sample_catalog()).is_ok());
    }

    #[test]
    fn test_roster_dangling_references() {
        let roster = Roster::new()
            .with_student(Student::new("S1").with_cohort("K9"))
            .with_student(Student::new("S2").with_completed("PHYS"))
            .with_student(Student::new("S2"));
        let errors = validate_roster(&roster, &sample_catalog()).unwrap_err();
        assert!(has_kind(&errors, ValidationErrorKind::InvalidCohortReference));
        assert!(has_kind(&errors, ValidationErrorKind::InvalidCourseReference));
        assert!(has_kind(&errors, ValidationErrorKind::DuplicateId));
        assert_eq!(errors.len(), 3);
    }
}
