//! Conflict scorer.
//!
//! Reads a finished [`Schedule`] and itemizes everything that degrades it.
//! Scoring is a pure function of the schedule: it mutates nothing and
//! needs neither the catalog nor the roster.
//!
//! # Conflicts
//!
//! | Conflict | Counted |
//! |----------|---------|
//! | Unmet requirement | per student, per requirement not satisfied by an enrollment |
//! | Time overlap | per student, per pair of enrolled sections that overlap |
//! | Missing prerequisite | per student, per enrolled section lacking a prerequisite |
//! | Instructor double-booking | per pair of sections sharing an instructor at overlapping times |
//! | Staffing gap | per section without an instructor or a meeting time |
//!
//! A section over capacity is not a conflict: it is reported as
//! [`SchedulingError::CapacityExceeded`].

use std::collections::{HashMap, HashSet};

use crate::error::SchedulingError;
use crate::models::{Class, Schedule, Violation, ViolationType};

/// Itemized conflicts of a schedule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConflictReport {
    /// Conflicts in detection order.
    pub violations: Vec<Violation>,
}

impl ConflictReport {
    /// Total conflict count.
    pub fn total(&self) -> usize {
        self.violations.len()
    }

    /// Number of conflicts of one type.
    pub fn count(&self, violation_type: ViolationType) -> usize {
        self.violations
            .iter()
            .filter(|v| v.violation_type == violation_type)
            .count()
    }

    /// Conflicts that exist regardless of which students were turned away.
    pub fn structural(&self) -> usize {
        self.total() - self.count(ViolationType::UnmetRequirement)
    }

    /// Whether no conflicts were found.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    fn push(&mut self, violation_type: ViolationType, entity: impl Into<String>, message: String) {
        self.violations
            .push(Violation::new(violation_type, entity, message));
    }
}

/// Scores a schedule.
///
/// # Errors
/// [`SchedulingError::CapacityExceeded`] if any section holds more students
/// than its capacity.
pub fn score(schedule: &Schedule) -> Result<ConflictReport, SchedulingError> {
    for class in schedule.classes() {
        if class.enrolled() > class.capacity as usize {
            return Err(SchedulingError::CapacityExceeded {
                section: class.label(),
                enrolled: class.enrolled(),
                capacity: class.capacity,
            });
        }
    }

    let mut report = ConflictReport::default();
    score_staffing(schedule, &mut report);
    score_students(schedule, &mut report);
    score_instructors(schedule, &mut report);
    Ok(report)
}

fn score_staffing(schedule: &Schedule, report: &mut ConflictReport) {
    for class in schedule.classes().filter(|c| !c.is_staffed()) {
        let missing = match (&class.instructor_id, &class.meeting_time) {
            (None, None) => "instructor and meeting time",
            (None, Some(_)) => "instructor",
            _ => "meeting time",
        };
        report.push(
            ViolationType::StaffingGap,
            class.label(),
            format!("Section {} has no {missing}", class.label()),
        );
    }
}

fn score_students(schedule: &Schedule, report: &mut ConflictReport) {
    // Roster order first, then any enrolled student without a plan.
    let mut students: Vec<&str> = schedule.plans.iter().map(|p| p.student_id.as_str()).collect();
    let mut seen: HashSet<&str> = students.iter().copied().collect();
    for class in schedule.classes() {
        for id in &class.students {
            if seen.insert(id.as_str()) {
                students.push(id.as_str());
            }
        }
    }

    let mut enrollments: HashMap<&str, Vec<&Class>> = HashMap::new();
    for class in schedule.classes() {
        for id in &class.students {
            enrollments.entry(id.as_str()).or_default().push(class);
        }
    }

    for student_id in students {
        let enrolled = enrollments.get(student_id).map(|v| v.as_slice()).unwrap_or(&[]);

        for (i, a) in enrolled.iter().enumerate() {
            for b in &enrolled[i + 1..] {
                if a.overlaps(b) {
                    report.push(
                        ViolationType::TimeOverlap,
                        student_id,
                        format!(
                            "Student '{student_id}' holds overlapping sections {} and {}",
                            a.label(),
                            b.label()
                        ),
                    );
                }
            }
        }

        let Some(plan) = schedule.plan_for(student_id) else {
            continue;
        };

        for requirement in &plan.requirements {
            if !requirement.is_satisfied_by(enrolled) {
                report.push(
                    ViolationType::UnmetRequirement,
                    student_id,
                    format!(
                        "Student '{student_id}' was not placed for {}",
                        requirement.describe()
                    ),
                );
            }
        }

        for class in enrolled {
            let missing: Vec<&str> = class
                .prerequisites
                .iter()
                .filter(|p| !plan.completed_courses.contains(*p))
                .map(|p| p.as_str())
                .collect();
            if !missing.is_empty() {
                report.push(
                    ViolationType::MissingPrerequisite,
                    student_id,
                    format!(
                        "Student '{student_id}' is enrolled in {} without {}",
                        class.label(),
                        missing.join(", ")
                    ),
                );
            }
        }
    }
}

fn score_instructors(schedule: &Schedule, report: &mut ConflictReport) {
    let mut by_instructor: Vec<(&str, Vec<&Class>)> = Vec::new();
    for class in schedule.classes().filter(|c| c.meeting_time.is_some()) {
        let Some(instructor) = class.instructor_id.as_deref() else {
            continue;
        };
        match by_instructor.iter_mut().find(|(id, _)| *id == instructor) {
            Some((_, classes)) => classes.push(class),
            None => by_instructor.push((instructor, vec![class])),
        }
    }

    for (instructor, classes) in by_instructor {
        for (i, a) in classes.iter().enumerate() {
            for b in &classes[i + 1..] {
                if a.overlaps(b) {
                    report.push(
                        ViolationType::InstructorDoubleBooked,
                        instructor,
                        format!(
                            "Instructor '{instructor}' teaches {} and {} at the same time",
                            a.label(),
                            b.label()
                        ),
                    );
                }
            }
        }
    }
}
