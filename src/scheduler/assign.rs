//! Assignment engine.
//!
//! Places every student, in roster order, into one section per needed
//! course.
//!
//! # Algorithm
//!
//! For each student:
//! 1. Derive the needed courses ([`super::needed_courses`]).
//! 2. For each need, scan the course's sections in section order and take
//!    the first one that has a free seat, does not overlap any meeting
//!    time the student already holds, and is not a second section of the
//!    same course.
//! 3. A department need is covered by a completed course or a section the
//!    student already holds in that department. Otherwise the department's
//!    eligible courses are tried in catalog order, each first-fit as above.
//! 4. If nothing qualifies, the need stays unmet and is tallied.
//!
//! Enrollment is the only mutation. Nothing is randomized, so identical
//! inputs reproduce identical enrollments.
//!
//! # Complexity
//! O(n * r * s * h) where n=students, r=needs/student, s=sections/course,
//! h=sections already held by the student.

use tracing::debug;

use super::demand::{department_candidates, needed_courses};
use crate::error::SchedulingError;
use crate::models::{Catalog, MeetingTime, Requirement, Roster, Schedule, Student, StudentPlan};
use crate::validation::validate_roster;

/// Enrolls the roster into the schedule's sections.
///
/// Records one [`StudentPlan`] per student in `schedule.plans`.
///
/// # Returns
/// The number of unmet requirements (one per need left unplaced).
///
/// # Errors
/// - [`SchedulingError::InvalidRoster`] before any student is placed.
/// - [`SchedulingError::CapacityExceeded`] if a section refuses a seat the
///   engine believed free (an engine defect).
pub fn assign(
    schedule: &mut Schedule,
    roster: &Roster,
    catalog: &Catalog,
) -> Result<usize, SchedulingError> {
    validate_roster(roster, catalog).map_err(SchedulingError::InvalidRoster)?;

    let mut unmet = 0;
    for student in &roster.students {
        let mut plan = StudentPlan::new(&student.id, student.completed_courses.clone());
        let mut held: Vec<MeetingTime> = Vec::new();

        for requirement in needed_courses(student, catalog) {
            let (requirement, placed) = match requirement {
                Requirement::Course { course_id } => {
                    let placed = place(schedule, &student.id, &course_id, &mut held)?;
                    (Requirement::Course { course_id }, placed)
                }
                Requirement::Department { department, course_id } => {
                    let resolved =
                        place_in_department(schedule, student, &department, catalog, &mut held)?;
                    let placed = resolved.is_some();
                    let course_id = resolved.or(course_id);
                    (Requirement::Department { department, course_id }, placed)
                }
            };
            if !placed {
                debug!(
                    student = %student.id,
                    requirement = %requirement.describe(),
                    "requirement unmet"
                );
                unmet += 1;
            }
            plan.requirements.push(requirement);
        }

        schedule.plans.push(plan);
    }

    Ok(unmet)
}

/// Resolves a department need against what the student already holds.
///
/// Returns the course covering the department, or `None` if no eligible
/// course could take the student.
fn place_in_department(
    schedule: &mut Schedule,
    student: &Student,
    department: &str,
    catalog: &Catalog,
    held: &mut Vec<MeetingTime>,
) -> Result<Option<String>, SchedulingError> {
    if let Some(class) = schedule
        .enrollments_for(&student.id)
        .into_iter()
        .find(|c| c.department == department)
    {
        return Ok(Some(class.course_id.clone()));
    }

    for course in department_candidates(student, department, catalog) {
        if place(schedule, &student.id, &course.id, held)? {
            return Ok(Some(course.id.clone()));
        }
    }
    Ok(None)
}

/// First-fit placement of one student into one course.
///
/// Returns `true` if the student holds a section of the course afterwards.
fn place(
    schedule: &mut Schedule,
    student_id: &str,
    course_id: &str,
    held: &mut Vec<MeetingTime>,
) -> Result<bool, SchedulingError> {
    let Some(sections) = schedule.sections_of_mut(course_id) else {
        return Ok(false);
    };
    if sections.iter().any(|c| c.has_student(student_id)) {
        return Ok(true);
    }

    let slot = sections.iter().position(|class| {
        !class.is_full() && !held.iter().any(|time| class.meets_during(time))
    });
    let Some(index) = slot else {
        return Ok(false);
    };

    let class = &mut sections[index];
    class.enroll(student_id)?;
    if let Some(time) = &class.meeting_time {
        held.push(time.clone());
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Class, Cohort, Course, Requirement, Student, Weekday};
    use crate::scheduler::SectionBuilder;
    use crate::validation::ValidationErrorKind;

    fn build(catalog: &Catalog, demand: usize) -> Schedule {
        let mut builder = SectionBuilder::new(catalog);
        let mut schedule = Schedule::new("test");
        for course in &catalog.courses {
            schedule.add_row(builder.build_sections(course, demand));
        }
        schedule
    }

    fn roster_of(n: usize) -> Roster {
        Roster::from_students((1..=n).map(|i| Student::new(format!("S{i}"))).collect())
    }

    #[test]
    fn test_first_fit_in_roster_order() {
        let catalog = Catalog::new()
            .with_meeting_time(MeetingTime::at_hour("T1", Weekday::Monday, 9))
            .with_course(Course::new("ALG", 2).with_name("Algebra"));
        let mut schedule = build(&catalog, 2);

        let unmet = assign(&mut schedule, &roster_of(3), &catalog).unwrap();

        assert_eq!(unmet, 1);
        assert_eq!(schedule.sections_of("ALG")[0].students, vec!["S1", "S2"]);
        assert_eq!(schedule.plans.len(), 3);
    }

    #[test]
    fn test_fills_lowest_section_first() {
        let catalog = Catalog::new()
            .with_meeting_time(MeetingTime::at_hour("T1", Weekday::Monday, 9))
            .with_meeting_time(MeetingTime::at_hour("T2", Weekday::Tuesday, 9))
            .with_course(Course::new("ALG", 2));
        let mut schedule = build(&catalog, 3);

        let unmet = assign(&mut schedule, &roster_of(3), &catalog).unwrap();

        assert_eq!(unmet, 0);
        let sections = schedule.sections_of("ALG");
        assert_eq!(sections[0].students, vec!["S1", "S2"]);
        assert_eq!(sections[1].students, vec!["S3"]);
    }

    #[test]
    fn test_overlap_blocks_second_course() {
        let catalog = Catalog::new()
            .with_meeting_time(MeetingTime::at_hour("T1", Weekday::Monday, 9))
            .with_course(Course::new("ALG", 10).with_meeting_time("T1"))
            .with_course(Course::new("BIO", 10).with_meeting_time("T1"))
            .with_cohort(
                Cohort::new("K1")
                    .with_required_course("ALG")
                    .with_required_course("BIO"),
            );
        let roster = Roster::new().with_student(Student::new("S1").with_cohort("K1"));
        let mut schedule = build(&catalog, 1);

        let unmet = assign(&mut schedule, &roster, &catalog).unwrap();

        assert_eq!(unmet, 1);
        assert_eq!(schedule.enrollments_for("S1").len(), 1);
        assert_eq!(schedule.sections_of("ALG")[0].students, vec!["S1"]);
    }

    #[test]
    fn test_overlap_skips_to_later_section() {
        let alg = Course::new("ALG", 10);
        let bio = Course::new("BIO", 10);
        let catalog = Catalog::new().with_course(alg.clone()).with_course(bio.clone());
        let early = MeetingTime::at_hour("T1", Weekday::Monday, 9);
        let late = MeetingTime::at_hour("T2", Weekday::Monday, 11);

        let mut schedule = Schedule::new("test");
        schedule.add_row(vec![Class::new(&alg, 0).with_meeting_time(early.clone())]);
        schedule.add_row(vec![
            Class::new(&bio, 0).with_meeting_time(early),
            Class::new(&bio, 1).with_meeting_time(late),
        ]);
        let roster = Roster::new().with_student(Student::new("S1"));

        let unmet = assign(&mut schedule, &roster, &catalog).unwrap();

        assert_eq!(unmet, 0);
        let bio_sections = schedule.sections_of("BIO");
        assert!(bio_sections[0].students.is_empty());
        assert_eq!(bio_sections[1].students, vec!["S1"]);
    }

    #[test]
    fn test_unresolved_department_counts_as_unmet() {
        let catalog = Catalog::new()
            .with_course(Course::new("ALG", 10).with_department("Math"))
            .with_cohort(Cohort::new("K1").with_required_department("Arts"));
        let roster = Roster::new().with_student(Student::new("S1").with_cohort("K1"));
        let mut schedule = build(&catalog, 1);

        let unmet = assign(&mut schedule, &roster, &catalog).unwrap();

        assert_eq!(unmet, 1);
        let plan = schedule.plan_for("S1").unwrap();
        assert_eq!(
            plan.requirements,
            vec![Requirement::Department {
                department: "Arts".into(),
                course_id: None,
            }]
        );
    }

    #[test]
    fn test_department_falls_back_when_required_course_is_full() {
        let catalog = Catalog::new()
            .with_meeting_time(MeetingTime::at_hour("T1", Weekday::Monday, 9))
            .with_course(Course::new("ALG", 1).with_department("Math"))
            .with_course(Course::new("GEO", 5).with_department("Math"))
            .with_cohort(
                Cohort::new("K1")
                    .with_required_course("ALG")
                    .with_required_department("Math"),
            );
        let roster = Roster::new()
            .with_student(Student::new("S1").with_cohort("K1"))
            .with_student(Student::new("S2").with_cohort("K1"));
        let mut schedule = build(&catalog, 1);

        let unmet = assign(&mut schedule, &roster, &catalog).unwrap();

        // ALG itself stays unmet for S2, but Math is covered through GEO
        assert_eq!(unmet, 1);
        assert_eq!(schedule.sections_of("ALG")[0].students, vec!["S1"]);
        assert_eq!(schedule.sections_of("GEO")[0].students, vec!["S2"]);
        let plan = schedule.plan_for("S2").unwrap();
        assert_eq!(
            plan.requirements[1],
            Requirement::Department {
                department: "Math".into(),
                course_id: Some("GEO".into()),
            }
        );
    }

    #[test]
    fn test_department_covered_by_assigned_course() {
        let catalog = Catalog::new()
            .with_meeting_time(MeetingTime::at_hour("T1", Weekday::Monday, 9))
            .with_meeting_time(MeetingTime::at_hour("T2", Weekday::Monday, 10))
            .with_course(Course::new("ALG", 5).with_department("Math"))
            .with_course(Course::new("GEO", 5).with_department("Math"))
            .with_cohort(
                Cohort::new("K1")
                    .with_required_course("ALG")
                    .with_required_department("Math"),
            );
        let roster = Roster::new().with_student(Student::new("S1").with_cohort("K1"));
        let mut schedule = build(&catalog, 1);

        let unmet = assign(&mut schedule, &roster, &catalog).unwrap();

        assert_eq!(unmet, 0);
        assert_eq!(schedule.enrollments_for("S1").len(), 1);
        assert!(schedule.sections_of("GEO")[0].students.is_empty());
    }

    #[test]
    fn test_invalid_roster_places_nobody() {
        let catalog = Catalog::new().with_course(Course::new("ALG", 10));
        let roster = Roster::new()
            .with_student(Student::new("S1"))
            .with_student(Student::new("S2").with_cohort("GHOST"));
        let mut schedule = build(&catalog, 2);

        let err = assign(&mut schedule, &roster, &catalog).unwrap_err();

        match err {
            SchedulingError::InvalidRoster(errors) => {
                assert_eq!(errors[0].kind, ValidationErrorKind::InvalidCohortReference);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(schedule.total_enrolled(), 0);
        assert!(schedule.plans.is_empty());
    }

    #[test]
    fn test_capacity_never_exceeded() {
        let catalog = Catalog::new()
            .with_meeting_time(MeetingTime::at_hour("T1", Weekday::Monday, 9))
            .with_meeting_time(MeetingTime::at_hour("T2", Weekday::Monday, 10))
            .with_course(Course::new("ALG", 3))
            .with_course(Course::new("BIO", 4));
        // Sized for fewer students than the roster holds
        let mut schedule = build(&catalog, 5);

        let unmet = assign(&mut schedule, &roster_of(20), &catalog).unwrap();

        assert!(schedule.classes().all(|c| c.enrolled() <= c.capacity as usize));
        assert_eq!(schedule.total_enrolled() + unmet, 40);
    }
}
