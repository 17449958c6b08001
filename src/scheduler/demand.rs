//! Course needs and expected demand.
//!
//! # Needed Courses
//!
//! - **Cohort member**: the cohort's required courses not yet completed
//!   (cohort order, deduplicated), then one requirement per required
//!   department not already covered by a completed course. A department
//!   requirement is forecast onto a required course of that department if
//!   the plan has one, else onto the first eligible catalog course (not
//!   completed, prerequisites all completed). With no candidate it stays
//!   unresolved and can never be met. The assignment engine re-resolves
//!   department requirements against actual enrollments.
//! - **Cohort-less student**: every catalog course not yet completed whose
//!   prerequisites are all completed.
//!
//! # Expected Demand
//! The number of students whose requirements resolve to a course, each
//! student counted once per course. Sizes the course's sections.

use std::collections::{BTreeMap, HashSet};

use crate::models::{Catalog, Cohort, Course, Requirement, Roster, Student};

/// Derives a student's requirements, in placement order.
pub fn needed_courses(student: &Student, catalog: &Catalog) -> Vec<Requirement> {
    match student.cohort.as_deref().and_then(|id| catalog.cohort(id)) {
        Some(cohort) => cohort_requirements(student, cohort, catalog),
        None => open_requirements(student, catalog),
    }
}

fn cohort_requirements(
    student: &Student,
    cohort: &Cohort,
    catalog: &Catalog,
) -> Vec<Requirement> {
    let mut requirements = Vec::new();
    let mut seen_courses = HashSet::new();

    for course_id in &cohort.required_courses {
        if student.has_completed(course_id) || !seen_courses.insert(course_id.as_str()) {
            continue;
        }
        requirements.push(Requirement::course(course_id));
    }

    let mut seen_departments = HashSet::new();
    for department in &cohort.required_departments {
        if !seen_departments.insert(department.as_str()) {
            continue;
        }

        let covered_by_history = student
            .completed_courses
            .iter()
            .filter_map(|id| catalog.course(id))
            .any(|c| &c.department == department);
        if covered_by_history {
            continue;
        }

        let planned = requirements
            .iter()
            .filter_map(|r| match r {
                Requirement::Course { course_id } => catalog.course(course_id),
                Requirement::Department { .. } => None,
            })
            .find(|c| &c.department == department);
        let pick = planned.or_else(|| department_candidates(student, department, catalog).next());
        requirements.push(Requirement::Department {
            department: department.clone(),
            course_id: pick.map(|c| c.id.clone()),
        });
    }

    requirements
}

/// Courses of a department a student may take, in catalog order.
///
/// Eligible means not yet completed with every prerequisite completed.
pub fn department_candidates<'a>(
    student: &'a Student,
    department: &'a str,
    catalog: &'a Catalog,
) -> impl Iterator<Item = &'a Course> + 'a {
    catalog.courses_in_department(department).filter(move |c| {
        !student.has_completed(&c.id) && c.prerequisites_met(&student.completed_courses)
    })
}

fn open_requirements(student: &Student, catalog: &Catalog) -> Vec<Requirement> {
    catalog
        .courses
        .iter()
        .filter(|c| {
            !student.has_completed(&c.id) && c.prerequisites_met(&student.completed_courses)
        })
        .map(|c| Requirement::course(&c.id))
        .collect()
}

/// Counts, per catalog course, the students whose requirements resolve to it.
///
/// Every catalog course has an entry, possibly zero.
pub fn expected_demand(roster: &Roster, catalog: &Catalog) -> BTreeMap<String, usize> {
    let mut demand: BTreeMap<String, usize> =
        catalog.courses.iter().map(|c| (c.id.clone(), 0)).collect();

    for student in &roster.students {
        let requirements = needed_courses(student, catalog);
        let mut counted = HashSet::new();
        for course_id in requirements.iter().filter_map(|r| r.course_id()) {
            if !counted.insert(course_id) {
                continue;
            }
            if let Some(count) = demand.get_mut(course_id) {
                *count += 1;
            }
        }
    }

    demand
}
