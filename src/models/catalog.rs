//! Catalog and roster containers.
//!
//! Both are built once per run by an external collaborator (an importer
//! or [`crate::synthetic::SyntheticSchool`]) and only read by the engine.

use serde::{Deserialize, Serialize};

use super::{Cohort, Course, Instructor, MeetingTime, Student};

/// The course catalog: courses, instructors, meeting times, cohorts.
///
/// Course order is significant: it fixes the schedule's row order and the
/// order in which department requirements pick a course.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    /// School or term label.
    #[serde(default)]
    pub name: String,
    /// Courses, in catalog order.
    #[serde(default)]
    pub courses: Vec<Course>,
    /// Instructors.
    #[serde(default)]
    pub instructors: Vec<Instructor>,
    /// Meeting times.
    #[serde(default)]
    pub meeting_times: Vec<MeetingTime>,
    /// Cohorts.
    #[serde(default)]
    pub cohorts: Vec<Cohort>,
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the catalog name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Adds a course.
    pub fn with_course(mut self, course: Course) -> Self {
        self.courses.push(course);
        self
    }

    /// Adds an instructor.
    pub fn with_instructor(mut self, instructor: Instructor) -> Self {
        self.instructors.push(instructor);
        self
    }

    /// Adds a meeting time.
    pub fn with_meeting_time(mut self, meeting_time: MeetingTime) -> Self {
        self.meeting_times.push(meeting_time);
        self
    }

    /// Adds a cohort.
    pub fn with_cohort(mut self, cohort: Cohort) -> Self {
        self.cohorts.push(cohort);
        self
    }

    /// Finds a course by ID.
    pub fn course(&self, id: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.id == id)
    }

    /// Finds an instructor by ID.
    pub fn instructor(&self, id: &str) -> Option<&Instructor> {
        self.instructors.iter().find(|i| i.id == id)
    }

    /// Finds a meeting time by ID.
    pub fn meeting_time(&self, id: &str) -> Option<&MeetingTime> {
        self.meeting_times.iter().find(|t| t.id == id)
    }

    /// Finds a cohort by ID.
    pub fn cohort(&self, id: &str) -> Option<&Cohort> {
        self.cohorts.iter().find(|k| k.id == id)
    }

    /// Courses of a department, in catalog order.
    pub fn courses_in_department<'a>(
        &'a self,
        department: &'a str,
    ) -> impl Iterator<Item = &'a Course> + 'a {
        self.courses.iter().filter(move |c| c.department == department)
    }
}

/// The student population, in roster order.
///
/// Roster order is the assignment order: earlier students get first pick
/// of sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    /// Students, in roster order.
    #[serde(default)]
    pub students: Vec<Student>,
}

impl Roster {
    /// Creates an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a roster from students.
    pub fn from_students(students: Vec<Student>) -> Self {
        Self { students }
    }

    /// Adds a student at the end of the roster.
    pub fn with_student(mut self, student: Student) -> Self {
        self.students.push(student);
        self
    }

    /// Finds a student by ID.
    pub fn student(&self, id: &str) -> Option<&Student> {
        self.students.iter().find(|s| s.id == id)
    }

    /// Number of students.
    pub fn len(&self) -> usize {
        self.students.len()
    }

    /// Whether the roster has no students.
    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }
}
