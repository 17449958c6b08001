//! Synthetic catalog and roster generation.
//!
//! Produces plausible schools for demos and load tests. All randomness in
//! the crate lives here; the scheduler itself is deterministic. A fixed
//! seed reproduces the same school.
//!
//! # Usage
//!
//! ```
//! use u_timetable::synthetic::SyntheticSchool;
//! use u_timetable::scheduler::TimetableScheduler;
//!
//! let mut gen = SyntheticSchool::new(7);
//! let catalog = gen.catalog(12, 6);
//! let roster = gen.roster(80);
//!
//! let schedule = TimetableScheduler::new().schedule(&catalog, &roster).unwrap();
//! assert_eq!(schedule.matrix.len(), 12);
//! ```

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

use crate::models::{Catalog, Course, Instructor, MeetingTime, Roster, Student, Weekday};

const FIRST_NAMES: &[&str] = &[
    "Ada", "Alan", "Barbara", "Claude", "Donald", "Edsger", "Frances", "Grace", "Hedy", "John",
    "Katherine", "Leslie", "Margaret", "Niklaus", "Radia", "Tim",
];

const LAST_NAMES: &[&str] = &[
    "Allen", "Backus", "Cerf", "Dijkstra", "Hamilton", "Hopper", "Johnson", "Kay", "Knuth",
    "Lamport", "Liskov", "Lovelace", "Perlman", "Ritchie", "Turing", "Wirth",
];

const ADJECTIVES: &[&str] = &[
    "Advanced", "Applied", "Brave", "Curious", "Elementary", "Gentle", "Modern", "Practical",
    "Quiet", "Rapid",
];

const ANIMALS: &[&str] = &[
    "Badger", "Crane", "Dolphin", "Falcon", "Heron", "Lynx", "Otter", "Panda", "Tortoise", "Wolf",
];

const JOB_TITLES: &[&str] = &[
    "Architecture", "Bookkeeping", "Carpentry", "Design", "Engineering", "Forestry", "Logistics",
    "Navigation", "Surveying", "Translation",
];

const DEPARTMENTS: &[&str] = &["Arts", "Humanities", "Math", "Science", "Technology"];

/// Largest roster drawn when no size is requested.
pub const MAX_RANDOM_STUDENTS: usize = 80;

/// Seeded generator of synthetic schools.
#[derive(Debug, Clone)]
pub struct SyntheticSchool {
    rng: StdRng,
}

impl SyntheticSchool {
    /// Creates a generator from a seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// A cohort-less student body of `n` students.
    ///
    /// `n == 0` draws a size in `1..MAX_RANDOM_STUDENTS`.
    pub fn students(&mut self, n: usize) -> Vec<Student> {
        let n = if n == 0 {
            self.rng.random_range(1..MAX_RANDOM_STUDENTS)
        } else {
            n
        };
        (1..=n)
            .map(|i| Student::new(format!("S{i:03}")).with_name(self.person_name()))
            .collect()
    }

    /// `n` instructors.
    pub fn instructors(&mut self, n: usize) -> Vec<Instructor> {
        (1..=n)
            .map(|i| Instructor::new(format!("I{i:02}")).with_name(self.person_name()))
            .collect()
    }

    /// Hourly periods, 09:00 to 15:00, Monday to Friday.
    pub fn meeting_times() -> Vec<MeetingTime> {
        Weekday::WEEKDAYS
            .iter()
            .flat_map(|&day| {
                (9..15).map(move |hour| MeetingTime::at_hour(format!("{day}-{hour:02}"), day, hour))
            })
            .collect()
    }

    /// `n` courses staffed from `instructors`.
    ///
    /// Capacities fall in 10..=20. A course may require one earlier course,
    /// so the prerequisite graph is acyclic by construction.
    pub fn courses(&mut self, n: usize, instructors: &[Instructor]) -> Vec<Course> {
        let mut courses: Vec<Course> = Vec::with_capacity(n);
        for i in 0..n {
            let name = format!(
                "{} {} {}",
                self.pick(ADJECTIVES),
                self.pick(ANIMALS),
                self.pick(JOB_TITLES)
            );
            let mut course = Course::new(format!("C{:03}", i + 1), self.rng.random_range(10..=20))
                .with_name(name)
                .with_department(self.pick(DEPARTMENTS));

            let staff = self.rng.random_range(1..=2).min(instructors.len());
            for instructor in instructors.choose_multiple(&mut self.rng, staff) {
                course = course.with_instructor(instructor.id.clone());
            }

            if i > 0 && self.rng.random_bool(0.2) {
                let earlier = &courses[self.rng.random_range(0..i)];
                course = course.with_prerequisite(earlier.id.clone());
            }
            courses.push(course);
        }
        courses
    }

    /// A complete catalog with no cohorts.
    pub fn catalog(&mut self, courses: usize, instructors: usize) -> Catalog {
        let instructors = self.instructors(instructors);
        let courses = self.courses(courses, &instructors);
        Catalog {
            name: format!("{} {} Academy", self.pick(ADJECTIVES), self.pick(ANIMALS)),
            courses,
            instructors,
            meeting_times: Self::meeting_times(),
            cohorts: Vec::new(),
        }
    }

    /// A roster of `n` students (see [`Self::students`]).
    pub fn roster(&mut self, n: usize) -> Roster {
        Roster::from_students(self.students(n))
    }

    fn person_name(&mut self) -> String {
        format!("{} {}", self.pick(FIRST_NAMES), self.pick(LAST_NAMES))
    }

    fn pick(&mut self, words: &[&'static str]) -> &'static str {
        words.choose(&mut self.rng).copied().unwrap_or_default()
    }
}
