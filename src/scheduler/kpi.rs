//! Schedule quality metrics (KPIs).
//!
//! Computes seat usage and placement indicators from a completed schedule.
//! Complements the conflict count: a schedule can be conflict-free and
//! still leave many seats empty.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Fill Rate | enrolled seats / offered seats |
//! | Fill by Course | fill rate over each course's sections |
//! | Empty Sections | sections with no students |
//! | Unstaffed Sections | sections missing an instructor or meeting time |
//! | Placement Rate | fraction of students with every requirement met |
//! | Avg Load | mean enrolled sections per planned student |

use std::collections::BTreeMap;

use crate::models::Schedule;

/// Schedule performance indicators.
#[derive(Debug, Clone)]
pub struct ScheduleKpi {
    /// Number of sections.
    pub section_count: usize,
    /// Seats offered across all sections.
    pub total_capacity: usize,
    /// Seats taken.
    pub total_enrolled: usize,
    /// Fraction of offered seats taken (0.0..1.0).
    pub fill_rate: f64,
    /// Per-course fill rate.
    pub fill_by_course: BTreeMap<String, f64>,
    /// Sections with no students.
    pub empty_sections: usize,
    /// Sections missing an instructor or a meeting time.
    pub unstaffed_sections: usize,
    /// Students whose every requirement is met.
    pub fully_placed_students: usize,
    /// Fraction of planned students fully placed (0.0..1.0).
    pub placement_rate: f64,
    /// Mean enrolled sections per planned student.
    pub avg_load: f64,
}

impl ScheduleKpi {
    /// Computes KPIs from a schedule.
    pub fn calculate(schedule: &Schedule) -> Self {
        let section_count = schedule.class_count();
        let total_capacity: usize = schedule.classes().map(|c| c.capacity as usize).sum();
        let total_enrolled = schedule.total_enrolled();
        let empty_sections = schedule.classes().filter(|c| c.students.is_empty()).count();
        let unstaffed_sections = schedule.classes().filter(|c| !c.is_staffed()).count();

        let mut fill_by_course = BTreeMap::new();
        for row in &schedule.matrix {
            let Some(first) = row.first() else {
                continue;
            };
            let capacity: usize = row.iter().map(|c| c.capacity as usize).sum();
            let enrolled: usize = row.iter().map(|c| c.enrolled()).sum();
            fill_by_course.insert(first.course_id.clone(), ratio(enrolled, capacity, 0.0));
        }

        let mut fully_placed_students = 0;
        let mut total_load = 0;
        for plan in &schedule.plans {
            let enrolled = schedule.enrollments_for(&plan.student_id);
            total_load += enrolled.len();
            if plan.requirements.iter().all(|r| r.is_satisfied_by(&enrolled)) {
                fully_placed_students += 1;
            }
        }
        let planned = schedule.plans.len();

        Self {
            section_count,
            total_capacity,
            total_enrolled,
            fill_rate: ratio(total_enrolled, total_capacity, 0.0),
            fill_by_course,
            empty_sections,
            unstaffed_sections,
            fully_placed_students,
            placement_rate: ratio(fully_placed_students, planned, 1.0),
            avg_load: ratio(total_load, planned, 0.0),
        }
    }

    /// Whether the schedule meets the given quality thresholds.
    pub fn meets_thresholds(&self, min_fill_rate: f64, min_placement_rate: f64) -> bool {
        self.fill_rate >= min_fill_rate && self.placement_rate >= min_placement_rate
    }
}

fn ratio(part: usize, whole: usize, empty: f64) -> f64 {
    if whole == 0 {
        empty
    } else {
        part as f64 / whole as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Class, Course, MeetingTime, Requirement, StudentPlan, Weekday};
    use std::collections::BTreeSet;

    fn sample_schedule() -> Schedule {
        let alg = Course::new("ALG", 2);
        let bio = Course::new("BIO", 4);
        let t1 = MeetingTime::at_hour("T1", Weekday::Monday, 9);

        let mut a0 = Class::new(&alg, 0).with_instructor("I1").with_meeting_time(t1.clone());
        a0.enroll("S1").unwrap();
        a0.enroll("S2").unwrap();
        let a1 = Class::new(&alg, 1).with_instructor("I1");
        let mut b0 = Class::new(&bio, 0).with_instructor("I2").with_meeting_time(t1);
        b0.enroll("S3").unwrap();

        let mut schedule = Schedule::new("1");
        schedule.add_row(vec![a0, a1]);
        schedule.add_row(vec![b0]);
        for (id, course) in [("S1", "ALG"), ("S2", "ALG"), ("S3", "ALG")] {
            let mut plan = StudentPlan::new(id, BTreeSet::new());
            plan.requirements.push(Requirement::course(course));
            schedule.plans.push(plan);
        }
        schedule
    }

    #[test]
    fn test_kpi_basic() {
        let kpi = ScheduleKpi::calculate(&sample_schedule());
        assert_eq!(kpi.section_count, 3);
        assert_eq!(kpi.total_capacity, 8);
        assert_eq!(kpi.total_enrolled, 3);
        assert!((kpi.fill_rate - 0.375).abs() < 1e-10);
        assert_eq!(kpi.empty_sections, 1);
        assert_eq!(kpi.unstaffed_sections, 1);
    }

    #[test]
    fn test_kpi_fill_by_course() {
        let kpi = ScheduleKpi::calculate(&sample_schedule());
        assert!((kpi.fill_by_course["ALG"] - 0.5).abs() < 1e-10);
        assert!((kpi.fill_by_course["BIO"] - 0.25).abs() < 1e-10);
    }

    #[test]
    fn test_kpi_placement() {
        let kpi = ScheduleKpi::calculate(&sample_schedule());
        // S3 sits in BIO but needed ALG
        assert_eq!(kpi.fully_placed_students, 2);
        assert!((kpi.placement_rate - 2.0 / 3.0).abs() < 1e-10);
        assert!((kpi.avg_load - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_kpi_empty() {
        let kpi = ScheduleKpi::calculate(&Schedule::new("empty"));
        assert_eq!(kpi.section_count, 0);
        assert!((kpi.fill_rate - 0.0).abs() < 1e-10);
        assert!((kpi.placement_rate - 1.0).abs() < 1e-10);
        assert!((kpi.avg_load - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_meets_thresholds() {
        let kpi = ScheduleKpi::calculate(&sample_schedule());
        assert!(kpi.meets_thresholds(0.3, 0.6));
        assert!(!kpi.meets_thresholds(0.4, 0.6));
        assert!(!kpi.meets_thresholds(0.3, 0.7));
    }
}
