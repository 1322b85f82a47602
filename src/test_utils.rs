//! Shared test fixtures: in-memory contexts with and without seed data.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use crate::model::{Assignment, Course, Department, Enrollment, Instructor, Student, Topic};
use crate::orm::SchoolContext;

/// Ids of the rows created by `seeded_context`.
#[derive(Debug, Clone, Copy)]
pub struct SeedIds {
    pub topic: i64,
    pub department: i64,
    pub instructor: i64,
    pub course: i64,
    pub student: i64,
}

pub fn hiring_date() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2020, 9, 1)
        .and_then(|d| d.and_hms_opt(9, 0, 0))
        .expect("valid date")
}

/// In-memory database with the schema created and no rows.
pub fn schema_context() -> SchoolContext {
    let ctx = SchoolContext::in_memory().expect("in-memory engine should open");
    ctx.ensure_schema().expect("schema should be created");
    ctx
}

/// One row of every kind, wired together:
/// a department headed by its only instructor (salary 6000), one course in one
/// topic, one student enrolled with grade 90, and the instructor assigned.
pub fn seeded_context() -> (SchoolContext, SeedIds) {
    let ctx = schema_context();
    let ids = seed(&ctx);
    (ctx, ids)
}

/// Insert the `seeded_context` rows into a context whose schema exists.
pub fn seed(ctx: &SchoolContext) -> SeedIds {
    let topic = ctx.insert(&mut Topic::new("Programming")).expect("topic");
    let mut department = Department::new("CS", hiring_date());
    let department_id = ctx.insert(&mut department).expect("department");
    let instructor = ctx
        .insert(&mut Instructor::new("Mona", Decimal::from(6000), department_id))
        .expect("instructor");
    ctx.update(&department.with_head(instructor)).expect("department head");

    let course = ctx
        .insert(&mut Course::new("Rust", 40, topic))
        .expect("course");
    let student = ctx
        .insert(&mut Student::new("Omar", "Khaled", department_id).with_age(20))
        .expect("student");
    ctx.insert(&mut Enrollment::new(student, course, 90))
        .expect("enrollment");
    ctx.insert(&mut Assignment::new(instructor, course))
        .expect("assignment");

    SeedIds {
        topic,
        department: department_id,
        instructor,
        course,
        student,
    }
}
