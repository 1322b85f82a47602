//! The demo workflow: a fixed sequence of CRUD operations and query
//! compositions run once against the configured database.
//!
//! Each step either completes or halts the workflow with an error naming it.
//! Results are collected into a `DemoReport` instead of being printed as the
//! steps run.

mod report;
mod seed;

pub use report::{DeletedStudent, DemoReport, InstructorSalary, StudentDepartment, StudentRow, TopicCourses};
pub use seed::seed_if_empty;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::model::{Course, Department, Instructor, Student};
use crate::orm::{OrmError, SchoolContext};

/// Salary above which an instructor counts as high-earning.
pub const HIGH_SALARY: Decimal = Decimal::from_parts(5000, 0, 0, false, 0);

#[derive(Error, Debug)]
#[error("Demo step '{step}' failed: {source}")]
pub struct DemoError {
    pub step: &'static str,
    #[source]
    pub source: OrmError,
}

fn step<T>(name: &'static str, result: Result<T, OrmError>) -> Result<T, DemoError> {
    result.map_err(|source| DemoError { step: name, source })
}

/// Run the full workflow.
pub fn run_demo(ctx: &SchoolContext) -> Result<DemoReport, DemoError> {
    step("create schema", ctx.ensure_schema())?;
    let seeded = step("seed sample data", seed_if_empty(ctx))?;

    // Insert
    let department = step("find department", ctx.get_first::<Department>())?.ok_or_else(|| DemoError {
        step: "find department",
        source: OrmError::NotFound {
            relation: "departments",
            key: "first".to_string(),
        },
    })?;
    let mut inserted = Student::new("Ali", "Hassan", department.id)
        .with_age(22)
        .with_address("Cairo");
    step("insert student", ctx.insert(&mut inserted))?;

    // Read
    let students: Vec<StudentRow> = step("list students", ctx.get_all::<Student>())?
        .iter()
        .map(StudentRow::from)
        .collect();

    // Update
    let updated = match step("find first student", ctx.get_first::<Student>())? {
        Some(mut first) => {
            first.address = "Alexandria".to_string();
            step("update student", ctx.update(&first))?;
            Some(first)
        }
        None => None,
    };

    // Delete
    let deleted = match step("find first student", ctx.get_first::<Student>())? {
        Some(first) => {
            let rows_removed = step("delete student", ctx.delete(&first))?;
            Some(DeletedStudent {
                id: first.id,
                name: first.full_name(),
                rows_removed,
            })
        }
        None => None,
    };

    // Filter
    let high_salary_instructors: Vec<InstructorSalary> = step("query instructors", ctx.query::<Instructor>())?
        .filter(|i| i.salary > HIGH_SALARY)
        .iter()
        .map(|i| InstructorSalary {
            name: i.name.clone(),
            salary: i.salary,
        })
        .collect();

    // Join
    let student_query = step("query students", ctx.query::<Student>())?;
    let department_query = step("query departments", ctx.query::<Department>())?;
    let student_departments = student_query.join(
        &department_query,
        |s| s.department_id,
        |d| d.id,
        |s, d| StudentDepartment {
            student: s.first_name.clone(),
            department: d.name.clone(),
        },
    );

    // Group
    let courses_per_topic: Vec<TopicCourses> = step("query courses", ctx.query::<Course>())?
        .group_count(|c| c.topic_id)
        .into_iter()
        .map(|(topic_id, courses)| TopicCourses { topic_id, courses })
        .collect();

    Ok(DemoReport {
        backend: ctx.backend().backend_name(),
        seeded,
        inserted,
        students,
        updated,
        deleted,
        high_salary_instructors,
        student_departments,
        courses_per_topic,
    })
}
