//! Sample data for an empty database.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::model::{Assignment, Course, Department, Enrollment, Instructor, Student, Topic};
use crate::orm::{OrmError, SchoolContext};

/// Seed the sample school unless departments already exist.
///
/// Returns whether anything was inserted.
pub fn seed_if_empty(ctx: &SchoolContext) -> Result<bool, OrmError> {
    if ctx.count::<Department>()? > 0 {
        return Ok(false);
    }

    let programming = ctx.insert(&mut Topic::new("Programming"))?;
    let databases = ctx.insert(&mut Topic::new("Databases"))?;

    let hired = NaiveDate::from_ymd_opt(2020, 9, 1)
        .and_then(|d| d.and_hms_opt(9, 0, 0))
        .unwrap_or_default();
    let mut cs = Department::new("CS", hired);
    let cs_id = ctx.insert(&mut cs)?;

    let mona = ctx.insert(
        &mut Instructor::new("Mona", Decimal::from(3000), cs_id)
            .with_address("Giza")
            .with_hourly_rate(Decimal::new(15000, 2)),
    )?;
    let ahmed = ctx.insert(
        &mut Instructor::new("Ahmed", Decimal::from(6000), cs_id)
            .with_bonus(Decimal::from(500))
            .with_address("Cairo")
            .with_hourly_rate(Decimal::new(25000, 2)),
    )?;
    let sara = ctx.insert(
        &mut Instructor::new("Sara", Decimal::from(9000), cs_id)
            .with_bonus(Decimal::from(1000))
            .with_address("Alexandria")
            .with_hourly_rate(Decimal::new(32550, 2)),
    )?;

    // The head can only be set once the instructor exists
    ctx.update(&cs.with_head(ahmed))?;

    let csharp = ctx.insert(
        &mut Course::new("C# Fundamentals", 40, programming).with_description("Types, LINQ and EF Core"),
    )?;
    let rust = ctx.insert(&mut Course::new("Rust", 30, programming).with_description("Ownership and traits"))?;
    let sql = ctx.insert(&mut Course::new("SQL Basics", 24, databases))?;

    let omar = ctx.insert(
        &mut Student::new("Omar", "Khaled", cs_id)
            .with_address("Mansoura")
            .with_age(21),
    )?;
    let nour = ctx.insert(&mut Student::new("Nour", "Samir", cs_id).with_address("Tanta").with_age(23))?;

    ctx.insert(&mut Enrollment::new(omar, csharp, 88))?;
    ctx.insert(&mut Enrollment::new(omar, sql, 92))?;
    ctx.insert(&mut Enrollment::new(nour, rust, 75))?;

    ctx.insert(&mut Assignment::new(mona, csharp).with_evaluation("Clear and well paced"))?;
    ctx.insert(&mut Assignment::new(sara, rust))?;
    ctx.insert(&mut Assignment::new(ahmed, sql).with_evaluation("Strong lab sessions"))?;

    Ok(true)
}
