use rust_decimal::Decimal;
use serde::Serialize;

use crate::model::Student;
use crate::output::Outputable;

#[derive(Debug, Clone, Serialize)]
pub struct StudentRow {
    pub id: i64,
    pub name: String,
}

impl From<&Student> for StudentRow {
    fn from(student: &Student) -> Self {
        Self {
            id: student.id,
            name: student.full_name(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DeletedStudent {
    pub id: i64,
    pub name: String,
    /// The student plus every row that cascaded from it
    pub rows_removed: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct InstructorSalary {
    pub name: String,
    pub salary: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct StudentDepartment {
    pub student: String,
    pub department: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TopicCourses {
    pub topic_id: i64,
    pub courses: usize,
}

/// Everything the demo workflow did, in step order.
#[derive(Debug, Serialize)]
pub struct DemoReport {
    pub backend: &'static str,
    pub seeded: bool,
    pub inserted: Student,
    pub students: Vec<StudentRow>,
    pub updated: Option<Student>,
    pub deleted: Option<DeletedStudent>,
    pub high_salary_instructors: Vec<InstructorSalary>,
    pub student_departments: Vec<StudentDepartment>,
    pub courses_per_topic: Vec<TopicCourses>,
}

impl Outputable for DemoReport {
    fn to_table(&self) -> String {
        let mut output = String::new();

        output.push_str("=== School ORM demo ===\n");
        output.push_str(&format!("Backend: {}\n", self.backend));
        if self.seeded {
            output.push_str("Sample data seeded.\n");
        }

        output.push_str(&format!(
            "\nStudent inserted: {} - {}\n",
            self.inserted.id,
            self.inserted.full_name()
        ));

        output.push_str("Students in DB:\n");
        for student in &self.students {
            output.push_str(&format!("  {} - {}\n", student.id, student.name));
        }

        match &self.updated {
            Some(student) => output.push_str(&format!(
                "Student updated: {} - {} (address: {})\n",
                student.id,
                student.full_name(),
                student.address
            )),
            None => output.push_str("No student to update.\n"),
        }

        match &self.deleted {
            Some(deleted) => output.push_str(&format!(
                "Student deleted: {} - {} ({} rows removed)\n",
                deleted.id, deleted.name, deleted.rows_removed
            )),
            None => output.push_str("No student to delete.\n"),
        }

        output.push_str("\nInstructors with high salary:\n");
        for instructor in &self.high_salary_instructors {
            output.push_str(&format!("  {} - {}\n", instructor.name, instructor.salary));
        }

        output.push_str("Students with department:\n");
        for pair in &self.student_departments {
            output.push_str(&format!("  {} - {}\n", pair.student, pair.department));
        }

        output.push_str("Courses per topic:\n");
        for group in &self.courses_per_topic {
            output.push_str(&format!("  Topic {} has {} courses\n", group.topic_id, group.courses));
        }

        output.push_str("=== Done ===");
        output
    }
}
