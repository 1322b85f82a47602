//! All database relation definitions.
//!
//! This module defines the 7 relations of the school schema plus the internal
//! identity sequence relation.

use super::definition::{SchemaField, SchemaRelation};

const ID: &[SchemaField] = &[SchemaField::int("id")];

/// Topics relation: course subject areas
pub const TOPICS: SchemaRelation = SchemaRelation {
    name: "topics",
    key_fields: ID,
    value_fields: &[SchemaField::text("name", 50).required()],
    identity: true,
};

/// Departments relation
///
/// `head_instructor_id` is nullable so a department can exist before the
/// instructor who will head it.
pub const DEPARTMENTS: SchemaRelation = SchemaRelation {
    name: "departments",
    key_fields: ID,
    value_fields: &[
        SchemaField::text("name", 50).required(),
        SchemaField::int("head_instructor_id").nullable(),
        SchemaField::datetime("hiring_date"),
    ],
    identity: true,
};

/// Instructors relation
pub const INSTRUCTORS: SchemaRelation = SchemaRelation {
    name: "instructors",
    key_fields: ID,
    value_fields: &[
        SchemaField::text("name", 50).required(),
        SchemaField::decimal("bonus", 18, 2),
        SchemaField::decimal("salary", 10, 2),
        SchemaField::text("address", 100),
        SchemaField::decimal("hourly_rate", 18, 2),
        SchemaField::int("department_id"),
    ],
    identity: true,
};

/// Students relation
pub const STUDENTS: SchemaRelation = SchemaRelation {
    name: "students",
    key_fields: ID,
    value_fields: &[
        SchemaField::text("first_name", 50).required(),
        SchemaField::text("last_name", 50).required(),
        SchemaField::text("address", 100),
        SchemaField::int("age"),
        SchemaField::int("department_id"),
    ],
    identity: true,
};

/// Courses relation
pub const COURSES: SchemaRelation = SchemaRelation {
    name: "courses",
    key_fields: ID,
    value_fields: &[
        SchemaField::int("duration"),
        SchemaField::text("name", 100).required(),
        SchemaField::text("description", 250),
        SchemaField::int("topic_id"),
    ],
    identity: true,
};

/// Enrollments relation: Student ↔ Course junction
///
/// Key fields: student_id, course_id
pub const ENROLLMENTS: SchemaRelation = SchemaRelation {
    name: "enrollments",
    key_fields: &[SchemaField::int("student_id"), SchemaField::int("course_id")],
    value_fields: &[SchemaField::int("grade")],
    identity: false,
};

/// Assignments relation: Instructor ↔ Course junction
///
/// Key fields: instructor_id, course_id
pub const ASSIGNMENTS: SchemaRelation = SchemaRelation {
    name: "assignments",
    key_fields: &[SchemaField::int("instructor_id"), SchemaField::int("course_id")],
    value_fields: &[SchemaField::text("evaluation", 250).nullable()],
    identity: false,
};

/// Identity sequences: last id handed out per relation
pub const SEQUENCES: SchemaRelation = SchemaRelation {
    name: "id_sequences",
    key_fields: &[SchemaField::text("relation", 64)],
    value_fields: &[SchemaField::int("last_id")],
    identity: false,
};

/// All relations in creation order (parents before children).
pub const ALL_RELATIONS: &[&SchemaRelation] = &[
    &TOPICS,
    &DEPARTMENTS,
    &INSTRUCTORS,
    &STUDENTS,
    &COURSES,
    &ENROLLMENTS,
    &ASSIGNMENTS,
    &SEQUENCES,
];
