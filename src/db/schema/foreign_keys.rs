//! Relationship map: every foreign key in the schema and its delete rule.
//!
//! The relationship enforcer reads this table instead of hard-coding per-entity
//! checks. Parents are always identity relations, so a foreign key column
//! always points at the parent's `id`.

use super::definition::SchemaRelation;
use super::relations::{ASSIGNMENTS, COURSES, DEPARTMENTS, ENROLLMENTS, INSTRUCTORS, STUDENTS, TOPICS};

/// What happens to referencing rows when a parent row is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteRule {
    /// Referencing rows are deleted along with the parent.
    Cascade,
    /// The parent cannot be deleted while referenced.
    NoAction,
}

/// A single foreign key: `child.column` references `parent.id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKey {
    /// Constraint name, used in error messages
    pub name: &'static str,
    pub child: &'static SchemaRelation,
    pub column: &'static str,
    pub parent: &'static SchemaRelation,
    pub on_delete: DeleteRule,
}

pub const FOREIGN_KEYS: &[ForeignKey] = &[
    ForeignKey {
        name: "fk_students_department",
        child: &STUDENTS,
        column: "department_id",
        parent: &DEPARTMENTS,
        on_delete: DeleteRule::Cascade,
    },
    ForeignKey {
        name: "fk_instructors_department",
        child: &INSTRUCTORS,
        column: "department_id",
        parent: &DEPARTMENTS,
        on_delete: DeleteRule::NoAction,
    },
    ForeignKey {
        name: "fk_departments_head_instructor",
        child: &DEPARTMENTS,
        column: "head_instructor_id",
        parent: &INSTRUCTORS,
        on_delete: DeleteRule::NoAction,
    },
    ForeignKey {
        name: "fk_courses_topic",
        child: &COURSES,
        column: "topic_id",
        parent: &TOPICS,
        on_delete: DeleteRule::Cascade,
    },
    ForeignKey {
        name: "fk_enrollments_student",
        child: &ENROLLMENTS,
        column: "student_id",
        parent: &STUDENTS,
        on_delete: DeleteRule::Cascade,
    },
    ForeignKey {
        name: "fk_enrollments_course",
        child: &ENROLLMENTS,
        column: "course_id",
        parent: &COURSES,
        on_delete: DeleteRule::Cascade,
    },
    ForeignKey {
        name: "fk_assignments_instructor",
        child: &ASSIGNMENTS,
        column: "instructor_id",
        parent: &INSTRUCTORS,
        on_delete: DeleteRule::Cascade,
    },
    ForeignKey {
        name: "fk_assignments_course",
        child: &ASSIGNMENTS,
        column: "course_id",
        parent: &COURSES,
        on_delete: DeleteRule::Cascade,
    },
];

/// Foreign keys declared on `child` (checked on insert/update).
pub fn foreign_keys_of(child: &str) -> impl Iterator<Item = &'static ForeignKey> + '_ {
    FOREIGN_KEYS.iter().filter(move |fk| fk.child.name == child)
}

/// Foreign keys pointing at `parent` (followed on delete).
pub fn references_to(parent: &str) -> impl Iterator<Item = &'static ForeignKey> + '_ {
    FOREIGN_KEYS.iter().filter(move |fk| fk.parent.name == parent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_every_fk_column_exists_on_child() {
        for fk in FOREIGN_KEYS {
            assert!(
                fk.child.column_index(fk.column).is_some(),
                "{} names missing column {}.{}",
                fk.name,
                fk.child.name,
                fk.column
            );
            assert!(fk.parent.identity, "{} must reference an identity relation", fk.name);
        }
    }

    #[rstest]
    fn test_head_instructor_is_no_action() {
        let fk = foreign_keys_of("departments").next().unwrap();
        assert_eq!(fk.parent.name, "instructors");
        assert_eq!(fk.on_delete, DeleteRule::NoAction);
    }

    #[rstest]
    #[case("departments", 2)]
    #[case("instructors", 2)]
    #[case("courses", 2)]
    #[case("students", 1)]
    #[case("topics", 1)]
    #[case("enrollments", 0)]
    fn test_references_to(#[case] parent: &str, #[case] expected: usize) {
        assert_eq!(references_to(parent).count(), expected);
    }

    #[rstest]
    fn test_foreign_keys_of_junction() {
        let columns: Vec<_> = foreign_keys_of("enrollments").map(|fk| fk.column).collect();
        assert_eq!(columns, vec!["student_id", "course_id"]);
    }
}
