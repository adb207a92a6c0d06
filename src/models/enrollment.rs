//! Enrollment index.
//!
//! The many-to-many relation between students and subjects, held as two
//! transposed indices. An `Enrollment` is built wholesale from a batch of
//! records and is read-only afterwards; a new data load builds a new one.
//!
//! # Identifiers
//! Student and subject identifiers are opaque strings. Student IDs often
//! look numeric but are never parsed, so leading zeros survive.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Student identifier.
pub type StudentId = String;
/// Subject (course/exam unit) identifier.
pub type SubjectId = String;

/// One (student, subject) enrollment as delivered by an ingestion layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentRecord {
    /// Student identifier.
    pub student_id: StudentId,
    /// Display name, carried for reporting only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_name: Option<String>,
    /// Enrolled subject.
    pub subject_id: SubjectId,
}

impl EnrollmentRecord {
    /// Creates a record without a display name.
    pub fn new(student_id: impl Into<String>, subject_id: impl Into<String>) -> Self {
        Self {
            student_id: student_id.into(),
            student_name: None,
            subject_id: subject_id.into(),
        }
    }

    /// Sets the student's display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.student_name = Some(name.into());
        self
    }
}

/// Student/subject enrollment index.
///
/// `student_subjects` and `subject_students` are exact transposes of each
/// other. Ordered collections keep every iteration deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Enrollment {
    student_subjects: BTreeMap<StudentId, BTreeSet<SubjectId>>,
    subject_students: BTreeMap<SubjectId, BTreeSet<StudentId>>,
    student_names: BTreeMap<StudentId, String>,
}

impl Enrollment {
    /// Creates an empty enrollment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the index from (student, subject) pairs.
    ///
    /// Duplicate pairs collapse into one enrollment.
    pub fn from_pairs<I, S, T>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, T)>,
        S: Into<String>,
        T: Into<String>,
    {
        Self::from_records(
            pairs
                .into_iter()
                .map(|(student, subject)| EnrollmentRecord::new(student, subject)),
        )
    }

    /// Builds the index from enrollment records.
    ///
    /// The first non-empty display name seen for a student wins.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = EnrollmentRecord>,
    {
        let mut enrollment = Self::new();
        for record in records {
            if let Some(name) = record.student_name.filter(|n| !n.trim().is_empty()) {
                enrollment
                    .student_names
                    .entry(record.student_id.clone())
                    .or_insert(name);
            }
            enrollment
                .subject_students
                .entry(record.subject_id.clone())
                .or_default()
                .insert(record.student_id.clone());
            enrollment
                .student_subjects
                .entry(record.student_id)
                .or_default()
                .insert(record.subject_id);
        }
        enrollment
    }

    /// Student → enrolled subjects.
    pub fn student_subjects(&self) -> &BTreeMap<StudentId, BTreeSet<SubjectId>> {
        &self.student_subjects
    }

    /// Subject → enrolled students.
    pub fn subject_students(&self) -> &BTreeMap<SubjectId, BTreeSet<StudentId>> {
        &self.subject_students
    }

    /// All subjects, in identifier order.
    pub fn subjects(&self) -> impl Iterator<Item = &str> {
        self.subject_students.keys().map(String::as_str)
    }

    /// All students, in identifier order.
    pub fn students(&self) -> impl Iterator<Item = &str> {
        self.student_subjects.keys().map(String::as_str)
    }

    /// Subjects a student is enrolled in.
    pub fn subjects_of(&self, student_id: &str) -> Option<&BTreeSet<SubjectId>> {
        self.student_subjects.get(student_id)
    }

    /// Students enrolled in a subject.
    pub fn students_of(&self, subject_id: &str) -> Option<&BTreeSet<StudentId>> {
        self.subject_students.get(subject_id)
    }

    /// Number of students enrolled in a subject (0 if unknown).
    pub fn student_count(&self, subject_id: &str) -> usize {
        self.students_of(subject_id).map_or(0, BTreeSet::len)
    }

    /// Display name of a student, if one was supplied.
    pub fn student_name(&self, student_id: &str) -> Option<&str> {
        self.student_names.get(student_id).map(String::as_str)
    }

    /// Number of distinct students.
    pub fn num_students(&self) -> usize {
        self.student_subjects.len()
    }

    /// Number of distinct subjects.
    pub fn num_subjects(&self) -> usize {
        self.subject_students.len()
    }

    /// Number of distinct (student, subject) pairs.
    pub fn num_pairs(&self) -> usize {
        self.student_subjects.values().map(BTreeSet::len).sum()
    }

    /// Whether no enrollment pairs exist.
    pub fn is_empty(&self) -> bool {
        self.student_subjects.is_empty()
    }
}
