//! Groups marks of one exam type by student, averages them and orders the
//! result best-first.

use std::collections::HashMap;

use uuid::Uuid;

/// One mark belonging to a student, already filtered to a single exam type.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MarkRecord {
    pub student_id: Uuid,
    pub full_name: String,
    pub roll_number: String,
    pub marks: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankingEntry {
    pub student_id: Uuid,
    pub full_name: String,
    pub roll_number: String,

    pub average: f64,
    pub total: i64,
    pub subjects: usize,
}

/// Ranks students by their mean mark, descending. Only students with at
/// least one record appear. Equal averages order by roll number ascending,
/// so the output is deterministic regardless of input order.
#[must_use]
pub fn rank(records: Vec<MarkRecord>) -> Vec<RankingEntry> {
    let mut by_student: HashMap<Uuid, RankingEntry> = HashMap::new();

    for record in records {
        let entry = by_student
            .entry(record.student_id)
            .or_insert_with(|| RankingEntry {
                student_id: record.student_id,
                full_name: record.full_name,
                roll_number: record.roll_number,
                average: 0.0,
                total: 0,
                subjects: 0,
            });

        entry.total += record.marks;
        entry.subjects += 1;
    }

    let mut entries: Vec<RankingEntry> = by_student
        .into_values()
        .map(|mut entry| {
            entry.average = mean(entry.total, entry.subjects);
            entry
        })
        .collect();

    entries.sort_by(|a, b| {
        b.average
            .total_cmp(&a.average)
            .then_with(|| a.roll_number.cmp(&b.roll_number))
    });

    entries
}

// Individual marks fit in 0..=100 and subject counts are tiny, both casts
// are exact.
#[expect(clippy::as_conversions, clippy::cast_precision_loss)]
fn mean(total: i64, count: usize) -> f64 {
    total as f64 / count as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(student: Uuid, name: &str, roll: &str, marks: i64) -> MarkRecord {
        MarkRecord {
            student_id: student,
            full_name: name.to_owned(),
            roll_number: roll.to_owned(),
            marks,
        }
    }

    #[test]
    fn averages_sum_and_subject_count() {
        let student = Uuid::new_v4();
        let entries = rank(vec![
            record(student, "Mina", "R1", 80),
            record(student, "Mina", "R1", 90),
            record(student, "Mina", "R1", 70),
        ]);

        assert_eq!(entries.len(), 1);
        assert!((entries[0].average - 80.0).abs() < f64::EPSILON);
        assert_eq!(entries[0].total, 240);
        assert_eq!(entries[0].subjects, 3);
    }

    #[test]
    fn sorts_by_average_descending() {
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();
        let entries = rank(vec![
            record(second, "Ben", "R2", 60),
            record(first, "Ada", "R1", 95),
            record(first, "Ada", "R1", 85),
        ]);

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].roll_number, "R1");
        assert!((entries[0].average - 90.0).abs() < f64::EPSILON);
        assert_eq!(entries[1].roll_number, "R2");
    }

    #[test]
    fn ties_break_by_roll_number() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let entries = rank(vec![
            record(b, "Zoe", "R9", 75),
            record(a, "Amy", "R3", 75),
        ]);

        assert_eq!(entries[0].roll_number, "R3");
        assert_eq!(entries[1].roll_number, "R9");
    }

    #[test]
    fn no_records_means_no_entries() {
        assert!(rank(Vec::new()).is_empty());
    }
}
