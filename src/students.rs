use crate::db::Store;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentRecord {
    pub id: i64,
    pub name: String,
    pub age: i64,
    pub class: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("please fill all fields")]
    MissingField,
    #[error("age must be a number")]
    InvalidAge,
}

#[derive(Debug, Error)]
pub enum AddStudentError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("database error: {0}")]
    Store(#[from] rusqlite::Error),
}

/// Checks the raw form values in order: presence first, then the age.
pub fn validate(name: &str, age_raw: &str, class: &str) -> Result<i64, ValidationError> {
    if name.is_empty() || age_raw.is_empty() || class.is_empty() {
        return Err(ValidationError::MissingField);
    }
    parse_age(age_raw).ok_or(ValidationError::InvalidAge)
}

// Integer literal with optional sign; surrounding whitespace is ignored.
fn parse_age(raw: &str) -> Option<i64> {
    let t = raw.trim();
    if t.is_empty() {
        return None;
    }
    t.parse::<i64>().ok()
}

pub fn add(
    store: &Store,
    name: &str,
    age_raw: &str,
    class: &str,
) -> Result<StudentRecord, AddStudentError> {
    let age = validate(name, age_raw, class)?;
    let conn = store.conn();
    conn.execute(
        "INSERT INTO students (name, age, student_class) VALUES (?, ?, ?)",
        (name, age, class),
    )?;
    let id = conn.last_insert_rowid();
    Ok(StudentRecord {
        id,
        name: name.to_string(),
        age,
        class: class.to_string(),
    })
}

pub fn list_all(store: &Store) -> anyhow::Result<Vec<StudentRecord>> {
    let mut stmt = store
        .conn()
        .prepare("SELECT id, name, age, student_class FROM students ORDER BY id")?;
    let rows = stmt
        .query_map([], |row| {
            Ok(StudentRecord {
                id: row.get(0)?,
                name: row.get(1)?,
                age: row.get(2)?,
                class: row.get(3)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Returns the number of rows removed; a missing id removes nothing and is
/// not an error.
pub fn delete_by_id(store: &Store, id: i64) -> anyhow::Result<usize> {
    let n = store
        .conn()
        .execute("DELETE FROM students WHERE id = ?", [id])?;
    Ok(n)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(store: &Store) -> i64 {
        store
            .conn()
            .query_row("SELECT COUNT(*) FROM students", [], |r| r.get(0))
            .expect("count")
    }

    #[test]
    fn missing_field_is_checked_before_age() {
        let store = Store::open_in_memory().expect("open store");
        for (name, age, class) in [("", "10", "5A"), ("Alice", "", "5A"), ("Alice", "10", "")] {
            match add(&store, name, age, class) {
                Err(AddStudentError::Invalid(ValidationError::MissingField)) => {}
                other => panic!("expected MissingField, got {:?}", other),
            }
        }
        // Empty name wins over a bad age.
        assert_eq!(validate("", "ten", "5A"), Err(ValidationError::MissingField));
        assert_eq!(count(&store), 0);
    }

    #[test]
    fn non_numeric_age_is_rejected() {
        let store = Store::open_in_memory().expect("open store");
        for age in ["ten", "1.5", "12a", "   ", "99999999999999999999"] {
            match add(&store, "Alice", age, "5A") {
                Err(AddStudentError::Invalid(ValidationError::InvalidAge)) => {}
                other => panic!("expected InvalidAge for {:?}, got {:?}", age, other),
            }
        }
        assert_eq!(count(&store), 0);
    }

    #[test]
    fn age_accepts_sign_and_padding_without_bounds() {
        assert_eq!(validate("A", " 12 ", "B"), Ok(12));
        assert_eq!(validate("A", "+7", "B"), Ok(7));
        assert_eq!(validate("A", "-3", "B"), Ok(-3));
        assert_eq!(validate("A", "250", "B"), Ok(250));
    }

    #[test]
    fn add_returns_record_with_assigned_id() {
        let store = Store::open_in_memory().expect("open store");
        let rec = add(&store, "Alice", "10", "5A").expect("add");
        assert_eq!(rec.name, "Alice");
        assert_eq!(rec.age, 10);
        assert_eq!(rec.class, "5A");
        assert!(rec.id > 0);

        let all = list_all(&store).expect("list");
        assert_eq!(all, vec![rec]);
    }

    #[test]
    fn name_and_class_are_stored_verbatim() {
        let store = Store::open_in_memory().expect("open store");
        let rec = add(&store, "  O'Brien ", "9", " 4C").expect("add");
        let all = list_all(&store).expect("list");
        assert_eq!(all[0].name, "  O'Brien ");
        assert_eq!(all[0].class, " 4C");
        assert_eq!(all[0].id, rec.id);
    }

    #[test]
    fn list_is_ordered_by_id_and_stable() {
        let store = Store::open_in_memory().expect("open store");
        let a = add(&store, "A", "10", "1").expect("add a");
        let b = add(&store, "B", "11", "1").expect("add b");
        let c = add(&store, "C", "12", "1").expect("add c");
        assert!(a.id < b.id && b.id < c.id);

        let first = list_all(&store).expect("list");
        let second = list_all(&store).expect("list");
        assert_eq!(first, second);
        assert_eq!(
            first.iter().map(|s| s.id).collect::<Vec<_>>(),
            vec![a.id, b.id, c.id]
        );
    }

    #[test]
    fn delete_removes_row_and_repeat_is_noop() {
        let store = Store::open_in_memory().expect("open store");
        let keep = add(&store, "Keep", "10", "1").expect("add");
        let gone = add(&store, "Gone", "10", "1").expect("add");

        assert_eq!(delete_by_id(&store, gone.id).expect("delete"), 1);
        assert_eq!(delete_by_id(&store, gone.id).expect("delete again"), 0);
        assert_eq!(delete_by_id(&store, 9999).expect("delete missing"), 0);

        let all = list_all(&store).expect("list");
        assert_eq!(all, vec![keep]);
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let store = Store::open_in_memory().expect("open store");
        let first = add(&store, "A", "10", "1").expect("add");
        delete_by_id(&store, first.id).expect("delete");
        let second = add(&store, "B", "10", "1").expect("add");
        assert!(second.id > first.id);
    }
}
