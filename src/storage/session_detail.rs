//! Exercise lines of a session.

use std::collections::HashMap;
use std::fmt;

use rusqlite::types::Value;
use serde::Serialize;

use super::database::{Executor, Row};
use super::exercise::{self, ExerciseFilter};
use super::query::{Field, build_delete, build_insert, build_update};
use super::record::{Record, column, fetch};
use super::session::SessionEntry;
use crate::constants::display::UNNAMED_EXERCISE;
use crate::types::{Result, RowId};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionDetail {
    pub id: RowId,
    pub session_id: RowId,
    pub exercise_id: Option<RowId>,
    pub weight_kg: f64,
    pub reps_total: i64,
    pub sets: i64,
    pub intensity: i64,
}

impl Record for SessionDetail {
    const COLUMNS: &'static [&'static str] = &[
        "_id",
        "session_id",
        "exercise_id",
        "weight_kg",
        "reps_total",
        "sets",
        "intensity",
    ];

    fn from_row(table: &str, row: &Row) -> Result<Self> {
        Ok(Self {
            id: column(table, row, 0, "_id")?,
            session_id: column(table, row, 1, "session_id")?,
            exercise_id: column(table, row, 2, "exercise_id")?,
            weight_kg: column(table, row, 3, "weight_kg")?,
            reps_total: column(table, row, 4, "reps_total")?,
            sets: column(table, row, 5, "sets")?,
            intensity: column(table, row, 6, "intensity")?,
        })
    }
}

/// A detail paired with the name of its exercise, for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedDetail {
    pub detail: SessionDetail,
    pub exercise_name: String,
}

impl fmt::Display for NamedDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {:.1}kg x {} reps, {} sets @{}",
            self.exercise_name,
            self.detail.weight_kg,
            self.detail.reps_total,
            self.detail.sets,
            self.detail.intensity
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewSessionDetail {
    pub session_id: RowId,
    pub exercise_id: Option<RowId>,
    /// `None` leaves the column default (0 kg)
    pub weight_kg: Option<f64>,
    pub reps_total: i64,
    pub sets: i64,
    pub intensity: i64,
}

impl NewSessionDetail {
    pub fn for_session(session_id: RowId, entry: &SessionEntry) -> Self {
        Self {
            session_id,
            exercise_id: entry.exercise_id,
            weight_kg: entry.weight_kg,
            reps_total: entry.reps_total,
            sets: entry.sets,
            intensity: entry.intensity,
        }
    }

    fn fields(&self) -> Vec<Field> {
        let mut fields = vec![("session_id", Value::Integer(self.session_id))];
        if let Some(exercise_id) = self.exercise_id {
            fields.push(("exercise_id", Value::Integer(exercise_id)));
        }
        if let Some(weight) = self.weight_kg {
            fields.push(("weight_kg", Value::Real(weight)));
        }
        fields.push(("reps_total", Value::Integer(self.reps_total)));
        fields.push(("sets", Value::Integer(self.sets)));
        fields.push(("intensity", Value::Integer(self.intensity)));
        fields
    }
}

/// Partial update. `exercise_id: Some(None)` detaches the exercise.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionDetailChanges {
    pub session_id: Option<RowId>,
    pub exercise_id: Option<Option<RowId>>,
    pub weight_kg: Option<f64>,
    pub reps_total: Option<i64>,
    pub sets: Option<i64>,
    pub intensity: Option<i64>,
}

impl SessionDetailChanges {
    fn fields(&self) -> Vec<Field> {
        let mut fields = Vec::new();
        if let Some(session_id) = self.session_id {
            fields.push(("session_id", Value::Integer(session_id)));
        }
        if let Some(exercise_id) = self.exercise_id {
            fields.push((
                "exercise_id",
                exercise_id.map(Value::Integer).unwrap_or(Value::Null),
            ));
        }
        if let Some(weight) = self.weight_kg {
            fields.push(("weight_kg", Value::Real(weight)));
        }
        if let Some(reps) = self.reps_total {
            fields.push(("reps_total", Value::Integer(reps)));
        }
        if let Some(sets) = self.sets {
            fields.push(("sets", Value::Integer(sets)));
        }
        if let Some(intensity) = self.intensity {
            fields.push(("intensity", Value::Integer(intensity)));
        }
        fields
    }
}

/// Equality filter over every column; unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionDetailFilter {
    pub id: Option<RowId>,
    pub session_id: Option<RowId>,
    pub exercise_id: Option<RowId>,
    pub weight_kg: Option<f64>,
    pub reps_total: Option<i64>,
    pub sets: Option<i64>,
    pub intensity: Option<i64>,
}

impl SessionDetailFilter {
    pub fn by_session(session_id: RowId) -> Self {
        Self {
            session_id: Some(session_id),
            ..Self::default()
        }
    }

    fn fields(&self) -> Vec<Field> {
        let mut fields = Vec::new();
        if let Some(id) = self.id {
            fields.push(("_id", Value::Integer(id)));
        }
        if let Some(session_id) = self.session_id {
            fields.push(("session_id", Value::Integer(session_id)));
        }
        if let Some(exercise_id) = self.exercise_id {
            fields.push(("exercise_id", Value::Integer(exercise_id)));
        }
        if let Some(weight) = self.weight_kg {
            fields.push(("weight_kg", Value::Real(weight)));
        }
        if let Some(reps_total) = self.reps_total {
            fields.push(("reps_total", Value::Integer(reps_total)));
        }
        if let Some(sets) = self.sets {
            fields.push(("sets", Value::Integer(sets)));
        }
        if let Some(intensity) = self.intensity {
            fields.push(("intensity", Value::Integer(intensity)));
        }
        fields
    }
}

pub fn insert<E: Executor + ?Sized>(db: &E, detail: &NewSessionDetail) -> Result<()> {
    db.execute(&build_insert(&db.tables().session_details, detail.fields()))?;
    Ok(())
}

pub fn get<E: Executor + ?Sized>(db: &E, filter: &SessionDetailFilter) -> Result<Vec<SessionDetail>> {
    fetch(db, &db.tables().session_details, filter.fields())
}

pub fn update<E: Executor + ?Sized>(
    db: &E,
    id: RowId,
    changes: &SessionDetailChanges,
) -> Result<usize> {
    let statement = build_update(&db.tables().session_details, id, changes.fields())?;
    Ok(db.execute(&statement)?.affected())
}

pub fn delete<E: Executor + ?Sized>(db: &E, id: RowId) -> Result<usize> {
    Ok(db.execute(&build_delete(&db.tables().session_details, id))?.affected())
}

/// Details of a session with upper-cased exercise names; detached details
/// are labelled `UNNAMED`.
pub fn list_with_exercise_names<E: Executor + ?Sized>(
    db: &E,
    session_id: RowId,
) -> Result<Vec<NamedDetail>> {
    let details = get(db, &SessionDetailFilter::by_session(session_id))?;
    let mut names: HashMap<RowId, String> = HashMap::new();
    let mut named = Vec::with_capacity(details.len());

    for detail in details {
        let exercise_name = match detail.exercise_id {
            None => UNNAMED_EXERCISE.to_string(),
            Some(id) => match names.get(&id) {
                Some(name) => name.clone(),
                None => {
                    let name = exercise::get(db, &ExerciseFilter::by_id(id))?
                        .into_iter()
                        .next()
                        .map(|e| e.name.to_uppercase())
                        .unwrap_or_else(|| UNNAMED_EXERCISE.to_string());
                    names.insert(id, name.clone());
                    name
                }
            },
        };
        named.push(NamedDetail {
            detail,
            exercise_name,
        });
    }

    Ok(named)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Database;
    use crate::storage::exercise::NewExercise;
    use crate::storage::session::{self, NewSession};
    use crate::types::GymError;

    fn squat_session() -> Database {
        let db = Database::open_in_memory().unwrap();
        exercise::insert(&db, &NewExercise::new("Squat", "SQ")).unwrap();
        session::insert(&db, &NewSession::default()).unwrap();
        db
    }

    fn squat_detail() -> NewSessionDetail {
        NewSessionDetail {
            session_id: 1,
            exercise_id: Some(1),
            weight_kg: Some(100.0),
            reps_total: 5,
            sets: 3,
            intensity: 8,
        }
    }

    #[test]
    fn test_insert_and_get_by_session() {
        let db = squat_session();
        insert(&db, &squat_detail()).unwrap();

        let details = get(&db, &SessionDetailFilter::by_session(1)).unwrap();
        assert_eq!(
            details,
            vec![SessionDetail {
                id: 1,
                session_id: 1,
                exercise_id: Some(1),
                weight_kg: 100.0,
                reps_total: 5,
                sets: 3,
                intensity: 8,
            }]
        );
    }

    #[test]
    fn test_filter_on_volume_columns() {
        let db = squat_session();
        insert(&db, &squat_detail()).unwrap();
        insert(
            &db,
            &NewSessionDetail {
                reps_total: 10,
                ..squat_detail()
            },
        )
        .unwrap();
        insert(
            &db,
            &NewSessionDetail {
                weight_kg: Some(60.0),
                sets: 5,
                ..squat_detail()
            },
        )
        .unwrap();

        let filter = SessionDetailFilter {
            sets: Some(3),
            reps_total: Some(5),
            ..Default::default()
        };
        let ids: Vec<RowId> = get(&db, &filter).unwrap().iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![1]);

        let by_weight = SessionDetailFilter {
            weight_kg: Some(60.0),
            ..Default::default()
        };
        let found = get(&db, &by_weight).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].sets, 5);
    }

    #[test]
    fn test_weight_defaults_to_zero() {
        let db = squat_session();
        let detail = NewSessionDetail {
            weight_kg: None,
            ..squat_detail()
        };
        insert(&db, &detail).unwrap();
        assert_eq!(get(&db, &SessionDetailFilter::default()).unwrap()[0].weight_kg, 0.0);
    }

    #[test]
    fn test_value_checks() {
        let db = squat_session();
        let cases = [
            NewSessionDetail {
                weight_kg: Some(-1.0),
                ..squat_detail()
            },
            NewSessionDetail {
                reps_total: 0,
                ..squat_detail()
            },
            NewSessionDetail {
                sets: 0,
                ..squat_detail()
            },
            NewSessionDetail {
                intensity: -1,
                ..squat_detail()
            },
            NewSessionDetail {
                intensity: 11,
                ..squat_detail()
            },
            NewSessionDetail {
                session_id: 42,
                ..squat_detail()
            },
            NewSessionDetail {
                exercise_id: Some(42),
                ..squat_detail()
            },
        ];
        for case in &cases {
            let err = insert(&db, case).unwrap_err();
            assert!(err.is_constraint_violation(), "{:?} -> {:?}", case, err);
        }

        let edge = NewSessionDetail {
            intensity: 0,
            ..squat_detail()
        };
        insert(&db, &edge).unwrap();
    }

    #[test]
    fn test_cascade_on_session_delete() {
        let db = squat_session();
        insert(&db, &squat_detail()).unwrap();
        insert(&db, &squat_detail()).unwrap();

        assert_eq!(session::delete(&db, 1).unwrap(), 1);
        assert!(get(&db, &SessionDetailFilter::by_session(1)).unwrap().is_empty());
    }

    #[test]
    fn test_referenced_exercise_cannot_be_deleted() {
        let db = squat_session();
        insert(&db, &squat_detail()).unwrap();

        let err = exercise::delete(&db, 1).unwrap_err();
        assert!(err.is_constraint_violation());
        assert_eq!(
            exercise::get(&db, &ExerciseFilter::by_id(1)).unwrap().len(),
            1
        );
    }

    #[test]
    fn test_partial_update_and_detach() {
        let db = squat_session();
        insert(&db, &squat_detail()).unwrap();

        let changes = SessionDetailChanges {
            reps_total: Some(8),
            exercise_id: Some(None),
            ..Default::default()
        };
        assert_eq!(update(&db, 1, &changes).unwrap(), 1);

        let detail = get(&db, &SessionDetailFilter::default()).unwrap().remove(0);
        assert_eq!(detail.reps_total, 8);
        assert_eq!(detail.exercise_id, None);
        assert_eq!(detail.weight_kg, 100.0);
        assert_eq!(detail.sets, 3);

        assert!(matches!(
            update(&db, 1, &SessionDetailChanges::default()),
            Err(GymError::EmptyUpdate { .. })
        ));
    }

    #[test]
    fn test_delete_detail() {
        let db = squat_session();
        insert(&db, &squat_detail()).unwrap();
        assert_eq!(delete(&db, 1).unwrap(), 1);
        assert_eq!(delete(&db, 1).unwrap(), 0);
    }

    #[test]
    fn test_list_with_exercise_names() {
        let db = squat_session();
        insert(&db, &squat_detail()).unwrap();
        insert(
            &db,
            &NewSessionDetail {
                exercise_id: None,
                ..squat_detail()
            },
        )
        .unwrap();

        let named = list_with_exercise_names(&db, 1).unwrap();
        let names: Vec<&str> = named.iter().map(|n| n.exercise_name.as_str()).collect();
        assert_eq!(names, vec!["SQUAT", "UNNAMED"]);
        assert_eq!(named[0].to_string(), "SQUAT: 100.0kg x 5 reps, 3 sets @8");
    }
}
