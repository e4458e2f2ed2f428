//! End-to-end use of the public storage API against a file-backed store.

use chrono::NaiveDate;
use tempfile::TempDir;

use gymlog::storage::exercise::{self, ExerciseChanges, ExerciseFilter, NewExercise};
use gymlog::storage::intensity::{self, IntensityLevelFilter, NewIntensityLevel};
use gymlog::storage::session::{self, NewSession, SessionEntry, SessionFilter};
use gymlog::storage::session_detail::{self, NewSessionDetail, SessionDetailFilter};
use gymlog::storage::{get_last_rowid, get_session_headers};
use gymlog::{Config, Database, Executor, GymError, TableNames};

fn store_in(dir: &TempDir) -> Database {
    let mut config = Config::default();
    config.store.path = dir.path().join("db").join("gym.db");
    let mut db = Database::from_config(&config);
    db.open().unwrap();
    db
}

#[test]
fn fresh_store_scenario() {
    let dir = TempDir::new().unwrap();
    let db = store_in(&dir);

    assert_eq!(get_session_headers(&db).unwrap(), vec!["_id", "timestamp"]);

    session::insert(&db, &NewSession::default()).unwrap();
    assert_eq!(get_last_rowid(&db).unwrap(), 1);
    let sessions = session::get(&db, &SessionFilter::by_id(1)).unwrap();
    assert_eq!(sessions.len(), 1);
}

#[test]
fn squat_session_round_trip() {
    let dir = TempDir::new().unwrap();
    let db = store_in(&dir);

    exercise::insert(&db, &NewExercise::new("Squat", "SQ")).unwrap();
    session::insert(&db, &NewSession::default()).unwrap();
    session_detail::insert(
        &db,
        &NewSessionDetail {
            session_id: 1,
            exercise_id: Some(1),
            weight_kg: Some(100.0),
            reps_total: 5,
            sets: 3,
            intensity: 8,
        },
    )
    .unwrap();

    let details = session_detail::get(&db, &SessionDetailFilter::by_session(1)).unwrap();
    assert_eq!(details.len(), 1);
    let detail = &details[0];
    assert_eq!(detail.id, 1);
    assert_eq!(
        (detail.session_id, detail.exercise_id, detail.weight_kg),
        (1, Some(1), 100.0)
    );
    assert_eq!((detail.reps_total, detail.sets, detail.intensity), (5, 3, 8));

    let named = session_detail::list_with_exercise_names(&db, 1).unwrap();
    assert_eq!(named[0].to_string(), "SQUAT: 100.0kg x 5 reps, 3 sets @8");
}

#[test]
fn referential_rules() {
    let dir = TempDir::new().unwrap();
    let mut db = store_in(&dir);

    exercise::insert(&db, &NewExercise::new("Deadlift", "DL")).unwrap();
    let entry = SessionEntry {
        exercise_id: Some(1),
        weight_kg: None,
        reps_total: 5,
        sets: 5,
        intensity: 9,
    };
    let day = NaiveDate::from_ymd_opt(2024, 5, 2)
        .unwrap()
        .and_hms_opt(7, 30, 0)
        .unwrap();
    let id = session::record(&mut db, &NewSession::at(day), &[entry]).unwrap();

    // referenced exercise cannot go away
    let err = exercise::delete(&db, 1).unwrap_err();
    assert!(err.is_constraint_violation());
    assert!(exercise::find_by_acronym(&db, "DL").unwrap().is_some());

    // the session takes its details with it
    assert_eq!(session::delete(&db, id).unwrap(), 1);
    assert!(
        session_detail::get(&db, &SessionDetailFilter::default())
            .unwrap()
            .is_empty()
    );
    assert_eq!(exercise::delete(&db, 1).unwrap(), 1);
}

#[test]
fn data_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let mut db = store_in(&dir);

    exercise::insert(&db, &NewExercise::new("Row", "RW").with_description("barbell")).unwrap();
    intensity::insert(
        &db,
        &NewIntensityLevel {
            level: 7,
            description: Some("hard".into()),
        },
    )
    .unwrap();
    let changes = ExerciseChanges {
        name: Some("Pendlay row".into()),
        ..Default::default()
    };
    assert_eq!(exercise::update(&db, 1, &changes).unwrap(), 1);

    db.close().unwrap();
    assert!(matches!(
        exercise::get(&db, &ExerciseFilter::default()),
        Err(GymError::NotOpen)
    ));

    db.open().unwrap();
    db.open().unwrap();
    let row = exercise::find_by_acronym(&db, "RW").unwrap().unwrap();
    assert_eq!(row.name, "Pendlay row");
    assert_eq!(row.description.as_deref(), Some("barbell"));
    assert_eq!(
        intensity::get(&db, &IntensityLevelFilter::default()).unwrap()[0].level,
        7
    );
}

#[test]
fn configured_table_names_are_used() {
    let dir = TempDir::new().unwrap();
    let tables = TableNames {
        exercise: "lifts".into(),
        session: "workouts".into(),
        session_details: "workout_lines".into(),
        intensity: "effort".into(),
    };
    let db = Database::open_at(dir.path().join("custom.db"), tables).unwrap();

    exercise::insert(&db, &NewExercise::new("Press", "OHP")).unwrap();
    assert_eq!(db.tables().exercise, "lifts");
    assert_eq!(exercise::get(&db, &ExerciseFilter::default()).unwrap().len(), 1);
    assert_eq!(get_session_headers(&db).unwrap(), vec!["_id", "timestamp"]);
}
