//! Exercise Command
//!
//! Manage the exercise catalog.

use std::path::Path;

use crate::cli::CommandContext;
use crate::cli::ui::Output;
use crate::storage::Executor;
use crate::storage::exercise::{self, ExerciseChanges, ExerciseFilter, NewExercise};
use crate::types::{GymError, Result, RowId};

pub fn add(
    config_file: Option<&Path>,
    name: &str,
    acronym: &str,
    description: Option<String>,
) -> Result<()> {
    let ctx = CommandContext::load(config_file)?;

    let mut new = NewExercise::new(name, acronym.to_uppercase());
    if let Some(description) = description {
        new = new.with_description(description);
    }
    exercise::insert(&ctx.db, &new)?;

    let id = ctx.db.last_inserted_id()?;
    Output::new().success(&format!("Added exercise {} ({}, {})", id, name, new.acronym));
    Ok(())
}

pub fn list(config_file: Option<&Path>) -> Result<()> {
    let ctx = CommandContext::load(config_file)?;
    let output = Output::new();

    let exercises = exercise::get(&ctx.db, &ExerciseFilter::default())?;
    if exercises.is_empty() {
        output.info("No exercises yet. Add one with 'gymlog exercise add'.");
        return Ok(());
    }

    for e in &exercises {
        match &e.description {
            Some(description) => output.row(e.id, &format!("{}  {}", e.label(), description)),
            None => output.row(e.id, &e.label()),
        }
    }
    Ok(())
}

pub fn update(config_file: Option<&Path>, id: RowId, changes: ExerciseChanges) -> Result<()> {
    let ctx = CommandContext::load(config_file)?;
    let changes = ExerciseChanges {
        acronym: changes.acronym.map(|a| a.to_uppercase()),
        ..changes
    };

    match exercise::update(&ctx.db, id, &changes)? {
        0 => Output::new().warning(&format!("No exercise with id {}", id)),
        _ => Output::new().success(&format!("Updated exercise {}", id)),
    }
    Ok(())
}

pub fn delete(config_file: Option<&Path>, id: RowId) -> Result<()> {
    let ctx = CommandContext::load(config_file)?;

    match exercise::delete(&ctx.db, id) {
        Ok(0) => Output::new().warning(&format!("No exercise with id {}", id)),
        Ok(_) => Output::new().success(&format!("Deleted exercise {}", id)),
        Err(e) if e.is_constraint_violation() => {
            return Err(GymError::Storage(format!(
                "exercise {} is used by recorded sessions: {}",
                id, e
            )));
        }
        Err(e) => return Err(e),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TableNames;
    use crate::storage::Database;

    #[test]
    fn test_add_stores_upper_cased_acronym() {
        figment::Jail::expect_with(|jail| {
            let store = jail.directory().join("gym.db");
            jail.create_file(
                "config.toml",
                &format!("[store]\npath = \"{}\"\n", store.display()),
            )?;
            let config_file = jail.directory().join("config.toml");

            add(Some(&config_file), "Squat", "sq", Some("back squat".into())).unwrap();
            assert!(matches!(
                add(Some(&config_file), "Squat again", "SQ", None),
                Err(e) if e.is_constraint_violation()
            ));

            let db = Database::open_at(&store, TableNames::default()).unwrap();
            let found = exercise::find_by_acronym(&db, "SQ").unwrap().unwrap();
            assert_eq!(found.id, 1);
            assert_eq!(found.name, "Squat");
            assert_eq!(found.description.as_deref(), Some("back squat"));
            Ok(())
        });
    }
}
