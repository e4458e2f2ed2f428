//! Session Command
//!
//! Record workouts and inspect past sessions.
//!
//! Entries are given as `ACRONYM:WEIGHT:REPS:SETS:INTENSITY`, e.g.
//! `SQ:100:15:3:8`. An empty weight (`SQ::15:3:8`) stores the default 0 kg.

use std::path::Path;

use crate::cli::ui::Output;
use crate::cli::{CommandContext, parse_timestamp};
use crate::constants::display::DATETIME_FORMAT;
use crate::constants::limits::{DETAIL_INTENSITY_MAX, DETAIL_INTENSITY_MIN};
use crate::storage::exercise;
use crate::storage::session::{self, NewSession, SessionChanges, SessionEntry, SessionFilter};
use crate::storage::session_detail;
use crate::storage::get_session_headers;
use crate::types::{GymError, Result, RowId, ValidationError, ValidationErrorKind};

/// One `--entry` argument before its acronym is resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryArg {
    pub acronym: String,
    pub weight_kg: Option<f64>,
    pub reps_total: i64,
    pub sets: i64,
    pub intensity: i64,
}

impl std::str::FromStr for EntryArg {
    type Err = GymError;

    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split(':').map(str::trim).collect();
        let [acronym, weight, reps, sets, intensity] = parts[..] else {
            return Err(ValidationError::new(ValidationErrorKind::Format, "malformed entry")
                .with_field("entry")
                .with_comparison("ACRONYM:WEIGHT:REPS:SETS:INTENSITY", s)
                .into());
        };

        if acronym.is_empty() {
            return Err(ValidationError::new(
                ValidationErrorKind::MissingField,
                "entry has no exercise acronym",
            )
            .with_field("acronym")
            .into());
        }

        let weight_kg = if weight.is_empty() {
            None
        } else {
            let kg = weight
                .parse::<f64>()
                .map_err(|_| number_error("weight", weight))?;
            if !kg.is_finite() || kg < 0.0 {
                return Err(ValidationError::new(ValidationErrorKind::Range, "weight out of range")
                    .with_field("weight")
                    .with_comparison("a finite, non-negative number", weight)
                    .into());
            }
            Some(kg)
        };

        let intensity: i64 = intensity
            .parse()
            .map_err(|_| number_error("intensity", intensity))?;
        if !(DETAIL_INTENSITY_MIN..=DETAIL_INTENSITY_MAX).contains(&intensity) {
            return Err(ValidationError::new(ValidationErrorKind::Range, "intensity out of range")
                .with_field("intensity")
                .with_comparison(
                    format!("{}..={}", DETAIL_INTENSITY_MIN, DETAIL_INTENSITY_MAX),
                    intensity.to_string(),
                )
                .into());
        }

        Ok(Self {
            acronym: acronym.to_uppercase(),
            weight_kg,
            reps_total: reps.parse().map_err(|_| number_error("reps", reps))?,
            sets: sets.parse().map_err(|_| number_error("sets", sets))?,
            intensity,
        })
    }
}

fn number_error(field: &str, actual: &str) -> GymError {
    ValidationError::new(ValidationErrorKind::Format, "not a number")
        .with_field(field)
        .with_comparison("a number", actual)
        .into()
}

pub fn record(config_file: Option<&Path>, date: Option<&str>, entries: &[EntryArg]) -> Result<()> {
    let mut ctx = CommandContext::load(config_file)?;

    let new_session = match date {
        Some(date) => NewSession::at(parse_timestamp(date)?),
        None => NewSession::default(),
    };

    let mut resolved = Vec::with_capacity(entries.len());
    for entry in entries {
        let found = exercise::find_by_acronym(&ctx.db, &entry.acronym)?
            .ok_or_else(|| GymError::NotFound(format!("exercise '{}'", entry.acronym)))?;
        resolved.push(SessionEntry {
            exercise_id: Some(found.id),
            weight_kg: entry.weight_kg,
            reps_total: entry.reps_total,
            sets: entry.sets,
            intensity: entry.intensity,
        });
    }

    let id = session::record(&mut ctx.db, &new_session, &resolved)?;
    Output::new().success(&format!(
        "Recorded session {} with {} exercises",
        id,
        resolved.len()
    ));
    Ok(())
}

pub fn list(config_file: Option<&Path>) -> Result<()> {
    let ctx = CommandContext::load(config_file)?;
    let output = Output::new();

    let sessions = session::get(&ctx.db, &SessionFilter::default())?;
    if sessions.is_empty() {
        output.info("No sessions recorded yet.");
        return Ok(());
    }

    output.headings(&get_session_headers(&ctx.db)?);
    for s in &sessions {
        output.row(s.id, &s.timestamp.format(DATETIME_FORMAT).to_string());
    }
    Ok(())
}

pub fn show(config_file: Option<&Path>, id: RowId) -> Result<()> {
    let ctx = CommandContext::load(config_file)?;
    let output = Output::new();

    let found = session::get(&ctx.db, &SessionFilter::by_id(id))?
        .into_iter()
        .next()
        .ok_or_else(|| GymError::NotFound(format!("session {}", id)))?;

    output.section(&format!(
        "Session {} - {}",
        found.id,
        found.timestamp.format(DATETIME_FORMAT)
    ));
    for named in session_detail::list_with_exercise_names(&ctx.db, id)? {
        output.row(named.detail.id, &named.to_string());
    }
    Ok(())
}

pub fn update(config_file: Option<&Path>, id: RowId, date: &str) -> Result<()> {
    let ctx = CommandContext::load(config_file)?;
    let changes = SessionChanges {
        timestamp: Some(parse_timestamp(date)?),
    };

    match session::update(&ctx.db, id, &changes)? {
        0 => Output::new().warning(&format!("No session with id {}", id)),
        _ => Output::new().success(&format!("Updated session {}", id)),
    }
    Ok(())
}

pub fn delete(config_file: Option<&Path>, id: RowId) -> Result<()> {
    let ctx = CommandContext::load(config_file)?;

    match session::delete(&ctx.db, id)? {
        0 => Output::new().warning(&format!("No session with id {}", id)),
        _ => Output::new().success(&format!("Deleted session {} and its exercises", id)),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_entry() {
        let entry: EntryArg = "sq:100:15:3:8".parse().unwrap();
        assert_eq!(
            entry,
            EntryArg {
                acronym: "SQ".into(),
                weight_kg: Some(100.0),
                reps_total: 15,
                sets: 3,
                intensity: 8,
            }
        );

        let no_weight: EntryArg = "BP::10:2:5".parse().unwrap();
        assert_eq!(no_weight.weight_kg, None);
    }

    #[test]
    fn test_parse_entry_rejects_non_finite_weight() {
        for bad in ["SQ:inf:5:3:8", "SQ:NaN:5:3:8", "SQ:-infinity:5:3:8", "SQ:-2.5:5:3:8"] {
            match bad.parse::<EntryArg>() {
                Err(GymError::Validation(err)) => {
                    assert_eq!(err.kind, ValidationErrorKind::Range, "{}", bad);
                    assert_eq!(err.field.as_deref(), Some("weight"));
                }
                other => panic!("{} parsed as {:?}", bad, other),
            }
        }
        assert_eq!("SQ:0:5:3:8".parse::<EntryArg>().unwrap().weight_kg, Some(0.0));
    }

    #[test]
    fn test_parse_entry_rejects_malformed_input() {
        for bad in ["SQ:100:15:3", "SQ:heavy:15:3:8", ":100:15:3:8", "SQ:100:15:3:8:1", "SQ:100:15:3:11"] {
            let err = bad.parse::<EntryArg>().unwrap_err();
            assert!(matches!(err, GymError::Validation(_)), "{}", bad);
        }
    }
}
