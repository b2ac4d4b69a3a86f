//! View command implementation.

use super::{describe, CliError, Entity};
use recdb_codec::Record;
use recdb_core::{RecordFile, Store, StoreConfig};
use serde::Serialize;

/// Which records to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// Every live record.
    All,
    /// The first live record with this key.
    Key(u32),
    /// Live records whose field contains `needle`, ignoring case.
    Filter {
        /// Field name; the first field if `None`.
        field: Option<String>,
        /// Substring to look for.
        needle: String,
    },
}

/// A record with its slot, as printed in JSON output.
#[derive(Debug, Serialize)]
struct Row<'a, R> {
    slot: u64,
    #[serde(flatten)]
    record: &'a R,
}

/// Runs the view command.
pub fn run(
    config: StoreConfig,
    entity: Entity,
    query: &Query,
    format: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::open(config)?;

    match entity {
        Entity::Student => show(store.students(), entity, query, format),
        Entity::Course => show(store.courses(), entity, query, format),
        Entity::Enrollment => show(store.enrollments(), entity, query, format),
    }
}

fn show<R: Record + Serialize>(
    file: &RecordFile<R>,
    entity: Entity,
    query: &Query,
    format: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let rows = select(file, entity, query)?;

    match format {
        "json" => {
            let rows: Vec<Row<'_, R>> = rows
                .iter()
                .map(|(slot, record)| Row {
                    slot: *slot,
                    record,
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        _ => {
            if rows.is_empty() {
                println!("No matches found.");
            }
            for (slot, record) in &rows {
                println!("[{slot}] {}", describe(record));
            }
        }
    }

    Ok(())
}

fn select<R: Record>(
    file: &RecordFile<R>,
    entity: Entity,
    query: &Query,
) -> Result<Vec<(u64, R)>, Box<dyn std::error::Error>> {
    Ok(match query {
        Query::All => file.scan()?.into_live(),
        Query::Key(key) => {
            let found = file
                .find_by_key(*key)?
                .ok_or(CliError::NotFound { entity, key: *key })?;
            vec![found]
        }
        Query::Filter { field, needle } => {
            let index = field_index::<R>(field.as_deref())?;
            file.filter(index, needle)?
        }
    })
}

/// Resolves a field name (case-insensitive) to its index.
fn field_index<R: Record>(field: Option<&str>) -> Result<usize, CliError> {
    let Some(field) = field else {
        return Ok(0);
    };
    R::FIELD_NAMES
        .iter()
        .position(|name| name.eq_ignore_ascii_case(field))
        .ok_or_else(|| CliError::UnknownField {
            field: field.to_string(),
            expected: R::FIELD_NAMES.join(", "),
        })
}
