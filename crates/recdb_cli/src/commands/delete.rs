//! Delete command implementation.

use super::{describe, CliError, Entity};
use recdb_codec::Record;
use recdb_core::{RecordFile, Store, StoreConfig};

/// Runs the delete command.
pub fn run(
    config: StoreConfig,
    entity: Entity,
    key: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = Store::open(config)?;

    match entity {
        Entity::Student => delete(store.students_mut(), entity, key),
        Entity::Course => delete(store.courses_mut(), entity, key),
        Entity::Enrollment => delete(store.enrollments_mut(), entity, key),
    }
}

fn delete<R: Record>(
    file: &mut RecordFile<R>,
    entity: Entity,
    key: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    let (slot, record) = file
        .find_by_key(key)?
        .ok_or(CliError::NotFound { entity, key })?;

    file.zero_out(slot)?;
    println!("✓ Deleted [{slot}] {}", describe(&record));
    Ok(())
}
