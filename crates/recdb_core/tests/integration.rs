//! End-to-end tests across record files, repair and migration.

use recdb_core::{
    check, inspect, trim, CoreError, Enrollment, LegacyStudent, Record, RecordFile, Student,
    TrimOutcome, MIGRATE_BACKUP_SUFFIX, TRIM_BACKUP_SUFFIX,
};
use recdb_storage::backup_path;
use recdb_testkit::{
    append_raw, append_torn, encode_all, file_len, with_sample_store, write_records, CrashPoint,
    TestStore,
};
use std::fs;

fn three_students() -> Vec<Student> {
    vec![
        Student::new(1001, "Somchai Dee", 1, "Computer Science"),
        Student::new(1002, "Anong Sookjai", 2, "Information Technology"),
        Student::new(1003, "Janpen Rungruang", 3, "Computer Science"),
    ]
}

#[test]
fn append_delete_update_scenario() {
    let mut store = TestStore::empty();
    let students = store.students_mut();
    for s in three_students() {
        students.append(&s).unwrap();
    }

    let scan = students.scan().unwrap();
    assert!(scan.is_clean());
    assert_eq!(
        scan.records.iter().map(|(_, s)| s.id).collect::<Vec<_>>(),
        vec![1001, 1002, 1003]
    );

    students.zero_out(1).unwrap();
    let live: Vec<u32> = students.scan().unwrap().live().map(|(_, s)| s.id).collect();
    assert_eq!(live, vec![1001, 1003]);

    let updated = Student::new(1003, "Janpen Rungruang", 4, "Computer Science");
    assert!(students.overwrite_by_key(0, 1003, &updated).unwrap());

    let scan = students.scan().unwrap();
    assert_eq!(scan.len(), 3);
    let (slot, s) = scan.live().find(|(_, s)| s.id == 1003).unwrap();
    assert_eq!(*slot, 2);
    assert_eq!(s.year, 4);
    assert_eq!(s.name, "Janpen Rungruang");
    assert_eq!(s.major, "Computer Science");
    assert_eq!(file_len(&store.config().students_path()), 3 * Student::SIZE as u64);
}

#[test]
fn torn_append_is_detected_scanned_and_trimmed() {
    let mut store = TestStore::sample();
    let path = store.config().students_path();
    let before = fs::read(&path).unwrap();

    append_torn(&path, &Student::new(1006, "Torn", 1, "X"), CrashPoint::Midway);

    assert!(!check(&path, Student::SIZE).unwrap());
    let health = inspect(&path, Student::SIZE).unwrap();
    assert_eq!(health.complete_records, 5);
    assert_eq!(health.torn_bytes, (Student::SIZE / 2) as u64);

    let scan = store.students().scan().unwrap();
    assert_eq!(scan.len(), 5);
    assert_eq!(scan.torn_tail.unwrap().offset, 5 * Student::SIZE as u64);

    let err = store
        .students_mut()
        .append(&Student::new(1007, "After Crash", 1, "X"))
        .unwrap_err();
    assert!(matches!(err, CoreError::TornFile { offset: 440, len: 44 }));
    assert!(store.students().find_by_key(1007).unwrap().is_none());
    let live: Vec<u32> = store.students().scan().unwrap().live().map(|(_, s)| s.id).collect();
    assert_eq!(live, vec![1001, 1002, 1003, 1004, 1005]);

    let outcome = trim(&path, Student::SIZE).unwrap();
    assert!(outcome.was_trimmed());
    assert_eq!(fs::read(&path).unwrap(), before);
    assert!(check(&path, Student::SIZE).unwrap());

    let slot = store
        .students_mut()
        .append(&Student::new(1006, "Whole", 1, "X"))
        .unwrap();
    assert_eq!(slot, 5);
    assert_eq!(store.students().count_live().unwrap(), 6);
}

#[test]
fn update_and_delete_on_torn_file_keep_the_tail() {
    let mut store = TestStore::sample();
    let path = store.config().enrollments_path();
    append_raw(&path, &[0xEE; 7]);
    let tail_offset = 6 * 22;

    let enrollments = store.enrollments_mut();
    let regraded = Enrollment::new(30002, 1001, 2002, "A");
    assert!(enrollments.overwrite_by_key(0, 30002, &regraded).unwrap());
    assert!(enrollments.delete_by_key(30005).unwrap());

    let bytes = fs::read(&path).unwrap();
    assert_eq!(bytes.len(), tail_offset + 7);
    assert_eq!(&bytes[tail_offset..], &[0xEE; 7]);

    let scan = store.enrollments().scan().unwrap();
    assert_eq!(scan.len(), 6);
    assert_eq!(scan.records[1].1, regraded);
    assert!(!scan.records[4].1.is_live());
    assert_eq!(scan.torn_tail.unwrap().offset, tail_offset as u64);
}

#[test]
fn trim_twice_keeps_first_backup() {
    let store = TestStore::sample();
    let path = store.config().enrollments_path();
    append_raw(&path, &[0xEE; 7]);
    let corrupted = fs::read(&path).unwrap();

    let first = trim(&path, 22).unwrap();
    let after_first = fs::read(&path).unwrap();
    let second = trim(&path, 22).unwrap();

    assert!(matches!(first, TrimOutcome::Trimmed { backup_created: true, .. }));
    assert!(matches!(second, TrimOutcome::Clean { .. }));
    assert_eq!(fs::read(&path).unwrap(), after_first);
    assert_eq!(
        fs::read(backup_path(&path, TRIM_BACKUP_SUFFIX)).unwrap(),
        corrupted
    );
}

#[test]
fn legacy_students_migrate_into_store() {
    let store = TestStore::with_config(|c| c.default_major("Undeclared"));
    let legacy_path = store.config().legacy_students_path();
    let legacy = vec![
        LegacyStudent::new(1001, "Somchai Dee", 1),
        LegacyStudent::new(1002, "Anong Sookjai", 2),
        LegacyStudent::new(1003, "Janpen Rungruang", 3),
    ];
    write_records(&legacy_path, &legacy);
    append_torn(&legacy_path, &LegacyStudent::new(1004, "Krit", 1), CrashPoint::FirstByte);

    let report = store.migrate_students().unwrap();

    assert_eq!(report.migrated, 3);
    assert_eq!(report.dropped_tail_bytes, 1);
    let migrated: Vec<Student> = store
        .students()
        .scan()
        .unwrap()
        .into_live()
        .into_iter()
        .map(|(_, s)| s)
        .collect();
    let expected: Vec<Student> = legacy
        .into_iter()
        .map(|s| s.with_major("Undeclared"))
        .collect();
    assert_eq!(migrated, expected);
    assert!(backup_path(&legacy_path, MIGRATE_BACKUP_SUFFIX).exists());
    assert!(!legacy_path.exists());
}

#[test]
fn second_migration_after_edits_keeps_new_students() {
    let mut store = TestStore::empty();
    let legacy_path = store.config().legacy_students_path();
    write_records(&legacy_path, &[LegacyStudent::new(1001, "Somchai Dee", 1)]);
    store.migrate_students().unwrap();

    let rerun = store.migrate_students().unwrap();
    assert!(!rerun.backup_created);
    assert_eq!(rerun.migrated, 1);

    store
        .students_mut()
        .append(&Student::new(2000, "Added Later", 2, "Physics"))
        .unwrap();

    let err = store.migrate_students().unwrap_err();
    assert!(matches!(err, CoreError::MigrationConflict { .. }));
    let ids: Vec<u32> = store.students().scan().unwrap().live().map(|(_, s)| s.id).collect();
    assert_eq!(ids, vec![1001, 2000]);
}

#[test]
fn migrating_the_seeded_students_file_is_refused() {
    with_sample_store(|store| {
        let students_path = store.config().students_path();
        let before = fs::read(&students_path).unwrap();

        assert_eq!(store.migrate_students().unwrap().backup, None);
        let err = store.migrate_students_from(&students_path).unwrap_err();

        assert!(matches!(err, CoreError::LayoutMismatch { .. }));
        assert_eq!(fs::read(&students_path).unwrap(), before);
        assert!(!backup_path(&students_path, MIGRATE_BACKUP_SUFFIX).exists());
    });
}

#[test]
fn record_file_reads_files_written_elsewhere() {
    let store = TestStore::empty();
    let path = store.dir().join("external.dat");
    fs::write(&path, encode_all(&three_students())).unwrap();

    let file = RecordFile::<Student>::open(&path);
    let found = file.find_by_key(1002).unwrap().unwrap();
    assert_eq!(found.0, 1);
    assert_eq!(found.1.name, "Anong Sookjai");
    assert_eq!(
        file.filter(3, "computer").unwrap().len(),
        2,
        "filter should match case-insensitively"
    );
}
