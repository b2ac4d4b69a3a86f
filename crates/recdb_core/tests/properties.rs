//! Property tests for record files and repair.

use proptest::prelude::*;
use recdb_core::{check, migrate_legacy_students, trim, LegacyStudent, Record, RecordFile, Student};
use recdb_storage::InMemoryBackend;
use recdb_testkit::{
    append_raw, encode_all, legacy_student_strategy, operation_sequence_strategy,
    overlong_student_strategy, student_strategy, PropTestConfig, StudentOperation,
};
use std::fs;
use tempfile::TempDir;

proptest! {
    #![proptest_config(PropTestConfig::quick().to_proptest_config())]

    #[test]
    fn fitting_students_roundtrip(student in student_strategy()) {
        let bytes = student.encode();
        prop_assert_eq!(bytes.len(), Student::SIZE);
        prop_assert_eq!(Student::decode(&bytes).unwrap(), student);
    }

    #[test]
    fn overlong_students_encode_to_record_size(student in overlong_student_strategy()) {
        let bytes = student.encode();
        prop_assert_eq!(bytes.len(), Student::SIZE);
        let decoded = Student::decode(&bytes).unwrap();
        prop_assert_eq!(decoded.id, student.id);
        prop_assert_eq!(decoded.year, student.year);
    }

    #[test]
    fn scan_returns_only_complete_records(
        students in prop::collection::vec(student_strategy(), 0..8),
        tail in prop::collection::vec(any::<u8>(), 0..Student::SIZE),
    ) {
        let mut data = encode_all(&students);
        data.extend_from_slice(&tail);
        let file = RecordFile::<Student>::with_backend(Box::new(InMemoryBackend::with_data(data)));

        let scan = file.scan().unwrap();
        let scanned: Vec<Student> = scan.records.iter().map(|(_, s)| s.clone()).collect();
        prop_assert_eq!(scanned, students);
        prop_assert_eq!(scan.torn_tail.map(|t| t.len), (!tail.is_empty()).then_some(tail.len()));
    }

    #[test]
    fn check_matches_alignment(len in 0usize..400) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("f.dat");
        fs::write(&path, vec![1u8; len]).unwrap();
        prop_assert_eq!(check(&path, Student::SIZE).unwrap(), len % Student::SIZE == 0);
    }

    #[test]
    fn trim_is_idempotent(
        students in prop::collection::vec(student_strategy(), 0..5),
        tail_len in 1usize..Student::SIZE,
    ) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("students.dat");
        fs::write(&path, encode_all(&students)).unwrap();
        append_raw(&path, &vec![0xAA; tail_len]);

        trim(&path, Student::SIZE).unwrap();
        let once = fs::read(&path).unwrap();
        trim(&path, Student::SIZE).unwrap();

        prop_assert_eq!(fs::read(&path).unwrap(), once.clone());
        prop_assert_eq!(once, encode_all(&students));
    }

    #[test]
    fn migration_preserves_every_record(
        legacy in prop::collection::vec(legacy_student_strategy(), 0..8),
        tail_len in 0usize..58,
    ) {
        let len = legacy.len() * LegacyStudent::SIZE + tail_len;
        prop_assume!(tail_len == 0 || len % Student::SIZE != 0);
        let dir = TempDir::new().unwrap();
        let old = dir.path().join("old.dat");
        let new = dir.path().join("new.dat");
        fs::write(&old, encode_all(&legacy)).unwrap();
        append_raw(&old, &vec![3; tail_len]);

        let report = migrate_legacy_students(&old, &new, "Undeclared").unwrap();

        prop_assert_eq!(report.migrated, legacy.len());
        prop_assert_eq!(report.dropped_tail_bytes, tail_len);
        let expected: Vec<Student> =
            legacy.into_iter().map(|s| s.with_major("Undeclared")).collect();
        prop_assert_eq!(fs::read(&new).unwrap(), encode_all(&expected));
    }

    #[test]
    fn file_matches_vec_model(ops in operation_sequence_strategy(1, 40)) {
        let mut file = RecordFile::<Student>::with_backend(Box::new(InMemoryBackend::new()));
        let mut model: Vec<Student> = Vec::new();
        let zeroed = Student::decode(&[0; Student::SIZE]).unwrap();

        for op in ops {
            match op {
                StudentOperation::Append(s) => {
                    let slot = file.append(&s).unwrap();
                    prop_assert_eq!(slot as usize, model.len());
                    model.push(s);
                }
                StudentOperation::Overwrite { key, student } => {
                    let hit = model.iter().position(|s| s.is_live() && s.id == key);
                    prop_assert_eq!(
                        file.overwrite_by_key(0, key, &student).unwrap(),
                        hit.is_some()
                    );
                    if let Some(i) = hit {
                        model[i] = student;
                    }
                }
                StudentOperation::Delete { key } => {
                    let hit = model.iter().position(|s| s.is_live() && s.id == key);
                    prop_assert_eq!(file.delete_by_key(key).unwrap(), hit.is_some());
                    if let Some(i) = hit {
                        model[i] = zeroed.clone();
                    }
                }
            }
        }

        let scanned: Vec<Student> =
            file.scan().unwrap().records.into_iter().map(|(_, s)| s).collect();
        prop_assert_eq!(scanned, model);
    }
}
