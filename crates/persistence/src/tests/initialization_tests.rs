// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend initialization tests.
//!
//! Every other persistence test opens an in-memory database, so connection
//! setup and migrations are exercised throughout. These cover isolation
//! and the file-backed path.

use dialer_console_domain::FilterCriteria;

use super::{create_test_persistence, seed_numbers};
use crate::Persistence;
use crate::error::PersistenceError;

#[test]
fn test_persistence_initialization() {
    let result: Result<Persistence, PersistenceError> = Persistence::new_in_memory();
    assert!(result.is_ok());
}

#[test]
fn test_multiple_in_memory_instances_are_isolated() {
    let mut db1: Persistence = create_test_persistence();
    let mut db2: Persistence = create_test_persistence();

    seed_numbers(&mut db1, 3);

    assert_eq!(db1.count_numbers(&FilterCriteria::new()).unwrap(), 3);
    assert_eq!(
        db2.count_numbers(&FilterCriteria::new()).unwrap(),
        0,
        "db2 should not see rows imported into db1"
    );
}

#[test]
fn test_file_database_runs_migrations() {
    let path: std::path::PathBuf = std::env::temp_dir().join(format!(
        "dialer_console_init_test_{}.sqlite3",
        std::process::id()
    ));
    let _ = std::fs::remove_file(&path);

    let mut persistence: Persistence = Persistence::new_with_file(&path).unwrap();
    assert_eq!(persistence.count_numbers(&FilterCriteria::new()).unwrap(), 0);

    drop(persistence);
    let _ = std::fs::remove_file(&path);
    let _ = std::fs::remove_file(path.with_extension("sqlite3-wal"));
    let _ = std::fs::remove_file(path.with_extension("sqlite3-shm"));
}
