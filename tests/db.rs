use diesel::prelude::*;

mod common;

#[test]
fn test_creates_and_removes_db_files() {
    let base = "test_travel_db_lifecycle.db";

    {
        let test_db = common::TestDb::new(base);
        let mut conn = test_db.pool().get().expect("connection");

        let leads: i64 = pushkind_travel::schema::leads::table
            .count()
            .get_result(&mut conn)
            .expect("leads table exists after migrations");
        assert_eq!(leads, 0);
    }

    let db_path = std::path::Path::new(base);
    assert!(!db_path.exists());
    assert!(!std::path::Path::new(&format!("{base}-shm")).exists());
    assert!(!std::path::Path::new(&format!("{base}-wal")).exists());
}
