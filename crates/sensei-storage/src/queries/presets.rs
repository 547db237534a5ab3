// SPDX-FileCopyrightText: 2026 Sensei Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Preset code CRUD operations.

use rusqlite::params;
use sensei_core::SenseiError;

use crate::database::Database;
use crate::models::PresetCode;

/// Create a new preset code.
///
/// Returns `SenseiError::Conflict` if a preset with the same query already
/// exists.
pub async fn create(db: &Database, query: &str, code: &str) -> Result<PresetCode, SenseiError> {
    let new_query = query.to_string();
    let new_code = code.to_string();
    let created = db
        .connection()
        .call(move |conn| {
            // The background worker runs closures one at a time, so the
            // existence check and the insert cannot interleave with another
            // create.
            let existing = conn.query_row(
                "SELECT 1 FROM preset_codes WHERE query = ?1",
                params![new_query],
                |_row| Ok(()),
            );
            match existing {
                Ok(()) => return Ok(None),
                Err(rusqlite::Error::QueryReturnedNoRows) => {}
                Err(e) => return Err(e),
            }
            conn.execute(
                "INSERT INTO preset_codes (query, code) VALUES (?1, ?2)",
                params![new_query, new_code],
            )?;
            Ok(Some(PresetCode {
                id: conn.last_insert_rowid(),
                query: new_query,
                code: new_code,
            }))
        })
        .await
        .map_err(crate::database::map_tr_err)?;

    created.ok_or_else(|| {
        SenseiError::Conflict(format!("a preset code for query `{query}` already exists"))
    })
}

/// Get a preset code by its query string.
pub async fn get_by_query(db: &Database, query: &str) -> Result<Option<PresetCode>, SenseiError> {
    let query = query.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt =
                conn.prepare("SELECT id, query, code FROM preset_codes WHERE query = ?1")?;
            let result = stmt.query_row(params![query], |row| {
                Ok(PresetCode {
                    id: row.get(0)?,
                    query: row.get(1)?,
                    code: row.get(2)?,
                })
            });
            match result {
                Ok(preset) => Ok(Some(preset)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// List all preset codes, newest first.
pub async fn list(db: &Database) -> Result<Vec<PresetCode>, SenseiError> {
    db.connection()
        .call(|conn| {
            let mut stmt =
                conn.prepare("SELECT id, query, code FROM preset_codes ORDER BY id DESC")?;
            let rows = stmt.query_map([], |row| {
                Ok(PresetCode {
                    id: row.get(0)?,
                    query: row.get(1)?,
                    code: row.get(2)?,
                })
            })?;
            let mut presets = Vec::new();
            for row in rows {
                presets.push(row?);
            }
            Ok(presets)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Delete a preset code by id.
///
/// Returns `true` if a row was deleted, `false` if no row had the given id.
pub async fn delete(db: &Database, id: i64) -> Result<bool, SenseiError> {
    let affected = db
        .connection()
        .call(move |conn| conn.execute("DELETE FROM preset_codes WHERE id = ?1", params![id]))
        .await
        .map_err(crate::database::map_tr_err)?;
    Ok(affected > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    async fn setup_db() -> (Database, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();
        (db, dir)
    }

    #[tokio::test]
    async fn create_and_get_roundtrips() {
        let (db, _dir) = setup_db().await;

        let created = create(&db, "hello", "print('hello')").await.unwrap();
        assert!(created.id > 0);
        assert_eq!(created.query, "hello");
        assert_eq!(created.code, "print('hello')");

        let retrieved = get_by_query(&db, "hello").await.unwrap();
        assert_eq!(retrieved, Some(created));

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn create_duplicate_query_conflicts() {
        let (db, _dir) = setup_db().await;

        create(&db, "fizzbuzz", "for i in range(100): ...")
            .await
            .unwrap();
        let err = create(&db, "fizzbuzz", "something else")
            .await
            .unwrap_err();
        assert!(matches!(err, SenseiError::Conflict(_)));
        assert!(err.to_string().contains("already exists"));

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn get_nonexistent_returns_none() {
        let (db, _dir) = setup_db().await;
        let result = get_by_query(&db, "no-such-query").await.unwrap();
        assert!(result.is_none());
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn list_returns_newest_first() {
        let (db, _dir) = setup_db().await;

        create(&db, "first", "a").await.unwrap();
        create(&db, "second", "b").await.unwrap();
        create(&db, "third", "c").await.unwrap();

        let all = list(&db).await.unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].query, "third");
        assert_eq!(all[1].query, "second");
        assert_eq!(all[2].query, "first");
        assert!(all[0].id > all[1].id);

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn list_empty_database_returns_empty_vec() {
        let (db, _dir) = setup_db().await;
        let all = list(&db).await.unwrap();
        assert!(all.is_empty());
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn delete_removes_row() {
        let (db, _dir) = setup_db().await;

        let created = create(&db, "doomed", "x = 1").await.unwrap();
        assert!(delete(&db, created.id).await.unwrap());
        assert!(get_by_query(&db, "doomed").await.unwrap().is_none());

        // A second delete finds nothing.
        assert!(!delete(&db, created.id).await.unwrap());

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn delete_nonexistent_returns_false() {
        let (db, _dir) = setup_db().await;
        assert!(!delete(&db, 999).await.unwrap());
        db.close().await.unwrap();
    }
}
