//! One row per user per `SkillTable`: probe the count, then insert or update.
//!
//! The probe and the write are not atomic. `SupabaseStore::insert_row` is an
//! `on_conflict=userId` upsert, so with a unique index on `userId` a racing
//! first write degrades to an update instead of a duplicate row.

use serde_json::Value;
use tracing::info;

use crate::profile::store::{ProfileStore, SkillTable, StoreError, TripleRow};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOp {
    Inserted,
    Updated,
}

/// Issues exactly one insert or one update for `row.user_id` in `table`.
pub async fn upsert_for_user(
    store: &dyn ProfileStore,
    table: SkillTable,
    row: &TripleRow,
) -> Result<(UpsertOp, Value), StoreError> {
    let existing = store.count_rows(table, &row.user_id).await?;

    let (op, data) = if existing > 0 {
        (UpsertOp::Updated, store.update_row(table, row).await?)
    } else {
        (UpsertOp::Inserted, store.insert_row(table, row).await?)
    };

    info!("{op:?} {} row for user {}", table.name(), row.user_id);
    Ok((op, data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemoryStore;

    fn row(user: &str, a: &str) -> TripleRow {
        TripleRow {
            user_id: user.to_string(),
            values: [a.to_string(), "b".to_string(), "c".to_string()],
        }
    }

    #[tokio::test]
    async fn test_first_write_inserts_then_updates() {
        let store = MemoryStore::default();

        let (op, _) = upsert_for_user(&store, SkillTable::Careers, &row("U1", "Law"))
            .await
            .unwrap();
        assert_eq!(op, UpsertOp::Inserted);

        let (op, _) = upsert_for_user(&store, SkillTable::Careers, &row("U1", "Pharmacy"))
            .await
            .unwrap();
        assert_eq!(op, UpsertOp::Updated);

        let rows = store.rows(SkillTable::Careers);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["career1"], "Pharmacy");
    }

    #[tokio::test]
    async fn test_users_do_not_share_rows() {
        let store = MemoryStore::default();
        upsert_for_user(&store, SkillTable::SoftSkills, &row("U1", "x"))
            .await
            .unwrap();
        let (op, _) = upsert_for_user(&store, SkillTable::SoftSkills, &row("U2", "y"))
            .await
            .unwrap();
        assert_eq!(op, UpsertOp::Inserted);
        assert_eq!(store.rows(SkillTable::SoftSkills).len(), 2);
    }

    #[tokio::test]
    async fn test_count_failure_writes_nothing() {
        let store = MemoryStore::failing();
        assert!(
            upsert_for_user(&store, SkillTable::TechnicalSkills, &row("U1", "Rust"))
                .await
                .is_err()
        );
        assert_eq!(store.writes(), 0);
    }
}
