//! Parameterized `UPDATE` statements whose `SET` list depends on which
//! fields a partial-update payload carries.
//!
//! Column names come from repository code only; every value goes through
//! `push_bind`, so payload content never reaches the SQL text.

use folio_core::types::DbId;
use sqlx::{Encode, Postgres, QueryBuilder, Type};

/// `SET` clause that refreshes `updated_at` on every update.
///
/// `clock_timestamp()` rather than `NOW()` so two updates in one
/// transaction still differ, and never less than one microsecond past the
/// previous value.
const TOUCH_UPDATED_AT: &str =
    "updated_at = GREATEST(clock_timestamp(), updated_at + INTERVAL '1 microsecond')";

/// Builder for a single-row sparse update.
///
/// ```ignore
/// let mut update = SparseUpdate::new("projects");
/// update.set("title", input.title.as_deref());
/// update.set_nullable("end_date", input.end_date);
/// let project = update
///     .finish(id, COLUMNS)
///     .build_query_as::<Project>()
///     .fetch_optional(pool)
///     .await?;
/// ```
pub struct SparseUpdate<'args> {
    builder: QueryBuilder<'args, Postgres>,
    fields: usize,
}

impl<'args> SparseUpdate<'args> {
    /// Start an update of `table`. The statement always touches `updated_at`.
    pub fn new(table: &str) -> Self {
        let builder = QueryBuilder::new(format!("UPDATE {table} SET {TOUCH_UPDATED_AT}"));
        Self { builder, fields: 0 }
    }

    /// Assign `column` when `value` is present; skip it otherwise.
    pub fn set<T>(&mut self, column: &str, value: Option<T>) -> &mut Self
    where
        T: 'args + Encode<'args, Postgres> + Type<Postgres> + Send,
    {
        if let Some(value) = value {
            self.builder
                .push(", ")
                .push(column)
                .push(" = ")
                .push_bind(value);
            self.fields += 1;
        }
        self
    }

    /// Assign a nullable `column`: `Some(None)` writes `NULL`,
    /// `Some(Some(v))` writes `v`, `None` leaves the column alone.
    pub fn set_nullable<T>(&mut self, column: &str, value: Option<Option<T>>) -> &mut Self
    where
        T: 'args + Encode<'args, Postgres> + Type<Postgres> + Send,
    {
        self.set(column, value)
    }

    /// Number of payload fields included so far (excluding `updated_at`).
    pub fn field_count(&self) -> usize {
        self.fields
    }

    /// Close the statement with the row predicate and `RETURNING` list.
    pub fn finish(mut self, id: DbId, returning: &str) -> QueryBuilder<'args, Postgres> {
        self.builder
            .push(" WHERE id = ")
            .push_bind(id)
            .push(" RETURNING ")
            .push(returning);
        self.builder
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_update_only_touches_updated_at() {
        let update = SparseUpdate::new("projects");
        assert_eq!(update.field_count(), 0);

        let builder = update.finish(7, "id");
        assert_eq!(
            builder.sql(),
            format!("UPDATE projects SET {TOUCH_UPDATED_AT} WHERE id = $1 RETURNING id")
        );
    }

    #[test]
    fn absent_fields_are_skipped() {
        let mut update = SparseUpdate::new("projects");
        update
            .set("title", Some("New title"))
            .set::<&str>("description", None)
            .set("featured", Some(true));
        assert_eq!(update.field_count(), 2);

        let builder = update.finish(1, "id, title");
        let sql = builder.sql();
        assert!(sql.contains(", title = $1"), "{sql}");
        assert!(sql.contains(", featured = $2"), "{sql}");
        assert!(!sql.contains("description"), "{sql}");
        assert!(sql.ends_with("WHERE id = $3 RETURNING id, title"), "{sql}");
    }

    #[test]
    fn explicit_null_is_bound_not_skipped() {
        let mut update = SparseUpdate::new("projects");
        update.set_nullable::<&str>("live_url", Some(None));
        update.set_nullable::<&str>("github_url", None);
        assert_eq!(update.field_count(), 1);

        let builder = update.finish(1, "id");
        let sql = builder.sql();
        assert!(sql.contains(", live_url = $1"), "{sql}");
        assert!(!sql.contains("github_url"), "{sql}");
    }

    #[test]
    fn values_never_reach_sql_text() {
        let mut update = SparseUpdate::new("users");
        update.set("name", Some("x'; DROP TABLE users; --"));

        let builder = update.finish(1, "id");
        assert!(!builder.sql().contains("DROP TABLE"));
    }
}
