use chrono::Utc;
use log::{debug, trace};
use sqlx::{QueryBuilder, SqliteConnection};

use crate::db_types::{Card, CardUpdate, NewCard};

/// Inserts a new card with a zero balance. A duplicate `server_id` is rejected by the unique index on the table.
///
/// Statements with a `RETURNING` clause are always read with `fetch_all`. SQLite only completes the write once the
/// statement has been stepped to the end, and `fetch_one` stops at the first row, leaving the write uncommitted on the
/// pooled connection.
pub async fn insert_card(card: NewCard, conn: &mut SqliteConnection) -> Result<Card, sqlx::Error> {
    let card: Card = sqlx::query_as("INSERT INTO cards (server_id, balance, created_at) VALUES ($1, 0, $2) RETURNING *")
        .bind(card.server_id)
        .bind(Utc::now())
        .fetch_all(conn)
        .await?
        .pop()
        .ok_or(sqlx::Error::RowNotFound)?;
    debug!("💳️ Card #{} issued with id {}", card.server_id, card.id);
    Ok(card)
}

pub async fn fetch_card_by_server_id(server_id: i64, conn: &mut SqliteConnection) -> Result<Option<Card>, sqlx::Error> {
    let card = sqlx::query_as("SELECT * FROM cards WHERE server_id = $1").bind(server_id).fetch_optional(conn).await?;
    Ok(card)
}

pub async fn fetch_card_by_id(id: i64, conn: &mut SqliteConnection) -> Result<Option<Card>, sqlx::Error> {
    let card = sqlx::query_as("SELECT * FROM cards WHERE id = $1").bind(id).fetch_optional(conn).await?;
    Ok(card)
}

pub async fn highest_server_id(conn: &mut SqliteConnection) -> Result<Option<i64>, sqlx::Error> {
    let max: Option<i64> = sqlx::query_scalar("SELECT MAX(server_id) FROM cards").fetch_one(conn).await?;
    Ok(max)
}

/// Applies a partial update to the card with the given `id`. Credits are added to the current balance inside the
/// statement itself, so concurrent credits cannot overwrite one another.
///
/// Returns `None` if there is no such card. An empty update is a no-op that returns the card as it stands.
pub(crate) async fn update_card(
    id: i64,
    update: CardUpdate,
    conn: &mut SqliteConnection,
) -> Result<Option<Card>, sqlx::Error> {
    if update.is_empty() {
        debug!("💳️ No fields to update for card {id}. Update request skipped.");
        return fetch_card_by_id(id, conn).await;
    }
    let mut builder = QueryBuilder::new("UPDATE cards SET ");
    let mut set_clause = builder.separated(", ");
    if let Some(credit) = update.credit {
        set_clause.push("balance = balance + ");
        set_clause.push_bind_unseparated(credit);
    }
    if let Some(at) = update.last_credited_at {
        set_clause.push("last_credited_at = ");
        set_clause.push_bind_unseparated(at);
    }
    builder.push(" WHERE id = ");
    builder.push_bind(id);
    builder.push(" RETURNING *");
    trace!("💳️ Executing query: {}", builder.sql());
    let card = builder.build_query_as::<Card>().fetch_all(conn).await?.pop();
    Ok(card)
}
