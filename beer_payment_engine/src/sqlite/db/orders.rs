use log::{debug, trace};
use sqlx::SqliteConnection;

use crate::db_types::{NewOrder, Order, OrderId, OrderStatusType};

/// Inserts a new order into the database using the given connection. New orders are always `Pending`.
///
/// The `RETURNING` row is read with `fetch_all` so that the insert runs to completion before the connection is
/// released (see [`super::cards::insert_card`]).
///
/// This is not atomic. You can embed this call inside a transaction if you need to ensure atomicity, and pass
/// `&mut *tx` as the connection argument.
pub async fn insert_order(order: NewOrder, conn: &mut SqliteConnection) -> Result<Order, sqlx::Error> {
    let order: Order = sqlx::query_as(
        r#"
            INSERT INTO orders (
                card_id,
                created_at,
                status,
                quantity,
                total_amount
            ) VALUES ($1, $2, $3, $4, $5)
            RETURNING *;
        "#,
    )
    .bind(order.card_id)
    .bind(order.created_at)
    .bind(OrderStatusType::Pending.to_string())
    .bind(order.quantity)
    .bind(order.total_amount)
    .fetch_all(conn)
    .await?
    .pop()
    .ok_or(sqlx::Error::RowNotFound)?;
    debug!("📝️ Order {} for {} units inserted against card id {}", order.id, order.quantity, order.card_id);
    Ok(order)
}

pub async fn fetch_order_by_id(id: &OrderId, conn: &mut SqliteConnection) -> Result<Option<Order>, sqlx::Error> {
    let order = sqlx::query_as("SELECT * FROM orders WHERE id = $1").bind(id.value()).fetch_optional(conn).await?;
    Ok(order)
}

/// Sets the order's status, but only if it is currently `Pending`.
///
/// Returns the updated order, or `None` if the order does not exist or has already left the `Pending` state. The check
/// and the write are a single statement, so when two callers race for the same order exactly one of them gets `Some`.
pub(crate) async fn transition_status_if_pending(
    id: &OrderId,
    status: OrderStatusType,
    conn: &mut SqliteConnection,
) -> Result<Option<Order>, sqlx::Error> {
    let order: Option<Order> = sqlx::query_as("UPDATE orders SET status = $1 WHERE id = $2 AND status = $3 RETURNING *")
        .bind(status.to_string())
        .bind(id.value())
        .bind(OrderStatusType::Pending.to_string())
        .fetch_all(conn)
        .await?
        .pop();
    trace!("📝️ Conditional status update of order {id} to {status}: {}", order.is_some());
    Ok(order)
}
