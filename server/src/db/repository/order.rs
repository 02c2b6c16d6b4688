//! Order Repository

use super::{BaseRepository, CountRow, RepoError, RepoResult};
use crate::db::models::Order;
use shared::OrderStatus;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const ORDER_TABLE: &str = "orders";

/// Page parameters for order listings
#[derive(Debug, Clone, Copy)]
pub struct OrderPage {
    /// 1-based page number
    pub page: u32,
    pub limit: u32,
}

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Persist a freshly placed order
    pub async fn create(&self, order: Order) -> RepoResult<Order> {
        let created: Option<Order> = self.base.db().create(ORDER_TABLE).content(order).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create order".to_string()))
    }

    /// Find an order by record id ("orders:key") or receipt number
    /// ("ORD-..."), whichever the caller has at hand.
    pub async fn find(&self, id: &str) -> RepoResult<Option<Order>> {
        if let Some(key) = id.strip_prefix(&format!("{ORDER_TABLE}:")) {
            let order: Option<Order> = self.base.db().select((ORDER_TABLE, key)).await?;
            return Ok(order);
        }
        let id_owned = id.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM orders WHERE receipt_number = $receipt LIMIT 1")
            .bind(("receipt", id_owned))
            .await?;
        let orders: Vec<Order> = result.take(0)?;
        Ok(orders.into_iter().next())
    }

    /// Page through orders, newest first. `user = None` is the admin view
    /// over every order.
    pub async fn find_page(
        &self,
        user: Option<&RecordId>,
        status: Option<OrderStatus>,
        page: OrderPage,
    ) -> RepoResult<(Vec<Order>, u64)> {
        let mut conditions: Vec<&str> = Vec::new();
        if user.is_some() {
            conditions.push("user = $user");
        }
        if status.is_some() {
            conditions.push("status = $status");
        }
        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conditions.join(" AND "))
        };

        let list_query = format!(
            "SELECT * FROM orders{where_clause} ORDER BY created_at DESC LIMIT $limit START $start"
        );
        let count_query = format!("SELECT count() AS total FROM orders{where_clause} GROUP ALL");
        let start = (page.page.saturating_sub(1) as i64) * page.limit as i64;

        let mut query = self
            .base
            .db()
            .query(list_query)
            .query(count_query)
            .bind(("limit", page.limit as i64))
            .bind(("start", start));
        if let Some(user) = user {
            query = query.bind(("user", user.to_string()));
        }
        if let Some(status) = status {
            query = query.bind(("status", status));
        }

        let mut result = query.await?;
        let orders: Vec<Order> = result.take(0)?;
        let total = result
            .take::<Option<CountRow>>(1)?
            .map(|c| c.total)
            .unwrap_or(0);
        Ok((orders, total))
    }

    /// Replace a stored order document (status/history updates)
    pub async fn save(&self, order: Order) -> RepoResult<Order> {
        let id = order
            .id
            .clone()
            .ok_or_else(|| RepoError::Validation("Order has no id".to_string()))?;
        let mut doc = order;
        doc.id = None;
        let saved: Option<Order> = self.base.db().update(id.clone()).content(doc).await?;
        saved.ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id)))
    }

    /// Bulk delete every cancelled order; returns how many were removed
    pub async fn purge_cancelled(&self) -> RepoResult<u64> {
        let mut result = self
            .base
            .db()
            .query("SELECT count() AS total FROM orders WHERE status = $status GROUP ALL")
            .bind(("status", OrderStatus::Cancelled))
            .await?;
        let total = result
            .take::<Option<CountRow>>(0)?
            .map(|c| c.total)
            .unwrap_or(0);

        self.base
            .db()
            .query("DELETE FROM orders WHERE status = $status")
            .bind(("status", OrderStatus::Cancelled))
            .await?;
        Ok(total)
    }
}
