use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{CustomerId, CustomerStatus, OrderCount};

/// Customer account as administered from the back office.
///
/// Records are created by the storefront, never by this console; the only
/// mutations available here are block and unblock.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub username: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub status: CustomerStatus,
    pub total_orders: OrderCount,
    pub joined_at: NaiveDateTime,
}

impl Customer {
    pub fn is_blocked(&self) -> bool {
        self.status == CustomerStatus::Blocked
    }
}
