use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::customer::Customer;

/// Row of the customers table and the detail side panel.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDto {
    pub id: i32,
    pub name: String,
    pub username: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub status: String,
    pub total_orders: i32,
    pub joined_at: NaiveDateTime,
}

impl From<Customer> for CustomerDto {
    fn from(customer: Customer) -> Self {
        Self {
            id: customer.id.get(),
            name: customer.name,
            username: customer.username,
            email: customer.email,
            phone_number: customer.phone,
            address: customer.address,
            status: customer.status.to_string(),
            total_orders: customer.total_orders.get(),
            joined_at: customer.joined_at,
        }
    }
}
