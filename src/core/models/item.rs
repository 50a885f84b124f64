use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A line on the bill: `price` is per unit, `quantity` multiplies it.
///
/// When `split_equally` is set the cost is divided across the whole current
/// roster and `participants` is kept in sync with it for display purposes
/// only; the allocation engine ignores the list. When unset, `participants`
/// names the subset that shares the cost.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Item {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub quantity: u32,
    pub split_equally: bool,
    pub participants: Vec<String>,
}

impl Item {
    pub fn line_total(&self) -> f64 {
        self.price * self.quantity as f64
    }
}
