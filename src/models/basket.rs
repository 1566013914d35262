use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// BasketLine - One product in the shop basket
// ---------------------------------------------------------------------------

/// Field names match the persisted basket format (`price`, `qty`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasketLine {
    pub product_code: String,
    pub name: String,
    #[serde(rename = "price")]
    pub unit_price: f64,
    #[serde(rename = "qty")]
    pub quantity: u32,
}

impl BasketLine {
    pub fn new(product_code: &str, name: &str, unit_price: f64) -> Self {
        Self {
            product_code: product_code.to_string(),
            name: name.to_string(),
            unit_price,
            quantity: 1,
        }
    }

    pub fn subtotal(&self) -> f64 {
        f64::from(self.quantity) * self.unit_price
    }
}
