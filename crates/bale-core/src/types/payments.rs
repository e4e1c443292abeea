use serde::{Deserialize, Serialize};

use crate::object::serde_object;

/// A portion of the price for goods or services.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledPrice {
    label: String,
    /// Price in the smallest currency unit (rials).
    amount: u64,
}

serde_object!(LabeledPrice => "labeled price");

impl LabeledPrice {
    pub fn new(label: impl Into<String>, amount: u64) -> Self {
        Self {
            label: label.into(),
            amount,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn amount(&self) -> u64 {
        self.amount
    }
}
