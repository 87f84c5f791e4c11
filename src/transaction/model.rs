use serde::{Deserialize, Deserializer, Serialize, de};

/// Transfer amount. Kept as a JSON number so integers stay integers and
/// floats keep their shortest form when a block is re-hashed.
pub type Amount = serde_json::Number;

/// Integer literals outside `i64::MIN..=u64::MAX` lose their digits when
/// parsed, so floats of that magnitude are refused rather than re-hashed in
/// a different form.
pub fn amount_in_range(amount: &Amount) -> bool {
    if amount.is_u64() || amount.is_i64() {
        return true;
    }
    amount
        .as_f64()
        .is_some_and(|f| f > i64::MIN as f64 && f < u64::MAX as f64)
}

fn bounded_amount<'de, D>(deserializer: D) -> Result<Amount, D::Error>
where
    D: Deserializer<'de>,
{
    let amount = Amount::deserialize(deserializer)?;
    if amount_in_range(&amount) {
        Ok(amount)
    } else {
        Err(de::Error::custom(format!("amount {amount} is out of range")))
    }
}

/// A transfer waiting in the pending buffer or sealed in a block.
/// No balance or signature checks are performed on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub sender: String,
    pub recipient: String,
    #[serde(deserialize_with = "bounded_amount")]
    pub amount: Amount,
}

impl Transaction {
    pub fn new(sender: impl Into<String>, recipient: impl Into<String>, amount: Amount) -> Self {
        Self {
            sender: sender.into(),
            recipient: recipient.into(),
            amount,
        }
    }
}
