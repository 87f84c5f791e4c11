pub mod model;

pub use model::{Amount, Transaction, amount_in_range};
