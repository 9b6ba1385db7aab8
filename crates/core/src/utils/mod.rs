pub mod money;
pub mod pagination;

pub use money::{decimal_from_db, decimal_to_db, AmountInput};
pub use pagination::{PageRequest, PageMeta};
