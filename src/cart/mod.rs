pub mod card;
pub mod number;
pub mod total;

pub use card::{Card, CardId, Cart, Quantity};
pub use number::{format_total, format_unit_price, parse_price, parse_quantity, to_fixed_2};
pub use total::{compute_total, total_text};
