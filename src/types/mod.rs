mod fields;
mod inputs;
mod models;
mod price;
mod status;

pub use fields::{Fields, FromFields, parse_input};
pub use inputs::*;
pub use models::*;
pub use price::{Price, validate_price};
pub use status::{AvailabilityStatus, ItemCondition};
