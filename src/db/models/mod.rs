pub mod discount;
pub mod role_limit;

pub use discount::{Discount, DiscountInput, DiscountKind, DiscountKindTag};
pub use role_limit::{DiscountLimit, DiscountLimitInput};
