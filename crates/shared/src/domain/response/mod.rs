mod category;
mod error;

pub use self::category::CategoryResponse;
pub use self::error::ErrorResponse;
