mod category;

pub use self::category::{CreateCategoryRequest, UpdateCategoryRequest};
