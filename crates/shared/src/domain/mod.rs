mod request;
mod response;

pub use self::request::{CreateCategoryRequest, UpdateCategoryRequest};

pub use self::response::{CategoryResponse, ErrorResponse};
