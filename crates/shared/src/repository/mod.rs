mod category;
mod memory;

pub use self::category::CategoryRepository;
pub use self::memory::InMemoryCategoryRepository;
