mod category;

pub use self::category::CategoryService;
