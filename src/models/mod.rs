pub mod category;
pub mod product;

pub use category::CategoryOption;
pub use product::ProductRecord;
