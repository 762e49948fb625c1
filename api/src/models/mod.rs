pub mod book;
pub mod seller;
