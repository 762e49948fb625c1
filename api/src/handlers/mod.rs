pub mod sellers;
pub mod token;
