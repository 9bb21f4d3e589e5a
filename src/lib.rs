pub mod documents;
pub mod main_module;
pub mod records;
pub mod seed;
pub mod shared;
