pub mod config;
pub mod keywords;
pub mod select;
