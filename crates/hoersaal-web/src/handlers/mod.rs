pub mod lecture;
pub mod pages;
