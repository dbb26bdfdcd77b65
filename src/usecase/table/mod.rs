pub mod paging;
pub mod records;
pub mod render;
