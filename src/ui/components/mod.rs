pub mod column_visibility;
pub mod data_table;
pub mod pagination;
