pub mod footer;
pub mod pagination;
pub mod tab_bar;
pub mod table;
pub mod text_input;
