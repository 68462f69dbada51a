pub mod alias;
pub mod syntax;
pub mod word_list;
