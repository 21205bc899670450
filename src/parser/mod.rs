pub mod statement_parser;
pub use statement_parser::*;

pub mod ast;

pub mod parse_error;
pub use parse_error::*;

pub mod word_comparer;
pub use word_comparer::*;

pub mod statement_comparers;
pub use statement_comparers::*;

pub mod text_collector;
pub use text_collector::*;

pub mod resolve;
pub use resolve::*;
