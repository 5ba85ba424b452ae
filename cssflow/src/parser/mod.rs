pub mod css_ast;
pub mod css_error;
pub mod css_lexer;
pub mod css_parser;


pub use css_parser::{parse_css, parse_css_properties};
