#![allow(clippy::needless_return)]

pub mod logging;
pub mod parser;
mod printing;

pub use parser::css_ast::{Combinator, Condition, Property, Rule, Selector, Stylesheet, Value};
pub use parser::css_error::{CssError, SyntaxError};
pub use parser::{parse_css, parse_css_properties};
