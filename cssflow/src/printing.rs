//! Rendering the rule tree back to CSS text.
//!
//! This is for diagnostics and the CLI, not a source round-trip: comments,
//! whitespace, and url payloads are gone by the time the tree exists.

use std::fmt;

use itertools::Itertools;

use crate::parser::css_ast::{
    Combinator, Condition, Property, Rule, Selector, Stylesheet, Value,
};

fn fmt_value_list(f: &mut fmt::Formatter<'_>, values: &[Value]) -> fmt::Result {
    for (i, value) in values.iter().enumerate() {
        // separators attach to the preceding term, everything else is
        // space separated
        if i > 0 && !matches!(value, Value::Comma) {
            write!(f, " ")?;
        }
        write!(f, "{value}")?;
    }
    return Ok(());
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Keyword(data) | Value::Number(data) | Value::Length(data)
            | Value::Percent(data) => return write!(f, "{data}"),
            Value::String(data) => return write!(f, "'{data}'"),
            Value::Color(data) => return write!(f, "#{data}"),
            Value::Uri => return write!(f, "url()"),
            Value::Comma => return write!(f, ","),
            Value::Slash => return write!(f, "/"),
            Value::Function { name, args } => {
                write!(f, "{name}(")?;
                fmt_value_list(f, args)?;
                return write!(f, ")");
            }
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.name)?;
        return fmt_value_list(f, &self.value);
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Pseudo(name) => return write!(f, ":{name}"),
            Condition::Class(name) => return write!(f, ".{name}"),
            Condition::Id(name) => return write!(f, "#{name}"),
            Condition::HasAttribute(name) => return write!(f, "[{name}]"),
            Condition::AttributeEq { name, value } => return write!(f, "[{name}={value}]"),
            Condition::AttributeDashMatch { name, value } => {
                return write!(f, "[{name}|={value}]");
            }
            Condition::AttributeIncludes { name, value } => {
                return write!(f, "[{name}~={value}]");
            }
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Simple { name, conditions } => {
                match name {
                    Some(name) => write!(f, "{name}")?,
                    None if conditions.is_empty() => write!(f, "*")?,
                    None => {}
                }
                for condition in conditions {
                    write!(f, "{condition}")?;
                }
                return Ok(());
            }
            Selector::Combined {
                combinator,
                left,
                right,
            } => {
                let op = match combinator {
                    Combinator::Descendant => " ",
                    Combinator::Child => " > ",
                    Combinator::Adjacent => " + ",
                };
                return write!(f, "{left}{op}{right}");
            }
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {{", self.selectors.iter().join(", "))?;
        for declaration in &self.declarations {
            write!(f, " {declaration};")?;
        }
        return write!(f, " }}");
    }
}

impl fmt::Display for Stylesheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rule in &self.rules {
            writeln!(f, "{rule}")?;
        }
        return Ok(());
    }
}

#[cfg(test)]
mod test_printing {
    use crate::parser::{parse_css, parse_css_properties};
    use crate::parser::css_ast::Stylesheet;

    fn roundtrip(input: &str) -> String {
        let mut sheet = Stylesheet::new();
        parse_css(&mut sheet, input, "<test>")
            .unwrap_or_else(|err| panic!("unexpected error parsing `{input}`: {err}"));
        return sheet.to_string();
    }

    #[test]
    fn prints_rules() {
        assert_eq!(roundtrip("p { color: red; }"), "p { color: red; }\n");
        assert_eq!(roundtrip("p{}"), "p { }\n");
        assert_eq!(
            roundtrip("h1 ,h2 { margin : 0 }"),
            "h1, h2 { margin: 0; }\n"
        );
    }

    #[test]
    fn prints_selectors() {
        assert_eq!(
            roundtrip("a.x, a.y > b + c:hover { }"),
            "a.x, a.y > b + c:hover { }\n"
        );
        assert_eq!(roundtrip("* { }"), "* { }\n");
        assert_eq!(roundtrip(".note q[lang|=en] { }"), ".note q[lang|=en] { }\n");
        assert_eq!(roundtrip("a[href] { }"), "a[href] { }\n");
        assert_eq!(roundtrip("a[rel~=next] { }"), "a[rel~=next] { }\n");
    }

    #[test]
    fn prints_values() {
        assert_eq!(
            roundtrip("h1 { font: 12pt/1.5 \"Times\", serif ; }"),
            "h1 { font: 12pt / 1.5 'Times', serif; }\n"
        );
        assert_eq!(
            roundtrip("p { color: #abc; background: url(x.png) }"),
            "p { color: #a0b0c0; background: url(); }\n"
        );
        assert_eq!(
            roundtrip("p { width: calc(100% , 2em) }"),
            "p { width: calc(100%, 2em); }\n"
        );
    }

    #[test]
    fn prints_declarations() {
        let declarations = parse_css_properties("margin: 0; padding: 1em 2em").unwrap();
        let printed: Vec<String> = declarations.iter().map(|d| d.to_string()).collect();
        assert_eq!(printed, vec!["margin: 0", "padding: 1em 2em"]);
    }
}
