//! Recursive-descent parser over the lexer's one-token lookahead.
//!
//! Grammar per CSS 2.1 (<https://www.w3.org/TR/CSS21/grammar.html>),
//! restricted to the subset a reflowable-document cascade consumes.
//! Combinator chains are built right associative; unknown at-rules are
//! skipped wholesale; the first syntax error aborts the whole parse.

use tracing::{debug, trace};

use crate::parser::css_ast::{
    Combinator, Condition, Property, Rule, Selector, Stylesheet, Value,
};
use crate::parser::css_error::{CssError, SyntaxError};
use crate::parser::css_lexer::{Lexer, TokenKind};

pub struct Parser<'a> {
    lexer: Lexer<'a>,
    lookahead: TokenKind,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str, file: &'a str) -> Result<Self, CssError> {
        let mut lexer = Lexer::new(source, file);
        let lookahead = lexer.next_token()?;
        return Ok(Parser { lexer, lookahead });
    }

    // =================
    // TOKEN STREAM (one-token lookahead over the lexer)
    // =================

    fn next(&mut self) -> Result<(), CssError> {
        self.lookahead = self.lexer.next_token()?;
        return Ok(());
    }

    fn accept(&mut self, t: TokenKind) -> Result<bool, CssError> {
        if self.lookahead == t {
            self.next()?;
            return Ok(true);
        }
        return Ok(false);
    }

    fn expect(&mut self, t: TokenKind) -> Result<(), CssError> {
        if self.accept(t)? {
            return Ok(());
        }
        return Err(self.error(SyntaxError::UnexpectedToken));
    }

    /// Owned text of the lookahead token.
    fn text(&self) -> String {
        return self.lexer.text().into_owned();
    }

    fn error(&self, kind: SyntaxError) -> CssError {
        return self.lexer.error(kind);
    }

    // =================
    // VALUES & DECLARATIONS
    // =================

    fn parse_value(&mut self) -> Result<Value, CssError> {
        if self.lookahead == TokenKind::Keyword {
            let name = self.text();
            self.next()?;

            // functional notation: a keyword followed by '('
            if self.accept(TokenKind::Delim(b'('))? {
                let args = self.parse_value_list()?;
                self.expect(TokenKind::Delim(b')'))?;
                return Ok(Value::Function { name, args });
            }

            return Ok(Value::Keyword(name));
        }

        match self.lookahead {
            TokenKind::Number => {
                let data = self.text();
                self.next()?;
                return Ok(Value::Number(data));
            }
            TokenKind::Length => {
                let data = self.text();
                self.next()?;
                return Ok(Value::Length(data));
            }
            TokenKind::Percent => {
                let data = self.text();
                self.next()?;
                return Ok(Value::Percent(data));
            }
            TokenKind::String => {
                let data = self.text();
                self.next()?;
                return Ok(Value::String(data));
            }
            TokenKind::Color => {
                let data = self.text();
                self.next()?;
                return Ok(Value::Color(data));
            }
            TokenKind::Uri => {
                self.next()?;
                return Ok(Value::Uri);
            }
            _ => {}
        }

        if self.accept(TokenKind::Delim(b','))? {
            return Ok(Value::Comma);
        }
        if self.accept(TokenKind::Delim(b'/'))? {
            return Ok(Value::Slash);
        }

        return Err(self.error(SyntaxError::ValueExpected));
    }

    fn at_value_list_end(&self) -> bool {
        return matches!(
            self.lookahead,
            TokenKind::Delim(b'}')
                | TokenKind::Delim(b';')
                | TokenKind::Delim(b'!')
                | TokenKind::Delim(b')')
                | TokenKind::Eof
        );
    }

    fn parse_value_list(&mut self) -> Result<Vec<Value>, CssError> {
        let mut values = Vec::new();
        while !self.at_value_list_end() {
            values.push(self.parse_value()?);
        }
        return Ok(values);
    }

    fn parse_declaration(&mut self) -> Result<Property, CssError> {
        if self.lookahead != TokenKind::Keyword {
            return Err(self.error(SyntaxError::PropertyKeywordExpected));
        }
        let name = self.text();
        self.next()?;

        self.expect(TokenKind::Delim(b':'))?;

        let value = self.parse_value_list()?;

        // !important is accepted and discarded; the cascade never sees it
        if self.accept(TokenKind::Delim(b'!'))? {
            self.expect(TokenKind::Keyword)?;
        }

        return Ok(Property {
            name,
            value,
            specificity: 0,
        });
    }

    pub(crate) fn parse_declaration_list(&mut self) -> Result<Vec<Property>, CssError> {
        let mut declarations = Vec::new();

        if matches!(self.lookahead, TokenKind::Delim(b'}') | TokenKind::Eof) {
            return Ok(declarations);
        }

        declarations.push(self.parse_declaration()?);

        while self.accept(TokenKind::Delim(b';'))? {
            if !matches!(
                self.lookahead,
                TokenKind::Delim(b'}') | TokenKind::Delim(b';') | TokenKind::Eof
            ) {
                declarations.push(self.parse_declaration()?);
            }
        }

        return Ok(declarations);
    }

    // =================
    // SELECTORS
    // =================

    fn parse_attrib_value(&mut self) -> Result<String, CssError> {
        if self.lookahead == TokenKind::Keyword || self.lookahead == TokenKind::String {
            let value = self.text();
            self.next()?;
            return Ok(value);
        }
        return Err(self.error(SyntaxError::AttributeValueExpected));
    }

    fn at_condition(&self) -> bool {
        return matches!(
            self.lookahead,
            TokenKind::Delim(b':')
                | TokenKind::Delim(b'.')
                | TokenKind::Delim(b'#')
                | TokenKind::Delim(b'[')
        );
    }

    fn parse_condition(&mut self) -> Result<Condition, CssError> {
        if self.accept(TokenKind::Delim(b':'))? {
            if self.lookahead != TokenKind::Keyword {
                return Err(self.error(SyntaxError::PseudoKeywordExpected));
            }
            let name = self.text();
            self.next()?;
            return Ok(Condition::Pseudo(name));
        }

        if self.accept(TokenKind::Delim(b'.'))? {
            if self.lookahead != TokenKind::Keyword {
                return Err(self.error(SyntaxError::ClassKeywordExpected));
            }
            let name = self.text();
            self.next()?;
            return Ok(Condition::Class(name));
        }

        if self.accept(TokenKind::Delim(b'#'))? {
            if self.lookahead != TokenKind::Keyword {
                return Err(self.error(SyntaxError::IdKeywordExpected));
            }
            let name = self.text();
            self.next()?;
            return Ok(Condition::Id(name));
        }

        if self.accept(TokenKind::Delim(b'['))? {
            if self.lookahead != TokenKind::Keyword {
                return Err(self.error(SyntaxError::AttributeKeywordExpected));
            }
            let name = self.text();
            self.next()?;

            let cond;
            if self.accept(TokenKind::Delim(b'='))? {
                cond = Condition::AttributeEq {
                    name,
                    value: self.parse_attrib_value()?,
                };
            } else if self.accept(TokenKind::Delim(b'|'))? {
                self.expect(TokenKind::Delim(b'='))?;
                cond = Condition::AttributeDashMatch {
                    name,
                    value: self.parse_attrib_value()?,
                };
            } else if self.accept(TokenKind::Delim(b'~'))? {
                self.expect(TokenKind::Delim(b'='))?;
                cond = Condition::AttributeIncludes {
                    name,
                    value: self.parse_attrib_value()?,
                };
            } else {
                cond = Condition::HasAttribute(name);
            }

            self.expect(TokenKind::Delim(b']'))?;
            return Ok(cond);
        }

        return Err(self.error(SyntaxError::ConditionExpected));
    }

    fn parse_condition_list(&mut self) -> Result<Vec<Condition>, CssError> {
        let mut conditions = vec![self.parse_condition()?];
        while self.at_condition() {
            conditions.push(self.parse_condition()?);
        }
        return Ok(conditions);
    }

    fn parse_simple_selector(&mut self) -> Result<Selector, CssError> {
        if self.accept(TokenKind::Delim(b'*'))? {
            let conditions = if self.at_condition() {
                self.parse_condition_list()?
            } else {
                Vec::new()
            };
            return Ok(Selector::Simple {
                name: None,
                conditions,
            });
        }

        if self.lookahead == TokenKind::Keyword {
            let name = self.text();
            self.next()?;
            let conditions = if self.at_condition() {
                self.parse_condition_list()?
            } else {
                Vec::new()
            };
            return Ok(Selector::Simple {
                name: Some(name),
                conditions,
            });
        }

        if self.at_condition() {
            let conditions = self.parse_condition_list()?;
            return Ok(Selector::Simple {
                name: None,
                conditions,
            });
        }

        return Err(self.error(SyntaxError::SelectorExpected));
    }

    fn parse_adjacent_selector(&mut self) -> Result<Selector, CssError> {
        let a = self.parse_simple_selector()?;
        if self.accept(TokenKind::Delim(b'+'))? {
            let b = self.parse_adjacent_selector()?;
            return Ok(Selector::combined(Combinator::Adjacent, a, b));
        }
        return Ok(a);
    }

    fn parse_child_selector(&mut self) -> Result<Selector, CssError> {
        let a = self.parse_adjacent_selector()?;
        if self.accept(TokenKind::Delim(b'>'))? {
            let b = self.parse_child_selector()?;
            return Ok(Selector::combined(Combinator::Child, a, b));
        }
        return Ok(a);
    }

    fn parse_descendant_selector(&mut self) -> Result<Selector, CssError> {
        let a = self.parse_child_selector()?;
        // no token carries the descendant combinator; anything that is not
        // the end of this selector starts the right operand
        if !matches!(
            self.lookahead,
            TokenKind::Delim(b',') | TokenKind::Delim(b'{') | TokenKind::Eof
        ) {
            let b = self.parse_descendant_selector()?;
            return Ok(Selector::combined(Combinator::Descendant, a, b));
        }
        return Ok(a);
    }

    fn parse_selector_list(&mut self) -> Result<Vec<Selector>, CssError> {
        let mut selectors = vec![self.parse_descendant_selector()?];
        while self.accept(TokenKind::Delim(b','))? {
            selectors.push(self.parse_descendant_selector()?);
        }
        return Ok(selectors);
    }

    // =================
    // RULES & STYLESHEET
    // =================

    fn parse_rule(&mut self) -> Result<Rule, CssError> {
        let selectors = self.parse_selector_list()?;
        self.expect(TokenKind::Delim(b'{'))?;
        let declarations = self.parse_declaration_list()?;
        self.expect(TokenKind::Delim(b'}'))?;
        return Ok(Rule {
            selectors,
            declarations,
        });
    }

    /// Skip an at-rule: everything up to a top-level `;`, or a balanced
    /// `{`...`}` block. End of input ends the skip silently.
    fn parse_at_rule(&mut self) -> Result<(), CssError> {
        if self.lookahead != TokenKind::Keyword {
            return Err(self.error(SyntaxError::UnexpectedToken));
        }
        let name = self.text();
        self.next()?;
        debug!(at_rule = %name, "skipping at-rule");

        while self.lookahead != TokenKind::Eof {
            if self.accept(TokenKind::Delim(b';'))? {
                return Ok(());
            }
            if self.accept(TokenKind::Delim(b'{'))? {
                let mut depth = 1usize;
                while self.lookahead != TokenKind::Eof && depth > 0 {
                    if self.accept(TokenKind::Delim(b'{'))? {
                        depth += 1;
                    } else if self.accept(TokenKind::Delim(b'}'))? {
                        depth -= 1;
                    } else {
                        self.next()?;
                    }
                }
                return Ok(());
            }
            self.next()?;
        }
        return Ok(());
    }

    pub(crate) fn parse_stylesheet(&mut self) -> Result<Vec<Rule>, CssError> {
        let mut rules = Vec::new();
        while self.lookahead != TokenKind::Eof {
            if self.accept(TokenKind::Delim(b'@'))? {
                self.parse_at_rule()?;
            } else {
                rules.push(self.parse_rule()?);
            }
        }
        return Ok(rules);
    }
}

// =================
// ENTRY POINTS
// =================

/// Parse a stylesheet and append its rules to `sheet` in document order.
///
/// `file` is used for diagnostics only. On error `sheet` is left exactly
/// as it was and the partial tree is dropped.
#[tracing::instrument(skip_all, fields(file = file, bytes = source.len()))]
pub fn parse_css(sheet: &mut Stylesheet, source: &str, file: &str) -> Result<(), CssError> {
    let mut parser = Parser::new(source, file)?;
    let rules = parser.parse_stylesheet()?;
    trace!(rules = rules.len(), "parsed stylesheet");
    sheet.rules.extend(rules);
    return Ok(());
}

/// Parse a bare declaration list, as found in an inline `style`
/// attribute. Diagnostics carry the file name `<inline>`.
#[tracing::instrument(skip_all, fields(bytes = source.len()))]
pub fn parse_css_properties(source: &str) -> Result<Vec<Property>, CssError> {
    let mut parser = Parser::new(source, "<inline>")?;
    return parser.parse_declaration_list();
}
