//! A small CSS selector matcher.
//!
//! Supports what the site's behaviors use: type, `*`, `#id`, `.class`,
//! `[attr]`, `[attr="value"]` and `[attr^="prefix"]` compounds, joined by
//! the descendant combinator and grouped with commas.

/// Errors produced while parsing a selector.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectorError {
    #[error("empty selector")]
    Empty,
    #[error("unexpected {found:?} at {position} in selector {selector:?}")]
    Unexpected {
        selector: String,
        position: usize,
        found: char,
    },
    #[error("unterminated attribute condition in selector {0:?}")]
    Unterminated(String),
}

/// Read access to an element tree, enough to evaluate a selector.
pub(crate) trait ElementTree {
    type Id: Copy;

    fn tag(&self, id: Self::Id) -> &str;
    fn attribute(&self, id: Self::Id, name: &str) -> Option<&str>;
    fn parent(&self, id: Self::Id) -> Option<Self::Id>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum AttributeCondition {
    Exists(String),
    Equals(String, String),
    Prefix(String, String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attributes: Vec<AttributeCondition>,
}

impl Compound {
    fn is_empty(&self) -> bool {
        self.tag.is_none()
            && self.id.is_none()
            && self.classes.is_empty()
            && self.attributes.is_empty()
    }

    fn matches<T: ElementTree>(&self, tree: &T, id: T::Id) -> bool {
        if let Some(tag) = &self.tag
            && tag != "*"
            && !tree.tag(id).eq_ignore_ascii_case(tag)
        {
            return false;
        }
        if let Some(expected) = &self.id
            && tree.attribute(id, "id") != Some(expected.as_str())
        {
            return false;
        }
        let class_list = tree.attribute(id, "class").unwrap_or_default();
        if !self
            .classes
            .iter()
            .all(|wanted| class_list.split_whitespace().any(|class| class == wanted))
        {
            return false;
        }
        self.attributes.iter().all(|condition| match condition {
            AttributeCondition::Exists(name) => tree.attribute(id, name).is_some(),
            AttributeCondition::Equals(name, value) => tree.attribute(id, name) == Some(value.as_str()),
            AttributeCondition::Prefix(name, prefix) => tree
                .attribute(id, name)
                .is_some_and(|actual| actual.starts_with(prefix.as_str())),
        })
    }
}

/// A descendant chain; the last compound is the subject.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Complex(Vec<Compound>);

impl Complex {
    fn matches<T: ElementTree>(&self, tree: &T, id: T::Id) -> bool {
        let Some((subject, ancestors)) = self.0.split_last() else {
            return false;
        };
        if !subject.matches(tree, id) {
            return false;
        }

        // descendant-only chains can be matched greedily against the
        // nearest qualifying ancestor
        let mut cursor = tree.parent(id);
        for compound in ancestors.iter().rev() {
            loop {
                match cursor {
                    Some(ancestor) if compound.matches(tree, ancestor) => {
                        cursor = tree.parent(ancestor);
                        break;
                    }
                    Some(ancestor) => cursor = tree.parent(ancestor),
                    None => return false,
                }
            }
        }
        true
    }
}

/// A parsed, comma-separated selector list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorList(Vec<Complex>);

impl SelectorList {
    /// Parses `selector`.
    pub fn parse(selector: &str) -> Result<Self, SelectorError> {
        Parser::new(selector).parse_list()
    }

    pub(crate) fn matches<T: ElementTree>(&self, tree: &T, id: T::Id) -> bool {
        self.0.iter().any(|complex| complex.matches(tree, id))
    }
}

struct Parser<'a> {
    source: &'a str,
    chars: Vec<char>,
    position: usize,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.chars().collect(),
            position: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.position).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let current = self.peek();
        self.position += 1;
        current
    }

    fn skip_whitespace(&mut self) -> bool {
        let start = self.position;
        while self.peek().is_some_and(char::is_whitespace) {
            self.position += 1;
        }
        self.position > start
    }

    fn unexpected(&self) -> SelectorError {
        match self.peek() {
            Some(found) => SelectorError::Unexpected {
                selector: self.source.to_owned(),
                position: self.position,
                found,
            },
            None => SelectorError::Unterminated(self.source.to_owned()),
        }
    }

    fn parse_list(mut self) -> Result<SelectorList, SelectorError> {
        let mut list = Vec::new();
        loop {
            self.skip_whitespace();
            if self.peek().is_none() {
                break;
            }
            list.push(self.parse_complex()?);
            self.skip_whitespace();
            match self.peek() {
                Some(',') => {
                    self.bump();
                }
                None => break,
                Some(_) => return Err(self.unexpected()),
            }
        }

        if list.is_empty() {
            Err(SelectorError::Empty)
        } else {
            Ok(SelectorList(list))
        }
    }

    fn parse_complex(&mut self) -> Result<Complex, SelectorError> {
        let mut compounds = vec![self.parse_compound()?];
        loop {
            let had_space = self.skip_whitespace();
            match self.peek() {
                None | Some(',') => break,
                Some(_) if had_space => compounds.push(self.parse_compound()?),
                Some(_) => return Err(self.unexpected()),
            }
        }
        Ok(Complex(compounds))
    }

    fn parse_compound(&mut self) -> Result<Compound, SelectorError> {
        let mut compound = Compound::default();
        if self.peek() == Some('*') {
            self.bump();
            compound.tag = Some("*".to_owned());
        } else if self.peek().is_some_and(is_ident_char) {
            compound.tag = Some(self.parse_ident()?.to_ascii_lowercase());
        }

        loop {
            match self.peek() {
                Some('#') => {
                    self.bump();
                    compound.id = Some(self.parse_ident()?);
                }
                Some('.') => {
                    self.bump();
                    compound.classes.push(self.parse_ident()?);
                }
                Some('[') => {
                    self.bump();
                    compound.attributes.push(self.parse_attribute()?);
                }
                _ => break,
            }
        }

        if compound.is_empty() {
            Err(self.unexpected())
        } else {
            Ok(compound)
        }
    }

    fn parse_ident(&mut self) -> Result<String, SelectorError> {
        let start = self.position;
        while self.peek().is_some_and(is_ident_char) {
            self.position += 1;
        }
        if self.position == start {
            return Err(self.unexpected());
        }
        Ok(self.chars[start..self.position].iter().collect())
    }

    fn parse_attribute(&mut self) -> Result<AttributeCondition, SelectorError> {
        self.skip_whitespace();
        let name = self.parse_ident()?;
        self.skip_whitespace();
        let prefix = match self.peek() {
            Some(']') => {
                self.bump();
                return Ok(AttributeCondition::Exists(name));
            }
            Some('=') => false,
            Some('^') => {
                self.bump();
                true
            }
            _ => return Err(self.unexpected()),
        };
        if self.peek() != Some('=') {
            return Err(self.unexpected());
        }
        self.bump();

        let value = self.parse_value()?;
        self.skip_whitespace();
        if self.peek() != Some(']') {
            return Err(self.unexpected());
        }
        self.bump();

        Ok(if prefix {
            AttributeCondition::Prefix(name, value)
        } else {
            AttributeCondition::Equals(name, value)
        })
    }

    fn parse_value(&mut self) -> Result<String, SelectorError> {
        self.skip_whitespace();
        match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                self.bump();
                let start = self.position;
                loop {
                    match self.bump() {
                        Some(c) if c == quote => break,
                        Some(_) => {}
                        None => return Err(SelectorError::Unterminated(self.source.to_owned())),
                    }
                }
                Ok(self.chars[start..self.position - 1].iter().collect())
            }
            _ => self.parse_ident(),
        }
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}
