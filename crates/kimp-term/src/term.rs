use std::fmt;

/// A K term as it appears in a decoded configuration.
///
/// The engine only ever hands us three shapes: typed literal tokens,
/// labelled constructor applications, and `~>`-sequences (continuations).
/// Anything the decode helpers do not recognise inside these shapes is
/// treated as "not meaningfully present", never as a hard error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Term {
    /// A typed primitive literal carrying its raw lexical text
    /// (e.g. sort `Int` with text `"42"`, sort `String` with text `"\"hi\""`).
    Token { sort: String, text: String },
    /// A named constructor applied to an ordered sequence of children.
    Apply { label: String, args: Vec<Term> },
    /// An ordered, possibly empty continuation. An empty sequence in the
    /// control cell is what marks a run as completed.
    Sequence(Vec<Term>),
}

impl Term {
    /// Create a token term.
    pub fn token(sort: impl Into<String>, text: impl Into<String>) -> Self {
        Self::Token {
            sort: sort.into(),
            text: text.into(),
        }
    }

    /// Create a constructor application.
    pub fn apply(label: impl Into<String>, args: Vec<Term>) -> Self {
        Self::Apply {
            label: label.into(),
            args,
        }
    }

    /// Create a sequence term.
    pub fn sequence(items: Vec<Term>) -> Self {
        Self::Sequence(items)
    }

    /// The empty continuation (`.K`).
    pub fn empty_sequence() -> Self {
        Self::Sequence(Vec::new())
    }

    /// A `String`-sorted token in its lexical (quote-delimited) form.
    pub fn string_token(value: &str) -> Self {
        Self::token(crate::decode::SORT_STRING, format!("\"{value}\""))
    }

    /// An `Int`-sorted token.
    pub fn int_token(value: i64) -> Self {
        Self::token(crate::decode::SORT_INT, value.to_string())
    }

    /// True iff this term is a sequence with zero elements, the shape of
    /// a fully evaluated control cell.
    pub fn is_empty_sequence(&self) -> bool {
        matches!(self, Self::Sequence(items) if items.is_empty())
    }
}

impl fmt::Display for Term {
    /// Compact structural rendering, for error messages and debugging.
    /// Human-facing output goes through the external pretty-printer instead.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Token { text, .. } => write!(f, "{text}"),
            Self::Apply { label, args } => {
                write!(f, "{label}(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                write!(f, ")")
            }
            Self::Sequence(items) if items.is_empty() => write!(f, ".K"),
            Self::Sequence(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ~> ")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
        }
    }
}
