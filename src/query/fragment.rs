use sea_orm::Value;

/// Generic placeholder token used while clauses are being assembled.
///
/// Every `?` in a fragment's text is paired, in order, with one entry of
/// [`Fragment::args`]. The renumberer rewrites them into `$1`, `$2`, ... once
/// the full statement is known.
pub const PLACEHOLDER: char = '?';

/// A piece of SQL text together with the arguments its placeholders refer to.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Fragment {
    pub text: String,
    pub args: Vec<Value>,
}

impl Fragment {
    /// Create a fragment from raw text and its arguments.
    #[must_use]
    pub fn new(text: impl Into<String>, args: Vec<Value>) -> Self {
        Self {
            text: text.into(),
            args,
        }
    }

    /// Fragment without any placeholders (e.g. `col IS NULL`).
    #[must_use]
    pub fn raw(text: impl Into<String>) -> Self {
        Self::new(text, Vec::new())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Wrap the text in parentheses, keeping the arguments untouched.
    #[must_use]
    pub fn parenthesized(self) -> Self {
        Self {
            text: format!("({})", self.text),
            args: self.args,
        }
    }

    /// Append another fragment separated by a single space.
    pub fn push(&mut self, other: Self) {
        if other.is_empty() {
            return;
        }
        if !self.text.is_empty() {
            self.text.push(' ');
        }
        self.text.push_str(&other.text);
        self.args.extend(other.args);
    }

    /// Append plain text separated by a single space.
    pub fn push_str(&mut self, text: &str) {
        self.push(Self::raw(text));
    }

    /// Join fragments with `separator`, concatenating arguments in the same
    /// order the texts appear. Empty fragments are skipped.
    #[must_use]
    pub fn join(parts: Vec<Self>, separator: &str) -> Self {
        let mut joined = Self::default();
        for part in parts {
            if part.is_empty() {
                continue;
            }
            if !joined.text.is_empty() {
                joined.text.push_str(separator);
            }
            joined.text.push_str(&part.text);
            joined.args.extend(part.args);
        }
        joined
    }
}
