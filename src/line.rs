/// One line of an assembly listing together with its 1-based position.
///
/// The first token is computed once when the line is created, so matching
/// against many instructions never re-tokenizes the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    number: usize,
    text: String,
    first_token: String,
}

impl Line {
    pub fn new<T>(number: usize, text: T) -> Line
    where
        T: Into<String>,
    {
        let text = text.into();
        let first_token = first_token(&text).to_owned();

        Line {
            number,
            text,
            first_token,
        }
    }

    pub fn number(&self) -> usize {
        self.number
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// The first run of non-whitespace characters, or `""` for a blank line.
    pub fn first_token(&self) -> &str {
        &self.first_token
    }
}

fn first_token(text: &str) -> &str {
    text.split_whitespace().next().unwrap_or("")
}
