use crate::{error::InvalidInstruction, line::Line, policy::MatchPolicy};

/// A named token to look for, and the lines credited to it so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    name: String,
    description: String,
    folded_name: String,
    matched_lines: Vec<Line>,
}

impl Instruction {
    /// Fails if `name` is empty or contains whitespace: an empty name would
    /// match every blank line and a name with a space could never equal a
    /// token.
    pub fn new<N, D>(name: N, description: D) -> Result<Instruction, InvalidInstruction>
    where
        N: Into<String>,
        D: Into<String>,
    {
        let name = name.into();

        if name.trim().is_empty() {
            return Err(InvalidInstruction::EmptyName);
        }
        if name.chars().any(char::is_whitespace) {
            return Err(InvalidInstruction::WhitespaceInName(name));
        }

        Ok(Instruction {
            folded_name: name.to_ascii_lowercase(),
            name,
            description: description.into(),
            matched_lines: Vec::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn matched_lines(&self) -> &[Line] {
        &self.matched_lines
    }

    pub fn is_match(&self, line: &Line, policy: MatchPolicy) -> bool {
        policy.matches(&self.folded_name, line)
    }

    /// Records `line` if it matches. Lines that don't match leave the
    /// instruction untouched.
    pub fn match_line(&mut self, line: &Line, policy: MatchPolicy) -> bool {
        if self.is_match(line, policy) {
            self.matched_lines.push(line.clone());
            return true;
        }

        false
    }

    pub fn clear_matches(&mut self) {
        self.matched_lines.clear();
    }
}
