//! The `NAME,DESCRIPTION` instruction definition format.
//!
//! The name is everything before the first comma and the description is
//! everything after it; neither is trimmed. Lines without a comma are not
//! definitions and are skipped.

use crate::{
    error::{DefinitionError, InvalidInstruction, Result},
    instruction::Instruction,
};
use std::{fmt::Write, fs, path::Path};

pub const DELIMITER: char = ',';

/// Instructions read from a definition file, in file order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Definitions {
    pub instructions: Vec<Instruction>,
    /// 1-based numbers of the non-blank lines that had no comma.
    pub skipped: Vec<usize>,
}

/// `None` if `line` has no comma.
pub fn parse_definition(
    line: &str,
) -> Option<std::result::Result<Instruction, InvalidInstruction>> {
    let delimiter = line.find(DELIMITER)?;
    let (name, description) = line.split_at(delimiter);

    Some(Instruction::new(name, &description[DELIMITER.len_utf8()..]))
}

pub fn parse_definitions(text: &str) -> std::result::Result<Definitions, DefinitionError> {
    let mut definitions = Definitions::default();

    for (index, line) in text.lines().enumerate() {
        let line_number = index + 1;

        match parse_definition(line) {
            Some(Ok(instruction)) => definitions.instructions.push(instruction),
            Some(Err(e)) => return Err(DefinitionError::new(line_number, e)),
            None if line.trim().is_empty() => {}
            None => {
                tracing::warn!(line_number, line, "skipping definition without a comma");
                definitions.skipped.push(line_number);
            }
        }
    }

    Ok(definitions)
}

pub fn read_definitions<P>(path: P) -> Result<Definitions>
where
    P: AsRef<Path>,
{
    let text = fs::read_to_string(path.as_ref())?;
    let definitions = parse_definitions(&text)?;

    tracing::debug!(
        path = %path.as_ref().display(),
        instructions = definitions.instructions.len(),
        skipped = definitions.skipped.len(),
        "read instruction definitions"
    );

    Ok(definitions)
}

pub fn format_definitions(instructions: &[Instruction]) -> String {
    let mut out = String::new();

    for instruction in instructions {
        // Writing to a String can't fail.
        let _ = writeln!(
            out,
            "{}{}{}",
            instruction.name(),
            DELIMITER,
            instruction.description()
        );
    }

    out
}
