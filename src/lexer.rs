use crate::line::Line;
use std::io::{self, BufRead};

pub struct LexerContext {
    lines: Vec<Line>,
}

impl LexerContext {
    pub fn lex(source: &str) -> LexerContext {
        let lines = source
            .lines()
            .enumerate()
            .map(|(index, text)| Line::new(index + 1, text))
            .collect();

        LexerContext { lines }
    }

    pub fn lines(self: &LexerContext) -> &[Line] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<Line> {
        self.lines
    }
}

/// Streams numbered lines out of a reader, in source order.
pub fn read_lines<R>(reader: R) -> impl Iterator<Item = io::Result<Line>>
where
    R: BufRead,
{
    reader
        .lines()
        .enumerate()
        .map(|(index, text)| text.map(|text| Line::new(index + 1, text)))
}
