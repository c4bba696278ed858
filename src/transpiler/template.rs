//! Literal template parsing.
//!
//! A template is verbatim SQL with two placeholder forms: `?` takes the next
//! argument and `?N` takes the N-th argument (1-based).

use nom::{
    branch::alt,
    bytes::complete::is_not,
    character::complete::{char, digit1},
    combinator::{map, map_res, value},
    multi::many0,
    sequence::preceded,
    IResult,
};

use crate::error::{CompileError, CompileResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Text(&'a str),
    /// `?`
    Next,
    /// `?N`
    Indexed(usize),
}

fn parse_indexed(input: &str) -> IResult<&str, Segment<'_>> {
    map(
        preceded(char('?'), map_res(digit1, str::parse::<usize>)),
        Segment::Indexed,
    )(input)
}

fn parse_next(input: &str) -> IResult<&str, Segment<'_>> {
    value(Segment::Next, char('?'))(input)
}

fn parse_text(input: &str) -> IResult<&str, Segment<'_>> {
    map(is_not("?"), Segment::Text)(input)
}

/// Split a template into segments.
pub fn parse_template(input: &str) -> CompileResult<Vec<Segment<'_>>> {
    match many0(alt((parse_indexed, parse_next, parse_text)))(input) {
        Ok(("", segments)) => Ok(segments),
        Ok((remaining, _)) => Err(CompileError::expression(format!(
            "unexpected trailing template content: '{}'",
            remaining
        ))),
        Err(e) => Err(CompileError::expression(format!(
            "invalid template '{}': {:?}",
            input, e
        ))),
    }
}
