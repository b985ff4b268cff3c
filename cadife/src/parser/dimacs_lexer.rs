use cadife_cnf::{Header, Literal, Variable};
use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{digit1, i64 as signed_number, space0, space1},
    combinator::{eof, map, map_res, rest, value, verify},
    multi::many1,
    sequence::{preceded, terminated},
    IResult, Parser,
};

use DimacsToken::*;

#[derive(Debug, Clone, PartialEq, Eq)]
/// A classification for the different kinds of lines a DIMACS CNF file contains
pub enum DimacsToken {
    /// A comment in the CNF. It starts with a 'c '
    Comment,
    /// A comment of the form 'c INDEX NAME' that names a variable
    VariableName { variable: Variable, name: String },
    /// The head of a CNF file of the format p cnf #VARIABLES #CLAUSES
    Problem(Header),
    /// A sequence of signed numbers. A 0 terminates the current clause,
    /// which may span more than one line.
    Literals(Vec<Literal>),
    /// The '%' marker some benchmark files use to end their content
    End,
}

/// Lexes a single trimmed line of a DIMACS file.
/// Clauses are by far the most frequent lines, so we try them first.
#[inline]
pub fn lex_line(line: &str) -> IResult<&str, DimacsToken> {
    alt((lex_literals, lex_header, lex_variable_name, lex_comment, lex_end)).parse(line)
}

// lexes the head of a CNF file of the format p cnf #VARIABLES #CLAUSES
fn lex_header(line: &str) -> IResult<&str, DimacsToken> {
    map(
        (
            tag("p"),
            space1,
            tag("cnf"),
            preceded(space1, number),
            preceded(space1, number),
            space0,
        ),
        |(_, _, _, num_variables, num_clauses, _)| {
            Problem(Header {
                num_variables,
                num_clauses,
            })
        },
    )
    .parse(line)
}

// lexes a comment naming a variable, e.g. "c 4 Logging"
fn lex_variable_name(line: &str) -> IResult<&str, DimacsToken> {
    map(
        preceded(
            (tag("c"), space1),
            (
                terminated(number, space1),
                verify(rest, |name: &str| !name.trim().is_empty()),
            ),
        ),
        |(variable, name): (Variable, &str)| VariableName {
            variable,
            name: name.trim().to_string(),
        },
    )
    .parse(line)
}

// lexes any other comment, including a bare "c"
fn lex_comment(line: &str) -> IResult<&str, DimacsToken> {
    value(Comment, (tag("c"), alt((space1, eof)), rest)).parse(line)
}

// identifies a sequence of signed numbers, with or without terminating 0
fn lex_literals(line: &str) -> IResult<&str, DimacsToken> {
    map(
        terminated(many1(preceded(space0, signed_number)), space0),
        |numbers: Vec<i64>| {
            Literals(
                numbers
                    .into_iter()
                    .map(|number| number as Literal)
                    .collect(),
            )
        },
    )
    .parse(line)
}

fn lex_end(line: &str) -> IResult<&str, DimacsToken> {
    value(End, (tag("%"), rest)).parse(line)
}

fn number(line: &str) -> IResult<&str, usize> {
    map_res(digit1, str::parse::<usize>).parse(line)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn lex_header_line() {
        assert_eq!(
            lex_line("p cnf 8 12"),
            Ok((
                "",
                Problem(Header {
                    num_variables: 8,
                    num_clauses: 12
                })
            ))
        );
        assert_eq!(
            lex_line("p  cnf 3   1 "),
            Ok((
                "",
                Problem(Header {
                    num_variables: 3,
                    num_clauses: 1
                })
            ))
        );
    }

    #[test]
    fn lex_comments() {
        assert_eq!(
            lex_line("c 4 Logging"),
            Ok((
                "",
                VariableName {
                    variable: 4,
                    name: String::from("Logging")
                }
            ))
        );
        assert_eq!(
            lex_line("c 12 Two Words"),
            Ok((
                "",
                VariableName {
                    variable: 12,
                    name: String::from("Two Words")
                }
            ))
        );
        assert_eq!(lex_line("c generated by hand"), Ok(("", Comment)));
        assert_eq!(lex_line("c"), Ok(("", Comment)));
        assert_eq!(lex_line("c 7"), Ok(("", Comment)));
    }

    #[test]
    fn lex_clauses() {
        assert_eq!(lex_line("1 -2 3 0"), Ok(("", Literals(vec![1, -2, 3, 0]))));
        assert_eq!(lex_line("-5"), Ok(("", Literals(vec![-5]))));
        assert_eq!(lex_line("1 0 -1 0"), Ok(("", Literals(vec![1, 0, -1, 0]))));
        assert_eq!(lex_line("%"), Ok(("", End)));
    }

    #[test]
    fn trailing_garbage_is_left_over() {
        let (remaining, token) = lex_line("1 2 x").unwrap();
        assert_eq!(token, Literals(vec![1, 2]));
        assert_eq!(remaining, "x");
    }
}
