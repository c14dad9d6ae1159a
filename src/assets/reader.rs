//! Line handling shared by the `.obj` and `.mtl` parsers.

use std::{
    fs,
    io::{self, BufRead},
    path::Path,
};

use super::error::{Error, Line, ParseErrorKind, Result};

// The output is wrapped in a Result to allow matching on errors
// Returns an Iterator to the Reader of the lines of the file.
fn read_lines(path: &Path) -> Result<io::Lines<io::BufReader<fs::File>>> {
    let file = fs::File::open(path).map_err(|err| Error::io(path, err))?;
    Ok(io::BufReader::new(file).lines())
}

/// Calls `f` for every line that is neither blank nor a comment, with the
/// directive split off from the rest of the line.
pub(crate) fn for_each_directive<F>(path: &Path, mut f: F) -> Result<()>
where
    F: FnMut(&Line<'_>, &str, &str) -> Result<()>,
{
    for (idx, line) in read_lines(path)?.enumerate() {
        let number = idx + 1;
        let content = line.map_err(|err| {
            Line {
                path,
                number,
                content: "",
            }
            .error(ParseErrorKind::Read(err))
        })?;

        let trimmed = content.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let (token, value) = trimmed
            .split_once(char::is_whitespace)
            .unwrap_or((trimmed, ""));

        let line = Line {
            path,
            number,
            content: &content,
        };
        f(&line, token, value.trim())?;
    }

    Ok(())
}

/// Parses exactly `N` whitespace separated floats.
pub(crate) fn parse_floats<const N: usize>(
    directive: &'static str,
    value: &str,
) -> std::result::Result<[f32; N], ParseErrorKind> {
    let fields: Vec<&str> = value.split_whitespace().collect();
    if fields.len() != N {
        return Err(ParseErrorKind::FieldCount {
            directive,
            expected: N,
            found: fields.len(),
        });
    }

    let mut numbers = [0.0; N];
    for (number, field) in numbers.iter_mut().zip(fields) {
        *number = field.parse()?;
    }
    Ok(numbers)
}

/// Returns `value`, or an error if the directive came without an argument.
pub(crate) fn required<'a>(
    directive: &'static str,
    value: &'a str,
) -> std::result::Result<&'a str, ParseErrorKind> {
    if value.is_empty() {
        Err(ParseErrorKind::MissingArgument(directive))
    } else {
        Ok(value)
    }
}
