use std::collections::BTreeMap;

use crate::{
    address::{Address, Pointer},
    instruction::Operand,
    Word, CELL_COUNT,
};

use super::{AssemblyErrorKind, Strictness};

const DEFAULT_RADIX: u32 = 8;

/// Digits of a linear address the permissive assembler looks at, counted from the end.
const LINEAR_DIGITS: usize = 4;

pub(super) fn parse_operand(
    token: &str,
    strictness: Strictness,
    labels: &BTreeMap<String, Word>,
) -> Result<Operand, AssemblyErrorKind> {
    if let Some(body) = token.strip_prefix('$') {
        return parse_address(token, body, strictness).map(Operand::Direct);
    }

    if let Some(body) = token.strip_prefix('@') {
        return parse_address(token, body, strictness)
            .map(|addr| Operand::Pointer(Pointer::new(addr)));
    }

    if let Some(name) = token.strip_prefix(':') {
        return labels
            .get(name)
            .map(|&index| Operand::Label {
                name: name.to_string(),
                index,
            })
            .ok_or_else(|| AssemblyErrorKind::UndefinedLabel(name.to_string()));
    }

    parse_literal(token, strictness).map(Operand::Literal)
}

/// Parses everything after the `$` or `@` sigil: an optional radix marker followed by either
/// an `x,y` coordinate pair or a single raster index.
fn parse_address(token: &str, body: &str, strictness: Strictness) -> Result<Address, AssemblyErrorKind> {
    let (radix, body) = match body.as_bytes().first() {
        Some(b'd') => (10, &body[1..]),
        Some(b'o') => (8, &body[1..]),
        _ => (DEFAULT_RADIX, body),
    };

    match strictness {
        Strictness::Strict => {
            let malformed = || AssemblyErrorKind::MalformedAddress(token.to_string());
            let out_of_range = || AssemblyErrorKind::AddressOutOfRange(token.to_string());

            match body.split_once(',') {
                Some((x, y)) => {
                    let x = parse_digits(x, radix).ok_or_else(malformed)?;
                    let y = parse_digits(y, radix).ok_or_else(malformed)?;

                    Address::checked(x, y).ok_or_else(out_of_range)
                }
                None => {
                    let index = parse_digits(body, radix).ok_or_else(malformed)?;

                    if index >= CELL_COUNT {
                        return Err(out_of_range());
                    }

                    Ok(Address::from_index(index))
                }
            }
        }

        Strictness::Permissive => Ok(match body.split_once(',') {
            Some((x, y)) => Address::new(
                leading_digits(x, radix) as u8,
                leading_digits(y, radix) as u8,
            ),
            None => {
                let start = body
                    .char_indices()
                    .rev()
                    .nth(LINEAR_DIGITS - 1)
                    .map_or(0, |(i, _)| i);

                Address::from_index(leading_digits(&body[start..], radix))
            }
        }),
    }
}

fn parse_literal(token: &str, strictness: Strictness) -> Result<Word, AssemblyErrorKind> {
    match strictness {
        Strictness::Strict => token
            .parse()
            .map_err(|_| AssemblyErrorKind::MalformedLiteral(token.to_string())),

        Strictness::Permissive => {
            let (negative, digits) = match token.strip_prefix('-') {
                Some(digits) => (true, digits),
                None => (false, token.strip_prefix('+').unwrap_or(token)),
            };

            let value = leading_digits(digits, 10) as Word;
            Ok(if negative { value.wrapping_neg() } else { value })
        }
    }
}

/// Strictly parses a non-empty run of digits, rejecting signs and stray characters.
fn parse_digits(digits: &str, radix: u32) -> Option<usize> {
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }

    usize::from_str_radix(digits, radix).ok()
}

/// Value of the digits at the start of the string, 0 if there are none. Wraps on overflow.
fn leading_digits(digits: &str, radix: u32) -> usize {
    digits
        .chars()
        .map_while(|c| c.to_digit(radix))
        .fold(0usize, |acc, digit| {
            acc.wrapping_mul(radix as usize).wrapping_add(digit as usize)
        })
}
