use winnow::combinator::{opt, preceded, separated};
use winnow::error::ModalResult;
use winnow::prelude::*;
use winnow::token::take_while;

/// A flag token as written: keyword plus the optional `=payload`, with the
/// payload already split on its first `:` into key/value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RawFlag {
    pub(crate) keyword: String,
    pub(crate) key: Option<String>,
    pub(crate) value: Option<String>,
}

fn ws(input: &mut &str) -> ModalResult<()> {
    let _: &str = take_while(0.., |c: char| c.is_ascii_whitespace()).parse_next(input)?;
    Ok(())
}

fn keyword<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_while(1.., |c: char| c.is_ascii_alphanumeric()).parse_next(input)
}

fn payload<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_while(0.., |c: char| c != ',').parse_next(input)
}

fn flag(input: &mut &str) -> ModalResult<RawFlag> {
    ws.parse_next(input)?;
    let name = keyword.parse_next(input)?;
    let raw_payload = opt(preceded('=', payload)).parse_next(input)?;
    ws.parse_next(input)?;

    let (key, value) = match raw_payload {
        Some(raw) => {
            let raw = raw.trim();
            match raw.split_once(':') {
                Some((key, value)) => (Some(key.to_owned()), Some(value.to_owned())),
                None => (None, Some(raw.to_owned())),
            }
        }
        None => (None, None),
    };

    Ok(RawFlag {
        keyword: name.to_owned(),
        key,
        value,
    })
}

/// The comma-separated token list between the flag brackets.
pub(crate) fn flag_list(input: &mut &str) -> ModalResult<Vec<RawFlag>> {
    separated(1.., flag, ',').parse_next(input)
}
