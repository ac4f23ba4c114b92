//! Utility modules

pub mod format;
pub mod text;

pub use format::{
    format_currency, format_date, format_number, format_percent, iso_date, parse_date,
    parse_float_prefix, DEFAULT_DATE_FORMAT,
};
pub use text::{byte_offset, char_len, char_type, indent, is_punctuation, CharType};
