//! fixloop rule library
//!
//! Concrete analysis rules for the fixloop verification harness.

pub mod line_length;

pub use line_length::{
    LineLengthRule, DEFAULT_LINE_LENGTH_LIMIT, LINE_LENGTH_LIMIT_OPTION, RULE_ID,
};
