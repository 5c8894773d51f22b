//! Normalization of loosely-typed snapshot rows into [`Skill`](crate::core::Skill)s.

pub mod fields;
pub mod record;
pub mod value;

pub use fields::{
    format_relative_time, lowercase_fold, parse_date_text, parse_flexible_date,
    to_category_label, to_string_list,
};
pub use record::{derive_identifier, normalize_row};
pub use value::{RawRow, RawValue};
