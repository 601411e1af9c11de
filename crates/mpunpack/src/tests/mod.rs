mod arbitrary;
mod parse_good;
pub(crate) mod utils;
