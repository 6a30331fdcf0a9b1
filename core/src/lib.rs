pub mod errors;
pub mod parsers;
pub mod subsurface;
pub mod timeshift;

pub use parsers::duration::{format_duration, parse_duration};
pub use subsurface::{decode, encode, encode_indented};
pub use timeshift::{ShiftReport, TimeShift};
