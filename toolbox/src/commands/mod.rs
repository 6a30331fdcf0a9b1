pub mod offset;
pub mod timeshift;
