//! Result-encoding conversion from the engine's fixed legacy code page.

mod converter;

pub use converter::{EncodingConverter, SOURCE_ENCODING};
