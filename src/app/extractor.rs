//! Request extractors that reject with the JSON envelope instead of axum's plain-text rejections.

mod authorization_header;
mod payload;

pub use payload::{Payload, PathParam, QueryParams};
