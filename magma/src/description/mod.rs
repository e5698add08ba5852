//! Natural-language descriptions of a probed location.
//!
//! The [`DescriptionRequester`] asks a text-generation service to describe
//! the units found at a coordinate, then passes the reply through
//! [`normalize`] so the rendered text has a sensible length and always ends
//! on a complete sentence.

mod normalize;
mod requester;

pub use normalize::{
    normalize, DescriptionResult, FILLER_SENTENCE, MAX_DESCRIPTION_CHARS, MIN_DESCRIPTION_CHARS,
};
pub use requester::{DescriptionError, DescriptionRequester};
