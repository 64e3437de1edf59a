//! HTTP body handling module for decoding request payloads
//!
//! This module collects the declared number of body bytes and decodes them
//! into form fields with the strategy picked at the end of the header block.
//!
//! # Components
//!
//! - [`BodyDecoder`]: Waits for the full body span, then runs the decoder
//!   the [`BodyPlan`] names
//! - `urlencoded`: Decodes `application/x-www-form-urlencoded` content
//! - `multipart`: Decodes `multipart/form-data` content
//!
//! Bodies are collected whole before decoding. Both supported formats are
//! forms, and a form is only meaningful complete.

mod multipart;
mod urlencoded;

use bytes::BytesMut;

use crate::codec::buffer::take_exact;
use crate::protocol::{BodyPlan, FormData, ParseError};

/// Decoder for the request body, driven by the framing decision of the
/// header stage.
#[derive(Debug)]
pub struct BodyDecoder {
    plan: BodyPlan,
}

impl BodyDecoder {
    pub(crate) fn new(plan: BodyPlan) -> Self {
        Self { plan }
    }

    /// Attempts to decode the body from the provided bytes buffer.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(form))` once the declared span is buffered and decoded
    /// - `Ok(None)` if more data is needed
    /// - `Err(ParseError)` if the body content is malformed
    pub(crate) fn decode(&self, src: &mut BytesMut) -> Result<Option<FormData>, ParseError> {
        match &self.plan {
            BodyPlan::Empty => Ok(Some(FormData::new())),
            BodyPlan::Urlencoded { length } => {
                let Some(bytes) = take_exact(src, *length as usize) else {
                    return Ok(None);
                };
                Ok(Some(urlencoded::decode(&bytes)))
            }
            BodyPlan::Multipart { length, boundary } => {
                let Some(bytes) = take_exact(src, *length as usize) else {
                    return Ok(None);
                };
                Ok(Some(multipart::decode(&bytes, boundary)?))
            }
        }
    }
}
