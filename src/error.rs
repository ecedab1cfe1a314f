//! Error handling for rendering.

use std::{error, fmt};
use std::convert::Infallible;
use bcder::decode::DecodeError;
use crate::der::MalformedEncoding;
use crate::pem::PemError;


//------------ DumpError -----------------------------------------------------

/// Rendering the input has failed.
///
/// The error remembers the label of the PEM block that caused the failure
/// if the failure happened while rendering a block.
#[derive(Debug)]
pub struct DumpError {
    label: Option<String>,
    kind: DumpErrorKind,
}

#[derive(Debug)]
enum DumpErrorKind {
    Decoding(DecodeError<Infallible>),
    Malformed(MalformedEncoding),
    Pem(PemError),
}

impl DumpError {
    /// Attaches the label of the block that was being rendered.
    pub(crate) fn in_block(mut self, label: &str) -> Self {
        if self.label.is_none() {
            self.label = Some(label.into())
        }
        self
    }

    /// Returns the label of the block that failed, if known.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Returns whether the error was caused by broken PEM framing.
    pub fn is_pem(&self) -> bool {
        matches!(self.kind, DumpErrorKind::Pem(_))
    }
}

impl From<DecodeError<Infallible>> for DumpError {
    fn from(err: DecodeError<Infallible>) -> Self {
        DumpError { label: None, kind: DumpErrorKind::Decoding(err) }
    }
}

impl From<MalformedEncoding> for DumpError {
    fn from(err: MalformedEncoding) -> Self {
        DumpError { label: None, kind: DumpErrorKind::Malformed(err) }
    }
}

impl From<PemError> for DumpError {
    fn from(err: PemError) -> Self {
        DumpError { label: None, kind: DumpErrorKind::Pem(err) }
    }
}

impl fmt::Display for DumpError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(ref label) = self.label {
            write!(f, "{}: ", label)?;
        }
        match self.kind {
            DumpErrorKind::Decoding(ref inner) => inner.fmt(f),
            DumpErrorKind::Malformed(ref inner) => inner.fmt(f),
            DumpErrorKind::Pem(ref inner) => inner.fmt(f),
        }
    }
}

impl error::Error for DumpError { }

