//! PEM framing.
//!
//! PEM wraps binary data in Base 64 between a line
//! `-----BEGIN <label>-----` and a line `-----END <label>-----`. Finding
//! these blocks and decoding their content is left to the `pem` crate.
//! Anything outside of blocks is skipped. So is a final BEGIN line that
//! lacks its END line.
//!
//! The blocks are turned into [`Block`]s whose data can be handed to the
//! DER decoders as is.

use bytes::Bytes;

pub use ::pem::PemError;


//------------ parse ---------------------------------------------------------

/// Returns all PEM blocks in `data` in the order they appear.
pub fn parse(data: &[u8]) -> Result<Vec<Block>, PemError> {
    Ok(::pem::parse_many(data)?.into_iter().map(Block::from).collect())
}


//------------ Block ---------------------------------------------------------

/// A single decoded PEM block.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Block {
    label: String,
    data: Bytes,
}

impl Block {
    pub fn new(label: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Block {
            label: label.into(),
            data: data.into(),
        }
    }

    /// Returns the label of the block, i.e., the type of its content.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the decoded content of the block.
    pub fn data(&self) -> &Bytes {
        &self.data
    }

    pub fn into_data(self) -> Bytes {
        self.data
    }
}

impl From<::pem::Pem> for Block {
    fn from(pem: ::pem::Pem) -> Self {
        let label = pem.tag().to_string();
        Block::new(label, pem.into_contents())
    }
}


//============ Tests =========================================================
