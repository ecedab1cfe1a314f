//! Certificate Signing Requests (CSR).
//!
//! Certificate Signing Requests, also called Certification Requests, are
//! defined in RFC 2986. Only the parts needed for rendering are decoded.
//! The attributes are kept in their encoded form.

use bcder::decode;
use bcder::{Captured, Mode, Oid};
use bcder::decode::{DecodeError, IntoSource, Source};
use bytes::Bytes;
use crate::x509::{Name, PublicKey, SignedData};


//------------ Csr -----------------------------------------------------------

/// A certificate signing request.
#[derive(Clone, Debug)]
pub struct Csr {
    /// The outer structure of the CSR.
    signed_data: SignedData,

    /// The content of the CSR.
    content: CsrContent,
}

/// # Data Access
///
impl Csr {
    /// Returns the version as encoded, i.e., zero for version 1.
    pub fn version(&self) -> u8 {
        self.content.version
    }

    /// The subject name included in the CSR.
    pub fn subject(&self) -> &Name {
        &self.content.subject
    }

    /// Returns the public key for the requested certificate.
    pub fn public_key(&self) -> &PublicKey {
        &self.content.public_key
    }

    /// Returns the complete encoded attributes including tag and length.
    pub fn attributes(&self) -> &Captured {
        &self.content.attributes
    }

    pub fn signature_algorithm(&self) -> &Oid<Bytes> {
        self.signed_data.algorithm()
    }

    pub fn signature(&self) -> &Bytes {
        self.signed_data.signature()
    }
}

/// # Decoding
///
impl Csr {
    /// Parses a source as a certificate signing request.
    pub fn decode<S: IntoSource>(
        source: S,
    ) -> Result<Self, DecodeError<<S::Source as Source>::Error>> {
        Mode::Der.decode(source, Self::take_from)
    }

    /// Takes an encoded CSR from the beginning of a constructed value.
    pub fn take_from<S: decode::Source>(
        cons: &mut decode::Constructed<S>
    ) -> Result<Self, DecodeError<S::Error>> {
        cons.take_sequence(Self::from_constructed)
    }

    /// Parses the content of a certificate signing request.
    fn from_constructed<S: decode::Source>(
        cons: &mut decode::Constructed<S>
    ) -> Result<Self, DecodeError<S::Error>> {
        let signed_data = SignedData::from_constructed(cons)?;
        let content = signed_data.data().clone().decode(
            CsrContent::take_from
        ).map_err(DecodeError::convert)?;
        Ok(Self { signed_data, content })
    }
}


//------------ CsrContent ----------------------------------------------------

/// The content of a certificate signing request.
///
/// ```text
/// CertificationRequestInfo ::= SEQUENCE {
///      version       INTEGER { v1(0) } (v1,...),
///      subject       Name,
///      subjectPKInfo SubjectPublicKeyInfo{{ PKInfoAlgorithms }},
///      attributes    [0] Attributes{{ CRIAttributes }}
/// }
/// ```
#[derive(Clone, Debug)]
struct CsrContent {
    version: u8,
    subject: Name,
    public_key: PublicKey,
    attributes: Captured,
}

impl CsrContent {
    fn take_from<S: decode::Source>(
        cons: &mut decode::Constructed<S>
    ) -> Result<Self, DecodeError<S::Error>> {
        cons.take_sequence(|cons| {
            let version = cons.take_u8()?;
            let subject = Name::take_from(cons)?;
            let public_key = PublicKey::take_from(cons)?;
            let attributes = cons.capture_one()?;
            Ok(CsrContent { version, subject, public_key, attributes })
        })
    }
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::{oid, pem};
    use crate::x509::KeyMaterial;

    fn request() -> Csr {
        let block = pem::parse(
            include_bytes!("../test-data/request.csr")
        ).unwrap().remove(0);
        assert_eq!(block.label(), "CERTIFICATE REQUEST");
        Csr::decode(block.into_data()).unwrap()
    }

    #[test]
    fn decode_request() {
        let csr = request();
        assert_eq!(csr.version(), 0);
        assert_eq!(
            csr.subject().values(&oid::AT_COMMON_NAME).collect::<Vec<_>>(),
            ["Testing ABC"]
        );
        assert_eq!(csr.attributes().as_slice(), b"\xa0\x00");
        assert_eq!(
            csr.signature_algorithm(), &oid::SHA256_WITH_RSA_ENCRYPTION
        );
        assert_eq!(csr.signature().len(), 256);
        match *csr.public_key().material() {
            KeyMaterial::Rsa { ref modulus, exponent } => {
                assert_eq!(modulus.len(), 256);
                assert_eq!(exponent, 0x10001);
            }
            _ => panic!("expected RSA key")
        }
    }

    #[test]
    fn missing_attributes() {
        // A request info without the attributes is rejected.
        let data = b"\x30\x05\x02\x01\x00\x30\x00";
        assert!(
            Mode::Der.decode(data.as_ref(), CsrContent::take_from).is_err()
        );
    }
}
