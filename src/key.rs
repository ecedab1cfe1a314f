//! Private keys.
//!
//! Private keys appear either in the algorithm agnostic PKCS#8 format of
//! RFC 5208 or as a bare PKCS#1 RSA private key as defined in RFC 8017.
//! Only RSA keys are decoded. For all other algorithms, only the algorithm
//! identifier is kept.

use bcder::decode;
use bcder::{Mode, OctetString, Oid};
use bcder::decode::{DecodeError, IntoSource, Source};
use bytes::Bytes;
use crate::oid;
use crate::x509::{take_algorithm, take_unsigned};


//------------ PrivateKey ----------------------------------------------------

/// A decoded private key.
#[derive(Clone, Debug)]
pub enum PrivateKey {
    /// An RSA private key.
    Rsa(RsaPrivateKey),

    /// A key of an algorithm that isn’t supported.
    Unsupported(Oid<Bytes>),
}

impl PrivateKey {
    /// Decodes a PKCS#8 private key.
    ///
    /// ```text
    /// PrivateKeyInfo ::= SEQUENCE {
    ///   version                   Version,
    ///   privateKeyAlgorithm       PrivateKeyAlgorithmIdentifier,
    ///   privateKey                PrivateKey,
    ///   attributes           [0]  IMPLICIT Attributes OPTIONAL }
    ///
    /// PrivateKey ::= OCTET STRING
    /// ```
    pub fn decode_pkcs8<S: IntoSource>(
        source: S,
    ) -> Result<Self, DecodeError<<S::Source as Source>::Error>> {
        Mode::Der.decode(source, |cons| {
            cons.take_sequence(|cons| {
                cons.take_u8()?;
                let algorithm = take_algorithm(cons)?;
                let key = OctetString::take_from(cons)?;
                // attributes and, for OneAsymmetricKey, the public key
                cons.skip_all()?;
                if algorithm != oid::RSA_ENCRYPTION {
                    return Ok(PrivateKey::Unsupported(algorithm))
                }
                RsaPrivateKey::decode(key.into_bytes())
                    .map(PrivateKey::Rsa)
                    .map_err(DecodeError::convert)
            })
        })
    }

    /// Decodes a PKCS#1 RSA private key.
    pub fn decode_pkcs1<S: IntoSource>(
        source: S,
    ) -> Result<Self, DecodeError<<S::Source as Source>::Error>> {
        RsaPrivateKey::decode(source).map(PrivateKey::Rsa)
    }
}


//------------ RsaPrivateKey -------------------------------------------------

/// The modulus of an RSA private key.
///
/// ```text
/// RSAPrivateKey ::= SEQUENCE {
///     version           Version,
///     modulus           INTEGER,  -- n
///     publicExponent    INTEGER,  -- e
///     privateExponent   INTEGER,  -- d
///     prime1            INTEGER,  -- p
///     prime2            INTEGER,  -- q
///     exponent1         INTEGER,  -- d mod (p-1)
///     exponent2         INTEGER,  -- d mod (q-1)
///     coefficient       INTEGER,  -- (inverse of q) mod p
///     otherPrimeInfos   OtherPrimeInfos OPTIONAL
/// }
/// ```
///
/// Everything after the modulus is skipped.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RsaPrivateKey {
    modulus: Bytes,
}

impl RsaPrivateKey {
    pub fn decode<S: IntoSource>(
        source: S,
    ) -> Result<Self, DecodeError<<S::Source as Source>::Error>> {
        Mode::Der.decode(source, Self::take_from)
    }

    pub fn take_from<S: decode::Source>(
        cons: &mut decode::Constructed<S>
    ) -> Result<Self, DecodeError<S::Error>> {
        cons.take_sequence(|cons| {
            cons.take_u8()?;
            let modulus = take_unsigned(cons)?;
            cons.skip_all()?;
            Ok(RsaPrivateKey { modulus })
        })
    }

    /// Returns the octets of the modulus without leading zeros.
    pub fn modulus(&self) -> &Bytes {
        &self.modulus
    }
}


//============ Tests =========================================================
