//! Certificates.
//!
//! The [`Cert`] type decodes an X.509 certificate as defined in RFC 5280.
//! In addition to the basic fields, the content of the extensions that are
//! rendered from their decoded form is made available. All extensions are
//! also kept in their raw form in the order they appear.

use std::convert::Infallible;
use std::net::IpAddr;
use bcder::decode;
use bcder::{BitString, Mode, OctetString, Oid, Tag};
use bcder::decode::{DecodeError, IntoSource, Pos, Source};
use bytes::Bytes;
use crate::der::{self, MalformedEncoding, Tlv};
use crate::oid;
use crate::x509::{
    Extension, GeneralName, Name, PublicKey, SignedData, Validity,
    take_algorithm, take_unsigned,
};


//------------ Cert ----------------------------------------------------------

/// A decoded certificate.
///
/// If a certificate is stored in a file, you can use the [`decode`] function
/// to parse the entire file. Since a single PEM block may contain more than
/// one certificate, [`decode_all`] parses all of them.
///
/// [`decode`]: #method.decode
/// [`decode_all`]: #method.decode_all
#[derive(Clone, Debug)]
pub struct Cert {
    /// The outer structure of the certificate.
    signed_data: SignedData,

    /// The actual data of the certificate.
    tbs: TbsCert,
}

/// # Decoding
///
impl Cert {
    /// Decodes a source as a certificate.
    pub fn decode<S: IntoSource>(
        source: S,
    ) -> Result<Self, DecodeError<<S::Source as Source>::Error>> {
        Mode::Der.decode(source, Self::take_from)
    }

    /// Decodes a sequence of concatenated certificates.
    pub fn decode_all(
        data: Bytes
    ) -> Result<Vec<Self>, DecodeError<Infallible>> {
        Mode::Der.decode(data, |cons| {
            let mut res = Vec::new();
            while let Some(cert) = Self::take_opt_from(cons)? {
                res.push(cert)
            }
            Ok(res)
        })
    }

    /// Takes an encoded certificate from the beginning of a value.
    pub fn take_from<S: decode::Source>(
        cons: &mut decode::Constructed<S>
    ) -> Result<Self, DecodeError<S::Error>> {
        cons.take_sequence(Self::from_constructed)
    }

    /// Takes an optional certificate from the beginning of a value.
    pub fn take_opt_from<S: decode::Source>(
        cons: &mut decode::Constructed<S>
    ) -> Result<Option<Self>, DecodeError<S::Error>> {
        cons.take_opt_sequence(Self::from_constructed)
    }

    /// Parses the content of a Certificate sequence.
    pub fn from_constructed<S: decode::Source>(
        cons: &mut decode::Constructed<S>
    ) -> Result<Self, DecodeError<S::Error>> {
        let signed_data = SignedData::from_constructed(cons)?;
        let tbs = signed_data.data().clone().decode(
            TbsCert::from_constructed
        ).map_err(DecodeError::convert)?;
        Ok(Self { signed_data, tbs })
    }
}

/// # Data Access
///
impl Cert {
    /// Returns the signature algorithm of the certificate.
    pub fn signature_algorithm(&self) -> &Oid<Bytes> {
        self.signed_data.algorithm()
    }

    /// Returns the octets of the signature.
    pub fn signature(&self) -> &Bytes {
        self.signed_data.signature()
    }

    pub fn tbs(&self) -> &TbsCert {
        &self.tbs
    }
}

impl std::ops::Deref for Cert {
    type Target = TbsCert;

    fn deref(&self) -> &Self::Target {
        &self.tbs
    }
}


//------------ TbsCert -------------------------------------------------------

/// The data of a certificate.
///
/// ```text
/// TBSCertificate  ::=  SEQUENCE  {
///      version         [0]  EXPLICIT Version DEFAULT v1,
///      serialNumber         CertificateSerialNumber,
///      signature            AlgorithmIdentifier,
///      issuer               Name,
///      validity             Validity,
///      subject              Name,
///      subjectPublicKeyInfo SubjectPublicKeyInfo,
///      issuerUniqueID  [1]  IMPLICIT UniqueIdentifier OPTIONAL,
///      subjectUniqueID [2]  IMPLICIT UniqueIdentifier OPTIONAL,
///      extensions      [3]  EXPLICIT Extensions OPTIONAL }
/// ```
#[derive(Clone, Debug)]
pub struct TbsCert {
    /// The version as encoded, i.e., starting at 0 for version 1.
    version: u8,
    serial_number: Bytes,
    issuer: Name,
    validity: Validity,
    subject: Name,
    subject_public_key_info: PublicKey,
    extensions: Vec<Extension>,

    /// Basic Constraints.
    basic_ca: Option<bool>,

    /// Subject Key Identifier.
    subject_key_id: Option<Bytes>,

    /// Authority Key Identifier.
    authority_key_id: Option<Bytes>,

    /// Key Usage with bit 0 being digitalSignature.
    key_usage: u16,

    /// Extended Key Usage.
    extended_key_usage: Vec<Oid<Bytes>>,

    /// Subject Alternative Name.
    dns_names: Vec<String>,
    email_addresses: Vec<String>,
    ip_addresses: Vec<IpAddr>,
    uris: Vec<String>,

    /// CRL Distribution Points.
    crl_uris: Vec<String>,

    /// Authority Information Access.
    ocsp_uris: Vec<String>,
    ca_issuer_uris: Vec<String>,
}

/// # Data Access
///
impl TbsCert {
    /// Returns the version as encoded.
    ///
    /// The value is zero based, so a version 3 certificate returns 2.
    pub fn version(&self) -> u8 {
        self.version
    }

    /// Returns the octets of the serial number without leading zeros.
    pub fn serial_number(&self) -> &Bytes {
        &self.serial_number
    }

    pub fn issuer(&self) -> &Name {
        &self.issuer
    }

    pub fn validity(&self) -> Validity {
        self.validity
    }

    pub fn subject(&self) -> &Name {
        &self.subject
    }

    pub fn subject_public_key_info(&self) -> &PublicKey {
        &self.subject_public_key_info
    }

    /// Returns all extensions in the order they appear.
    pub fn extensions(&self) -> &[Extension] {
        &self.extensions
    }

    /// Returns whether the Basic Constraints extension has cA set.
    pub fn is_ca(&self) -> bool {
        self.basic_ca.unwrap_or(false)
    }

    pub fn subject_key_identifier(&self) -> Option<&Bytes> {
        self.subject_key_id.as_ref()
    }

    pub fn authority_key_identifier(&self) -> Option<&Bytes> {
        self.authority_key_id.as_ref()
    }

    /// Returns the key usage bits.
    ///
    /// Bit `n` of the value is set if bit `n` of the Key Usage bit string,
    /// counted from the left, is set.
    pub fn key_usage(&self) -> u16 {
        self.key_usage
    }

    pub fn extended_key_usage(&self) -> &[Oid<Bytes>] {
        &self.extended_key_usage
    }

    pub fn dns_names(&self) -> &[String] {
        &self.dns_names
    }

    pub fn email_addresses(&self) -> &[String] {
        &self.email_addresses
    }

    pub fn ip_addresses(&self) -> &[IpAddr] {
        &self.ip_addresses
    }

    pub fn uris(&self) -> &[String] {
        &self.uris
    }

    pub fn crl_uris(&self) -> &[String] {
        &self.crl_uris
    }

    pub fn ocsp_uris(&self) -> &[String] {
        &self.ocsp_uris
    }

    pub fn ca_issuer_uris(&self) -> &[String] {
        &self.ca_issuer_uris
    }
}

/// # Decoding
///
impl TbsCert {
    /// Parses the content of a TBSCertificate sequence.
    pub fn from_constructed<S: decode::Source>(
        cons: &mut decode::Constructed<S>
    ) -> Result<Self, DecodeError<S::Error>> {
        cons.take_sequence(|cons| {
            let version = cons.take_opt_constructed_if(
                Tag::CTX_0, |c| c.take_u8()
            )?.unwrap_or(0);
            let serial_number = take_unsigned(cons)?;
            let _signature = take_algorithm(cons)?;
            let issuer = Name::take_from(cons)?;
            let validity = Validity::take_from(cons)?;
            let subject = Name::take_from(cons)?;
            let subject_public_key_info = PublicKey::take_from(cons)?;

            // issuerUniqueID and subjectUniqueID
            cons.take_opt_value_if(Tag::CTX_1, OctetString::from_content)?;
            cons.take_opt_value_if(Tag::CTX_2, OctetString::from_content)?;

            let mut extensions = Vec::new();
            cons.take_opt_constructed_if(Tag::CTX_3, |c| {
                c.take_sequence(|cons| {
                    while let Some(ext) = Extension::take_opt_from(cons)? {
                        extensions.push(ext)
                    }
                    Ok(())
                })
            })?;

            let mut res = TbsCert {
                version,
                serial_number,
                issuer,
                validity,
                subject,
                subject_public_key_info,
                extensions: Vec::new(),
                basic_ca: None,
                subject_key_id: None,
                authority_key_id: None,
                key_usage: 0,
                extended_key_usage: Vec::new(),
                dns_names: Vec::new(),
                email_addresses: Vec::new(),
                ip_addresses: Vec::new(),
                uris: Vec::new(),
                crl_uris: Vec::new(),
                ocsp_uris: Vec::new(),
                ca_issuer_uris: Vec::new(),
            };
            for ext in &extensions {
                res.take_extension(ext).map_err(DecodeError::convert)?;
            }
            res.extensions = extensions;
            Ok(res)
        })
    }

    /// Decodes the content of an extension this type understands.
    ///
    /// All other extensions are ignored here. They are still available in
    /// raw form.
    fn take_extension(
        &mut self, ext: &Extension
    ) -> Result<(), DecodeError<Infallible>> {
        let id = ext.id();
        let value = ext.value().clone();
        if id == &oid::CE_BASIC_CONSTRAINTS {
            Mode::Der.decode(value, |cons| {
                Self::take_basic_constraints(cons, &mut self.basic_ca)
            })
        }
        else if id == &oid::CE_SUBJECT_KEY_IDENTIFIER {
            Mode::Der.decode(value, |cons| {
                Self::take_subject_key_identifier(
                    cons, &mut self.subject_key_id
                )
            })
        }
        else if id == &oid::CE_AUTHORITY_KEY_IDENTIFIER {
            Mode::Der.decode(value, |cons| {
                Self::take_authority_key_identifier(
                    cons, &mut self.authority_key_id
                )
            })
        }
        else if id == &oid::CE_KEY_USAGE {
            Mode::Der.decode(value, |cons| {
                Self::take_key_usage(cons, &mut self.key_usage)
            })
        }
        else if id == &oid::CE_EXTENDED_KEY_USAGE {
            Mode::Der.decode(value, |cons| {
                Self::take_extended_key_usage(
                    cons, &mut self.extended_key_usage
                )
            })
        }
        else if id == &oid::CE_SUBJECT_ALT_NAME {
            decode_raw(&value, |value| self.take_subject_alt_name(value))
        }
        else if id == &oid::CE_CRL_DISTRIBUTION_POINTS {
            decode_raw(&value, |value| {
                self.take_crl_distribution_points(value)
            })
        }
        else if id == &oid::PE_AUTHORITY_INFO_ACCESS {
            decode_raw(&value, |value| {
                self.take_authority_info_access(value)
            })
        }
        else {
            Ok(())
        }
    }

    /// Parses the Basic Constraints extension.
    ///
    /// ```text
    /// BasicConstraints        ::= SEQUENCE {
    ///     cA                      BOOLEAN DEFAULT FALSE,
    ///     pathLenConstraint       INTEGER (0..MAX) OPTIONAL
    /// }
    /// ```
    fn take_basic_constraints<S: decode::Source>(
        cons: &mut decode::Constructed<S>,
        basic_ca: &mut Option<bool>,
    ) -> Result<(), DecodeError<S::Error>> {
        if basic_ca.is_some() {
            return Err(cons.content_err(
                "duplicate Basic Constraints extension"
            ))
        }
        cons.take_sequence(|cons| {
            *basic_ca = Some(cons.take_opt_bool()?.unwrap_or(false));
            cons.take_opt_u64()?;
            Ok(())
        })
    }

    /// Parses the Subject Key Identifier extension.
    ///
    /// ```text
    /// SubjectKeyIdentifier ::= KeyIdentifier
    /// KeyIdentifier ::= OCTET STRING
    /// ```
    fn take_subject_key_identifier<S: decode::Source>(
        cons: &mut decode::Constructed<S>,
        subject_key_id: &mut Option<Bytes>,
    ) -> Result<(), DecodeError<S::Error>> {
        if subject_key_id.is_some() {
            return Err(cons.content_err(
                "duplicate Subject Key Identifier extension"
            ))
        }
        *subject_key_id = Some(OctetString::take_from(cons)?.into_bytes());
        Ok(())
    }

    /// Parses the Authority Key Identifier extension.
    ///
    /// ```text
    /// AuthorityKeyIdentifier ::= SEQUENCE {
    ///   keyIdentifier             [0] KeyIdentifier           OPTIONAL,
    ///   authorityCertIssuer       [1] GeneralNames            OPTIONAL,
    ///   authorityCertSerialNumber [2] CertificateSerialNumber OPTIONAL  }
    /// ```
    ///
    /// Only the key identifier is kept. If it is missing, an empty
    /// identifier is recorded.
    fn take_authority_key_identifier<S: decode::Source>(
        cons: &mut decode::Constructed<S>,
        authority_key_id: &mut Option<Bytes>,
    ) -> Result<(), DecodeError<S::Error>> {
        if authority_key_id.is_some() {
            return Err(cons.content_err(
                "duplicate Authority Key Identifier extension"
            ))
        }
        *authority_key_id = Some(cons.take_sequence(|cons| {
            let id = cons.take_opt_value_if(
                Tag::CTX_0, OctetString::from_content
            )?;
            cons.skip_all()?;
            Ok(id.map(OctetString::into_bytes).unwrap_or_default())
        })?);
        Ok(())
    }

    /// Parses the Key Usage extension.
    ///
    /// ```text
    /// KeyUsage ::= BIT STRING {
    ///      digitalSignature        (0),
    ///      nonRepudiation          (1), -- recent editions of X.509 have
    ///                           -- renamed this bit to contentCommitment
    ///      keyEncipherment         (2),
    ///      dataEncipherment        (3),
    ///      keyAgreement            (4),
    ///      keyCertSign             (5),
    ///      cRLSign                 (6),
    ///      encipherOnly            (7),
    ///      decipherOnly            (8) }
    /// ```
    fn take_key_usage<S: decode::Source>(
        cons: &mut decode::Constructed<S>,
        key_usage: &mut u16
    ) -> Result<(), DecodeError<S::Error>> {
        let bits = BitString::take_from(cons)?;
        *key_usage = 0;
        for bit in 0..9 {
            if bits.bit(bit) {
                *key_usage |= 1 << bit;
            }
        }
        Ok(())
    }

    /// Parses the Extended Key Usage extension.
    ///
    /// ```text
    /// ExtKeyUsageSyntax ::= SEQUENCE SIZE (1..MAX) OF KeyPurposeId
    /// KeyPurposeId ::= OBJECT IDENTIFIER
    /// ```
    fn take_extended_key_usage<S: decode::Source>(
        cons: &mut decode::Constructed<S>,
        extended_key_usage: &mut Vec<Oid<Bytes>>
    ) -> Result<(), DecodeError<S::Error>> {
        cons.take_sequence(|cons| {
            while let Some(id) = Oid::take_opt_from(cons)? {
                extended_key_usage.push(id)
            }
            Ok(())
        })
    }

    /// Parses the Subject Alternative Name extension.
    ///
    /// ```text
    /// SubjectAltName ::= GeneralNames
    /// GeneralNames ::= SEQUENCE SIZE (1..MAX) OF GeneralName
    /// ```
    fn take_subject_alt_name(
        &mut self, value: &[u8]
    ) -> Result<(), MalformedEncoding> {
        for name in GeneralName::take_all(sequence_content(value)?)? {
            match name {
                GeneralName::Dns(name) => self.dns_names.push(name),
                GeneralName::Email(name) => self.email_addresses.push(name),
                GeneralName::IpAddress(addr) => self.ip_addresses.push(addr),
                GeneralName::Uri(uri) => self.uris.push(uri),
            }
        }
        Ok(())
    }

    /// Parses the CRL Distribution Points extension.
    ///
    /// ```text
    /// CRLDistributionPoints ::= SEQUENCE SIZE (1..MAX) OF DistributionPoint
    ///
    /// DistributionPoint ::= SEQUENCE {
    ///    distributionPoint       [0]     DistributionPointName OPTIONAL,
    ///    reasons                 [1]     ReasonFlags OPTIONAL,
    ///    cRLIssuer               [2]     GeneralNames OPTIONAL }
    ///
    /// DistributionPointName ::= CHOICE {
    ///    fullName                [0]     GeneralNames,
    ///    nameRelativeToCRLIssuer [1]     RelativeDistinguishedName }
    /// ```
    ///
    /// Only the URIs of the fullName choice are kept.
    fn take_crl_distribution_points(
        &mut self, value: &[u8]
    ) -> Result<(), MalformedEncoding> {
        for point in der::Iter::new(sequence_content(value)?) {
            let point = point?;
            if !point.is_universal(der::SEQUENCE) {
                return Err(MalformedEncoding::new(
                    "invalid CRL Distribution Points extension"
                ))
            }
            for field in der::Iter::new(point.content()) {
                let field = field?;
                if !field.is_context(0) {
                    continue
                }
                for choice in der::Iter::new(field.content()) {
                    let choice = choice?;
                    if !choice.is_context(0) {
                        continue
                    }
                    for name in GeneralName::take_all(choice.content())? {
                        if let GeneralName::Uri(uri) = name {
                            self.crl_uris.push(uri)
                        }
                    }
                }
            }
        }
        Ok(())
    }

    /// Parses the Authority Information Access extension.
    ///
    /// ```text
    /// AuthorityInfoAccessSyntax  ::=
    ///         SEQUENCE SIZE (1..MAX) OF AccessDescription
    ///
    /// AccessDescription  ::=  SEQUENCE {
    ///         accessMethod          OBJECT IDENTIFIER,
    ///         accessLocation        GeneralName  }
    /// ```
    ///
    /// URIs for OCSP and CA issuers are kept, everything else is ignored.
    fn take_authority_info_access(
        &mut self, value: &[u8]
    ) -> Result<(), MalformedEncoding> {
        for desc in der::Iter::new(sequence_content(value)?) {
            let desc = desc?;
            if !desc.is_universal(der::SEQUENCE) {
                return Err(MalformedEncoding::new(
                    "invalid Authority Information Access extension"
                ))
            }
            let (method, rest) = Tlv::read(desc.content())?;
            if !method.is_universal(der::OID) {
                return Err(MalformedEncoding::new(
                    "invalid Authority Information Access extension"
                ))
            }
            let location = GeneralName::from_tlv(&Tlv::read_single(rest)?)?;
            if let Some(GeneralName::Uri(uri)) = location {
                let method = Oid(method.content());
                if method == oid::AD_OCSP {
                    self.ocsp_uris.push(uri)
                }
                else if method == oid::AD_CA_ISSUERS {
                    self.ca_issuer_uris.push(uri)
                }
            }
        }
        Ok(())
    }
}

/// Returns the content of the single sequence in `value`.
fn sequence_content(value: &[u8]) -> Result<&[u8], MalformedEncoding> {
    let tlv = Tlv::read_single(value)?;
    if !tlv.is_universal(der::SEQUENCE) || !tlv.is_constructed() {
        return Err(MalformedEncoding::new("expected sequence"))
    }
    Ok(tlv.content())
}

/// Runs `op` over the complete encoded `value`.
///
/// A malformed encoding is reported as a content error at the start of the
/// value.
fn decode_raw<F>(value: &[u8], op: F) -> Result<(), DecodeError<Infallible>>
where F: FnOnce(&[u8]) -> Result<(), MalformedEncoding> {
    op(value).map_err(|err| DecodeError::content(err, Pos::default()))
}


//============ Tests =========================================================
