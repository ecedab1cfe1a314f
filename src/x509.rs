//! Types common to all things X.509.

use std::fmt;
use std::convert::TryFrom;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use bcder::decode;
use bcder::{BitString, Captured, Mode, OctetString, Oid, Tag, Unsigned};
use bcder::decode::{DecodeError, Source};
use bytes::Bytes;
use chrono::{DateTime, TimeZone, Utc};
use crate::der::{self, MalformedEncoding, Tlv};
use crate::oid;


//------------ SignedData ----------------------------------------------------

/// The outer structure shared by certificates and certificate requests.
///
/// ```text
/// Certificate  ::=  SEQUENCE  {
///      tbsCertificate       TBSCertificate,
///      signatureAlgorithm   AlgorithmIdentifier,
///      signatureValue       BIT STRING  }
/// ```
#[derive(Clone, Debug)]
pub struct SignedData {
    data: Captured,
    algorithm: Oid<Bytes>,
    signature: Bytes,
}

impl SignedData {
    /// Returns the signed data including its outer tag and length.
    pub fn data(&self) -> &Captured {
        &self.data
    }

    /// Returns the signature algorithm of the outer structure.
    pub fn algorithm(&self) -> &Oid<Bytes> {
        &self.algorithm
    }

    /// Returns the octets of the signature.
    pub fn signature(&self) -> &Bytes {
        &self.signature
    }

    pub fn from_constructed<S: decode::Source>(
        cons: &mut decode::Constructed<S>
    ) -> Result<Self, DecodeError<S::Error>> {
        Ok(SignedData {
            data: cons.capture_one()?,
            algorithm: take_algorithm(cons)?,
            signature: BitString::take_from(cons)?.octet_bytes(),
        })
    }
}


//------------ Name ----------------------------------------------------------

/// A distinguished name.
///
/// The name is kept as the list of its attributes in the order they appear
/// in the encoding. Attributes whose value isn’t one of the common string
/// types are dropped.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Name {
    attributes: Vec<(Oid<Bytes>, String)>,
}

impl Name {
    pub fn take_from<S: decode::Source>(
        cons: &mut decode::Constructed<S>
    ) -> Result<Self, DecodeError<S::Error>> {
        let mut attributes = Vec::new();
        cons.take_sequence(|cons| { // RDNSequence
            while let Some(()) = cons.take_opt_set(|cons| {
                while let Some(()) = cons.take_opt_sequence(|cons| {
                    let id = Oid::take_from(cons)?;
                    let value = cons.capture_one()?;
                    let value = decode_string(
                        value.as_slice()
                    ).map_err(|err| cons.content_err(err))?;
                    if let Some(value) = value {
                        attributes.push((id, value))
                    }
                    Ok(())
                })? { }
                Ok(())
            })? { }
            Ok(())
        })?;
        Ok(Name { attributes })
    }

    /// Returns an iterator over all attributes.
    pub fn attributes(&self) -> impl Iterator<Item = (&Oid<Bytes>, &str)> {
        self.attributes.iter().map(|(id, value)| (id, value.as_str()))
    }

    /// Returns an iterator over the values of the given attribute type.
    pub fn values<'a, T: AsRef<[u8]> + 'a>(
        &'a self, id: &'a Oid<T>
    ) -> impl Iterator<Item = &'a str> + 'a {
        self.attributes.iter().filter_map(move |(attr, value)| {
            if attr == id { Some(value.as_str()) }
            else { None }
        })
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

/// Decodes an attribute value into a string.
///
/// Returns `Ok(None)` if the value isn’t one of the supported string types.
fn decode_string(data: &[u8]) -> Result<Option<String>, MalformedEncoding> {
    let tlv = Tlv::read_single(data)?;
    if tlv.class() != der::Class::Universal || tlv.is_constructed() {
        return Ok(None)
    }
    let content = tlv.content();
    Ok(match tlv.number() {
        der::PRINTABLE_STRING | der::UTF8_STRING | der::IA5_STRING => {
            Some(String::from_utf8_lossy(content).into_owned())
        }
        der::TELETEX_STRING => {
            // Treated as Latin-1 like everybody else does.
            Some(content.iter().map(|&ch| char::from(ch)).collect())
        }
        der::BMP_STRING => {
            if content.len() % 2 != 0 {
                return Err(MalformedEncoding::new("odd length BMPString"))
            }
            let units = content.chunks(2).map(|pair| {
                u16::from_be_bytes([pair[0], pair[1]])
            });
            Some(
                char::decode_utf16(units).map(|ch| {
                    ch.unwrap_or(char::REPLACEMENT_CHARACTER)
                }).collect()
            )
        }
        _ => None
    })
}


//------------ Time ----------------------------------------------------------

/// A point in time as used in the validity of a certificate.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Time(DateTime<Utc>);

impl Time {
    pub fn new(dt: DateTime<Utc>) -> Self {
        Time(dt)
    }

    /// Creates a time value from its components.
    ///
    /// Returns `None` if the components don’t describe a valid time.
    pub fn utc(
        year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32
    ) -> Option<Self> {
        Utc.with_ymd_and_hms(year, month, day, hour, min, sec)
            .single().map(Time)
    }

    pub fn take_from<S: decode::Source>(
        cons: &mut decode::Constructed<S>
    ) -> Result<Self, DecodeError<S::Error>> {
        cons.take_primitive(|tag, prim| {
            let year = if tag == Tag::UTC_TIME {
                // RFC 5280 requires the format YYMMDDHHMMSSZ
                let year = read_digits(prim, 2)? as i32;
                if year >= 50 { year + 1900 } else { year + 2000 }
            }
            else if tag == Tag::GENERALIZED_TIME {
                // RFC 5280 requires the format YYYYMMDDHHMMSSZ
                read_digits(prim, 4)? as i32
            }
            else {
                return Err(prim.content_err("malformed time value"))
            };
            let month = read_digits(prim, 2)?;
            let day = read_digits(prim, 2)?;
            let hour = read_digits(prim, 2)?;
            let min = read_digits(prim, 2)?;
            let sec = read_digits(prim, 2)?;
            if prim.take_u8()? != b'Z' {
                return Err(prim.content_err("malformed time value"))
            }
            Self::utc(year, month, day, hour, min, sec).ok_or_else(|| {
                prim.content_err("malformed time value")
            })
        })
    }

    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }
}

fn read_digits<S: decode::Source>(
    source: &mut S, count: usize
) -> Result<u32, DecodeError<S::Error>> {
    let mut res = 0;
    for _ in 0..count {
        let ch = source.take_u8()?;
        if !ch.is_ascii_digit() {
            return Err(source.content_err("malformed time value"))
        }
        res = res * 10 + u32::from(ch - b'0');
    }
    Ok(res)
}

impl From<DateTime<Utc>> for Time {
    fn from(time: DateTime<Utc>) -> Self {
        Time(time)
    }
}

//--- Display

/// Formats the time as `Jan  2 15:04:05 2006 GMT`.
impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0.format("%b %e %H:%M:%S %Y GMT"))
    }
}


//------------ Validity ------------------------------------------------------

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Validity {
    not_before: Time,
    not_after: Time,
}

impl Validity {
    pub fn new(not_before: Time, not_after: Time) -> Self {
        Validity { not_before, not_after }
    }

    pub fn not_before(self) -> Time {
        self.not_before
    }

    pub fn not_after(self) -> Time {
        self.not_after
    }

    pub fn take_from<S: decode::Source>(
        cons: &mut decode::Constructed<S>
    ) -> Result<Self, DecodeError<S::Error>> {
        cons.take_sequence(|cons| {
            Ok(Validity::new(
                Time::take_from(cons)?,
                Time::take_from(cons)?,
            ))
        })
    }
}


//------------ PublicKey -----------------------------------------------------

/// A subject public key info.
///
/// ```text
/// SubjectPublicKeyInfo  ::=  SEQUENCE  {
///      algorithm            AlgorithmIdentifier,
///      subjectPublicKey     BIT STRING  }
/// ```
#[derive(Clone, Debug)]
pub struct PublicKey {
    algorithm: Oid<Bytes>,
    material: KeyMaterial,
}

/// The decoded content of a public key.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum KeyMaterial {
    /// An RSA key with its modulus and public exponent.
    Rsa { modulus: Bytes, exponent: u64 },

    /// A DSA key with its public value.
    Dsa { public: Bytes },

    /// An elliptic curve key.
    Ec,

    /// A key of some other algorithm.
    Unknown,
}

impl PublicKey {
    pub fn take_from<S: decode::Source>(
        cons: &mut decode::Constructed<S>
    ) -> Result<Self, DecodeError<S::Error>> {
        let (algorithm, bits) = cons.take_sequence(|cons| {
            Ok((
                take_algorithm(cons)?,
                BitString::take_from(cons)?.octet_bytes()
            ))
        })?;
        let material = if algorithm == oid::RSA_ENCRYPTION {
            let (modulus, exponent) = Mode::Der.decode(bits, |cons| {
                cons.take_sequence(|cons| {
                    let modulus = take_unsigned(cons)?;
                    let exponent = take_u64(cons)?;
                    Ok((modulus, exponent))
                })
            }).map_err(DecodeError::convert)?;
            KeyMaterial::Rsa { modulus, exponent }
        }
        else if algorithm == oid::ID_DSA {
            let public = Mode::Der.decode(
                bits, take_unsigned
            ).map_err(DecodeError::convert)?;
            KeyMaterial::Dsa { public }
        }
        else if algorithm == oid::EC_PUBLIC_KEY {
            KeyMaterial::Ec
        }
        else {
            KeyMaterial::Unknown
        };
        Ok(PublicKey { algorithm, material })
    }

    pub fn algorithm(&self) -> &Oid<Bytes> {
        &self.algorithm
    }

    pub fn material(&self) -> &KeyMaterial {
        &self.material
    }
}


//------------ Extension -----------------------------------------------------

/// A certificate extension in its raw form.
///
/// ```text
/// Extension  ::=  SEQUENCE  {
///      extnID      OBJECT IDENTIFIER,
///      critical    BOOLEAN DEFAULT FALSE,
///      extnValue   OCTET STRING }
/// ```
#[derive(Clone, Debug)]
pub struct Extension {
    id: Oid<Bytes>,
    critical: bool,
    value: Bytes,
}

impl Extension {
    pub fn new(id: Oid<Bytes>, critical: bool, value: Bytes) -> Self {
        Extension { id, critical, value }
    }

    pub fn take_opt_from<S: decode::Source>(
        cons: &mut decode::Constructed<S>
    ) -> Result<Option<Self>, DecodeError<S::Error>> {
        cons.take_opt_sequence(|cons| {
            Ok(Extension {
                id: Oid::take_from(cons)?,
                critical: cons.take_opt_bool()?.unwrap_or(false),
                value: OctetString::take_from(cons)?.into_bytes(),
            })
        })
    }

    pub fn id(&self) -> &Oid<Bytes> {
        &self.id
    }

    pub fn is_critical(&self) -> bool {
        self.critical
    }

    /// Returns the content of the extension value octet string.
    pub fn value(&self) -> &Bytes {
        &self.value
    }
}


//------------ GeneralName ---------------------------------------------------

/// The general name choices this crate cares about.
///
/// ```text
/// GeneralName ::= CHOICE {
///      otherName                       [0]     OtherName,
///      rfc822Name                      [1]     IA5String,
///      dNSName                         [2]     IA5String,
///      x400Address                     [3]     ORAddress,
///      directoryName                   [4]     Name,
///      ediPartyName                    [5]     EDIPartyName,
///      uniformResourceIdentifier       [6]     IA5String,
///      iPAddress                       [7]     OCTET STRING,
///      registeredID                    [8]     OBJECT IDENTIFIER }
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum GeneralName {
    Email(String),
    Dns(String),
    Uri(String),
    IpAddress(IpAddr),
}

impl GeneralName {
    /// Converts an encoded value into a general name.
    ///
    /// Returns `Ok(None)` for the choices that aren’t supported.
    pub fn from_tlv(tlv: &Tlv) -> Result<Option<Self>, MalformedEncoding> {
        if tlv.class() != der::Class::Context {
            return Err(MalformedEncoding::new("invalid general name"))
        }
        let text = || String::from_utf8_lossy(tlv.content()).into_owned();
        Ok(match tlv.number() {
            1 => Some(GeneralName::Email(text())),
            2 => Some(GeneralName::Dns(text())),
            6 => Some(GeneralName::Uri(text())),
            7 => Some(GeneralName::IpAddress(ip_address(tlv.content())?)),
            _ => None
        })
    }

    /// Decodes the content of a `GeneralNames` sequence.
    pub fn take_all(content: &[u8]) -> Result<Vec<Self>, MalformedEncoding> {
        let mut res = Vec::new();
        for tlv in der::Iter::new(content) {
            if let Some(name) = Self::from_tlv(&tlv?)? {
                res.push(name)
            }
        }
        Ok(res)
    }
}

fn ip_address(octets: &[u8]) -> Result<IpAddr, MalformedEncoding> {
    if let Ok(addr) = <[u8; 4]>::try_from(octets) {
        Ok(Ipv4Addr::from(addr).into())
    }
    else if let Ok(addr) = <[u8; 16]>::try_from(octets) {
        Ok(Ipv6Addr::from(addr).into())
    }
    else {
        Err(MalformedEncoding::new("invalid IP address length"))
    }
}

impl fmt::Display for GeneralName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            GeneralName::Email(ref s) => f.write_str(s),
            GeneralName::Dns(ref s) => f.write_str(s),
            GeneralName::Uri(ref s) => f.write_str(s),
            GeneralName::IpAddress(ref addr) => addr.fmt(f),
        }
    }
}


//------------ Helpers for Decoding ------------------------------------------

/// Takes an algorithm identifier and returns its object identifier.
///
/// ```text
/// AlgorithmIdentifier  ::=  SEQUENCE  {
///      algorithm               OBJECT IDENTIFIER,
///      parameters              ANY DEFINED BY algorithm OPTIONAL  }
/// ```
///
/// The parameters are skipped.
pub fn take_algorithm<S: decode::Source>(
    cons: &mut decode::Constructed<S>
) -> Result<Oid<Bytes>, DecodeError<S::Error>> {
    cons.take_sequence(|cons| {
        let id = Oid::take_from(cons)?;
        cons.skip_all()?;
        Ok(id)
    })
}

/// Takes an unsigned integer and returns its octets.
///
/// Leading zero octets are removed, so zero results in empty octets.
pub fn take_unsigned<S: decode::Source>(
    cons: &mut decode::Constructed<S>
) -> Result<Bytes, DecodeError<S::Error>> {
    let value = Unsigned::take_from(cons)?;
    Ok(Bytes::copy_from_slice(strip_leading_zeros(value.as_ref())))
}

/// Takes an unsigned integer that has to fit into a `u64`.
pub fn take_u64<S: decode::Source>(
    cons: &mut decode::Constructed<S>
) -> Result<u64, DecodeError<S::Error>> {
    let value = take_unsigned(cons)?;
    if value.len() > 8 {
        return Err(cons.content_err("integer too large"))
    }
    Ok(value.iter().fold(0, |res, &octet| (res << 8) | u64::from(octet)))
}

/// Removes leading zero octets from the big-endian integer `octets`.
pub fn strip_leading_zeros(octets: &[u8]) -> &[u8] {
    let start = octets.iter().position(|&ch| ch != 0).unwrap_or(octets.len());
    &octets[start..]
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn time_display() {
        let time = Time::utc(2017, 9, 7, 4, 5, 6).unwrap();
        assert_eq!(time.to_string(), "Sep  7 04:05:06 2017 GMT");
        let time = Time::utc(2027, 10, 16, 13, 19, 14).unwrap();
        assert_eq!(time.to_string(), "Oct 16 13:19:14 2027 GMT");
        assert!(Time::utc(2017, 2, 30, 0, 0, 0).is_none());
    }

    #[test]
    fn decode_times() {
        let utc = Mode::Der.decode(
            b"\x17\x0d170907040506Z".as_ref(), Time::take_from
        ).unwrap();
        assert_eq!(utc, Time::utc(2017, 9, 7, 4, 5, 6).unwrap());
        let old = Mode::Der.decode(
            b"\x17\x0d690101000000Z".as_ref(), Time::take_from
        ).unwrap();
        assert_eq!(old, Time::utc(1969, 1, 1, 0, 0, 0).unwrap());
        let gen = Mode::Der.decode(
            b"\x18\x0f20500101000000Z".as_ref(), Time::take_from
        ).unwrap();
        assert_eq!(gen, Time::utc(2050, 1, 1, 0, 0, 0).unwrap());
        assert!(Mode::Der.decode(
            b"\x17\x0d1709070405x6Z".as_ref(), Time::take_from
        ).is_err());
        assert!(Mode::Der.decode(
            b"\x04\x0d170907040506Z".as_ref(), Time::take_from
        ).is_err());
    }

    #[test]
    fn decode_name() {
        // C=US, O=Ex (BMP), CN=a (Teletex), 2.5.4.5 as INTEGER (skipped)
        let data = b"\x30\x33\
            \x31\x0b\x30\x09\x06\x03\x55\x04\x06\x13\x02US\
            \x31\x0d\x30\x0b\x06\x03\x55\x04\x0a\x1e\x04\x00E\x00x\
            \x31\x0a\x30\x08\x06\x03\x55\x04\x03\x14\x01\xe9\
            \x31\x09\x30\x07\x06\x03\x55\x04\x05\x02\x00";
        let name = Mode::Der.decode(data.as_ref(), Name::take_from).unwrap();
        let attrs: Vec<_> = name.attributes().map(|(_, v)| v).collect();
        assert_eq!(attrs, ["US", "Ex", "\u{e9}"]);
        assert_eq!(
            name.values(&oid::AT_COUNTRY_NAME).collect::<Vec<_>>(),
            ["US"]
        );
        assert_eq!(name.values(&oid::AT_LOCALITY_NAME).count(), 0);
    }

    #[test]
    fn decode_empty_name() {
        let name = Mode::Der.decode(
            b"\x30\x00".as_ref(), Name::take_from
        ).unwrap();
        assert!(name.is_empty());
    }

    #[test]
    fn general_names() {
        let data = b"\x82\x0bexample.com\
            \x87\x04\xc0\x00\x02\x07\
            \x81\x05a@b.c\
            \xa4\x02\x30\x00\
            \x86\x04ftp:";
        let names = GeneralName::take_all(data).unwrap();
        assert_eq!(
            names,
            [
                GeneralName::Dns("example.com".into()),
                GeneralName::IpAddress(Ipv4Addr::new(192, 0, 2, 7).into()),
                GeneralName::Email("a@b.c".into()),
                GeneralName::Uri("ftp:".into()),
            ]
        );
        assert_eq!(names[1].to_string(), "192.0.2.7");
        assert!(GeneralName::take_all(b"\x87\x03\x01\x02\x03").is_err());
        assert!(GeneralName::take_all(b"\x04\x00").is_err());
    }

    #[test]
    fn ipv6_display() {
        let mut octets = [0u8; 16];
        octets[..4].copy_from_slice(&[0x20, 0x01, 0x0d, 0xb8]);
        octets[15] = 1;
        assert_eq!(ip_address(&octets).unwrap().to_string(), "2001:db8::1");
    }

    #[test]
    fn leading_zeros() {
        assert_eq!(strip_leading_zeros(b"\x00\x00\x80\x00"), b"\x80\x00");
        assert_eq!(strip_leading_zeros(b"\x00"), b"");
    }
}
