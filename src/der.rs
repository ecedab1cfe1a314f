//! A minimal reader for DER encoded values.
//!
//! The certificate itself is decoded through `bcder`. Some extensions,
//! however, are rendered from their raw bytes by walking the encoded values
//! one by one without knowing their structure in advance. This module
//! provides what is needed for that: [`Tlv::read`] splits off a single
//! tag-length-value unit from the start of a slice and [`oid_string`]
//! turns the content of an object identifier into its dotted form.
//!
//! Only the definite length forms are accepted as is required by DER.

use std::{error, fmt};
use std::fmt::Write;
use bcder::decode::ContentError;


//------------ Class ---------------------------------------------------------

/// The class of a tag.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Class {
    Universal,
    Application,
    Context,
    Private,
}

impl Class {
    fn from_first_octet(octet: u8) -> Self {
        match octet >> 6 {
            0 => Class::Universal,
            1 => Class::Application,
            2 => Class::Context,
            _ => Class::Private,
        }
    }
}


//------------ Universal Tag Numbers -----------------------------------------

pub const BOOLEAN: u32 = 1;
pub const INTEGER: u32 = 2;
pub const OCTET_STRING: u32 = 4;
pub const OID: u32 = 6;
pub const UTF8_STRING: u32 = 12;
pub const SEQUENCE: u32 = 16;
pub const SET: u32 = 17;
pub const PRINTABLE_STRING: u32 = 19;
pub const TELETEX_STRING: u32 = 20;
pub const IA5_STRING: u32 = 22;
pub const BMP_STRING: u32 = 30;


//------------ Tlv -----------------------------------------------------------

/// A single encoded value.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Tlv<'a> {
    class: Class,
    number: u32,
    constructed: bool,
    content: &'a [u8],
}

impl<'a> Tlv<'a> {
    /// Reads a value from the beginning of `data`.
    ///
    /// Returns the value and whatever is left of `data` after it.
    pub fn read(
        data: &'a [u8]
    ) -> Result<(Self, &'a [u8]), MalformedEncoding> {
        let (&first, mut data) = data.split_first().ok_or(
            MalformedEncoding::new("missing tag")
        )?;
        let class = Class::from_first_octet(first);
        let constructed = first & 0x20 != 0;
        let number = if first & 0x1F == 0x1F {
            let mut number = 0u32;
            loop {
                let (&octet, rest) = data.split_first().ok_or(
                    MalformedEncoding::new("truncated tag")
                )?;
                data = rest;
                if number.leading_zeros() < 7 {
                    return Err(MalformedEncoding::new("tag number too large"))
                }
                number = (number << 7) | u32::from(octet & 0x7F);
                if octet & 0x80 == 0 {
                    break number
                }
            }
        }
        else {
            u32::from(first & 0x1F)
        };

        let (len, data) = Self::read_length(data)?;
        if len > data.len() {
            return Err(MalformedEncoding::new("value exceeds available data"))
        }
        let (content, rest) = data.split_at(len);
        Ok((Tlv { class, number, constructed, content }, rest))
    }

    /// Reads a value that must take up all of `data`.
    pub fn read_single(data: &'a [u8]) -> Result<Self, MalformedEncoding> {
        let (res, rest) = Self::read(data)?;
        if !rest.is_empty() {
            return Err(MalformedEncoding::new("trailing data"))
        }
        Ok(res)
    }

    fn read_length(
        data: &[u8]
    ) -> Result<(usize, &[u8]), MalformedEncoding> {
        let (&first, data) = data.split_first().ok_or(
            MalformedEncoding::new("missing length")
        )?;
        if first < 0x80 {
            return Ok((usize::from(first), data))
        }
        if first == 0x80 {
            return Err(MalformedEncoding::new("indefinite length"))
        }
        let count = usize::from(first & 0x7F);
        if count > data.len() {
            return Err(MalformedEncoding::new("truncated length"))
        }
        let (octets, data) = data.split_at(count);
        let mut len = 0usize;
        for &octet in octets {
            if len.leading_zeros() < 8 {
                return Err(MalformedEncoding::new("length too large"))
            }
            len = (len << 8) | usize::from(octet);
        }
        Ok((len, data))
    }

    pub fn class(&self) -> Class {
        self.class
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn is_constructed(&self) -> bool {
        self.constructed
    }

    pub fn content(&self) -> &'a [u8] {
        self.content
    }

    /// Returns whether this is a value with the given universal tag.
    pub fn is_universal(&self, number: u32) -> bool {
        self.class == Class::Universal && self.number == number
    }

    /// Returns whether this is a value with the given context tag.
    pub fn is_context(&self, number: u32) -> bool {
        self.class == Class::Context && self.number == number
    }
}


//------------ Iter ----------------------------------------------------------

/// An iterator over the values in a sequence of encoded values.
#[derive(Clone, Debug)]
pub struct Iter<'a>(&'a [u8]);

impl<'a> Iter<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Iter(data)
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = Result<Tlv<'a>, MalformedEncoding>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.0.is_empty() {
            return None
        }
        match Tlv::read(self.0) {
            Ok((tlv, rest)) => {
                self.0 = rest;
                Some(Ok(tlv))
            }
            Err(err) => {
                self.0 = &[];
                Some(Err(err))
            }
        }
    }
}


//------------ Functions -----------------------------------------------------

/// Converts the content of an object identifier into its dotted form.
pub fn oid_string(content: &[u8]) -> Result<String, MalformedEncoding> {
    let mut arcs = Vec::new();
    let mut arc = 0u64;
    let mut pending = false;
    for &octet in content {
        if arc.leading_zeros() < 7 {
            return Err(MalformedEncoding::new(
                "object identifier component too large"
            ))
        }
        arc = (arc << 7) | u64::from(octet & 0x7F);
        pending = octet & 0x80 != 0;
        if !pending {
            arcs.push(arc);
            arc = 0;
        }
    }
    if pending {
        return Err(MalformedEncoding::new("truncated object identifier"))
    }
    let (&first, tail) = arcs.split_first().ok_or(
        MalformedEncoding::new("empty object identifier")
    )?;
    let mut res = match first {
        0..=39 => format!("0.{}", first),
        40..=79 => format!("1.{}", first - 40),
        _ => format!("2.{}", first - 80),
    };
    for item in tail {
        // Writing into a string cannot fail.
        let _ = write!(res, ".{}", item);
    }
    Ok(res)
}


//------------ MalformedEncoding ---------------------------------------------

/// The encoded data is not a valid DER value.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct MalformedEncoding(&'static str);

impl MalformedEncoding {
    pub(crate) fn new(reason: &'static str) -> Self {
        MalformedEncoding(reason)
    }

    pub fn reason(self) -> &'static str {
        self.0
    }
}

impl From<MalformedEncoding> for ContentError {
    fn from(err: MalformedEncoding) -> Self {
        ContentError::from_static(err.0)
    }
}

impl fmt::Display for MalformedEncoding {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "malformed encoding: {}", self.0)
    }
}

impl error::Error for MalformedEncoding { }


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn read_short_form() {
        let (tlv, rest) = Tlv::read(b"\x30\x03\x02\x01\x05\xff").unwrap();
        assert_eq!(tlv.class(), Class::Universal);
        assert_eq!(tlv.number(), SEQUENCE);
        assert!(tlv.is_constructed());
        assert_eq!(tlv.content(), b"\x02\x01\x05");
        assert_eq!(rest, b"\xff");

        let inner = Tlv::read_single(tlv.content()).unwrap();
        assert!(inner.is_universal(INTEGER));
        assert!(!inner.is_constructed());
        assert_eq!(inner.content(), b"\x05");
    }

    #[test]
    fn read_long_form_length() {
        let mut data = vec![0x04, 0x81, 0x80];
        data.extend_from_slice(&[0x41; 0x80]);
        let tlv = Tlv::read_single(&data).unwrap();
        assert_eq!(tlv.content().len(), 0x80);

        let mut data = vec![0x04, 0x82, 0x01, 0x00];
        data.extend_from_slice(&[0x41; 0x100]);
        let tlv = Tlv::read_single(&data).unwrap();
        assert_eq!(tlv.content().len(), 0x100);
    }

    #[test]
    fn read_classes_and_high_tags() {
        let (tlv, _) = Tlv::read(b"\x86\x01a").unwrap();
        assert_eq!(tlv.class(), Class::Context);
        assert!(tlv.is_context(6));

        let (tlv, _) = Tlv::read(b"\x5f\x81\x01\x00").unwrap();
        assert_eq!(tlv.class(), Class::Application);
        assert_eq!(tlv.number(), 129);
        assert!(tlv.content().is_empty());

        let (tlv, _) = Tlv::read(b"\xe1\x00").unwrap();
        assert_eq!(tlv.class(), Class::Private);
        assert!(tlv.is_constructed());
    }

    #[test]
    fn read_malformed() {
        assert!(Tlv::read(b"").is_err());
        assert!(Tlv::read(b"\x30").is_err());
        assert!(Tlv::read(b"\x30\x05\x02\x01").is_err());
        assert!(Tlv::read(b"\x30\x80\x00\x00").is_err());
        assert!(Tlv::read(b"\x04\x82\x01").is_err());
        assert!(Tlv::read(b"\x1f\x81").is_err());
        assert!(Tlv::read(
            b"\x04\x89\x01\x00\x00\x00\x00\x00\x00\x00\x00"
        ).is_err());
        assert!(Tlv::read_single(b"\x05\x00\x05\x00").is_err());
    }

    #[test]
    fn iterate_values() {
        let items: Vec<_> = Iter::new(b"\x05\x00\x02\x01\x07").collect();
        assert_eq!(items.len(), 2);
        assert!(items[0].as_ref().unwrap().is_universal(5));
        assert_eq!(items[1].as_ref().unwrap().content(), b"\x07");

        let mut iter = Iter::new(b"\x05\x00\x02\x05");
        assert!(iter.next().unwrap().is_ok());
        assert!(iter.next().unwrap().is_err());
        assert!(iter.next().is_none());
    }

    #[test]
    fn oid_strings() {
        assert_eq!(
            oid_string(&[85, 29, 32]).unwrap(),
            "2.5.29.32"
        );
        assert_eq!(
            oid_string(&[103, 129, 12, 1, 2, 2]).unwrap(),
            "2.23.140.1.2.2"
        );
        assert_eq!(
            oid_string(&[42, 134, 72, 134, 247, 13, 1, 9, 1]).unwrap(),
            "1.2.840.113549.1.9.1"
        );
        assert_eq!(oid_string(&[0x27]).unwrap(), "0.39");
        assert!(oid_string(&[]).is_err());
        assert!(oid_string(&[43, 6, 0x81]).is_err());
    }
}
