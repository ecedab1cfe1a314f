//! Certificate policies.
//!
//! The certificate policies extension is rendered straight from its encoded
//! value. Rather than decoding the `CertificatePolicies` structure of RFC
//! 5280 field by field, the value is walked in a single pass from left to
//! right:
//!
//! ```text
//! certificatePolicies ::= SEQUENCE SIZE (1..MAX) OF PolicyInformation
//!
//! PolicyInformation ::= SEQUENCE {
//!      policyIdentifier   CertPolicyId,
//!      policyQualifiers   SEQUENCE SIZE (1..MAX) OF
//!                              PolicyQualifierInfo OPTIONAL }
//!
//! PolicyQualifierInfo ::= SEQUENCE {
//!      policyQualifierId  PolicyQualifierId,
//!      qualifier          ANY DEFINED BY policyQualifierId }
//! ```
//!
//! Sequences are descended into. A well-known policy identifier becomes the
//! identifier of the policy, a qualifier identifier becomes the key for all
//! strings that follow it within the same sequence. IA5 strings, which is
//! what a CPS pointer is, replace the value of the key while UTF-8 strings,
//! the usual encoding of the explicit text of a user notice, are collected.

use std::collections::HashMap;
use std::collections::hash_map;
use bcder::{ConstOid, Oid};
use crate::der::{self, MalformedEncoding, Tlv};
use crate::oid;


//------------ Policy Identifiers --------------------------------------------

/// The policy identifiers recognized by the walker.
const POLICY_IDENTIFIERS: &[ConstOid] = &[
    oid::CABF_ORGANIZATION_VALIDATED,
    oid::ANY_POLICY,
    oid::CABF_DOMAIN_VALIDATED,
    oid::CABF_INDIVIDUAL_VALIDATED,
    oid::CABF_EXTENDED_VALIDATION,
];

fn is_policy_identifier(content: &[u8]) -> bool {
    POLICY_IDENTIFIERS.iter().any(|id| Oid(content) == *id)
}


//------------ QualifierKind -------------------------------------------------

/// The type of a policy qualifier.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum QualifierKind {
    /// A pointer to a certification practice statement.
    Cps,

    /// A user notice.
    UserNotice,
}

impl QualifierKind {
    fn from_oid(content: &[u8]) -> Option<Self> {
        let id = Oid(content);
        if id == oid::QT_CPS {
            Some(QualifierKind::Cps)
        }
        else if id == oid::QT_UNOTICE {
            Some(QualifierKind::UserNotice)
        }
        else {
            None
        }
    }

    /// Returns the label used when rendering the qualifier.
    pub fn label(self) -> &'static str {
        match self {
            QualifierKind::Cps => "CPS",
            QualifierKind::UserNotice => "User Notice",
        }
    }
}


//------------ QualifierValue ------------------------------------------------

/// The accumulated value of a policy qualifier.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum QualifierValue {
    /// A single string.
    Single(String),

    /// A list of strings in the order they appeared.
    Multi(Vec<String>),
}

impl QualifierValue {
    fn push(&mut self, value: String) {
        if let QualifierValue::Single(old) = self {
            let old = std::mem::take(old);
            *self = QualifierValue::Multi(vec![old]);
        }
        if let QualifierValue::Multi(list) = self {
            list.push(value)
        }
    }
}


//------------ Policy --------------------------------------------------------

/// The policy information collected for a single certificate.
#[derive(Clone, Debug, Default)]
pub struct Policy {
    /// The policy identifier in dotted form.
    id: String,

    /// The qualifier types in order of first appearance.
    keys: Vec<QualifierKind>,

    /// The values for each qualifier type.
    values: HashMap<QualifierKind, QualifierValue>,
}

impl Policy {
    /// Walks the value of a certificate policies extension.
    ///
    /// Whatever is found is added to the information already present.
    pub fn walk(&mut self, data: &[u8]) -> Result<(), MalformedEncoding> {
        // One frame per open sequence: its current key and the content
        // left to walk. A key set inside a sequence ends with it.
        let mut stack: Vec<(Option<QualifierKind>, &[u8])> = vec![
            (None, data)
        ];
        loop {
            let frame = match stack.last_mut() {
                Some(frame) => frame,
                None => break,
            };
            if frame.1.is_empty() {
                stack.pop();
                continue
            }
            let (tlv, rest) = Tlv::read(frame.1)?;
            frame.1 = rest;
            if tlv.class() != der::Class::Universal {
                continue
            }
            match tlv.number() {
                der::SEQUENCE if tlv.is_constructed() => {
                    let key = frame.0;
                    stack.push((key, tlv.content()));
                }
                der::OID => {
                    let content = tlv.content();
                    let dotted = der::oid_string(content)?;
                    if is_policy_identifier(content) {
                        self.id = dotted;
                    }
                    else if let Some(kind) = QualifierKind::from_oid(
                        content
                    ) {
                        frame.0 = Some(kind);
                        if !self.keys.contains(&kind) {
                            self.keys.push(kind);
                        }
                    }
                }
                der::IA5_STRING => {
                    if let Some(key) = frame.0 {
                        self.values.insert(
                            key, QualifierValue::Single(text(tlv.content()))
                        );
                    }
                }
                der::UTF8_STRING => {
                    if let Some(key) = frame.0 {
                        self.push_text(key, text(tlv.content()));
                    }
                }
                _ => { }
            }
        }
        Ok(())
    }

    fn push_text(&mut self, key: QualifierKind, value: String) {
        match self.values.entry(key) {
            hash_map::Entry::Occupied(mut entry) => {
                entry.get_mut().push(value)
            }
            hash_map::Entry::Vacant(entry) => {
                entry.insert(QualifierValue::Multi(vec![value]));
            }
        }
    }

    /// Returns the policy identifier.
    ///
    /// The identifier is empty if none of the known identifiers was found.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns an iterator over the qualifiers that have a value.
    ///
    /// The qualifiers are returned in the order their types first appeared.
    pub fn qualifiers(
        &self
    ) -> impl Iterator<Item = (QualifierKind, &QualifierValue)> + '_ {
        self.keys.iter().filter_map(move |key| {
            self.values.get(key).map(|value| (*key, value))
        })
    }
}

fn text(content: &[u8]) -> String {
    String::from_utf8_lossy(content).into_owned()
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;

    // Wraps content into a value with the given tag.
    fn tlv(tag: u8, content: &[u8]) -> Vec<u8> {
        assert!(content.len() < 0x80);
        let mut res = vec![tag, content.len() as u8];
        res.extend_from_slice(content);
        res
    }

    fn seq(items: &[Vec<u8>]) -> Vec<u8> {
        tlv(0x30, &items.concat())
    }

    fn id(value: &ConstOid) -> Vec<u8> {
        tlv(0x06, value.0)
    }

    fn ia5(s: &str) -> Vec<u8> {
        tlv(0x16, s.as_bytes())
    }

    fn utf8(s: &str) -> Vec<u8> {
        tlv(0x0c, s.as_bytes())
    }

    fn user_notice(text: &str) -> Vec<u8> {
        seq(&[id(&oid::QT_UNOTICE), seq(&[utf8(text)])])
    }

    #[test]
    fn walk_cps_and_notices() {
        let value = seq(&[seq(&[
            id(&oid::CABF_ORGANIZATION_VALIDATED),
            seq(&[
                seq(&[id(&oid::QT_CPS), ia5("http://cps.example.com/")]),
                user_notice("First notice"),
                user_notice("Second notice"),
            ])
        ])]);
        let mut policy = Policy::default();
        policy.walk(&value).unwrap();

        assert_eq!(policy.id(), "2.23.140.1.2.2");
        let qualifiers: Vec<_> = policy.qualifiers().collect();
        assert_eq!(
            qualifiers,
            vec![
                (
                    QualifierKind::Cps,
                    &QualifierValue::Single("http://cps.example.com/".into())
                ),
                (
                    QualifierKind::UserNotice,
                    &QualifierValue::Multi(vec![
                        "First notice".into(), "Second notice".into()
                    ])
                ),
            ]
        );
    }

    #[test]
    fn first_appearance_order() {
        let value = seq(&[
            seq(&[id(&oid::QT_UNOTICE), utf8("a")]),
            seq(&[id(&oid::QT_CPS), ia5("b")]),
            seq(&[id(&oid::QT_UNOTICE), utf8("c")]),
        ]);
        let mut policy = Policy::default();
        policy.walk(&value).unwrap();
        let kinds: Vec<_> = policy.qualifiers().map(|(k, _)| k).collect();
        assert_eq!(kinds, [QualifierKind::UserNotice, QualifierKind::Cps]);
        assert_eq!(policy.id(), "");
    }

    #[test]
    fn keys_do_not_leak_out_of_sequences() {
        // The IA5 string after the inner sequence belongs to no qualifier.
        let value = seq(&[
            seq(&[id(&oid::QT_CPS)]),
            ia5("orphan"),
        ]);
        let mut policy = Policy::default();
        policy.walk(&value).unwrap();
        assert_eq!(policy.qualifiers().count(), 0);
    }

    #[test]
    fn strings_before_qualifier_are_ignored() {
        let value = seq(&[
            ia5("early"),
            utf8("early"),
            id(&oid::QT_CPS),
            ia5("first"),
            ia5("second"),
        ]);
        let mut policy = Policy::default();
        policy.walk(&value).unwrap();
        let qualifiers: Vec<_> = policy.qualifiers().collect();
        assert_eq!(
            qualifiers,
            vec![
                (QualifierKind::Cps, &QualifierValue::Single("second".into()))
            ]
        );
    }

    #[test]
    fn unknown_oid_keeps_current_key() {
        let value = seq(&[
            id(&oid::QT_UNOTICE),
            id(&oid::CE_KEY_USAGE),
            utf8("kept"),
        ]);
        let mut policy = Policy::default();
        policy.walk(&value).unwrap();
        assert_eq!(
            policy.qualifiers().next(),
            Some((
                QualifierKind::UserNotice,
                &QualifierValue::Multi(vec!["kept".into()])
            ))
        );
    }

    #[test]
    fn utf8_after_ia5_collects_both() {
        let value = seq(&[id(&oid::QT_CPS), ia5("one"), utf8("two")]);
        let mut policy = Policy::default();
        policy.walk(&value).unwrap();
        assert_eq!(
            policy.qualifiers().next().unwrap().1,
            &QualifierValue::Multi(vec!["one".into(), "two".into()])
        );
    }

    #[test]
    fn other_content_is_skipped() {
        let value = seq(&[
            tlv(0x80, b"ctx"),
            tlv(0x02, b"\x01"),
            id(&oid::ANY_POLICY),
        ]);
        let mut policy = Policy::default();
        policy.walk(&value).unwrap();
        assert_eq!(policy.id(), "2.5.29.32.0");
    }

    #[test]
    fn malformed_values() {
        let mut policy = Policy::default();
        assert!(policy.walk(b"\x30\x05\x06\x03\x55").is_err());
        assert!(policy.walk(b"\x30\x03\x06\x01\x2b\x00").is_err());
        assert!(policy.walk(b"\x30\x02\x06\x00").is_err());
    }

    #[test]
    fn policy_identifiers() {
        for (value, dotted) in &[
            (oid::CABF_ORGANIZATION_VALIDATED, "2.23.140.1.2.2"),
            (oid::ANY_POLICY, "2.5.29.32.0"),
            (oid::CABF_DOMAIN_VALIDATED, "2.23.140.1.2.1"),
            (oid::CABF_INDIVIDUAL_VALIDATED, "2.23.140.1.2.3"),
            (oid::CABF_EXTENDED_VALIDATION, "2.23.140.1.1"),
        ] {
            let mut policy = Policy::default();
            policy.walk(&seq(&[seq(&[id(value)])])).unwrap();
            assert_eq!(policy.id(), *dotted);
        }

        // Any other policy leaves the identifier empty.
        let mut policy = Policy::default();
        policy.walk(&seq(&[seq(&[id(&oid::CE_KEY_USAGE)])])).unwrap();
        assert_eq!(policy.id(), "");
    }

    #[test]
    fn deep_nesting() {
        // Built back to front, then reversed.
        let mut value: Vec<u8> = id(&oid::ANY_POLICY).into_iter().rev()
            .collect();
        for _ in 0..100_000 {
            let len = value.len();
            if len < 0x80 {
                value.push(len as u8);
            }
            else {
                let octets = len.to_be_bytes();
                let octets = &octets[
                    octets.iter().position(|&ch| ch != 0).unwrap()..
                ];
                value.extend(octets.iter().rev());
                value.push(0x80 | octets.len() as u8);
            }
            value.push(0x30);
        }
        value.reverse();

        let mut policy = Policy::default();
        policy.walk(&value).unwrap();
        assert_eq!(policy.id(), "2.5.29.32.0");

        value.pop();
        assert!(Policy::default().walk(&value).is_err());
    }
}
