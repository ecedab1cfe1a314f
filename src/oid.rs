//! The object identifiers used in this crate.
//!
//! This module collects all the object indentifiers used at various places
//! in this crate in one central place. They are public so you can refer to
//! them should that ever become necessary.

use bcder::{ConstOid, Oid};


//------------ Public Key Algorithms -----------------------------------------

/// [RFC 4055](https://tools.ietf.org/html/rfc4055) `rsaEncryption`
///
/// Identifies an RSA public key with no limitation to either RSASSA-PSS or
/// RSAES-OEAP.
pub const RSA_ENCRYPTION: ConstOid
    = Oid(&[42, 134, 72, 134, 247, 13, 1, 1, 1]);

/// [RFC 3279](https://tools.ietf.org/html/rfc3279) `id-dsa`
pub const ID_DSA: ConstOid = Oid(&[42, 134, 72, 206, 56, 4, 1]);

/// [RFC 5480](https://tools.ietf.org/html/rfc5480) `id-ecPublicKey`
pub const EC_PUBLIC_KEY: ConstOid = Oid(&[42, 134, 72, 206, 61, 2, 1]);


//------------ Signature Algorithms ------------------------------------------

pub const MD2_WITH_RSA_ENCRYPTION: ConstOid
    = Oid(&[42, 134, 72, 134, 247, 13, 1, 1, 2]);
pub const MD5_WITH_RSA_ENCRYPTION: ConstOid
    = Oid(&[42, 134, 72, 134, 247, 13, 1, 1, 4]);
pub const SHA1_WITH_RSA_ENCRYPTION: ConstOid
    = Oid(&[42, 134, 72, 134, 247, 13, 1, 1, 5]);

/// [RFC 4055](https://tools.ietf.org/html/rfc4055) `sha256WithRSAEncryption`
///
/// Identifies the PKCS #1 version 1.5 signature algorithm with SHA-256.
pub const SHA256_WITH_RSA_ENCRYPTION: ConstOid
    = Oid(&[42, 134, 72, 134, 247, 13, 1, 1, 11]);
pub const SHA384_WITH_RSA_ENCRYPTION: ConstOid
    = Oid(&[42, 134, 72, 134, 247, 13, 1, 1, 12]);
pub const SHA512_WITH_RSA_ENCRYPTION: ConstOid
    = Oid(&[42, 134, 72, 134, 247, 13, 1, 1, 13]);

pub const DSA_WITH_SHA1: ConstOid = Oid(&[42, 134, 72, 206, 56, 4, 3]);
pub const DSA_WITH_SHA256: ConstOid
    = Oid(&[96, 134, 72, 1, 101, 3, 4, 3, 2]);

pub const ECDSA_WITH_SHA1: ConstOid = Oid(&[42, 134, 72, 206, 61, 4, 1]);
pub const ECDSA_WITH_SHA256: ConstOid
    = Oid(&[42, 134, 72, 206, 61, 4, 3, 2]);
pub const ECDSA_WITH_SHA384: ConstOid
    = Oid(&[42, 134, 72, 206, 61, 4, 3, 3]);
pub const ECDSA_WITH_SHA512: ConstOid
    = Oid(&[42, 134, 72, 206, 61, 4, 3, 4]);


//------------ Name Attributes -----------------------------------------------

pub const AT_COMMON_NAME: ConstOid = Oid(&[85, 4, 3]); // 2 5 4 3
pub const AT_COUNTRY_NAME: ConstOid = Oid(&[85, 4, 6]); // 2 5 4 6
pub const AT_LOCALITY_NAME: ConstOid = Oid(&[85, 4, 7]); // 2 5 4 7
pub const AT_STATE_OR_PROVINCE_NAME: ConstOid = Oid(&[85, 4, 8]); // 2 5 4 8
pub const AT_ORGANIZATION_NAME: ConstOid = Oid(&[85, 4, 10]); // 2 5 4 10
pub const AT_ORGANIZATIONAL_UNIT_NAME: ConstOid
    = Oid(&[85, 4, 11]); // 2 5 4 11

/// PKCS #9 `emailAddress`
pub const EMAIL_ADDRESS: ConstOid
    = Oid(&[42, 134, 72, 134, 247, 13, 1, 9, 1]);


//------------ Certificate Extensions ----------------------------------------

pub const CE_AUTHORITY_KEY_IDENTIFIER: ConstOid = Oid(&[85, 29, 35]);
pub const CE_BASIC_CONSTRAINTS: ConstOid = Oid(&[85, 29, 19]);
pub const CE_CERTIFICATE_POLICIES: ConstOid = Oid(&[85, 29, 32]);
pub const CE_CRL_DISTRIBUTION_POINTS: ConstOid = Oid(&[85, 29, 31]);
pub const CE_EXTENDED_KEY_USAGE: ConstOid = Oid(&[85, 29, 37]);
pub const CE_KEY_USAGE: ConstOid = Oid(&[85, 29, 15]);
pub const CE_SUBJECT_ALT_NAME: ConstOid = Oid(&[85, 29, 17]);
pub const CE_SUBJECT_KEY_IDENTIFIER: ConstOid = Oid(&[85, 29, 14]);

pub const PE_AUTHORITY_INFO_ACCESS: ConstOid
    = Oid(&[43, 6, 1, 5, 5, 7, 1, 1]);

pub const AD_OCSP: ConstOid = Oid(&[43, 6, 1, 5, 5, 7, 48, 1]);
pub const AD_CA_ISSUERS: ConstOid = Oid(&[43, 6, 1, 5, 5, 7, 48, 2]);


//------------ Extended Key Usage Purposes -----------------------------------

pub const ANY_EXTENDED_KEY_USAGE: ConstOid = Oid(&[85, 29, 37, 0]);
pub const KP_SERVER_AUTH: ConstOid = Oid(&[43, 6, 1, 5, 5, 7, 3, 1]);
pub const KP_CLIENT_AUTH: ConstOid = Oid(&[43, 6, 1, 5, 5, 7, 3, 2]);
pub const KP_CODE_SIGNING: ConstOid = Oid(&[43, 6, 1, 5, 5, 7, 3, 3]);
pub const KP_EMAIL_PROTECTION: ConstOid = Oid(&[43, 6, 1, 5, 5, 7, 3, 4]);
pub const KP_IPSEC_END_SYSTEM: ConstOid = Oid(&[43, 6, 1, 5, 5, 7, 3, 5]);
pub const KP_IPSEC_TUNNEL: ConstOid = Oid(&[43, 6, 1, 5, 5, 7, 3, 6]);
pub const KP_IPSEC_USER: ConstOid = Oid(&[43, 6, 1, 5, 5, 7, 3, 7]);
pub const KP_TIME_STAMPING: ConstOid = Oid(&[43, 6, 1, 5, 5, 7, 3, 8]);
pub const KP_OCSP_SIGNING: ConstOid = Oid(&[43, 6, 1, 5, 5, 7, 3, 9]);

/// Microsoft Server Gated Crypto, `1.3.6.1.4.1.311.10.3.3`.
pub const MS_SERVER_GATED_CRYPTO: ConstOid
    = Oid(&[43, 6, 1, 4, 1, 130, 55, 10, 3, 3]);

/// Netscape Server Gated Crypto, `2.16.840.1.113730.4.1`.
pub const NS_SERVER_GATED_CRYPTO: ConstOid
    = Oid(&[96, 134, 72, 1, 134, 248, 66, 4, 1]);


//------------ Certificate Policies ------------------------------------------

/// [RFC 5280](https://tools.ietf.org/html/rfc5280) `anyPolicy`
pub const ANY_POLICY: ConstOid = Oid(&[85, 29, 32, 0]);

/// CA/Browser Forum extended validation, `2.23.140.1.1`.
pub const CABF_EXTENDED_VALIDATION: ConstOid
    = Oid(&[103, 129, 12, 1, 1]);

/// CA/Browser Forum domain validated, `2.23.140.1.2.1`.
pub const CABF_DOMAIN_VALIDATED: ConstOid
    = Oid(&[103, 129, 12, 1, 2, 1]);

/// CA/Browser Forum organization validated, `2.23.140.1.2.2`.
pub const CABF_ORGANIZATION_VALIDATED: ConstOid
    = Oid(&[103, 129, 12, 1, 2, 2]);

/// CA/Browser Forum individual validated, `2.23.140.1.2.3`.
pub const CABF_INDIVIDUAL_VALIDATED: ConstOid
    = Oid(&[103, 129, 12, 1, 2, 3]);

/// Policy qualifier `id-qt-cps`.
pub const QT_CPS: ConstOid = Oid(&[43, 6, 1, 5, 5, 7, 2, 1]);

/// Policy qualifier `id-qt-unotice`.
pub const QT_UNOTICE: ConstOid = Oid(&[43, 6, 1, 5, 5, 7, 2, 2]);

