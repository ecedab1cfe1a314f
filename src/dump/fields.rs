//! Rendering of individual fields.
//!
//! Each function here renders one field of a certificate or certificate
//! request into a string. Functions that render a heading line return it
//! without indentation or line feed since these are provided by the
//! layout in the parent module. Extension bodies are complete lines
//! including their indentation.

use bcder::{ConstOid, Oid};
use log::{debug, warn};
use num_bigint::BigUint;
use crate::cert::TbsCert;
use crate::der::MalformedEncoding;
use crate::oid;
use crate::policy::QualifierValue;
use crate::util::hex;
use crate::x509::{Extension, KeyMaterial, Name, PublicKey};
use super::context::{Context, KeyInfo};
use super::fingerprint::{self, KEY_WIDTH, SIGNATURE_WIDTH};
use super::raw;


//------------ Label Tables --------------------------------------------------

const SIGNATURE_ALGORITHMS: &[(ConstOid, &str)] = &[
    (oid::MD2_WITH_RSA_ENCRYPTION, "md2WithRSAEncryption"),
    (oid::MD5_WITH_RSA_ENCRYPTION, "md5WithRSAEncryption"),
    (oid::SHA1_WITH_RSA_ENCRYPTION, "sha1WithRSAEncryption"),
    (oid::SHA256_WITH_RSA_ENCRYPTION, "sha256WithRSAEncryption"),
    (oid::SHA384_WITH_RSA_ENCRYPTION, "sha384WithRSAEncryption"),
    (oid::SHA512_WITH_RSA_ENCRYPTION, "sha512WithRSAEncryption"),
    (oid::DSA_WITH_SHA1, "dsaWithSHA1Encryption"),
    (oid::DSA_WITH_SHA256, "dsaWithSHA256Encryption"),
    (oid::ECDSA_WITH_SHA1, "ecdsaWithSHA1Encryption"),
    (oid::ECDSA_WITH_SHA256, "ecdsaWithSHA256Encryption"),
    (oid::ECDSA_WITH_SHA384, "ecdsaWithSHA384Encryption"),
    (oid::ECDSA_WITH_SHA512, "ecdsaWithSHA512Encryption"),
];

const PUBLIC_KEY_ALGORITHMS: &[(ConstOid, &str)] = &[
    (oid::RSA_ENCRYPTION, "rsaEncryption"),
    (oid::ID_DSA, "dsaEncryption"),
    (oid::EC_PUBLIC_KEY, "ecdsaEncryption"),
];

const EXTENDED_KEY_USAGES: &[(ConstOid, &str)] = &[
    (oid::ANY_EXTENDED_KEY_USAGE, "ExtKeyUsageAny"),
    (oid::KP_SERVER_AUTH, "TLS Web Server Authentication"),
    (oid::KP_CLIENT_AUTH, "TLS Web Client Authentication"),
    (oid::KP_CODE_SIGNING, "ExtKeyUsageCodeSigning"),
    (oid::KP_EMAIL_PROTECTION, "ExtKeyUsageEmailProtection"),
    (oid::KP_IPSEC_END_SYSTEM, "ExtKeyUsageIPSECEndSystem"),
    (oid::KP_IPSEC_TUNNEL, "ExtKeyUsageIPSECTunnel"),
    (oid::KP_IPSEC_USER, "ExtKeyUsageIPSECUser"),
    (oid::KP_TIME_STAMPING, "ExtKeyUsageTimeStamping"),
    (oid::KP_OCSP_SIGNING, "ExtKeyUsageOCSPSigning"),
    (
        oid::MS_SERVER_GATED_CRYPTO,
        "ExtKeyUsageMicrosoftServerGatedCrypto"
    ),
    (
        oid::NS_SERVER_GATED_CRYPTO,
        "ExtKeyUsageNetscapeServerGatedCrypto"
    ),
];

/// The key usage labels by bit, starting with bit 0.
const KEY_USAGES: [&str; 9] = [
    "Digital Signature",
    "Content Commitment",
    "Key Encipherment",
    "Data Encipherment",
    "Key Agreement",
    "Key Cert Signature",
    "CRL Signnature",
    "Encipher Only",
    "Decipher Only",
];

/// The name attributes shown with their short names, in order.
///
/// The common name is missing since it is treated specially.
const NAME_PARTS: &[(&str, ConstOid)] = &[
    ("C", oid::AT_COUNTRY_NAME),
    ("ST", oid::AT_STATE_OR_PROVINCE_NAME),
    ("L", oid::AT_LOCALITY_NAME),
    ("O", oid::AT_ORGANIZATION_NAME),
    ("OU", oid::AT_ORGANIZATIONAL_UNIT_NAME),
];

fn lookup<T: AsRef<[u8]>>(
    table: &[(ConstOid, &'static str)], id: &Oid<T>
) -> Option<&'static str> {
    table.iter().find(|(key, _)| key == id).map(|(_, label)| *label)
}


//------------ Basic Fields --------------------------------------------------

/// Renders the version.
///
/// `raw` is the version as encoded. Certificates display it one based
/// while requests show the encoded value.
pub fn version(ctx: &mut Context, raw: u8) -> String {
    let raw = u32::from(raw);
    let shown = if ctx.is_request() { raw } else { raw + 1 };
    ctx.set_version(shown);
    format!("Version: {} ({:#x})", shown, raw)
}

/// Renders the serial number.
///
/// How the serial number is shown depends on the version rendered before.
pub fn serial_number(ctx: &mut Context, serial: &[u8]) -> String {
    match ctx.version() {
        1 | 2 => {
            let mut res = format!(
                "Serial Number: {} (0x", BigUint::from_bytes_be(serial)
            );
            hex::write_plain(serial, &mut res);
            res.push(')');
            res
        }
        3 => {
            format!(
                "Serial Number:\n{}{}",
                ctx.indent(6), hex::colon_lower(serial)
            )
        }
        _ => "[unknown version]".into()
    }
}

pub fn signature_algorithm<T: AsRef<[u8]>>(id: &Oid<T>) -> String {
    format!(
        "Signature Algorithm: {}",
        lookup(SIGNATURE_ALGORITHMS, id).unwrap_or("[unknown algorithm]")
    )
}

pub fn issuer(name: &Name) -> String {
    format!("Issuer: {}", distinguished_name(name))
}

pub fn subject(name: &Name) -> String {
    format!("Subject: {}", distinguished_name(name))
}

/// Renders a name in the short `C=.., ST=.., CN=..` form.
pub fn distinguished_name(name: &Name) -> String {
    let mut parts = Vec::new();
    for (label, id) in NAME_PARTS {
        let value = name.values(id).collect::<Vec<_>>().join(",");
        if !value.is_empty() {
            parts.push(format!("{}={}", label, value))
        }
    }
    let mut common = String::from(
        name.values(&oid::AT_COMMON_NAME).last().unwrap_or("")
    );
    for email in name.values(&oid::EMAIL_ADDRESS) {
        common.push_str("/emailAddress=");
        common.push_str(email);
    }
    if !common.is_empty() {
        parts.push(format!("CN={}", common))
    }
    parts.join(", ")
}


//------------ Public Key ----------------------------------------------------

pub fn public_key_algorithm<T: AsRef<[u8]>>(id: &Oid<T>) -> String {
    format!(
        "Public Key Algorithm: {}",
        lookup(PUBLIC_KEY_ALGORITHMS, id)
            .unwrap_or("unknownPublicKeyAlgorithm")
    )
}

/// Renders the public key heading and remembers the key for later.
pub fn public_key(ctx: &mut Context, key: &PublicKey) -> String {
    let info = match *key.material() {
        KeyMaterial::Rsa { ref modulus, exponent } => {
            KeyInfo { family: "RSA", value: modulus.clone(), exponent }
        }
        KeyMaterial::Dsa { ref public } => {
            KeyInfo { family: "DSA", value: public.clone(), exponent: 0 }
        }
        KeyMaterial::Ec => {
            warn!("Elliptic curve keys are not supported.");
            KeyInfo { family: "[unsupported]", ..Default::default() }
        }
        KeyMaterial::Unknown => {
            warn!("Unknown public key algorithm {}.", key.algorithm());
            KeyInfo { family: "[unknown]", ..Default::default() }
        }
    };
    let res = if ctx.is_request() {
        format!("Public-Key: ({} bit)", info.bits())
    }
    else {
        format!("{} Public Key: ({} bit)", info.family, info.bits())
    };
    ctx.set_key(info);
    res
}

/// Renders the modulus of the key remembered by [`public_key`].
pub fn public_key_modulus(ctx: &mut Context) -> String {
    let value = ctx.key().value.clone();
    let dump = fingerprint::multiline(
        ctx.indent(10), KEY_WIDTH, &value, Some(0)
    );
    if ctx.is_request() {
        format!("Modulus:\n{}", dump)
    }
    else {
        format!("Modulus ({} bit):\n{}", ctx.key().bits(), dump)
    }
}

/// Renders the exponent of the key remembered by [`public_key`].
///
/// Both the decimal and the hex form show the exponent of the key. Keys
/// without an exponent show zero.
pub fn public_key_exponent(ctx: &Context) -> String {
    let exponent = ctx.key().exponent;
    format!("Exponent: {} ({:#x})", exponent, exponent)
}

/// Renders the encoded attributes of a certificate request.
///
/// The octets are wrapped like a signature. There is no line feed at the
/// end.
pub fn attributes(ctx: &mut Context, data: &[u8]) -> String {
    fingerprint::multiline(ctx.indent(6), SIGNATURE_WIDTH, data, None)
}

/// Renders the signature octets.
///
/// The result starts with a line feed.
pub fn signature(ctx: &mut Context, signature: &[u8]) -> String {
    format!(
        "\n{}",
        fingerprint::multiline(
            ctx.indent(4), SIGNATURE_WIDTH, signature, None
        )
    )
}


//------------ Extensions ----------------------------------------------------

/// Renders the label of the extensions section.
///
/// The result is empty if there are no extensions and starts with a line
/// feed otherwise.
pub fn extensions_label(
    ctx: &mut Context, extensions: &[Extension]
) -> String {
    if extensions.is_empty() {
        String::new()
    }
    else {
        format!("\n{}X509v3 extensions:", ctx.indent(4))
    }
}

/// Renders a single extension of a certificate.
///
/// The result starts with a line feed followed by the heading of the
/// extension on its own line and the body.
pub fn extension(
    ctx: &mut Context, cert: &TbsCert, ext: &Extension
) -> Result<String, MalformedEncoding> {
    let id = ext.id();
    let (heading, body) = if id == &oid::CE_SUBJECT_ALT_NAME {
        (
            String::from("X509v3 Subject Alternative Name:"),
            subject_alt_name(ctx, cert)
        )
    }
    else if id == &oid::CE_BASIC_CONSTRAINTS {
        ("X509v3 Basic Constraints:".into(), basic_constraints(ctx, cert))
    }
    else if id == &oid::CE_KEY_USAGE {
        (
            format!(
                "X509v3 Key Usage:{}",
                if ext.is_critical() { " critical" } else { "" }
            ),
            key_usage(ctx, cert.key_usage())
        )
    }
    else if id == &oid::CE_SUBJECT_KEY_IDENTIFIER {
        (
            "X509v3 Subject Key Identifier:".into(),
            subject_key_identifier(ctx, cert)
        )
    }
    else if id == &oid::CE_AUTHORITY_KEY_IDENTIFIER {
        (
            "X509v3 Authority Key Identifier:".into(),
            authority_key_identifier(ctx, cert)
        )
    }
    else if id == &oid::CE_CRL_DISTRIBUTION_POINTS {
        (
            "X509v3 CRL Distribution Points:".into(),
            crl_distribution_points(ctx, cert)
        )
    }
    else if id == &oid::CE_EXTENDED_KEY_USAGE {
        (
            "X509v3 Extended Key Usage:".into(),
            extended_key_usage(ctx, cert.extended_key_usage())
        )
    }
    else if id == &oid::CE_CERTIFICATE_POLICIES {
        (
            "X509v3 Certificate Policies:".into(),
            certificate_policies(ctx, ext.value())?
        )
    }
    else if id == &oid::PE_AUTHORITY_INFO_ACCESS {
        (
            "Authority Information Access:".into(),
            authority_info_access(ctx, cert)
        )
    }
    else {
        debug!("Rendering extension {} as raw text.", id);
        (format!("{}:", id), raw::render(ext.value())?)
    };
    Ok(format!("\n{}{}\n{}", ctx.indent(6), heading, body))
}

fn subject_alt_name(ctx: &mut Context, cert: &TbsCert) -> String {
    let indent = ctx.indent(8);
    let mut lines = Vec::new();
    for name in cert.dns_names() {
        lines.push(format!("{}DNS:{}", indent, name))
    }
    for email in cert.email_addresses() {
        lines.push(format!("{}EMAIL:{}", indent, email))
    }
    for addr in cert.ip_addresses() {
        lines.push(format!("{}IPADDRESS:{}", indent, addr))
    }
    for uri in cert.uris() {
        lines.push(format!("{}URI:{}", indent, uri))
    }
    lines.join("\n")
}

fn basic_constraints(ctx: &mut Context, cert: &TbsCert) -> String {
    format!(
        "{}CA:{}",
        ctx.indent(8), if cert.is_ca() { "TRUE" } else { "FALSE" }
    )
}

fn key_usage(ctx: &mut Context, bits: u16) -> String {
    let labels: Vec<_> = KEY_USAGES.iter().enumerate().filter_map(
        |(bit, label)| {
            if bits & (1 << bit) != 0 { Some(*label) }
            else { None }
        }
    ).collect();
    if labels.is_empty() {
        String::new()
    }
    else {
        format!("{}{}", ctx.indent(8), labels.join(", "))
    }
}

fn subject_key_identifier(ctx: &mut Context, cert: &TbsCert) -> String {
    format!(
        "{}{}",
        ctx.indent(8),
        hex::colon_upper(
            cert.subject_key_identifier().map_or(&[][..], AsRef::as_ref)
        )
    )
}

fn authority_key_identifier(ctx: &mut Context, cert: &TbsCert) -> String {
    format!(
        "{}keyid:{}\n",
        ctx.indent(8),
        hex::colon_upper(
            cert.authority_key_identifier().map_or(&[][..], AsRef::as_ref)
        )
    )
}

fn crl_distribution_points(ctx: &mut Context, cert: &TbsCert) -> String {
    let label = format!("{}URI:", ctx.indent(8));
    let separator = format!("\n{}", label);
    let mut res = label;
    res.push_str(&cert.crl_uris().join(separator.as_str()));
    res.push('\n');
    res
}

fn extended_key_usage<T: AsRef<[u8]>>(
    ctx: &mut Context, usages: &[Oid<T>]
) -> String {
    if usages.is_empty() {
        return String::new()
    }
    let labels: Vec<_> = usages.iter().map(|id| {
        lookup(EXTENDED_KEY_USAGES, id).unwrap_or("unknown")
    }).collect();
    format!("{}{}", ctx.indent(8), labels.join(", "))
}

fn authority_info_access(ctx: &mut Context, cert: &TbsCert) -> String {
    let indent = ctx.indent(8);
    let mut lines = Vec::new();
    if !cert.ocsp_uris().is_empty() {
        lines.push(format!(
            "{}OCSP - URI:{}", indent, cert.ocsp_uris().join(", ")
        ))
    }
    if !cert.ca_issuer_uris().is_empty() {
        lines.push(format!(
            "{}CA Issuers - URI:{}", indent, cert.ca_issuer_uris().join(", ")
        ))
    }
    let mut res = lines.join("\n");
    res.push('\n');
    res
}

/// Renders the certificate policies extension.
///
/// The value is walked into the policy of the context first. The policy
/// is then rendered in full, including anything collected earlier from
/// other policy extensions of the same certificate.
pub fn certificate_policies(
    ctx: &mut Context, value: &[u8]
) -> Result<String, MalformedEncoding> {
    ctx.policy_mut().walk(value)?;
    let policy_indent = ctx.indent(8).to_string();
    let qualifier_indent = ctx.indent(9).to_string();
    let text_indent = ctx.indent(10).to_string();
    let policy = ctx.policy();
    let mut lines = Vec::new();
    for (kind, value) in policy.qualifiers() {
        let mut line = format!("{}{}:", qualifier_indent, kind.label());
        match *value {
            QualifierValue::Single(ref text) => {
                line.push(' ');
                line.push_str(text);
            }
            QualifierValue::Multi(ref texts) => {
                for text in texts {
                    line.push('\n');
                    line.push_str(&text_indent);
                    line.push_str("Explicit Text: ");
                    line.push_str(text);
                }
            }
        }
        lines.push(line);
    }
    Ok(format!(
        "{}Policy: {}\n{}\n", policy_indent, policy.id(), lines.join("\n")
    ))
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;
    use bcder::Mode;
    use bytes::Bytes;
    use crate::cert::Cert;
    use crate::pem;
    use super::super::context::ObjectKind;

    fn cert(data: &[u8]) -> Cert {
        Cert::decode(pem::parse(data).unwrap().remove(0).into_data()).unwrap()
    }

    fn full() -> Cert {
        cert(include_bytes!("../../test-data/full.crt"))
    }

    fn simple() -> Cert {
        cert(include_bytes!("../../test-data/simple.crt"))
    }

    fn lines(items: &[&str]) -> String {
        items.iter().map(|item| format!("{}{}", " ".repeat(16), item))
            .collect::<Vec<_>>().join("\n")
    }

    fn name(data: &[u8]) -> Name {
        Mode::Der.decode(data, Name::take_from).unwrap()
    }

    #[test]
    fn versions() {
        let mut ctx = Context::new(ObjectKind::Certificate, 0);
        assert_eq!(version(&mut ctx, 2), "Version: 3 (0x2)");
        assert_eq!(ctx.version(), 3);

        let mut ctx = Context::new(ObjectKind::Request, 0);
        assert_eq!(version(&mut ctx, 0), "Version: 0 (0x0)");
    }

    #[test]
    fn serial_numbers() {
        let mut ctx = Context::new(ObjectKind::Certificate, 0);
        version(&mut ctx, 2);
        assert_eq!(
            serial_number(&mut ctx, b"\x90\xda\x29\x41\xf7\x70\xc5\xce"),
            "Serial Number:\n            90:da:29:41:f7:70:c5:ce"
        );
        version(&mut ctx, 0);
        assert_eq!(
            serial_number(&mut ctx, b"\x01\x00"),
            "Serial Number: 256 (0x0100)"
        );
        version(&mut ctx, 1);
        assert_eq!(
            serial_number(&mut ctx, b"\x90\xda\x29\x41\xf7\x70\xc5\xce"),
            "Serial Number: 10437700449685521870 (0x90da2941f770c5ce)"
        );
        version(&mut ctx, 7);
        assert_eq!(serial_number(&mut ctx, b"\x01"), "[unknown version]");
    }

    #[test]
    fn long_serial_numbers() {
        let mut ctx = Context::new(ObjectKind::Certificate, 0);
        version(&mut ctx, 0);
        assert_eq!(
            serial_number(&mut ctx, &[0xff; 16]),
            "Serial Number: 340282366920938463463374607431768211455 \
             (0xffffffffffffffffffffffffffffffff)"
        );
        assert_eq!(serial_number(&mut ctx, b""), "Serial Number: 0 (0x)");
        assert_eq!(
            serial_number(&mut ctx, b"\x00\x09"),
            "Serial Number: 9 (0x0009)"
        );
    }

    #[test]
    fn algorithms() {
        assert_eq!(
            signature_algorithm(&oid::SHA384_WITH_RSA_ENCRYPTION),
            "Signature Algorithm: sha384WithRSAEncryption"
        );
        assert_eq!(
            signature_algorithm(&oid::CE_KEY_USAGE),
            "Signature Algorithm: [unknown algorithm]"
        );
        assert_eq!(
            public_key_algorithm(&oid::ID_DSA),
            "Public Key Algorithm: dsaEncryption"
        );
        assert_eq!(
            public_key_algorithm(&oid::CE_KEY_USAGE),
            "Public Key Algorithm: unknownPublicKeyAlgorithm"
        );
    }

    #[test]
    fn names() {
        // CN=first, C=US, C=CA, CN=second, emailAddress=a@b, L=
        let data = b"\x30\x5a\
            \x31\x0e\x30\x0c\x06\x03\x55\x04\x03\x0c\x05first\
            \x31\x0b\x30\x09\x06\x03\x55\x04\x06\x13\x02US\
            \x31\x0b\x30\x09\x06\x03\x55\x04\x06\x13\x02CA\
            \x31\x0f\x30\x0d\x06\x03\x55\x04\x03\x0c\x06second\
            \x31\x12\x30\x10\x06\x09\x2a\x86\x48\x86\xf7\x0d\x01\x09\x01\
                \x16\x03a@b\
            \x31\x09\x30\x07\x06\x03\x55\x04\x07\x0c\x00";
        assert_eq!(
            subject(&name(data)),
            "Subject: C=US,CA, CN=second/emailAddress=a@b"
        );
        assert_eq!(issuer(&name(b"\x30\x00")), "Issuer: ");
    }

    #[test]
    fn public_keys() {
        let mut ctx = Context::new(ObjectKind::Request, 0);
        ctx.set_key(KeyInfo {
            family: "RSA",
            value: Bytes::from_static(b"\xbf\x01"),
            exponent: 3
        });
        assert_eq!(
            public_key_modulus(&mut ctx),
            format!("Modulus:\n{}00:bf:01", " ".repeat(20))
        );
        assert_eq!(public_key_exponent(&ctx), "Exponent: 3 (0x3)");

        let mut ctx = Context::new(ObjectKind::Certificate, 0);
        assert_eq!(
            public_key_modulus(&mut ctx),
            format!("Modulus (0 bit):\n{}00", " ".repeat(20))
        );
        assert_eq!(public_key_exponent(&ctx), "Exponent: 0 (0x0)");
    }

    #[test]
    fn key_usages() {
        let mut ctx = Context::new(ObjectKind::Certificate, 0);
        assert_eq!(
            key_usage(&mut ctx, 0b1_0100_0000),
            format!("{}CRL Signnature, Decipher Only", " ".repeat(16))
        );
        assert_eq!(key_usage(&mut ctx, 0), "");
    }

    #[test]
    fn extended_key_usages() {
        let mut ctx = Context::new(ObjectKind::Certificate, 0);
        assert_eq!(
            extended_key_usage(
                &mut ctx, &[oid::KP_CODE_SIGNING, oid::CE_KEY_USAGE]
            ),
            format!("{}ExtKeyUsageCodeSigning, unknown", " ".repeat(16))
        );
        assert_eq!(
            extended_key_usage::<&[u8]>(&mut ctx, &[]), ""
        );
    }

    #[test]
    fn policies_accumulate() {
        // SEQUENCE { SEQUENCE { anyPolicy, SEQUENCE { SEQUENCE {
        //     id-qt-unotice, SEQUENCE { UTF8String "n" } } } } }
        let value = b"\x30\x1c\x30\x1a\x06\x04\x55\x1d\x20\x00\
            \x30\x12\x30\x10\x06\x08\x2b\x06\x01\x05\x05\x07\x02\x02\
            \x30\x04\x0c\x02no";
        let mut ctx = Context::new(ObjectKind::Certificate, 0);
        let first = certificate_policies(&mut ctx, value).unwrap();
        assert_eq!(
            first,
            format!(
                "{}Policy: 2.5.29.32.0\n\
                 {}User Notice:\n\
                 {}Explicit Text: no\n",
                " ".repeat(16), " ".repeat(18), " ".repeat(20)
            )
        );
        let second = certificate_policies(&mut ctx, value).unwrap();
        assert_eq!(second.matches("Explicit Text: no").count(), 2);
        assert!(certificate_policies(&mut ctx, b"\x30\x05").is_err());
    }

    #[test]
    fn attribute_octets() {
        let mut ctx = Context::new(ObjectKind::Request, 0);
        assert_eq!(
            attributes(&mut ctx, b"\xa0\x00"),
            format!("{}a0:00", " ".repeat(12))
        );

        let data: Vec<u8> = (0..40).collect();
        let text = attributes(&mut ctx, &data);
        let text: Vec<_> = text.split('\n').collect();
        assert_eq!(text.len(), 3);
        assert!(text[0].starts_with("            00:01:02:"));
        assert_eq!(text[2], "            24:25:26:27");
    }

    #[test]
    fn subject_alt_names() {
        let mut ctx = Context::new(ObjectKind::Certificate, 0);
        assert_eq!(
            subject_alt_name(&mut ctx, &full()),
            lines(&[
                "DNS:www.example.com",
                "DNS:example.com",
                "EMAIL:hostmaster@example.com",
                "IPADDRESS:192.0.2.7",
                "IPADDRESS:2001:db8::1",
                "URI:https://example.com/",
            ])
        );
        assert_eq!(subject_alt_name(&mut ctx, &simple()), "");

        let ext = Extension::new(
            Oid(Bytes::from_static(oid::CE_SUBJECT_ALT_NAME.0)), false,
            Bytes::from_static(b"\x30\x00")
        );
        assert_eq!(
            extension(&mut ctx, &simple(), &ext).unwrap(),
            format!(
                "\n{}X509v3 Subject Alternative Name:\n", " ".repeat(12)
            )
        );
    }

    #[test]
    fn key_identifiers() {
        let mut ctx = Context::new(ObjectKind::Certificate, 0);
        let keyid = "BA:7F:52:49:97:69:A5:5F:ED:B8:8E:75:5E:0D:99:05:04:3C:\
                     5D:9B";
        assert_eq!(
            subject_key_identifier(&mut ctx, &simple()), lines(&[keyid])
        );
        assert_eq!(
            authority_key_identifier(&mut ctx, &simple()),
            format!("{}\n", lines(&[format!("keyid:{}", keyid).as_str()]))
        );
        assert_eq!(
            authority_key_identifier(&mut ctx, &full()),
            format!("{}\n", lines(&["keyid:"]))
        );
    }

    #[test]
    fn access_uris() {
        let mut ctx = Context::new(ObjectKind::Certificate, 0);
        let full = full();
        assert_eq!(
            crl_distribution_points(&mut ctx, &full),
            format!("{}\n", lines(&["URI:http://crl.example.com/ca.crl"]))
        );
        assert_eq!(
            authority_info_access(&mut ctx, &full),
            format!(
                "{}\n",
                lines(&[
                    "OCSP - URI:http://ocsp.example.com/",
                    "CA Issuers - URI:http://ca.example.com/ca.crt",
                ])
            )
        );

        let ext = full.extensions().iter().find(|ext| {
            ext.id() == &oid::CE_CRL_DISTRIBUTION_POINTS
        }).unwrap();
        assert_eq!(
            extension(&mut ctx, &full, ext).unwrap(),
            format!(
                "\n{}X509v3 CRL Distribution Points:\n{}\n",
                " ".repeat(12), lines(&["URI:http://crl.example.com/ca.crl"])
            )
        );
    }
}
