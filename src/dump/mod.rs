//! Rendering PEM blocks as text.
//!
//! The [`Dumper`] renders all the PEM blocks found in some input into a
//! text that closely resembles what OpenSSL prints with its `-text`
//! option. The [`dump`] function is a shortcut for rendering a single
//! input with a fresh dumper.
//!
//! Blocks are rendered in the order they appear. Certificates, certificate
//! requests, and private keys are rendered in full. Blocks of any other
//! type are rendered as a single line of debugging output. Blocks rendered
//! in full are followed by a line of dashes unless they are the last block.
//! The text ends with a line `done.`.
//!
//! The text is assembled in memory. If anything goes wrong along the way,
//! only the error is returned.

pub use self::context::{Context, KeyInfo, ObjectKind};

pub mod context;
pub mod fields;
pub mod fingerprint;
pub mod raw;

use log::{debug, warn};
use crate::cert::Cert;
use crate::csr::Csr;
use crate::error::DumpError;
use crate::key::PrivateKey;
use crate::pem;
use self::fingerprint::KEY_WIDTH;


/// The line between two blocks.
const RULE: &str =
    "-----------------------------------------------------------------";

/// The margin of the modulus of a private key.
const PRIVATE_KEY_MARGIN: &str = "          ";


//------------ dump ----------------------------------------------------------

/// Renders all PEM blocks in `input`.
pub fn dump(input: &[u8]) -> Result<String, DumpError> {
    Dumper::new().dump(input)
}


//------------ Dumper --------------------------------------------------------

/// Renders PEM blocks as text.
///
/// Certificates and certificate requests are numbered in the order they
/// are rendered, starting from zero. The numbering continues if the same
/// dumper is used for more than one input.
#[derive(Clone, Debug, Default)]
pub struct Dumper {
    /// The index of the next certificate or request.
    next_index: usize,
}

impl Dumper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders all PEM blocks in `input`.
    pub fn dump(&mut self, input: &[u8]) -> Result<String, DumpError> {
        let blocks = pem::parse(input)?;
        let mut target = String::new();
        for (i, block) in blocks.iter().enumerate() {
            let rendered = self.dump_block(block, &mut target).map_err(|err| {
                err.in_block(block.label())
            })?;
            if rendered && i + 1 < blocks.len() {
                target.push_str(RULE);
                target.push('\n');
            }
        }
        target.push_str("done.\n");
        Ok(target)
    }

    /// Renders a single block.
    ///
    /// Returns whether the block was of a known type.
    fn dump_block(
        &mut self, block: &pem::Block, target: &mut String
    ) -> Result<bool, DumpError> {
        debug!("Rendering '{}' block.", block.label());
        match block.label() {
            "CERTIFICATE" => {
                for cert in Cert::decode_all(block.data().clone())? {
                    self.dump_cert(&cert, target)?;
                }
            }
            "CERTIFICATE REQUEST" => {
                let csr = Csr::decode(block.data().clone())?;
                self.dump_csr(&csr, target);
            }
            "PRIVATE KEY" => {
                let key = PrivateKey::decode_pkcs8(block.data().clone())?;
                dump_private_key(&key, target);
            }
            "RSA PRIVATE KEY" => {
                let key = PrivateKey::decode_pkcs1(block.data().clone())?;
                dump_private_key(&key, target);
            }
            label => {
                warn!("Unknown PEM block type '{}'.", label);
                target.push_str(&format!("{:?}\n", block));
                return Ok(false)
            }
        }
        Ok(true)
    }

    fn take_index(&mut self) -> usize {
        let res = self.next_index;
        self.next_index += 1;
        res
    }

    fn dump_cert(
        &mut self, cert: &Cert, target: &mut String
    ) -> Result<(), DumpError> {
        let index = self.take_index();
        let mut ctx = Context::new(ObjectKind::Certificate, index);
        debug!("Rendering certificate {}.", ctx.index());
        let validity = cert.validity();

        target.push_str("Certificate:\n");
        target.push_str("    Data:\n");
        push_line(target, 8, &fields::version(&mut ctx, cert.version()));
        push_line(
            target, 8,
            &fields::serial_number(&mut ctx, cert.serial_number())
        );
        push_line(
            target, 8, &fields::signature_algorithm(cert.signature_algorithm())
        );
        push_line(target, 8, &fields::issuer(cert.issuer()));
        push_line(target, 8, "Validity");
        push_line(
            target, 12, &format!("Not Before: {}", validity.not_before())
        );
        push_line(
            target, 12, &format!("Not After : {}", validity.not_after())
        );
        push_line(target, 8, &fields::subject(cert.subject()));
        push_line(target, 8, "Subject Public Key Info:");
        push_line(
            target, 12,
            &fields::public_key_algorithm(
                cert.subject_public_key_info().algorithm()
            )
        );
        push_line(
            target, 12,
            &fields::public_key(&mut ctx, cert.subject_public_key_info())
        );
        push_line(target, 16, &fields::public_key_modulus(&mut ctx));
        push_indent(target, 16);
        target.push_str(&fields::public_key_exponent(&ctx));

        target.push_str(
            &fields::extensions_label(&mut ctx, cert.extensions())
        );
        for ext in cert.extensions() {
            target.push_str(&fields::extension(&mut ctx, cert, ext)?);
        }

        target.push('\n');
        push_indent(target, 4);
        target.push_str(
            &fields::signature_algorithm(cert.signature_algorithm())
        );
        target.push_str(&fields::signature(&mut ctx, cert.signature()));
        target.push('\n');
        Ok(())
    }

    fn dump_csr(&mut self, csr: &Csr, target: &mut String) {
        let index = self.take_index();
        let mut ctx = Context::new(ObjectKind::Request, index);
        debug!("Rendering certificate request {}.", ctx.index());

        target.push_str("Certificate Request:\n");
        target.push_str("    Data:\n");
        push_line(target, 8, &fields::version(&mut ctx, csr.version()));
        push_line(target, 8, &fields::subject(csr.subject()));
        push_line(target, 8, "Subject Public Key Info:");
        push_line(
            target, 12,
            &fields::public_key_algorithm(csr.public_key().algorithm())
        );
        push_line(target, 16, &fields::public_key(&mut ctx, csr.public_key()));
        push_line(target, 16, &fields::public_key_modulus(&mut ctx));
        push_line(target, 16, &fields::public_key_exponent(&ctx));
        push_line(target, 8, "Attributes:");
        target.push_str(
            &fields::attributes(&mut ctx, csr.attributes().as_slice())
        );
        target.push('\n');
        push_indent(target, 4);
        target.push_str(
            &fields::signature_algorithm(csr.signature_algorithm())
        );
        target.push_str(&fields::signature(&mut ctx, csr.signature()));
        target.push('\n');
    }
}


//------------ Helper Functions ----------------------------------------------

fn dump_private_key(key: &PrivateKey, target: &mut String) {
    target.push_str("Private Key:\n");
    match *key {
        PrivateKey::Rsa(ref key) => {
            let modulus = key.modulus();
            target.push_str(
                &format!("Modulus ({} bit):\n", modulus.len() * 8)
            );
            target.push_str(&fingerprint::multiline(
                PRIVATE_KEY_MARGIN, KEY_WIDTH, modulus, Some(0)
            ));
        }
        PrivateKey::Unsupported(ref algorithm) => {
            warn!("Unsupported private key algorithm {}.", algorithm);
            target.push_str("[unsupported]");
        }
    }
    target.push('\n');
}

fn push_indent(target: &mut String, spaces: usize) {
    target.extend(std::iter::repeat(' ').take(spaces));
}

fn push_line(target: &mut String, spaces: usize, line: &str) {
    push_indent(target, spaces);
    target.push_str(line);
    target.push('\n');
}


//============ Tests =========================================================
