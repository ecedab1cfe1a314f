//! Rendering PEM-encoded objects as text.
//!
//! This crate reads PEM-encoded X.509 certificates, certificate requests,
//! and RSA private keys and renders them as a human readable text similar
//! to what the `openssl` command line tool prints with its `-text` option.
//!
//! The objects themselves live in [`cert`], [`csr`], and [`key`]. They are
//! decoded from DER using the [bcder] crate. The rendering happens in
//! [`dump`] with [`dump::dump`] as the main entry point.
//!
//! A command line tool `pemdump` is available when the `cli` feature is
//! enabled, which it is by default.
//!
//! [bcder]: https://docs.rs/bcder/

pub use self::dump::{dump, Dumper};
pub use self::error::DumpError;

pub mod cert;
pub mod csr;
pub mod der;
pub mod dump;
pub mod error;
pub mod key;
pub mod oid;
pub mod pem;
pub mod policy;
pub mod util;
pub mod x509;
