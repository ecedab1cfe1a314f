//! The state kept while rendering a single object.

use std::collections::HashMap;
use std::collections::hash_map;
use bytes::Bytes;
use crate::policy::Policy;


//------------ ObjectKind ----------------------------------------------------

/// The kind of object being rendered.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ObjectKind {
    Certificate,
    Request,
}


//------------ KeyInfo -------------------------------------------------------

/// What has been learned about the public key of the object.
#[derive(Clone, Debug, Default)]
pub struct KeyInfo {
    /// The name of the key family.
    pub family: &'static str,

    /// The modulus or public value.
    pub value: Bytes,

    /// The public exponent of RSA keys, zero otherwise.
    pub exponent: u64,
}

impl KeyInfo {
    /// Returns the size of the key in bits.
    pub fn bits(&self) -> usize {
        self.value.len() * 8
    }
}


//------------ Context -------------------------------------------------------

/// The state of rendering a certificate or certificate request.
///
/// A new context is created for every object and dropped once the object
/// has been rendered. Nothing in it carries over to the next object.
#[derive(Debug)]
pub struct Context {
    kind: ObjectKind,

    /// The index of the object within the render run.
    index: usize,

    /// The version as displayed.
    version: u32,

    /// Indentation strings by level.
    indents: HashMap<usize, String>,

    key: KeyInfo,

    /// The certificate policies collected so far.
    policy: Policy,
}

impl Context {
    pub fn new(kind: ObjectKind, index: usize) -> Self {
        Context {
            kind,
            index,
            version: 0,
            indents: HashMap::new(),
            key: KeyInfo::default(),
            policy: Policy::default(),
        }
    }

    pub fn is_request(&self) -> bool {
        self.kind == ObjectKind::Request
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn set_version(&mut self, version: u32) {
        self.version = version
    }

    /// Returns the white space for the given indentation level.
    ///
    /// Each level is two spaces.
    pub fn indent(&mut self, level: usize) -> &str {
        match self.indents.entry(level) {
            hash_map::Entry::Occupied(entry) => entry.into_mut(),
            hash_map::Entry::Vacant(entry) => {
                entry.insert("  ".repeat(level))
            }
        }
    }

    pub fn key(&self) -> &KeyInfo {
        &self.key
    }

    pub fn set_key(&mut self, key: KeyInfo) {
        self.key = key
    }

    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    pub fn policy_mut(&mut self) -> &mut Policy {
        &mut self.policy
    }
}


//============ Tests =========================================================
