//! Descriptor fingerprints with Blake3 hashing.
//!
//! The fingerprint of a descriptor is the hash of its canonical
//! `serde_json` byte form. Structural equality of descriptors implies
//! fingerprint equality, which is what the emission cache keys on.

use crate::errors::Result;
use crate::features::extraction::InterfaceDescriptor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    pub fn compute(bytes: &[u8]) -> Self {
        Self(*blake3::hash(bytes).as_bytes())
    }

    pub fn of_descriptor(descriptor: &InterfaceDescriptor) -> Result<Self> {
        let canonical = serde_json::to_vec(descriptor)?;
        Ok(Self::compute(&canonical))
    }

    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }
}
