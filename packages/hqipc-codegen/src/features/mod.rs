//! Feature slices: extraction → naming → emission, plus diagnostics.

pub mod diagnostics;
pub mod emission;
pub mod extraction;
pub mod naming;
