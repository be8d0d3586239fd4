//! Interface extraction: host metadata in, immutable descriptor out.

mod descriptor;
mod extractor;
mod metadata;

pub use descriptor::{InterfaceDescriptor, MemberDescriptor, ParameterDescriptor};
pub use extractor::extract;
pub use metadata::{
    DelegateSignature, EventMetadata, InterfaceMetadata, MethodMetadata, ParamMetadata,
};
