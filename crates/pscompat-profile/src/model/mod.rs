//! Owned, mutable, cloneable descriptors.
//!
//! Every descriptor is plain data in a strict ownership tree. Optional
//! fields are `Option` and are omitted from documents when absent.

pub mod assembly;
pub mod command;
pub mod member;
pub mod module;
pub mod platform;
pub mod profile;
pub mod runtime;

pub use assembly::{AssemblyDescriptor, AssemblyNameDescriptor, AvailableTypes, NamespaceMap, TypeAcceleratorDescriptor};
pub use command::{
    CmdletDescriptor, FunctionDescriptor, NativeCommandDescriptor, NativeCommandMap, ParameterDescriptor,
    ParameterSetDescriptor,
};
pub use member::{
    ConstructorDescriptor, EventDescriptor, FieldDescriptor, IndexerDescriptor, MemberBag, MethodDescriptor,
    PropertyDescriptor, TypeDescriptor,
};
pub use module::{CommandKind, ModuleDescriptor};
pub use platform::{
    DotnetDescriptor, MachineDescriptor, OperatingSystemDescriptor, PlatformDescriptor, PowerShellDescriptor,
};
pub use profile::{CompatibilityReport, ProfileAggregate};
pub use runtime::CapabilitySurface;
