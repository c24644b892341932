//! Core services.
//!
//! Services orchestrate between ports and domain logic. They don't know
//! about concrete implementations.

mod resolver;

pub use resolver::{
    DependencyResolver, OutputDirStatus, Resolution, ResolveError, ResolverDeps,
};
