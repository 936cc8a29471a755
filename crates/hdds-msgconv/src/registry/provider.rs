// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Record class providers.
//!
//! A provider locates type definitions in three stages, each of which can
//! fail on its own: the package manifest, the `msg`/`srv` submodule, and the
//! named definition inside it. [`TypeRegistry`](super::TypeRegistry) maps
//! each stage's failure to its own [`ConversionError`](crate::ConversionError)
//! kind.

use crate::error::BoxError;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Message or service definitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeFamily {
    Message,
    Service,
}

impl TypeFamily {
    /// Submodule (directory) name: `msg` or `srv`.
    pub fn submodule(&self) -> &'static str {
        match self {
            Self::Message => "msg",
            Self::Service => "srv",
        }
    }

    /// Definition file extension, without the dot.
    pub fn extension(&self) -> &'static str {
        self.submodule()
    }
}

impl fmt::Display for TypeFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.submodule())
    }
}

/// A loaded package manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageManifest {
    pub name: String,
    /// Package directory; `None` for in-memory or built-in packages.
    pub location: Option<PathBuf>,
}

/// An imported `msg`/`srv` submodule of a package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinitionModule {
    pub package: String,
    pub family: TypeFamily,
    /// Submodule directory; `None` for in-memory or built-in modules.
    pub location: Option<PathBuf>,
}

/// Source of record type definitions.
pub trait ClassProvider: Send + Sync {
    /// Locate and load the manifest of `package`.
    fn load_manifest(&self, package: &str) -> Result<PackageManifest, BoxError>;

    /// Import the submodule holding definitions of `family`.
    fn import_module(
        &self,
        manifest: &PackageManifest,
        family: TypeFamily,
    ) -> Result<DefinitionModule, BoxError>;

    /// Fetch the definition text of `name` from an imported submodule.
    fn lookup_definition(&self, module: &DefinitionModule, name: &str) -> Result<String, BoxError>;
}

/// Errors produced by the bundled providers.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("package {package} not found (searched {searched} roots)")]
    PackageNotFound { package: String, searched: usize },

    #[error("package {package} has no {family} submodule")]
    ModuleNotFound { package: String, family: TypeFamily },

    #[error("{family} submodule of {package} has no definition {name}")]
    DefinitionNotFound {
        package: String,
        family: TypeFamily,
        name: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
