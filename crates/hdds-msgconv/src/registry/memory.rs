// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! In-memory provider for embedded definitions and tests.

use super::builtin;
use super::provider::{
    ClassProvider, DefinitionModule, PackageManifest, ProviderError, TypeFamily,
};
use crate::error::{BoxError, Result};
use crate::types::TypeName;
use std::collections::HashMap;

/// package -> type name -> definition text
type PackageTable = HashMap<String, HashMap<String, String>>;

/// Provider holding definition texts in memory.
///
/// # Example
///
/// ```rust
/// use hdds_msgconv::registry::{MemoryProvider, TypeRegistry};
/// use std::sync::Arc;
///
/// let provider = MemoryProvider::with_builtins()
///     .with_message("demo_msgs/Reading", "Header header\nfloat64 value\n")
///     .unwrap();
/// let registry = TypeRegistry::new(Arc::new(provider));
/// let desc = registry.resolve_message_type("demo_msgs/Reading").unwrap();
/// assert_eq!(desc.fields()[0].type_string, "std_msgs/Header");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryProvider {
    messages: PackageTable,
    services: PackageTable,
}

impl MemoryProvider {
    /// Create an empty provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a provider preloaded with the built-in definitions.
    pub fn with_builtins() -> Self {
        let mut provider = Self::new();
        for family in [TypeFamily::Message, TypeFamily::Service] {
            for (name, text) in builtin::definitions(family) {
                if let Ok(type_name) = TypeName::parse(name) {
                    provider.insert(family, &type_name, text);
                }
            }
        }
        provider
    }

    /// Add a message definition (builder style).
    pub fn with_message(mut self, typestring: &str, text: &str) -> Result<Self> {
        self.insert_message(typestring, text)?;
        Ok(self)
    }

    /// Add a service definition (builder style).
    pub fn with_service(mut self, typestring: &str, text: &str) -> Result<Self> {
        self.insert_service(typestring, text)?;
        Ok(self)
    }

    /// Add or replace a message definition.
    pub fn insert_message(&mut self, typestring: &str, text: &str) -> Result<()> {
        let type_name = TypeName::parse(typestring)?;
        self.insert(TypeFamily::Message, &type_name, text);
        Ok(())
    }

    /// Add or replace a service definition.
    pub fn insert_service(&mut self, typestring: &str, text: &str) -> Result<()> {
        let type_name = TypeName::parse(typestring)?;
        self.insert(TypeFamily::Service, &type_name, text);
        Ok(())
    }

    /// Number of definitions of `family`.
    pub fn len(&self, family: TypeFamily) -> usize {
        self.table(family).values().map(HashMap::len).sum()
    }

    fn insert(&mut self, family: TypeFamily, type_name: &TypeName, text: &str) {
        let table = match family {
            TypeFamily::Message => &mut self.messages,
            TypeFamily::Service => &mut self.services,
        };
        table
            .entry(type_name.package().to_string())
            .or_default()
            .insert(type_name.name().to_string(), text.to_string());
    }

    fn table(&self, family: TypeFamily) -> &PackageTable {
        match family {
            TypeFamily::Message => &self.messages,
            TypeFamily::Service => &self.services,
        }
    }
}

impl ClassProvider for MemoryProvider {
    fn load_manifest(&self, package: &str) -> Result<PackageManifest, BoxError> {
        if self.messages.contains_key(package) || self.services.contains_key(package) {
            Ok(PackageManifest {
                name: package.to_string(),
                location: None,
            })
        } else {
            Err(ProviderError::PackageNotFound {
                package: package.to_string(),
                searched: 0,
            }
            .into())
        }
    }

    fn import_module(
        &self,
        manifest: &PackageManifest,
        family: TypeFamily,
    ) -> Result<DefinitionModule, BoxError> {
        if !self.table(family).contains_key(&manifest.name) {
            return Err(ProviderError::ModuleNotFound {
                package: manifest.name.clone(),
                family,
            }
            .into());
        }
        Ok(DefinitionModule {
            package: manifest.name.clone(),
            family,
            location: None,
        })
    }

    fn lookup_definition(&self, module: &DefinitionModule, name: &str) -> Result<String, BoxError> {
        self.table(module.family)
            .get(&module.package)
            .and_then(|defs| defs.get(name))
            .cloned()
            .ok_or_else(|| {
                ProviderError::DefinitionNotFound {
                    package: module.package.clone(),
                    family: module.family,
                    name: name.to_string(),
                }
                .into()
            })
    }
}
