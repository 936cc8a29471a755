// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type registry: resolves `package/Type` strings to cached descriptors.
//!
//! # Architecture
//!
//! ```text
//! resolve("/pkg//Type/")
//!    |
//!    +-- cache[raw]         hit -> done
//!    +-- normalize -> "pkg/Type"
//!    +-- cache[normalized]  hit -> done
//!    +-- provider (unlocked): manifest -> msg/srv submodule -> definition
//!    +-- parse -> insert under raw and normalized keys
//! ```
//!
//! Messages and services live in two independent caches, each with its own
//! lock. The registry is an ordinary owned value; share it with an `Arc`
//! when several converters or threads need it.

mod builtin;
mod cache;
mod fs;
mod memory;
mod provider;

pub use cache::{CacheStats, TypeCache};
pub use fs::{PackagePathProvider, ENV_ROS_PACKAGE_PATH};
pub use memory::MemoryProvider;
pub use provider::{ClassProvider, DefinitionModule, PackageManifest, ProviderError, TypeFamily};

use crate::error::{BoxError, ConversionError, Result};
use crate::record::{Duration, FieldValue, Record, Time};
use crate::types::{
    parse_message, parse_service, ArrayBound, DefinitionError, FieldType, PrimitiveKind,
    ServiceDescriptor, TimeKind, TypeDescriptor, TypeName,
};
use std::sync::Arc;

type BuildFn<T> = fn(&TypeName, &str) -> Result<T, DefinitionError>;

/// Thread-safe, lazily populated registry of message and service types.
pub struct TypeRegistry {
    provider: Arc<dyn ClassProvider>,
    messages: TypeCache<TypeDescriptor>,
    services: TypeCache<ServiceDescriptor>,
}

impl TypeRegistry {
    /// Create an empty registry loading from `provider`.
    pub fn new(provider: Arc<dyn ClassProvider>) -> Self {
        Self {
            provider,
            messages: TypeCache::new(),
            services: TypeCache::new(),
        }
    }

    /// Resolve a message type, loading it on first use.
    pub fn resolve_message_type(&self, typestring: &str) -> Result<Arc<TypeDescriptor>> {
        self.get_class(typestring, TypeFamily::Message, &self.messages, parse_message)
    }

    /// Resolve a service type, loading it on first use.
    pub fn resolve_service_type(&self, typestring: &str) -> Result<Arc<ServiceDescriptor>> {
        self.get_class(typestring, TypeFamily::Service, &self.services, parse_service)
    }

    fn get_class<T>(
        &self,
        typestring: &str,
        family: TypeFamily,
        cache: &TypeCache<T>,
        build: BuildFn<T>,
    ) -> Result<Arc<T>> {
        if let Some(hit) = cache.get(typestring) {
            return Ok(hit);
        }

        let type_name = TypeName::parse(typestring)?;
        let normalized = type_name.to_string();
        if let Some(hit) = cache.get(&normalized) {
            return Ok(hit);
        }

        let loaded = Arc::new(self.load_class(&type_name, family, build)?);
        cache.record_load();
        log::debug!("loaded {} type {} (requested as {:?})", family, normalized, typestring);

        cache.insert(typestring, Arc::clone(&loaded));
        cache.insert(&normalized, Arc::clone(&loaded));
        Ok(loaded)
    }

    fn load_class<T>(&self, type_name: &TypeName, family: TypeFamily, build: BuildFn<T>) -> Result<T> {
        let package = type_name.package();

        let manifest = self
            .provider
            .load_manifest(package)
            .map_err(|source| ConversionError::InvalidPackage {
                package: package.to_string(),
                source,
            })?;

        let module = self
            .provider
            .import_module(&manifest, family)
            .map_err(|source| ConversionError::InvalidModule {
                package: package.to_string(),
                family,
                source,
            })?;

        let invalid_class = |source: BoxError| ConversionError::InvalidClass {
            package: package.to_string(),
            family,
            class: type_name.name().to_string(),
            source,
        };

        let text = self
            .provider
            .lookup_definition(&module, type_name.name())
            .map_err(invalid_class)?;
        build(type_name, &text).map_err(|e| invalid_class(e.into()))
    }

    /// Build a default instance of a message type.
    pub fn instantiate(&self, typestring: &str) -> Result<Record> {
        let descriptor = self.resolve_message_type(typestring)?;
        self.instantiate_descriptor(&descriptor)
    }

    /// Build a default instance of an already resolved type.
    ///
    /// Nested record fields are resolved through the message cache. A type
    /// that contains itself through scalar or fixed-length fields has no
    /// finite default and fails with [`ConversionError::InvalidClass`].
    pub fn instantiate_descriptor(&self, descriptor: &Arc<TypeDescriptor>) -> Result<Record> {
        self.instantiate_nested(descriptor, &mut Vec::new())
    }

    /// Default value for a field type (zeros, empty strings, empty or
    /// fixed-length sequences, default nested records).
    pub fn default_value(&self, field_type: &FieldType) -> Result<FieldValue> {
        self.default_nested(field_type, &mut Vec::new())
    }

    /// `building` holds the types whose defaults are under construction.
    fn instantiate_nested(
        &self,
        descriptor: &Arc<TypeDescriptor>,
        building: &mut Vec<String>,
    ) -> Result<Record> {
        let name = descriptor.name();
        if building.iter().any(|n| n == name) {
            return Err(recursive_definition(name, building));
        }

        building.push(name.to_string());
        let values = descriptor
            .fields()
            .iter()
            .map(|field| self.default_nested(&field.field_type, building))
            .collect::<Result<Vec<_>>>();
        building.pop();

        Ok(Record::from_defaults(Arc::clone(descriptor), values?))
    }

    fn default_nested(&self, field_type: &FieldType, building: &mut Vec<String>) -> Result<FieldValue> {
        let value = match field_type {
            FieldType::Binary { bound, .. } => {
                FieldValue::Bytes(vec![0; bound.fixed_len().unwrap_or(0)])
            }
            FieldType::Time(TimeKind::Time) => FieldValue::Time(Time::default()),
            FieldType::Time(TimeKind::Duration) => FieldValue::Duration(Duration::default()),
            FieldType::Primitive(kind) => default_primitive(*kind),
            FieldType::Sequence { element, bound } => match bound {
                ArrayBound::Fixed(len) => FieldValue::Sequence(
                    (0..*len)
                        .map(|_| self.default_nested(element, building))
                        .collect::<Result<Vec<_>>>()?,
                ),
                ArrayBound::Unbounded | ArrayBound::Bounded(_) => FieldValue::Sequence(Vec::new()),
            },
            FieldType::Record(name) => {
                let descriptor = self.resolve_message_type(name)?;
                FieldValue::Record(self.instantiate_nested(&descriptor, building)?)
            }
        };
        Ok(value)
    }

    /// Message cache statistics.
    pub fn message_stats(&self) -> CacheStats {
        self.messages.stats()
    }

    /// Service cache statistics.
    pub fn service_stats(&self) -> CacheStats {
        self.services.stats()
    }

    /// Keys currently in the message cache (raw and normalized).
    pub fn cached_message_types(&self) -> Vec<String> {
        self.messages.keys()
    }

    /// Keys currently in the service cache (raw and normalized).
    pub fn cached_service_types(&self) -> Vec<String> {
        self.services.keys()
    }
}

fn recursive_definition(name: &str, building: &[String]) -> ConversionError {
    let (package, class) = name.split_once('/').unwrap_or(("", name));
    let chain = building.join(" -> ");
    ConversionError::InvalidClass {
        package: package.to_string(),
        family: TypeFamily::Message,
        class: class.to_string(),
        source: format!("recursive definition: {} -> {}", chain, name).into(),
    }
}

fn default_primitive(kind: PrimitiveKind) -> FieldValue {
    match kind {
        PrimitiveKind::Bool => FieldValue::Bool(false),
        PrimitiveKind::F32 | PrimitiveKind::F64 => FieldValue::Float(0.0),
        PrimitiveKind::String { .. } => FieldValue::String(String::new()),
        k if k.is_signed() => FieldValue::Int(0),
        _ => FieldValue::UInt(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> TypeRegistry {
        let provider = MemoryProvider::with_builtins()
            .with_message(
                "demo_msgs/Sample",
                "Header header\nint8 level\nuint16 count\nfloat32[2] gains\nuint8[4] tag\n\
                 geometry_msgs/Point[] points\nduration timeout\nstring label\n",
            )
            .unwrap();
        TypeRegistry::new(Arc::new(provider))
    }

    #[test]
    fn test_resolve_caches_raw_and_normalized() {
        let reg = registry();
        let a = reg.resolve_message_type("/geometry_msgs//Point/").unwrap();
        let b = reg.resolve_message_type("geometry_msgs/Point").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(
            reg.cached_message_types(),
            ["/geometry_msgs//Point/", "geometry_msgs/Point"]
        );
        assert_eq!(reg.message_stats().loads, 1);
    }

    #[test]
    fn test_resolve_error_kinds() {
        let reg = registry();
        assert!(matches!(
            reg.resolve_message_type("onlyonesegment"),
            Err(ConversionError::InvalidTypeString { .. })
        ));
        assert!(matches!(
            reg.resolve_message_type("nav_msgs/Odometry"),
            Err(ConversionError::InvalidPackage { .. })
        ));
        assert!(matches!(
            reg.resolve_service_type("demo_msgs/Nothing"),
            Err(ConversionError::InvalidModule { .. })
        ));
        assert!(matches!(
            reg.resolve_message_type("std_msgs/Missing"),
            Err(ConversionError::InvalidClass { .. })
        ));
        assert!(reg.cached_message_types().is_empty());
    }

    #[test]
    fn test_unparsable_definition_is_invalid_class() {
        let provider = MemoryProvider::new()
            .with_message("bad_msgs/Broken", "int32\n")
            .unwrap();
        let reg = TypeRegistry::new(Arc::new(provider));
        let err = reg.resolve_message_type("bad_msgs/Broken").unwrap_err();
        assert!(matches!(err, ConversionError::InvalidClass { ref class, .. } if class == "Broken"));
        assert!(err.to_string().contains("line 1"));
    }

    #[test]
    fn test_message_and_service_caches_are_separate() {
        let reg = registry();
        let srv = reg.resolve_service_type("std_srvs/SetBool").unwrap();
        assert_eq!(srv.request().name(), "std_srvs/SetBoolRequest");
        assert!(reg.cached_message_types().is_empty());
        assert_eq!(reg.cached_service_types(), ["std_srvs/SetBool"]);
        assert!(reg.resolve_message_type("std_srvs/SetBool").is_err());
    }

    #[test]
    fn test_instantiate_defaults() {
        let reg = registry();
        let rec = reg.instantiate("demo_msgs/Sample").unwrap();

        let header = rec.get("header").and_then(FieldValue::as_record).unwrap();
        assert_eq!(header.get("stamp"), Some(&FieldValue::Time(Time::default())));
        assert_eq!(header.get("frame_id"), Some(&FieldValue::String(String::new())));
        assert_eq!(rec.get("level"), Some(&FieldValue::Int(0)));
        assert_eq!(rec.get("count"), Some(&FieldValue::UInt(0)));
        assert_eq!(
            rec.get("gains"),
            Some(&FieldValue::Sequence(vec![FieldValue::Float(0.0); 2]))
        );
        assert_eq!(rec.get("tag"), Some(&FieldValue::Bytes(vec![0; 4])));
        assert_eq!(rec.get("points"), Some(&FieldValue::Sequence(Vec::new())));
        assert_eq!(
            rec.get("timeout"),
            Some(&FieldValue::Duration(Duration::default()))
        );
    }

    #[test]
    fn test_recursive_definitions_fail_instead_of_overflowing() {
        let provider = MemoryProvider::new()
            .with_message("tree_msgs/Node", "int32 id\nNode[2] children\n")
            .unwrap()
            .with_message("tree_msgs/Link", "int32 id\nLink next\n")
            .unwrap()
            .with_message("tree_msgs/A", "B b\n")
            .unwrap()
            .with_message("tree_msgs/B", "float64 w\nA[1] a\n")
            .unwrap()
            .with_message("tree_msgs/Tree", "int32 id\nTree[] children\n")
            .unwrap();
        let reg = TypeRegistry::new(Arc::new(provider));

        for typestring in ["tree_msgs/Node", "tree_msgs/Link", "tree_msgs/A"] {
            let err = reg.instantiate(typestring).unwrap_err();
            assert!(
                matches!(err, ConversionError::InvalidClass { .. }),
                "{}: {}",
                typestring,
                err
            );
            let cause = std::error::Error::source(&err).unwrap().to_string();
            assert!(cause.starts_with("recursive definition"), "{}", cause);
        }
        let err = reg.instantiate("tree_msgs/B").unwrap_err();
        assert_eq!(
            std::error::Error::source(&err).unwrap().to_string(),
            "recursive definition: tree_msgs/B -> tree_msgs/A -> tree_msgs/B"
        );

        // Unbounded self-reference starts empty and is fine
        let tree = reg.instantiate("tree_msgs/Tree").unwrap();
        assert_eq!(tree.get("children"), Some(&FieldValue::Sequence(Vec::new())));
        assert!(reg
            .default_value(&FieldType::Sequence {
                element: Box::new(FieldType::Record("tree_msgs/Node".into())),
                bound: ArrayBound::Unbounded,
            })
            .is_ok());
    }
}
