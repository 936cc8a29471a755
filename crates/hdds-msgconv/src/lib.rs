// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! HDDS Message Conversion
//!
//! Converts between JSON values and typed ROS message records, backed by a
//! thread-safe registry that loads `.msg` / `.srv` definitions on demand.
//!
//! # Features
//!
//! - **Type Registry**: lazy, cached resolution of `package/Type` names
//! - **Serializer**: record -> JSON in declared field order
//! - **Deserializer**: JSON -> record with partial updates and path-annotated errors
//! - **Header Stamping**: `std_msgs/Header` stamps always come from the live clock
//!
//! # Quick Start
//!
//! ```rust
//! use hdds_msgconv::{ConverterConfig, ConversionError};
//! use serde_json::json;
//!
//! let config = ConverterConfig {
//!     use_ros_package_path: false,
//!     ..Default::default()
//! };
//! let converter = config.build_converter().unwrap();
//!
//! let twist = converter
//!     .deserialize(&json!({"linear": {"x": 0.5}}), "geometry_msgs/Twist")
//!     .unwrap();
//! assert_eq!(converter.serialize(&twist)["linear"]["x"], json!(0.5));
//!
//! let err = converter
//!     .deserialize(&json!({"foo": 1}), "geometry_msgs/Twist")
//!     .unwrap_err();
//! assert!(matches!(err, ConversionError::NonexistentField { .. }));
//! ```
//!
//! # Configuration File
//!
//! ```toml
//! package_paths = ["/opt/ros/noetic/share", "/home/robot/ws/src"]
//! use_ros_package_path = true
//! builtin_types = true
//! log_level = "info"
//! ```

pub mod clock;
pub mod config;
pub mod convert;
pub mod converter;
pub mod error;
pub mod record;
pub mod registry;
pub mod types;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{ConfigError, ConverterConfig};
pub use convert::FieldPath;
pub use converter::MessageConverter;
pub use error::{ConversionError, Result, ValueKind};
pub use record::{Duration, FieldValue, Record, Time};
pub use registry::TypeRegistry;
pub use types::{FieldType, ServiceDescriptor, TypeDescriptor, TypeName};
