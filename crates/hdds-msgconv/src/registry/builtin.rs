// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Built-in definitions for the common std_msgs / geometry_msgs / std_srvs
//! types, so bridges work without a package tree on disk.

use super::provider::TypeFamily;

const BUILTIN_MESSAGES: &[(&str, &str)] = &[
    // std_msgs
    (
        "std_msgs/Header",
        "uint32 seq\ntime stamp\nstring frame_id\n",
    ),
    ("std_msgs/String", "string data\n"),
    ("std_msgs/Bool", "bool data\n"),
    ("std_msgs/Int32", "int32 data\n"),
    ("std_msgs/Int64", "int64 data\n"),
    ("std_msgs/UInt8", "uint8 data\n"),
    ("std_msgs/Float32", "float32 data\n"),
    ("std_msgs/Float64", "float64 data\n"),
    ("std_msgs/Time", "time data\n"),
    ("std_msgs/Duration", "duration data\n"),
    ("std_msgs/Empty", ""),
    (
        "std_msgs/ColorRGBA",
        "float32 r\nfloat32 g\nfloat32 b\nfloat32 a\n",
    ),
    // geometry_msgs
    ("geometry_msgs/Point", "float64 x\nfloat64 y\nfloat64 z\n"),
    ("geometry_msgs/Vector3", "float64 x\nfloat64 y\nfloat64 z\n"),
    (
        "geometry_msgs/Quaternion",
        "float64 x\nfloat64 y\nfloat64 z\nfloat64 w\n",
    ),
    ("geometry_msgs/Pose", "Point position\nQuaternion orientation\n"),
    ("geometry_msgs/PoseStamped", "Header header\nPose pose\n"),
    ("geometry_msgs/Twist", "Vector3 linear\nVector3 angular\n"),
];

const BUILTIN_SERVICES: &[(&str, &str)] = &[
    ("std_srvs/Empty", "---\n"),
    ("std_srvs/Trigger", "---\nbool success\nstring message\n"),
    (
        "std_srvs/SetBool",
        "bool data\n---\nbool success\nstring message\n",
    ),
];

fn table(family: TypeFamily) -> &'static [(&'static str, &'static str)] {
    match family {
        TypeFamily::Message => BUILTIN_MESSAGES,
        TypeFamily::Service => BUILTIN_SERVICES,
    }
}

fn package_of(type_name: &str) -> &str {
    type_name.split('/').next().unwrap_or_default()
}

/// Whether any built-in definition lives in `package`.
pub fn has_package(package: &str) -> bool {
    [TypeFamily::Message, TypeFamily::Service]
        .iter()
        .any(|family| has_module(package, *family))
}

/// Whether `package` has built-in definitions of `family`.
pub fn has_module(package: &str, family: TypeFamily) -> bool {
    table(family)
        .iter()
        .any(|(name, _)| package_of(name) == package)
}

/// Built-in definition text for `package/name`.
pub fn definition(package: &str, family: TypeFamily, name: &str) -> Option<&'static str> {
    table(family)
        .iter()
        .find(|(full, _)| {
            full.split_once('/')
                .is_some_and(|(pkg, ty)| pkg == package && ty == name)
        })
        .map(|(_, text)| *text)
}

/// All built-in definitions of `family` as `(type name, text)`.
pub fn definitions(family: TypeFamily) -> impl Iterator<Item = (&'static str, &'static str)> {
    table(family).iter().copied()
}
