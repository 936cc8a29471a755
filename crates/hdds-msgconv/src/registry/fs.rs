// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Filesystem provider reading `.msg` / `.srv` files from package roots.
//!
//! A package is a directory holding `package.xml` (or the legacy
//! `manifest.xml`), found as `<root>/<pkg>`, as `<root>` itself when the
//! root is named `<pkg>`, or one level down as `<root>/<dir>/<pkg>`.
//! Definitions live in `<pkg>/msg/<Name>.msg` and `<pkg>/srv/<Name>.srv`.

use super::builtin;
use super::provider::{
    ClassProvider, DefinitionModule, PackageManifest, ProviderError, TypeFamily,
};
use crate::error::BoxError;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Environment variable listing package roots.
pub const ENV_ROS_PACKAGE_PATH: &str = "ROS_PACKAGE_PATH";

const MANIFEST_FILES: [&str; 2] = ["package.xml", "manifest.xml"];

/// Provider backed by package directories on disk.
#[derive(Debug, Clone, Default)]
pub struct PackagePathProvider {
    roots: Vec<PathBuf>,
    builtins: bool,
}

impl PackagePathProvider {
    /// Create a provider searching `roots` in order.
    pub fn new<I, P>(roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            roots: roots.into_iter().map(Into::into).collect(),
            builtins: false,
        }
    }

    /// Create a provider from `ROS_PACKAGE_PATH`.
    pub fn from_env() -> Self {
        let roots: Vec<PathBuf> = env::var_os(ENV_ROS_PACKAGE_PATH)
            .map(|paths| env::split_paths(&paths).collect())
            .unwrap_or_default();
        Self::new(roots)
    }

    /// Fall back to built-in definitions when a package or file is missing.
    pub fn with_builtins(mut self, enabled: bool) -> Self {
        self.builtins = enabled;
        self
    }

    /// Add a root searched after the existing ones.
    pub fn add_root(&mut self, root: impl Into<PathBuf>) {
        self.roots.push(root.into());
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    fn find_package(&self, package: &str) -> Option<PathBuf> {
        // "." and ".." would escape the roots
        if !is_plain_segment(package) {
            return None;
        }
        for root in &self.roots {
            let direct = root.join(package);
            if is_package_dir(&direct) {
                return Some(direct);
            }
            if root.file_name().is_some_and(|n| n == package) && is_package_dir(root) {
                return Some(root.clone());
            }
            match nested_package(root, package) {
                Ok(Some(found)) => return Some(found),
                Ok(None) => {}
                Err(e) => log::trace!("skipping unreadable root {}: {}", root.display(), e),
            }
        }
        None
    }
}

fn is_package_dir(dir: &Path) -> bool {
    MANIFEST_FILES.iter().any(|m| dir.join(m).is_file())
}

fn nested_package(root: &Path, package: &str) -> io::Result<Option<PathBuf>> {
    for entry in fs::read_dir(root)? {
        let candidate = entry?.path().join(package);
        if is_package_dir(&candidate) {
            return Ok(Some(candidate));
        }
    }
    Ok(None)
}

fn is_plain_segment(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl ClassProvider for PackagePathProvider {
    fn load_manifest(&self, package: &str) -> Result<PackageManifest, BoxError> {
        if let Some(dir) = self.find_package(package) {
            log::debug!("package {} found at {}", package, dir.display());
            return Ok(PackageManifest {
                name: package.to_string(),
                location: Some(dir),
            });
        }
        if self.builtins && builtin::has_package(package) {
            return Ok(PackageManifest {
                name: package.to_string(),
                location: None,
            });
        }
        Err(ProviderError::PackageNotFound {
            package: package.to_string(),
            searched: self.roots.len(),
        }
        .into())
    }

    fn import_module(
        &self,
        manifest: &PackageManifest,
        family: TypeFamily,
    ) -> Result<DefinitionModule, BoxError> {
        let location = manifest
            .location
            .as_ref()
            .map(|dir| dir.join(family.submodule()))
            .filter(|dir| dir.is_dir());

        if location.is_none() && !(self.builtins && builtin::has_module(&manifest.name, family)) {
            return Err(ProviderError::ModuleNotFound {
                package: manifest.name.clone(),
                family,
            }
            .into());
        }

        Ok(DefinitionModule {
            package: manifest.name.clone(),
            family,
            location,
        })
    }

    fn lookup_definition(&self, module: &DefinitionModule, name: &str) -> Result<String, BoxError> {
        let not_found = || ProviderError::DefinitionNotFound {
            package: module.package.clone(),
            family: module.family,
            name: name.to_string(),
        };
        if !is_plain_segment(name) {
            return Err(not_found().into());
        }

        if let Some(dir) = &module.location {
            let path = dir.join(format!("{}.{}", name, module.family.extension()));
            match fs::read_to_string(&path) {
                Ok(text) => return Ok(text),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => return Err(ProviderError::Io(e).into()),
            }
        }

        if self.builtins {
            if let Some(text) = builtin::definition(&module.package, module.family, name) {
                return Ok(text.to_string());
            }
        }
        Err(not_found().into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_package(root: &Path, package: &str, files: &[(&str, &str)]) -> PathBuf {
        let dir = root.join(package);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("package.xml"), "<package/>").unwrap();
        for (rel, text) in files {
            let path = dir.join(rel);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, text).unwrap();
        }
        dir
    }

    #[test]
    fn test_three_stage_lookup() {
        let tmp = TempDir::new().unwrap();
        write_package(tmp.path(), "demo_msgs", &[("msg/Blob.msg", "uint8[] data\n")]);

        let provider = PackagePathProvider::new([tmp.path()]);
        let manifest = provider.load_manifest("demo_msgs").unwrap();
        assert!(manifest.location.is_some());

        let module = provider
            .import_module(&manifest, TypeFamily::Message)
            .unwrap();
        assert_eq!(
            provider.lookup_definition(&module, "Blob").unwrap(),
            "uint8[] data\n"
        );
        assert!(provider.lookup_definition(&module, "Missing").is_err());
        assert!(provider.lookup_definition(&module, "../Blob").is_err());

        assert!(provider
            .import_module(&manifest, TypeFamily::Service)
            .is_err());
        assert!(provider.load_manifest("other_msgs").is_err());
    }

    #[test]
    fn test_root_is_package_and_nested_layout() {
        let tmp = TempDir::new().unwrap();
        let direct = write_package(tmp.path(), "alpha_msgs", &[]);
        write_package(&tmp.path().join("src"), "beta_msgs", &[]);

        let provider = PackagePathProvider::new([direct.clone(), tmp.path().to_path_buf()]);
        let alpha = provider.load_manifest("alpha_msgs").unwrap();
        assert_eq!(alpha.location.as_deref(), Some(direct.as_path()));
        let beta = provider.load_manifest("beta_msgs").unwrap();
        assert!(beta.location.unwrap().ends_with("src/beta_msgs"));
    }

    #[test]
    fn test_builtin_fallback() {
        let provider = PackagePathProvider::new(Vec::<PathBuf>::new()).with_builtins(true);
        let manifest = provider.load_manifest("std_msgs").unwrap();
        assert!(manifest.location.is_none());
        let module = provider
            .import_module(&manifest, TypeFamily::Message)
            .unwrap();
        assert!(provider
            .lookup_definition(&module, "Header")
            .unwrap()
            .contains("stamp"));

        let strict = PackagePathProvider::new(Vec::<PathBuf>::new());
        assert!(strict.load_manifest("std_msgs").is_err());
    }

    #[test]
    fn test_disk_overrides_builtin() {
        let tmp = TempDir::new().unwrap();
        write_package(tmp.path(), "std_msgs", &[("msg/String.msg", "string data # disk\n")]);

        let provider = PackagePathProvider::new([tmp.path()]).with_builtins(true);
        let manifest = provider.load_manifest("std_msgs").unwrap();
        let module = provider
            .import_module(&manifest, TypeFamily::Message)
            .unwrap();
        assert!(provider
            .lookup_definition(&module, "String")
            .unwrap()
            .contains("disk"));
        // Missing on disk, present in the built-in set
        assert!(provider.lookup_definition(&module, "Header").is_ok());
    }

    #[test]
    fn test_dot_segments_never_leave_the_roots() {
        let tmp = TempDir::new().unwrap();
        // The parent of the root looks like a package with a msg/ folder
        write_package(tmp.path(), "outside", &[("msg/Secret.msg", "int32 x\n")]);
        let root = tmp.path().join("outside/msg");

        let provider = PackagePathProvider::new([root.clone()]);
        for package in ["..", "."] {
            let err = provider.load_manifest(package).unwrap_err();
            assert!(err.to_string().contains("not found"), "{}", err);
        }

        let nested = PackagePathProvider::new([tmp.path().join("outside")]);
        assert!(nested.load_manifest("..").is_err());
    }
}
