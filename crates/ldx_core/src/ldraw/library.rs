//! Access to an LDraw parts library on disk.
//!
//! Sub-file references are resolved by probing the library directories in a
//! fixed order: the primitive directories at every resolution, the parts
//! directory and its sub-part directory, then the same list under the
//! unofficial library.

use std::path::{Path, PathBuf};

use super::error::{LdrawError, LdrawResult};

/// Primitive directory, relative to the library root.
pub const PRIMITIVES_DIR: &str = "p";

/// Parts directory, relative to the library root.
pub const PARTS_DIR: &str = "parts";

/// Unofficial library mirror, relative to the library root.
pub const UNOFFICIAL_DIR: &str = "UnOfficial";

/// Probe order for sub-file references.
pub const SEARCH_DIRS: [&str; 6] = ["p", "p/4", "p/8", "p/48", "parts", "parts/s"];

/// Where sub-file geometry comes from.
///
/// The geometry resolver only needs to locate a referenced file and read it;
/// tests substitute an in-memory source.
pub trait PartSource: Send + Sync {
    /// Resolve a normalized sub-file name to a concrete path.
    fn locate(&self, name: &str) -> LdrawResult<PathBuf>;

    /// Read the contents of a located file.
    fn read(&self, path: &Path) -> LdrawResult<String>;
}

/// An LDraw library rooted at a directory.
#[derive(Clone, Debug)]
pub struct LdrawLibrary {
    root: PathBuf,
}

impl LdrawLibrary {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Every candidate path for `name`, in probe order.
    pub fn candidates(&self, name: &str) -> Vec<PathBuf> {
        let unofficial = self.root.join(UNOFFICIAL_DIR);
        [&self.root, &unofficial]
            .iter()
            .flat_map(|base| SEARCH_DIRS.iter().map(move |dir| base.join(dir).join(name)))
            .collect()
    }
}

impl PartSource for LdrawLibrary {
    fn locate(&self, name: &str) -> LdrawResult<PathBuf> {
        self.candidates(name)
            .into_iter()
            .find(|candidate| candidate.is_file())
            .ok_or_else(|| LdrawError::SubFileNotFound(name.to_string()))
    }

    fn read(&self, path: &Path) -> LdrawResult<String> {
        read_lossy(path)
    }
}

/// Read a file as text. Library files are mostly ASCII but comments may carry
/// other encodings, so invalid UTF-8 is replaced rather than rejected.
pub fn read_lossy(path: &Path) -> LdrawResult<String> {
    let bytes = std::fs::read(path).map_err(|e| LdrawError::io(path, e))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
