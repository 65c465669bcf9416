//! Dataset preparation: validate downloaded assets, scaffold the split directories, and
//! partition each term directory into `train/<term>` and `valid/<term>`.
//!
//! Layout of the destination root through the pipeline:
//!
//! ```text
//! after acquisition/validation   after scaffold          after partition
//! root/cats/*.jpg                root/cats/*.jpg         root/train/cats/*.jpg
//! root/dogs/*.jpg                root/dogs/*.jpg         root/train/dogs/*.jpg
//!                                root/valid/cats/        root/valid/cats/*.jpg
//!                                root/valid/dogs/        root/valid/dogs/*.jpg
//! ```

// -- submodules
mod fs_utils;
mod partition;
mod scaffold;
mod validate;

#[cfg(test)]
pub(crate) mod test_utils;

pub use partition::{PartitionSummary, partition, validation_count};
pub use scaffold::scaffold;
pub use validate::{TermValidation, ValidationReport, validate_assets};

// -- external imports
use std::path::{Path, PathBuf};
use strum::{AsRefStr, Display, EnumString, VariantNames};

use crate::terms::SearchTerm;

/// Destination split of an image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, AsRefStr, VariantNames)]
#[strum(serialize_all = "lowercase")]
pub enum Split {
    Train,
    Valid,
}

impl Split {
    /// `root/<split>`
    pub fn dir(self, root: &Path) -> PathBuf {
        root.join(self.as_ref())
    }

    /// `root/<split>/<term>`
    pub fn term_dir(self, root: &Path, term: &SearchTerm) -> PathBuf {
        self.dir(root).join(term)
    }

    /// Case-insensitive, since `Train` and `train` are the same directory on some filesystems.
    pub fn is_split_name(name: &str) -> bool {
        Self::VARIANTS.iter().any(|v| v.eq_ignore_ascii_case(name))
    }
}
