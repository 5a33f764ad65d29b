//! Candidate folder discovery and lookup

use std::path::{Path, PathBuf};

use campaignweb_utils::{decode_folder, encode_folder};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// A candidate directory under the data base path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateFolder {
    /// Path as listed, e.g. `dados/Ana Lima`
    pub path: PathBuf,
    /// Last path component, shown as the candidate name
    pub name: String,
}

impl CandidateFolder {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        Self { path, name }
    }

    /// Folder identity used in the dropdown and in links (`/` separated)
    pub fn id(&self) -> String {
        self.path.to_string_lossy().replace('\\', "/")
    }

    /// Single URL segment form of [`CandidateFolder::id`]
    pub fn encoded(&self) -> String {
        encode_folder(&self.id())
    }
}

/// List the subdirectories of `base`, sorted by name
///
/// Hidden directories are skipped.
pub fn list_candidate_folders(base: &Path) -> CoreResult<Vec<CandidateFolder>> {
    let entries = std::fs::read_dir(base).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => CoreError::FolderNotFound {
            folder: base.display().to_string(),
        },
        _ => CoreError::io(base, e),
    })?;

    let mut folders = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| CoreError::io(base, e))?;
        let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
        let hidden = entry.file_name().to_string_lossy().starts_with('.');
        if is_dir && !hidden {
            folders.push(CandidateFolder::new(base.join(entry.file_name())));
        }
    }

    folders.sort_by(|a, b| a.name.cmp(&b.name));
    log::debug!("Found {} candidate folders under {}", folders.len(), base.display());
    Ok(folders)
}

/// Find a folder by its identity
pub fn find_folder<'a>(folders: &'a [CandidateFolder], id: &str) -> Option<&'a CandidateFolder> {
    folders.iter().find(|f| f.id() == id)
}

/// Resolve a URL segment produced by [`CandidateFolder::encoded`]
///
/// The segment is decoded (`_` back to `/`) first. Folder names that contain
/// `_` do not survive that decoding, so the segment is then compared with the
/// encoded form of every known folder.
pub fn resolve_encoded<'a>(folders: &'a [CandidateFolder], segment: &str) -> Option<&'a CandidateFolder> {
    find_folder(folders, &decode_folder(segment))
        .or_else(|| folders.iter().find(|f| f.encoded() == segment))
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_folder_identity() {
        let folder = CandidateFolder::new("dados/Ana Lima");
        assert_eq!(folder.name, "Ana Lima");
        assert_eq!(folder.id(), "dados/Ana Lima");
        assert_eq!(folder.encoded(), "dados_Ana Lima");
    }

    #[test]
    fn test_list_candidate_folders() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("Zeca")).unwrap();
        std::fs::create_dir(dir.path().join("Ana")).unwrap();
        std::fs::create_dir(dir.path().join(".cache")).unwrap();
        std::fs::write(dir.path().join("leia-me.txt"), "x").unwrap();

        let folders = list_candidate_folders(dir.path()).unwrap();
        let names: Vec<_> = folders.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["Ana", "Zeca"]);
        assert_eq!(folders[0].path, dir.path().join("Ana"));
    }

    #[test]
    fn test_list_candidate_folders_missing_base() {
        let dir = tempfile::tempdir().unwrap();
        let err = list_candidate_folders(&dir.path().join("dados")).unwrap_err();
        assert!(matches!(err, CoreError::FolderNotFound { .. }));
    }

    #[test]
    fn test_resolve_encoded() {
        let folders = vec![
            CandidateFolder::new("dados/Ana Lima"),
            CandidateFolder::new("dados/joao_silva"),
        ];

        assert_eq!(resolve_encoded(&folders, "dados_Ana Lima"), Some(&folders[0]));
        assert_eq!(resolve_encoded(&folders, "dados_joao_silva"), Some(&folders[1]));
        assert_eq!(resolve_encoded(&folders, "dados_Outro"), None);
        assert_eq!(resolve_encoded(&folders, ".._.._etc"), None);
    }
}
