use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use super::models::{PostRecord, StoredPost};
use crate::core::feed::types::ParsedPost;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("post record {path} is not valid json: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode post record: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct PostRepository {
    path: PathBuf,
}

impl PostRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<PostRecord, StorageError> {
        let raw = match fs::read(&self.path) {
            Ok(raw) => raw,
            Err(error) if error.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no post record yet, starting empty");
                return Ok(PostRecord::new());
            }
            Err(source) => {
                return Err(StorageError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        serde_json::from_slice(&raw).map_err(|source| StorageError::Decode {
            path: self.path.clone(),
            source,
        })
    }

    /// Overwrites the record file in full.
    pub fn save(&self, record: &PostRecord) -> Result<(), StorageError> {
        let encoded = encode_record(record)?;
        if let Some(parent) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| StorageError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&self.path, encoded).map_err(|source| StorageError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

/// Inserts every post in `category` whose id is not yet recorded.
///
/// Existing entries are never touched. Returns the newly inserted posts in feed order.
pub fn merge_posts<'a>(
    record: &mut PostRecord,
    posts: &'a [ParsedPost],
    category: &str,
) -> Vec<&'a ParsedPost> {
    let mut inserted = Vec::new();
    for post in posts {
        if post.category != category || record.contains_key(&post.id) {
            continue;
        }
        record.insert(post.id.clone(), StoredPost::from(post));
        tracing::info!("Added new post: {}", post.title);
        inserted.push(post);
    }
    inserted
}

fn encode_record(record: &PostRecord) -> Result<Vec<u8>, serde_json::Error> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    record.serialize(&mut serializer)?;
    Ok(buffer)
}
