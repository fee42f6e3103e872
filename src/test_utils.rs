//! Test utilities for sekha-cli
//!
//! This module provides temporary directory management, test file
//! creation, and assertion helpers for error kinds.

use crate::error::{error_kind, SekhaError};
use std::path::PathBuf;
use tempfile::TempDir;

/// Create a temporary directory for testing
///
/// # Returns
///
/// Returns a TempDir that will be cleaned up when dropped
pub fn temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Create a test file with the given content
///
/// # Panics
///
/// Panics if file creation or writing fails
pub fn create_test_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("Failed to write test file");
    path
}

/// Assert that a result failed with the given [`SekhaError`] kind
///
/// # Panics
///
/// Panics if the result is Ok or carries a different kind
pub fn assert_error_kind<T>(result: anyhow::Result<T>, expected: &str) {
    match result {
        Ok(_) => panic!("Expected {} error but got Ok", expected),
        Err(e) => {
            let kind = error_kind(&e).map(SekhaError::kind);
            assert_eq!(
                kind,
                Some(expected),
                "Error '{}' is not of kind '{}'",
                e,
                expected
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_dir_creation() {
        let dir = temp_dir();
        assert!(dir.path().exists());
    }

    #[test]
    fn test_create_test_file() {
        let dir = temp_dir();
        let path = create_test_file(&dir, "test.json", "{}");
        assert_eq!(std::fs::read_to_string(path).unwrap(), "{}");
    }

    #[test]
    fn test_assert_error_kind_success() {
        let result: anyhow::Result<()> = Err(SekhaError::NotFound("x".to_string()).into());
        assert_error_kind(result, "not_found");
    }

    #[test]
    #[should_panic(expected = "but got Ok")]
    fn test_assert_error_kind_with_ok() {
        assert_error_kind(Ok(()), "remote");
    }

    #[test]
    #[should_panic]
    fn test_assert_error_kind_wrong_kind() {
        let result: anyhow::Result<()> = Err(SekhaError::Remote("x".to_string()).into());
        assert_error_kind(result, "validation");
    }
}
