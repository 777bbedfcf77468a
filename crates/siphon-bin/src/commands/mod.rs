// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Command implementations for the SIPHON CLI.

pub mod run;
pub mod validate;
pub mod version;

use std::path::Path;

use siphon_config::{AcquisitionSettings, ConfigProvider};

use crate::error::{BinError, BinResult};

/// Loads and validates acquisition settings from a JSON configuration file.
pub fn load_settings(path: &Path) -> BinResult<AcquisitionSettings> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        BinError::io(format!("{}: {}", path.display(), e))
            .with_context("loading configuration")
    })?;

    let provider = ConfigProvider::from_json_str(&content)?;
    let settings = AcquisitionSettings::from_provider(&provider)?;
    Ok(settings)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_settings_from_file() {
        let mut file = tempfile_path("siphon-test-config.json");
        write!(
            file.1,
            r#"{{"ip": "10.0.0.5", "port": 102, "asset": "bay-1"}}"#
        )
        .unwrap();

        let settings = load_settings(&file.0).unwrap();
        assert_eq!(settings.ip, "10.0.0.5");
        assert_eq!(settings.port, 102);
        assert_eq!(settings.asset, "bay-1");

        std::fs::remove_file(&file.0).ok();
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let err = load_settings(Path::new("/nonexistent/siphon.json")).unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }

    fn tempfile_path(name: &str) -> (std::path::PathBuf, std::fs::File) {
        let path = std::env::temp_dir().join(name);
        let file = std::fs::File::create(&path).unwrap();
        (path, file)
    }
}
