use std::path::Path;

use crate::errors::ScanError;

use super::types::EngineConfig;

const MAX_CONFIG_BYTES: u64 = 1_048_576;

/// Loads an [`EngineConfig`] from a YAML file, capped at 1MB the same way
/// the teacher's `parse_config` bounds its own config file reads.
pub async fn parse_config(path: &Path) -> Result<EngineConfig, ScanError> {
    if !path.exists() {
        return Err(ScanError::Config(format!("config file not found: {}", path.display())));
    }

    let metadata = tokio::fs::metadata(path).await?;
    if metadata.len() > MAX_CONFIG_BYTES {
        return Err(ScanError::Config("config file exceeds 1MB limit".into()));
    }

    let content = tokio::fs::read_to_string(path).await?;
    let config: EngineConfig = serde_yaml::from_str(&content)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_file_is_a_config_error() {
        let result = parse_config(Path::new("/nonexistent/sentryscan.yaml")).await;
        assert!(matches!(result, Err(ScanError::Config(_))));
    }

    #[tokio::test]
    async fn parses_partial_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("engine.yaml");
        tokio::fs::write(&path, "pool_size: 8\nexclude: [\"weak-cipher\"]\n").await.unwrap();
        let config = parse_config(&path).await.unwrap();
        assert_eq!(config.pool_size, Some(8));
        assert!(config.exclude.contains("weak-cipher"));
    }
}
