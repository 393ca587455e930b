use super::types::ScanError;

/// Maps a fatal top-level error to the process exit code it should produce.
///
/// This only covers errors that abort the CLI before a `ScanResults` value
/// exists — once a scan runs to completion, its own `status` field
/// determines the exit code (0/1/2), independent of this mapping.
impl ScanError {
    pub fn exit_code(&self) -> i32 {
        match self {
            ScanError::InvalidArgument { .. } => 64,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_argument_maps_to_64() {
        let err = ScanError::InvalidArgument {
            flag: "uri-target".into(),
            reason: "conflicts with --hostname-target".into(),
        };
        assert_eq!(err.exit_code(), 64);
    }

    #[test]
    fn other_errors_map_to_1() {
        let err = ScanError::DuplicatePluginName("foo".into());
        assert_eq!(err.exit_code(), 1);
    }
}
