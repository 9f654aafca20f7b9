//! Domain error types.
//!
//! Only the outer surfaces (config, output, CLI) can fail. The renderer and the
//! calculators degrade instead of erroring.

/// Top-level error type for portaldesk.
#[derive(Debug, thiserror::Error)]
pub enum PortalError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("render error: {reason}")]
    Render { reason: String },

    #[error("export error: {reason}")]
    Export { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl PortalError {
    pub fn invalid(section: &str, key: &str, reason: impl Into<String>) -> Self {
        PortalError::ConfigInvalid {
            section: section.to_string(),
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<&PortalError> for std::process::ExitCode {
    fn from(err: &PortalError) -> Self {
        let code: u8 = match err {
            PortalError::Io(_) => 1,
            PortalError::ConfigParse { .. } | PortalError::ConfigInvalid { .. } => 2,
            PortalError::Render { .. } => 3,
            PortalError::Export { .. } => 4,
        };
        std::process::ExitCode::from(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_formats_section_and_key() {
        let err = PortalError::invalid("risk", "payoff", "unknown payoff mode 'huge'");
        assert_eq!(
            err.to_string(),
            "invalid config value [risk] payoff: unknown payoff mode 'huge'"
        );
    }

    #[test]
    fn exit_codes_group_by_surface() {
        use std::process::ExitCode;
        let code = |e: PortalError| format!("{:?}", ExitCode::from(&e));
        let parse = PortalError::ConfigParse {
            file: "portal.ini".into(),
            reason: "bad line".into(),
        };
        assert_eq!(code(parse), format!("{:?}", ExitCode::from(2)));
        assert_eq!(
            code(PortalError::invalid("lots", "instrument", "blank")),
            format!("{:?}", ExitCode::from(2))
        );
        assert_eq!(
            code(PortalError::Export { reason: "x".into() }),
            format!("{:?}", ExitCode::from(4))
        );
    }

    #[test]
    fn io_error_is_transparent() {
        let err: PortalError = std::io::Error::other("disk full").into();
        assert_eq!(err.to_string(), "disk full");
    }
}
