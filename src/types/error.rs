use thiserror::Error;

/// Fatal configuration-time errors. Raised while compiling directive text
/// into rules, policies, or user files; no partial value is produced.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("flags must be bracketed: '{input}'")]
    UnbracketedFlags { input: String },

    #[error("malformed flag list '{input}': {message}")]
    FlagSyntax { input: String, message: String },

    #[error("unknown flag keyword '{keyword}'")]
    UnknownFlag { keyword: String },

    #[error("invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("'{directive}' must be followed by a 'from'")]
    MissingFrom { directive: String },

    #[error("invalid ip specification '{spec}': {reason}")]
    InvalidIpSpec { spec: String, reason: String },

    #[error("unknown order value '{value}'")]
    UnknownOrder { value: String },

    #[error("malformed user file line {line}: expected 'user:hash'")]
    MalformedUserLine { line: usize },
}

/// An engine invariant violation: a bug in entry or policy construction,
/// never a user-config problem.
///
/// The closed [`AccessEntry`](super::AccessEntry) enum makes the classic
/// instance of this (an unrecognized entry variant reaching the matcher)
/// unrepresentable; the kind stays on the error surface for invariant
/// checks at the construction boundary.
#[derive(Debug, Error)]
pub enum InternalError {
    #[error("unrecognized access entry variant: {detail}")]
    UnknownEntryVariant { detail: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unbracketed_flags_message() {
        let err = ConfigError::UnbracketedFlags {
            input: "NC,L".into(),
        };
        assert_eq!(err.to_string(), "flags must be bracketed: 'NC,L'");
    }

    #[test]
    fn unknown_flag_message() {
        let err = ConfigError::UnknownFlag {
            keyword: "zz".into(),
        };
        assert_eq!(err.to_string(), "unknown flag keyword 'zz'");
    }

    #[test]
    fn missing_from_message() {
        let err = ConfigError::MissingFrom {
            directive: "allow".into(),
        };
        assert_eq!(err.to_string(), "'allow' must be followed by a 'from'");
    }

    #[test]
    fn unknown_order_message() {
        let err = ConfigError::UnknownOrder {
            value: "allow, deny".into(),
        };
        assert_eq!(err.to_string(), "unknown order value 'allow, deny'");
    }

    #[test]
    fn malformed_user_line_message() {
        let err = ConfigError::MalformedUserLine { line: 3 };
        assert_eq!(
            err.to_string(),
            "malformed user file line 3: expected 'user:hash'"
        );
    }
}
