use std::fmt;

/// Terminal outcome of an access check.
///
/// A [`Forbidden`](Decision::Forbidden) decision is a normal, successful
/// result of evaluation, not an error; the surrounding pipeline decides how
/// to terminate the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Decision {
    /// Access granted; the pipeline continues to later authorization stages.
    Permit,
    /// Access denied; the pipeline must stop and emit a forbidden response.
    Forbidden,
    /// This stage could not grant access, but a later requirement check may
    /// still do so. Only produced under satisfy-any with a require directive
    /// present.
    Deferred,
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Permit => write!(f, "permit"),
            Decision::Forbidden => write!(f, "forbidden"),
            Decision::Deferred => write!(f, "deferred"),
        }
    }
}
