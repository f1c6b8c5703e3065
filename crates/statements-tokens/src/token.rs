use std::fmt;

use uuid::Uuid;

/// Opaque download token.
///
/// Rendered as the 32 lowercase hex digits of a random (v4) UUID, so it is safe to embed
/// in a URL path segment. Callers must not rely on any internal structure.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DownloadToken(String);

impl DownloadToken {
    pub(crate) fn generate() -> Self {
        DownloadToken(Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for DownloadToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DownloadToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
