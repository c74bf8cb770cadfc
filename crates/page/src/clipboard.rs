use std::fmt;

/// How the page answers `navigator.clipboard.writeText`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ClipboardPolicy {
    #[default]
    Granted,
    /// The permission prompt was refused or the document is not focused.
    Denied,
    /// No async clipboard API (insecure context, old engine).
    Unavailable,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClipboardError {
    PermissionDenied,
    Unavailable,
}

impl fmt::Display for ClipboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClipboardError::PermissionDenied => write!(f, "clipboard write permission denied"),
            ClipboardError::Unavailable => write!(f, "clipboard API unavailable"),
        }
    }
}

impl std::error::Error for ClipboardError {}

#[derive(Clone, Debug, Default)]
pub struct Clipboard {
    policy: ClipboardPolicy,
    contents: Option<String>,
    writes: usize,
}

impl Clipboard {
    pub fn new(policy: ClipboardPolicy) -> Self {
        Self {
            policy,
            contents: None,
            writes: 0,
        }
    }

    pub fn set_policy(&mut self, policy: ClipboardPolicy) {
        self.policy = policy;
    }

    pub fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        match self.policy {
            ClipboardPolicy::Granted => {
                self.contents = Some(text.to_string());
                self.writes += 1;
                Ok(())
            }
            ClipboardPolicy::Denied => Err(ClipboardError::PermissionDenied),
            ClipboardPolicy::Unavailable => Err(ClipboardError::Unavailable),
        }
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }

    /// Successful writes so far.
    pub fn writes(&self) -> usize {
        self.writes
    }
}
