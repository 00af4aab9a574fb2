#[derive(Debug)]
pub struct Diagnostic {
    pub level: DiagnosticLevel,
    pub message: String,
    pub location: Option<String>,
}
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticLevel {
    Error,
    Warning,
    Info,
}

impl Diagnostic {
    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            level: DiagnosticLevel::Error,
            message: msg.into(),
            location: None,
        }
    }
    pub fn warning(msg: impl Into<String>) -> Self {
        Self {
            level: DiagnosticLevel::Warning,
            message: msg.into(),
            location: None,
        }
    }
    pub fn info(msg: impl Into<String>) -> Self {
        Self {
            level: DiagnosticLevel::Info,
            message: msg.into(),
            location: None,
        }
    }
    pub fn at(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}
