use std::path::Path;

/// Broad classification of an [`AppError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The input dataset does not exist.
    MissingInputFile,
    /// The input exists but is malformed (schema, dates, numbers) or the
    /// command line is inconsistent.
    Input,
    /// Terminal, rendering or export failures.
    Runtime,
}

#[derive(Clone)]
pub struct AppError {
    kind: ErrorKind,
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        let kind = if exit_code == 2 {
            ErrorKind::Input
        } else {
            ErrorKind::Runtime
        };
        Self {
            kind,
            exit_code,
            message: message.into(),
        }
    }

    /// The single fatal error the dashboard reports before rendering anything.
    pub fn missing_input_file(path: &Path) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self {
            kind: ErrorKind::MissingInputFile,
            exit_code: 2,
            message: format!(
                "Error: {name} not found. Please ensure the data cleaning step was run."
            ),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn is_missing_input(&self) -> bool {
        self.kind == ErrorKind::MissingInputFile
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("kind", &self.kind)
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
