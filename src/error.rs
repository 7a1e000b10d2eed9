use snafu::Snafu;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("Environment variable '{key}' is required but not found"))]
    MissingEnvVar { key: String },

    #[snafu(display("Unsupported storage provider: {provider}"))]
    UnsupportedProvider { provider: String },

    #[snafu(display("Not found: {path}"))]
    NotFound { path: String },

    #[snafu(display("Operation cancelled"))]
    Cancelled,

    #[snafu(display("Failed to list containers: {source}"))]
    ListContainersFailed { source: Box<Error> },

    #[snafu(display("Failed to expand node '{node}': {source}"))]
    ExpandFailed { node: String, source: Box<Error> },

    #[snafu(display("Failed to stat container '{container}': {source}"))]
    StatFailed { container: String, source: Box<Error> },

    #[snafu(display("Failed to purge container '{container}': {source}"))]
    PurgeFailed { container: String, source: Box<Error> },

    #[snafu(display("OpenDAL error: {source}"))]
    OpenDal { source: opendal::Error },

    #[snafu(display("IO error: {source}"))]
    Io { source: std::io::Error },
}

impl Error {
    /// True when the error means the target object no longer exists.
    ///
    /// The bulk-delete loop treats this class as "already deleted" so the
    /// operation stays safe to re-run or to race against external deletions.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::NotFound { .. } => true,
            Error::OpenDal { source } => source.kind() == opendal::ErrorKind::NotFound,
            _ => false,
        }
    }
}

impl From<opendal::Error> for Error {
    fn from(error: opendal::Error) -> Self {
        Error::OpenDal { source: error }
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Error::Io { source: error }
    }
}

/// Convert different error types into our unified Error type.
pub trait IntoPurgifyError {
    fn into_error(self) -> Error;
}

impl IntoPurgifyError for Error {
    fn into_error(self) -> Error {
        self
    }
}

impl IntoPurgifyError for opendal::Error {
    fn into_error(self) -> Error {
        self.into()
    }
}

impl IntoPurgifyError for std::io::Error {
    fn into_error(self) -> Error {
        self.into()
    }
}

/// Macro to wrap a Result-producing expression into a Snafu variant with `source: Box<Error>`.
/// Example:
/// wrap_err!(op.await, PurgeFailed { container: name.to_string() })?
#[macro_export]
macro_rules! wrap_err {
    ($expr:expr, $variant:ident { $($field:ident : $value:expr),* $(,)? }) => {{
        $expr.map_err(|e| {
            let src: $crate::error::Error = $crate::error::IntoPurgifyError::into_error(e);
            $crate::error::Error::$variant { $($field: $value),*, source: Box::new(src) }
        })
    }};
    ($expr:expr, $variant:ident) => {{
        $expr.map_err(|e| {
            let src: $crate::error::Error = $crate::error::IntoPurgifyError::into_error(e);
            $crate::error::Error::$variant { source: Box::new(src) }
        })
    }};
}
