use failure::Fail;

/// The two ways an NBON operation can fail.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ErrorKind {
    /// The caller violated cursor discipline.
    Logic,
    /// The input stream is malformed or truncated.
    Parse,
}

#[derive(Debug, Clone, Eq, PartialEq, Fail)]
/// An error raised by a reader or writer cursor.
///
/// Both kinds are terminal to the value being read or written. After a
/// [`Error::Parse`] the position of the underlying buffer is unspecified.
pub enum Error {
    /// A cursor was used while it was not ready: a nested scope it opened is
    /// still active, or it was a single-value cursor that already produced its
    /// value.
    #[fail(display = "NBON logic error: {}", _0)]
    Logic(&'static str),
    /// The byte stream did not contain what was expected.
    #[fail(display = "NBON parse error: {}", _0)]
    Parse(String),
}

impl Error {
    /// Creates a new [`Error::Parse`].
    ///
    /// # Arguments
    ///
    /// * `s: &str` - The message associated with the error.
    pub fn parse(s: &str) -> Self { Error::Parse(s.to_string()) }

    /// Which kind of error this is.
    ///
    /// # Example
    ///
    /// ```
    /// use nbon::errors::{Error, ErrorKind};
    ///
    /// assert_eq!(Error::parse("expected 'S'").kind(), ErrorKind::Parse);
    /// ```
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Logic(_) => ErrorKind::Logic,
            Error::Parse(_) => ErrorKind::Parse,
        }
    }

    /// Is this an [`Error::Logic`]?
    pub fn is_logic(&self) -> bool { self.kind() == ErrorKind::Logic }

    /// Is this an [`Error::Parse`]?
    pub fn is_parse(&self) -> bool { self.kind() == ErrorKind::Parse }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
