/// Returns early with an [`Error::Parse`](crate::errors::Error::Parse) built from a
/// format string.
macro_rules! parse_bail {
    ($($arg:tt)*) => {
        return Err($crate::errors::Error::Parse(format!($($arg)*)))
    };
}

/// Returns early with an [`Error::Logic`](crate::errors::Error::Logic).
macro_rules! logic_bail {
    ($msg:expr) => {
        return Err($crate::errors::Error::Logic($msg))
    };
}

/// Helper macro to make implementing `From` easier.
macro_rules! from_fn {
    ($to:ty, $from:ty, $fn:expr) => {
        impl From<$from> for $to {
            fn from(f: $from) -> $to { $fn(f) }
        }
    };
}

/// Helper macro to make implementing `From` easier.
macro_rules! from_as {
    ($to:tt, $from:ty, $as:ty) => {
        impl From<$from> for $to {
            fn from(f: $from) -> $to { $to::from(f as $as) }
        }
    };
}

/// Renders a byte the way parse errors quote it: printable ASCII as a
/// character, everything else in hex.
pub(crate) fn show_byte(b: u8) -> String {
    if b.is_ascii_graphic() {
        format!("'{}'", b as char)
    } else {
        format!("0x{:02x}", b)
    }
}
