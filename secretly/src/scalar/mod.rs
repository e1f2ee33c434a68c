//! Scalar leaves: the field types secret text can be written into.
//!
//! A [`Scalar`] reports its [`ScalarKind`] and accepts text. Kinds that have
//! no text conversion report [`ScalarKind::Unsupported`]; the decoder leaves
//! such fields untouched rather than failing.

mod duration;
mod parse;

use std::ffi::OsString;
use std::time::Duration;

use crate::{Bind, ConvertError, Shape};

pub use duration::parse_duration;
pub use parse::parse_bool;

/// Kind of value a scalar field holds, with bit widths for numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ScalarKind {
    /// UTF-8 text.
    String,
    /// Signed integer of the given width.
    Int(u32),
    /// Unsigned integer of the given width.
    Uint(u32),
    /// Floating point number of the given width.
    Float(u32),
    /// Boolean.
    Bool,
    /// Time span written in duration syntax.
    Duration,
    /// A leaf with no text conversion, named for diagnostics.
    Unsupported(&'static str),
}

impl ScalarKind {
    /// Name used in conversion errors, e.g. `int16` or `float64`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Int(8) => "int8",
            Self::Int(16) => "int16",
            Self::Int(32) => "int32",
            Self::Int(_) => "int64",
            Self::Uint(8) => "uint8",
            Self::Uint(16) => "uint16",
            Self::Uint(32) => "uint32",
            Self::Uint(_) => "uint64",
            Self::Float(32) => "float32",
            Self::Float(_) => "float64",
            Self::Bool => "bool",
            Self::Duration => "duration",
            Self::Unsupported(name) => name,
        }
    }

    /// Whether text can be converted into this kind.
    #[must_use]
    pub const fn is_supported(self) -> bool {
        !matches!(self, Self::Unsupported(_))
    }
}

/// A leaf field that secret text can be written into.
pub trait Scalar: Send {
    /// The kind of value held.
    fn kind(&self) -> ScalarKind;

    /// Replace the value with one parsed from `text`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConvertError`] when `text` does not parse as this kind.
    fn set_text(&mut self, text: &str) -> Result<(), ConvertError>;
}

macro_rules! bind_scalar {
    ($($ty:ty),* $(,)?) => {$(
        impl Bind for $ty {
            fn shape(&mut self) -> Shape<'_> {
                Shape::Scalar(self)
            }
        }
    )*};
}

macro_rules! signed_scalar {
    ($($ty:ty),* $(,)?) => {$(
        impl Scalar for $ty {
            fn kind(&self) -> ScalarKind {
                ScalarKind::Int(<$ty>::BITS)
            }

            fn set_text(&mut self, text: &str) -> Result<(), ConvertError> {
                *self = parse::parse_signed(text)?;
                Ok(())
            }
        }
        bind_scalar!($ty);
    )*};
}

macro_rules! unsigned_scalar {
    ($($ty:ty),* $(,)?) => {$(
        impl Scalar for $ty {
            fn kind(&self) -> ScalarKind {
                ScalarKind::Uint(<$ty>::BITS)
            }

            fn set_text(&mut self, text: &str) -> Result<(), ConvertError> {
                *self = parse::parse_unsigned(text)?;
                Ok(())
            }
        }
        bind_scalar!($ty);
    )*};
}

signed_scalar!(i8, i16, i32, i64, isize);
unsigned_scalar!(u8, u16, u32, u64, usize);

impl Scalar for f32 {
    fn kind(&self) -> ScalarKind {
        ScalarKind::Float(32)
    }

    fn set_text(&mut self, text: &str) -> Result<(), ConvertError> {
        *self = parse::parse_float(text)?;
        Ok(())
    }
}

impl Scalar for f64 {
    fn kind(&self) -> ScalarKind {
        ScalarKind::Float(64)
    }

    fn set_text(&mut self, text: &str) -> Result<(), ConvertError> {
        *self = parse::parse_float(text)?;
        Ok(())
    }
}

impl Scalar for String {
    fn kind(&self) -> ScalarKind {
        ScalarKind::String
    }

    fn set_text(&mut self, text: &str) -> Result<(), ConvertError> {
        text.clone_into(self);
        Ok(())
    }
}

impl Scalar for bool {
    fn kind(&self) -> ScalarKind {
        ScalarKind::Bool
    }

    fn set_text(&mut self, text: &str) -> Result<(), ConvertError> {
        *self = parse_bool(text).ok_or_else(|| ConvertError::InvalidSyntax(text.to_owned()))?;
        Ok(())
    }
}

impl Scalar for Duration {
    fn kind(&self) -> ScalarKind {
        ScalarKind::Duration
    }

    fn set_text(&mut self, text: &str) -> Result<(), ConvertError> {
        *self = parse_duration(text)?;
        Ok(())
    }
}

// Leaves without a text conversion. Decoding skips them.

impl Scalar for char {
    fn kind(&self) -> ScalarKind {
        ScalarKind::Unsupported("char")
    }

    fn set_text(&mut self, _text: &str) -> Result<(), ConvertError> {
        Ok(())
    }
}

impl Scalar for OsString {
    fn kind(&self) -> ScalarKind {
        ScalarKind::Unsupported("os string")
    }

    fn set_text(&mut self, _text: &str) -> Result<(), ConvertError> {
        Ok(())
    }
}

bind_scalar!(f32, f64, String, bool, Duration, char, OsString);
