//! Type descriptors that let the walker traverse arbitrary records.
//!
//! [`Bind`] is implemented by every type that may appear as a field. It
//! reports the value's [`Shape`]: a nested [`Record`] to recurse into, a
//! [`Scalar`] leaf to bind a secret to, or something unsupported that the
//! walk skips. `#[derive(Secrets)]` implements [`Record`] and [`Bind`] for
//! structs; the implementations below cover the standard library.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};

use crate::defaults::TAG_VERSION;
use crate::{ConvertError, Scalar, ScalarKind, SecretlyError, SecretlyResult, TagError};

/// How the walker should treat a value.
pub enum Shape<'a> {
    /// A record whose fields are walked and flattened into the parent.
    Record(&'a mut dyn Record),
    /// A leaf a secret can be decoded into.
    Scalar(&'a mut dyn Scalar),
    /// A collection or opaque value; skipped without error.
    Unsupported,
}

impl Shape<'_> {
    /// Whether this shape is a record.
    #[must_use]
    pub const fn is_record(&self) -> bool {
        matches!(self, Self::Record(_))
    }
}

/// A value that can be reached by the walker.
pub trait Bind: Send {
    /// Report how the walker should treat this value.
    ///
    /// Implementations may allocate defaults so nested records become
    /// reachable; see the `Option` implementation.
    fn shape(&mut self) -> Shape<'_>;
}

/// A record with named fields.
pub trait Record: Send {
    /// Offer every field to `visitor`, in declaration order.
    ///
    /// # Errors
    ///
    /// Propagates the first error returned by `visitor`.
    fn visit_fields<'a>(&'a mut self, visitor: &mut dyn FieldVisitor<'a>) -> SecretlyResult<()>;
}

/// Receives each field of a [`Record`].
pub trait FieldVisitor<'a> {
    /// Handle one field and its write handle.
    ///
    /// # Errors
    ///
    /// Returns an error to abort the traversal.
    fn visit(&mut self, meta: &FieldMeta, slot: &'a mut dyn Bind) -> SecretlyResult<()>;
}

/// A field's declared name and its raw metadata.
///
/// Metadata is kept as written; interpretation and validation happen when
/// the field descriptor is built so failures carry the field's name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMeta {
    name: &'static str,
    tags: &'static [(&'static str, &'static str)],
}

impl FieldMeta {
    /// Describe a field named `name` carrying `tags` as `(key, value)` pairs.
    #[must_use]
    pub const fn new(name: &'static str, tags: &'static [(&'static str, &'static str)]) -> Self {
        Self { name, tags }
    }

    /// Declared name of the field.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Raw value for `key`, if present. The last occurrence wins.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<&'static str> {
        self.tags
            .iter()
            .rev()
            .find(|(candidate, _)| *candidate == key)
            .map(|(_, value)| *value)
    }

    /// Whether `key` is present at all.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.lookup(key).is_some()
    }

    /// Parse the value for `key`, returning `None` when it is absent.
    ///
    /// # Errors
    ///
    /// Returns [`SecretlyError::Tag`] naming this field and `key` when the
    /// value does not parse.
    pub fn parse<T: FromTag>(&self, key: &'static str) -> SecretlyResult<Option<T>> {
        self.lookup(key)
            .map(T::from_tag)
            .transpose()
            .map_err(|source| SecretlyError::tag(self.name, key, source))
    }
}

/// Conversion from a raw metadata value.
pub trait FromTag: Sized {
    /// Parse `raw`.
    ///
    /// # Errors
    ///
    /// Returns a [`TagError`] describing why `raw` is unusable.
    fn from_tag(raw: &str) -> Result<Self, TagError>;
}

impl FromTag for String {
    fn from_tag(raw: &str) -> Result<Self, TagError> {
        Ok(raw.to_owned())
    }
}

impl FromTag for bool {
    fn from_tag(raw: &str) -> Result<Self, TagError> {
        crate::parse_bool(raw).ok_or_else(|| TagError::InvalidStructTagValue {
            value: raw.to_owned(),
            expected: "bool",
        })
    }
}

/// Version tags must name something.
pub(crate) fn version_from_tag(meta: &FieldMeta) -> SecretlyResult<Option<String>> {
    match meta.parse::<String>(TAG_VERSION)? {
        Some(version) if version.is_empty() => Err(SecretlyError::tag(
            meta.name(),
            TAG_VERSION,
            TagError::InvalidSecretVersion,
        )),
        other => Ok(other),
    }
}

impl<T: Bind + ?Sized> Bind for Box<T> {
    fn shape(&mut self) -> Shape<'_> {
        (**self).shape()
    }
}

/// `Option` plays the role of a nullable pointer.
///
/// The shape follows `T`, never the current value. A `None` holding a
/// record type is replaced by `T::default()` so the record's fields can be
/// written. A `None` holding a scalar stays `None` until a value is decoded
/// into it. A `None` holding anything else stays `None` and is skipped.
impl<T: Bind + Default> Bind for Option<T> {
    fn shape(&mut self) -> Shape<'_> {
        if self.is_none() {
            match T::default().shape() {
                Shape::Record(_) => *self = Some(T::default()),
                Shape::Scalar(_) => return Shape::Scalar(self),
                Shape::Unsupported => return Shape::Unsupported,
            }
        }
        match self {
            Some(inner) => inner.shape(),
            None => Shape::Unsupported,
        }
    }
}

impl<T: Bind + Default> Scalar for Option<T> {
    fn kind(&self) -> ScalarKind {
        match T::default().shape() {
            Shape::Scalar(inner) => inner.kind(),
            Shape::Record(_) | Shape::Unsupported => ScalarKind::Unsupported("option"),
        }
    }

    fn set_text(&mut self, text: &str) -> Result<(), ConvertError> {
        let mut value = T::default();
        if let Shape::Scalar(inner) = value.shape() {
            inner.set_text(text)?;
            *self = Some(value);
        }
        Ok(())
    }
}

macro_rules! unsupported {
    ($(impl<$($param:ident $(: $bound:path)?),*> for $ty:ty;)*) => {$(
        impl<$($param: Send $(+ $bound)?),*> Bind for $ty {
            fn shape(&mut self) -> Shape<'_> {
                Shape::Unsupported
            }
        }
    )*};
}

unsupported! {
    impl<T> for Vec<T>;
    impl<T> for VecDeque<T>;
    impl<T> for BTreeSet<T>;
    impl<K, V> for BTreeMap<K, V>;
    impl<T, S> for HashSet<T, S>;
    impl<K, V, S> for HashMap<K, V, S>;
}

impl<T: Send, const N: usize> Bind for [T; N] {
    fn shape(&mut self) -> Shape<'_> {
        Shape::Unsupported
    }
}

impl Bind for serde_json::Value {
    fn shape(&mut self) -> Shape<'_> {
        Shape::Unsupported
    }
}
