//! Flattens a record into its field descriptors.

use tracing::{debug, trace};

use crate::defaults::TAG_IGNORED;
use crate::{Bind, Field, FieldMeta, FieldVisitor, SecretlyError, SecretlyResult, Shape};

struct Walker<'a> {
    fields: Vec<Field<'a>>,
}

impl<'a> FieldVisitor<'a> for Walker<'a> {
    fn visit(&mut self, meta: &FieldMeta, slot: &'a mut dyn Bind) -> SecretlyResult<()> {
        if meta.parse::<bool>(TAG_IGNORED)?.unwrap_or(false) {
            debug!(field = meta.name(), "ignored field skipped");
            return Ok(());
        }
        match slot.shape() {
            Shape::Record(record) => {
                trace!(field = meta.name(), "descending into nested record");
                record.visit_fields(self)
            }
            Shape::Scalar(scalar) => {
                self.fields.push(Field::new(meta, scalar)?);
                Ok(())
            }
            Shape::Unsupported => {
                debug!(field = meta.name(), "unsupported field type skipped");
                Ok(())
            }
        }
    }
}

/// Walk `spec` and return one descriptor per bound field, in declaration
/// order, with nested records flattened in place.
///
/// `None` options holding records are replaced by defaults so their fields
/// can be written.
///
/// # Errors
///
/// Returns [`SecretlyError::InvalidSpecification`] when `spec` is not a
/// record, and the first metadata error otherwise. No partial list is
/// returned.
pub fn walk(spec: &mut dyn Bind) -> SecretlyResult<Vec<Field<'_>>> {
    let Shape::Record(record) = spec.shape() else {
        return Err(SecretlyError::InvalidSpecification);
    };
    let mut walker = Walker { fields: Vec::new() };
    record.visit_fields(&mut walker)?;
    trace!(count = walker.fields.len(), "walk complete");
    Ok(walker.fields)
}

#[cfg(test)]
mod tests {
    use anyhow::{Result, ensure};
    use rstest::rstest;

    use super::*;
    use crate::{Record, Secrets};

    #[derive(Default, Secrets)]
    struct Inner {
        leaf: String,
    }

    #[derive(Default, Secrets)]
    struct Outer {
        first: String,
        inner: Inner,
        lazy: Option<Inner>,
        #[secretly(ignored)]
        skipped: String,
        list: Vec<String>,
        port: u16,
    }

    #[test]
    fn fields_are_flattened_in_declaration_order() -> Result<()> {
        let mut outer = Outer::default();
        let names: Vec<_> = walk(&mut outer)?.iter().map(Field::field_name).collect();
        ensure!(names == ["First", "Leaf", "Leaf", "Port"], "walked {names:?}");
        ensure!(outer.lazy.is_some(), "record options are allocated");
        Ok(())
    }

    #[derive(Default, Secrets)]
    struct Tagged {
        token: String,
        tags: Option<Vec<String>>,
    }

    #[rstest]
    #[case::absent(None)]
    #[case::empty(Some(Vec::new()))]
    #[case::filled(Some(vec!["a".to_owned()]))]
    fn optional_collections_are_skipped(#[case] tags: Option<Vec<String>>) -> Result<()> {
        let mut spec = Tagged {
            token: String::new(),
            tags,
        };
        let names: Vec<_> = walk(&mut spec)?.iter().map(Field::field_name).collect();
        ensure!(names == ["Token"], "walked {names:?}");
        Ok(())
    }

    #[test]
    fn non_records_are_rejected() {
        let mut text = String::new();
        assert!(matches!(walk(&mut text), Err(SecretlyError::InvalidSpecification)));
        let mut list: Vec<u8> = Vec::new();
        assert!(matches!(walk(&mut list), Err(SecretlyError::InvalidSpecification)));
    }

    #[test]
    fn record_impls_can_be_written_by_hand() -> Result<()> {
        struct Manual {
            token: String,
        }

        impl Record for Manual {
            fn visit_fields<'a>(
                &'a mut self,
                visitor: &mut dyn FieldVisitor<'a>,
            ) -> SecretlyResult<()> {
                visitor.visit(&FieldMeta::new("Token", &[("version", "3")]), &mut self.token)
            }
        }

        impl Bind for Manual {
            fn shape(&mut self) -> Shape<'_> {
                Shape::Record(self)
            }
        }

        let mut manual = Manual { token: String::new() };
        let fields = walk(&mut manual)?;
        let versions: Vec<_> = fields.iter().map(Field::secret_version).collect();
        ensure!(versions == ["3"], "versions were {versions:?}");
        Ok(())
    }
}
