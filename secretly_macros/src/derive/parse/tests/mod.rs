//! Tests for `#[secretly(...)]` parsing behaviour.
