//! Bind secrets from a secret manager into the fields of a struct.
//!
//! Derive [`Secrets`] on a struct, describe each field with
//! `#[secretly(...)]`, and hand it to [`process`] or a [`Client`] together
//! with a [`SecretProvider`]. The struct is walked into a list of
//! [`Field`] descriptors, optional [`ProcessOption`]s adjust them, and each
//! secret is fetched (through a [`SecretCache`]) and decoded into its
//! field.
//!
//! ```
//! use secretly::{Client, MemoryProvider, Secrets, with_default_version};
//!
//! #[derive(Default, Secrets)]
//! struct Spec {
//!     service_integration_token: String,
//!     #[secretly(type = "json", key = "Username", split_words)]
//!     database_credentials: String,
//!     #[secretly(version = "2")]
//!     port: u16,
//! }
//!
//! # tokio::runtime::Builder::new_current_thread().enable_all().build()?.block_on(async {
//! let provider = MemoryProvider::new()
//!     .with_secret("ServiceIntegrationToken", "latest", "tok-value")
//!     .with_secret("Database_Credentials", "latest", r#"{"Username":"u"}"#)
//!     .with_secret("Port", "2", "5432");
//! let client = Client::new(provider);
//! let mut spec = Spec::default();
//! client.process(&mut spec, &[with_default_version("latest")]).await?;
//! assert_eq!(spec.service_integration_token, "tok-value");
//! assert_eq!(spec.database_credentials, "u");
//! assert_eq!(spec.port, 5432);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! # })?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

extern crate self as secretly;

pub use secretly_macros::Secrets;

mod cache;
mod client;
mod config;
mod decode;
pub mod defaults;
mod error;
mod field;
mod names;
mod options;
mod process;
mod provider;
mod scalar;
mod shape;
mod walk;
mod yaml;

pub use cache::{MemoryCache, NoOpCache, SecretCache};
pub use client::Client;
pub use config::ClientConfig;
pub use decode::decode;
pub use error::{ConvertError, SecretlyError, SecretlyResult, TagError};
pub use field::{Field, FieldSpec, SecretType};
pub use names::split_words;
pub use options::{
    ProcessOption, with_default_version, with_patch, with_patch_file, with_versions_from_env,
};
pub use process::{ProcessContext, process, resolve_fields};
pub use provider::{FnProvider, MemoryProvider, ProviderError, SecretProvider};
pub use scalar::{Scalar, ScalarKind, parse_bool, parse_duration};
pub use shape::{Bind, FieldMeta, FieldVisitor, FromTag, Record, Shape};
pub use walk::walk;

pub use tokio_util::sync::CancellationToken;
