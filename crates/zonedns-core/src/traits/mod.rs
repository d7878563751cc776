//! Core traits for zonedns
//!
//! This module defines the abstract interfaces that all providers must follow.
//!
//! - [`RecordGetter`], [`RecordAppender`], [`RecordDeleter`], [`RecordSetter`]:
//!   individual record-management capabilities
//! - [`DnsProvider`]: a provider supporting all of them
//! - [`DnsProviderFactory`]: construction from [`ProviderConfig`](crate::ProviderConfig)

pub mod dns_provider;

pub use dns_provider::{
    DnsProvider, DnsProviderFactory, RecordAppender, RecordDeleter, RecordGetter, RecordSetter,
};
