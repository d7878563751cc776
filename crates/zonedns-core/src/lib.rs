// # zonedns-core
//
// Core library for zonedns: a provider-agnostic contract for listing,
// adding, removing and replacing DNS records in a zone.
//
// ## Architecture Overview
//
// - **Record**: the generic record shape shared by every provider
// - **RecordGetter / RecordAppender / RecordDeleter / RecordSetter**:
//   record-management capabilities
// - **DnsProvider**: a provider implementing all four capabilities
// - **ProviderRegistry**: plugin-based registry for provider factories
//
// ## Design Principles
//
// 1. **Separation of Concerns**: the contract is separate from implementations
// 2. **Plugin-Based**: providers are registered dynamically, no hard-coded if-else
// 3. **Library-First**: front ends are thin wrappers over this crate
// 4. **Stateless Providers**: every call re-reads what it needs from the remote side

pub mod config;
pub mod error;
pub mod record;
pub mod registry;
pub mod traits;

// Re-export core types for convenience
pub use config::{ProviderConfig, SetStrategy};
pub use error::{Error, Result};
pub use record::{LINE_INDEX_KEY, Record};
pub use registry::ProviderRegistry;
pub use traits::{
    DnsProvider, DnsProviderFactory, RecordAppender, RecordDeleter, RecordGetter, RecordSetter,
};
