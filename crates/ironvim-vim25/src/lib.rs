//! Data types and operation bindings for the `urn:vim25` API.
//!
//! The bindings cover a curated subset of vim25: the session, property
//! collector, task, inventory and power operations a management client needs.
//! Operations outside [`methods::CATALOG`] have no request type here.
//!
//! Every operation in [`methods::CATALOG`] has a named wrapper in [`methods`]:
//!
//! ```ignore
//! let res = methods::login(&ctx, &client, Login { this, user_name, password, locale: None })?;
//! ```
mod macros;

pub mod methods;
pub mod types;

pub use ironvim_soap::{Context, RoundTripper, SoapError};
