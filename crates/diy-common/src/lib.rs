//! Diy-Common: identifiers and errors shared by the storage layer and the
//! application.
//!
//! - **Typed IDs**: integer newtypes for projects, materials, steps and
//!   categories, so one kind of key cannot be passed where another is expected
//! - **Error Handling**: the unified [`Error`] type and [`Result`] alias
//!
//! # Examples
//!
//! ```
//! use diy_common::{Error, ProjectId, Result};
//!
//! fn lookup(id: ProjectId) -> Result<()> {
//!     Err(Error::not_found("project", id))
//! }
//!
//! let err = lookup(ProjectId::from(7)).unwrap_err();
//! assert_eq!(err.to_string(), "project not found: 7");
//! ```

pub mod error;
pub mod ids;

pub use error::{Error, Result};
pub use ids::*;
