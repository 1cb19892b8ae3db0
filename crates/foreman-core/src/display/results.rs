//! Result wrapper types for displaying operation outcomes.
//!
//! Create, update and delete results share one layout per kind of resource;
//! [`Resource`] supplies the noun, ID and label each message needs. Results
//! of mutations that ran a status cascade also list the parent statuses that
//! moved.
//!
//! ```rust
//! use foreman_core::{
//!     display::CreateResult,
//!     models::Client,
//! };
//! use jiff::Timestamp;
//!
//! let client = Client {
//!     id: 3,
//!     name: "Harbor Homes".to_string(),
//!     email: None,
//!     phone: None,
//!     created_at: Timestamp::now(),
//!     updated_at: Timestamp::now(),
//! };
//! let output = CreateResult::new(client).to_string();
//! assert!(output.starts_with("Created client with ID: 3"));
//! ```

use std::fmt;

use crate::{
    models::{Client, Project, Step, Task},
    tracker::Cascaded,
};

/// Naming information used by the result wrappers.
pub trait Resource: fmt::Display {
    /// Lower-case noun, e.g. `"step"`.
    const KIND: &'static str;

    fn id(&self) -> u64;

    /// Human readable name of this resource.
    fn label(&self) -> &str;
}

impl Resource for Client {
    const KIND: &'static str = "client";

    fn id(&self) -> u64 {
        self.id
    }

    fn label(&self) -> &str {
        &self.name
    }
}

impl Resource for Project {
    const KIND: &'static str = "project";

    fn id(&self) -> u64 {
        self.id
    }

    fn label(&self) -> &str {
        &self.title
    }
}

impl Resource for Step {
    const KIND: &'static str = "step";

    fn id(&self) -> u64 {
        self.id
    }

    fn label(&self) -> &str {
        &self.title
    }
}

impl Resource for Task {
    const KIND: &'static str = "task";

    fn id(&self) -> u64 {
        self.id
    }

    fn label(&self) -> &str {
        &self.title
    }
}

/// Wrapper type for displaying the result of create operations.
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T> CreateResult<T> {
    /// Create a new CreateResult wrapper.
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl<T: Resource> fmt::Display for CreateResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created {} with ID: {}", T::KIND, self.resource.id())?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Wrapper type for displaying the result of update operations.
///
/// The wrapper can list the specific changes made during the update.
pub struct UpdateResult<T> {
    pub resource: T,
    pub changes: Vec<String>,
}

impl<T> UpdateResult<T> {
    /// Create a new UpdateResult wrapper.
    pub fn new(resource: T) -> Self {
        Self {
            resource,
            changes: Vec::new(),
        }
    }

    /// Create an UpdateResult with a list of changes made.
    pub fn with_changes(resource: T, changes: Vec<String>) -> Self {
        Self { resource, changes }
    }
}

impl<T: Resource> fmt::Display for UpdateResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Updated {} with ID: {}", T::KIND, self.resource.id())?;

        if !self.changes.is_empty() {
            writeln!(f)?;
            writeln!(f, "Changes made:")?;
            for change in &self.changes {
                writeln!(f, "- {change}")?;
            }
        }

        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Wrapper type for displaying the result of delete operations.
pub struct DeleteResult<T> {
    pub resource: T,
}

impl<T> DeleteResult<T> {
    /// Create a new DeleteResult wrapper.
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl<T: Resource> fmt::Display for DeleteResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Deleted {} '{}' (ID: {})",
            T::KIND,
            self.resource.label(),
            self.resource.id()
        )
    }
}

/// The wrapped message followed by the status writes of the cascade.
fn fmt_cascade<D: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    message: D,
    cascaded: &Cascaded<impl Resource>,
) -> fmt::Result {
    write!(f, "{message}")?;
    if !cascaded.cascade.is_noop() {
        writeln!(f)?;
        writeln!(f, "Status cascade:")?;
        write!(f, "{}", cascaded.cascade)?;
    }
    Ok(())
}

impl<T: Resource> fmt::Display for CreateResult<Cascaded<T>> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_cascade(f, CreateResult::new(&self.resource.resource), &self.resource)
    }
}

impl<T: Resource> fmt::Display for UpdateResult<Cascaded<T>> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = UpdateResult::with_changes(&self.resource.resource, self.changes.clone());
        fmt_cascade(f, inner, &self.resource)
    }
}

impl<T: Resource> fmt::Display for DeleteResult<Cascaded<T>> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_cascade(f, DeleteResult::new(&self.resource.resource), &self.resource)
    }
}

impl<T: Resource> Resource for &T {
    const KIND: &'static str = T::KIND;

    fn id(&self) -> u64 {
        (**self).id()
    }

    fn label(&self) -> &str {
        (**self).label()
    }
}
