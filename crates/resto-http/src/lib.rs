//! Request model, background executor and file helpers for resto.

pub mod executor;
pub mod files;
pub mod model;
pub mod update;

pub use executor::{ExecutorCmd, ExecutorEvent, HttpExecutor, HttpRequestError, HttpResponse};
pub use model::{Credentials, HttpMethod, RequestSpec};
pub use update::UpdateStatus;
