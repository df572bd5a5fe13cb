pub mod finder;
pub mod links;
pub mod pipeline;
pub mod remediation;
pub mod validator;

pub use crate::domain::model::{LinkAction, Remediation, ReplacementExample, ReviewState};
pub use crate::domain::ports::{ConfigProvider, ContentGenerator, LinkVerifier, SearchProvider, Storage};
pub use crate::utils::error::Result;
