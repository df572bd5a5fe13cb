// Domain layer: document models and ports (interfaces) to the LLM, search and storage collaborators.

pub mod model;
pub mod ports;
