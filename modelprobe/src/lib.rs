//! Ask a hosted model what it is and stream the answer.
//!
//! The binary wires these pieces together in a fixed order:
//! [`config`] → [`overrides`] → client → [`request`] → [`runner`].

pub mod config;
pub mod logging;
pub mod overrides;
pub mod request;
pub mod runner;

pub use config::{ConfigError, EnvSnapshot, LogFormat, LoggingConfig, ProbeConfig};
pub use overrides::{read_override, PromptOverrides};
pub use request::{build_probe_request, PROMPT_TEXT};
pub use runner::{print_stream, run_probe};
