#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod codec;
mod config;
mod discarder;
mod multibranch;
mod parameter;
mod pipeline;
mod source;
mod trigger;

pub mod xml;

pub use codec::{JenkinsCodec, JenkinsJob};
pub use config::{DEFAULT_INDENT, RenderConfig};
pub use devops_core::{Error, ErrorKind, Result, types};
pub use trigger::cron_spec_for_interval;

/// Tracing target for job document rendering and parsing.
pub const TRACING_TARGET: &str = "devops_jenkins::codec";
