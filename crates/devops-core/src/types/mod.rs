//! Typed model of pipeline job configurations.
//!
//! Optional blocks are `Option`s throughout: `None` means the block is not
//! configured at all, which the build server treats differently from a
//! block holding empty values.

mod discard;
mod job;
mod parameter;
mod source;
mod trigger;

pub use discard::DiscardPolicy;
pub use job::{MultiBranchPipeline, PipelineJob};
pub use parameter::{Parameter, ParameterKind};
pub use source::{
    CloneOptions, ForkDiscovery, GitSource, HostedSource, SingleSvnSource, SourceDescription,
    SourceType, SvnSource,
};
pub use trigger::{BranchEventTrigger, CronTrigger, RemoteTrigger, ScanTrigger};
