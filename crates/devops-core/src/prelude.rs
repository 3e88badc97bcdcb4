//! Convenient re-exports for common use.

pub use crate::error::{BoxedError, Error, ErrorKind, Result};
pub use crate::types::{
    BranchEventTrigger, CloneOptions, CronTrigger, DiscardPolicy, ForkDiscovery, GitSource,
    HostedSource, MultiBranchPipeline, Parameter, ParameterKind, PipelineJob, RemoteTrigger,
    ScanTrigger, SingleSvnSource, SourceDescription, SourceType, SvnSource,
};
