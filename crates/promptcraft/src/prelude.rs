//! Convenience re-exports for common `promptcraft` types.
//!
//! ```ignore
//! use promptcraft::prelude::*;
//! ```

pub use crate::capability::{ChatRewriter, FnCapability, RewriteCapability, RewriteFuture};
pub use crate::compiler::{PromptCompiler, RewriteRequest};
pub use crate::config::RewriterConfig;
pub use crate::error::{CompileError, UpstreamError};
pub use crate::instruction::system_instruction;
pub use crate::payload::{CompilationPayload, UserPreferences};
pub use crate::templates::{TargetModel, resolve};
pub use crate::{ChatClient, ChatRequest, Message};
