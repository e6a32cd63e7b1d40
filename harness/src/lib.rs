//! Confirmation-driven invocation harness for Anchor programs.
//!
//! A test run resolves a [`ClientContext`] once, resolves a [`ProgramHandle`]
//! from the program's IDL, builds an [`OperationDescriptor`] and hands it to
//! [`invoke`], which submits it exactly once and resolves only after the
//! ledger reports a terminal status or the deadline elapses.
//!
//! ```no_run
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! use tzt_harness::{resolve_program, resolve_provider, InterfaceDescription};
//!
//! let ctx = resolve_provider()?;
//! let idl = InterfaceDescription::workspace("a1")?;
//! let program = resolve_program(&ctx, &idl)?;
//!
//! let receipt = program.method("initialize")?.rpc(&ctx).await?;
//! println!("Your transaction signature {}", receipt.id());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod context;
pub mod descriptor;
pub mod error;
pub mod idl;
pub mod invoker;
pub mod ledger;
pub mod program;
pub mod receipt;
pub mod telemetry;

pub use config::{Cluster, HarnessConfig};
pub use context::{resolve_provider, ClientContext};
pub use descriptor::OperationDescriptor;
pub use error::{ConfigError, InterfaceError, InvocationError, LedgerError};
pub use idl::InterfaceDescription;
pub use invoker::{invoke, invoke_with_deadline};
pub use ledger::{rpc::RpcLedger, svm::SvmLedger, Ledger};
pub use program::{resolve_program, MethodBuilder, ProgramHandle};
pub use receipt::{ConfirmationReceipt, ConfirmationStatus};
