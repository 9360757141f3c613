//! Script hosts: the engine's view of "the script".
//!
//! A script is loaded once, then asked to run named hooks at fixed points of
//! every node visit. Hook names come from the story and are resolved when
//! called, so a story may name hooks the script never defines; such calls
//! do nothing.

use std::collections::HashMap;
use std::fmt;

use storyloom_foundation::{ErrorContext, NodeId, Result};
use tracing::trace;

use crate::api::Host;

/// Runs a story's script.
///
/// Calls are synchronous and run to completion. A script only ever touches
/// session state through the [`Host`] it is handed.
pub trait ScriptHost {
    /// Runs the script's top-level code. Called once, before the first node.
    ///
    /// # Errors
    ///
    /// Returns a `Script` error if the top-level code fails, or the error of
    /// any host operation it triggered.
    fn load(&mut self, host: &mut Host<'_>) -> Result<()>;

    /// Runs the hook with the given name, if the script defines one.
    ///
    /// `node` is the node being visited. A name the script does not define
    /// is not an error.
    ///
    /// # Errors
    ///
    /// Returns a `Script` error if the hook fails, or the error of any host
    /// operation it triggered.
    fn call_hook(&mut self, name: &str, node: &NodeId, host: &mut Host<'_>) -> Result<()>;
}

/// Runs an optional hook, treating a missing or empty name as a no-op.
///
/// Errors come back tagged with the node and hook.
///
/// # Errors
///
/// Propagates the hook's error.
pub fn run_hook<S: ScriptHost + ?Sized>(
    script: &mut S,
    name: Option<&str>,
    node: &NodeId,
    host: &mut Host<'_>,
) -> Result<()> {
    let Some(name) = name.filter(|name| !name.trim().is_empty()) else {
        return Ok(());
    };
    trace!(hook = name, %node, "running hook");
    script.call_hook(name, node, host).map_err(|mut err| {
        let inner = err.context.take().unwrap_or_default();
        err.with_context(ErrorContext {
            node: inner.node.or_else(|| Some(node.clone())),
            hook: inner.hook.or_else(|| Some(name.to_string())),
            stack: inner.stack,
        })
    })
}

/// A script with no code and no hooks.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoScript;

impl ScriptHost for NoScript {
    fn load(&mut self, _host: &mut Host<'_>) -> Result<()> {
        Ok(())
    }

    fn call_hook(&mut self, _name: &str, _node: &NodeId, _host: &mut Host<'_>) -> Result<()> {
        Ok(())
    }
}

type NativeHook = Box<dyn FnMut(&mut Host<'_>, &NodeId) -> Result<()>>;

/// A script whose hooks are Rust closures.
#[derive(Default)]
pub struct NativeScript {
    setup: Option<Box<dyn FnMut(&mut Host<'_>) -> Result<()>>>,
    hooks: HashMap<String, NativeHook>,
}

impl NativeScript {
    /// Creates a script with no hooks.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to register a hook.
    #[must_use]
    pub fn with_hook<F>(mut self, name: impl Into<String>, hook: F) -> Self
    where
        F: FnMut(&mut Host<'_>, &NodeId) -> Result<()> + 'static,
    {
        self.hooks.insert(name.into(), Box::new(hook));
        self
    }

    /// Builder method to register top-level code, run once on load.
    #[must_use]
    pub fn with_setup<F>(mut self, setup: F) -> Self
    where
        F: FnMut(&mut Host<'_>) -> Result<()> + 'static,
    {
        self.setup = Some(Box::new(setup));
        self
    }

    /// Returns true if a hook with this name is registered.
    #[must_use]
    pub fn defines(&self, name: &str) -> bool {
        self.hooks.contains_key(name)
    }
}

impl fmt::Debug for NativeScript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.hooks.keys().collect();
        names.sort();
        f.debug_struct("NativeScript")
            .field("setup", &self.setup.is_some())
            .field("hooks", &names)
            .finish()
    }
}

impl ScriptHost for NativeScript {
    fn load(&mut self, host: &mut Host<'_>) -> Result<()> {
        match self.setup.take() {
            Some(mut setup) => setup(host),
            None => Ok(()),
        }
    }

    fn call_hook(&mut self, name: &str, node: &NodeId, host: &mut Host<'_>) -> Result<()> {
        match self.hooks.get_mut(name) {
            Some(hook) => hook(host, node),
            None => {
                trace!(hook = name, "no native hook with this name");
                Ok(())
            }
        }
    }
}
