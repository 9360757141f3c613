//! Lua script host.
//!
//! The script is one Lua chunk, executed once when the session starts. Any
//! global function it defines can be named as a hook by the story.
//!
//! Host functions are installed as globals when the host is created:
//!
//! ```lua
//! print(text [, colorName])
//! clearScreen()
//! addItem(name)
//! removeItem(name [, lost])
//! setCue(name [, loop])
//! printSeparator()
//! insertOption(nodeId, position, text, targetNodeId [, requiredItems [, removeItemsOnChoice]])
//! removeOption(nodeId, position)
//! ```
//!
//! The `te_`-prefixed names used by older scripts (`te_print`, `te_clear`,
//! `te_addItem`, `te_removeItem`, `te_setSound`, `te_printSeparator`,
//! `te_addOption`, `te_removeOption`) are aliases of the same functions.
//! Option positions are 0-based.
//!
//! The globals are thin forwarders into a dispatch table that only exists
//! while the chunk or a hook is running, because the Rust side of each call
//! borrows session state for exactly that long. Scripts may keep references
//! to the globals; calling them outside a hook is an error.

use std::cell::RefCell;
use std::fmt;
use std::fs;
use std::path::Path;

use mlua::{Error as LuaError, Lua, Result as LuaResult, Value};
use storyloom_foundation::{Error, NodeId, Result};
use storyloom_storage::Choice;
use tracing::debug;

use crate::api::Host;
use crate::script::ScriptHost;

const DISPATCH_TABLE: &str = "__storyloom_host";

const PRELUDE: &str = r#"
local dispatch = "__storyloom_host"

local function forward(name)
    return function(...)
        local host = rawget(_G, dispatch)
        if host == nil then
            error("host function '" .. name .. "' called outside of a running story", 2)
        end
        return host[name](...)
    end
end

for _, name in ipairs({
    "print", "clearScreen", "addItem", "removeItem", "setCue",
    "printSeparator", "insertOption", "removeOption",
}) do
    _G[name] = forward(name)
end

for alias, name in pairs({
    te_print = "print",
    te_clear = "clearScreen",
    te_addItem = "addItem",
    te_removeItem = "removeItem",
    te_setSound = "setCue",
    te_printSeparator = "printSeparator",
    te_addOption = "insertOption",
    te_removeOption = "removeOption",
}) do
    _G[alias] = _G[name]
end
"#;

/// A script host backed by an embedded Lua 5.4 state.
pub struct LuaHost {
    lua: Lua,
    chunk_name: String,
    source: String,
    loaded: bool,
}

impl LuaHost {
    /// Creates a host for the given Lua source. The source runs on [`ScriptHost::load`].
    ///
    /// # Errors
    ///
    /// Returns a `Script` error if the host functions cannot be installed.
    pub fn new(chunk_name: impl Into<String>, source: impl Into<String>) -> Result<Self> {
        let lua = Lua::new();
        lua.load(PRELUDE)
            .set_name("=storyloom")
            .exec()
            .map_err(into_error)?;
        Ok(Self {
            lua,
            chunk_name: chunk_name.into(),
            source: source.into(),
            loaded: false,
        })
    }

    /// Creates a host for a Lua file.
    ///
    /// # Errors
    ///
    /// Returns an `Io` error if the file cannot be read.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let source = fs::read_to_string(path)
            .map_err(|e| Error::io(format!("failed to read script '{}': {e}", path.display())))?;
        Self::new(format!("@{}", path.display()), source)
    }

    /// Returns true once the chunk has been executed.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Runs `body` with the host functions bound to `host`.
    fn with_host<R>(
        &self,
        host: &mut Host<'_>,
        body: impl FnOnce(&Lua) -> LuaResult<R>,
    ) -> Result<R> {
        let lua = &self.lua;
        let host = RefCell::new(host);

        lua.scope(|scope| {
            let api = lua.create_table()?;

            api.raw_set(
                "print",
                scope.create_function(|_, (text, color): (String, Option<String>)| {
                    host.borrow_mut()
                        .print(&text, color.as_deref())
                        .map_err(LuaError::external)
                })?,
            )?;

            api.raw_set(
                "clearScreen",
                scope.create_function(|_, ()| {
                    host.borrow_mut().clear_screen().map_err(LuaError::external)
                })?,
            )?;

            api.raw_set(
                "addItem",
                scope.create_function(|_, item: String| {
                    host.borrow_mut()
                        .add_item(&item)
                        .map(|_| ())
                        .map_err(LuaError::external)
                })?,
            )?;

            api.raw_set(
                "removeItem",
                scope.create_function(|_, (item, lost): (String, Option<bool>)| {
                    host.borrow_mut()
                        .remove_item(&item, lost.unwrap_or(false))
                        .map(|_| ())
                        .map_err(LuaError::external)
                })?,
            )?;

            api.raw_set(
                "setCue",
                scope.create_function(|_, (name, looping): (String, Option<bool>)| {
                    host.borrow_mut()
                        .set_cue(&name, looping.unwrap_or(false))
                        .map_err(LuaError::external)
                })?,
            )?;

            api.raw_set(
                "printSeparator",
                scope.create_function(|_, ()| {
                    host.borrow_mut()
                        .print_separator()
                        .map_err(LuaError::external)
                })?,
            )?;

            api.raw_set(
                "insertOption",
                scope.create_function(
                    |_,
                     (node, position, text, target, required, consuming): (
                        String,
                        i64,
                        String,
                        String,
                        Option<Vec<String>>,
                        Option<bool>,
                    )| {
                        let position = option_position(position).map_err(LuaError::external)?;
                        let choice = Choice {
                            text,
                            target: NodeId::new(target),
                            required_items: required.unwrap_or_default(),
                            remove_items_on_choice: consuming.unwrap_or(false),
                        };
                        host.borrow_mut()
                            .insert_option(&node, position, choice)
                            .map_err(LuaError::external)
                    },
                )?,
            )?;

            api.raw_set(
                "removeOption",
                scope.create_function(|_, (node, position): (String, i64)| {
                    let position = option_position(position).map_err(LuaError::external)?;
                    host.borrow_mut()
                        .remove_option(&node, position)
                        .map(|_| ())
                        .map_err(LuaError::external)
                })?,
            )?;

            let globals = lua.globals();
            globals.raw_set(DISPATCH_TABLE, api)?;
            let outcome = body(lua);
            globals.raw_set(DISPATCH_TABLE, Value::Nil)?;
            outcome
        })
        .map_err(into_error)
    }
}

impl fmt::Debug for LuaHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LuaHost")
            .field("chunk_name", &self.chunk_name)
            .field("loaded", &self.loaded)
            .finish_non_exhaustive()
    }
}

impl ScriptHost for LuaHost {
    fn load(&mut self, host: &mut Host<'_>) -> Result<()> {
        if self.loaded {
            debug!(chunk = %self.chunk_name, "script already loaded");
            return Ok(());
        }
        self.loaded = true;
        debug!(chunk = %self.chunk_name, "loading script");
        let source = self.source.as_str();
        let chunk_name = self.chunk_name.clone();
        self.with_host(host, |lua| lua.load(source).set_name(chunk_name).exec())
    }

    fn call_hook(&mut self, name: &str, node: &NodeId, host: &mut Host<'_>) -> Result<()> {
        self.with_host(host, |lua| match lua.globals().get::<_, Value>(name)? {
            Value::Function(hook) => hook.call::<_, ()>(node.as_str()),
            Value::Nil => {
                debug!(hook = name, "hook is not defined by the script");
                Ok(())
            }
            other => {
                debug!(hook = name, kind = other.type_name(), "hook is not a function");
                Ok(())
            }
        })
    }
}

fn option_position(position: i64) -> Result<usize> {
    usize::try_from(position)
        .map_err(|_| Error::script(format!("option position must not be negative, got {position}")))
}

/// Converts a Lua error, recovering the original error of a failed host call.
fn into_error(err: LuaError) -> Error {
    host_failure(&err).unwrap_or_else(|| Error::script(err.to_string()))
}

fn host_failure(err: &LuaError) -> Option<Error> {
    match err {
        LuaError::CallbackError { cause, .. } => host_failure(cause),
        LuaError::ExternalError(inner) => inner.downcast_ref::<Error>().cloned(),
        _ => None,
    }
}
