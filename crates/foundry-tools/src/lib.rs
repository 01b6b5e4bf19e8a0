//! Built-in knowledge tools.
//!
//! Each tool is a plain function over a small static table that renders a
//! Markdown answer. Bad or unknown input values are answered with an
//! explanatory message rather than an error; only arguments of the wrong
//! JSON type fail the call.

mod args;
pub mod communication;
pub mod design_rules;
pub mod methodology;
pub mod pdk;
pub mod process;
pub mod tapeout;
pub mod terminology;

use foundry_core::RegistryError;
use foundry_mcp::ToolRegistry;

/// Upper bound on the size of any tool response, in bytes.
pub const MAX_RESPONSE_BYTES: usize = 24 * 1024;

/// Register every built-in tool, in the order `tools/list` reports them.
///
/// # Errors
///
/// Returns [`RegistryError::DuplicateName`] if `registry` already holds a
/// tool with one of the built-in names.
pub fn register_builtin(registry: &mut ToolRegistry) -> Result<(), RegistryError> {
    registry.register_fn(terminology::descriptor(), terminology::explain_foundry_term)?;
    registry.register_fn(design_rules::descriptor(), design_rules::design_rule_qa)?;
    registry.register_fn(tapeout::descriptor(), tapeout::tapeout_checklist)?;
    registry.register_fn(process::descriptor(), process::compare_process_nodes)?;
    registry.register_fn(pdk::descriptor(), pdk::pdk_document_guide)?;
    registry.register_fn(
        communication::descriptor(),
        communication::foundry_communication_template,
    )?;
    registry.register_fn(methodology::descriptor(), methodology::design_methodology_guide)?;
    Ok(())
}

/// A registry holding exactly the built-in tools.
///
/// # Errors
///
/// Only fails if two built-in tools share a name.
pub fn builtin_registry() -> Result<ToolRegistry, RegistryError> {
    let mut registry = ToolRegistry::new();
    register_builtin(&mut registry)?;
    Ok(registry)
}
