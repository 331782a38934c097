// MCP (Model Context Protocol) front end for the expense ledger.
// The protocol itself is handled by rmcp; this module only registers
// tools, resources and prompts.

pub mod prompts;
mod render;
mod server;

pub use prompts::{find_prompt, StaticPrompt, ALL_PROMPTS};
pub use server::*;
