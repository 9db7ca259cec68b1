//! Arduino circuit workspace: sketch highlighting and schematic layout.

pub mod highlight;
pub mod workspace;

pub use highlight::{highlight_line, highlight_source, Token, TokenKind};
pub use workspace::{CircuitWorkspaceProps, Component, SchematicPart, Wire};
