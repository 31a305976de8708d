//! Built-in unit types.

mod newcommand;
mod texstring;

pub use newcommand::NewCommand;
pub use texstring::TexString;
