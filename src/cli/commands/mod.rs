//! Command implementations, one module per subcommand.

pub mod completions;
pub mod keyvault;
pub mod subscription;
