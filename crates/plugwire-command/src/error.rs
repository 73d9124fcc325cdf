/// Errors raised while building a command.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// A builder argument is outside its valid range.
    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// The command id is not known to the catalog.
    #[error("unknown command id: {0}")]
    UnknownCommand(String),

    /// The command id needs arguments and has no static request tree.
    #[error("command {0} requires parameters")]
    RequiresParameters(&'static str),
}

pub type Result<T> = std::result::Result<T, CommandError>;
