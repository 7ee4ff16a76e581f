//! CLI argument parsing and command handling.

mod args;

pub use args::{
    AgeArgs, AgeStage, Cli, Command, ConfigAction, DiagnoseArgs, GlobalArgs, PredictArgs,
    SequenceArgs,
};
