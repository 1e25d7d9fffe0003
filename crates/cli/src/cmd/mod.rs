mod relocate;
mod run;
mod status;

pub use relocate::cmd_relocate;
pub use run::cmd_run;
pub use status::cmd_status;
