//! prebuild-lib: post-build output relocation for web applications
//!
//! This crate runs a project's front-end bundler and moves the directory it
//! produces into the place downstream consumers read from:
//! - `build`: the orchestrated pipeline (bundler, then relocation)
//! - `bundler`: invocation of the project-local bundler executable
//! - `relocate`: replacing the output directory with the build directory
//! - `layout`: where everything lives relative to the project root
//! - `lock`: advisory lock serializing runs against one project

pub mod build;
pub mod bundler;
pub mod consts;
pub mod layout;
pub mod lock;
pub mod relocate;
pub mod status;
pub mod util;
