/// Message reported once the output directory has been replaced.
pub const SUCCESS_MESSAGE: &str = "Successfully built!";

/// Bundler executable, relative to the project root.
pub const DEFAULT_BUNDLER: &str = "node_modules/.bin/react-scripts";
pub const BUNDLER_ARG: &str = "build";

pub const DEFAULT_BUILD_DIR: &str = "build";
pub const DEFAULT_OUTPUT_DIR: &str = "www";

pub const LOCK_FILENAME: &str = ".prebuild.lock";

/// Suffix for the previous output while a swap relocation is in flight.
pub const ASIDE_SUFFIX: &str = ".prebuild-old";

pub const ENV_PROJECT: &str = "PREBUILD_PROJECT";
pub const ENV_BUNDLER: &str = "PREBUILD_BUNDLER";
pub const ENV_BUILD_DIR: &str = "PREBUILD_BUILD_DIR";
pub const ENV_OUTPUT_DIR: &str = "PREBUILD_OUTPUT_DIR";
