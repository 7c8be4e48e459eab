//! Generates a helper for every action under `src/` into `OUT_DIR`.
//!
//! The files mirror the module tree, so `crate::api::UsersRepoAction` gets
//! `$OUT_DIR/api/users_repo_action_helper.rs`, mounted by `mount_helper!`.

use std::env;
use std::path::PathBuf;

use tether_gen::codegen::EmitterConfig;
use tether_gen::output::{DirSink, FailureMode, generate_all};
use tether_gen::scanner::scan_dir;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=src");

    let src = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?).join("src");
    let out_dir = PathBuf::from(env::var("OUT_DIR")?);

    let actions = scan_dir(&src)?;
    let mut sink = DirSink::new(out_dir);
    generate_all(&actions, &EmitterConfig::default(), &mut sink, FailureMode::FailFast)?;
    Ok(())
}
