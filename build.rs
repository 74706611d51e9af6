use std::error::Error;
use vergen_gitcl::{Emitter, GitclBuilder};

/// Emits the git describe information used in the version string.
/// # Errors
/// * if `git` is not installed
/// * if there is no .git folder, e.g. when building from a release tarball
fn emit_git() -> Result<(), Box<dyn Error>> {
    let gitcl = GitclBuilder::default()
        .all()
        .describe(false, true, Some("NoTagShouldEverMatchThisPattern"))
        .build()?;

    Emitter::default()
        .fail_on_error()
        .add_instructions(&gitcl)?
        .emit()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    if emit_git().is_err() {
        // no git info available, allow an override and fall back to "unknown"
        let git_desc = option_env!("FRFINDER_GIT_DESCRIBE")
            .unwrap_or("unknown");
        println!("cargo:rustc-env=VERGEN_GIT_DESCRIBE={git_desc}");
    }

    // track the manifest and the source folder so the version stays current
    println!("cargo:rerun-if-changed=Cargo.toml");
    println!("cargo:rerun-if-changed=src");

    Ok(())
}
