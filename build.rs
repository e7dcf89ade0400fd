use vergen::EmitBuilder;

// Emits build and git metadata for the startup log line.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    EmitBuilder::builder()
        .all_build() // timestamp, rustc, etc.
        .all_git() // sha, commit timestamp, etc.
        .emit()?;

    // Man page and completions come from the generate-cli-files binary.
    Ok(())
}
