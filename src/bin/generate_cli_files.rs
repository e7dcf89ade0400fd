// src/bin/generate_cli_files.rs
use clap::CommandFactory;
use clap_complete::{generate, Shell};
use clap_mangen::Man;
use std::{env, fs, io::Error, path::Path};

use input_tracker::cli::Args;

const BIN_NAME: &str = "input-tracker";

fn main() -> Result<(), Error> {
    // Output directory: first argument, then OUT_DIR, then target/generated.
    let outdir = env::args_os()
        .nth(1)
        .or_else(|| env::var_os("OUT_DIR"))
        .unwrap_or_else(|| "target/generated".into());
    let out_path = Path::new(&outdir);
    fs::create_dir_all(out_path)?;

    let cmd = Args::command();

    let man_path = out_path.join(format!("{BIN_NAME}.1"));
    let mut man_file = fs::File::create(&man_path)?;
    println!("Generating man page: {man_path:?}");
    Man::new(cmd.clone()).render(&mut man_file)?;

    // One page per subcommand, named like git's (input-tracker-track.1).
    for sub in cmd.get_subcommands() {
        let name = format!("{BIN_NAME}-{}", sub.get_name());
        let path = out_path.join(format!("{name}.1"));
        println!("Generating man page: {path:?}");
        let mut file = fs::File::create(&path)?;
        Man::new(sub.clone()).title(name).render(&mut file)?;
    }

    let shells = [
        (Shell::Bash, "bash"),
        (Shell::Elvish, "elv"),
        (Shell::Fish, "fish"),
        (Shell::PowerShell, "ps1"),
        (Shell::Zsh, "zsh"),
    ];
    for (shell, ext) in shells {
        let completions_path = out_path.join(format!("{BIN_NAME}.{ext}"));
        println!("Generating completion file: {completions_path:?}");
        let mut file = fs::File::create(&completions_path)?;
        generate(shell, &mut cmd.clone(), BIN_NAME, &mut file);
    }

    println!(
        "Successfully generated man pages and completions in: {}",
        out_path.display()
    );
    Ok(())
}
