use std::env;
use std::process::exit;

use anyhow::Result;

fn help() -> ! {
    println!(
        "\
Translates Nand2Tetris VM language source into Hack assembly.

Usage: cargo run -- [vm filename or directory]

With no argument, the current directory is translated.
"
    );
    exit(0);
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.get(1).is_some_and(|a| a == "-h" || a == "--help") {
        help();
    }
    let path = args.get(1).map(std::path::PathBuf::from);

    let output = hack_vm::driver::run(path.as_deref()).unwrap_or_else(|e| {
        eprintln!("error: {e}");
        exit(1);
    });

    println!("wrote {}", output.display());
    Ok(())
}
