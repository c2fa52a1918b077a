// creflect: reflection-function generator for annotated C structs

use std::env;
use std::io::{self, BufWriter, Write};

use creflect::codegen::driver;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    creflect::init_tracing();

    // Parse command-line arguments
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        let program_name = args.get(0).map(|s| s.as_str()).unwrap_or("creflect");
        eprintln!("Error: No input files provided");
        eprintln!();
        eprintln!("Usage: {} <file.h> [file.h ...]", program_name);
        eprintln!();
        eprintln!("Generated C source is written to standard output:");
        eprintln!("  {} include/types.h > generated.c", program_name);
        std::process::exit(1);
    }

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    driver::generate(&args[1..], &mut out)?;
    out.flush()?;

    Ok(())
}
