//! `odata-json`: annotate or strip an OData JSON payload.
//!
//! Usage:
//!   odata-json parse --metadata model.json --content-type 'application/json;odata.metadata=minimal'
//!   odata-json serialize
//!
//! The payload is read from stdin; the result is written to stdout. Set
//! `RUST_LOG=debug` to see why a payload was left unannotated.

use odata_json::cli::{parse_args, run};
use std::io::{self, Read, Write};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

fn main() {
    init_tracing();

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(2);
        }
    };

    let mut buf = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut buf) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    match run(buf.trim(), &args) {
        Ok(Some(result)) => {
            let mut stdout = io::stdout();
            if let Err(e) = writeln!(stdout, "{result}") {
                eprintln!("{e}");
                std::process::exit(1);
            }
        }
        Ok(None) => {
            eprintln!("content type is not handled by the JSON codec");
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
