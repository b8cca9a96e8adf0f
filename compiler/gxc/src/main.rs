//! Galaxy interpreter CLI.

use gxc::commands::{parse_interact_options, run_demodulate, run_eval, run_interact, run_modulate};

fn main() {
    gxc::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "eval" => {
            if args.len() < 3 {
                eprintln!("Usage: gx eval <file> [expr]");
                std::process::exit(1);
            }
            let expr = args.get(3).map_or("galaxy", String::as_str);
            run_eval(&args[2], expr);
        }
        "mod" => {
            if args.len() < 3 {
                eprintln!("Usage: gx mod <expr>");
                eprintln!("Example: gx mod \"ap ap cons 1 nil\"");
                std::process::exit(1);
            }
            run_modulate(&args[2..].join(" "));
        }
        "dem" => {
            if args.len() < 3 {
                eprintln!("Usage: gx dem <bits>");
                std::process::exit(1);
            }
            run_demodulate(&args[2]);
        }
        "interact" => {
            if args.len() < 3 {
                eprintln!("Usage: gx interact <file> [options]");
                eprintln!();
                eprintln!("Options:");
                eprintln!("  --protocol=<name>   Binding holding the protocol (default: galaxy)");
                eprintln!("  --state=<expr>      Starting state (default: nil)");
                eprintln!("  --point=<x>,<y>     Click passed as input (default: 0,0)");
                eprintln!("  --max-sends=<n>     Fail after n sends in one step");
                eprintln!("  --profile           Print evaluation counters to stderr");
                std::process::exit(1);
            }
            let options = match parse_interact_options(&args[3..]) {
                Ok(options) => options,
                Err(err) => {
                    eprintln!("error: {err}");
                    std::process::exit(1);
                }
            };
            run_interact(&args[2], &options);
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-v" => {
            println!("gx {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("Galaxy interpreter");
    println!();
    println!("Usage: gx <command> [options]");
    println!();
    println!("Commands:");
    println!("  eval <file> [expr]      Load bindings and evaluate expr (default: galaxy)");
    println!("  mod <expr>              Modulate an expression");
    println!("  dem <bits>              Demodulate a signal into program text");
    println!("  interact <file> [opts]  Run one interaction step over stdin/stdout");
    println!("  help                    Show this help message");
    println!("  version                 Show version information");
    println!();
    println!("Interact options:");
    println!("  --protocol=<name>   Binding holding the protocol (default: galaxy)");
    println!("  --state=<expr>      Starting state (default: nil)");
    println!("  --point=<x>,<y>     Click passed as input (default: 0,0)");
    println!("  --max-sends=<n>     Fail after n sends in one step");
    println!("  --profile           Print evaluation counters to stderr");
    println!();
    println!("Examples:");
    println!("  gx eval galaxy.txt");
    println!("  gx eval galaxy.txt \"ap ap add 1 2\"");
    println!("  gx mod \"ap ap cons 1 nil\"");
    println!("  gx dem 110110000100");
    println!("  gx interact galaxy.txt --point=0,0");
    println!();
    println!("Set RUST_LOG=gx_eval=debug to trace sends and protocol steps.");
}
