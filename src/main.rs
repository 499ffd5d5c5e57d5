//! Graphsync - command-line front end for slider reconciliation and complex nodes

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
