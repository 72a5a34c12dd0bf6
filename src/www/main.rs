mod cli;

fn main() {
    if let Err(e) = cli::run() {
        std::process::exit(cli::report(&e));
    }
}
