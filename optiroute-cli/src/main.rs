//! Entry point for the `optiroute` command-line interface.
#![forbid(unsafe_code)]

#[expect(
    clippy::print_stderr,
    reason = "the binary reports fatal errors on stderr"
)]
fn main() {
    if let Err(err) = optiroute_cli::run() {
        eprintln!("optiroute: {err}");
        std::process::exit(1);
    }
}
