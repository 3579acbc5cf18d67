fn main() {
    if let Err(err) = ddrs::cli::run() {
        ddrs::ui::eprintln_error(&err);
        std::process::exit(ddrs::exit::exit_code(&err));
    }
}
