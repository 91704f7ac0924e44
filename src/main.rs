fn main() {
    if let Err(err) = csvop::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
