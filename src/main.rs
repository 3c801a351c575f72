fn main() {
    if let Err(err) = boardwire::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
