fn main() {
    if let Err(err) = wfviz::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
