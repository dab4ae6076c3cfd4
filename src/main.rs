fn main() {
    if let Err(err) = safeslope_lib::run() {
        eprintln!("safeslope: {err:#}");
        std::process::exit(1);
    }
}
