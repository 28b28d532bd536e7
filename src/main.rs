//! projtime main entrypoint.

use projtime::run;

fn main() {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("warn"));

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
