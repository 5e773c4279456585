use std::{env, process};

use focusfund::cli::{self, output};

fn main() {
    focusfund::init();

    if let Err(err) = cli::run(env::args().skip(1)) {
        output::error(&err);
        process::exit(1);
    }
}
