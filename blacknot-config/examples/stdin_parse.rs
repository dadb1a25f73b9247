use std::io;

use blacknot_config::ConfigDocument;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let doc = match ConfigDocument::from_reader(io::stdin().lock()) {
        Ok(doc) => doc,
        Err(err) => {
            eprintln!("error: {}", err);
            std::process::exit(1);
        }
    };

    for section in doc.sections() {
        if section.is_empty() && section.name().is_empty() {
            continue;
        }
        println!("[{}]", section.name());
        for entry in section.entries() {
            println!("  {} = {:?}", entry.name(), String::from_utf8_lossy(entry.value()));
        }
    }
}
