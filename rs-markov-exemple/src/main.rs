use std::env;

use env_logger::Env;
use rs_markov_core::{generate_from, Chain, GenerationConfig, Generator, MarkovError, Source};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go through `RUST_LOG`, "info" when unset
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    // Usage: rs-markov-exemple <path-or-url.txt> [config.toml]
    let mut args = env::args().skip(1);
    let identifier = args.next().unwrap_or_else(|| "./data/corpus.txt".to_owned());

    // Every setting has a default; the TOML file only overrides what it names
    let mut config = match args.next() {
        Some(path) => GenerationConfig::load(path)?,
        None => GenerationConfig::default(),
    };

    // Identifiers must end in '.txt', anything else is refused before any I/O
    match Source::parse("./data/corpus.csv") {
        Ok(_) => println!("Should not happen"),
        Err(MarkovError::UnsupportedSource { identifier }) => println!("'{identifier}' is not a .txt source"),
        Err(e) => return Err(e.into()),
    }

    // File or URL, trained with the configured prefix length, trimmed to the last sentence
    let source = Source::parse(&identifier)?;
    for i in 0..5 {
        let text = generate_from(&source, &config)?;
        if text.is_empty() {
            println!("Generated text {}: <no complete sentence>", i + 1);
        } else {
            println!("Generated text {}: {}", i + 1, text);
        }
    }

    // A fixed seed makes the output reproducible
    config.seed = Some(42);
    let first = generate_from(&source, &config)?;
    let second = generate_from(&source, &config)?;
    log::info!("seeded runs identical: {}", first == second);

    // The chain can also be driven directly, without any source
    let mut chain = Chain::new(2)?;
    chain.train_str("the cat sat on the mat. the cat ran away.");
    println!("Suffixes of 'the cat': {:?}", chain.suffixes("the cat"));
    println!("Raw walk: {}", Generator::with_seed(&chain, 7).generate(20));

    Ok(())
}
