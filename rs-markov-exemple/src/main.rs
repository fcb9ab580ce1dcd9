use rand::SeedableRng;
use rand::rngs::StdRng;
use rs_markov_core::corpus::Corpus;
use rs_markov_core::io::{get_filename, read_text};
use rs_markov_core::{GenerationInput, MarkovError, MarkovModel, StartSeed, analyze};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // Corpus file given as first argument, or the bundled Shakespeare excerpt
    let path = std::env::args().nth(1).unwrap_or_else(|| "./data/shakespeare.txt".to_owned());
    let corpus = Corpus::parse(&get_filename(&path)?, &read_text(&path)?);

    // Each caller owns its model, nothing is shared globally
    let mut model = MarkovModel::new();

    // Order 2: the next word depends on the two previous ones
    let statistics = model.train(&corpus.text, 2)?;
    println!("Trained on {} ({}): {:?}", corpus.title, corpus.author, statistics);

    // A failed training keeps the previous model
    match model.train("too short", 5) {
        Ok(_) => println!("Should not happen"),
        Err(e) => println!("{} (previous model kept)", e),
    }

    // Most frequent bigrams, independent of the chain order
    for entry in model.get_ngram_frequencies(2, 5)? {
        println!("\"{}\": {}", entry.ngram, entry.count);
    }

    // Length is approximate: dead ends and the last window may overshoot
    let mut input = GenerationInput::new(40)?;
    for i in 0..3 {
        println!("Generated text {}: {}", i + 1, model.generate(&input)?);
    }

    // 'Custom' anchors the walk on words of the corpus (case-insensitive)
    input.start_seed = StartSeed::Custom("love".to_owned());
    println!("Seeded with 'love': {}", model.generate(&input)?);

    // Unknown seed words are rejected with suggestions
    input.start_seed = StartSeed::Custom("zzqqxx".to_owned());
    match model.generate(&input) {
        Err(MarkovError::SeedNotFound { samples, .. }) => println!("Unknown seed, try one of: {}", samples.join(", ")),
        _ => println!("Should not happen"),
    }

    // Jump to a new sentence less often (0.0 = almost always, 1.0 = never)
    input.start_seed = StartSeed::Random;
    input.set_resentence_threshold(0.8)?;
    input.set_iteration_factor(2)?;

    // A seeded random generator makes the output reproducible
    let first = model.generate_with_rng(&input, &mut StdRng::seed_from_u64(42))?;
    let second = model.generate_with_rng(&input, &mut StdRng::seed_from_u64(42))?;
    println!("Reproducible: {} ({})", first, first == second);

    // Descriptive statistics of the generated text
    let analysis = analyze(&first);
    println!(
        "{} words, {} sentences, richness {}%",
        analysis.word_count, analysis.sentence_count, analysis.vocabulary_richness_percent
    );
    for word in analysis.top_words.iter().take(3) {
        println!("  {}: {}", word.word, word.count);
    }

    Ok(())
}
