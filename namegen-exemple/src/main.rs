use namegen_core::model::generator::NameGenerator;
use namegen_core::model::predictor::Predictor;
use namegen_core::vectorizer::encoder::{EncodedWindow, SequenceVectorizer};
use namegen_core::vectorizer::token_map::TokenMap;
use namegen_core::vectorizer::windower::pad;

/// Toy next-character predictor standing in for a trained model.
///
/// Counts transitions from the last window character to the next one
/// over the training corpus and predicts from the normalized counts.
/// Everything the predictor needs is captured here at construction;
/// the engine only sees its probability output.
struct FrequencyPredictor {
    counts: Vec<Vec<f64>>,
}

impl FrequencyPredictor {
    fn train(
        vectorizer: &SequenceVectorizer,
        padded_corpus: &[String],
        maxlen: usize,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let size = vectorizer.vocab_size();
        let mut counts = vec![vec![0.0; size]; size];
        for name in padded_corpus {
            for (window, next) in vectorizer.vectorize(name, maxlen, 1)? {
                counts[argmax(&window[maxlen - 1])][argmax(&next)] += 1.0;
            }
        }
        Ok(Self { counts })
    }
}

/// Index of the largest entry (the set column of a one-hot row).
fn argmax(row: &[f32]) -> usize {
    let mut best = 0;
    for (index, &value) in row.iter().enumerate() {
        if value > row[best] {
            best = index;
        }
    }
    best
}

impl Predictor for FrequencyPredictor {
    fn predict(&mut self, window: &EncodedWindow) -> Result<Vec<f32>, Box<dyn std::error::Error>> {
        let last = argmax(window.last().ok_or("empty window")?);
        let row = &self.counts[last];
        let total: f64 = row.iter().sum();
        if total > 0.0 {
            Ok(row.iter().map(|&count| (count / total) as f32).collect())
        } else {
            // Unseen context, fall back to uniform
            Ok(vec![1.0 / row.len() as f32; row.len()])
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Small training corpus; a real deployment learns from thousands of names
    let names = [
        "akira", "haruhi", "sakura", "rin", "yuki", "misaki", "kaede", "hinata",
        "ayane", "chihiro", "natsume", "kotori", "mirai", "sora", "tsubaki", "ren",
    ];

    // Pad every name the way the training loader does: the first window is
    // all start tokens, the last one is followed by the end token
    let maxlen = 3;
    let padded: Vec<String> = names.iter().map(|name| pad(name, "@", "$", maxlen)).collect();

    // Build the vocabulary from the padded corpus;
    // '?' is reserved for anything outside it
    let vectorizer = SequenceVectorizer::from_corpus(&padded, true, "?")?;
    println!("Vocabulary size: {}", vectorizer.vocab_size());

    // The maps round-trip through an opaque blob; a real deployment ships
    // this file next to the trained model
    let maps_path = std::env::temp_dir().join("namegen-exemple-maps.bin");
    vectorizer.map().save_to(&maps_path)?;
    let reloaded = TokenMap::load_from(&maps_path)?;
    assert_eq!(reloaded.vocab_size(), vectorizer.vocab_size());

    // "Train" the stand-in predictor on the same padded corpus
    let mut predictor = FrequencyPredictor::train(&vectorizer, &padded, maxlen)?;

    let generator = NameGenerator::new(vectorizer);

    // Create a generation input and adjust it
    let mut input = generator.make_generation_input();

    // Window length must match what the predictor was trained with
    input.maxlen = maxlen;

    // Accept single-word names
    input.min_name_length = 1;

    // Below 1.0 sharpens sampling toward the most likely continuation,
    // above 1.0 flattens it toward uniform
    input.set_diversity(0.8)?;

    // Diversity must be a positive finite number
    match input.set_diversity(0.0) {
        Ok(_) => println!("Should not happen"),
        Err(_) => println!("Diversity 0.0 is invalid, must be positive"),
    }

    // Generate 10 names using the input settings
    for i in 0..10 {
        println!("Generated name {}: {}", i + 1, generator.generate(&mut predictor, &input)?);
    }

    Ok(())
}
