use sentimiento::classifier::{NEGATIVE, POSITIVE};
use sentimiento::{ClassLabel, CountVectorizer, MultinomialNb, Precision, Predictor, TextFeatures};
use std::sync::Arc;
use std::thread;

fn setup_predictor(rows: &[(&str, &str)]) -> Predictor {
    let texts: Vec<&str> = rows.iter().map(|(text, _)| *text).collect();
    let labels: Vec<&str> = rows.iter().map(|(_, label)| *label).collect();
    let (vectorizer, counts) = CountVectorizer::fit_transform(&texts, true).expect("vocabulary");
    let labels = ClassLabel::from_raw_values(&labels);
    let model = MultinomialNb::fit(&counts, &labels, vectorizer.vocabulary_size(), 1.0).expect("model");
    Predictor::new(vectorizer, model).expect("Failed to create predictor")
}

fn sentiment_predictor() -> Predictor {
    setup_predictor(&[
        ("I love this movie", "positive"),
        ("what a wonderful day", "positive"),
        ("great acting and a great story", "positive"),
        ("I hate this movie", "negative"),
        ("terrible and boring plot", "negative"),
        ("the worst day ever", "negative"),
        ("the film is on tonight", "neutral"),
    ])
}

#[test]
fn test_labels_come_from_normalization_rules() {
    let predictor = sentiment_predictor();
    for text in ["love it", "boring", "tonight", "", "completely unknown words", "!!!"] {
        let prediction = predictor.predict(text, Precision::Http);
        assert!(
            [POSITIVE, NEGATIVE, "neutral"].contains(&prediction.prediction.as_str()),
            "unexpected label {}",
            prediction.prediction
        );
        assert!((0.0..=1.0).contains(&prediction.confidence));
    }
}

#[test]
fn test_prediction_is_idempotent() {
    let predictor = sentiment_predictor();
    let first = predictor.predict("a wonderful story", Precision::Cli);
    let second = predictor.predict("a wonderful story", Precision::Cli);
    assert_eq!(first, second);
}

#[test]
fn test_keyword_classes() {
    let predictor = sentiment_predictor();
    assert_eq!(predictor.predict("wonderful great love", Precision::Http).prediction, POSITIVE);
    assert_eq!(predictor.predict("terrible boring worst", Precision::Http).prediction, NEGATIVE);
    assert_eq!(predictor.predict("film tonight", Precision::Http).prediction, "neutral");
}

#[test]
fn test_binary_numeric_classes() {
    let predictor = setup_predictor(&[("good good", "1"), ("bad bad", "0")]);
    assert_eq!(predictor.predict("good", Precision::Http).prediction, POSITIVE);
    assert_eq!(predictor.predict("bad", Precision::Http).prediction, NEGATIVE);
}

#[test]
fn test_multiclass_numeric_reads_as_negative_unless_one() {
    let predictor = setup_predictor(&[("good", "1"), ("bad", "0"), ("okay", "4")]);
    assert_eq!(predictor.predict("okay", Precision::Http).prediction, NEGATIVE);
}

#[test]
fn test_http_confidence_has_four_digits() {
    let predictor = sentiment_predictor();
    for text in ["love", "hate the plot", "tonight day", ""] {
        let confidence = predictor.predict(text, Precision::Http).confidence;
        let scaled = confidence * 1e4;
        assert!((scaled - scaled.round()).abs() < 1e-6, "{} has more than 4 digits", confidence);
    }
}

#[test]
fn test_cli_confidence_has_five_digits() {
    let predictor = sentiment_predictor();
    for text in ["love", "hate the plot", "tonight day", ""] {
        let confidence = predictor.predict(text, Precision::Cli).confidence;
        let scaled = confidence * 1e5;
        assert!((scaled - scaled.round()).abs() < 1e-6, "{} has more than 5 digits", confidence);
    }
}

#[test]
fn test_token_counting() {
    let predictor = sentiment_predictor();
    assert_eq!(predictor.count_tokens("I love this movie"), 3);
    assert!(predictor.feature_index("love").is_some());
    assert!(predictor.feature_index("i").is_none());
}

#[test]
fn test_thread_safety() {
    let predictor = Arc::new(sentiment_predictor());
    let expected = predictor.predict("great story", Precision::Http);
    let mut handles = vec![];

    for _ in 0..3 {
        let predictor = Arc::clone(&predictor);
        let expected = expected.clone();
        let handle = thread::spawn(move || {
            assert_eq!(predictor.predict("great story", Precision::Http), expected);
        });
        handles.push(handle);
    }

    for handle in handles {
        handle.join().unwrap();
    }
}
