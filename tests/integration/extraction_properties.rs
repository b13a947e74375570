//! Property-based tests for reply extraction and the never-fail contract

use proptest::prelude::*;
use std::sync::Arc;
use studyforge::generation::extract::{extract, flashcards_from_text};
use studyforge::generation::{
    ContentGenerator, Flashcard, GenerationKind, GenerationParameters,
};
use studyforge::provider::MockProvider;

fn any_kind() -> impl Strategy<Value = GenerationKind> {
    proptest::sample::select(GenerationKind::ALL.to_vec())
}

proptest! {
    /// Any reply text, for any kind, yields a result of that kind or an error.
    #[test]
    fn extract_never_panics_and_keeps_kind(kind in any_kind(), reply in ".{0,400}") {
        if let Ok(result) = extract(kind, &reply) {
            prop_assert_eq!(result.kind(), kind);
        }
    }

    /// Bracket-heavy replies exercise the span search.
    #[test]
    fn extract_handles_bracket_noise(kind in any_kind(), reply in "[\\[\\]{}\",:a-z0-9 \\n]{0,200}") {
        let _ = extract(kind, &reply);
    }

    /// Flashcards embedded in prose come back unchanged.
    #[test]
    fn flashcards_survive_surrounding_prose(
        cards in proptest::collection::vec(("[A-Za-z][A-Za-z0-9 ?]{0,30}", "[A-Za-z][A-Za-z0-9 .]{0,30}"), 1..6)
    ) {
        let expected: Vec<Flashcard> = cards
            .iter()
            .map(|(front, back)| Flashcard::new(front.clone(), back.clone()))
            .collect();
        let json = serde_json::to_string(&expected).unwrap();
        let reply = format!("Sure! Here are the cards:\n```json\n{}\n```\nGood luck.", json);

        let result = extract(GenerationKind::Flashcards, &reply).unwrap();
        prop_assert_eq!(result, studyforge::generation::GenerationResult::Flashcards(expected));
    }

    /// The line heuristic never produces more cards than line pairs.
    #[test]
    fn line_pairs_bound_card_count(text in "([a-z ]{0,20}\\n){0,12}") {
        let non_blank = text.lines().filter(|l| !l.trim().is_empty()).count();
        prop_assert!(flashcards_from_text(&text).len() <= non_blank / 2);
    }
}

#[test]
fn test_generate_always_well_formed_for_arbitrary_replies() {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap();
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&(any_kind(), ".{0,300}"), |(kind, reply)| {
            let generator = ContentGenerator::new(
                Arc::new(MockProvider::replying(reply)),
                GenerationParameters::default(),
            );
            let request = generator.request(kind, "source content");
            let result = runtime.block_on(generator.generate(&request));
            prop_assert_eq!(result.kind(), kind);
            prop_assert!(result.is_well_formed());
            Ok(())
        })
        .unwrap();
}
