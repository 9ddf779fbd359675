//! End-to-end flow tests: transcript in, composed reply out
//!
//! Runs against the shipped config/responses.json so the curated document
//! itself is exercised, not just synthetic fixtures.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::sync::Arc;
use voiceback_agent::{EmotionClassifier, ResponseComposer, VoicebackAgent, DISCLAIMER};
use voiceback_config::ConfigStore;
use voiceback_core::{Category, SegmentKind};

fn shipped_config() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../config/responses.json")
}

fn agent() -> VoicebackAgent {
    let store = Arc::new(ConfigStore::new(shipped_config()));
    store.load().expect("shipped configuration is valid");
    VoicebackAgent::with_parts(store, EmotionClassifier::new(), ResponseComposer::new())
}

#[test]
fn anxious_transcript_gets_seneca_or_epictetus_with_disclaimer() {
    let agent = agent();
    let mut rng = StdRng::seed_from_u64(11);
    let reply = agent.respond_with("I've been feeling really anxious about my job lately", &mut rng);

    assert_eq!(reply.classification.category.as_str(), "anxiety");
    assert!(reply.classification.confidence > 0.0);
    assert!(!reply.classification.fallback);

    let intro = &reply.response.segments[1].text;
    assert!(
        intro.contains("Seneca") || intro.contains("Epictetus"),
        "unexpected figure in: {intro}"
    );

    let quote = reply.response.quote().expect("quote segment present");
    let store = agent.store();
    let entry = store
        .entry(&"anxiety".parse().unwrap())
        .expect("anxiety is configured");
    assert!(
        entry.iter().any(|figure| figure.quote == quote),
        "quote must be verbatim from configuration: {quote}"
    );

    let last = reply.response.segments.last().unwrap();
    assert_eq!(last.kind, SegmentKind::Disclaimer);
    assert_eq!(last.text, DISCLAIMER);
}

#[test]
fn empty_transcript_still_gets_complete_response() {
    let agent = agent();
    let mut rng = StdRng::seed_from_u64(11);
    let reply = agent.respond_with("", &mut rng);

    assert_eq!(reply.classification.category.as_str(), "anxiety");
    assert!(reply.classification.fallback);
    assert_eq!(reply.classification.confidence, 0.0);
    assert!(reply.response.has_disclaimer());
    assert!(reply.response.quote().is_some());
}

#[test]
fn crisis_language_overrides_emotion_keywords() {
    let agent = agent();
    let mut rng = StdRng::seed_from_u64(11);
    let reply = agent.respond_with(
        "I don't know what to do anymore, I just want it all to end",
        &mut rng,
    );

    assert_eq!(reply.classification.category, Category::Crisis);
    assert!(reply.response.crisis);

    let rendered = reply.response.rendered();
    assert!(rendered.contains("988"), "US hotline missing: {rendered}");
    assert!(rendered.contains("9152987821"), "India hotline missing: {rendered}");
    // A safety reply is a real conversation, not a disclaimer and a hang-up
    assert!(!reply.response.has_disclaimer());
    assert_eq!(
        reply.response.segments.last().unwrap().kind,
        SegmentKind::Listening
    );
}

#[test]
fn reload_leaves_behavior_unchanged() {
    let agent = agent();
    let before = {
        let mut rng = StdRng::seed_from_u64(42);
        agent.respond_with("I feel so sad and lonely tonight", &mut rng)
    };

    agent.store().reload().expect("reload of unchanged source succeeds");

    let after = {
        let mut rng = StdRng::seed_from_u64(42);
        agent.respond_with("I feel so sad and lonely tonight", &mut rng)
    };

    assert_eq!(before.classification.category, after.classification.category);
    assert_eq!(before.response, after.response);
}

#[test]
fn every_configured_emotion_produces_a_valid_reply() {
    let agent = agent();
    let transcripts = [
        ("anxiety", "I'm nervous and stressed about everything"),
        ("sadness", "I feel heartbroken and hopeless"),
        ("frustration", "I'm so frustrated and fed up with work"),
        ("uncertainty", "I'm confused and unsure what comes next"),
        ("overwhelm", "It's too much, I'm drowning in tasks"),
    ];

    for (expected, transcript) in transcripts {
        let mut rng = StdRng::seed_from_u64(5);
        let reply = agent.respond_with(transcript, &mut rng);
        assert_eq!(
            reply.classification.category.as_str(),
            expected,
            "for transcript: {transcript}"
        );
        assert!(reply.response.has_disclaimer());
        assert!(reply.response.quote().is_some());
        assert!(reply.response.estimated_speaking_secs() > 0.0);
    }
}

#[test]
fn shipped_configuration_validates_standalone() {
    ConfigStore::validate_file(shipped_config()).expect("shipped configuration is valid");
}
