//! End-to-end turn lifecycle through the public session API.

use murmur_core::{
    Author, ChatSession, DelayRange, Error, InvalidInput, ResponseSource, SEED_MESSAGE,
    SessionConfig, SessionEvent,
};
use std::time::Duration;

fn session() -> ChatSession {
    ChatSession::new(SessionConfig::default())
}

#[tokio::test(start_paused = true)]
async fn initial_transcript_is_seed_only() {
    let session = session();
    let t = session.transcript();

    assert_eq!(t.len(), 1);
    assert!(!t.is_awaiting_reply());
    assert_eq!(t.turns()[0].author(), Author::Assistant);
    assert_eq!(t.turns()[0].text(), SEED_MESSAGE);
}

#[tokio::test(start_paused = true)]
async fn hi_scenario() {
    let session = session();

    let t = session.submit_user_turn("Hi").unwrap();
    assert_eq!(t.len(), 2);
    assert_eq!(t.turns()[0].text(), SEED_MESSAGE);
    assert_eq!(t.turns()[1].author(), Author::User);
    assert_eq!(t.turns()[1].text(), "Hi");
    assert!(t.is_awaiting_reply());

    session.wait_for_reply().await;

    let t = session.transcript();
    assert_eq!(t.len(), 3);
    assert_eq!(t.last().unwrap().author(), Author::Assistant);
    assert!(!t.last().unwrap().text().is_empty());
    assert!(!t.is_awaiting_reply());
}

#[tokio::test(start_paused = true)]
async fn second_submit_before_resolution_is_rejected() {
    let session = session();
    session.submit_user_turn("Hi").unwrap();
    let before = session.transcript();

    let err = session.submit_user_turn("There").unwrap_err();
    assert_eq!(err, Error::InvalidInput(InvalidInput::ReplyPending));
    assert_eq!(session.transcript(), before);
}

#[tokio::test(start_paused = true)]
async fn blank_submissions_leave_transcript_unchanged() {
    let session = session();
    let before = session.transcript();

    for text in ["", "   "] {
        let err = session.submit_user_turn(text).unwrap_err();
        assert_eq!(err, Error::InvalidInput(InvalidInput::EmptyText));
    }
    assert_eq!(session.transcript(), before);
    assert!(!session.is_awaiting_reply());
}

#[tokio::test(start_paused = true)]
async fn reply_lands_inside_delay_window() {
    let session = session();
    let start = tokio::time::Instant::now();

    session.submit_user_turn("Hi").unwrap();
    tokio::time::advance(Duration::from_millis(1400)).await;
    assert!(session.is_awaiting_reply());

    session.wait_for_reply().await;
    let elapsed = start.elapsed();
    assert!(elapsed >= Duration::from_millis(1500), "{:?}", elapsed);
    assert!(elapsed < Duration::from_millis(3000), "{:?}", elapsed);
}

#[tokio::test(start_paused = true)]
async fn several_cycles_alternate_authors() {
    let session = session();

    for text in ["one", "two", "three"] {
        session.submit_user_turn(text).unwrap();
        session.wait_for_reply().await;
    }

    let t = session.transcript();
    assert_eq!(t.len(), 7);
    for (i, turn) in t.turns().iter().enumerate() {
        let expected = if i % 2 == 0 { Author::Assistant } else { Author::User };
        assert_eq!(turn.author(), expected);
    }
}

#[tokio::test(start_paused = true)]
async fn echo_reply_quotes_user_text() {
    let session = ChatSession::with_responses(SessionConfig::default(), ResponseSource::fixed(8));
    session
        .submit_user_turn("What's the capital of France?")
        .unwrap();
    session.wait_for_reply().await;

    assert_eq!(
        session.transcript().last().unwrap().text(),
        "I've analyzed \"What's the capi...\" and I'm ready to assist further."
    );
}

#[tokio::test(start_paused = true)]
async fn teardown_cancels_pending_reply() {
    let session = session();
    let mut rx = session.subscribe();

    session.submit_user_turn("Hi").unwrap();
    session.shutdown();
    tokio::time::advance(Duration::from_secs(10)).await;

    let mut saw_cancel = false;
    while let Ok(event) = rx.recv().await {
        match event {
            SessionEvent::ReplyResolved { .. } => panic!("reply fired after teardown"),
            SessionEvent::ReplyCancelled => saw_cancel = true,
            _ => {}
        }
    }
    assert!(saw_cancel);
}

#[tokio::test(start_paused = true)]
async fn custom_config_is_honoured() {
    let config = SessionConfig {
        seed_message: "Ready.".to_string(),
        reply_delay: DelayRange::from_millis(10, 20),
    };
    let session = ChatSession::new(config);
    assert_eq!(session.transcript().turns()[0].text(), "Ready.");

    let start = tokio::time::Instant::now();
    session.submit_user_turn("ping").unwrap();
    session.wait_for_reply().await;
    assert!(start.elapsed() < Duration::from_millis(20));
}
