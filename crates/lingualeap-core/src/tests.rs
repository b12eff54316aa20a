#[cfg(test)]
mod tests {
    use crate::bootstrap::{bootstrap, parse_seed_dialogue, SeedSource};
    use crate::conversation::{Conversation, ConversationState, TurnOutcome};
    use crate::event_bus::EventBus;
    use crate::parser::{parse_message_text, ParsedText};
    use crate::ports::*;
    use crate::prompts;
    use crate::transcript::{TranscriptAssembler, ERROR_NOTICE};
    use lingualeap_types::event::ConversationEvent;
    use lingualeap_types::message::*;
    use lingualeap_types::LingoError;
    use std::cell::RefCell;
    use std::pin::Pin;
    use async_trait::async_trait;
    use futures::Stream;

    fn parsed(text: &str, translation: Option<&str>) -> ParsedText {
        ParsedText {
            text: text.to_string(),
            translation: translation.map(str::to_string),
        }
    }

    // ─── EventBus Tests ──────────────────────────────────────

    #[test]
    fn test_event_bus_new_is_empty() {
        let bus = EventBus::new();
        assert!(bus.drain().is_empty());
        assert!(!bus.is_closed());
        assert_eq!(bus.dropped(), 0);
    }

    #[test]
    fn test_event_bus_emit_and_drain() {
        let bus = EventBus::new();
        bus.emit(ConversationEvent::TurnStart { turn_id: 1 });
        bus.emit(ConversationEvent::TurnEnd { turn_id: 1 });

        let events = bus.drain();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], ConversationEvent::TurnStart { turn_id: 1 }));
        assert!(bus.drain().is_empty());
    }

    #[test]
    fn test_event_bus_clone_shares_state() {
        let bus1 = EventBus::new();
        let bus2 = bus1.clone();

        bus1.emit(ConversationEvent::TurnStart { turn_id: 1 });
        let events = bus2.drain();
        assert_eq!(events.len(), 1);
        assert!(bus1.drain().is_empty());
    }

    #[test]
    fn test_event_bus_close_discards_pending_and_later_events() {
        let bus = EventBus::new();
        let task_handle = bus.clone();
        task_handle.emit(ConversationEvent::TurnStart { turn_id: 1 });

        bus.close();
        assert!(task_handle.is_closed());
        task_handle.emit(ConversationEvent::TurnEnd { turn_id: 1 });
        bus.close();

        assert!(bus.drain().is_empty());
        assert_eq!(bus.dropped(), 2);
    }

    #[test]
    fn test_closed_bus_hides_late_reply() {
        let bus = EventBus::new();
        let llm = MockLlm::failing_seed(vec![
            ReplyEvent::Delta("Late\n(Gec)".to_string()),
            ReplyEvent::Done,
        ]);
        let mut conv = block_on(Conversation::start("cooking", "Beginner", &llm, bus.clone()));
        bus.drain();

        // The learner ended the conversation while the turn was still queued
        bus.close();
        let outcome = block_on(conv.send_user_message("Hello", &llm)).unwrap();

        assert_eq!(outcome, TurnOutcome::Completed);
        assert_eq!(conv.messages().last().unwrap().text, "Late");
        assert!(bus.drain().is_empty());
        assert!(bus.dropped() > 0);
    }

    // ─── Parser Tests ────────────────────────────────────────

    #[test]
    fn test_parse_two_part_message() {
        let result = parse_message_text("That's a great idea.\n(Bu əla fikirdir.)");
        assert_eq!(result, parsed("That's a great idea.", Some("Bu əla fikirdir.")));
    }

    #[test]
    fn test_parse_trims_both_parts() {
        let result = parse_message_text("  Hello there!  \n(  Salam!  )");
        assert_eq!(result, parsed("Hello there!", Some("Salam!")));
    }

    #[test]
    fn test_parse_round_trip() {
        let cases = [
            ("How are you?", "Necəsən?"),
            ("Line one.\nLine two.", "Birinci sətir. İkinci sətir."),
            ("I like tea (a lot).\nDo you?", "Çayı çox sevirəm. Sən?"),
            ("  padded  ", " çevrilmiş "),
        ];
        for (primary, translation) in cases {
            let raw = format!("{}\n({})", primary, translation);
            assert_eq!(
                parse_message_text(&raw),
                parsed(primary.trim(), Some(translation.trim())),
                "raw: {:?}",
                raw
            );
        }
    }

    #[test]
    fn test_parse_multiline_primary_with_earlier_paren_line() {
        let raw = "First line\n(an aside) continues\nLast line\n(Tərcümə)";
        let result = parse_message_text(raw);
        assert_eq!(
            result,
            parsed("First line\n(an aside) continues\nLast line", Some("Tərcümə"))
        );
    }

    #[test]
    fn test_parse_no_translation() {
        let cases = [
            "Just a plain sentence.",
            "  surrounded by spaces  ",
            "I went there (yesterday) and loved it.",
            "See you then (maybe).",
            "Line one\n(not closed",
            "Ends with paren on same line (ok)",
        ];
        for raw in cases {
            assert_eq!(parse_message_text(raw), parsed(raw.trim(), None), "raw: {:?}", raw);
        }
    }

    #[test]
    fn test_parse_mid_string_parenthetical_does_not_split() {
        let raw = "Hello\n(Salam)\nHow are you?";
        assert_eq!(parse_message_text(raw), parsed(raw, None));
    }

    #[test]
    fn test_parse_empty_and_whitespace() {
        assert_eq!(parse_message_text(""), parsed("", None));
        assert_eq!(parse_message_text("   \n  "), parsed("", None));
    }

    #[test]
    fn test_parse_empty_captures_give_no_translation() {
        assert_eq!(parse_message_text("Hello\n()"), parsed("Hello\n()", None));
        assert_eq!(parse_message_text("\n(Salam)"), parsed("(Salam)", None));
    }

    #[test]
    fn test_parse_paren_not_at_absolute_end() {
        let result = parse_message_text("Hi\n(Salam)\n");
        assert_eq!(result, parsed("Hi\n(Salam)", None));

        let result = parse_message_text("Good morning!\n(Sabahın xeyir!) ");
        assert_eq!(result, parsed("Good morning!\n(Sabahın xeyir!)", None));
    }

    #[test]
    fn test_parse_crlf() {
        let result = parse_message_text("Good night!\r\n(Gecəniz xeyrə!)");
        assert_eq!(result, parsed("Good night!", Some("Gecəniz xeyrə!")));
    }

    // ─── Transcript Assembler Tests ──────────────────────────

    #[test]
    fn test_assembler_user_turn() {
        let mut asm = TranscriptAssembler::new(EventBus::new());
        asm.begin_user_turn("Hi there").unwrap();

        let msgs = asm.transcript().messages();
        assert_eq!(msgs.len(), 1);
        assert_eq!(msgs[0].sender, Sender::User);
        assert_eq!(msgs[0].text, "Hi there");
        assert!(msgs[0].translation.is_none());
        assert_eq!(msgs[0].status, MessageStatus::Final);
    }

    #[test]
    fn test_assembler_fold_then_finalize() {
        let mut asm = TranscriptAssembler::new(EventBus::new());
        asm.begin_assistant_turn().unwrap();
        asm.fold_fragment("Nice to ").unwrap();
        asm.fold_fragment("meet you!\n(Tanış").unwrap();

        let open = asm.transcript().last().unwrap();
        assert!(open.is_open());
        assert_eq!(open.text, "Nice to meet you!\n(Tanış");
        assert_eq!(asm.open_raw(), Some("Nice to meet you!\n(Tanış"));

        asm.fold_fragment("dığımıza şadam!)").unwrap();
        // Translation is never split off mid-stream
        let open = asm.transcript().last().unwrap();
        assert!(open.translation.is_none());
        assert_eq!(open.text, "Nice to meet you!\n(Tanışdığımıza şadam!)");

        let raw = asm.finalize().unwrap();
        assert_eq!(raw, "Nice to meet you!\n(Tanışdığımıza şadam!)");

        let closed = asm.transcript().last().unwrap();
        assert_eq!(closed.status, MessageStatus::Final);
        assert_eq!(closed.text, "Nice to meet you!");
        assert_eq!(closed.translation.as_deref(), Some("Tanışdığımıza şadam!"));
        assert!(!asm.has_open_turn());
    }

    #[test]
    fn test_assembler_fold_preserves_order() {
        let finalize_with = |fragments: &[&str]| {
            let mut asm = TranscriptAssembler::new(EventBus::new());
            asm.begin_assistant_turn().unwrap();
            for f in fragments {
                asm.fold_fragment(f).unwrap();
            }
            asm.finalize();
            asm.transcript().last().unwrap().text.clone()
        };

        assert_eq!(finalize_with(&["Hel", "lo"]), finalize_with(&["Hello"]));
        assert_eq!(finalize_with(&["Hel", "lo"]), "Hello");
        assert_ne!(finalize_with(&["lo", "Hel"]), "Hello");
    }

    #[test]
    fn test_assembler_empty_finalize() {
        let mut asm = TranscriptAssembler::new(EventBus::new());
        asm.begin_assistant_turn().unwrap();
        assert_eq!(asm.finalize(), Some(String::new()));

        let msg = asm.transcript().last().unwrap();
        assert_eq!(msg.text, "");
        assert!(msg.translation.is_none());
        assert_eq!(msg.status, MessageStatus::Final);
    }

    #[test]
    fn test_assembler_finalize_without_open_turn() {
        let mut asm = TranscriptAssembler::new(EventBus::new());
        assert!(asm.finalize().is_none());

        asm.begin_assistant_turn().unwrap();
        assert!(asm.finalize().is_some());
        assert!(asm.finalize().is_none());
        assert_eq!(asm.transcript().messages().len(), 1);
    }

    #[test]
    fn test_assembler_rejects_second_open_turn() {
        let mut asm = TranscriptAssembler::new(EventBus::new());
        asm.begin_assistant_turn().unwrap();

        let err = asm.begin_assistant_turn().unwrap_err();
        assert!(matches!(err, LingoError::TurnInProgress));
        let err = asm.begin_user_turn("hello?").unwrap_err();
        assert!(matches!(err, LingoError::TurnInProgress));

        let open_count = asm.transcript().messages().iter().filter(|m| m.is_open()).count();
        assert_eq!(open_count, 1);
        assert_eq!(asm.transcript().messages().len(), 1);
    }

    #[test]
    fn test_assembler_fold_without_open_turn() {
        let mut asm = TranscriptAssembler::new(EventBus::new());
        let err = asm.fold_fragment("stray").unwrap_err();
        assert!(matches!(err, LingoError::NoOpenTurn));
        assert!(asm.transcript().messages().is_empty());
    }

    #[test]
    fn test_assembler_fail_replaces_partial_text() {
        let mut asm = TranscriptAssembler::new(EventBus::new());
        asm.begin_user_turn("Hello").unwrap();
        asm.begin_assistant_turn().unwrap();
        asm.fold_fragment("Hi").unwrap();

        assert!(asm.fail(ERROR_NOTICE));

        let msgs = asm.transcript().messages();
        assert_eq!(msgs.len(), 2);
        let last = msgs.last().unwrap();
        assert_eq!(last.status, MessageStatus::Error);
        assert_eq!(last.text, ERROR_NOTICE);
        assert!(!asm.has_open_turn());
        assert!(!asm.fail(ERROR_NOTICE));
    }

    #[test]
    fn test_assembler_finalized_entries_untouched() {
        let seed = vec![ChatMessage::settled(
            Sender::Assistant,
            "Welcome!",
            Some("Xoş gəlmisiniz!".to_string()),
        )];
        let mut asm = TranscriptAssembler::with_messages(seed.clone(), EventBus::new());
        asm.begin_user_turn("Thanks").unwrap();
        asm.begin_assistant_turn().unwrap();
        asm.fold_fragment("You're welcome.\n(Dəyməz.)").unwrap();
        asm.finalize();

        assert_eq!(asm.transcript().messages()[0], seed[0]);
        assert_eq!(asm.transcript().messages()[1].text, "Thanks");
        assert_eq!(asm.transcript().messages().len(), 3);
    }

    #[test]
    fn test_assembler_notifies_every_mutation() {
        let bus = EventBus::new();
        let mut asm = TranscriptAssembler::new(bus.clone());
        asm.begin_user_turn("a").unwrap();
        asm.begin_assistant_turn().unwrap();
        asm.fold_fragment("b").unwrap();
        asm.fold_fragment("c").unwrap();
        asm.finalize();

        let events = bus.drain();
        assert_eq!(events.len(), 5);
        assert!(events
            .iter()
            .all(|e| matches!(e, ConversationEvent::TranscriptChanged { .. })));

        match events.last().unwrap() {
            ConversationEvent::TranscriptChanged { messages } => {
                assert_eq!(messages.len(), 2);
                assert_eq!(messages[1].text, "bc");
                assert!(!messages[1].is_open());
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    // ─── Seed Validation Tests ───────────────────────────────

    #[test]
    fn test_parse_seed_dialogue_valid() {
        let raw = r#"[
            {"sender": "ai", "text": "Hi!\n(Salam!)"},
            {"sender": "user", "text": "Hello!\n(Salam!)"}
        ]"#;
        let lines = parse_seed_dialogue(raw).unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].sender, Sender::Assistant);
        assert_eq!(lines[1].text, "Hello!\n(Salam!)");
    }

    #[test]
    fn test_parse_seed_dialogue_rejects_bad_shapes() {
        let cases = [
            "not json at all",
            r#"{"sender": "ai", "text": "object, not array"}"#,
            "[]",
            r#"[{"sender": "ai"}]"#,
            r#"[{"text": "no sender"}]"#,
            r#"[{"sender": "model", "text": "bad sender"}]"#,
            r#"[{"sender": "ai", "text": 42}]"#,
            r#"[{"sender": "ai", "text": "ok"}, "stray string"]"#,
        ];
        for raw in cases {
            let err = parse_seed_dialogue(raw).unwrap_err();
            assert!(matches!(err, LingoError::MalformedSeed(_)), "raw: {}", raw);
        }
    }

    // ─── Prompt Tests ────────────────────────────────────────

    #[test]
    fn test_seed_prompt_mentions_topic_and_level() {
        let prompt = prompts::seed_prompt("cooking", "Beginner (A1)");
        assert!(prompt.contains("\"cooking\""));
        assert!(prompt.contains("Beginner (A1)"));
        assert!(prompt.contains(prompts::NATIVE_LANGUAGE));
    }

    #[test]
    fn test_seed_schema_shape() {
        let schema = prompts::seed_schema();
        assert_eq!(schema["type"], "ARRAY");
        assert_eq!(schema["items"]["type"], "OBJECT");
        let senders = schema["items"]["properties"]["sender"]["enum"].as_array().unwrap();
        assert_eq!(senders.len(), 2);
        let required = schema["items"]["required"].as_array().unwrap();
        assert!(required.iter().any(|v| v == "text"));
    }

    #[test]
    fn test_system_instruction_mentions_format() {
        let instruction = prompts::system_instruction("travel", "Advanced (C1)");
        assert!(instruction.contains(prompts::PARTNER_NAME));
        assert!(instruction.contains("\"travel\""));
        assert!(instruction.contains("translation in parentheses"));
    }

    #[test]
    fn test_fallback_seed_lines_parse() {
        for line in prompts::fallback_seed("music") {
            let parsed = parse_message_text(&line.text);
            assert!(parsed.text.contains("music"));
            assert!(parsed.translation.is_some());
        }
    }

    // ─── Mock Ports ──────────────────────────────────────────

    struct MockLlm {
        seed: lingualeap_types::Result<String>,
        reply: Vec<ReplyEvent>,
        seed_requests: RefCell<Vec<JsonRequest>>,
        /// (history length, user text) seen by each stream_reply call
        replies_requested: RefCell<Vec<(usize, String)>>,
    }

    impl MockLlm {
        fn new(seed: lingualeap_types::Result<String>, reply: Vec<ReplyEvent>) -> Self {
            Self {
                seed,
                reply,
                seed_requests: RefCell::new(Vec::new()),
                replies_requested: RefCell::new(Vec::new()),
            }
        }

        fn failing_seed(reply: Vec<ReplyEvent>) -> Self {
            Self::new(Err(LingoError::Network("offline".to_string())), reply)
        }
    }

    #[async_trait(?Send)]
    impl GenerativePort for MockLlm {
        async fn generate_json(&self, req: JsonRequest) -> lingualeap_types::Result<String> {
            self.seed_requests.borrow_mut().push(req);
            self.seed.clone()
        }

        fn stream_reply(
            &self,
            session: &SessionContext,
            user_text: &str,
        ) -> Pin<Box<dyn Stream<Item = ReplyEvent>>> {
            self.replies_requested
                .borrow_mut()
                .push((session.history().len(), user_text.to_string()));
            Box::pin(futures::stream::iter(self.reply.clone()))
        }
    }

    const GENERATED_SEED: &str = r#"[
        {"sender": "ai", "text": "Do you like to cook?\n(Yemək bişirməyi sevirsən?)"},
        {"sender": "user", "text": "Yes, I do.\n(Bəli, sevirəm.)"},
        {"sender": "ai", "text": "What do you cook most often?\n(Ən çox nə bişirirsən?)"}
    ]"#;

    // Use a minimal executor for sync tests (since we're not in WASM here)
    fn block_on<F: std::future::Future<Output = T>, T>(f: F) -> T {
        use std::task::{Context, Poll, Wake, Waker};
        use std::sync::Arc;

        struct NoopWaker;
        impl Wake for NoopWaker {
            fn wake(self: Arc<Self>) {}
        }

        let waker = Waker::from(Arc::new(NoopWaker));
        let mut cx = Context::from_waker(&waker);
        let mut f = std::pin::pin!(f);

        loop {
            match f.as_mut().poll(&mut cx) {
                Poll::Ready(val) => return val,
                // Mock ports complete immediately, so this never spins for long
                Poll::Pending => std::thread::yield_now(),
            }
        }
    }

    // ─── Bootstrap Tests ─────────────────────────────────────

    #[test]
    fn test_bootstrap_generated_seed() {
        let llm = MockLlm::new(Ok(GENERATED_SEED.to_string()), vec![]);
        let seed = block_on(bootstrap("cooking", "Beginner (A1)", &llm));

        assert_eq!(seed.source, SeedSource::Generated);
        assert_eq!(seed.messages.len(), 3);
        assert_eq!(seed.messages[0].text, "Do you like to cook?");
        assert_eq!(
            seed.messages[0].translation.as_deref(),
            Some("Yemək bişirməyi sevirsən?")
        );
        assert_eq!(seed.messages[1].sender, Sender::User);
        assert!(seed.messages.iter().all(|m| m.status == MessageStatus::Final));

        // Session history keeps the raw combined format
        let history = seed.session.history();
        assert_eq!(history.len(), 3);
        assert_eq!(history[0].text, "Do you like to cook?\n(Yemək bişirməyi sevirsən?)");
        assert_eq!(history, seed.dialogue.as_slice());
        assert!(seed.session.system_instruction().contains("\"cooking\""));

        let requests = llm.seed_requests.borrow();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].prompt.contains("cooking"));
        assert_eq!(requests[0].response_schema["type"], "ARRAY");
    }

    #[test]
    fn test_bootstrap_fallback_on_error() {
        let llm = MockLlm::failing_seed(vec![]);
        let seed = block_on(bootstrap("cooking", "Beginner", &llm));

        assert_eq!(seed.source, SeedSource::Fallback);
        assert_eq!(seed.messages.len(), 2);
        for msg in &seed.messages {
            assert_eq!(msg.sender, Sender::Assistant);
            assert!(msg.text.contains("cooking"), "missing topic in {:?}", msg.text);
            assert!(msg.translation.is_some());
        }
        assert_eq!(seed.session.history().len(), 2);
        assert!(seed.session.history()[0].text.contains("\n("));
    }

    #[test]
    fn test_bootstrap_fallback_on_malformed_seed() {
        let llm = MockLlm::new(Ok(r#"[{"sender": "robot", "text": "hi"}]"#.to_string()), vec![]);
        let seed = block_on(bootstrap("weather", "Intermediate (B1)", &llm));
        assert_eq!(seed.source, SeedSource::Fallback);
        assert_eq!(seed.messages.len(), 2);
        assert!(seed.messages[0].text.contains("weather"));
    }

    // ─── Conversation Tests ──────────────────────────────────

    #[test]
    fn test_conversation_start_emits_events() {
        let bus = EventBus::new();
        let llm = MockLlm::new(Ok(GENERATED_SEED.to_string()), vec![]);
        let conv = block_on(Conversation::start("cooking", "Beginner (A1)", &llm, bus.clone()));

        assert_eq!(conv.messages().len(), 3);
        assert_eq!(conv.state, ConversationState::Idle);
        assert_eq!(conv.info.topic, "cooking");
        assert_eq!(conv.seed_source(), SeedSource::Generated);

        let events = bus.drain();
        assert!(matches!(events.first(), Some(ConversationEvent::BootstrapStart { .. })));
        assert!(events
            .iter()
            .any(|e| matches!(e, ConversationEvent::TranscriptChanged { messages } if messages.len() == 3)));
        assert!(matches!(
            events.last(),
            Some(ConversationEvent::BootstrapComplete { fallback: false })
        ));
    }

    #[test]
    fn test_conversation_send_message() {
        let bus = EventBus::new();
        let llm = MockLlm::new(
            Ok(GENERATED_SEED.to_string()),
            vec![
                ReplyEvent::Delta("Pasta sounds ".to_string()),
                ReplyEvent::Delta("delicious!\n(Makaron ".to_string()),
                ReplyEvent::Delta("ləzzətli səslənir!)".to_string()),
                ReplyEvent::Done,
            ],
        );
        let mut conv = block_on(Conversation::start("cooking", "Beginner (A1)", &llm, bus.clone()));
        let _ = bus.drain();

        let outcome = block_on(conv.send_user_message("  I cook pasta.  ", &llm)).unwrap();
        assert_eq!(outcome, TurnOutcome::Completed);
        assert_eq!(conv.state, ConversationState::Idle);

        let msgs = conv.messages();
        assert_eq!(msgs.len(), 5);
        assert_eq!(msgs[3].sender, Sender::User);
        assert_eq!(msgs[3].text, "I cook pasta.");
        assert_eq!(msgs[4].sender, Sender::Assistant);
        assert_eq!(msgs[4].text, "Pasta sounds delicious!");
        assert_eq!(msgs[4].translation.as_deref(), Some("Makaron ləzzətli səslənir!"));

        // Reply was requested with the seed history, then the exchange was recorded
        assert_eq!(llm.replies_requested.borrow()[0], (3, "I cook pasta.".to_string()));
        let history = conv.session().history();
        assert_eq!(history.len(), 5);
        assert_eq!(history[4].text, "Pasta sounds delicious!\n(Makaron ləzzətli səslənir!)");

        let events = bus.drain();
        assert!(matches!(events.first(), Some(ConversationEvent::TurnStart { turn_id: 1 })));
        assert!(matches!(events.last(), Some(ConversationEvent::TurnEnd { turn_id: 1 })));
        // user turn + open reply + 3 folds + finalize
        let changes = events
            .iter()
            .filter(|e| matches!(e, ConversationEvent::TranscriptChanged { .. }))
            .count();
        assert_eq!(changes, 6);
    }

    #[test]
    fn test_conversation_stream_error_is_contained() {
        let bus = EventBus::new();
        let llm = MockLlm::failing_seed(vec![
            ReplyEvent::Delta("Hi".to_string()),
            ReplyEvent::Error("connection reset".to_string()),
            ReplyEvent::Delta("never folded".to_string()),
        ]);
        let mut conv = block_on(Conversation::start("cooking", "Beginner", &llm, bus.clone()));
        let _ = bus.drain();

        let outcome = block_on(conv.send_user_message("Hello", &llm)).unwrap();
        assert_eq!(outcome, TurnOutcome::Failed("connection reset".to_string()));
        assert_eq!(conv.state, ConversationState::Idle);

        let msgs = conv.messages();
        assert_eq!(msgs.len(), 4);
        let last = msgs.last().unwrap();
        assert!(!last.is_open());
        assert_eq!(last.status, MessageStatus::Error);
        assert!(!last.text.is_empty());
        assert!(!last.text.contains("Hi"));
        assert!(msgs.iter().all(|m| !m.is_open()));

        // A failed exchange is not added to the session history
        assert_eq!(conv.session().history().len(), 2);

        let events = bus.drain();
        assert!(events.iter().any(|e| matches!(e, ConversationEvent::Error { .. })));
        assert!(matches!(events.last(), Some(ConversationEvent::TurnEnd { .. })));
    }

    #[test]
    fn test_conversation_stream_without_done() {
        let llm = MockLlm::failing_seed(vec![ReplyEvent::Delta("Sure!\n(Əlbəttə!)".to_string())]);
        let mut conv = block_on(Conversation::start("music", "Beginner", &llm, EventBus::new()));

        let outcome = block_on(conv.send_user_message("Can we talk?", &llm)).unwrap();
        assert_eq!(outcome, TurnOutcome::Completed);
        let last = conv.messages().last().unwrap();
        assert_eq!(last.text, "Sure!");
        assert_eq!(last.translation.as_deref(), Some("Əlbəttə!"));
    }

    #[test]
    fn test_conversation_empty_reply() {
        let llm = MockLlm::failing_seed(vec![ReplyEvent::Done]);
        let mut conv = block_on(Conversation::start("music", "Beginner", &llm, EventBus::new()));

        block_on(conv.send_user_message("Anything?", &llm)).unwrap();
        let last = conv.messages().last().unwrap();
        assert_eq!(last.text, "");
        assert!(last.translation.is_none());
        assert_eq!(last.status, MessageStatus::Final);
    }

    #[test]
    fn test_conversation_rejects_empty_input() {
        let bus = EventBus::new();
        let llm = MockLlm::failing_seed(vec![ReplyEvent::Done]);
        let mut conv = block_on(Conversation::start("music", "Beginner", &llm, bus.clone()));
        let _ = bus.drain();

        let err = block_on(conv.send_user_message("   ", &llm)).unwrap_err();
        assert!(matches!(err, LingoError::EmptyInput));
        assert_eq!(conv.messages().len(), 2);
        assert!(bus.drain().is_empty());
        assert!(llm.replies_requested.borrow().is_empty());
    }

    #[test]
    fn test_conversation_multiple_turns() {
        let llm = MockLlm::failing_seed(vec![
            ReplyEvent::Delta("Okay.\n(Yaxşı.)".to_string()),
            ReplyEvent::Done,
        ]);
        let mut conv = block_on(Conversation::start("sports", "Beginner", &llm, EventBus::new()));

        block_on(conv.send_user_message("Turn 1", &llm)).unwrap();
        block_on(conv.send_user_message("Turn 2", &llm)).unwrap();

        // seed(2) + (user + reply) * 2
        assert_eq!(conv.messages().len(), 6);
        let requested = llm.replies_requested.borrow();
        assert_eq!(requested[0].0, 2);
        assert_eq!(requested[1].0, 4);
    }
}
