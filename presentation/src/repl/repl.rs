//! Interactive coach REPL

use crate::ConsoleFormatter;
use crate::RecommendationSpinner;
use coach_application::{
    GameRecorder, GatewayError, RecommendError, RecommendationCoordinator, ResponseRecorder,
    SessionEvent, SessionEventSink, SessionStarter, Slot,
};
use coach_domain::{GroupColor, GuessOutcome, Provider, PuzzleSession, RecommendationRequest};
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Interactive coach session REPL
pub struct CoachRepl {
    starter: SessionStarter,
    coordinator: Arc<RecommendationCoordinator>,
    recorder: Arc<ResponseRecorder>,
    game_recorder: Arc<GameRecorder>,
    events: Arc<dyn SessionEventSink>,
    provider: Provider,
    delimiter: char,
    quiet: bool,
    session: Option<PuzzleSession>,
    /// Drops the in-flight recommendation task on `/cancel` so its spinner
    /// does not outlive the cancelled request.
    pending_cancel: Option<CancellationToken>,
}

impl CoachRepl {
    /// Create a new CoachRepl
    pub fn new(
        starter: SessionStarter,
        coordinator: Arc<RecommendationCoordinator>,
        recorder: Arc<ResponseRecorder>,
        game_recorder: Arc<GameRecorder>,
        events: Arc<dyn SessionEventSink>,
        provider: Provider,
    ) -> Self {
        Self {
            starter,
            coordinator,
            recorder,
            game_recorder,
            events,
            provider,
            delimiter: coach_domain::DEFAULT_DELIMITER,
            quiet: false,
            session: None,
            pending_cancel: None,
        }
    }

    /// Set the word list delimiter
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Suppress loading indicators
    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Run the interactive REPL, optionally starting with a word list.
    pub async fn run(&mut self, initial_words: Option<String>) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        // Try to load history
        let history_path =
            dirs::data_dir().map(|p| p.join("connections-coach").join("history.txt"));

        if let Some(ref path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        self.print_welcome();

        if let Some(words) = initial_words {
            self.start_session(&words).await;
        }

        loop {
            let readline = rl.readline(">>> ");

            match readline {
                Ok(line) => {
                    let line = line.trim();

                    // Skip empty lines
                    if line.is_empty() {
                        continue;
                    }

                    if line.starts_with('/') {
                        if self.handle_command(line).await {
                            break;
                        }
                        continue;
                    }

                    // Add to history
                    let _ = rl.add_history_entry(line);

                    // A plain line is a pasted word list
                    if self.session.is_some() {
                        println!("A session is already running. Use /new to discard it first.");
                        continue;
                    }
                    self.start_session(line).await;
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        // Save history
        if let Some(ref path) = history_path {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│            Connections Coach                │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!("Provider: {}", self.provider);
        println!();
        println!("Paste the 16 puzzle words (separated by '{}') to start.", self.delimiter);
        println!("Type /help for commands.");
        println!();
    }

    /// Handle slash commands. Returns true if should exit.
    async fn handle_command(&mut self, cmd: &str) -> bool {
        let tokens: Vec<&str> = cmd.split_whitespace().collect();
        match tokens[0] {
            "/quit" | "/exit" | "/q" => {
                println!("Bye!");
                true
            }
            "/help" | "/h" | "/?" => {
                self.print_help();
                false
            }
            "/board" => {
                match &self.session {
                    Some(session) => print!("{}", ConsoleFormatter::format_board(session)),
                    None => println!("No active session. Paste the 16 words to start."),
                }
                false
            }
            "/recommend" | "/r" => {
                self.request_recommendation(&tokens[1..]).await;
                false
            }
            "/correct" | "/c" => {
                match tokens.get(1).map(|s| s.parse::<GroupColor>()) {
                    Some(Ok(color)) => {
                        self.record_outcome(GuessOutcome::Correct { color }).await;
                    }
                    Some(Err(e)) => println!("{e}"),
                    None => println!("Usage: /correct <yellow|green|blue|purple>"),
                }
                false
            }
            "/miss" | "/m" => {
                self.record_outcome(GuessOutcome::Incorrect).await;
                false
            }
            "/oneaway" | "/o" => {
                self.record_outcome(GuessOutcome::OneAway).await;
                false
            }
            "/cancel" => {
                // The token may outlive a finished request task, so the
                // slot decides whether anything was actually in flight.
                let was_requesting = self.coordinator.slot().await == Slot::Requesting;
                self.coordinator.cancel_local().await;
                if let Some(token) = self.pending_cancel.take() {
                    token.cancel();
                }
                if was_requesting {
                    println!("Recommendation cancelled.");
                } else {
                    println!("Nothing to cancel.");
                }
                false
            }
            "/record" => {
                self.record_game().await;
                false
            }
            "/history" => {
                match &self.session {
                    Some(session) => print!("{}", ConsoleFormatter::format_history(session)),
                    None => println!("No active session."),
                }
                false
            }
            "/new" => {
                if let Some(session) = self.session.take() {
                    self.coordinator.reset().await;
                    self.events.emit(SessionEvent::SessionReset {
                        session_id: session.id().to_string(),
                    });
                }
                println!("Paste the 16 words of the new puzzle.");
                false
            }
            _ => {
                println!("Unknown command: {}", tokens[0]);
                println!("Type /help for available commands");
                false
            }
        }
    }

    fn print_help(&self) {
        println!();
        println!("Commands:");
        println!("  /recommend [kind [model]] - Ask for a recommended group (/r)");
        println!("  /correct <color>          - The shown group was correct (/c)");
        println!("  /miss                     - The shown group was wrong (/m)");
        println!("  /oneaway                  - The shown group was one away (/o)");
        println!("  /cancel                   - Stop waiting for a recommendation");
        println!("  /board                    - Show the current board");
        println!("  /history                  - Show the guess history");
        println!("  /record                   - Record the finished game");
        println!("  /new                      - Discard the session and start over");
        println!("  /help, /h, /?             - Show this help");
        println!("  /quit, /exit, /q          - Exit");
        println!();
    }

    async fn start_session(&mut self, raw: &str) {
        match self.starter.start(raw, self.delimiter).await {
            Ok(session) => {
                println!();
                print!("{}", ConsoleFormatter::format_board(&session));
                println!();
                self.session = Some(session);
            }
            Err(e) => eprintln!("Could not start the session: {e}"),
        }
    }

    /// Issue a recommendation request in the background so `/cancel` stays
    /// available while it is in flight.
    async fn request_recommendation(&mut self, args: &[&str]) {
        let Some(session) = &self.session else {
            println!("No active session. Paste the 16 words to start.");
            return;
        };
        if session.status().is_terminal() {
            println!("The game is finished. Use /record or /new.");
            return;
        }

        let provider = match args {
            [] => self.provider.clone(),
            [kind, rest @ ..] => match Provider::from_kind(kind, rest.first().copied()) {
                Ok(provider) => provider,
                Err(e) => {
                    println!("{e}");
                    return;
                }
            },
        };

        if self.coordinator.slot().await != Slot::Idle {
            println!("A recommendation is already in progress or under review.");
            return;
        }

        let request = RecommendationRequest::new(
            provider.clone(),
            session.remaining_words().to_vec(),
        )
        .with_history(session.guess_history().to_vec());

        let coordinator = Arc::clone(&self.coordinator);
        let provider_name = provider.to_string();
        let quiet = self.quiet;
        let token = CancellationToken::new();
        self.pending_cancel = Some(token.clone());
        tokio::spawn(async move {
            let spinner = RecommendationSpinner::start(&provider_name, quiet);
            let result = tokio::select! {
                // The cycle was already invalidated by cancel_local, so
                // dropping the request here is safe.
                _ = token.cancelled() => {
                    spinner.clear();
                    return;
                }
                result = coordinator.request(request) => result,
            };
            spinner.clear();
            match result {
                Ok(result) => {
                    println!();
                    print!("{}", ConsoleFormatter::format_recommendation(&result));
                    println!("Record the attempt with /correct <color>, /miss, or /oneaway.");
                }
                // Superseded by a newer cycle; nothing to show.
                Err(RecommendError::Stale) => {}
                Err(RecommendError::Gateway(GatewayError::Provider(fault))) => {
                    eprintln!("Recommendation failed: {fault}");
                    eprintln!("  {}", fault.hint());
                }
                Err(e) => eprintln!("Recommendation failed: {e}"),
            }
        });
    }

    async fn record_outcome(&mut self, outcome: GuessOutcome) {
        let Some(session) = self.session.as_ref() else {
            println!("No active session. Paste the 16 words to start.");
            return;
        };
        let Some(displayed) = self.coordinator.displayed().await else {
            println!("No recommendation is displayed. Use /recommend first.");
            return;
        };

        match self
            .recorder
            .record(
                session,
                outcome,
                displayed.recommended_words.clone(),
                Some(displayed.explanation.clone()),
            )
            .await
        {
            Ok(recorded) => {
                println!();
                print!("{}", ConsoleFormatter::format_board(&recorded.session));
                if recorded.just_finished {
                    println!("Use /record to save the result, or /new for another puzzle.");
                }
                println!();
                self.session = Some(recorded.session);
            }
            Err(e) => eprintln!("Could not record the response: {e}"),
        }
    }

    async fn record_game(&mut self) {
        let Some(session) = self.session.as_ref() else {
            println!("No active session.");
            return;
        };

        let provider = self.coordinator.provider_attribution().await;
        match self
            .game_recorder
            .record(session, provider.as_ref(), None)
            .await
        {
            Ok(record) => {
                let result = if record.solved { "solved" } else { "lost" };
                println!(
                    "Recorded: {} on {} ({}, {} mistakes).",
                    record.puzzle_id,
                    record.game_day(),
                    result,
                    record.mistakes
                );
            }
            Err(e) => eprintln!("Could not record the game: {e}"),
        }
    }
}
