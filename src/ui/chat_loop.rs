//! Interactive session: terminal setup, the event loop, and the
//! asynchronous send pipeline.
//!
//! Sends never block the loop. Submitting spawns a task that talks to the
//! messaging client and reports back through an unbounded channel; the
//! loop drains outcomes between input events and applies them to the
//! compose panel.

use std::error::Error;
use std::io;
use std::sync::Arc;
use std::time::Duration;

use ratatui::backend::CrosstermBackend;
use ratatui::crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
        MouseButton, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::layout::Rect;
use ratatui::Terminal;
use tokio::sync::mpsc;

use crate::api::{ClientError, MessageClient, OutgoingMessage, RecipientType, SendMessageResponse};
use crate::core::app::{App, Focus};
use crate::core::compose::MenuChoice;
use crate::core::config::Credentials;
use crate::core::message::Message;
use crate::ui::compose_box::{self, ComposeKeyResult};
use crate::ui::renderer;

/// Result of one background send, reported back to the loop. Carries the
/// compose session that submitted it so stale outcomes can be dropped.
#[derive(Debug)]
pub enum SendOutcome {
    Success {
        session: u64,
        request: OutgoingMessage,
    },
    Failure {
        session: u64,
        reason: String,
    },
}

impl SendOutcome {
    fn session(&self) -> u64 {
        match self {
            SendOutcome::Success { session, .. } | SendOutcome::Failure { session, .. } => *session,
        }
    }
}

/// Map a client response onto the outcome the loop applies. Only
/// `result == "success"` counts as delivered; everything else, including
/// transport errors, surfaces as a failure with a reason.
pub fn outcome_for(
    session: u64,
    request: OutgoingMessage,
    response: Result<SendMessageResponse, ClientError>,
) -> SendOutcome {
    match response {
        Ok(resp) if resp.is_success() => SendOutcome::Success { session, request },
        Ok(resp) => SendOutcome::Failure {
            session,
            reason: if resp.msg.is_empty() {
                format!("server said {}", resp.result)
            } else {
                resp.msg
            },
        },
        Err(e) => SendOutcome::Failure {
            session,
            reason: e.to_string(),
        },
    }
}

fn spawn_send(
    client: Arc<dyn MessageClient>,
    tx: mpsc::UnboundedSender<SendOutcome>,
    session: u64,
    request: OutgoingMessage,
) {
    tokio::spawn(async move {
        let response = client.send_message(&request).await;
        let _ = tx.send(outcome_for(session, request, response));
    });
}

/// Local echo for a delivered message; the realtime pipeline that would
/// normally deliver it back to us is out of scope.
fn echo_message(app: &App, request: &OutgoingMessage) -> Message {
    let now = chrono::Utc::now().timestamp();
    match request.recipient_type {
        RecipientType::Stream => Message::stream(
            app.own_name.clone(),
            app.own_email.clone(),
            request.content.clone(),
            now,
            request.to.clone(),
            0,
            request.subject.clone().unwrap_or_default(),
        ),
        RecipientType::Private => Message::private(
            app.own_name.clone(),
            app.own_email.clone(),
            request.content.clone(),
            now,
        ),
    }
}

fn apply_outcome(app: &mut App, outcome: SendOutcome) {
    // An outcome for a discarded compose session (Esc while pending, or a
    // new session opened since) must not touch the current one.
    if outcome.session() != app.compose.session_id() {
        tracing::debug!("dropping send outcome for a discarded compose session");
        return;
    }
    match outcome {
        SendOutcome::Success { request, .. } => {
            tracing::info!(to = %request.to, "message delivered");
            app.compose.apply_send_success();
            let echo = echo_message(app, &request);
            app.push_message(echo);
        }
        SendOutcome::Failure { reason, .. } => {
            tracing::warn!(%reason, "message send failed");
            app.compose.apply_send_failure(reason);
        }
    }
}

fn handle_key_event(
    app: &mut App,
    key: &event::KeyEvent,
    client: &Arc<dyn MessageClient>,
    tx: &mpsc::UnboundedSender<SendOutcome>,
) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.exit_requested = true;
        return;
    }

    match app.focus {
        Focus::Messages => match key.code {
            KeyCode::Up => app.select_prev(),
            KeyCode::Down => app.select_next(),
            KeyCode::Tab => app.focus = Focus::Compose,
            _ => {
                if let Some(mb) = app.selected_message_box() {
                    if let Some(action) = mb.handle_key(key, app) {
                        app.compose.apply(action);
                        app.focus = Focus::Compose;
                    }
                }
            }
        },
        Focus::Compose => match compose_box::handle_key(&mut app.compose, key) {
            ComposeKeyResult::Submit(request) => {
                app.compose.mark_pending();
                spawn_send(
                    client.clone(),
                    tx.clone(),
                    app.compose.session_id(),
                    request,
                );
            }
            ComposeKeyResult::LeaveCompose => app.focus = Focus::Messages,
            ComposeKeyResult::Handled | ComposeKeyResult::Ignored => {}
        },
    }
}

fn handle_mouse_event(app: &mut App, mouse: &event::MouseEvent, frame_area: Rect) {
    let (messages_area, compose_area) = renderer::panes(frame_area, app);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some(choice) =
                compose_box::menu_button_at(&app.compose, compose_area, mouse.column, mouse.row)
            {
                match choice {
                    MenuChoice::Private => app.compose.enter_private_mode(""),
                    MenuChoice::Stream => app.compose.enter_stream_mode("", ""),
                }
                app.focus = Focus::Compose;
            } else if let Some(index) = renderer::message_at(app, messages_area, mouse.row) {
                app.select(index);
                if let Some(mb) = app.selected_message_box() {
                    if let Some(action) = mb.handle_mouse(MouseButton::Left, app) {
                        app.compose.apply(action);
                        app.focus = Focus::Compose;
                    }
                }
            }
        }
        MouseEventKind::ScrollUp => app.select_prev(),
        MouseEventKind::ScrollDown => app.select_next(),
        _ => {}
    }
}

/// Messages shown before any realtime traffic arrives.
fn seed_messages() -> Vec<Message> {
    let now = chrono::Utc::now().timestamp();
    vec![
        Message::stream(
            "Welcome Bot",
            "welcome-bot@brume.invalid",
            "Welcome! Select a message and press Enter to reply, c to start \
             a new topic, S/s to narrow, Esc to widen.",
            now,
            "general",
            1,
            "greetings",
        ),
        Message::private(
            "Welcome Bot",
            "welcome-bot@brume.invalid",
            "Press Tab to reach the compose panel below.",
            now,
        ),
    ]
}

/// Run the interactive session until the user quits.
pub async fn run(
    credentials: Credentials,
    client: Arc<dyn MessageClient>,
) -> Result<(), Box<dyn Error>> {
    let own_name = credentials
        .email
        .split('@')
        .next()
        .unwrap_or(&credentials.email)
        .to_string();
    let mut app = App::new(own_name, credentials.email.clone());
    for message in seed_messages() {
        app.push_message(message);
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let (tx, mut rx) = mpsc::unbounded_channel::<SendOutcome>();

    let result = loop {
        if let Err(e) = terminal.draw(|f| renderer::ui(f, &app)) {
            break Err(e.into());
        }

        match event::poll(Duration::from_millis(50)) {
            Ok(true) => match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    handle_key_event(&mut app, &key, &client, &tx);
                    if app.exit_requested {
                        break Ok(());
                    }
                }
                Ok(Event::Mouse(mouse)) => {
                    let area = terminal
                        .size()
                        .map(|size| Rect::new(0, 0, size.width, size.height))
                        .unwrap_or_default();
                    handle_mouse_event(&mut app, &mouse, area);
                }
                Ok(_) => {}
                Err(e) => break Err(e.into()),
            },
            Ok(false) => {}
            Err(e) => break Err(e.into()),
        }

        while let Ok(outcome) = rx.try_recv() {
            apply_outcome(&mut app, outcome);
        }
    };

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}
