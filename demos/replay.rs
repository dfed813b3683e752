//! Replay Demo: A simulated live chat painted as a virtualized list.
//!
//! A background thread plays the part of the chat source: it re-sends its
//! whole history every few milliseconds, the way live-chat feeds do. The main
//! thread pumps those batches into a `ChatView` and paints only the visible
//! rows.
//!
//! Usage: `cargo run --example replay -- https: www.youtube.com watch?v=demo`
//!
//! Set `RUST_LOG=livechat=debug` to see lifecycle logs on stderr.

use crossterm::{cursor, execute, terminal};
use livechat::terminal::{OutputBuffer, Viewport};
use livechat::{
    channel, ChatMessage, ChatSender, ChatView, ConnectionState, LogNotifier, RowSource,
    SizerConfig, Target, ViewConfig,
};
use std::io::{self, Write};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const TOTAL_MESSAGES: usize = 60;

const AUTHORS: &[&str] = &["amy", "bo", "carmen", "dmitri", "eun-ji", "farah"];

const LINES: &[&str] = &[
    "hello from the replay!",
    "is the stream lagging for anyone else?",
    "that last play was unbelievable, I had to rewind it three times to see what actually happened",
    "gg",
    "日本からこんにちは",
    "first time catching this live, the chat moves fast",
    "lol",
    "can someone link the schedule for next week? I keep missing the start of these streams",
];

fn run_source(tx: &ChatSender, total: usize) {
    tx.starting();
    std::thread::sleep(Duration::from_millis(300));
    tx.started();

    let mut history = Vec::with_capacity(total);
    for i in 0..total {
        history.push(ChatMessage::new(
            AUTHORS[i % AUTHORS.len()],
            LINES[(i * 5) % LINES.len()],
        ));
        if !tx.messages(history.clone()) {
            return;
        }
        std::thread::sleep(Duration::from_millis(120));
    }
}

fn main() -> livechat::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let segments: Vec<String> = std::env::args().skip(1).collect();
    let target = if segments.is_empty() {
        Target::parse("https://www.youtube.com/watch?v=replay")?
    } else {
        Target::from_segments(&segments)?
    };

    let (width, height) = terminal::size()?;
    let header_height = 2;
    let viewport = Viewport {
        top: header_height,
        width,
        height: height.saturating_sub(header_height),
    };

    // Heights count chars while the painter wraps columns; half the width
    // leaves room for the author label and double-width glyphs.
    let config = ViewConfig {
        sizer: SizerConfig {
            base_height: 1,
            unit_height: 1,
            chars_per_unit: u32::from((width / 2).max(1)),
        },
        ..ViewConfig::default()
    };
    let mut view = ChatView::new(LogNotifier, &config)?;
    view.follow_mut().follow();

    // `tx` stays open until the replay ends so the source finishing is not
    // reported as a disconnect.
    let (tx, pump) = channel(64);
    let source_tx = tx.clone();
    view.submit(target.clone());
    let source = std::thread::spawn(move || run_source(&source_tx, TOTAL_MESSAGES));

    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen, cursor::Hide)?;

    let mut out = OutputBuffer::new();
    let mut scroll_top = 0u64;
    while view.row_count() < TOTAL_MESSAGES && view.session().state() != ConnectionState::Idle {
        pump.pump_timeout(view.session_mut(), Duration::from_millis(50));
        view.sync();

        if view.scroll_target().is_some() {
            scroll_top = view.total_height().saturating_sub(u64::from(viewport.height));
        }

        out.clear();
        out.paint_view(&view, viewport, scroll_top)?;
        let header = format!(
            "{} | {:?} | rows: {}",
            target.route_path(),
            view.session().state(),
            view.row_count()
        );
        crossterm::queue!(
            stdout,
            cursor::MoveTo(0, 0),
            terminal::Clear(terminal::ClearType::CurrentLine),
            crossterm::style::Print(header)
        )?;
        out.flush_to(&mut stdout)?;
    }

    if source.join().is_err() {
        tracing::error!("chat source thread panicked");
    }
    drop(tx);
    std::thread::sleep(Duration::from_secs(1));

    execute!(stdout, cursor::Show, terminal::LeaveAlternateScreen)?;
    stdout.flush()?;
    Ok(())
}
