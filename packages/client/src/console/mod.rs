//! Interactive console surface for the chat client.

mod formatter;

pub use formatter::MessageFormatter;

use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tokio::sync::mpsc;

use crate::chat::{ChannelEvent, ChatController};

/// Redisplay the prompt after printing a message
fn redisplay_prompt(label: &str) {
    use std::io::Write;
    print!("{}> ", label);
    std::io::stdout().flush().ok();
}

/// Run the interactive chat loop for one surface.
///
/// Consumes the channel's event stream in a single dispatch loop while a
/// blocking thread reads lines from stdin. The loop ends when the channel
/// closes or the user exits (Ctrl+C / Ctrl+D).
pub async fn run_console(
    mut controller: ChatController,
    mut events: mpsc::UnboundedReceiver<ChannelEvent>,
    own_label: &str,
    peer_name: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    // The log was seeded with the connection announcement; show it
    for entry in controller.log() {
        print!("{}", MessageFormatter::format_system(&entry.text));
    }
    redisplay_prompt(own_label);

    // Create channel for rustyline input
    let (input_tx, mut input_rx) = mpsc::unbounded_channel::<String>();

    // Spawn a blocking thread for rustyline (synchronous readline)
    let prompt_label = own_label.to_string();
    let _readline_handle = std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                eprintln!("Failed to initialize readline: {}", e);
                return;
            }
        };

        let prompt = format!("{}> ", prompt_label);

        loop {
            match rl.readline(&prompt) {
                Ok(line) => {
                    let line = line.trim();
                    if !line.is_empty() {
                        rl.add_history_entry(line).ok();
                        if input_tx.send(line.to_string()).is_err() {
                            // Channel closed, exit thread
                            break;
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    // Ctrl+C
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    // Ctrl+D
                    tracing::info!("EOF");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });

    loop {
        tokio::select! {
            event = events.recv() => {
                match event {
                    Some(ChannelEvent::Opened) => {
                        print!("{}", MessageFormatter::format_system(
                            "Connected. Type a message and press Enter; Ctrl+C to leave.",
                        ));
                        redisplay_prompt(own_label);
                    }
                    Some(ChannelEvent::MessageReceived(frame)) => {
                        let len_before = controller.log().len();
                        controller.apply_inbound(frame);
                        // Suppressed self-echoes leave the log untouched
                        if let Some(entry) = controller.log().get(len_before..).and_then(|s| s.last()) {
                            print!(
                                "{}",
                                MessageFormatter::format_incoming(peer_name, &entry.text, entry.id)
                            );
                            redisplay_prompt(own_label);
                        }
                    }
                    Some(ChannelEvent::Errored(e)) => {
                        tracing::warn!("Channel error: {}", e);
                    }
                    Some(ChannelEvent::Closed) | None => {
                        print!("{}", MessageFormatter::format_system("Chat ended."));
                        println!();
                        break;
                    }
                }
            }
            line = input_rx.recv() => {
                match line {
                    Some(line) => {
                        controller.send_text(&line);
                        if let Some(entry) = controller.log().last() {
                            print!("{}", MessageFormatter::format_sent_confirmation(entry.id));
                        }
                        redisplay_prompt(own_label);
                    }
                    None => {
                        // Input thread exited (user quit)
                        break;
                    }
                }
            }
        }
    }

    controller.end();

    Ok(())
}
