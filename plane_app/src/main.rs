//! Headless cutting plane demo
//!
//! Launch with a volume and type commands, for example:
//! `echo "x 0.25" | cargo run --release --bin plane_app -- volume.dat`

use std::io::BufRead;

use anyhow::Result;
use crossbeam::channel::{select, Receiver};
use cutplane_lib::editor::EditorEvent;
use tracing::info;

mod app;
use app::{defaults, output, Command, Config, Flow, State};

fn print_event(event: &EditorEvent) {
    match event {
        EditorEvent::PlaneUpdated {
            uniforms,
            indicator,
        } => println!("{}", output::format_plane(uniforms, indicator.as_ref())),
        EditorEvent::HistogramUpdated(hist) => println!(
            "{}",
            output::text_histogram(hist, defaults::HISTOGRAM_ROWS, defaults::HISTOGRAM_WIDTH)
        ),
    }
}

/// Lines of stdin, channel closes on EOF
fn spawn_stdin_reader() -> Receiver<String> {
    let (send, recv) = crossbeam::channel::unbounded();
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let sent = line.map(|l| send.send(l).is_ok()).unwrap_or(false);
            if !sent {
                return;
            }
        }
    });
    recv
}

pub fn main() -> Result<()> {
    // stdout is reserved for editor output
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cfg = Config::from_args(&app::get_command().get_matches())?;
    let mut state = State::new(&cfg);
    if let Some(path) = &cfg.volume {
        state.load_volume(path)?;
    }

    let events = state.get_event_receiver();
    let lines = spawn_stdin_reader();

    loop {
        select! {
            recv(lines) -> line => {
                // stdin closed
                let line = match line {
                    Ok(line) => line,
                    Err(_) => break,
                };
                if line.trim().is_empty() {
                    continue;
                }
                match line.parse::<Command>().and_then(|cmd| state.handle_command(cmd)) {
                    Ok(Flow::Continue) => (),
                    Ok(Flow::Quit) => break,
                    Err(e) => eprintln!("Error: {e:#}"),
                }
            }
            recv(events) -> event => match event {
                Ok(event) => print_event(&event),
                Err(_) => break,
            },
        }
    }

    // Print what is still pending
    state.flush();
    while let Ok(event) = events.recv_timeout(defaults::DRAIN_TIMEOUT) {
        print_event(&event);
    }

    info!("App shutting down");
    state.shutdown();
    Ok(())
}
