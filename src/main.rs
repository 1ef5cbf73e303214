#![allow(unused)]
use std::sync::{Arc, RwLock};

use aged::*;

mod cli_config;
use cli_config::*;
mod commands;
mod webapp;
mod util;
use util::*;
mod prelude;
use prelude::*;

type Anything<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Clone)]
enum MainLoopEvent {
    SweepDue,
    Command(AppCommand),
}

async fn main_loop(
    mut cmd_rx: Receiver<AppCommand>,
    entry_list: Arc<RwLock<EntryList>>,
    mut event_tx: broadcast::Sender<AppEvent>,
) -> Anything<()> {
    let mut cmd_stream = cmd_rx.map(MainLoopEvent::Command);
    let mut sweep_timer = Timer::never();
    loop {
        // run a full formatting pass, then re-arm the one-shot timer with
        // the interval the pass chose. sweeps can never overlap.
        let now = UnixMoment::now();
        let mut x = entry_list.write().unwrap();
        let outcome = x.sweep(now);
        drop(x);
        debug!(
            "sweep: {} labels updated, next sweep in {:?}",
            outcome.relabeled, outcome.next_interval
        );
        if outcome.relabeled > 0 {
            event_tx.broadcast(AppEvent::LabelsChanged).await;
        }

        sweep_timer.set_after(outcome.next_interval);
        let sweep_stream = (&mut sweep_timer).map(|_| MainLoopEvent::SweepDue);

        let mut s = sweep_stream.merge(&mut cmd_stream);
        let ev = s.next().await.unwrap();

        match ev {
            // loop back around to sweep and re-arm
            MainLoopEvent::SweepDue => {}
            // a command brings the sweep forward; the fresh pass re-arms
            // the timer for the new entry set
            MainLoopEvent::Command(cmd) => match cmd {
                AppCommand::Add(spec) => {
                    let entry = AgeEntry::try_from(spec);
                    if let Ok(e) = entry {
                        let mut x = entry_list.write().unwrap();
                        x.add(e);
                        drop(x);
                        event_tx.broadcast(AppEvent::EntryListUpdate).await;
                    } else {
                        error!("add: bad entry spec");
                    }
                }
                AppCommand::Remove(name) => {
                    let mut x = entry_list.write().unwrap();
                    x.remove(&name);
                    drop(x);
                    event_tx.broadcast(AppEvent::EntryListUpdate).await;
                }
                AppCommand::Clear => {
                    let mut x = entry_list.write().unwrap();
                    x.clear();
                    drop(x);
                    event_tx.broadcast(AppEvent::EntryListUpdate).await;
                }
            },
        }
    }
    unreachable!()
}

#[async_std::main]
async fn main() -> Anything<()> {
    let mut c: Config = get_config()?;
    setup(&c);
    let cmd_socket = c.cmd_socket.take().unwrap();
    let (cmd_tx, cmd_rx) = channel::unbounded::<AppCommand>();
    let (mut event_tx, mut event_rx) = broadcast::broadcast::<AppEvent>(2);
    // a stalled sse connection must not back up the sweep loop
    event_tx.set_overflow(true);

    spawn(commands::start_command_socket(cmd_socket, cmd_tx.clone()));
    let entry_list = Arc::new(RwLock::new(EntryList::new()));
    let tz = tz::TimeZone::local().expect("Could not get local time zone");
    let webstate = webapp::WebState::new(cmd_tx, entry_list.clone(), event_rx.clone().deactivate(), tz);
    spawn(webapp::server(webstate, c.port));

    // manually keep the event rx drained
    spawn(async move {
        while let Ok(ev) = event_rx.recv().await {
            trace!("broadcast received: {ev:?}");
        }
        unreachable!()
    });

    main_loop(cmd_rx, entry_list, event_tx).await;
    Ok(())
}

fn setup(config: &Config) {
    let loglevel = match config.verbosity {
        0 => tracing::Level::ERROR,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(loglevel)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to start tracing");
}
