// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `tickbus replay <scenario>` - Feed a scenario through the bus
//!
//! By default time is simulated: a fake clock moves forward by `--step` per
//! dispatcher pass, so output is deterministic. `--realtime` uses the system
//! clock, sleeps for the configured poll interval between passes and stops
//! on Ctrl-C.

use crate::demo::DemoEvent;
use crate::output::{self, OutputFormat};
use crate::scenario::{Release, Scenario};
use anyhow::Result;
use serde::Serialize;
use std::fmt;
use std::ops::ControlFlow;
use std::path::PathBuf;
use std::time::Duration;
use tickbus::{Config, Event, EventBus, EventKind, FakeClock, HostLoop, Listener, SystemClock};

#[derive(clap::Args)]
pub struct ReplayArgs {
    /// Scenario file (TOML)
    pub scenario: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Use the system clock instead of simulated time
    #[arg(long)]
    pub realtime: bool,

    /// Simulated time per dispatcher pass (ignored with --realtime)
    #[arg(long, default_value = "1ms", value_parser = humantime::parse_duration)]
    pub step: Duration,

    /// Queue capacity, overriding the config file
    #[arg(long)]
    pub capacity: Option<usize>,
}

/// How time moves between passes
enum Pacing {
    Simulated { clock: FakeClock, step: Duration },
    Realtime,
}

impl Pacing {
    fn advance(&self) {
        if let Pacing::Simulated { clock, step } = self {
            clock.advance(*step);
        }
    }
}

/// One line of replay output
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum Record {
    Dispatch {
        tick: u64,
        id: u64,
        kind: &'static str,
        payload: Option<String>,
    },
    Dropped {
        tick: u64,
        kind: &'static str,
        error: String,
    },
    Summary {
        released: u64,
        dispatched: u64,
        dropped: u64,
        pending: usize,
        passes: u64,
        end_tick: u64,
    },
}

impl Record {
    fn dispatch(event: &Event<DemoEvent>) -> Self {
        Record::Dispatch {
            tick: event.tick().as_millis(),
            id: event.id().as_u64(),
            kind: event.kind().name(),
            payload: event
                .payload()
                .map(|bytes| String::from_utf8_lossy(bytes).into_owned()),
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Record::Dispatch {
                tick,
                kind,
                payload,
                ..
            } => write!(f, "{}ms {} {}", tick, kind, payload.as_deref().unwrap_or("-")),
            Record::Dropped { tick, kind, error } => {
                write!(f, "{}ms dropped {}: {}", tick, kind, error)
            }
            Record::Summary {
                released,
                dispatched,
                dropped,
                pending,
                passes,
                end_tick,
            } => write!(
                f,
                "replayed {} events: {} dispatched, {} dropped, {} pending after {} passes ({}ms)",
                released, dispatched, dropped, pending, passes, end_tick
            ),
        }
    }
}

pub fn handle(args: ReplayArgs, mut config: Config) -> Result<()> {
    if let Some(capacity) = args.capacity {
        config.bus.capacity = capacity;
        config.validate()?;
    }
    let releases = Scenario::load(&args.scenario)?.releases()?;
    tracing::info!(
        scenario = %args.scenario.display(),
        events = releases.len(),
        realtime = args.realtime,
        "starting replay"
    );

    let summary = if args.realtime {
        let host = HostLoop::new(config.host.clone());
        let stop = host.stop_handle();
        ctrlc::set_handler(move || {
            eprintln!("\nStopping replay...");
            stop.stop();
        })?;
        let bus = EventBus::new(&config.bus, SystemClock::new())?;
        replay(releases, bus, &host, &Pacing::Realtime, args.format)?
    } else {
        let clock = FakeClock::new();
        let host = HostLoop::new(config.host.clone().with_poll_interval(Duration::ZERO));
        let bus = EventBus::new(&config.bus, clock.clone())?;
        let pacing = Pacing::Simulated {
            clock,
            step: args.step,
        };
        replay(releases, bus, &host, &pacing, args.format)?
    };

    output::print_record(&summary, args.format);
    Ok(())
}

fn replay(
    releases: Vec<Release>,
    mut bus: EventBus<DemoEvent>,
    host: &HostLoop,
    pacing: &Pacing,
    format: OutputFormat,
) -> Result<Record> {
    let printer = Listener::<DemoEvent>::new(move |_, event| {
        output::print_record(&Record::dispatch(event), format);
    });
    for kind in DemoEvent::ALL {
        bus.add_listener(*kind, &printer)?;
    }

    // Scripted offsets count from the pass that activates the bus
    bus.run_dispatcher();
    let start = bus.now();

    let mut pending = releases.into_iter().peekable();
    let mut released = 0u64;
    let mut dropped = 0u64;

    let stats = host.run(&mut bus, |bus, iteration| {
        if iteration > 0 {
            pacing.advance();
        }
        let now = bus.now();
        let elapsed = now.saturating_since(start);

        while let Some(release) = pending.next_if(|r| r.at <= elapsed) {
            let payload = release.payload.as_deref().map(str::as_bytes);
            match bus.add_event(release.kind, payload) {
                Ok(_) => released += 1,
                Err(e) => {
                    dropped += 1;
                    output::print_record(
                        &Record::Dropped {
                            tick: now.as_millis(),
                            kind: release.kind.name(),
                            error: e.to_string(),
                        },
                        format,
                    );
                }
            }
        }

        if pending.peek().is_none() && bus.count() == 0 {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    });

    Ok(Record::Summary {
        released,
        dispatched: stats.dispatched,
        dropped,
        pending: bus.count(),
        passes: stats.iterations,
        end_tick: bus.now().as_millis(),
    })
}
