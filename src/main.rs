// SPDX-License-Identifier: MIT
//
// n-pick — an interactive terminal color picker.
//
// This is the main binary that wires the crates together:
//
//   n-color → RGB/HSV math, reconciled color state, gradient, pointer capture
//   n-term  → terminal control, rendering, input parsing, event loop
//
// PickerApp implements n-term's App trait. Each input event flows through:
//
//   stdin → parser → on_event → snapshot → widget → reconcile
//   paint → gradient/tile/sliders/buttons → framebuffer → diff renderer
//
// The alternate screen hides stderr, so logging goes to a file
// (`<config dir>/n-pick/n-pick.log` unless `--log-file` says otherwise).

mod app;
mod clipboard;
mod config;
mod error;
mod slider;

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use n_color::{ColorState, Encoding, Rgb, format};
use n_term::event_loop::EventLoop;
use n_term::terminal;

use crate::app::PickerApp;
use crate::clipboard::{Clipboard, MemoryClipboard, Osc52Clipboard};
use crate::config::Config;
use crate::error::Result;

#[derive(Parser, Debug)]
#[command(name = "n-pick", version, about = "Interactive terminal color picker")]
struct Args {
    /// Starting color: #RGB, #RRGGBB, rgb(r, g, b) or hsv(h, s, v)
    #[arg(short, long)]
    color: Option<String>,

    /// Config file to read instead of the default one
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Where to write the log
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Keep copies inside the picker instead of sending them to the terminal
    #[arg(long)]
    no_clipboard: bool,

    /// Print the starting color in every encoding and exit
    #[arg(long)]
    print: bool,
}

/// Log to `path`, or nowhere if it can't be opened: the TUI owns the screen.
fn init_logger(path: Option<&Path>) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    builder.format_target(false);

    let file = path.and_then(|p| {
        if let Some(dir) = p.parent() {
            let _ = fs::create_dir_all(dir);
        }
        fs::File::create(p).ok()
    });
    match file {
        Some(file) => builder.target(env_logger::Target::Pipe(Box::new(file))),
        None => builder.target(env_logger::Target::Pipe(Box::new(io::sink()))),
    };

    let _ = builder.try_init();
}

/// Command-line values win over the config file.
fn resolve_config(args: &Args) -> Config {
    let mut config = Config::load(args.config.as_deref());
    if let Some(color) = &args.color {
        config.color.clone_from(color);
    }
    if args.no_clipboard {
        config.clipboard = false;
    }
    config
}

/// One encoding per line, in copy-button order.
fn print_encodings(w: &mut impl Write, rgb: Rgb) -> io::Result<()> {
    let state = ColorState::new(rgb);
    for encoding in Encoding::ALL {
        writeln!(w, "{}", encoding.encode(state.rgb(), state.hsv()))?;
    }
    Ok(())
}

fn run(args: &Args) -> Result<()> {
    let config = resolve_config(args);
    let initial = config.initial_color()?;

    if args.print {
        print_encodings(&mut io::stdout().lock(), initial)?;
        return Ok(());
    }

    if !terminal::is_tty() {
        return Err(io::Error::other("stdin is not a terminal (try --print)").into());
    }

    let loop_config = config.loop_config()?;
    let clipboard: Box<dyn Clipboard> = if config.clipboard {
        Box::new(Osc52Clipboard::stdout())
    } else {
        Box::new(MemoryClipboard::new())
    };

    log::info!("starting at {}", format::hex(initial));
    let mut app = PickerApp::new(initial, clipboard);
    EventLoop::with_config(loop_config).run(&mut app)?;
    log::info!("finished at {}", format::hex(app.color().rgb()));
    Ok(())
}

fn main() {
    let args = Args::parse();
    init_logger(args.log_file.clone().or_else(Config::log_path).as_deref());

    if let Err(e) = run(&args) {
        log::error!("{e}");
        eprintln!("n-pick: {e}");
        process::exit(1);
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
