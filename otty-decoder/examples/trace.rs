//! Prints every event decoded from stdin.
//!
//! ```sh
//! printf '\033[31mhi\033[0m' | cargo run -p otty-decoder --example trace
//! printf '\033]0;title\007' | RUST_LOG=trace cargo run -p otty-decoder --example trace -- --diag
//! ```
use std::io::{self, Read};

use anyhow::Context;
use otty_decoder::{Action, Actor, Decoder, State, Trigger};

#[derive(Default)]
struct TraceActor {
    diagnostics: bool,
}

impl Actor for TraceActor {
    fn print(&mut self, c: char) {
        println!("print: {c:?}");
    }

    fn execute(&mut self, byte: u8) {
        println!("exec: {byte:#04x}");
    }

    fn control_begin(&mut self) {
        println!("control begin");
    }

    fn control_put(&mut self, c: char) {
        println!("control put: {c:?}");
    }

    fn control_end(&mut self, final_byte: Option<u8>, cancel: bool) {
        match final_byte {
            Some(byte) => println!("control end: final={:?}", char::from(byte)),
            None => println!("control end: cancel={cancel}"),
        }
    }

    fn dcs_begin(&mut self) {
        println!("DCS begin");
    }

    fn dcs_put(&mut self, c: char) {
        println!("DCS put: {c:?}");
    }

    fn dcs_end(&mut self, cancel: bool) {
        println!("DCS end: cancel={cancel}");
    }

    fn osc_begin(&mut self) {
        println!("OSC begin");
    }

    fn osc_put(&mut self, c: char) {
        println!("OSC put: {c:?}");
    }

    fn osc_end(&mut self, cancel: bool) {
        println!("OSC end: cancel={cancel}");
    }

    fn diagnostics(&self) -> bool {
        self.diagnostics
    }

    fn diag_action(&mut self, action: Action, trigger: Trigger) {
        println!("  action {action} ({trigger:?})");
    }

    fn diag_transition(&mut self, from: State, to: State, input: char) {
        println!("  {from} -> {to} on {input:?}");
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut actor = TraceActor {
        diagnostics: std::env::args().any(|arg| arg == "--diag"),
    };

    let mut input = Vec::new();
    io::stdin()
        .read_to_end(&mut input)
        .context("failed to read stdin")?;

    let mut decoder = Decoder::new();
    decoder.advance(&input, &mut actor);
    println!("final state: {:?}", decoder.state());

    Ok(())
}
