//! Interactive order-ID console
//!
//! Input is read as raw bytes, so a line in the wrong encoding is
//! reported and skipped instead of ending the session. Only end of input
//! stops the loop.

use crate::error::PipelineError;
use crate::pipeline::Till;
use crate::receipt::Receipt;
use crossterm::style::Stylize;
use std::io::Write;
use till_printer::Printer;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

pub const PROMPT: &str = "Enter the order ID: ";

/// One line of operator input
#[derive(Debug, PartialEq, Eq)]
pub enum Input {
    OrderId(String),
    Blank,
    /// Not valid UTF-8 (terminal encoding, scanner noise)
    Unreadable,
    Eof,
}

/// Read the next line from `reader`, reusing `buf`
pub async fn read_input<R>(reader: &mut R, buf: &mut Vec<u8>) -> std::io::Result<Input>
where
    R: AsyncBufRead + Unpin,
{
    buf.clear();
    if reader.read_until(b'\n', buf).await? == 0 {
        return Ok(Input::Eof);
    }

    let Ok(line) = std::str::from_utf8(buf) else {
        return Ok(Input::Unreadable);
    };
    let line = line.trim();
    if line.is_empty() {
        Ok(Input::Blank)
    } else {
        Ok(Input::OrderId(line.to_string()))
    }
}

/// Prompt for order IDs and process each one until the input ends
pub async fn run<P, R>(till: &Till<P>, mut input: R) -> std::io::Result<()>
where
    P: Printer,
    R: AsyncBufRead + Unpin,
{
    let mut buf = Vec::new();

    loop {
        prompt()?;
        match read_input(&mut input, &mut buf).await? {
            Input::Eof => {
                println!();
                return Ok(());
            }
            Input::Blank => continue,
            Input::Unreadable => {
                tracing::warn!(bytes = buf.len(), "Skipping non UTF-8 input line");
                report("Error: order ID is not valid UTF-8");
            }
            Input::OrderId(order_id) => match till.process_order(&order_id).await {
                Ok(receipt) => echo(&receipt),
                Err(PipelineError::Print { receipt, source }) => {
                    report(&format!("Error printing receipt: {source}"));
                    echo(&receipt);
                }
                Err(e) => report(&e.to_string()),
            },
        }
    }
}

fn prompt() -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    write!(stdout, "{}", PROMPT.cyan())?;
    stdout.flush()
}

fn report(message: &str) {
    eprintln!("{}", message.red());
}

fn echo(receipt: &Receipt) {
    let text = receipt.text();
    println!("{}", (&*text).green());
}
