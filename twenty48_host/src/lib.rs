use std::io::{BufRead, Write};

use tracing::trace;
use twenty48::{execute_command, CommandOutcome, GameState, Request};

/// Drives a game from newline-delimited JSON requests.
///
/// Every request except [`Request::Bye`] is answered with one line holding
/// the resulting [`GameView`](twenty48::GameView). Returns at EOF or on
/// `Bye`, and with an error on malformed input or broken pipes.
pub fn serve<R: BufRead, W: Write>(
    state: &mut GameState,
    mut reader: R,
    mut writer: W,
) -> anyhow::Result<()> {
    let mut buf = String::new();

    loop {
        // Read the next line into buf
        buf.clear(); // because read_line() appends to the buffer
        let num_bytes_read = reader.read_line(&mut buf)?;
        if num_bytes_read == 0 {
            // 0 bytes read means EOF - the front end has exited.
            break Ok(());
        }
        let line = buf.trim_end();
        if line.is_empty() {
            continue;
        }
        trace!(name: "Received request", request = %line);

        let req = serde_json::from_str::<Request>(line)?;
        let applied = match req.command() {
            Some(command) => execute_command(state, command) == CommandOutcome::Applied,
            None if req == Request::Bye => break Ok(()),
            None => true,
        };

        serde_json::to_writer(&mut writer, &state.view(applied))?;
        writeln!(writer)?;
        writer.flush()?;
    }
}
