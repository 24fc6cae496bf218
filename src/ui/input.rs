/// Input pump.
///
/// A background thread blocks on raw reads from the terminal and forwards
/// decoded commands over an unbounded channel. The game loop drains it
/// with `try_recv`, one command per tick, and never waits on it.
///
/// Decoding works on the raw bytes of one read:
///   - `0x1b` alone            → Escape
///   - `0x1b '[' A|B|C|D`      → Up / Down / Right / Left
///   - `0x03` (Ctrl+C)         → Escape (raw mode swallows SIGINT)
///   - anything else           → nothing

use std::io::{ErrorKind, Read};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

use crate::domain::entity::Command;
use crate::domain::motion::Direction;

const ESC: u8 = 0x1b;
const CTRL_C: u8 = 0x03;
const READ_BUF: usize = 100;

/// Pause after a failed read before trying again.
const READ_RETRY: Duration = Duration::from_millis(250);

pub fn decode(bytes: &[u8]) -> Option<Command> {
    match bytes {
        [ESC] | [CTRL_C] => Some(Command::Escape),
        [ESC, b'[', key, ..] => match key {
            b'A' => Some(Command::Move(Direction::Up)),
            b'B' => Some(Command::Move(Direction::Down)),
            b'C' => Some(Command::Move(Direction::Right)),
            b'D' => Some(Command::Move(Direction::Left)),
            _ => None,
        },
        _ => None,
    }
}

/// Start the pump on `source`. The thread exits only once the receiver
/// is gone.
pub fn spawn_pump<R>(source: R) -> Receiver<Command>
where
    R: Read + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    let spawned = thread::Builder::new()
        .name("input-pump".into())
        .spawn(move || pump(source, tx));
    if let Err(e) = spawned {
        // Nothing will ever arrive; the loop keeps running without input.
        log::error!("could not spawn input thread: {e}");
    }
    rx
}

fn pump<R: Read>(mut source: R, tx: Sender<Command>) {
    let mut buf = [0u8; READ_BUF];
    loop {
        let (command, failed) = match source.read(&mut buf) {
            Ok(0) => {
                log::warn!("input stream closed");
                (Some(Command::Escape), true)
            }
            Ok(n) => (decode(&buf[..n]), false),
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => {
                log::error!("error reading input: {e}");
                (Some(Command::Escape), true)
            }
        };

        if let Some(command) = command {
            if tx.send(command).is_err() {
                log::debug!("game loop gone, input pump exiting");
                return;
            }
        }
        if failed {
            thread::sleep(READ_RETRY);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn lone_escape_byte() {
        assert_eq!(decode(&[0x1b]), Some(Command::Escape));
    }

    #[test]
    fn arrow_sequences() {
        assert_eq!(decode(b"\x1b[A"), Some(Command::Move(Direction::Up)));
        assert_eq!(decode(b"\x1b[B"), Some(Command::Move(Direction::Down)));
        assert_eq!(decode(b"\x1b[C"), Some(Command::Move(Direction::Right)));
        assert_eq!(decode(b"\x1b[D"), Some(Command::Move(Direction::Left)));
    }

    #[test]
    fn ctrl_c_quits() {
        assert_eq!(decode(&[0x03]), Some(Command::Escape));
    }

    #[test]
    fn everything_else_is_ignored() {
        assert_eq!(decode(b"a"), None);
        assert_eq!(decode(b"\x1b["), None);
        assert_eq!(decode(b"\x1b[Z"), None);
        assert_eq!(decode(b"\x1bOA"), None);
        assert_eq!(decode(b""), None);
    }

    /// Serves one chunk per read, then reports end of input.
    struct Chunks(Vec<Vec<u8>>);

    impl Read for Chunks {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.0.is_empty() {
                return Ok(0);
            }
            let chunk = self.0.remove(0);
            buf[..chunk.len()].copy_from_slice(&chunk);
            Ok(chunk.len())
        }
    }

    #[test]
    fn pump_forwards_decoded_commands_in_order() {
        let rx = spawn_pump(Chunks(vec![b"\x1b[C".to_vec(), b"q".to_vec(), b"\x1b[A".to_vec()]));
        let timeout = Duration::from_secs(2);
        assert_eq!(rx.recv_timeout(timeout).unwrap(), Command::Move(Direction::Right));
        assert_eq!(rx.recv_timeout(timeout).unwrap(), Command::Move(Direction::Up));
        // End of input is turned into an Escape.
        assert_eq!(rx.recv_timeout(timeout).unwrap(), Command::Escape);
    }

    struct Broken;

    impl Read for Broken {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(ErrorKind::Other, "device gone"))
        }
    }

    #[test]
    fn read_failure_becomes_escape() {
        let rx = spawn_pump(Broken);
        assert_eq!(rx.recv_timeout(Duration::from_secs(2)).unwrap(), Command::Escape);
    }
}
