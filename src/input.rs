use crossterm::event::{poll, read, Event, KeyCode};
use crossterm::terminal;
use std::collections::HashMap;
use std::io;
use std::time::Duration;

/// physical keys mapped to the 4x4 keypad, using the left-hand side of a
/// qwerty keyboard:
///
///   1 2 3 4        1 2 3 C
///   q w e r   =>   4 5 6 D
///   a s d f        7 8 9 E
///   z x c v        A 0 B F
const CONVENTIONAL_KEYMAP: [(char, u8); 16] = [
    ('x', 0x00),
    ('1', 0x01),
    ('2', 0x02),
    ('3', 0x03),
    ('q', 0x04),
    ('w', 0x05),
    ('e', 0x06),
    ('a', 0x07),
    ('s', 0x08),
    ('d', 0x09),
    ('z', 0x0a),
    ('c', 0x0b),
    ('4', 0x0c),
    ('r', 0x0d),
    ('f', 0x0e),
    ('v', 0x0f),
];

/// reads keypresses for the host loop to feed into the machine via set_key
pub trait Input {
    /// all the mapped keys that have been pressed since the last flush,
    /// without flushing them
    fn peek_keys(&mut self) -> Result<&[u8], io::Error>;

    /// flush the keypress buffer
    fn flush_keys(&mut self) -> Result<(), io::Error>;

    /// whether the user asked to leave the emulator
    fn quit_requested(&self) -> bool {
        false
    }
}

/// simple implementation of Input, using STDIN in raw mode
pub struct StdinInput {
    buffer: Vec<u8>,
    keymap: HashMap<char, u8>,
    quit: bool,
}

impl StdinInput {
    pub fn new() -> Result<Self, io::Error> {
        terminal::enable_raw_mode()?;
        Ok(StdinInput {
            buffer: Vec::new(),
            keymap: HashMap::from(CONVENTIONAL_KEYMAP),
            quit: false,
        })
    }

    fn read_stdin(&mut self) -> Result<(), io::Error> {
        while poll(Duration::from_millis(0))? {
            match read()? {
                Event::Key(evt) => match evt.code {
                    KeyCode::Char(key) => match self.keymap.get(&key) {
                        Some(mapped_key) => self.buffer.push(*mapped_key),
                        None => log::debug!("key {:?} has no keypad mapping", key),
                    },
                    KeyCode::Esc => self.quit = true,
                    _ => log::debug!("ignoring non-character key event"),
                },
                _ => log::debug!("ignoring non-key event"),
            }
        }
        Ok(())
    }
}

impl Drop for StdinInput {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

impl Input for StdinInput {
    fn peek_keys(&mut self) -> Result<&[u8], io::Error> {
        self.read_stdin()?;
        Ok(self.buffer.as_slice())
    }

    fn flush_keys(&mut self) -> Result<(), io::Error> {
        self.read_stdin()?;
        self.buffer.clear();
        Ok(())
    }

    fn quit_requested(&self) -> bool {
        self.quit
    }
}

/// canned keypresses for tests
pub struct DummyInput {
    bytes: Vec<u8>,
}

impl DummyInput {
    #[allow(dead_code)]
    pub fn new(keys: &[u8]) -> Self {
        DummyInput {
            bytes: Vec::from(keys),
        }
    }
}

impl Input for DummyInput {
    fn peek_keys(&mut self) -> Result<&[u8], io::Error> {
        Ok(self.bytes.as_slice())
    }

    fn flush_keys(&mut self) -> Result<(), io::Error> {
        self.bytes.clear();
        Ok(())
    }
}
