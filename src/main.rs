use std::env;
use std::error::Error;
use std::fs;
use std::process;
use std::time::{Duration, Instant};

use vip8::display::{Display, MonoTermDisplay, DISPLAY_HEIGHT, DISPLAY_WIDTH};
use vip8::input::{Input, StdinInput};
use vip8::sound::{Mute, SimpleBeep, Sound};
use vip8::Interpreter;

/// reference cadence: 10 instructions per 60Hz frame, timers ticked once a
/// frame
const FRAME: Duration = Duration::from_micros(16_667);
const INSTRUCTIONS_PER_FRAME: usize = 10;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let rom_path = match env::args().nth(1) {
        Some(path) => path,
        None => {
            eprintln!("usage: vip8 <rom.ch8>");
            process::exit(1);
        }
    };
    let rom = fs::read(&rom_path)?;

    let mut interpreter = Interpreter::new();
    interpreter.load(&rom)?;

    let mut display = MonoTermDisplay::new(DISPLAY_WIDTH, DISPLAY_HEIGHT)?;
    let mut input = StdinInput::new()?;
    let mut sound: Box<dyn Sound> = match SimpleBeep::new() {
        Ok(beeper) => Box::new(beeper),
        Err(err) => {
            log::warn!("pc speaker unavailable ({}), running muted", err);
            Box::new(Mute::new())
        }
    };

    while !input.quit_requested() {
        let frame_start = Instant::now();

        // keys reported this frame are down, everything else is up
        let pressed = input.peek_keys()?.to_vec();
        for key in 0..16 {
            interpreter.set_key(key, pressed.contains(&key));
        }
        input.flush_keys()?;

        interpreter.run(INSTRUCTIONS_PER_FRAME)?;
        interpreter.tick_timers();

        display.draw(interpreter.framebuffer().as_bytes())?;
        sound.set_tone(interpreter.sound_active())?;

        if let Some(remaining) = FRAME.checked_sub(frame_start.elapsed()) {
            spin_sleep::sleep(remaining);
        }
    }

    // shove some junk on stdout to stop the cli messing up the last frame
    for _ in 0..12 {
        println!();
    }
    Ok(())
}
