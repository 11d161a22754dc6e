///
/// ## Design
///
/// * one `Interpreter` struct owns everything the machine is: RAM, V0-VF,
///   index register, PC, call stack, timers, framebuffer, keypad
/// * the host drives it explicitly: `step`/`run` for instructions,
///   `tick_timers` at 60Hz, `set_key` when its input layer sees a key;
///   nothing inside spawns, sleeps or blocks
/// * instructions decode into a closed enum before execution, so every
///   opcode is one match arm and unknown encodings are just another arm
///   (logged, then ignored)
/// * front-end concerns hide behind traits so alternatives can be plugged
///   in:
///    - display: `Display::draw` takes the bit-packed framebuffer; the TUI
///      in-console renderer is the default
///    - input: `Input` buffers mapped keypad presses between frames
///    - audio: `Sound` turns the tone on and off
/// * "wait for key" never suspends: with no key down it rewinds the PC and
///   hands control straight back, so the host's loop stays in charge
/// * errors that can only come from a broken ROM (stack over/underflow,
///   oversized program) surface as `MachineError`; everything else is
///   deterministic no-op behaviour
///
/// Model
///
/// main
///  |-- display, input, sound
///  |-- interpreter (owns AddressSpace + FrameBuffer)
///  `-- 60Hz loop
///       |-- feed keypresses into interpreter.set_key
///       |-- interpreter.run(INSTRUCTIONS_PER_FRAME)
///       |-- interpreter.tick_timers()
///       |-- display.draw(interpreter.framebuffer().as_bytes())
///       `-- sound.set_tone(interpreter.sound_active())
pub mod display;
pub mod error;
pub mod input;
pub mod instruction;
pub mod interpreter;
pub mod memory;
pub mod sound;

pub use error::MachineError;
pub use interpreter::Interpreter;
