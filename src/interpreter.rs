/// # interpreter
///
/// The whole machine is one struct: 4K of RAM, sixteen 8-bit registers, a
/// 16-slot call stack, two 60Hz countdown timers, the framebuffer and the
/// keypad state. The host drives it by calling `step` (or `run` for a batch)
/// and `tick_timers` at its own cadence; nothing in here blocks or spawns.
///
/// Register VF doubles as the flag register: carry, borrow, shifted-out bit
/// and sprite collision all land there, always as the last write of the
/// operation, so an operation targeting VF itself leaves the flag result.
use crate::display::FrameBuffer;
use crate::error::MachineError;
use crate::instruction::Instruction;
use crate::memory::{AddressSpace, FONT_ADDR, FONT_GLYPH_LEN, PROGRAM_ADDR};
use log::warn;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// general-purpose registers, V0-VF
pub const NUM_REGISTERS: usize = 16;

/// nested calls the stack can hold
pub const STACK_DEPTH: usize = 16;

/// keypad symbols 0-F
pub const NUM_KEYS: usize = 16;

/// VF holds carry/borrow/collision outcomes
const FLAG: usize = 0x0f;

/// addresses are 12 bits; the program counter wraps rather than run off the
/// top of RAM
const ADDR_MASK: u16 = 0x0fff;

pub struct Interpreter {
    memory: AddressSpace,
    v: [u8; NUM_REGISTERS],
    i: u16,
    pc: u16,
    stack: [u16; STACK_DEPTH],
    sp: usize,
    delay_timer: u8,
    sound_timer: u8,
    framebuffer: FrameBuffer,
    keys: [bool; NUM_KEYS],
    rng: SmallRng,
}

impl Interpreter {
    pub fn new() -> Self {
        Self::with_rng(SmallRng::from_entropy())
    }

    /// a machine whose random opcode is deterministic; everything else
    /// already is
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(SmallRng::seed_from_u64(seed))
    }

    fn with_rng(rng: SmallRng) -> Self {
        Interpreter {
            memory: AddressSpace::new(),
            v: [0; NUM_REGISTERS],
            i: 0,
            pc: PROGRAM_ADDR,
            stack: [0; STACK_DEPTH],
            sp: 0,
            delay_timer: 0,
            sound_timer: 0,
            framebuffer: FrameBuffer::new(),
            keys: [false; NUM_KEYS],
            rng,
        }
    }

    /// load a program at 0x200
    pub fn load(&mut self, program: &[u8]) -> Result<(), MachineError> {
        self.memory.load_program(program)
    }

    /// run one fetch/decode/execute round
    pub fn step(&mut self) -> Result<(), MachineError> {
        let word = self.fetch();
        self.execute(Instruction::decode(word))
    }

    /// run a batch of instructions, e.g. one frame's worth
    pub fn run(&mut self, instructions: usize) -> Result<(), MachineError> {
        for _ in 0..instructions {
            self.step()?;
        }
        Ok(())
    }

    /// decrement both timers toward zero. the host calls this at 60Hz,
    /// independent of instruction throughput
    pub fn tick_timers(&mut self) {
        self.delay_timer = self.delay_timer.saturating_sub(1);
        self.sound_timer = self.sound_timer.saturating_sub(1);
    }

    /// the host's one write path into the keypad; key symbols above 0xF wrap
    pub fn set_key(&mut self, key: u8, pressed: bool) {
        self.keys[(key & 0x0f) as usize] = pressed;
    }

    /// true while the program wants a tone
    pub fn sound_active(&self) -> bool {
        self.sound_timer > 0
    }

    /// the screen as the machine last left it
    pub fn framebuffer(&self) -> &FrameBuffer {
        &self.framebuffer
    }

    /// read the two bytes at PC big-endian and advance PC past them. always
    /// succeeds; the address just wraps at the top of RAM
    fn fetch(&mut self) -> u16 {
        let word = self.memory.read_word(self.pc);
        self.pc = self.pc.wrapping_add(2) & ADDR_MASK;
        word
    }

    fn skip_next(&mut self) {
        self.pc = self.pc.wrapping_add(2) & ADDR_MASK;
    }

    fn execute(&mut self, instruction: Instruction) -> Result<(), MachineError> {
        use Instruction::*;
        match instruction {
            ClearDisplay => self.framebuffer.clear(),
            Return => {
                if self.sp == 0 {
                    return Err(MachineError::StackUnderflow);
                }
                self.sp -= 1;
                self.pc = self.stack[self.sp];
            }
            Jump(nnn) => self.pc = nnn,
            Call(nnn) => {
                if self.sp == STACK_DEPTH {
                    return Err(MachineError::StackOverflow(STACK_DEPTH));
                }
                self.stack[self.sp] = self.pc;
                self.sp += 1;
                self.pc = nnn;
            }
            SkipEqImm { x, nn } => {
                if self.v[x] == nn {
                    self.skip_next();
                }
            }
            SkipNeImm { x, nn } => {
                if self.v[x] != nn {
                    self.skip_next();
                }
            }
            SkipEqReg { x, y } => {
                if self.v[x] == self.v[y] {
                    self.skip_next();
                }
            }
            SkipNeReg { x, y } => {
                if self.v[x] != self.v[y] {
                    self.skip_next();
                }
            }
            LoadImm { x, nn } => self.v[x] = nn,
            // truncating add, flag untouched
            AddImm { x, nn } => self.v[x] = self.v[x].wrapping_add(nn),
            Copy { x, y } => self.v[x] = self.v[y],
            Or { x, y } => self.v[x] |= self.v[y],
            And { x, y } => self.v[x] &= self.v[y],
            Xor { x, y } => self.v[x] ^= self.v[y],
            AddReg { x, y } => {
                let (sum, carry) = self.v[x].overflowing_add(self.v[y]);
                self.v[x] = sum;
                self.v[FLAG] = carry as u8;
            }
            SubXY { x, y } => {
                let no_borrow = self.v[x] >= self.v[y];
                self.v[x] = self.v[x].wrapping_sub(self.v[y]);
                self.v[FLAG] = no_borrow as u8;
            }
            SubYX { x, y } => {
                let no_borrow = self.v[y] >= self.v[x];
                self.v[x] = self.v[y].wrapping_sub(self.v[x]);
                self.v[FLAG] = no_borrow as u8;
            }
            ShiftRight { x } => {
                let low_bit = self.v[x] & 1;
                self.v[x] >>= 1;
                self.v[FLAG] = low_bit;
            }
            ShiftLeft { x } => {
                let high_bit = self.v[x] >> 7;
                self.v[x] <<= 1;
                self.v[FLAG] = high_bit;
            }
            SetIndex(nnn) => self.i = nnn,
            JumpOffset(nnn) => self.pc = nnn.wrapping_add(self.v[0] as u16) & ADDR_MASK,
            Random { x, nn } => self.v[x] = self.rng.gen::<u8>() & nn,
            Draw { x, y, n } => {
                let mut rows = [0u8; 15];
                for (row, slot) in rows.iter_mut().enumerate().take(n as usize) {
                    *slot = self.memory.read_byte(self.i.wrapping_add(row as u16));
                }
                let collision =
                    self.framebuffer
                        .draw_sprite(self.v[x], self.v[y], &rows[..n as usize]);
                self.v[FLAG] = collision as u8;
            }
            SkipKeyPressed { x } => {
                if self.keys[(self.v[x] & 0x0f) as usize] {
                    self.skip_next();
                }
            }
            SkipKeyNotPressed { x } => {
                if !self.keys[(self.v[x] & 0x0f) as usize] {
                    self.skip_next();
                }
            }
            LoadDelay { x } => self.v[x] = self.delay_timer,
            // not a true block: with no key down, rewind PC so the same
            // instruction re-runs on the host's next step
            WaitKey { x } => match self.keys.iter().position(|&pressed| pressed) {
                Some(key) => self.v[x] = key as u8,
                None => self.pc = self.pc.wrapping_sub(2) & ADDR_MASK,
            },
            SetDelay { x } => self.delay_timer = self.v[x],
            SetSound { x } => self.sound_timer = self.v[x],
            AddIndex { x } => self.i = self.i.wrapping_add(self.v[x] as u16),
            FontAddress { x } => self.i = FONT_ADDR + self.v[x] as u16 * FONT_GLYPH_LEN,
            StoreBcd { x } => {
                let value = self.v[x];
                self.memory.write_byte(self.i, value / 100);
                self.memory.write_byte(self.i.wrapping_add(1), value / 10 % 10);
                self.memory.write_byte(self.i.wrapping_add(2), value % 10);
            }
            StoreRegisters { x } => {
                for r in 0..=x {
                    self.memory.write_byte(self.i.wrapping_add(r as u16), self.v[r]);
                }
            }
            LoadRegisters { x } => {
                for r in 0..=x {
                    self.v[r] = self.memory.read_byte(self.i.wrapping_add(r as u16));
                }
            }
            Noop => {}
            Unknown(word) => {
                warn!(
                    "unknown opcode {:#06x} at {:#05x}, treating as no-op",
                    word,
                    self.pc.wrapping_sub(2) & ADDR_MASK
                );
            }
        }
        Ok(())
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}
