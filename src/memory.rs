use crate::error::MachineError;

// NB. addresses are u16 as per the chip-8; lengths are usize to stop endless casting

/// how much RAM we have
pub const RAM_SIZE_BYTES: usize = 4096;

/// where programs are loaded
pub const PROGRAM_ADDR: u16 = 0x0200;

/// where the built-in hex glyphs live
pub const FONT_ADDR: u16 = 0x0050;

/// bytes per hex glyph
pub const FONT_GLYPH_LEN: u16 = 5;

/// The 4K CHIP-8 address space. The first 0x200 bytes belong to the
/// interpreter; the only thing baked in there is the glyph table at 0x50.
/// Programs live from 0x200 up.
pub struct AddressSpace {
    bytes: Box<[u8; RAM_SIZE_BYTES]>,
}

impl AddressSpace {
    pub fn new() -> Self {
        let mut mem = AddressSpace {
            bytes: Box::new([0u8; RAM_SIZE_BYTES]),
        };
        let a = FONT_ADDR as usize;
        mem.bytes[a..a + FONT.len()].copy_from_slice(&FONT);
        mem
    }

    /// copy a program in at 0x200. the only write path into the program
    /// region; everything else is assumed already initialised
    pub fn load_program(&mut self, program: &[u8]) -> Result<(), MachineError> {
        let max = RAM_SIZE_BYTES - PROGRAM_ADDR as usize;
        if program.len() > max {
            return Err(MachineError::ProgramTooLarge {
                len: program.len(),
                max,
            });
        }
        let a = PROGRAM_ADDR as usize;
        self.bytes[a..a + program.len()].copy_from_slice(program);
        Ok(())
    }

    /// addresses wrap modulo the RAM size rather than fault
    pub fn read_byte(&self, addr: u16) -> u8 {
        self.bytes[addr as usize % RAM_SIZE_BYTES]
    }

    pub fn write_byte(&mut self, addr: u16, value: u8) {
        self.bytes[addr as usize % RAM_SIZE_BYTES] = value;
    }

    /// get a two-byte word, big-endian as the chip-8 stores instructions
    pub fn read_word(&self, addr: u16) -> u16 {
        ((self.read_byte(addr) as u16) << 8) | self.read_byte(addr.wrapping_add(1)) as u16
    }
}

impl Default for AddressSpace {
    fn default() -> Self {
        Self::new()
    }
}

const FONT: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_zeroed_outside_font() {
        let m = AddressSpace::new();
        assert_eq!(m.bytes[0x200..], [0; 0xe00]);
        assert_eq!(m.bytes[..0x50], [0; 0x50]);
    }

    #[test]
    fn test_font_preloaded() {
        let m = AddressSpace::new();
        // glyph for 0 starts the table, glyph for F ends it
        assert_eq!(m.bytes[0x50..0x55], [0xF0, 0x90, 0x90, 0x90, 0xF0]);
        assert_eq!(m.bytes[0x9b..0xa0], [0xF0, 0x80, 0xF0, 0x80, 0x80]);
    }

    #[test]
    fn test_program_load_ok() -> Result<(), MachineError> {
        let mut m = AddressSpace::new();
        m.load_program(&[0x00, 0xe0])?; // clear screen
        assert_eq!(m.read_byte(0x200), 0x00);
        assert_eq!(m.read_byte(0x201), 0xe0);
        Ok(())
    }

    #[test]
    fn test_program_load_fills_ram() -> Result<(), MachineError> {
        let mut m = AddressSpace::new();
        m.load_program(&[0xaa; 0xe00])?;
        assert_eq!(m.read_byte(0x0fff), 0xaa);
        Ok(())
    }

    #[test]
    fn test_program_too_large() {
        let mut m = AddressSpace::new();
        assert_eq!(
            m.load_program(&[0; 0xe01]),
            Err(MachineError::ProgramTooLarge {
                len: 0xe01,
                max: 0xe00
            })
        );
        // a failed load leaves the program region untouched
        assert_eq!(m.read_byte(0x200), 0);
    }

    #[test]
    fn test_read_word_big_endian() {
        let mut m = AddressSpace::new();
        m.write_byte(0x204, 0x04);
        m.write_byte(0x205, 0x05);
        assert_eq!(m.read_word(0x204), 0x0405);
    }

    #[test]
    fn test_read_wraps_at_top() {
        let mut m = AddressSpace::new();
        m.write_byte(0x0000, 0xbb);
        assert_eq!(m.read_byte(0x1000), 0xbb);
        m.write_byte(0x0fff, 0xcd);
        assert_eq!(m.read_word(0x0fff), 0xcdbb);
    }
}
