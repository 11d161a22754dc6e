/// One decoded instruction word, operand fields already extracted. Decoding
/// up front means execution is a single exhaustive match and unknown
/// encodings are an ordinary variant instead of a default arm buried in
/// nested switches.
///
/// Field conventions follow the instruction layout: `x` is bits 8-11, `y` is
/// bits 4-7, `nn` bits 0-7, `nnn` bits 0-11, `n` bits 0-3.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// 00E0
    ClearDisplay,
    /// 00EE
    Return,
    /// 1NNN
    Jump(u16),
    /// 2NNN
    Call(u16),
    /// 3XNN
    SkipEqImm { x: usize, nn: u8 },
    /// 4XNN
    SkipNeImm { x: usize, nn: u8 },
    /// 5XY0
    SkipEqReg { x: usize, y: usize },
    /// 6XNN
    LoadImm { x: usize, nn: u8 },
    /// 7XNN; no flag, unlike AddReg
    AddImm { x: usize, nn: u8 },
    /// 8XY0
    Copy { x: usize, y: usize },
    /// 8XY1
    Or { x: usize, y: usize },
    /// 8XY2
    And { x: usize, y: usize },
    /// 8XY3
    Xor { x: usize, y: usize },
    /// 8XY4; VF = carry
    AddReg { x: usize, y: usize },
    /// 8XY5; VF = no borrow
    SubXY { x: usize, y: usize },
    /// 8XY6; VF = shifted-out bit
    ShiftRight { x: usize },
    /// 8XY7; VY - VX into VX, VF = no borrow
    SubYX { x: usize, y: usize },
    /// 8XYE; VF = shifted-out bit
    ShiftLeft { x: usize },
    /// 9XY0
    SkipNeReg { x: usize, y: usize },
    /// ANNN
    SetIndex(u16),
    /// BNNN
    JumpOffset(u16),
    /// CXNN
    Random { x: usize, nn: u8 },
    /// DXYN
    Draw { x: usize, y: usize, n: u8 },
    /// EX9E
    SkipKeyPressed { x: usize },
    /// EXA1
    SkipKeyNotPressed { x: usize },
    /// FX07
    LoadDelay { x: usize },
    /// FX0A
    WaitKey { x: usize },
    /// FX15
    SetDelay { x: usize },
    /// FX18
    SetSound { x: usize },
    /// FX1E
    AddIndex { x: usize },
    /// FX29
    FontAddress { x: usize },
    /// FX33
    StoreBcd { x: usize },
    /// FX55
    StoreRegisters { x: usize },
    /// FX65
    LoadRegisters { x: usize },
    /// unrecognised secondary code within a matched family; executes as
    /// nothing without comment
    Noop,
    /// encoding outside every known family; executes as nothing but is worth
    /// a diagnostic
    Unknown(u16),
}

impl Instruction {
    /// classify a word by its top nibble, then for families 0x0, 0xE and 0xF
    /// by the low byte and for family 0x8 by the low nibble
    pub fn decode(word: u16) -> Instruction {
        use Instruction::*;

        let x = (word >> 8 & 0x0f) as usize;
        let y = (word >> 4 & 0x0f) as usize;
        let nn = (word & 0xff) as u8;
        let nnn = word & 0x0fff;
        let n = (word & 0x0f) as u8;

        match word >> 12 {
            0x0 => match nn {
                0xe0 => ClearDisplay,
                0xee => Return,
                // 0NNN called into native 1802 code on the original machine
                _ => Noop,
            },
            0x1 => Jump(nnn),
            0x2 => Call(nnn),
            0x3 => SkipEqImm { x, nn },
            0x4 => SkipNeImm { x, nn },
            0x5 if n == 0 => SkipEqReg { x, y },
            0x6 => LoadImm { x, nn },
            0x7 => AddImm { x, nn },
            0x8 => match n {
                0x0 => Copy { x, y },
                0x1 => Or { x, y },
                0x2 => And { x, y },
                0x3 => Xor { x, y },
                0x4 => AddReg { x, y },
                0x5 => SubXY { x, y },
                0x6 => ShiftRight { x },
                0x7 => SubYX { x, y },
                0xe => ShiftLeft { x },
                _ => Noop,
            },
            0x9 if n == 0 => SkipNeReg { x, y },
            0xa => SetIndex(nnn),
            0xb => JumpOffset(nnn),
            0xc => Random { x, nn },
            0xd => Draw { x, y, n },
            0xe => match nn {
                0x9e => SkipKeyPressed { x },
                0xa1 => SkipKeyNotPressed { x },
                _ => Noop,
            },
            0xf => match nn {
                0x07 => LoadDelay { x },
                0x0a => WaitKey { x },
                0x15 => SetDelay { x },
                0x18 => SetSound { x },
                0x1e => AddIndex { x },
                0x29 => FontAddress { x },
                0x33 => StoreBcd { x },
                0x55 => StoreRegisters { x },
                0x65 => LoadRegisters { x },
                _ => Noop,
            },
            _ => Unknown(word),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Instruction::*;

    #[test]
    fn test_decode_system_family() {
        assert_eq!(Instruction::decode(0x00e0), ClearDisplay);
        assert_eq!(Instruction::decode(0x00ee), Return);
        // 0NNN machine-code call is ignored quietly
        assert_eq!(Instruction::decode(0x0123), Noop);
    }

    #[test]
    fn test_decode_operand_fields() {
        assert_eq!(Instruction::decode(0x1abc), Jump(0x0abc));
        assert_eq!(Instruction::decode(0x2200), Call(0x0200));
        assert_eq!(Instruction::decode(0x3a55), SkipEqImm { x: 0xa, nn: 0x55 });
        assert_eq!(Instruction::decode(0x6b07), LoadImm { x: 0xb, nn: 0x07 });
        assert_eq!(Instruction::decode(0x7cff), AddImm { x: 0xc, nn: 0xff });
        assert_eq!(Instruction::decode(0xa123), SetIndex(0x0123));
        assert_eq!(Instruction::decode(0xd125), Draw { x: 1, y: 2, n: 5 });
    }

    #[test]
    fn test_decode_alu_family() {
        assert_eq!(Instruction::decode(0x8120), Copy { x: 1, y: 2 });
        assert_eq!(Instruction::decode(0x8121), Or { x: 1, y: 2 });
        assert_eq!(Instruction::decode(0x8122), And { x: 1, y: 2 });
        assert_eq!(Instruction::decode(0x8123), Xor { x: 1, y: 2 });
        assert_eq!(Instruction::decode(0x8124), AddReg { x: 1, y: 2 });
        assert_eq!(Instruction::decode(0x8125), SubXY { x: 1, y: 2 });
        assert_eq!(Instruction::decode(0x8126), ShiftRight { x: 1 });
        assert_eq!(Instruction::decode(0x8127), SubYX { x: 1, y: 2 });
        assert_eq!(Instruction::decode(0x812e), ShiftLeft { x: 1 });
        assert_eq!(Instruction::decode(0x8128), Noop);
    }

    #[test]
    fn test_decode_key_and_misc_families() {
        assert_eq!(Instruction::decode(0xe19e), SkipKeyPressed { x: 1 });
        assert_eq!(Instruction::decode(0xe1a1), SkipKeyNotPressed { x: 1 });
        assert_eq!(Instruction::decode(0xe100), Noop);
        assert_eq!(Instruction::decode(0xf20a), WaitKey { x: 2 });
        assert_eq!(Instruction::decode(0xf229), FontAddress { x: 2 });
        assert_eq!(Instruction::decode(0xf233), StoreBcd { x: 2 });
        assert_eq!(Instruction::decode(0xf255), StoreRegisters { x: 2 });
        assert_eq!(Instruction::decode(0xf265), LoadRegisters { x: 2 });
        assert_eq!(Instruction::decode(0xf2ff), Noop);
    }

    #[test]
    fn test_decode_unknown() {
        assert_eq!(Instruction::decode(0x5121), Unknown(0x5121));
        assert_eq!(Instruction::decode(0x9121), Unknown(0x9121));
    }
}
