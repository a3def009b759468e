//! WinAnsiEncoding for the standard Type1 fonts.
//!
//! Text drawn with a Base-14 font must be expressed as single-byte codes in
//! the font's encoding (PDF spec Annex D.2). Characters with no code are
//! replaced so the content stream stays well-formed.

/// Byte used for characters WinAnsi cannot express.
pub const REPLACEMENT: u8 = b'?';

/// Encode one character, or `None` when WinAnsi has no code for it.
pub fn encode_char(c: char) -> Option<u8> {
    let cp = c as u32;
    match cp {
        0x20..=0x7E | 0xA0..=0xFF => Some(cp as u8),
        _ => match c {
            '€' => Some(0x80),
            '‚' => Some(0x82),
            'ƒ' => Some(0x83),
            '„' => Some(0x84),
            '…' => Some(0x85),
            '†' => Some(0x86),
            '‡' => Some(0x87),
            'ˆ' => Some(0x88),
            '‰' => Some(0x89),
            'Š' => Some(0x8A),
            '‹' => Some(0x8B),
            'Œ' => Some(0x8C),
            'Ž' => Some(0x8E),
            '‘' => Some(0x91),
            '’' => Some(0x92),
            '“' => Some(0x93),
            '”' => Some(0x94),
            '•' => Some(0x95),
            '–' => Some(0x96),
            '—' => Some(0x97),
            '˜' => Some(0x98),
            '™' => Some(0x99),
            'š' => Some(0x9A),
            '›' => Some(0x9B),
            'œ' => Some(0x9C),
            'ž' => Some(0x9E),
            'Ÿ' => Some(0x9F),
            _ => None,
        },
    }
}

/// Encode a line of text, returning the bytes and the number of characters
/// that had to be replaced.
pub fn encode_line(text: &str) -> (Vec<u8>, usize) {
    let mut out = Vec::with_capacity(text.len());
    let mut replaced = 0;
    for c in text.chars() {
        match encode_char(c) {
            Some(b) => out.push(b),
            None => {
                out.push(REPLACEMENT);
                replaced += 1;
            },
        }
    }
    (out, replaced)
}
