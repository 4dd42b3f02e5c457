use encoding_rs::{Encoding, SHIFT_JIS, UTF_8, WINDOWS_1252};

/// Encoding actually used to decode an oto.ini blob.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextEncoding {
    Utf8,
    Utf16Le,
    Utf16Be,
    ShiftJis,
    Windows1252,
}

impl TextEncoding {
    pub fn label(self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "UTF-8",
            TextEncoding::Utf16Le => "UTF-16 LE",
            TextEncoding::Utf16Be => "UTF-16 BE",
            TextEncoding::ShiftJis => "Shift_JIS",
            TextEncoding::Windows1252 => "Windows-1252",
        }
    }
}

/// Decode a hand-edited oto.ini blob. BOMs win; without one the candidate
/// encodings are each tried strictly and the cleanly-decoding result with
/// the most Japanese text is kept, UTF-8 preferred on ties. Most voicebank
/// oto.ini files in the wild are BOM-less Shift_JIS, which is what the
/// sniffing exists for.
pub fn decode_oto_text(bytes: &[u8]) -> (String, TextEncoding) {
    if bytes.starts_with(&[0xEF, 0xBB, 0xBF]) {
        return (
            String::from_utf8_lossy(&bytes[3..]).into_owned(),
            TextEncoding::Utf8,
        );
    }
    if bytes.starts_with(&[0xFF, 0xFE]) {
        return (decode_utf16(&bytes[2..], u16::from_le_bytes), TextEncoding::Utf16Le);
    }
    if bytes.starts_with(&[0xFE, 0xFF]) {
        return (decode_utf16(&bytes[2..], u16::from_be_bytes), TextEncoding::Utf16Be);
    }

    let candidates: [(&Encoding, TextEncoding); 3] = [
        (UTF_8, TextEncoding::Utf8),
        (SHIFT_JIS, TextEncoding::ShiftJis),
        (WINDOWS_1252, TextEncoding::Windows1252),
    ];
    let mut best: Option<(String, TextEncoding, usize)> = None;
    for (encoding, tag) in candidates {
        let (text, had_errors) = encoding.decode_without_bom_handling(bytes);
        if had_errors {
            continue;
        }
        let score = japanese_chars(&text);
        // Strict `>` so the earlier candidate (UTF-8) wins a tie.
        if best.as_ref().map_or(true, |(_, _, s)| score > *s) {
            best = Some((text.into_owned(), tag, score));
        }
    }
    match best {
        Some((text, tag, _)) => (text, tag),
        // Nothing decoded strictly; read as UTF-8 with lossy replacement so
        // a stray byte mangles one alias instead of failing the whole load.
        None => (String::from_utf8_lossy(bytes).into_owned(), TextEncoding::Utf8),
    }
}

/// Hiragana, katakana, CJK ideograph, and half-width katakana count, used
/// to rank candidate decodings of BOM-less input.
fn japanese_chars(text: &str) -> usize {
    text.chars()
        .filter(|&c| {
            let c = c as u32;
            (0x3040..=0x30FF).contains(&c)
                || (0x4E00..=0x9FFF).contains(&c)
                || (0xFF66..=0xFF9D).contains(&c)
        })
        .count()
}

fn decode_utf16(bytes: &[u8], read: fn([u8; 2]) -> u16) -> String {
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|c| read([c[0], c[1]]))
        .collect();
    char::decode_utf16(units.into_iter())
        .map(|r| r.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect()
}
