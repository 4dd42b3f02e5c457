/// One oto.ini line: `filename=alias,offset,consonant,cutoff,preutter,overlap`.
///
/// All numeric fields are kept as whole milliseconds. `cutoff` is signed:
/// zero or negative means "measured forward from `offset`", positive means
/// "measured backward from the end of the sample". The parser always stores
/// it non-positive (see [`parse`]); positive values only appear through
/// direct field assignment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OtoEntry {
    pub filename: String,
    pub alias: String,
    pub offset: i64,
    pub consonant: i64,
    pub cutoff: i64,
    pub preutter: i64,
    pub overlap: i64,
}

impl OtoEntry {
    /// Default entry for a sample that has no oto line yet.
    pub fn for_resource(filename: &str) -> Self {
        Self {
            filename: filename.to_string(),
            alias: infer_alias(filename),
            offset: 0,
            consonant: 0,
            cutoff: 0,
            preutter: 0,
            overlap: 0,
        }
    }
}

/// Round to the nearest integer with halves going up, i.e. what the oto
/// ecosystem's editors do (`-3.5` becomes `-3`, not `-4`).
pub fn round_half_up(v: f64) -> i64 {
    (v + 0.5).floor() as i64
}

/// Round an arbitrary field token to whole milliseconds. Non-numeric or
/// missing tokens coerce to 0; oto.ini files are hand-edited and a bad
/// token must not take the rest of the file down.
pub fn round_ms(token: &str) -> i64 {
    token
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(round_half_up)
        .unwrap_or(0)
}

/// Parse oto.ini text into entries, best effort.
///
/// Line separators may be `\n`, `\r\n`, or bare `\r`. Blank lines and lines
/// without `=` are skipped. The split is on the *first* `=` only, so the
/// value side may contain `=`. Missing trailing fields default to 0.
///
/// The cutoff field is normalized to `-abs(value)` on ingestion. This drops
/// an originally positive sign (the backward-from-end form) on purpose;
/// re-serialization is otherwise exact.
pub fn parse(text: &str) -> Vec<OtoEntry> {
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
    let mut out = Vec::new();
    for raw in normalized.split('\n') {
        if raw.trim().is_empty() {
            continue;
        }
        let Some(eq) = raw.find('=') else {
            continue;
        };
        let filename = raw[..eq].trim().to_string();
        let mut parts = raw[eq + 1..].split(',');
        let alias = parts.next().unwrap_or("").trim().to_string();
        let mut field = || round_ms(parts.next().unwrap_or(""));
        out.push(OtoEntry {
            filename,
            alias,
            offset: field(),
            consonant: field(),
            cutoff: -field().saturating_abs(),
            preutter: field(),
            overlap: field(),
        });
    }
    out
}

/// Serialize entries back to oto.ini text. One line per entry, joined with
/// `\n`, no trailing newline. No validation happens here.
pub fn serialize(entries: &[OtoEntry]) -> String {
    entries
        .iter()
        .map(|p| {
            format!(
                "{}={},{},{},{},{},{}",
                p.filename, p.alias, p.offset, p.consonant, p.cutoff, p.preutter, p.overlap
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Alias inferred from a resource name: basename without its final
/// extension. Both `/` and `\` count as directory separators. A name that
/// is nothing but an extension (".hidden") infers an empty alias.
pub fn infer_alias(filename: &str) -> String {
    let base = filename
        .rsplit(|c| c == '/' || c == '\\')
        .next()
        .unwrap_or(filename);
    match base.rfind('.') {
        Some(dot) if dot + 1 < base.len() => base[..dot].to_string(),
        _ => base.to_string(),
    }
}

/// Stable identity key for external collaborators (starring etc.),
/// independent of the entry's position in the sequence. Two entries with
/// the same filename and alias collide by design.
pub fn key_for(entry: &OtoEntry) -> String {
    format!("{}|{}", entry.filename, entry.alias)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infer_alias_strips_dirs_and_extension() {
        assert_eq!(infer_alias("voice/_a.wav"), "_a");
        assert_eq!(infer_alias("C:\\bank\\ka.wav"), "ka");
        assert_eq!(infer_alias("plain"), "plain");
        assert_eq!(infer_alias(".hidden"), "");
        assert_eq!(infer_alias("name."), "name.");
    }

    #[test]
    fn round_ms_coerces_garbage_to_zero() {
        assert_eq!(round_ms(" 12.6 "), 13);
        assert_eq!(round_ms("-3.5"), -3);
        assert_eq!(round_ms("abc"), 0);
        assert_eq!(round_ms(""), 0);
        assert_eq!(round_ms("nan"), 0);
    }
}
